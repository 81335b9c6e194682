//! Java exceptions the core can surface on a thread.
//!
//! A deliberately small subset: only the exceptions this core's own
//! operations (dispatch, marshalling, reflection, launch) actually throw.

/// One Java exception or error, carrying the message its `Throwable`
/// would have been constructed with.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JavaError {
    /// `ClassNotFoundException`
    #[error("{0}")]
    ClassNotFoundException(String),
    /// `UnsatisfiedLinkError`
    #[error("{0}")]
    UnsatisfiedLinkError(String),
    /// `IllegalArgumentException`
    #[error("{0}")]
    IllegalArgumentException(String),
    /// `NoSuchMethodError`
    #[error("{0}")]
    NoSuchMethodError(String),
    /// `AbstractMethodError`
    #[error("{0}")]
    AbstractMethodError(String),
    /// `IllegalAccessException`
    #[error("{0}")]
    IllegalAccessException(String),
    /// `IllegalMonitorStateException`
    #[error("{0}")]
    IllegalMonitorStateException(String),
}

impl JavaError {
    /// The binary name of the Java class this error corresponds to.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            JavaError::ClassNotFoundException(_) => "java/lang/ClassNotFoundException",
            JavaError::UnsatisfiedLinkError(_) => "java/lang/UnsatisfiedLinkError",
            JavaError::IllegalArgumentException(_) => "java/lang/IllegalArgumentException",
            JavaError::NoSuchMethodError(_) => "java/lang/NoSuchMethodError",
            JavaError::AbstractMethodError(_) => "java/lang/AbstractMethodError",
            JavaError::IllegalAccessException(_) => "java/lang/IllegalAccessException",
            JavaError::IllegalMonitorStateException(_) => "java/lang/IllegalMonitorStateException",
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_and_message() {
        let error = JavaError::UnsatisfiedLinkError("Foo::bar()V".to_string());
        assert_eq!(error.class_name(), "java/lang/UnsatisfiedLinkError");
        assert_eq!(error.message(), "Foo::bar()V");
    }
}
