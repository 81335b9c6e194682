//! Error handling for class loading.

/// Result type used throughout `rjvm_classloader`.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Class not found: {0}")]
    ClassNotFound(String),
    #[error("Invalid descriptor: {0}")]
    BadDescriptor(String),
    #[error(transparent)]
    ClassFileError(#[from] rjvm_classfile::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
