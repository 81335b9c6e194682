//! Error handling for dispatch, reflection, marshalling, and launch.

use crate::java_error::JavaError;

/// Result type used throughout `rjvm_vm`.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ClassFileError(#[from] rjvm_classfile::Error),
    #[error(transparent)]
    ClassLoaderError(#[from] rjvm_classloader::Error),
    /// A Java exception surfaced on a thread: class not found, link
    /// error, unsatisfied link, initialization failure.
    #[error(transparent)]
    JavaError(#[from] JavaError),
    /// A caller asked a method for the wrong code variant (e.g.
    /// `code_attribute` on a native method).
    #[error("{full_signature} has no {expected}")]
    CodeVariantMismatch {
        full_signature: String,
        expected: &'static str,
    },
    /// A malformed descriptor, surfaced here rather than in
    /// `rjvm_classloader` because the marshaller re-derives slot widths.
    #[error("Invalid descriptor: {0}")]
    BadDescriptor(String),
    /// Preinitialization of core classes failed.
    #[error("Bootstrap failure: {0}")]
    BootstrapFatal(String),
}
