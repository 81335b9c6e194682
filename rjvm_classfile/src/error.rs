//! Error handling for class-file parsing.

/// Result type used throughout `rjvm_classfile`.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that can occur while reading or interpreting a class file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file did not start with the `0xCAFEBABE` magic number.
    #[error("Invalid class file magic number")]
    InvalidMagicNumber,
    /// A constant pool index pointed outside the pool, or at an entry of
    /// the wrong kind.
    #[error("Invalid constant pool index: {0}")]
    InvalidConstantPoolIndex(u16),
    /// A field or method descriptor could not be parsed.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
    /// An unrecognized attribute, constant, or access-flag bit pattern.
    #[error("Invalid class file: {0}")]
    InvalidClassFile(String),
    /// An I/O error occurred while reading class-file bytes.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// A UTF-8 / MUTF-8 constant could not be decoded.
    #[error("Invalid UTF-8 constant: {0}")]
    InvalidUtf8(String),
}
