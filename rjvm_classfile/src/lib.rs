//! Binary class-file primitives: constant pool, access flags, descriptors,
//! and attributes.
//!
//! This crate concretizes the "class file reader", "constant pool", and
//! "attribute parser" external collaborators named in the runtime core's
//! specification. It knows nothing about class loading, dispatch, or
//! reflection — those live in `rjvm_classloader` and `rjvm_vm`.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]

mod access_flags;
mod attributes;
mod base_type;
mod byte_reader;
mod class_file;
mod constant_pool;
mod error;
mod field_info;
mod field_type;
mod method_info;

pub use access_flags::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
pub use attributes::{Attribute, ExceptionTableEntry, LineNumber};
pub use base_type::BaseType;
pub use byte_reader::ClassReader;
pub use class_file::ClassFile;
pub use constant_pool::{Constant, ConstantPool};
pub use error::{Error, Result};
pub use field_info::FieldInfo;
pub use field_type::FieldType;
pub use method_info::MethodInfo;
