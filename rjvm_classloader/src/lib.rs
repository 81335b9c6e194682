//! Class loading: classpath search, class member parsing, and the
//! class/class-loader lifecycle.
//!
//! Built on `rjvm_classfile`'s binary parsing, this crate concretizes the
//! runtime core's "class loader", "classpath", and "class member" external
//! collaborators. It knows nothing about dispatch, the trap table, native
//! methods, or reflection mirrors — those live in `rjvm_vm`, which depends
//! on this crate rather than the reverse.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]

mod class;
mod class_loader;
mod class_member;
mod class_path;
mod descriptor;
mod error;
mod field;
mod method;

pub use class::Class;
pub use class_loader::ClassLoader;
pub use class_member::ClassMember;
pub use class_path::ClassPath;
pub use descriptor::{encode_method_descriptor, parse_field_descriptor, parse_field_type, parse_method_descriptor};
pub use error::{Error, Result};
pub use field::Field;
pub use method::Method;
