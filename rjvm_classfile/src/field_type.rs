//! Field descriptor AST (JVMS §4.3.2): the decoded shape a field or method
//! descriptor parses into.

use crate::BaseType;
use std::fmt::{self, Display};

/// A decoded field descriptor: a primitive, an object reference, or an
/// array of either.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FieldType {
    Base(BaseType),
    /// The internal (slash-separated) binary name, without the leading `L`
    /// or trailing `;`.
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Number of operand-stack / local-variable slots this type occupies:
    /// `2` for `long`/`double`, `1` otherwise.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        match self {
            FieldType::Base(base_type) if base_type.is_wide() => 2,
            _ => 1,
        }
    }

    /// The internal class name this array's element is wrapped in, if any.
    #[must_use]
    pub fn array_depth(&self) -> usize {
        match self {
            FieldType::Array(inner) => 1 + inner.array_depth(),
            _ => 0,
        }
    }

    /// The canonical descriptor string, e.g. `"[Ljava/lang/String;"` or
    /// `"I"`. The inverse of `rjvm_classloader::descriptor::parse_field_type`;
    /// unlike `Display`, which renders a human-readable Java type name.
    #[must_use]
    pub fn to_descriptor(&self) -> String {
        match self {
            FieldType::Base(base_type) => base_type.code().to_string(),
            FieldType::Object(name) => format!("L{name};"),
            FieldType::Array(inner) => format!("[{}", inner.to_descriptor()),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Base(base_type) => write!(f, "{base_type}"),
            FieldType::Object(name) => write!(f, "{name}"),
            FieldType::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}
