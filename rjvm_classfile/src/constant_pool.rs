//! The constant pool (JVMS §4.4).

use crate::byte_reader::ClassReader;
use crate::{Error, Result};

/// One entry of the constant pool.
///
/// Only the tags the core and its attribute parser actually consult are
/// modeled; anything else encountered while parsing a real class file is
/// preserved as `Unsupported` so the surrounding indices still line up
/// (the constant pool is 1-indexed and non-contiguous around `Long`/
/// `Double` entries, per JVMS §4.4.5).
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name_index: u16 },
    String { string_index: u16 },
    FieldRef { class_index: u16, name_and_type_index: u16 },
    MethodRef { class_index: u16, name_and_type_index: u16 },
    InterfaceMethodRef { class_index: u16, name_and_type_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
    /// The unused slot that follows a `Long`/`Double` entry.
    Placeholder,
    /// Any other well-formed but uninterpreted tag (e.g. `MethodHandle`,
    /// `InvokeDynamic`).
    Unsupported { tag: u8 },
}

/// The class file constant pool.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantPool {
    constants: Vec<Constant>,
}

impl ConstantPool {
    /// An empty constant pool, with the reserved zero-index placeholder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constants: vec![Constant::Placeholder],
        }
    }

    /// Read a constant pool of `count - 1` entries (the count field itself
    /// includes the reserved zero entry, per JVMS §4.1).
    pub fn from_bytes(reader: &mut ClassReader<'_>) -> Result<Self> {
        let count = reader.get_u16()?;
        let mut constants = Vec::with_capacity(count as usize);
        constants.push(Constant::Placeholder);

        let mut index = 1;
        while index < count {
            let tag = reader.get_u8()?;
            let constant = match tag {
                1 => {
                    let length = reader.get_u16()? as usize;
                    let bytes = reader.get_bytes(length)?;
                    let value = String::from_utf8(bytes)
                        .map_err(|error| Error::InvalidUtf8(error.to_string()))?;
                    Constant::Utf8(value)
                }
                3 => Constant::Integer(reader.get_i32()?),
                4 => Constant::Float(reader.get_f32()?),
                5 => Constant::Long(reader.get_i64()?),
                6 => Constant::Double(reader.get_f64()?),
                7 => Constant::Class {
                    name_index: reader.get_u16()?,
                },
                8 => Constant::String {
                    string_index: reader.get_u16()?,
                },
                9 => Constant::FieldRef {
                    class_index: reader.get_u16()?,
                    name_and_type_index: reader.get_u16()?,
                },
                10 => Constant::MethodRef {
                    class_index: reader.get_u16()?,
                    name_and_type_index: reader.get_u16()?,
                },
                11 => Constant::InterfaceMethodRef {
                    class_index: reader.get_u16()?,
                    name_and_type_index: reader.get_u16()?,
                },
                12 => Constant::NameAndType {
                    name_index: reader.get_u16()?,
                    descriptor_index: reader.get_u16()?,
                },
                // MethodHandle (15), MethodType (16), Dynamic (17),
                // InvokeDynamic (18), Module (19), Package (20): skip their
                // fixed-size payloads without interpreting them.
                15 => {
                    reader.get_u8()?;
                    reader.get_u16()?;
                    Constant::Unsupported { tag }
                }
                16 | 19 | 20 => {
                    reader.get_u16()?;
                    Constant::Unsupported { tag }
                }
                17 | 18 => {
                    reader.get_u16()?;
                    reader.get_u16()?;
                    Constant::Unsupported { tag }
                }
                _ => return Err(Error::InvalidClassFile(format!("unknown constant tag {tag}"))),
            };

            let is_wide = matches!(constant, Constant::Long(_) | Constant::Double(_));
            constants.push(constant);
            index += 1;
            if is_wide {
                // Long and Double entries occupy two constant pool slots.
                constants.push(Constant::Placeholder);
                index += 1;
            }
        }

        Ok(Self { constants })
    }

    /// Number of entries, including the reserved zero slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.len() <= 1
    }

    /// Fetch a raw constant by index.
    pub fn get(&self, index: u16) -> Result<&Constant> {
        self.constants
            .get(index as usize)
            .ok_or(Error::InvalidConstantPoolIndex(index))
    }

    /// Resolve a UTF-8 constant.
    pub fn try_get_utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            Constant::Utf8(value) => Ok(value),
            _ => Err(Error::InvalidConstantPoolIndex(index)),
        }
    }

    pub fn try_get_integer(&self, index: u16) -> Result<i32> {
        match self.get(index)? {
            Constant::Integer(value) => Ok(*value),
            _ => Err(Error::InvalidConstantPoolIndex(index)),
        }
    }

    pub fn try_get_float(&self, index: u16) -> Result<f32> {
        match self.get(index)? {
            Constant::Float(value) => Ok(*value),
            _ => Err(Error::InvalidConstantPoolIndex(index)),
        }
    }

    pub fn try_get_long(&self, index: u16) -> Result<i64> {
        match self.get(index)? {
            Constant::Long(value) => Ok(*value),
            _ => Err(Error::InvalidConstantPoolIndex(index)),
        }
    }

    pub fn try_get_double(&self, index: u16) -> Result<f64> {
        match self.get(index)? {
            Constant::Double(value) => Ok(*value),
            _ => Err(Error::InvalidConstantPoolIndex(index)),
        }
    }

    /// Resolve a `Class` constant to its internal (slash-separated) name.
    pub fn try_get_class_name(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            Constant::Class { name_index } => self.try_get_utf8(*name_index),
            _ => Err(Error::InvalidConstantPoolIndex(index)),
        }
    }

    /// Append a UTF-8 constant, returning its index. Used by tests and by
    /// callers that synthesize class files (e.g. array-class creation).
    pub fn add_utf8<S: AsRef<str>>(&mut self, value: S) -> Result<u16> {
        self.constants.push(Constant::Utf8(value.as_ref().to_string()));
        let index = u16::try_from(self.constants.len() - 1)
            .map_err(|_| Error::InvalidClassFile("constant pool overflow".to_string()))?;
        Ok(index)
    }

    /// Append a `Class` constant naming `class_name`, adding the backing
    /// UTF-8 entry as well.
    pub fn add_class<S: AsRef<str>>(&mut self, class_name: S) -> Result<u16> {
        let name_index = self.add_utf8(class_name)?;
        self.constants.push(Constant::Class { name_index });
        let index = u16::try_from(self.constants.len() - 1)
            .map_err(|_| Error::InvalidClassFile("constant pool overflow".to_string()))?;
        Ok(index)
    }
}
