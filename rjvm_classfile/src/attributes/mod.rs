//! The attribute parser (JVMS §4.7).
//!
//! Only the attribute kinds reflection and dispatch actually inspect
//! (`Signature`, `RuntimeVisibleAnnotations`, `AnnotationDefault`,
//! `Exceptions`, `Code` with its exception handlers,
//! `RuntimeVisibleParameterAnnotations`) are modeled beyond their raw bytes.
//! Everything else round-trips as an
//! `Unknown` variant carrying its name and payload, which keeps attribute
//! counts/ordering correct without requiring this crate to understand the
//! full JVMS §4.7 attribute catalogue.

mod exception_table_entry;
mod line_number;

pub use exception_table_entry::ExceptionTableEntry;
pub use line_number::LineNumber;

use crate::byte_reader::ClassReader;
use crate::constant_pool::ConstantPool;
use crate::Result;

/// One attribute attached to a class, field, method, or `Code` body.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    Code {
        max_stack: u16,
        max_locals: u16,
        /// Raw bytecode. Decoding it is the interpreter's job; this crate
        /// never inspects it.
        code: Vec<u8>,
        exception_table: Vec<ExceptionTableEntry>,
        attributes: Vec<Attribute>,
    },
    ConstantValue {
        constant_value_index: u16,
    },
    Exceptions {
        /// Resolved internal names of the declared checked exceptions.
        exceptions: Vec<String>,
    },
    Signature {
        sig: String,
    },
    LineNumberTable {
        line_numbers: Vec<LineNumber>,
    },
    RuntimeVisibleAnnotations {
        raw_bytes: Vec<u8>,
        /// True when the annotation payload is empty — a cheap
        /// "nothing to decode" signal for reflection.
        is_hidden: bool,
    },
    RuntimeVisibleParameterAnnotations {
        raw_bytes: Vec<u8>,
    },
    AnnotationDefault {
        raw_bytes: Vec<u8>,
    },
    /// Any attribute this core does not need to interpret.
    Unknown {
        name: String,
        raw_bytes: Vec<u8>,
    },
}

impl Attribute {
    /// The attribute's name, as it would appear in the constant pool.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Attribute::Code { .. } => "Code",
            Attribute::ConstantValue { .. } => "ConstantValue",
            Attribute::Exceptions { .. } => "Exceptions",
            Attribute::Signature { .. } => "Signature",
            Attribute::LineNumberTable { .. } => "LineNumberTable",
            Attribute::RuntimeVisibleAnnotations { .. } => "RuntimeVisibleAnnotations",
            Attribute::RuntimeVisibleParameterAnnotations { .. } => {
                "RuntimeVisibleParameterAnnotations"
            }
            Attribute::AnnotationDefault { .. } => "AnnotationDefault",
            Attribute::Unknown { name, .. } => name,
        }
    }

    /// Parse one attribute: `name_index: u16`, `length: u32`, then
    /// `length` bytes of attribute-specific payload.
    pub fn from_bytes(reader: &mut ClassReader<'_>, constant_pool: &ConstantPool) -> Result<Self> {
        let name_index = reader.get_u16()?;
        let name = constant_pool.try_get_utf8(name_index)?.to_string();
        let length = reader.get_u32()? as usize;
        let payload = reader.get_bytes(length)?;
        let mut payload_reader = ClassReader::new(&payload);

        let attribute = match name.as_str() {
            "Code" => {
                let max_stack = payload_reader.get_u16()?;
                let max_locals = payload_reader.get_u16()?;
                let code_length = payload_reader.get_u32()? as usize;
                let code = payload_reader.get_bytes(code_length)?;
                let exception_table_length = payload_reader.get_u16()?;
                let mut exception_table = Vec::with_capacity(exception_table_length as usize);
                for _ in 0..exception_table_length {
                    exception_table.push(ExceptionTableEntry::from_bytes(&mut payload_reader)?);
                }
                let attributes_count = payload_reader.get_u16()?;
                let mut attributes = Vec::with_capacity(attributes_count as usize);
                for _ in 0..attributes_count {
                    attributes.push(Attribute::from_bytes(&mut payload_reader, constant_pool)?);
                }
                Attribute::Code {
                    max_stack,
                    max_locals,
                    code,
                    exception_table,
                    attributes,
                }
            }
            "ConstantValue" => Attribute::ConstantValue {
                constant_value_index: payload_reader.get_u16()?,
            },
            "Exceptions" => {
                let count = payload_reader.get_u16()?;
                let mut exceptions = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let class_index = payload_reader.get_u16()?;
                    exceptions.push(constant_pool.try_get_class_name(class_index)?.to_string());
                }
                Attribute::Exceptions { exceptions }
            }
            "Signature" => {
                let signature_index = payload_reader.get_u16()?;
                Attribute::Signature {
                    sig: constant_pool.try_get_utf8(signature_index)?.to_string(),
                }
            }
            "LineNumberTable" => {
                let count = payload_reader.get_u16()?;
                let mut line_numbers = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    line_numbers.push(LineNumber::from_bytes(&mut payload_reader)?);
                }
                Attribute::LineNumberTable { line_numbers }
            }
            "RuntimeVisibleAnnotations" => Attribute::RuntimeVisibleAnnotations {
                is_hidden: payload.is_empty(),
                raw_bytes: payload,
            },
            "RuntimeVisibleParameterAnnotations" => {
                Attribute::RuntimeVisibleParameterAnnotations { raw_bytes: payload }
            }
            "AnnotationDefault" => Attribute::AnnotationDefault { raw_bytes: payload },
            _ => Attribute::Unknown {
                name,
                raw_bytes: payload,
            },
        };
        Ok(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_pool_with_utf8(value: &str) -> (ConstantPool, u16) {
        let mut constant_pool = ConstantPool::new();
        let index = constant_pool.add_utf8(value).expect("add_utf8");
        (constant_pool, index)
    }

    #[test]
    fn test_signature_attribute() -> Result<()> {
        let (mut constant_pool, name_index) = build_pool_with_utf8("Signature");
        let sig_index = constant_pool.add_utf8("Ljava/util/List<Ljava/lang/String;>;")?;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&2u32.to_be_bytes());
        bytes.extend_from_slice(&sig_index.to_be_bytes());

        let mut reader = ClassReader::new(&bytes);
        let attribute = Attribute::from_bytes(&mut reader, &constant_pool)?;
        assert_eq!(attribute.name(), "Signature");
        assert!(matches!(attribute, Attribute::Signature { sig } if sig == "Ljava/util/List<Ljava/lang/String;>;"));
        Ok(())
    }

    #[test]
    fn test_code_attribute_with_exception_handler() -> Result<()> {
        let (mut constant_pool, name_index) = build_pool_with_utf8("Code");
        let throwable_index = constant_pool.add_class("java/lang/Throwable")?;

        let mut payload = Vec::new();
        payload.extend_from_slice(&1u16.to_be_bytes()); // max_stack
        payload.extend_from_slice(&1u16.to_be_bytes()); // max_locals
        payload.extend_from_slice(&1u32.to_be_bytes()); // code_length
        payload.push(0xb1); // return opcode byte
        payload.extend_from_slice(&1u16.to_be_bytes()); // exception_table_length
        payload.extend_from_slice(&0u16.to_be_bytes()); // start_pc
        payload.extend_from_slice(&1u16.to_be_bytes()); // end_pc
        payload.extend_from_slice(&1u16.to_be_bytes()); // handler_pc
        payload.extend_from_slice(&throwable_index.to_be_bytes()); // catch_type
        payload.extend_from_slice(&0u16.to_be_bytes()); // attributes_count

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&payload);

        let mut reader = ClassReader::new(&bytes);
        let attribute = Attribute::from_bytes(&mut reader, &constant_pool)?;
        match attribute {
            Attribute::Code {
                max_stack,
                max_locals,
                code,
                exception_table,
                ..
            } => {
                assert_eq!(max_stack, 1);
                assert_eq!(max_locals, 1);
                assert_eq!(code, vec![0xb1]);
                assert_eq!(exception_table.len(), 1);
                assert!(!exception_table[0].is_catch_all());
                assert_eq!(
                    constant_pool.try_get_class_name(exception_table[0].catch_type)?,
                    "java/lang/Throwable"
                );
            }
            other => panic!("expected Code attribute, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_unknown_attribute_roundtrips_bytes() -> Result<()> {
        let (constant_pool, name_index) = build_pool_with_utf8("StackMapTable");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&3u32.to_be_bytes());
        bytes.extend_from_slice(&[1, 2, 3]);

        let mut reader = ClassReader::new(&bytes);
        let attribute = Attribute::from_bytes(&mut reader, &constant_pool)?;
        assert_eq!(attribute.name(), "StackMapTable");
        assert!(matches!(attribute, Attribute::Unknown { raw_bytes, .. } if raw_bytes == vec![1, 2, 3]));
        Ok(())
    }
}
