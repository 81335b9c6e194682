//! The top-level `ClassFile` structure (JVMS §4.1).

use crate::access_flags::ClassAccessFlags;
use crate::attributes::Attribute;
use crate::byte_reader::ClassReader;
use crate::constant_pool::ConstantPool;
use crate::field_info::FieldInfo;
use crate::method_info::MethodInfo;
use crate::{Error, Result};

const MAGIC: u32 = 0xCAFE_BABE;

/// A parsed `.class` file.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: ClassAccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Vec<Attribute>,
}

impl ClassFile {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = ClassReader::new(bytes);

        let magic = reader.get_u32()?;
        if magic != MAGIC {
            return Err(Error::InvalidMagicNumber);
        }

        let minor_version = reader.get_u16()?;
        let major_version = reader.get_u16()?;
        let constant_pool = ConstantPool::from_bytes(&mut reader)?;
        let access_flags = ClassAccessFlags::from_raw(reader.get_u16()?);
        let this_class = reader.get_u16()?;
        let super_class = reader.get_u16()?;

        let interfaces_count = reader.get_u16()?;
        let mut interfaces = Vec::with_capacity(interfaces_count as usize);
        for _ in 0..interfaces_count {
            interfaces.push(reader.get_u16()?);
        }

        let fields_count = reader.get_u16()?;
        let mut fields = Vec::with_capacity(fields_count as usize);
        for _ in 0..fields_count {
            fields.push(FieldInfo::from_bytes(&mut reader, &constant_pool)?);
        }

        let methods_count = reader.get_u16()?;
        let mut methods = Vec::with_capacity(methods_count as usize);
        for _ in 0..methods_count {
            methods.push(MethodInfo::from_bytes(&mut reader, &constant_pool)?);
        }

        let attributes_count = reader.get_u16()?;
        let mut attributes = Vec::with_capacity(attributes_count as usize);
        for _ in 0..attributes_count {
            attributes.push(Attribute::from_bytes(&mut reader, &constant_pool)?);
        }

        Ok(Self {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }

    /// The internal (slash-separated) name of this class.
    pub fn class_name(&self) -> Result<&str> {
        self.constant_pool.try_get_class_name(self.this_class)
    }

    /// The internal name of the superclass, or `None` for `java/lang/Object`.
    pub fn super_class_name(&self) -> Result<Option<&str>> {
        if self.super_class == 0 {
            Ok(None)
        } else {
            Ok(Some(self.constant_pool.try_get_class_name(self.super_class)?))
        }
    }

    /// The internal names of the interfaces this class implements.
    pub fn interface_names(&self) -> Result<Vec<&str>> {
        self.interfaces
            .iter()
            .map(|index| self.constant_pool.try_get_class_name(*index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_flags::{FieldAccessFlags, MethodAccessFlags};

    fn minimal_class_file_bytes() -> Vec<u8> {
        let mut constant_pool = ConstantPool::new();
        let this_index = constant_pool.add_class("com/example/Widget").expect("add_class");
        let super_index = constant_pool.add_class("java/lang/Object").expect("add_class");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes()); // minor
        bytes.extend_from_slice(&61u16.to_be_bytes()); // major (Java 17)

        // constant pool: re-serialize what we built above as Utf8/Class pairs.
        let entries = vec![
            (1u8, "com/example/Widget"),
            (1u8, "java/lang/Object"),
        ];
        bytes.extend_from_slice(&5u16.to_be_bytes()); // count = 4 real entries + 1
        for (tag, value) in &entries {
            bytes.push(*tag);
            bytes.extend_from_slice(&(value.len() as u16).to_be_bytes());
            bytes.extend_from_slice(value.as_bytes());
        }
        bytes.push(7); // Class tag for #3
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.push(7); // Class tag for #4
        bytes.extend_from_slice(&2u16.to_be_bytes());

        bytes.extend_from_slice(&ClassAccessFlags::PUBLIC.to_raw().to_be_bytes());
        bytes.extend_from_slice(&3u16.to_be_bytes()); // this_class -> Class #3
        bytes.extend_from_slice(&4u16.to_be_bytes()); // super_class -> Class #4
        bytes.extend_from_slice(&0u16.to_be_bytes()); // interfaces_count
        bytes.extend_from_slice(&0u16.to_be_bytes()); // fields_count
        bytes.extend_from_slice(&0u16.to_be_bytes()); // methods_count
        bytes.extend_from_slice(&0u16.to_be_bytes()); // attributes_count

        let _ = (this_index, super_index);
        bytes
    }

    #[test]
    fn test_from_bytes_rejects_bad_magic() {
        let bytes = vec![0, 0, 0, 0];
        assert!(matches!(
            ClassFile::from_bytes(&bytes),
            Err(Error::InvalidMagicNumber)
        ));
    }

    #[test]
    fn test_from_bytes_minimal_class() -> Result<()> {
        let bytes = minimal_class_file_bytes();
        let class_file = ClassFile::from_bytes(&bytes)?;
        assert_eq!(class_file.class_name()?, "com/example/Widget");
        assert_eq!(class_file.super_class_name()?, Some("java/lang/Object"));
        assert!(class_file.fields.is_empty());
        assert!(class_file.methods.is_empty());
        Ok(())
    }

    #[test]
    fn test_field_and_method_access_flags_unused_in_minimal_file() {
        // exercised in field_info.rs / method_info.rs directly; this test
        // only confirms the flag types are reachable from this module.
        let _ = FieldAccessFlags::PUBLIC;
        let _ = MethodAccessFlags::PUBLIC;
    }
}
