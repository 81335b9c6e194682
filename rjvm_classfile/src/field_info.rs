//! Raw `field_info` structures (JVMS §4.5), before `rjvm_classloader` wraps
//! them into a richer `Field` with a decoded type and a resolved owner.

use crate::access_flags::FieldAccessFlags;
use crate::attributes::Attribute;
use crate::byte_reader::ClassReader;
use crate::constant_pool::ConstantPool;
use crate::Result;

/// One field declaration as it appears in the class file.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInfo {
    pub access_flags: FieldAccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Vec<Attribute>,
}

impl FieldInfo {
    pub fn from_bytes(reader: &mut ClassReader<'_>, constant_pool: &ConstantPool) -> Result<Self> {
        let access_flags = FieldAccessFlags::from_raw(reader.get_u16()?);
        let name_index = reader.get_u16()?;
        let descriptor_index = reader.get_u16()?;
        let attributes_count = reader.get_u16()?;
        let mut attributes = Vec::with_capacity(attributes_count as usize);
        for _ in 0..attributes_count {
            attributes.push(Attribute::from_bytes(reader, constant_pool)?);
        }
        Ok(Self {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    pub fn name<'a>(&self, constant_pool: &'a ConstantPool) -> Result<&'a str> {
        constant_pool.try_get_utf8(self.name_index)
    }

    pub fn descriptor<'a>(&self, constant_pool: &'a ConstantPool) -> Result<&'a str> {
        constant_pool.try_get_utf8(self.descriptor_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_info_from_bytes() -> Result<()> {
        let mut constant_pool = ConstantPool::new();
        let name_index = constant_pool.add_utf8("count")?;
        let descriptor_index = constant_pool.add_utf8("I")?;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&FieldAccessFlags::PRIVATE.to_raw().to_be_bytes());
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());

        let mut reader = ClassReader::new(&bytes);
        let field_info = FieldInfo::from_bytes(&mut reader, &constant_pool)?;
        assert_eq!(field_info.name(&constant_pool)?, "count");
        assert_eq!(field_info.descriptor(&constant_pool)?, "I");
        assert!(field_info.access_flags.contains(FieldAccessFlags::PRIVATE));
        Ok(())
    }
}
