//! `Field`: a parsed `field_info` plus its owning class.

use std::sync::Weak;

use rjvm_classfile::{ConstantPool, FieldAccessFlags, FieldInfo, FieldType};

use crate::class::Class;
use crate::class_member::ClassMember;
use crate::Result;

/// One field declaration, resolved against its constant pool.
#[derive(Debug)]
pub struct Field {
    member: ClassMember,
    field_type: FieldType,
}

impl Field {
    /// Parse a `Field` from its raw `field_info` plus the constant pool it
    /// was read from (the field descriptor parser is trivial here since the
    /// raw descriptor string *is* the type). The owner back reference is
    /// assigned afterwards, by `Class::new`/`Class::set_owner`, once the
    /// owning class's `Arc` exists.
    pub fn parse(info: &FieldInfo, constant_pool: &ConstantPool) -> Result<Self> {
        let name = info.name(constant_pool)?.to_string();
        let raw_descriptor = info.descriptor(constant_pool)?.to_string();
        let field_type = crate::descriptor::parse_field_descriptor(&raw_descriptor)?;
        let member = ClassMember::new(
            info.access_flags.to_raw(),
            name,
            raw_descriptor,
            info.attributes.clone(),
        );
        Ok(Self { member, field_type })
    }

    pub(crate) fn set_owner(&self, owner: Weak<Class>) {
        self.member.set_owner(owner);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.member.name()
    }

    #[must_use]
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    #[must_use]
    pub fn access_flags(&self) -> FieldAccessFlags {
        FieldAccessFlags::from_raw(self.member.access_flags_bits)
    }

    #[must_use]
    pub fn slot(&self) -> i32 {
        self.member.slot()
    }

    pub fn set_slot(&self, slot: i32) {
        self.member.set_slot(slot);
    }

    #[must_use]
    pub fn owner(&self) -> Weak<Class> {
        self.member.owner()
    }

    #[must_use]
    pub fn member(&self) -> &ClassMember {
        &self.member
    }

    /// `"{name}:{descriptor}"`, used as a trap-table / native-registry key
    /// component and in `UnsatisfiedLinkError`-style diagnostics.
    #[must_use]
    pub fn full_signature(&self) -> String {
        format!("{}:{}", self.member.name(), self.member.raw_descriptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_field_info(pool: &mut ConstantPool) -> FieldInfo {
        let name_index = pool.add_utf8("value").expect("add_utf8");
        let descriptor_index = pool.add_utf8("I").expect("add_utf8");
        FieldInfo {
            access_flags: FieldAccessFlags::PRIVATE,
            name_index,
            descriptor_index,
            attributes: Vec::new(),
        }
    }

    #[test]
    fn test_parse_field() -> Result<()> {
        let mut pool = ConstantPool::new();
        let info = build_field_info(&mut pool);
        let field = Field::parse(&info, &pool)?;
        assert_eq!(field.name(), "value");
        assert_eq!(field.slot(), -1);
        assert_eq!(field.full_signature(), "value:I");
        assert!(field.access_flags().contains(FieldAccessFlags::PRIVATE));
        Ok(())
    }
}
