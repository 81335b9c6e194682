//! `Method`: a parsed `method_info` with its derived descriptor fields.

use std::sync::Weak;

use rjvm_classfile::{Attribute, ConstantPool, FieldType, MethodAccessFlags, MethodInfo};

use crate::class::Class;
use crate::class_member::ClassMember;
use crate::descriptor::parse_method_descriptor;
use crate::Result;

/// One method declaration, with its descriptor decoded into typed
/// parameter and return types.
///
/// `Method` carries no resolved call body. Deciding *how* a method is
/// invoked — bytecode, native, trapped, abstract — is the dispatch
/// resolver's job, which lives in `rjvm_vm` because it needs the trap
/// table and native registry; the class-loading layer only ever needs to
/// know *what* a method looks like.
#[derive(Debug)]
pub struct Method {
    member: ClassMember,
    param_types: Vec<FieldType>,
    return_type: Option<FieldType>,
}

impl Method {
    /// Parse a `Method` from its raw `method_info` plus the constant pool
    /// it was read from, decoding its descriptor into parameter/return
    /// types along the way. The owner back reference is assigned
    /// afterwards, by `Class::new`/`Class::set_owner`, once the owning
    /// class's `Arc` exists.
    pub fn parse(info: &MethodInfo, constant_pool: &ConstantPool) -> Result<Self> {
        let name = info.name(constant_pool)?.to_string();
        let raw_descriptor = info.descriptor(constant_pool)?.to_string();
        let (param_types, return_type) = parse_method_descriptor(&raw_descriptor)?;
        let member = ClassMember::new(
            info.access_flags.to_raw(),
            name,
            raw_descriptor,
            info.attributes.clone(),
        );
        Ok(Self {
            member,
            param_types,
            return_type,
        })
    }

    pub(crate) fn set_owner(&self, owner: Weak<Class>) {
        self.member.set_owner(owner);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.member.name()
    }

    #[must_use]
    pub fn raw_descriptor(&self) -> &str {
        self.member.raw_descriptor()
    }

    #[must_use]
    pub fn param_types(&self) -> &[FieldType] {
        &self.param_types
    }

    #[must_use]
    pub fn return_type(&self) -> Option<&FieldType> {
        self.return_type.as_ref()
    }

    #[must_use]
    pub fn access_flags(&self) -> MethodAccessFlags {
        MethodAccessFlags::from_raw(self.member.access_flags_bits)
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.access_flags().contains(MethodAccessFlags::STATIC)
    }

    /// Sum over the parameter types of `2` for wide types else `1`, plus
    /// `1` if non-static (the implicit receiver occupies its own slot).
    #[must_use]
    pub fn param_bytes(&self) -> usize {
        let params: usize = self.param_types.iter().map(FieldType::slot_count).sum();
        params + usize::from(!self.is_static())
    }

    /// Parameter count plus `1` if non-static (the implicit receiver).
    #[must_use]
    pub fn num_args(&self) -> usize {
        self.param_types.len() + usize::from(!self.is_static())
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

    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.member.get_attribute(name)
    }

    #[must_use]
    pub fn get_attributes(&self, name: &str) -> Vec<&Attribute> {
        self.member.get_attributes(name)
    }

    /// The `Code` attribute, if any (absent for `native`/`abstract`
    /// methods).
    #[must_use]
    pub fn code_attribute(&self) -> Option<&Attribute> {
        self.get_attribute("Code")
    }

    /// `"{name}:{descriptor}"`, the trap-table / native-registry key
    /// component.
    #[must_use]
    pub fn name_and_descriptor(&self) -> String {
        format!("{}:{}", self.member.name(), self.member.raw_descriptor())
    }

    /// `"{owner}::{name}{descriptor}"`, used in `UnsatisfiedLinkError`
    /// messages.
    #[must_use]
    pub fn full_signature(&self) -> String {
        let owner_name = self
            .owner()
            .upgrade()
            .map(|class| class.name().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        format!("{owner_name}::{}{}", self.member.name(), self.member.raw_descriptor())
    }

    /// Signature polymorphism: owner is `Ljava/lang/invoke/MethodHandle;`,
    /// `NATIVE` and `VARARGS` both set, descriptor is exactly
    /// `([Ljava/lang/Object;)Ljava/lang/Object;`. Such methods accept any
    /// argument list at the bytecode level and skip normal marshalling.
    #[must_use]
    pub fn is_signature_polymorphic(&self) -> bool {
        let owner_is_method_handle = self
            .owner()
            .upgrade()
            .is_some_and(|class| class.name() == "java/lang/invoke/MethodHandle");
        let flags = self.access_flags();
        owner_is_method_handle
            && flags.contains(MethodAccessFlags::NATIVE)
            && flags.contains(MethodAccessFlags::VARARGS)
            && self.raw_descriptor() == "([Ljava/lang/Object;)Ljava/lang/Object;"
    }
}
