//! `Class`: the runtime representation of a loaded class file.
//!
//! Parsed members get their slot assigned exactly once, at class
//! construction time.

use std::sync::{Arc, Weak};

use rjvm_classfile::ClassFile;

use crate::class_loader::ClassLoader;
use crate::field::Field;
use crate::method::Method;
use crate::Result;

/// A resolved, parsed class: its class file plus materialized `Field`s and
/// `Method`s, each with its slot already assigned.
#[derive(Debug)]
pub struct Class {
    name: String,
    class_file: Arc<ClassFile>,
    fields: Vec<Arc<Field>>,
    methods: Vec<Arc<Method>>,
    loader: Weak<ClassLoader>,
}

impl Class {
    /// Build a `Class` from a parsed class file, assigning each field and
    /// method its slot exactly once, at the moment the owning class is
    /// resolved. Members do not yet know their owner —
    /// `Class::new` can fail (a malformed descriptor), so it runs before
    /// this class's own `Arc` exists; callers must follow it with
    /// `set_owner` once they have that `Arc` (see `ClassLoader::load`).
    pub fn new(loader: Weak<ClassLoader>, class_file: Arc<ClassFile>) -> Result<Self> {
        let name = class_file.class_name()?.to_string();

        let mut fields = Vec::with_capacity(class_file.fields.len());
        for (slot, field_info) in class_file.fields.iter().enumerate() {
            let field = Field::parse(field_info, &class_file.constant_pool)?;
            field.set_slot(i32::try_from(slot).unwrap_or(i32::MAX));
            fields.push(Arc::new(field));
        }

        let mut methods = Vec::with_capacity(class_file.methods.len());
        for (slot, method_info) in class_file.methods.iter().enumerate() {
            let method = Method::parse(method_info, &class_file.constant_pool)?;
            method.set_slot(i32::try_from(slot).unwrap_or(i32::MAX));
            methods.push(Arc::new(method));
        }

        Ok(Self {
            name,
            class_file,
            fields,
            methods,
            loader,
        })
    }

    /// Back-fill every field's and method's owner reference to point at
    /// this class. Must be called exactly once, immediately after wrapping
    /// a freshly built `Class` in its owning `Arc`.
    pub(crate) fn set_owner(self: &Arc<Self>) {
        let owner = Arc::downgrade(self);
        for field in &self.fields {
            field.set_owner(owner.clone());
        }
        for method in &self.methods {
            method.set_owner(owner.clone());
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn class_file(&self) -> &Arc<ClassFile> {
        &self.class_file
    }

    #[must_use]
    pub fn fields(&self) -> &[Arc<Field>] {
        &self.fields
    }

    #[must_use]
    pub fn methods(&self) -> &[Arc<Method>] {
        &self.methods
    }

    #[must_use]
    pub fn loader(&self) -> Weak<ClassLoader> {
        self.loader.clone()
    }

    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&Arc<Field>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[must_use]
    pub fn method_by_name_and_descriptor(&self, name: &str, descriptor: &str) -> Option<&Arc<Method>> {
        self.methods
            .iter()
            .find(|method| method.name() == name && method.raw_descriptor() == descriptor)
    }

    #[must_use]
    pub fn super_class_name(&self) -> Option<String> {
        self.class_file.super_class_name().ok().flatten().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rjvm_classfile::{ClassAccessFlags, ConstantPool};

    fn minimal_class_file(name: &str) -> ClassFile {
        let mut constant_pool = ConstantPool::new();
        let this_index = constant_pool.add_class(name).expect("add_class");
        ClassFile {
            minor_version: 0,
            major_version: 61,
            constant_pool,
            access_flags: ClassAccessFlags::PUBLIC,
            this_class: this_index,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    #[test]
    fn test_new_assigns_name_and_no_members() -> Result<()> {
        let class_file = Arc::new(minimal_class_file("com/example/Widget"));
        let class = Arc::new(Class::new(Weak::new(), class_file)?);
        class.set_owner();
        assert_eq!(class.name(), "com/example/Widget");
        assert!(class.fields().is_empty());
        assert!(class.methods().is_empty());
        assert_eq!(class.super_class_name(), None);
        Ok(())
    }

    #[test]
    fn test_set_owner_assigns_back_reference() -> Result<()> {
        let mut constant_pool = ConstantPool::new();
        let this_index = constant_pool.add_class("com/example/Widget").expect("add_class");
        let name_index = constant_pool.add_utf8("value").expect("add_utf8");
        let descriptor_index = constant_pool.add_utf8("I").expect("add_utf8");
        let class_file = ClassFile {
            minor_version: 0,
            major_version: 61,
            constant_pool,
            access_flags: ClassAccessFlags::PUBLIC,
            this_class: this_index,
            super_class: 0,
            interfaces: Vec::new(),
            fields: vec![rjvm_classfile::FieldInfo {
                access_flags: rjvm_classfile::FieldAccessFlags::PRIVATE,
                name_index,
                descriptor_index,
                attributes: Vec::new(),
            }],
            methods: Vec::new(),
            attributes: Vec::new(),
        };

        let class = Arc::new(Class::new(Weak::new(), Arc::new(class_file))?);
        class.set_owner();
        let field = &class.fields()[0];
        let owner = field.owner().upgrade().expect("owner upgrades");
        assert_eq!(owner.name(), "com/example/Widget");
        Ok(())
    }
}
