//! `ClassMirror`: the runtime `java.lang.Class` instance.
//!
//! A concrete `Vm` implementation decides how a descriptor maps to a
//! mirror (array descriptors included) via `Vm::class_mirror`/
//! `Vm::resolve_class` — there is no separate constructor exposed at this
//! layer. What's left, `static_get`/`static_set`, is this type's reason to
//! exist: static field storage, keyed by name, which `rjvm_classloader::Class`
//! intentionally does not hold (it is parsed metadata, not runtime state).

use std::sync::Arc;

use dashmap::DashMap;
use rjvm_classloader::Class;

use crate::value::Value;

/// One class's runtime mirror: its parsed metadata plus its static field
/// values.
#[derive(Debug)]
pub struct ClassMirror {
    class: Arc<Class>,
    statics: DashMap<String, Value>,
}

impl ClassMirror {
    #[must_use]
    pub fn new(class: Arc<Class>) -> Arc<Self> {
        Arc::new(Self {
            class,
            statics: DashMap::new(),
        })
    }

    #[must_use]
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    #[must_use]
    pub fn static_get(&self, field_name: &str) -> Option<Value> {
        self.statics.get(field_name).map(|entry| entry.value().clone())
    }

    pub fn static_set(&self, field_name: &str, value: Value) {
        self.statics.insert(field_name.to_string(), value);
    }

    /// Stable identity, used as the monitor key for a `synchronized
    /// static` invocation: static methods lock the class mirror's
    /// monitor.
    #[must_use]
    pub fn identity(self: &Arc<Self>) -> usize {
        Arc::as_ptr(self) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rjvm_classfile::{ClassAccessFlags, ClassFile, ConstantPool};
    use rjvm_classloader::ClassLoader;
    use std::sync::Weak;

    fn dummy_class(name: &str) -> Arc<Class> {
        let mut constant_pool = ConstantPool::new();
        let this_index = constant_pool.add_class(name).expect("add_class");
        let class_file = ClassFile {
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
        };
        Arc::new(Class::new(Weak::<ClassLoader>::new(), Arc::new(class_file)).expect("Class::new"))
    }

    #[test]
    fn test_static_get_set_roundtrip() {
        let mirror = ClassMirror::new(dummy_class("java/nio/ByteOrder"));
        assert!(mirror.static_get("LITTLE_ENDIAN").is_none());
        mirror.static_set("LITTLE_ENDIAN", Value::Int(1));
        assert_eq!(mirror.static_get("LITTLE_ENDIAN").expect("field set").as_i32(), Some(1));
    }

    #[test]
    fn test_identity_stable_across_calls() {
        let mirror = ClassMirror::new(dummy_class("java/lang/Object"));
        assert_eq!(mirror.identity(), mirror.identity());
    }
}
