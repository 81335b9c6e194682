//! A minimal in-memory `Value`/`Object` model.
//!
//! The heap and bytecode interpreter are out of scope here; this is the
//! smallest concrete stand-in that lets dispatch, reflection, and argument
//! marshalling be implemented and tested without either. Plain `Arc` object
//! identity covers everything the trapped methods and monitor keying in
//! this runtime need, with no garbage collector required.

use std::sync::Arc;

use dashmap::DashMap;
use rjvm_classloader::Class;

/// One interpreter-stack / native-call value.
///
/// Wide types (`J`, `D`) carry their value in one slot and are followed on
/// a real operand stack by a second, meaningless slot — JVMS §4.7.4 calls
/// this verification-type-info tag `Top`, "an unusable value, such as the
/// second half of a long or double". `crate::marshal::take_args` models
/// that second slot with `Value::Top` so it can pop a caller stack at true
/// JVM slot granularity; nothing above the marshaller ever constructs or
/// inspects a `Top` directly.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// `null` is `Object(None)`.
    Object(Option<Arc<Object>>),
    /// An interned/native string, as produced by `Vm::intern_string` and
    /// consumed at the native-call boundary (e.g. `System.loadLibrary`'s
    /// library-name argument). A full `java/lang/String` heap
    /// representation is out of scope for this runtime; this is the
    /// minimal stand-in the trap table needs.
    Utf8(Arc<str>),
    /// A raw byte buffer, e.g. the backing store the `Bits.copyToByteArray`
    /// trap writes into. A full `byte[]` heap representation is out of
    /// scope; this is the minimal stand-in.
    Bytes(Arc<[u8]>),
    /// The second stack slot of a wide (`J`/`D`) value. See the type-level
    /// doc comment.
    Top,
}

impl Value {
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Arc<Object>> {
        match self {
            Value::Object(Some(object)) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            Value::Utf8(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// A heap object: its class plus a field table keyed by field name.
///
/// Field storage is a flat `name -> Value` map rather than the
/// slot-indexed layout a real heap would use; the trapped methods and
/// tests in this runtime only ever address fields by name (trap table
/// entries name fields like `value`, `array`), so the extra layer of slot
/// indirection is not worth modeling here.
#[derive(Debug)]
pub struct Object {
    class: Arc<Class>,
    fields: DashMap<String, Value>,
}

impl Object {
    #[must_use]
    pub fn new(class: Arc<Class>) -> Self {
        Self {
            class,
            fields: DashMap::new(),
        }
    }

    #[must_use]
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).map(|entry| entry.value().clone())
    }

    pub fn set_field(&self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// Stable identity for monitor ownership keying: the monitor of the
    /// receiver.
    #[must_use]
    pub fn identity(self: &Arc<Self>) -> usize {
        Arc::as_ptr(self) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rjvm_classfile::{ClassAccessFlags, ConstantPool};
    use rjvm_classloader::ClassLoader;
    use std::sync::Weak;

    fn dummy_class() -> Arc<Class> {
        let mut constant_pool = ConstantPool::new();
        let this_index = constant_pool.add_class("java/util/concurrent/atomic/AtomicInteger").expect("add_class");
        let class_file = rjvm_classfile::ClassFile {
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
    fn test_get_set_field_roundtrip() {
        let class = dummy_class();
        let object = Object::new(class);
        object.set_field("value", Value::Int(7));
        assert_eq!(object.get_field("value").expect("field set").as_i32(), Some(7));
        assert!(object.get_field("missing").is_none());
    }

    #[test]
    fn test_identity_differs_per_instance() {
        let class = dummy_class();
        let a = Arc::new(Object::new(class.clone()));
        let b = Arc::new(Object::new(class));
        assert_ne!(a.identity(), b.identity());
    }
}
