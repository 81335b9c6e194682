//! Shared test doubles for `rjvm_vm`'s unit tests.
//!
//! A handful of constructors that build just enough class-file metadata
//! to exercise the dispatch resolver, marshaller, and reflection
//! materializer without a real classpath.

#![cfg(test)]

use std::sync::{Arc, Weak};

use rjvm_classfile::{ClassAccessFlags, ClassFile, ConstantPool, MethodAccessFlags, MethodInfo};
use rjvm_classloader::{Class, ClassLoader};

/// An owner-less class carrying only its own name, for tests that need a
/// `ClassMirror`/`Class` but not a fully wired member tree.
pub(crate) fn mock_class(name: &str) -> Arc<Class> {
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

/// A bare `method_info` with no attributes, sufficient for
/// `Method::parse`/`dispatch::resolve` tests that only care about name,
/// descriptor, and flags.
pub(crate) fn mock_method_info(
    pool: &mut ConstantPool,
    name: &str,
    descriptor: &str,
    flags: MethodAccessFlags,
) -> MethodInfo {
    let name_index = pool.add_utf8(name).expect("add_utf8");
    let descriptor_index = pool.add_utf8(descriptor).expect("add_utf8");
    MethodInfo {
        access_flags: flags,
        name_index,
        descriptor_index,
        attributes: Vec::new(),
    }
}
