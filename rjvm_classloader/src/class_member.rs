//! `ClassMember`, the common shape of `Field` and `Method`.

use rjvm_classfile::Attribute;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{OnceLock, Weak};

use crate::class::Class;

/// Fields shared by every class member: a field or a method.
///
/// `slot` is write-once: it starts at `-1` and is assigned exactly once,
/// by the class resolver, when the owning class is resolved.
/// `owner` is likewise write-once, set after the owning `Class`'s `Arc`
/// exists (members are parsed from the class file slightly before that
/// `Arc` does, so construction happens in two steps — see
/// `Class::new`).
#[derive(Debug)]
pub struct ClassMember {
    owner: OnceLock<Weak<Class>>,
    slot: AtomicI32,
    pub(crate) access_flags_bits: u16,
    pub(crate) name: String,
    pub(crate) raw_descriptor: String,
    pub(crate) attrs: Vec<Attribute>,
}

impl ClassMember {
    pub(crate) fn new(
        access_flags_bits: u16,
        name: String,
        raw_descriptor: String,
        attrs: Vec<Attribute>,
    ) -> Self {
        Self {
            owner: OnceLock::new(),
            slot: AtomicI32::new(-1),
            access_flags_bits,
            name,
            raw_descriptor,
            attrs,
        }
    }

    /// Back-reference to the defining class. Non-owning: outlives the
    /// member only as long as the class itself is alive. Empty (an
    /// already-dropped `Weak`) until `Class::new` assigns it.
    #[must_use]
    pub fn owner(&self) -> Weak<Class> {
        self.owner.get().cloned().unwrap_or_default()
    }

    /// Assign this member's owner. Called exactly once, by `Class::new`,
    /// right after the owning class's `Arc` is created.
    pub(crate) fn set_owner(&self, owner: Weak<Class>) {
        self.owner
            .set(owner)
            .unwrap_or_else(|_| panic!("owner assigned more than once"));
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn raw_descriptor(&self) -> &str {
        &self.raw_descriptor
    }

    #[must_use]
    pub fn slot(&self) -> i32 {
        self.slot.load(Ordering::Acquire)
    }

    /// Assign this member's slot. Must be called at most once, by the
    /// class resolver. Calling it twice is a contract violation and panics
    /// rather than silently overwriting.
    pub fn set_slot(&self, slot: i32) {
        let previous = self.slot.swap(slot, Ordering::AcqRel);
        assert_eq!(previous, -1, "slot assigned more than once");
    }

    /// First attribute with this name, if any.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|attribute| attribute.name() == name)
    }

    /// Every attribute with this name, preserving input order.
    #[must_use]
    pub fn get_attributes(&self, name: &str) -> Vec<&Attribute> {
        self.attrs.iter().filter(|attribute| attribute.name() == name).collect()
    }
}
