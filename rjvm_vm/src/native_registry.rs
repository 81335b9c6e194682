//! The native method registry consulted by the dispatch resolver's
//! deferred binder.
//!
//! A manual `HashMap<String, IntrinsicMethod>` keyed by `"{class}.{name}
//! {descriptor}"`, with `register`/`get` operations. No per-Java-version
//! gating or macro sugar: this core doesn't ship a real class library, so
//! there's only ever one implementation to register per signature.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Result;
use crate::thread::Thread;
use crate::value::Value;

/// A native Java method implemented in Rust.
///
/// Takes the owning logical thread and the already-marshalled native-call
/// arguments (`crate::marshal::convert_args`'s output) and returns the
/// method's result, or `None` for `void`.
pub type IntrinsicMethod = fn(
    thread: Arc<dyn Thread>,
    args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>>;

/// Maps `(ownerInternalClassName, name+rawDescriptor)` to its Rust
/// implementation.
#[derive(Default)]
pub struct NativeRegistry {
    methods: HashMap<String, IntrinsicMethod>,
}

impl std::fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeRegistry")
            .field("methods", &self.methods.len())
            .finish()
    }
}

impl NativeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation for `class_name`'s
    /// `method_name+method_descriptor`.
    pub fn register(
        &mut self,
        class_name: &str,
        method_name: &str,
        method_descriptor: &str,
        method: IntrinsicMethod,
    ) {
        let signature = format!("{class_name}.{method_name}{method_descriptor}");
        self.methods.insert(signature, method);
    }

    /// Look up an implementation by owner class and `name+descriptor`
    /// (the form `Method::name_and_descriptor` returns).
    #[must_use]
    pub fn get(&self, class_name: &str, name_and_descriptor: &str) -> Option<IntrinsicMethod> {
        let (name, descriptor) = name_and_descriptor.split_once(':')?;
        let signature = format!("{class_name}.{name}{descriptor}");
        self.methods.get(&signature).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(
        _thread: Arc<dyn Thread>,
        _args: Vec<Value>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
        Box::pin(async { Ok(None) })
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = NativeRegistry::new();
        registry.register("java/lang/Object", "hashCode", "()I", noop);
        assert!(registry.get("java/lang/Object", "hashCode:()I").is_some());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let registry = NativeRegistry::new();
        assert!(registry.get("java/lang/Object", "hashCode:()I").is_none());
    }
}
