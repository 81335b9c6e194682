//! The `Thread`/`Vm` collaborator traits.
//!
//! These model the callback-based collaborator interfaces a real JVM
//! would expose (`resolveClass`, the thread's owning JVM, a
//! run-until-finished scheduler) as plain `async fn`s instead —
//! `tokio::task::LocalSet` (see `crate::executor`) already drives
//! suspension to completion, so a suspension point is just an `.await`.
//!
//! Both traits are `#[async_trait(?Send)]`: the cooperative model
//! (exactly one logical execution thread at a time) never needs `Send`
//! futures, and the dispatch resolver and launch driver must stay generic
//! over "whatever the real interpreter/heap turns out to be" rather than
//! a concrete type, so both need to be trait objects.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rjvm_classloader::{Class, ClassLoader, Method};

use crate::error::Result;
use crate::java_error::JavaError;
use crate::mirror::ClassMirror;
use crate::native_registry::IntrinsicMethod;
use crate::value::Value;

/// The JVM context: class resolution/initialization, the classpath's
/// native registry, interned strings, and heap byte access.
#[async_trait(?Send)]
pub trait Vm {
    /// Resolve one class by internal name descriptor, possibly suspending
    /// to run its `<clinit>`.
    async fn resolve_class(&self, thread: &dyn Thread, descriptor: &str) -> Result<Arc<Class>>;

    /// Resolve several classes as a single batch. Fails as a whole if any
    /// descriptor fails to resolve.
    async fn resolve_classes(
        &self,
        thread: &dyn Thread,
        descriptors: &[String],
    ) -> Result<HashMap<String, Arc<Class>>>;

    /// Synchronous fetch of an already-initialized class, or `None` if it
    /// has not reached that state yet.
    fn get_initialized_class(&self, descriptor: &str) -> Option<Arc<Class>>;

    /// Drive `descriptor`'s class through loading and `<clinit>`.
    async fn initialize_class(&self, thread: &dyn Thread, descriptor: &str) -> Result<Arc<Class>>;

    /// Intern a string.
    fn intern_string(&self, value: &str) -> Arc<str>;

    /// Look up a native implementation by owner class and
    /// `name+descriptor`, consulted by the dispatch resolver's deferred
    /// binder.
    fn get_native(&self, class_name: &str, name_and_descriptor: &str) -> Option<IntrinsicMethod>;

    /// Read one byte from the heap at `address`, used by the
    /// `Bits.copyToByteArray` trap.
    fn get_byte(&self, address: u64) -> Result<u8>;

    /// The bootstrap class loader.
    fn bootstrap_class_loader(&self) -> Arc<ClassLoader>;

    /// The class mirror for an already-resolved class. `None` if
    /// `descriptor`'s class has not been resolved yet.
    fn class_mirror(&self, descriptor: &str) -> Option<Arc<ClassMirror>>;
}

/// One logical JVM thread: the JVM's thread objects are multiplexed onto
/// the single cooperative executor thread.
#[async_trait(?Send)]
pub trait Thread {
    /// A stable identity used as the monitor-ownership key.
    fn id(&self) -> u64;

    /// The VM this thread runs against.
    fn vm(&self) -> Arc<dyn Vm>;

    /// Surface a Java exception on this thread; native/trapped bodies call
    /// this and return rather than unwind directly.
    fn throw(&self, error: JavaError);

    /// Invoke an already-resolved method with its already-marshalled
    /// native-call argument vector: sets up an invocation frame, and is
    /// also the tail call a bound native/trapped body makes into further
    /// Java code.
    async fn invoke(&self, method: &Arc<Method>, args: Vec<Value>) -> Result<Option<Value>>;
}
