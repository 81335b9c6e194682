//! The dispatch resolver: binds a parsed `rjvm_classloader::Method` to
//! exactly one callable body.
//!
//! This lives here rather than in `rjvm_classloader` because it needs the
//! trap table and the native registry, both of which are runtime
//! (`rjvm_vm`) concerns (see the doc comment on `Method` itself).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use rjvm_classfile::Attribute;
use rjvm_classloader::{Method, MethodAccessFlags};

use crate::error::{Error, Result};
use crate::java_error::JavaError;
use crate::mirror::ClassMirror;
use crate::native_registry::IntrinsicMethod;
use crate::thread::{Thread, Vm};
use crate::trap_table;
use crate::value::Value;

/// The tagged code variant a `Method` resolves to.
enum Code {
    Bytecode,
    /// `registerNatives`/`initIDs`-style inert no-op.
    Nop,
    /// A static table entry, installed unconditionally.
    Trapped(IntrinsicMethod),
    /// A deferred binder: unbound until first invocation, at which point
    /// the native registry lookup result is memoized into `bound`. A racing
    /// caller that loses the memoization race simply gets the winner's
    /// value back — the transition from unbound to bound is idempotent.
    NativeDeferred { bound: OnceLock<IntrinsicMethod> },
    Abstract,
}

/// A `Method` plus the callable body the resolver bound it to.
pub struct ResolvedMethod {
    method: Arc<Method>,
    code: Code,
    /// Forced true when a trap installs a body regardless of the parsed
    /// `NATIVE` flag. `Method` itself stays immutable; this is the
    /// resolver's own view of the effective flag.
    forced_native: AtomicBool,
}

impl ResolvedMethod {
    #[must_use]
    pub fn method(&self) -> &Arc<Method> {
        &self.method
    }

    /// The effective `NATIVE` flag: the parsed flag, or forced on by a
    /// trap.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.forced_native.load(Ordering::Relaxed)
            || self.method.access_flags().contains(MethodAccessFlags::NATIVE)
    }

    /// The resolved `Code` attribute. Asserts the variant it expects and
    /// fails loudly on mismatch, so a resolver/interpreter disagreement
    /// surfaces immediately instead of silently misbehaving.
    ///
    /// # Errors
    ///
    /// `CodeVariantMismatch` if this method did not resolve to bytecode.
    pub fn code_attribute(&self) -> Result<&Attribute> {
        match self.code {
            Code::Bytecode => self.method.code_attribute().ok_or_else(|| Error::CodeVariantMismatch {
                full_signature: self.method.full_signature(),
                expected: "Code attribute",
            }),
            _ => Err(Error::CodeVariantMismatch {
                full_signature: self.method.full_signature(),
                expected: "Code attribute",
            }),
        }
    }

    /// The resolved native function, resolving the deferred binder on
    /// first call by consulting `vm.get_native`.
    ///
    /// # Errors
    ///
    /// `CodeVariantMismatch` if this method resolved to bytecode or is
    /// abstract. `UnsatisfiedLinkError` if a deferred native binder finds
    /// no registered implementation.
    pub fn native_function(&self, vm: &dyn Vm) -> Result<IntrinsicMethod> {
        match &self.code {
            Code::Trapped(function) => Ok(*function),
            Code::Nop => Ok(nop_body),
            Code::NativeDeferred { bound } => {
                if let Some(function) = bound.get() {
                    return Ok(*function);
                }
                let owner = owner_name(&self.method);
                let Some(function) = vm.get_native(&owner, &self.method.name_and_descriptor()) else {
                    return Err(Error::JavaError(JavaError::UnsatisfiedLinkError(
                        self.method.full_signature(),
                    )));
                };
                // Idempotent: if another caller raced us and already set
                // it, keep their value rather than erroring.
                let function = *bound.get_or_init(|| function);
                Ok(function)
            }
            Code::Bytecode | Code::Abstract => Err(Error::CodeVariantMismatch {
                full_signature: self.method.full_signature(),
                expected: "native function",
            }),
        }
    }

    /// Whether the method is signature-polymorphic (delegates to `Method`,
    /// since it is a pure function of the parsed record).
    #[must_use]
    pub fn is_signature_polymorphic(&self) -> bool {
        self.method.is_signature_polymorphic()
    }

    /// The monitor key for a `synchronized` invocation, or `None` if the
    /// method is not `synchronized`. Static methods lock `class_mirror`'s
    /// identity; instance methods lock the receiver's, which must be
    /// `args[0]`.
    ///
    /// # Errors
    ///
    /// `IllegalArgumentException` if the method is `synchronized`,
    /// non-static, and `args` is empty or its first element is not an
    /// object reference.
    pub fn lock_key(&self, args: &[Value], class_mirror: &Arc<ClassMirror>) -> Result<Option<usize>> {
        if !self.method.access_flags().contains(MethodAccessFlags::SYNCHRONIZED) {
            return Ok(None);
        }
        if self.method.is_static() {
            return Ok(Some(class_mirror.identity()));
        }
        let receiver = args.first().and_then(Value::as_object).ok_or_else(|| {
            Error::JavaError(JavaError::IllegalArgumentException(format!(
                "missing receiver for synchronized instance method {}",
                self.method.full_signature()
            )))
        })?;
        Ok(Some(receiver.identity()))
    }
}

impl std::fmt::Debug for ResolvedMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedMethod")
            .field("method", &self.method.full_signature())
            .field("is_native", &self.is_native())
            .finish()
    }
}

fn owner_name(method: &Arc<Method>) -> String {
    method
        .owner()
        .upgrade()
        .map(|class| class.name().to_string())
        .unwrap_or_default()
}

/// registerNatives/initIDs inert no-op body.
fn nop_body(
    _thread: Arc<dyn Thread>,
    _args: Vec<Value>,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Option<Value>>>>> {
    Box::pin(async { Ok(None) })
}

/// Resolve `method`'s callable body: trap → native placeholder → abstract
/// → bytecode, in that order, first match wins.
#[must_use]
#[tracing::instrument(level = "trace", skip(method), fields(method = %method.full_signature()))]
pub fn resolve(method: Arc<Method>) -> ResolvedMethod {
    let owner = owner_name(&method);
    let name_and_descriptor = method.name_and_descriptor();

    if let Some(trap) = trap_table::lookup(&owner, &name_and_descriptor) {
        tracing::debug!(method = %method.full_signature(), "trapped method installed");
        return ResolvedMethod {
            method,
            code: Code::Trapped(trap),
            forced_native: AtomicBool::new(true),
        };
    }

    let flags = method.access_flags();
    if flags.contains(MethodAccessFlags::NATIVE) {
        let full_signature = method.full_signature();
        let code = if full_signature.ends_with("::registerNatives()V") || full_signature.ends_with("::initIDs()V") {
            Code::Nop
        } else {
            Code::NativeDeferred { bound: OnceLock::new() }
        };
        return ResolvedMethod {
            method,
            code,
            forced_native: AtomicBool::new(false),
        };
    }

    if flags.contains(MethodAccessFlags::ABSTRACT) {
        return ResolvedMethod {
            method,
            code: Code::Abstract,
            forced_native: AtomicBool::new(false),
        };
    }

    ResolvedMethod {
        method,
        code: Code::Bytecode,
        forced_native: AtomicBool::new(false),
    }
}
