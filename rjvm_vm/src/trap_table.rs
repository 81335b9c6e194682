//! The trap table: a hard-coded replacement body for a small, fixed set of
//! methods that must never run their real implementation.
//!
//! A compile-time-constant lookup from `(ownerInternalClassName,
//! name+rawDescriptor)` to a hard-coded replacement body, installed by
//! `crate::dispatch::resolve` regardless of a method's `NATIVE` flag. Built
//! as a single `HashMap` behind a `OnceLock` so a lookup is one hash probe
//! — the table itself never changes after first use.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::java_error::JavaError;
use crate::native_registry::IntrinsicMethod;
use crate::thread::Thread;
use crate::value::Value;

/// Library names `System.loadLibrary` treats as already-satisfied.
const KNOWN_LIBRARIES: &[&str] = &["zip", "net", "nio", "awt", "fontmanager"];

/// Look up a trap by owner and `"{name}:{descriptor}"` (the form
/// `Method::name_and_descriptor` returns).
#[must_use]
pub fn lookup(owner: &str, name_and_descriptor: &str) -> Option<IntrinsicMethod> {
    table().get(&(owner, name_and_descriptor)).copied()
}

fn table() -> &'static HashMap<(&'static str, &'static str), IntrinsicMethod> {
    static TABLE: OnceLock<HashMap<(&'static str, &'static str), IntrinsicMethod>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<(&'static str, &'static str), IntrinsicMethod> = HashMap::new();
        table.insert(("java/lang/ref/Reference", "<clinit>:()V"), reference_clinit as IntrinsicMethod);
        table.insert(
            ("java/lang/System", "loadLibrary:(Ljava/lang/String;)V"),
            system_load_library as IntrinsicMethod,
        );
        table.insert(("java/lang/Terminator", "setup:()V"), terminator_setup as IntrinsicMethod);
        table.insert(
            ("java/util/concurrent/atomic/AtomicInteger", "compareAndSet:(II)Z"),
            atomic_integer_compare_and_set as IntrinsicMethod,
        );
        table.insert(
            ("java/nio/Bits", "byteOrder:()Ljava/nio/ByteOrder;"),
            bits_byte_order as IntrinsicMethod,
        );
        table.insert(
            ("java/nio/Bits", "copyToByteArray:(JLjava/lang/Object;JJ)V"),
            bits_copy_to_byte_array as IntrinsicMethod,
        );
        table.insert(
            ("java/nio/charset/Charset$3", "run:()Ljava/lang/Object;"),
            charset_3_run as IntrinsicMethod,
        );
        table
    })
}

fn boxed<F>(future: F) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>>
where
    F: Future<Output = Result<Option<Value>>> + 'static,
{
    Box::pin(future)
}

fn reference_clinit(
    _thread: Arc<dyn Thread>,
    _args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
    boxed(async { Ok(None) })
}

fn terminator_setup(
    _thread: Arc<dyn Thread>,
    _args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
    boxed(async { Ok(None) })
}

/// `System.loadLibrary(String)`: NOP for the known-safe libraries this
/// runtime ships without, `UnsatisfiedLinkError` otherwise.
fn system_load_library(
    thread: Arc<dyn Thread>,
    args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
    boxed(async move {
        let name = args.first().and_then(Value::as_utf8).unwrap_or_default().to_string();
        if KNOWN_LIBRARIES.contains(&name.as_str()) {
            Ok(None)
        } else {
            thread.throw(JavaError::UnsatisfiedLinkError(name));
            Ok(None)
        }
    })
}

/// `AtomicInteger.compareAndSet(int, int)`: writes `update` to `value` only
/// if the current value matches `expect`, returning whether the write
/// happened. A single cooperative logical thread runs at a time, so no
/// other thread can observe `value` between the read and the write — a
/// plain compare-then-set is safe without extra locking.
fn atomic_integer_compare_and_set(
    _thread: Arc<dyn Thread>,
    args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
    boxed(async move {
        let receiver = args.first().and_then(Value::as_object).cloned();
        let expect = args.get(1).and_then(Value::as_i32).unwrap_or_default();
        let update = args.get(2).and_then(Value::as_i32).unwrap_or_default();
        let Some(receiver) = receiver else {
            return Ok(Some(Value::Int(0)));
        };
        let current = receiver.get_field("value").and_then(|value| value.as_i32()).unwrap_or_default();
        if current == expect {
            receiver.set_field("value", Value::Int(update));
            Ok(Some(Value::Int(1)))
        } else {
            Ok(Some(Value::Int(0)))
        }
    })
}

/// `Bits.byteOrder()`: returns the static `LITTLE_ENDIAN` field of
/// `java/nio/ByteOrder`. Relies on that class's mirror already carrying
/// the field (its `<clinit>` is the JCL's concern, out of scope
/// here); absence is a `NoSuchMethodError` rather than a silent null, since
/// a real JVM would never reach this trap before `ByteOrder` initializes.
fn bits_byte_order(
    thread: Arc<dyn Thread>,
    _args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
    boxed(async move {
        let mirror = thread.vm().class_mirror("Ljava/nio/ByteOrder;");
        match mirror.and_then(|mirror| mirror.static_get("LITTLE_ENDIAN")) {
            Some(value) => Ok(Some(value)),
            None => Err(crate::error::Error::JavaError(JavaError::NoSuchMethodError(
                "java/nio/ByteOrder.LITTLE_ENDIAN".to_string(),
            ))),
        }
    })
}

/// `Bits.copyToByteArray(long srcAddr, Object dst, long dstPos, long
/// length)`: copy `length` heap bytes starting at `srcAddr` into `dst`'s
/// `array` field starting at `dstPos`.
fn bits_copy_to_byte_array(
    thread: Arc<dyn Thread>,
    args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
    boxed(async move {
        let src_addr = args.first().and_then(value_as_u64).unwrap_or_default();
        let dst = args.get(1).and_then(Value::as_object).cloned();
        let dst_pos = args.get(2).and_then(value_as_u64).unwrap_or_default() as usize;
        let length = args.get(3).and_then(value_as_u64).unwrap_or_default() as usize;

        let Some(dst) = dst else {
            return Ok(None);
        };
        let mut bytes = dst.get_field("array").and_then(|value| value.as_bytes().map(<[u8]>::to_vec)).unwrap_or_default();
        if bytes.len() < dst_pos + length {
            bytes.resize(dst_pos + length, 0);
        }
        let vm = thread.vm();
        for offset in 0..length {
            bytes[dst_pos + offset] = vm.get_byte(src_addr + offset as u64)?;
        }
        dst.set_field("array", Value::Bytes(Arc::from(bytes)));
        Ok(None)
    })
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Long(raw) => Some(*raw as u64),
        Value::Int(raw) => Some(*raw as u64),
        _ => None,
    }
}

/// `Charset$3.run()`: returns `null`.
fn charset_3_run(
    _thread: Arc<dyn Thread>,
    _args: Vec<Value>,
) -> Pin<Box<dyn Future<Output = Result<Option<Value>>>>> {
    boxed(async { Ok(Some(Value::Object(None))) })
}
