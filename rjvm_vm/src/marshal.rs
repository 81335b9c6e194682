//! The argument marshaller: converts interpreter-stack arguments to
//! native-call arguments.
//!
//! Two operations: `take_args` pops a caller's operand stack at true JVM
//! slot granularity (wide values occupy two slots, the second a
//! `Value::Top` sentinel — see `crate::value`); `convert_args` collapses
//! that slot-level sequence to one value per logical parameter, the
//! convention a native/trapped body actually receives.

use rjvm_classloader::{FieldType, Method};

use crate::dispatch::ResolvedMethod;
use crate::error::{Error, Result};
use crate::java_error::JavaError;
use crate::value::Value;

/// Pop exactly `method.param_bytes()` entries from the tail of
/// `caller_stack`, in order, and return them as a new sequence.
/// `caller_stack` is truncated in place.
///
/// # Errors
///
/// `IllegalArgumentException` if `caller_stack` holds fewer than
/// `method.param_bytes()` entries.
pub fn take_args(caller_stack: &mut Vec<Value>, method: &Method) -> Result<Vec<Value>> {
    let param_bytes = method.param_bytes();
    if caller_stack.len() < param_bytes {
        return Err(Error::JavaError(JavaError::IllegalArgumentException(format!(
            "expected {param_bytes} argument slots for {}, found {}",
            method.name_and_descriptor(),
            caller_stack.len()
        ))));
    }
    Ok(caller_stack.split_off(caller_stack.len() - param_bytes))
}

/// Collapse slot-level `raw_params` into one value per logical parameter.
/// `thread` itself is not part of the returned vector here: this core's
/// native-call convention (`crate::native_registry::IntrinsicMethod`)
/// already takes the thread as a separate leading parameter, so that
/// prefix is realized by the function signature rather than by this
/// vector's contents.
///
/// # Errors
///
/// `IllegalArgumentException` if `raw_params` is shorter than the method's
/// resolved parameter shape requires.
pub fn convert_args(resolved: &ResolvedMethod, raw_params: Vec<Value>) -> Result<Vec<Value>> {
    if resolved.is_signature_polymorphic() {
        // Passed through verbatim: a MethodHandle varargs invoke takes
        // whatever argument list the caller built, unshaped by a
        // descriptor.
        return Ok(raw_params);
    }

    let method = resolved.method();
    let mut args = Vec::with_capacity(method.num_args());
    let mut index = 0usize;

    if !method.is_static() {
        let receiver = raw_params
            .get(index)
            .ok_or_else(|| underflow(method))?
            .clone();
        args.push(receiver);
        index += 1;
    }

    for param_type in method.param_types() {
        let value = raw_params.get(index).ok_or_else(|| underflow(method))?.clone();
        args.push(value);
        index += if is_wide(param_type) { 2 } else { 1 };
    }

    Ok(args)
}

fn is_wide(field_type: &FieldType) -> bool {
    field_type.slot_count() == 2
}

fn underflow(method: &Method) -> Error {
    Error::JavaError(JavaError::IllegalArgumentException(format!(
        "too few raw arguments for {}",
        method.name_and_descriptor()
    )))
}
