//! The reflection materializer: produces
//! `java.lang.reflect.{Field,Method,Constructor}` mirror objects.
//!
//! Simplified to plain Rust structs since this core has no heap to box
//! them into. These mirrors are built lazily, one per request, with no
//! identity guarantee across independent requests — callers get a fresh
//! value every time, which is exactly what returning an owned struct
//! gives for free.

use std::collections::HashMap;
use std::sync::Arc;

use rjvm_classfile::{Attribute, FieldType};
use rjvm_classloader::{Class, Field, Method};

use crate::dispatch::ResolvedMethod;
use crate::error::Result;
use crate::mirror::ClassMirror;
use crate::thread::{Thread, Vm};

/// `java.lang.reflect.Field`'s mirror fields.
#[derive(Debug)]
pub struct FieldMirror {
    pub clazz: Arc<ClassMirror>,
    pub name: Arc<str>,
    pub field_type: Option<Arc<ClassMirror>>,
    pub modifiers: u16,
    pub slot: i32,
    pub signature: Option<Arc<str>>,
    pub annotations: Option<Vec<u8>>,
}

/// `java.lang.reflect.Method`/`Constructor`'s shared mirror shape.
/// `is_constructor` is the only thing distinguishing which Java
/// reflection type this stands in for.
#[derive(Debug)]
pub struct MethodMirror {
    pub is_constructor: bool,
    pub clazz: Arc<ClassMirror>,
    pub name: Arc<str>,
    pub parameter_types: Vec<Arc<ClassMirror>>,
    pub return_type: Option<Arc<ClassMirror>>,
    pub exception_types: Vec<Arc<ClassMirror>>,
    pub modifiers: u16,
    pub slot: i32,
    pub signature: Option<Arc<str>>,
    pub annotations: Option<Vec<u8>>,
    pub annotation_default: Option<Vec<u8>>,
    /// Raw `RuntimeVisibleParameterAnnotations` payload, if present.
    /// Splitting this into one byte-array mirror per parameter is the Java
    /// Class Library's `sun.reflect.annotation` concern, so this core
    /// passes the blob through unparsed.
    pub parameter_annotations: Option<Vec<u8>>,
}

/// The internal class-name descriptor a `resolveClass`-style collaborator
/// expects for `field_type`, or `None` for a bare primitive, which this
/// core treats as having no loadable `Class` (the JCL's primitive `Class`
/// singletons are out of scope here).
fn descriptor_of(field_type: &FieldType) -> Option<String> {
    match field_type {
        FieldType::Base(_) => None,
        FieldType::Object(name) => Some(format!("L{name};")),
        FieldType::Array(_) => Some(array_descriptor(field_type)),
    }
}

fn array_descriptor(field_type: &FieldType) -> String {
    match field_type {
        FieldType::Base(base) => base.code().to_string(),
        FieldType::Object(name) => format!("L{name};"),
        FieldType::Array(inner) => format!("[{}", array_descriptor(inner)),
    }
}

async fn resolve_optional(
    vm: &dyn Vm,
    thread: &dyn Thread,
    field_type: Option<&FieldType>,
    resolved: &mut HashMap<String, Arc<Class>>,
) -> Result<bool> {
    let Some(field_type) = field_type else {
        return Ok(true);
    };
    let Some(descriptor) = descriptor_of(field_type) else {
        return Ok(true);
    };
    if resolved.contains_key(&descriptor) {
        return Ok(true);
    }
    match vm.resolve_class(thread, &descriptor).await {
        Ok(class) => {
            resolved.insert(descriptor, class);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

fn class_mirror_for(field_type: &FieldType, resolved: &HashMap<String, Arc<Class>>) -> Option<Arc<ClassMirror>> {
    let descriptor = descriptor_of(field_type)?;
    resolved.get(&descriptor).map(|class| ClassMirror::new(Arc::clone(class)))
}

/// Build a `java.lang.reflect.Field` mirror for `field`. Returns
/// `Ok(None)` if the field's declared type fails to resolve, rather than
/// propagating the resolution error: the caller that triggered resolution
/// already surfaced that failure on `thread`.
#[tracing::instrument(level = "trace", skip(vm, thread, owner_mirror, field), fields(field = %field.full_signature()))]
pub async fn reflect_field(
    vm: &dyn Vm,
    thread: &dyn Thread,
    owner_mirror: &Arc<ClassMirror>,
    field: &Arc<Field>,
) -> Result<Option<FieldMirror>> {
    let signature = field
        .member()
        .get_attribute("Signature")
        .and_then(|attribute| match attribute {
            Attribute::Signature { sig } => Some(vm.intern_string(sig)),
            _ => None,
        });

    let mut resolved = HashMap::new();
    if !resolve_optional(vm, thread, Some(field.field_type()), &mut resolved).await? {
        return Ok(None);
    }

    let annotations = field.member().get_attribute("RuntimeVisibleAnnotations").and_then(|attribute| match attribute {
        Attribute::RuntimeVisibleAnnotations { raw_bytes, is_hidden } if !is_hidden => Some(raw_bytes.clone()),
        _ => None,
    });

    Ok(Some(FieldMirror {
        clazz: Arc::clone(owner_mirror),
        name: vm.intern_string(field.name()),
        field_type: class_mirror_for(field.field_type(), &resolved),
        modifiers: field.access_flags().to_raw(),
        slot: field.slot(),
        signature,
        annotations,
    }))
}

/// Every class descriptor a `Method`/`Constructor` mirror needs resolved:
/// return type, parameter types, declared checked exceptions, plus (if
/// there's a `Code` attribute with handlers) `Throwable` and every
/// non-wildcard `catchType`.
fn descriptors_to_resolve(method: &Method, owner_class: &Class) -> Vec<String> {
    let mut descriptors = Vec::new();

    if let Some(return_type) = method.return_type() {
        if let Some(descriptor) = descriptor_of(return_type) {
            descriptors.push(descriptor);
        }
    }
    for param_type in method.param_types() {
        if let Some(descriptor) = descriptor_of(param_type) {
            descriptors.push(descriptor);
        }
    }

    if let Some(Attribute::Exceptions { exceptions }) = method.get_attribute("Exceptions") {
        descriptors.extend(exceptions.iter().map(|name| format!("L{name};")));
    }

    if let Some(Attribute::Code { exception_table, .. }) = method.code_attribute() {
        if !exception_table.is_empty() {
            descriptors.push("Ljava/lang/Throwable;".to_string());
            let constant_pool = &owner_class.class_file().constant_pool;
            for handler in exception_table {
                if !handler.is_catch_all() {
                    if let Ok(name) = constant_pool.try_get_class_name(handler.catch_type) {
                        descriptors.push(format!("L{name};"));
                    }
                }
            }
        }
    }

    descriptors.sort();
    descriptors.dedup();
    descriptors
}

/// Build a `java.lang.reflect.Method`/`Constructor` mirror for `method`.
/// Returns `Ok(None)` if the batched class resolution fails as a whole;
/// the surfaced exception remains on `thread`.
#[tracing::instrument(level = "trace", skip(vm, thread, owner_mirror, method), fields(method = %method.full_signature()))]
pub async fn reflect_method(
    vm: &dyn Vm,
    thread: &dyn Thread,
    owner_mirror: &Arc<ClassMirror>,
    method: &Arc<Method>,
    is_constructor: bool,
) -> Result<Option<MethodMirror>> {
    let owner_class = owner_mirror.class();
    let descriptors = descriptors_to_resolve(method, owner_class);
    let resolved = match vm.resolve_classes(thread, &descriptors).await {
        Ok(resolved) => resolved,
        Err(_) => return Ok(None),
    };

    let parameter_types = method
        .param_types()
        .iter()
        .filter_map(|param_type| class_mirror_for(param_type, &resolved))
        .collect();
    let return_type = method.return_type().and_then(|return_type| class_mirror_for(return_type, &resolved));
    let exception_types = match method.get_attribute("Exceptions") {
        Some(Attribute::Exceptions { exceptions }) => exceptions
            .iter()
            .filter_map(|name| resolved.get(&format!("L{name};")))
            .map(|class| ClassMirror::new(Arc::clone(class)))
            .collect(),
        _ => Vec::new(),
    };

    let signature = method.get_attribute("Signature").and_then(|attribute| match attribute {
        Attribute::Signature { sig } => Some(vm.intern_string(sig)),
        _ => None,
    });
    let annotations = method.get_attribute("RuntimeVisibleAnnotations").and_then(|attribute| match attribute {
        Attribute::RuntimeVisibleAnnotations { raw_bytes, is_hidden } if !is_hidden => Some(raw_bytes.clone()),
        _ => None,
    });
    let annotation_default = method.get_attribute("AnnotationDefault").map(|attribute| match attribute {
        Attribute::AnnotationDefault { raw_bytes } => raw_bytes.clone(),
        _ => unreachable!("get_attribute(\"AnnotationDefault\") only ever returns that variant"),
    });
    let parameter_annotations = method
        .get_attribute("RuntimeVisibleParameterAnnotations")
        .map(|attribute| match attribute {
            Attribute::RuntimeVisibleParameterAnnotations { raw_bytes } => raw_bytes.clone(),
            _ => unreachable!("get_attribute(\"RuntimeVisibleParameterAnnotations\") only ever returns that variant"),
        });

    Ok(Some(MethodMirror {
        is_constructor,
        clazz: Arc::clone(owner_mirror),
        name: vm.intern_string(method.name()),
        parameter_types,
        return_type,
        exception_types,
        modifiers: method.access_flags().to_raw(),
        slot: method.slot(),
        signature,
        annotations,
        annotation_default,
        parameter_annotations,
    }))
}

/// Whether invoking `resolved` reflectively should raise
/// `AbstractMethodError` instead of dispatching a call.
#[must_use]
pub fn is_abstract(resolved: &ResolvedMethod) -> bool {
    resolved
        .method()
        .access_flags()
        .contains(rjvm_classfile::MethodAccessFlags::ABSTRACT)
}
