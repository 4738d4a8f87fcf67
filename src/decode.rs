//! The decode pipeline: wire values into typed host arguments.
//!
//! One decode routine exists per [`ParamClass`]; callback compilation picks
//! the routine once, so invocation never re-classifies the target type.
//!
//! The mismatch policy is lenient throughout. A top-level tag mismatch
//! returns `None`; a mismatch *inside* a container degrades that one slot
//! to the element kind's zero value (primitives) or to `Null` (objects)
//! instead of aborting the container. Entity resolution failures (null
//! identity, pool miss, capability mismatch) yield `Null`, never an error.

use std::sync::Arc;

use crate::context::Context;
use crate::convert::FromValue;
use crate::descriptor::{ParamClass, TypeDescriptor};
use crate::entity::{validate_entity_kind, Capability, EntityId};
use crate::host::{FuncRef, HostArray, HostMap, HostValue};
use crate::value::{Value, ValueKind};

/// A compiled decode routine: wire value in, host value out, `None` on a
/// top-level mismatch.
pub type Decoder = fn(&Value, &TypeDescriptor, &Context) -> Option<HostValue>;

/// Select the decode routine for a classification.
///
/// Total over [`ParamClass`]; "no decoder exists" is a registration-time
/// condition handled before this point.
pub(crate) fn decoder_for(class: ParamClass) -> Decoder {
    match class {
        ParamClass::Any => decode_any_slot,
        ParamClass::Bool => decode_bool,
        ParamClass::I32 => decode_i32,
        ParamClass::I64 => decode_i64,
        ParamClass::U32 => decode_u32,
        ParamClass::U64 => decode_u64,
        ParamClass::F64 => decode_f64,
        ParamClass::Str => decode_str,
        ParamClass::List => decode_list,
        ParamClass::Map => decode_map,
        ParamClass::Entity => decode_entity,
        ParamClass::Function => decode_function,
    }
}

fn decode_bool(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    bool::from_value(value).map(HostValue::Bool)
}

fn decode_i32(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    i32::from_value(value).map(HostValue::I32)
}

fn decode_i64(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    i64::from_value(value).map(HostValue::I64)
}

fn decode_u32(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    u32::from_value(value).map(HostValue::U32)
}

fn decode_u64(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    u64::from_value(value).map(HostValue::U64)
}

fn decode_f64(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    f64::from_value(value).map(HostValue::F64)
}

fn decode_str(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    String::from_value(value).map(HostValue::Str)
}

fn decode_function(value: &Value, _desc: &TypeDescriptor, _ctx: &Context) -> Option<HostValue> {
    match value {
        Value::Function(native) => Some(HostValue::Function(FuncRef::new(Arc::clone(native)))),
        _ => None,
    }
}

/// Decode an entity reference.
///
/// Only a wrong wire tag is a mismatch. A null identity, an identity the
/// pool cannot resolve, and a capability failure all decode to `Null`: the
/// callback still runs, it just sees no entity.
fn decode_entity(value: &Value, desc: &TypeDescriptor, ctx: &Context) -> Option<HostValue> {
    let id = match value {
        Value::Entity(id) => *id,
        _ => return None,
    };
    Some(resolve_entity(id, desc.capability(), ctx))
}

fn resolve_entity(id: EntityId, capability: Capability, ctx: &Context) -> HostValue {
    if id.is_null() {
        return HostValue::Null;
    }
    match ctx.entity_pool().get_or_create(id) {
        Some(handle) if validate_entity_kind(handle.kind(), capability) => {
            HostValue::Entity(handle)
        }
        _ => HostValue::Null,
    }
}

/// Decode a list into a natively-typed array.
///
/// The element target comes from the descriptor tree; a bare unconstrained
/// slot decodes into a heterogeneous object array.
fn decode_list(value: &Value, desc: &TypeDescriptor, ctx: &Context) -> Option<HostValue> {
    let items = match value {
        Value::List(items) => items,
        _ => return None,
    };
    let any = TypeDescriptor::any();
    let elem = desc.element().unwrap_or(&any);

    let array = match elem.class() {
        ParamClass::Bool => HostArray::Bool(fill_primitive::<bool>(items)),
        ParamClass::I32 => HostArray::I32(fill_primitive::<i32>(items)),
        ParamClass::I64 => HostArray::I64(fill_primitive::<i64>(items)),
        ParamClass::U32 => HostArray::U32(fill_primitive::<u32>(items)),
        ParamClass::U64 => HostArray::U64(fill_primitive::<u64>(items)),
        ParamClass::F64 => HostArray::F64(fill_primitive::<f64>(items)),
        ParamClass::Str => HostArray::Str(fill_primitive::<String>(items)),
        _ => HostArray::Object(items.iter().map(|item| decode_slot(item, elem, ctx)).collect()),
    };
    Some(HostValue::Array(array))
}

// Zero-fill on mismatch; the container survives heterogeneous payloads.
fn fill_primitive<T: FromValue + Default>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .map(|item| T::from_value(item).unwrap_or_default())
        .collect()
}

// Validate-then-decode for object-shaped container slots. A slot that fails
// validation or decoding becomes Null without aborting the container.
fn decode_slot(value: &Value, desc: &TypeDescriptor, ctx: &Context) -> HostValue {
    if !validate_value(value.kind(), desc) {
        return HostValue::Null;
    }
    decoder_for(desc.class())(value, desc, ctx).unwrap_or(HostValue::Null)
}

/// Decode a dict into a string-keyed typed map.
///
/// The whole decode fails when the declared key type is not string or when
/// the wire payload's parallel key/value sequences disagree in length (a
/// defensive check; the native module never produces that). Duplicate keys
/// resolve last write wins.
fn decode_map(value: &Value, desc: &TypeDescriptor, ctx: &Context) -> Option<HostValue> {
    let (keys, values) = match value {
        Value::Dict { keys, values } => (keys, values),
        _ => return None,
    };
    let key_desc = desc.map_key()?;
    if key_desc.class() != ParamClass::Str {
        return None;
    }
    if keys.len() != values.len() {
        return None;
    }
    let value_desc = desc.map_value()?;
    let mut map = desc.new_map()?;

    match &mut map {
        HostMap::Bool(m) => fill_map::<bool>(m, keys, values),
        HostMap::I32(m) => fill_map::<i32>(m, keys, values),
        HostMap::I64(m) => fill_map::<i64>(m, keys, values),
        HostMap::U32(m) => fill_map::<u32>(m, keys, values),
        HostMap::U64(m) => fill_map::<u64>(m, keys, values),
        HostMap::F64(m) => fill_map::<f64>(m, keys, values),
        HostMap::Str(m) => fill_map::<String>(m, keys, values),
        HostMap::Object(m) => {
            for (key, item) in keys.iter().zip(values) {
                m.insert(key.clone(), decode_slot(item, value_desc, ctx));
            }
        }
    }
    Some(HostValue::Map(map))
}

fn fill_map<T: FromValue + Default>(
    map: &mut rustc_hash::FxHashMap<String, T>,
    keys: &[String],
    values: &[Value],
) {
    for (key, item) in keys.iter().zip(values) {
        map.insert(key.clone(), T::from_value(item).unwrap_or_default());
    }
}

/// Decode a wire value with no target constraint.
///
/// Total over every tag: integers widen to their 64-bit host forms, lists
/// become heterogeneous object arrays, dicts become object maps, entities
/// resolve with no capability constraint.
pub fn decode_any(value: &Value, ctx: &Context) -> HostValue {
    match value {
        Value::Nil => HostValue::Null,
        Value::Bool(v) => HostValue::Bool(*v),
        Value::Int(v) => HostValue::I64(*v),
        Value::UInt(v) => HostValue::U64(*v),
        Value::Double(v) => HostValue::F64(*v),
        Value::String(s) => HostValue::Str(s.clone()),
        Value::List(items) => HostValue::Array(HostArray::Object(
            items.iter().map(|item| decode_any(item, ctx)).collect(),
        )),
        Value::Dict { keys, values } => {
            if keys.len() != values.len() {
                return HostValue::Null;
            }
            let mut map = rustc_hash::FxHashMap::default();
            for (key, item) in keys.iter().zip(values) {
                map.insert(key.clone(), decode_any(item, ctx));
            }
            HostValue::Map(HostMap::Object(map))
        }
        Value::Entity(id) => resolve_entity(*id, Capability::Any, ctx),
        Value::Function(native) => HostValue::Function(FuncRef::new(Arc::clone(native))),
    }
}

fn decode_any_slot(value: &Value, _desc: &TypeDescriptor, ctx: &Context) -> Option<HostValue> {
    Some(decode_any(value, ctx))
}

/// Check whether a wire tag is acceptable for a decode target without
/// performing the decode. Used for object-shaped container slots.
pub(crate) fn validate_value(kind: ValueKind, desc: &TypeDescriptor) -> bool {
    if desc.class() == ParamClass::Any {
        return true;
    }
    match kind {
        // Nil is acceptable wherever null is representable.
        ValueKind::Nil => matches!(
            desc.class(),
            ParamClass::Str | ParamClass::List | ParamClass::Map | ParamClass::Entity
        ),
        ValueKind::Bool => desc.class() == ParamClass::Bool,
        ValueKind::Int => matches!(desc.class(), ParamClass::I32 | ParamClass::I64),
        ValueKind::UInt => matches!(desc.class(), ParamClass::U32 | ParamClass::U64),
        ValueKind::Double => desc.class() == ParamClass::F64,
        ValueKind::String => desc.class() == ParamClass::Str,
        ValueKind::List => desc.class() == ParamClass::List,
        ValueKind::Dict => desc.class() == ParamClass::Map,
        ValueKind::Entity => desc.class() == ParamClass::Entity,
        // Function references are only marshalable as direct parameters.
        ValueKind::Function => false,
    }
}
