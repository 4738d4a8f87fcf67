//! Encoding host values back onto the wire.
//!
//! The return path of every invocation, and the argument path of reverse
//! calls through [`FuncRef`](crate::host::FuncRef). `None` marks a value
//! with no wire representation; callers degrade it to `Nil` (return values)
//! or drop it (reverse-call arguments) rather than raising.

use crate::convert::IntoValue;
use crate::host::{HostArray, HostMap, HostValue};
use crate::value::Value;

/// Encode a host value into its wire representation.
pub fn encode(value: &HostValue) -> Option<Value> {
    match value {
        HostValue::Null => Some(Value::Nil),
        HostValue::Bool(v) => Some((*v).into_value()),
        HostValue::I32(v) => Some((*v).into_value()),
        HostValue::I64(v) => Some((*v).into_value()),
        HostValue::U32(v) => Some((*v).into_value()),
        HostValue::U64(v) => Some((*v).into_value()),
        HostValue::F64(v) => Some((*v).into_value()),
        HostValue::Str(s) => Some(Value::String(s.clone())),
        HostValue::Array(array) => Some(encode_array(array)),
        HostValue::Map(map) => Some(encode_map(map)),
        HostValue::Entity(handle) => Some(Value::Entity(handle.id())),
        HostValue::Function(func) => Some(Value::Function(func.native().clone())),
    }
}

fn encode_array(array: &HostArray) -> Value {
    let items = match array {
        HostArray::Bool(v) => v.iter().map(|x| (*x).into_value()).collect(),
        HostArray::I32(v) => v.iter().map(|x| (*x).into_value()).collect(),
        HostArray::I64(v) => v.iter().map(|x| (*x).into_value()).collect(),
        HostArray::U32(v) => v.iter().map(|x| (*x).into_value()).collect(),
        HostArray::U64(v) => v.iter().map(|x| (*x).into_value()).collect(),
        HostArray::F64(v) => v.iter().map(|x| (*x).into_value()).collect(),
        HostArray::Str(v) => v.iter().map(|s| Value::String(s.clone())).collect(),
        // Unencodable elements degrade to Nil so indices stay aligned.
        HostArray::Object(v) => v
            .iter()
            .map(|x| encode(x).unwrap_or(Value::Nil))
            .collect(),
    };
    Value::List(items)
}

fn encode_map(map: &HostMap) -> Value {
    let mut keys = Vec::with_capacity(map.len());
    let mut values = Vec::with_capacity(map.len());
    match map {
        HostMap::Bool(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push((*v).into_value());
            }
        }
        HostMap::I32(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push((*v).into_value());
            }
        }
        HostMap::I64(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push((*v).into_value());
            }
        }
        HostMap::U32(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push((*v).into_value());
            }
        }
        HostMap::U64(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push((*v).into_value());
            }
        }
        HostMap::F64(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push((*v).into_value());
            }
        }
        HostMap::Str(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push(Value::String(v.clone()));
            }
        }
        HostMap::Object(m) => {
            for (k, v) in m {
                keys.push(k.clone());
                values.push(encode(v).unwrap_or(Value::Nil));
            }
        }
    }
    Value::Dict { keys, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, EntityKind};
    use crate::testutil::TestEntity;
    use std::sync::Arc;

    #[test]
    fn primitives_encode_to_their_tags() {
        assert!(matches!(encode(&HostValue::Null), Some(Value::Nil)));
        assert!(matches!(encode(&HostValue::Bool(true)), Some(Value::Bool(true))));
        assert!(matches!(encode(&HostValue::I32(-2)), Some(Value::Int(-2))));
        assert!(matches!(encode(&HostValue::I64(3)), Some(Value::Int(3))));
        assert!(matches!(encode(&HostValue::U32(4)), Some(Value::UInt(4))));
        assert!(matches!(encode(&HostValue::U64(5)), Some(Value::UInt(5))));
        assert!(matches!(encode(&HostValue::F64(0.5)), Some(Value::Double(v)) if v == 0.5));
        assert!(matches!(encode(&HostValue::Str("s".into())), Some(Value::String(s)) if s == "s"));
    }

    #[test]
    fn typed_array_encodes_to_list() {
        let wire = encode(&HostValue::Array(HostArray::I32(vec![1, 2]))).unwrap();
        match wire {
            Value::List(items) => {
                assert!(matches!(items[0], Value::Int(1)));
                assert!(matches!(items[1], Value::Int(2)));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn map_encodes_to_parallel_sequences() {
        let mut m = rustc_hash::FxHashMap::default();
        m.insert("a".to_string(), 1i64);
        let wire = encode(&HostValue::Map(HostMap::I64(m))).unwrap();
        match wire {
            Value::Dict { keys, values } => {
                assert_eq!(keys, vec!["a".to_string()]);
                assert!(matches!(values[0], Value::Int(1)));
            }
            other => panic!("expected dict, got {:?}", other),
        }
    }

    #[test]
    fn entity_encodes_to_its_identity() {
        let handle = Arc::new(TestEntity::new(42, EntityKind::Player));
        let wire = encode(&HostValue::Entity(handle)).unwrap();
        assert!(matches!(wire, Value::Entity(EntityId(42))));
    }
}
