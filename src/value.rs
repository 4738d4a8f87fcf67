//! Tagged wire values crossing the native/host boundary.
//!
//! A [`Value`] is the self-describing union the native host hands to (and
//! receives from) callback code: a kind tag plus exactly one payload. It is
//! built per native call and consumed synchronously by the decode pipeline;
//! nothing in this crate retains one past the invocation it was built for.
//!
//! Dictionaries travel as two parallel sequences (`keys`, `values`); the
//! decoder rejects payloads where the lengths differ.

use std::fmt;
use std::sync::Arc;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::entity::EntityId;

/// A native function reference, callable with positional wire arguments.
///
/// The host owns the underlying function; this is the handle the wire format
/// carries for `Function`-tagged values.
pub type NativeFunc = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Wire tag identifying which payload a [`Value`] carries.
///
/// The discriminants are the native module's wire values and must not be
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ValueKind {
    /// No payload
    Nil = 0,
    /// Boolean payload
    Bool = 1,
    /// Signed 64-bit integer payload
    Int = 2,
    /// Unsigned 64-bit integer payload
    UInt = 3,
    /// 64-bit float payload
    Double = 4,
    /// UTF-8 string payload
    String = 5,
    /// Ordered sequence of nested values
    List = 6,
    /// String-keyed mapping as parallel key/value sequences
    Dict = 7,
    /// Native entity identity, resolved through the entity pool
    Entity = 8,
    /// Native function reference
    Function = 9,
}

/// A tagged wire value: one kind, one payload.
pub enum Value {
    /// Absence of a value
    Nil,
    /// Boolean
    Bool(bool),
    /// Signed integer (i32 targets truncate on decode)
    Int(i64),
    /// Unsigned integer (u32 targets truncate on decode)
    UInt(u64),
    /// Double-precision float
    Double(f64),
    /// String
    String(String),
    /// Nested list
    List(Vec<Value>),
    /// String-keyed dict as parallel sequences
    Dict {
        /// Keys, always textual in the wire format
        keys: Vec<String>,
        /// Values, index-aligned with `keys`
        values: Vec<Value>,
    },
    /// Entity identity (`EntityId(0)` is the null identity)
    Entity(EntityId),
    /// Callable native function reference
    Function(NativeFunc),
}

impl Value {
    /// The wire tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::UInt(_) => ValueKind::UInt,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Dict { .. } => ValueKind::Dict,
            Value::Entity(_) => ValueKind::Entity,
            Value::Function(_) => ValueKind::Function,
        }
    }

    /// Human-readable name of this value's kind.
    pub fn type_name(&self) -> &'static str {
        match self.kind() {
            ValueKind::Nil => "nil",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Dict => "dict",
            ValueKind::Entity => "entity",
            ValueKind::Function => "function",
        }
    }

    /// Check if this value is nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Build a dict value, panicking in debug builds on length skew.
    pub fn dict(keys: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Value::Dict { keys, values }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Nil => Value::Nil,
            Value::Bool(v) => Value::Bool(*v),
            Value::Int(v) => Value::Int(*v),
            Value::UInt(v) => Value::UInt(*v),
            Value::Double(v) => Value::Double(*v),
            Value::String(s) => Value::String(s.clone()),
            Value::List(items) => Value::List(items.clone()),
            Value::Dict { keys, values } => Value::Dict {
                keys: keys.clone(),
                values: values.clone(),
            },
            Value::Entity(id) => Value::Entity(*id),
            Value::Function(f) => Value::Function(Arc::clone(f)),
        }
    }
}

// Manual Debug: function payloads are opaque.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::UInt(v) => write!(f, "UInt({})", v),
            Value::Double(v) => write!(f, "Double({})", v),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Dict { keys, values } => f
                .debug_struct("Dict")
                .field("keys", keys)
                .field("values", values)
                .finish(),
            Value::Entity(id) => write!(f, "Entity({:?})", id),
            Value::Function(_) => write!(f, "Function(...)"),
        }
    }
}
