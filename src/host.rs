//! Decoded host-side values handed to user callbacks.
//!
//! [`HostValue`] is what a compiled callback's parameters look like after
//! the decode pipeline has run: primitives unwrapped, lists turned into
//! natively-typed arrays, dicts into string-keyed typed maps, entity
//! identities resolved to pool wrappers, and native function references
//! wrapped into callable [`FuncRef`] adapters.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::context::Context;
use crate::decode::decode_any;
use crate::encode::encode;
use crate::entity::EntityHandle;
use crate::value::{NativeFunc, Value};

/// A decoded host value.
pub enum HostValue {
    /// No value (nil on the wire, or a soft decode failure inside a container)
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// Double-precision float
    F64(f64),
    /// String
    Str(String),
    /// Typed array
    Array(HostArray),
    /// String-keyed typed map
    Map(HostMap),
    /// Resolved entity wrapper
    Entity(Arc<dyn EntityHandle>),
    /// Callable adapter over a native function reference
    Function(FuncRef),
}

impl HostValue {
    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => write!(f, "Null"),
            HostValue::Bool(v) => write!(f, "Bool({})", v),
            HostValue::I32(v) => write!(f, "I32({})", v),
            HostValue::I64(v) => write!(f, "I64({})", v),
            HostValue::U32(v) => write!(f, "U32({})", v),
            HostValue::U64(v) => write!(f, "U64({})", v),
            HostValue::F64(v) => write!(f, "F64({})", v),
            HostValue::Str(s) => write!(f, "Str({:?})", s),
            HostValue::Array(a) => f.debug_tuple("Array").field(a).finish(),
            HostValue::Map(m) => f.debug_tuple("Map").field(m).finish(),
            HostValue::Entity(e) => write!(f, "Entity({:?})", e.id()),
            HostValue::Function(_) => write!(f, "Function(...)"),
        }
    }
}

/// A natively-typed decoded array.
///
/// Primitive element targets decode without boxing; mismatched slots carry
/// the element kind's zero value. `Object` holds heterogeneous or complex
/// elements, with `Null` standing in for slots that failed validation.
#[derive(Debug)]
pub enum HostArray {
    /// `bool` elements, mismatches filled with `false`
    Bool(Vec<bool>),
    /// `i32` elements, mismatches filled with `0`
    I32(Vec<i32>),
    /// `i64` elements, mismatches filled with `0`
    I64(Vec<i64>),
    /// `u32` elements, mismatches filled with `0`
    U32(Vec<u32>),
    /// `u64` elements, mismatches filled with `0`
    U64(Vec<u64>),
    /// `f64` elements, mismatches filled with `0.0`
    F64(Vec<f64>),
    /// String elements, mismatches filled with `""`
    Str(Vec<String>),
    /// Boxed elements, failed slots become `Null`
    Object(Vec<HostValue>),
}

impl HostArray {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            HostArray::Bool(v) => v.len(),
            HostArray::I32(v) => v.len(),
            HostArray::I64(v) => v.len(),
            HostArray::U32(v) => v.len(),
            HostArray::U64(v) => v.len(),
            HostArray::F64(v) => v.len(),
            HostArray::Str(v) => v.len(),
            HostArray::Object(v) => v.len(),
        }
    }

    /// Check if the array is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A string-keyed decoded map.
///
/// Keys are always textual on the wire. Duplicate keys resolve last write
/// wins.
#[derive(Debug)]
pub enum HostMap {
    /// `bool` values
    Bool(FxHashMap<String, bool>),
    /// `i32` values
    I32(FxHashMap<String, i32>),
    /// `i64` values
    I64(FxHashMap<String, i64>),
    /// `u32` values
    U32(FxHashMap<String, u32>),
    /// `u64` values
    U64(FxHashMap<String, u64>),
    /// `f64` values
    F64(FxHashMap<String, f64>),
    /// String values
    Str(FxHashMap<String, String>),
    /// Boxed values, failed entries become `Null`
    Object(FxHashMap<String, HostValue>),
}

impl HostMap {
    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            HostMap::Bool(m) => m.len(),
            HostMap::I32(m) => m.len(),
            HostMap::I64(m) => m.len(),
            HostMap::U32(m) => m.len(),
            HostMap::U64(m) => m.len(),
            HostMap::F64(m) => m.len(),
            HostMap::Str(m) => m.len(),
            HostMap::Object(m) => m.len(),
        }
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Callable adapter over a native function reference.
///
/// Decoded from a `Function`-tagged wire value. Invoking it marshals the
/// host arguments back onto the wire, calls the native function
/// synchronously, and decodes its single result as an unconstrained value.
#[derive(Clone)]
pub struct FuncRef {
    native: NativeFunc,
}

impl FuncRef {
    /// Wrap a native function reference.
    pub fn new(native: NativeFunc) -> Self {
        Self { native }
    }

    /// Call the native function with positional host arguments.
    ///
    /// Arguments that fail to encode are dropped from the outgoing list
    /// rather than failing the call.
    pub fn call(&self, ctx: &Context, args: &[HostValue]) -> HostValue {
        let wire_args: Vec<Value> = args.iter().filter_map(encode).collect();
        let result = (self.native)(&wire_args);
        decode_any(&result, ctx)
    }

    /// The underlying native reference, for re-encoding.
    pub(crate) fn native(&self) -> &NativeFunc {
        &self.native
    }
}

impl fmt::Debug for FuncRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncRef").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_len() {
        assert_eq!(HostArray::I32(vec![1, 2, 3]).len(), 3);
        assert_eq!(HostArray::Object(vec![]).len(), 0);
        assert!(HostArray::Str(vec![]).is_empty());
    }

    #[test]
    fn map_len() {
        let mut m = FxHashMap::default();
        m.insert("a".to_string(), 1i64);
        assert_eq!(HostMap::I64(m).len(), 1);
        assert!(HostMap::Object(FxHashMap::default()).is_empty());
    }

    #[test]
    fn null_check() {
        assert!(HostValue::Null.is_null());
        assert!(!HostValue::Bool(false).is_null());
    }

    #[test]
    fn debug_hides_function_payload() {
        let func: NativeFunc = Arc::new(|_| Value::Nil);
        let rendered = format!("{:?}", HostValue::Function(FuncRef::new(func)));
        assert_eq!(rendered, "Function(...)");
    }
}
