//! Value-marshaling core bridging a native game host to Rust callback code.
//!
//! The native host speaks in tagged wire values ([`Value`]); user callbacks
//! speak in typed host values ([`HostValue`]). This crate converts between
//! the two without any runtime type inspection on the hot path: a callback's
//! declared signature is compiled once at registration into an immutable
//! per-parameter decode pipeline ([`Callback`]), and every native invocation
//! just runs the precompiled converters.
//!
//! Failures at call time never raise. Tag mismatches, capability mismatches
//! and arity skew all degrade to null values or a `Nil` result, because the
//! native caller cannot observe a typed error across the boundary. The only
//! hard rejection is at registration: a signature containing a type the
//! marshaler cannot handle is refused with a [`SignatureError`].
//!
//! ```
//! use std::sync::Arc;
//! use hostbridge::{
//!     Callback, Context, EntityHandle, EntityId, EntityPool, HostValue,
//!     ParamType, ReturnKind, Value,
//! };
//!
//! struct EmptyPool;
//! impl EntityPool for EmptyPool {
//!     fn get_or_create(&self, _id: EntityId) -> Option<Arc<dyn EntityHandle>> {
//!         None
//!     }
//! }
//!
//! let ctx = Context::new(Arc::new(EmptyPool));
//! let cb = Callback::compile(
//!     &[ParamType::Str, ParamType::I64],
//!     ReturnKind::Value,
//!     |args: &[HostValue]| match (&args[0], &args[1]) {
//!         (HostValue::Str(s), HostValue::I64(n)) => {
//!             Some(HostValue::Str(format!("{s}:{n}")))
//!         }
//!         _ => None,
//!     },
//! )
//! .unwrap();
//!
//! let result = cb.invoke(&ctx, &[Value::String("score".into()), Value::Int(3)]);
//! assert!(matches!(result, Value::String(s) if s == "score:3"));
//! ```

#![warn(missing_docs)]

pub mod callback;
pub mod context;
pub mod convert;
pub mod decode;
pub mod descriptor;
pub mod encode;
pub mod entity;
pub mod error;
pub mod events;
pub mod host;
pub mod value;

pub use callback::{Callback, CallbackHandler, ReturnKind};
pub use context::Context;
pub use convert::{FromValue, IntoValue};
pub use decode::decode_any;
pub use descriptor::{Container, ParamClass, ParamType, TypeDescriptor};
pub use encode::encode;
pub use entity::{
    Capability, EntityHandle, EntityId, EntityKind, EntityPool, validate_entity_kind,
};
pub use error::SignatureError;
pub use events::EventRouter;
pub use host::{FuncRef, HostArray, HostMap, HostValue};
pub use value::{NativeFunc, Value, ValueKind};

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fixtures for unit tests: a fixed-contents entity pool.

    use std::sync::Arc;

    use crate::context::Context;
    use crate::entity::{EntityHandle, EntityId, EntityKind, EntityPool};

    pub struct TestEntity {
        id: EntityId,
        kind: EntityKind,
    }

    impl TestEntity {
        pub fn new(id: u64, kind: EntityKind) -> Self {
            Self {
                id: EntityId(id),
                kind,
            }
        }
    }

    impl EntityHandle for TestEntity {
        fn kind(&self) -> EntityKind {
            self.kind
        }

        fn id(&self) -> EntityId {
            self.id
        }
    }

    struct TestPool {
        entities: Vec<Arc<dyn EntityHandle>>,
    }

    impl EntityPool for TestPool {
        fn get_or_create(&self, id: EntityId) -> Option<Arc<dyn EntityHandle>> {
            self.entities.iter().find(|e| e.id() == id).map(Arc::clone)
        }
    }

    /// A context over a pool pre-seeded with the given entities.
    pub fn pool_with(entities: &[TestEntity]) -> Context {
        let entities = entities
            .iter()
            .map(|e| Arc::new(TestEntity::new(e.id.0, e.kind)) as Arc<dyn EntityHandle>)
            .collect();
        Context::new(Arc::new(TestPool { entities }))
    }
}
