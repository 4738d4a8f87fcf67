//! Event-dispatch façade routing native events to compiled callbacks.
//!
//! Mechanical fan-out: the router keeps named subscriber lists and forwards
//! each event's wire arguments to every compiled [`Callback`] registered
//! under that name. Per-player events use the actor-prefixed invocation
//! convention. Subscriber return values are ignored by the router; results
//! only flow back through direct [`Callback::invoke`] calls.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::callback::Callback;
use crate::context::Context;
use crate::entity::EntityHandle;
use crate::value::Value;

/// Named event → subscriber fan-out.
#[derive(Debug, Default)]
pub struct EventRouter {
    handlers: FxHashMap<String, Vec<Arc<Callback>>>,
}

impl EventRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a compiled callback to an event name.
    pub fn on(&mut self, event: impl Into<String>, callback: Arc<Callback>) {
        self.handlers.entry(event.into()).or_default().push(callback);
    }

    /// Number of subscribers for an event.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }

    /// Dispatch an event with the plain convention.
    ///
    /// Unknown event names are a no-op. Every subscriber is invoked;
    /// per-subscriber mismatches degrade inside the callback itself.
    pub fn emit(&self, ctx: &Context, event: &str, args: &[Value]) {
        let Some(subscribers) = self.handlers.get(event) else {
            return;
        };
        debug!(event, subscribers = subscribers.len(), "dispatching event");
        for callback in subscribers {
            callback.invoke(ctx, args);
        }
    }

    /// Dispatch a per-player event with the actor-prefixed convention.
    ///
    /// Subscribers whose first parameter is not a player-capability entity
    /// silently produce `Nil`, consistent with direct invocation.
    pub fn emit_for_player(
        &self,
        ctx: &Context,
        event: &str,
        actor: Arc<dyn EntityHandle>,
        args: &[Value],
    ) {
        let Some(subscribers) = self.handlers.get(event) else {
            return;
        };
        debug!(event, subscribers = subscribers.len(), "dispatching player event");
        for callback in subscribers {
            callback.invoke_with_actor(ctx, Arc::clone(&actor), args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::ReturnKind;
    use crate::descriptor::ParamType;
    use crate::entity::{Capability, EntityKind};
    use crate::host::HostValue;
    use crate::testutil::{pool_with, TestEntity};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback(
        params: &[ParamType],
        counter: &'static AtomicUsize,
    ) -> Arc<Callback> {
        Arc::new(
            Callback::compile(params, ReturnKind::Void, move |_: &[HostValue]| {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            })
            .unwrap(),
        )
    }

    #[test]
    fn emit_reaches_every_subscriber() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let ctx = pool_with(&[]);
        let mut router = EventRouter::new();
        router.on("tick", counting_callback(&[ParamType::I64], &CALLS));
        router.on("tick", counting_callback(&[ParamType::I64], &CALLS));
        assert_eq!(router.subscriber_count("tick"), 2);

        router.emit(&ctx, "tick", &[Value::Int(1)]);
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_event_is_a_noop() {
        let ctx = pool_with(&[]);
        let router = EventRouter::new();
        router.emit(&ctx, "nobody-home", &[]);
        assert_eq!(router.subscriber_count("nobody-home"), 0);
    }

    #[test]
    fn player_event_prefixes_the_actor() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let ctx = pool_with(&[]);
        let mut router = EventRouter::new();
        router.on(
            "chat",
            counting_callback(
                &[ParamType::Entity(Capability::Player), ParamType::Str],
                &CALLS,
            ),
        );

        let actor = Arc::new(TestEntity::new(1, EntityKind::Player));
        router.emit_for_player(&ctx, "chat", actor, &[Value::String("hello".into())]);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn player_event_skips_non_player_signatures() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let ctx = pool_with(&[]);
        let mut router = EventRouter::new();
        // First parameter is a string, not a player entity.
        router.on("chat", counting_callback(&[ParamType::Str, ParamType::Str], &CALLS));

        let actor = Arc::new(TestEntity::new(1, EntityKind::Player));
        router.emit_for_player(&ctx, "chat", actor, &[Value::String("hello".into())]);
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }
}
