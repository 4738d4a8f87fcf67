//! Explicit runtime context for the conversion engine.
//!
//! Everything that needs entity-pool access receives a [`Context`] by
//! reference. It is constructed once at startup from the host's pool; there
//! is no ambient global state anywhere in the crate.

use std::sync::Arc;

use crate::entity::EntityPool;

/// Shared runtime context passed through the decode pipeline.
#[derive(Clone)]
pub struct Context {
    entity_pool: Arc<dyn EntityPool>,
}

impl Context {
    /// Build a context over the host's entity pool.
    pub fn new(entity_pool: Arc<dyn EntityPool>) -> Self {
        Self { entity_pool }
    }

    /// The entity pool collaborator.
    ///
    /// Read-through cache owned by the host; not guaranteed thread-safe
    /// beyond the single native-callback thread.
    pub fn entity_pool(&self) -> &dyn EntityPool {
        self.entity_pool.as_ref()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}
