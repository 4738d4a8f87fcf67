//! Entity identities, kinds, and the pool boundary.
//!
//! The conversion engine never owns game-world objects. It sees an opaque
//! [`EntityId`] on the wire and resolves it through the [`EntityPool`]
//! collaborator, a read-through cache supplied by the embedding host. The
//! pool is not assumed thread-safe; concurrent use must be serialized by the
//! caller.

use std::sync::Arc;

/// Opaque native identity of a game-world object.
///
/// `EntityId(0)` is the null identity and decodes to a null host value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(
    /// Raw native identity value
    pub u64,
);

impl EntityId {
    /// The null identity.
    pub const NULL: EntityId = EntityId(0);

    /// Check if this is the null identity.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Concrete kind of a resolved entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A connected player
    Player,
    /// A vehicle
    Vehicle,
    /// A map blip
    Blip,
    /// A checkpoint volume
    Checkpoint,
    /// A voice channel
    VoiceChannel,
    /// A collision shape
    ColShape,
}

/// Entity-kind category a decode target may require.
///
/// `Any` accepts every entity; the named capabilities require the resolved
/// entity's kind to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capability {
    /// Unconstrained target, accepts any entity
    #[default]
    Any,
    /// Requires a player
    Player,
    /// Requires a vehicle
    Vehicle,
    /// Requires a blip
    Blip,
    /// Requires a checkpoint
    Checkpoint,
}

/// Validate a resolved entity's kind against a requested capability.
pub fn validate_entity_kind(kind: EntityKind, capability: Capability) -> bool {
    match capability {
        Capability::Any => true,
        Capability::Player => kind == EntityKind::Player,
        Capability::Vehicle => kind == EntityKind::Vehicle,
        Capability::Blip => kind == EntityKind::Blip,
        Capability::Checkpoint => kind == EntityKind::Checkpoint,
    }
}

/// A managed wrapper around one native entity.
pub trait EntityHandle: Send + Sync {
    /// The concrete kind of this entity.
    fn kind(&self) -> EntityKind;

    /// The native identity this wrapper stands for.
    fn id(&self) -> EntityId;
}

/// Read-through cache resolving native identities to managed wrappers.
///
/// Supplied by the host; the conversion engine only consumes it. `None`
/// means the identity is unknown to the pool, which decodes to a null host
/// value rather than an error.
pub trait EntityPool: Send + Sync {
    /// Resolve an identity, creating the wrapper on first sight.
    fn get_or_create(&self, id: EntityId) -> Option<Arc<dyn EntityHandle>>;
}
