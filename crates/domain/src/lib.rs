//! Wyrdline domain: the client-side mirror of server world state.
//!
//! Nothing in this crate performs I/O. The player crate feeds decoded server
//! messages into these aggregates and narrates what changed.

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    AllyStatus, EntityDirectory, PartyInvite, PartyMember, PartyRoster, PlayerPatch, PlayerState,
    ProximityChannel, ProximityChannelDelta, ProximityChannelSnapshot, ProximityRoster,
    ResolvedEntity, Target, DEFAULT_NAVIGATION_PRIORITY,
};
pub use common::Presence;
pub use entities::{Entity, PartialProximityEntity, ProximityEntity};
pub use error::DomainError;
pub use ids::EntityId;
pub use value_objects::{
    CombatPatch, CombatState, ContentRating, Gauge, MovementPatch, MovementState, Vector3, Vitals,
    ZoneState,
};
