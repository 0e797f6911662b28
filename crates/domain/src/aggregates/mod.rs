//! Aggregates - state the client owns and mutates as messages arrive
//!
//! Each aggregate:
//! - Owns its constituent records (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Reports what changed from mutations so callers can narrate it
//!
//! All mutation happens on one thread; readers get owned snapshots.

pub mod entity_directory;
pub mod party;
pub mod player;
pub mod proximity_roster;

pub use entity_directory::{EntityDirectory, ResolvedEntity, Target};
pub use party::{AllyStatus, PartyInvite, PartyMember, PartyRoster};
pub use player::{PlayerPatch, PlayerState};
pub use proximity_roster::{
    ProximityChannel, ProximityChannelDelta, ProximityChannelSnapshot, ProximityRoster,
    DEFAULT_NAVIGATION_PRIORITY,
};
