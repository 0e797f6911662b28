//! Value objects: small immutable-by-convention records with no identity.

mod combat;
mod content_rating;
mod movement;
mod position;
mod vitals;
mod zone;

pub use combat::{CombatPatch, CombatState, Gauge};
pub use content_rating::ContentRating;
pub use movement::{MovementPatch, MovementState};
pub use position::Vector3;
pub use vitals::Vitals;
pub use zone::ZoneState;
