//! Entities - records with a server-assigned identity.

mod entity;
mod proximity;

pub use entity::Entity;
pub use proximity::{PartialProximityEntity, ProximityEntity};
