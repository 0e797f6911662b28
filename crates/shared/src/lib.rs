//! Wyrdline Shared - wire protocol types consumed by the player
//!
//! This crate contains everything between a raw server frame and the domain:
//! - The envelope codec ([`parse_envelope`], [`IncomingMessage`])
//! - Typed per-kind payload models ([`ServerMessage`])
//! - Lenient field decoders used by those models
//!
//! # Design Principles
//!
//! 1. **Never fail on a field** - bad fields decode to their defaults
//! 2. **No business logic** - payloads only convert into domain records
//! 3. **Validated at the boundary** - handlers never touch raw JSON

pub mod envelope;
pub mod lenient;
pub mod messages;

pub use envelope::{parse_envelope, EnvelopeError, IncomingMessage};
pub use messages::{kinds, PayloadError, ServerMessage};
