//! Wyrdline Player
//!
//! Consumes server frames, mirrors the world they describe and turns each
//! frame into narrative lines for the rendering layer.
//!
//! The host owns a [`MessageRouter`] and feeds it one frame at a time. The
//! router never blocks and never fails; output goes either back to the
//! caller as a `Vec<NarrativeLine>` or into a [`NarrativeSink`].

pub mod combat;
pub mod config;
mod handlers;
pub mod narrative;
pub mod ports;
pub mod router;
pub mod state;

#[cfg(test)]
mod e2e_tests;

pub use combat::{CombatFormatter, OutcomeFlags};
pub use config::{ClientSettings, CombatStyle};
pub use narrative::{LineKind, NarrativeLine, PresentationHint};
pub use ports::{NarrativeSink, WriterSink};
pub use router::MessageRouter;
pub use state::{ClientSnapshot, ClientState};
