//! Per-kind message handlers
//!
//! Each handler receives an already-decoded payload, applies its mutations
//! to [`ClientState`] and returns the narrative lines for the message, in
//! display order. Handlers never fail: anything unusable becomes a default
//! or a single diagnostic line.

pub(crate) mod chat;
pub(crate) mod events;
pub(crate) mod roster;
pub(crate) mod session;
pub(crate) mod world;

use crate::combat::CombatFormatter;
use crate::config::ClientSettings;
use crate::narrative::NarrativeLine;
use crate::state::ClientState;

/// Everything a handler may read or mutate.
pub(crate) struct HandlerContext<'a> {
    pub state: &'a mut ClientState,
    pub settings: &'a ClientSettings,
    pub formatter: &'a CombatFormatter,
}

impl HandlerContext<'_> {
    /// A diagnostic line, or nothing when diagnostics are off.
    pub fn gated_diagnostic(&self, text: impl Into<String>) -> Option<NarrativeLine> {
        let text = text.into();
        if self.settings.diagnostics {
            Some(NarrativeLine::diagnostic(text))
        } else {
            tracing::debug!(%text, "Diagnostic suppressed");
            None
        }
    }
}
