//! Combat status block.
//!
//! The server streams combat state as partial patches: a `state_update` may
//! carry only the turn gauge, only the in-combat flag, and so on. Every field
//! of [`CombatPatch`] is a [`Presence`] so that an omitted field never resets
//! what is already known.

use serde::{Deserialize, Serialize};

use crate::common::Presence;

/// A `{current, max}` progress gauge (turn gauge, auto-attack swing, vitals).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gauge {
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub max: f64,
}

impl Gauge {
    pub const fn new(current: f64, max: f64) -> Self {
        Self { current, max }
    }

    /// Fill ratio clamped to `0.0..=1.0`; an empty max reads as empty.
    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn is_full(&self) -> bool {
        self.max > 0.0 && self.current >= self.max
    }
}

/// Incoming combat fields, each independently provided or not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombatPatch {
    pub atb: Presence<Gauge>,
    pub auto_attack: Presence<Gauge>,
    pub in_combat: Presence<bool>,
    pub auto_attack_target: Presence<String>,
}

impl CombatPatch {
    pub fn is_empty(&self) -> bool {
        !self.atb.is_present()
            && !self.auto_attack.is_present()
            && !self.in_combat.is_present()
            && !self.auto_attack_target.is_present()
    }
}

/// Current combat status of the local player.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CombatState {
    /// Turn gauge (ATB)
    pub atb: Option<Gauge>,
    /// Auto-attack swing progress
    pub auto_attack: Option<Gauge>,
    pub in_combat: bool,
    pub auto_attack_target_id: Option<String>,
}

impl CombatState {
    /// Apply only the provided fields of `patch`.
    ///
    /// Returns `true` when the in-combat flag flipped.
    pub fn apply(&mut self, patch: CombatPatch) -> bool {
        let was_in_combat = self.in_combat;

        patch.atb.apply_to(&mut self.atb);
        patch.auto_attack.apply_to(&mut self.auto_attack);
        match patch.in_combat {
            Presence::Value(flag) => self.in_combat = flag,
            Presence::Null => self.in_combat = false,
            Presence::Absent => {}
        }
        patch
            .auto_attack_target
            .apply_to(&mut self.auto_attack_target_id);

        was_in_combat != self.in_combat
    }

    /// Force the in-combat flag (combat start/end events).
    ///
    /// Returns `true` when the flag flipped.
    pub fn set_in_combat(&mut self, in_combat: bool) -> bool {
        let changed = self.in_combat != in_combat;
        self.in_combat = in_combat;
        if !in_combat {
            self.auto_attack = None;
        }
        changed
    }

    /// Forget the auto-attack target if it points at `id`.
    pub fn forget_target(&mut self, id: &str) {
        if self
            .auto_attack_target_id
            .as_deref()
            .is_some_and(|target| target.eq_ignore_ascii_case(id))
        {
            self.auto_attack_target_id = None;
        }
    }
}
