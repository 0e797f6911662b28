//! Health, stamina and mana of the local character.

use serde::Serialize;

use super::Gauge;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vitals {
    pub health: Option<Gauge>,
    pub stamina: Option<Gauge>,
    pub mana: Option<Gauge>,
}

impl Vitals {
    /// Overlay the gauges present on `update`; missing gauges are kept.
    pub fn merge(&mut self, update: Vitals) {
        if update.health.is_some() {
            self.health = update.health;
        }
        if update.stamina.is_some() {
            self.stamina = update.stamina;
        }
        if update.mana.is_some() {
            self.mana = update.mana;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.health.is_none() && self.stamina.is_none() && self.mana.is_none()
    }
}
