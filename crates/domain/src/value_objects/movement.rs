//! Text-movement state: facing, pace and the exits currently available.

use serde::Serialize;

use crate::common::Presence;

/// Compass points in clockwise order, 45 degrees apart.
const COMPASS: [&str; 8] = [
    "north",
    "northeast",
    "east",
    "southeast",
    "south",
    "southwest",
    "west",
    "northwest",
];

/// Movement fields carried by a `textMovement` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovementPatch {
    pub heading: Presence<f64>,
    pub speed: Presence<String>,
    /// Only `Some` when the server sent the list
    pub available_directions: Option<Vec<String>>,
}

impl MovementPatch {
    pub fn is_empty(&self) -> bool {
        !self.heading.is_present()
            && !self.speed.is_present()
            && self.available_directions.is_none()
    }
}

/// Where the local player is facing and where they can go.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MovementState {
    /// Degrees, 0 = north, clockwise
    pub heading: Option<f64>,
    pub speed: Option<String>,
    pub available_directions: Vec<String>,
}

impl MovementState {
    pub fn apply(&mut self, patch: MovementPatch) {
        patch.heading.apply_to(&mut self.heading);
        patch.speed.apply_to(&mut self.speed);
        if let Some(directions) = patch.available_directions {
            self.available_directions = directions;
        }
    }

    /// Nearest compass point for the current heading.
    pub fn compass_heading(&self) -> Option<&'static str> {
        let heading = self.heading?;
        if !heading.is_finite() {
            return None;
        }
        let normalized = heading.rem_euclid(360.0);
        let index = ((normalized + 22.5) / 45.0) as usize % COMPASS.len();
        COMPASS.get(index).copied()
    }

    pub fn can_move(&self, direction: &str) -> bool {
        self.available_directions
            .iter()
            .any(|d| d.eq_ignore_ascii_case(direction.trim()))
    }
}
