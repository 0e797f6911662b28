//! Client settings passed to the router at construction
//!
//! Settings are plain data. [`ClientSettings::from_env`] is the only place
//! that reads the process environment; everything else receives a value.

use std::str::FromStr;

use wyrdline_domain::DEFAULT_NAVIGATION_PRIORITY;

/// Zone descriptions wrap at this column unless configured otherwise.
pub const DEFAULT_WRAP_WIDTH: usize = 78;

/// Narrower widths make wrapped text unreadable; smaller values are clamped.
const MIN_WRAP_WIDTH: usize = 20;

/// How combat event lines are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombatStyle {
    /// Trailing `[tag | tag]` summary
    #[default]
    Compact,
    /// Leading `[MISS][CRIT]...` prefix
    Tagged,
    /// Compact main line plus indented effect lines
    Split,
}

impl std::fmt::Display for CombatStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatStyle::Compact => write!(f, "compact"),
            CombatStyle::Tagged => write!(f, "tagged"),
            CombatStyle::Split => write!(f, "split"),
        }
    }
}

impl FromStr for CombatStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(CombatStyle::Compact),
            "tagged" | "tags" => Ok(CombatStyle::Tagged),
            "split" => Ok(CombatStyle::Split),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Emit diagnostic lines for unknown kinds and unhandled events
    pub diagnostics: bool,
    pub combat_style: CombatStyle,
    /// Attacker-side effect lines in split style
    pub show_effects: bool,
    /// Target-side effect lines in split style
    pub show_impact_effects: bool,
    pub wrap_width: usize,
    /// Proximity channels used for navigation, highest priority first
    pub navigation_priority: Vec<String>,
    /// Name that identifies the local player before the server says who we are
    pub local_name: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            diagnostics: false,
            combat_style: CombatStyle::Compact,
            show_effects: true,
            show_impact_effects: true,
            wrap_width: DEFAULT_WRAP_WIDTH,
            navigation_priority: DEFAULT_NAVIGATION_PRIORITY
                .iter()
                .map(|name| name.to_string())
                .collect(),
            local_name: None,
        }
    }
}

impl ClientSettings {
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_combat_style(mut self, style: CombatStyle) -> Self {
        self.combat_style = style;
        self
    }

    pub fn with_effects(mut self, show_effects: bool, show_impact_effects: bool) -> Self {
        self.show_effects = show_effects;
        self.show_impact_effects = show_impact_effects;
        self
    }

    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width.max(MIN_WRAP_WIDTH);
        self
    }

    /// Load settings from `WYRDLINE_*` environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WYRDLINE_DIAGNOSTICS` - Show diagnostic lines (default: false)
    /// - `WYRDLINE_COMBAT_STYLE` - `compact`, `tagged` or `split` (default: compact)
    /// - `WYRDLINE_SHOW_EFFECTS` - Attacker effect lines (default: true)
    /// - `WYRDLINE_SHOW_IMPACT_EFFECTS` - Target effect lines (default: true)
    /// - `WYRDLINE_WRAP_WIDTH` - Zone text wrap column (default: 78)
    /// - `WYRDLINE_NAV_PRIORITY` - Comma-separated channels (default: say,shout,see)
    /// - `WYRDLINE_LOCAL_NAME` - Local character name (optional)
    ///
    /// Missing or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let combat_style = match lookup("WYRDLINE_COMBAT_STYLE") {
            Some(raw) => raw.parse().unwrap_or_else(|()| {
                tracing::warn!(value = %raw, "WYRDLINE_COMBAT_STYLE not recognized, using compact");
                defaults.combat_style
            }),
            None => defaults.combat_style,
        };

        let navigation_priority = lookup("WYRDLINE_NAV_PRIORITY")
            .map(|raw| {
                raw.split(',')
                    .map(|name| name.trim().to_ascii_lowercase())
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|channels| !channels.is_empty())
            .unwrap_or(defaults.navigation_priority);

        let wrap_width = lookup("WYRDLINE_WRAP_WIDTH")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .map(|width| width.max(MIN_WRAP_WIDTH))
            .unwrap_or(defaults.wrap_width);

        Self {
            diagnostics: flag(&lookup, "WYRDLINE_DIAGNOSTICS", defaults.diagnostics),
            combat_style,
            show_effects: flag(&lookup, "WYRDLINE_SHOW_EFFECTS", defaults.show_effects),
            show_impact_effects: flag(
                &lookup,
                "WYRDLINE_SHOW_IMPACT_EFFECTS",
                defaults.show_impact_effects,
            ),
            wrap_width,
            navigation_priority,
            local_name: lookup("WYRDLINE_LOCAL_NAME")
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                tracing::warn!(key, value = %raw, "Not a boolean, ignoring");
                default
            }
        },
        None => default,
    }
}
