//! Combat Outcome Formatter
//!
//! Turns a combat `event` payload into narrative lines:
//!
//! 1. [`OutcomeFlags::derive`] works out what happened (miss, crit, ...)
//! 2. [`CombatFormatter`] lays the line out for the configured [`CombatStyle`]
//! 3. [`resolve_hint`] picks the color/shake hint for the line
//!
//! Participant names are resolved by the caller into [`Actor`]s so that the
//! formatter stays independent of client state.
//!
//! A server `narrative` (or `message`) replaces the generated sentence but
//! still gets the style decorations and hint.

use wyrdline_shared::messages::{FloatText, GameEvent};

use crate::config::{ClientSettings, CombatStyle};
use crate::narrative::{conjugate, NarrativeLine, PresentationHint};

/// Indentation of split-style effect lines.
const EFFECT_INDENT: &str = "    ";

/// The outcome booleans of one combat exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeFlags {
    pub miss: bool,
    pub critical: bool,
    pub glancing: bool,
    pub deflected: bool,
    pub penetrating: bool,
}

impl OutcomeFlags {
    /// Explicit booleans win. The `outcome` string is consulted for the four
    /// qualifiers only when none of the explicit booleans is true.
    pub fn derive(event: &GameEvent) -> Self {
        let outcome = event
            .outcome
            .as_deref()
            .map(|o| o.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let mut flags = Self {
            miss: matches!(outcome.as_str(), "miss" | "missed"),
            critical: event.critical == Some(true),
            glancing: event.glancing == Some(true),
            deflected: event.deflected == Some(true),
            penetrating: event.penetrating == Some(true),
        };

        if !flags.has_qualifier() {
            match outcome.as_str() {
                "crit" | "critical" => flags.critical = true,
                "glance" | "glancing" => flags.glancing = true,
                "deflected" | "deflect" => flags.deflected = true,
                "penetrating" | "pen" => flags.penetrating = true,
                _ => {}
            }
        }
        flags
    }

    pub fn has_qualifier(&self) -> bool {
        self.critical || self.glancing || self.deflected || self.penetrating
    }

    /// `[MISS][CRIT][PEN][DEFLECT][GLANCE]`, in that order, present tags only.
    pub fn tag_prefix(&self) -> String {
        [
            (self.miss, "MISS"),
            (self.critical, "CRIT"),
            (self.penetrating, "PEN"),
            (self.deflected, "DEFLECT"),
            (self.glancing, "GLANCE"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, tag)| format!("[{}]", tag))
        .collect()
    }

    /// ` [critical | penetrating]`, or empty when no qualifier is set.
    ///
    /// A miss is already carried by the verb and is not repeated here.
    pub fn summary_suffix(&self) -> String {
        let tags: Vec<&str> = [
            (self.critical, "critical"),
            (self.penetrating, "penetrating"),
            (self.deflected, "deflected"),
            (self.glancing, "glancing"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, tag)| *tag)
        .collect();

        if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(" | "))
        }
    }
}

/// One side of a combat exchange, already resolved to a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    pub is_local: bool,
}

impl Actor {
    pub fn local() -> Self {
        Self {
            name: "You".to_string(),
            is_local: true,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_local: false,
        }
    }

    /// Sentence-initial form.
    pub fn subject(&self) -> &str {
        if self.is_local {
            "You"
        } else {
            &self.name
        }
    }

    pub fn object(&self) -> &str {
        if self.is_local {
            "you"
        } else {
            &self.name
        }
    }
}

/// The two participants of an exchange. Either side may be unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actors {
    pub attacker: Option<Actor>,
    pub target: Option<Actor>,
}

/// Pick the color/shake hint for a combat line.
///
/// Target-side data is preferred when the local player is the target (or
/// `prefer_target` is set, as for deaths), attacker-side data when the local
/// player is the attacker; otherwise whichever side has data, attacker first.
pub fn resolve_hint(
    event: &GameEvent,
    actors: &Actors,
    prefer_target: bool,
) -> Option<PresentationHint> {
    let attacker_side = event.float_text.as_ref().and_then(hint_of);
    let target_side = event.float_text_target.as_ref().and_then(hint_of);

    let local_is_target = actors.target.as_ref().is_some_and(|a| a.is_local);
    let local_is_attacker = actors.attacker.as_ref().is_some_and(|a| a.is_local);

    if prefer_target || (local_is_target && !local_is_attacker) {
        target_side.or(attacker_side)
    } else {
        attacker_side.or(target_side)
    }
}

fn hint_of(float: &FloatText) -> Option<PresentationHint> {
    if !float.has_presentation() {
        return None;
    }
    Some(PresentationHint {
        color: float.color.clone(),
        shake: float.shake.unwrap_or(false),
    })
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.1}", amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatFormatter {
    style: CombatStyle,
    show_effects: bool,
    show_impact_effects: bool,
}

impl CombatFormatter {
    pub fn new(style: CombatStyle) -> Self {
        Self {
            style,
            show_effects: true,
            show_impact_effects: true,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self {
            style: settings.combat_style,
            show_effects: settings.show_effects,
            show_impact_effects: settings.show_impact_effects,
        }
    }

    pub fn with_effects(mut self, show_effects: bool, show_impact_effects: bool) -> Self {
        self.show_effects = show_effects;
        self.show_impact_effects = show_impact_effects;
        self
    }

    pub fn style(&self) -> CombatStyle {
        self.style
    }

    /// Lines for an attack-like exchange (hit, miss, ability use).
    pub fn format_exchange(&self, event: &GameEvent, actors: &Actors) -> Vec<NarrativeLine> {
        let flags = OutcomeFlags::derive(event);
        let sentence =
            server_sentence(event).unwrap_or_else(|| exchange_sentence(event, actors, &flags));
        let hint = resolve_hint(event, actors, false);
        self.decorate(sentence, &flags, event, hint)
    }

    /// Lines for a `combat_death` event.
    pub fn format_death(&self, event: &GameEvent, actors: &Actors) -> Vec<NarrativeLine> {
        let flags = OutcomeFlags::derive(event);
        let victim = actors.target.clone().unwrap_or_else(|| Actor::named("Someone"));
        let generated = match &actors.attacker {
            Some(killer) => format!(
                "{} {} {}.",
                killer.subject(),
                conjugate(killer.is_local, "slay", "slays"),
                victim.object()
            ),
            None => format!(
                "{} {}.",
                victim.subject(),
                conjugate(victim.is_local, "die", "dies")
            ),
        };
        let sentence = server_sentence(event).unwrap_or(generated);
        let hint = resolve_hint(event, actors, true);
        self.decorate(sentence, &flags, event, hint)
    }

    fn decorate(
        &self,
        sentence: String,
        flags: &OutcomeFlags,
        event: &GameEvent,
        hint: Option<PresentationHint>,
    ) -> Vec<NarrativeLine> {
        match self.style {
            CombatStyle::Compact => {
                vec![NarrativeLine::new(format!("{}{}", sentence, flags.summary_suffix()))
                    .with_hint(hint)]
            }
            CombatStyle::Tagged => {
                let prefix = flags.tag_prefix();
                let text = if prefix.is_empty() {
                    sentence
                } else {
                    format!("{} {}", prefix, sentence)
                };
                vec![NarrativeLine::new(text).with_hint(hint)]
            }
            CombatStyle::Split => {
                let mut lines = vec![NarrativeLine::new(format!(
                    "{}{}",
                    sentence,
                    flags.summary_suffix()
                ))
                .with_hint(hint)];
                let effects = [
                    (self.show_effects, event.float_text.as_ref()),
                    (self.show_impact_effects, event.float_text_target.as_ref()),
                ];
                for (enabled, float) in effects {
                    if let Some(text) = float.and_then(|f| f.text.as_deref()).filter(|_| enabled) {
                        lines.push(NarrativeLine::new(format!("{}{}", EFFECT_INDENT, text)));
                    }
                }
                lines
            }
        }
    }
}

/// The server's own wording, which replaces the generated sentence.
fn server_sentence(event: &GameEvent) -> Option<String> {
    event
        .narrative
        .as_deref()
        .or(event.message.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn exchange_sentence(event: &GameEvent, actors: &Actors, flags: &OutcomeFlags) -> String {
    let attacker = actors.attacker.clone().unwrap_or_else(|| Actor::named("Someone"));
    let target = actors.target.as_ref().map(Actor::object);
    let ability = event.ability();
    let subject = attacker.subject();
    let is_self = attacker.is_local;

    if flags.miss {
        let mut sentence = format!("{} {}", subject, conjugate(is_self, "miss", "misses"));
        if let Some(target) = target {
            sentence.push(' ');
            sentence.push_str(target);
        }
        if let Some(ability) = ability {
            sentence.push_str(&format!(" with {}", ability));
        }
        sentence.push('.');
        return sentence;
    }

    let mut sentence = match (ability, target) {
        (Some(ability), Some(target)) => format!(
            "{} {} {} on {}",
            subject,
            conjugate(is_self, "use", "uses"),
            ability,
            target
        ),
        (Some(ability), None) => {
            format!("{} {} {}", subject, conjugate(is_self, "use", "uses"), ability)
        }
        (None, Some(target)) => {
            format!("{} {} {}", subject, conjugate(is_self, "hit", "hits"), target)
        }
        (None, None) => format!("{} {}", subject, conjugate(is_self, "attack", "attacks")),
    };
    if let Some(amount) = event.amount.filter(|a| a.is_finite() && *a > 0.0) {
        sentence.push_str(&format!(" for {} damage", format_amount(amount)));
    }
    sentence.push('.');
    sentence
}
