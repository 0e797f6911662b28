//! Narrative lines and the text helpers that build them
//!
//! A [`NarrativeLine`] is what the rendering layer draws: plain text plus an
//! optional presentation hint (color, screen shake) derived from the payload.

use std::fmt;

use serde::Serialize;

/// Color/shake hint attached to a combat line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PresentationHint {
    pub color: Option<String>,
    pub shake: bool,
}

impl PresentationHint {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && !self.shake
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    #[default]
    Narrative,
    /// Client-side notes about unusable or unknown input
    Diagnostic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeLine {
    pub text: String,
    pub kind: LineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<PresentationHint>,
}

impl NarrativeLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LineKind::Narrative,
            hint: None,
        }
    }

    pub fn diagnostic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LineKind::Diagnostic,
            hint: None,
        }
    }

    /// Attach a hint; empty hints are dropped.
    pub fn with_hint(mut self, hint: Option<PresentationHint>) -> Self {
        self.hint = hint.filter(|h| !h.is_empty());
        self
    }

    pub fn is_diagnostic(&self) -> bool {
        self.kind == LineKind::Diagnostic
    }
}

impl fmt::Display for NarrativeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Greedy word wrap. Existing newlines are kept as paragraph breaks.
///
/// A single word longer than `width` gets a line of its own and is not split.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }

    // Trailing blank paragraphs carry nothing
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Render a speech message for its channel.
///
/// `sender` is `None` for the local player, rendered as "You".
pub fn phrase_speech(
    channel: &str,
    sender: Option<&str>,
    target: Option<&str>,
    text: &str,
) -> String {
    let is_self = sender.is_none();
    let who = sender.unwrap_or("You");

    match channel {
        "say" => format!("{} {}, {}", who, conjugate(is_self, "say", "says"), text),
        "shout" | "yell" => format!("{} {}, {}", who, conjugate(is_self, "shout", "shouts"), text),
        "whisper" | "tell" => match (is_self, target) {
            (true, Some(target)) => format!("You whisper to {}, {}", target, text),
            (true, None) => format!("You whisper, {}", text),
            (false, _) => format!("{} whispers to you, {}", who, text),
        },
        "emote" | "me" => format!("{} {}", who, text),
        "party" => format!("[Party] {}: {}", who, text),
        other => format!("[{}] {}: {}", capitalize(other), who, text),
    }
}

/// `first` for the local player, `third` for anyone else.
pub fn conjugate<'a>(is_self: bool, first: &'a str, third: &'a str) -> &'a str {
    if is_self {
        first
    } else {
        third
    }
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join names as "A", "A and B", "A, B and C".
pub fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
