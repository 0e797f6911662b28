//! Common utilities shared by the domain aggregates and the wire layer.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Lenient by default** - blank and absent are interchangeable

pub mod presence;
pub mod string;

pub use presence::Presence;
pub use string::{none_if_blank, prefer_non_blank, some_if_not_blank, StringExt};
