//! String conversion utilities.

/// Converts a blank string (empty or whitespace only) to `None`, otherwise
/// returns `Some(value)`.
///
/// Servers routinely send `""` for "unknown", so blank and absent are treated
/// the same everywhere a record is merged.
///
/// # Examples
///
/// ```
/// use wyrdline_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("Warden"), Some("Warden"));
/// assert_eq!(none_if_blank(""), None);
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Converts a blank `String` to `None`, otherwise returns `Some(value)`.
///
/// Owned version of [`none_if_blank`].
///
/// # Examples
///
/// ```
/// use wyrdline_domain::common::some_if_not_blank;
///
/// assert_eq!(some_if_not_blank("npc".to_string()), Some("npc".to_string()));
/// assert_eq!(some_if_not_blank(" ".to_string()), None);
/// ```
pub fn some_if_not_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Extension trait for strings providing `into_option` as a method.
///
/// # Examples
///
/// ```
/// use wyrdline_domain::common::StringExt;
///
/// assert_eq!("Aria".to_string().into_option(), Some("Aria".to_string()));
/// assert_eq!(String::new().into_option(), None);
/// ```
pub trait StringExt {
    /// Converts this string to `None` if blank, otherwise `Some(self)`.
    fn into_option(self) -> Option<String>;
}

impl StringExt for String {
    fn into_option(self) -> Option<String> {
        some_if_not_blank(self)
    }
}

/// Returns `incoming` unless it is blank, in which case `existing` is kept.
pub fn prefer_non_blank(incoming: String, existing: &str) -> String {
    if incoming.trim().is_empty() {
        existing.to_string()
    } else {
        incoming
    }
}
