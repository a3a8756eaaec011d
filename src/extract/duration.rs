use regex::Regex;
use std::sync::LazyLock;

/// `N hr(s)`, optional `and`, `N min(s)`; each part optional
static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(\d+)\s*hrs?)?\s*(?:and\s*)?(?:(\d+)\s*mins?)?")
        .expect("Invalid duration regex")
});

/// Parses a display duration into total minutes
///
/// Returns `None` when the text names neither hours nor minutes, or when the
/// numbers overflow.
///
/// # Examples
///
/// ```
/// use audiobook_bestsellers::extract::parse_duration;
///
/// assert_eq!(parse_duration("3 hrs and 20 mins"), Some(200));
/// assert_eq!(parse_duration("0 mins"), Some(0));
/// assert_eq!(parse_duration("garbage"), None);
/// ```
pub fn parse_duration(text: &str) -> Option<u32> {
    let captures = DURATION_REGEX
        .captures_iter(text)
        .find(|c| c.get(1).is_some() || c.get(2).is_some())?;

    let hours = match captures.get(1) {
        Some(m) => m.as_str().parse::<u32>().ok()?,
        None => 0,
    };
    let minutes = match captures.get(2) {
        Some(m) => m.as_str().parse::<u32>().ok()?,
        None => 0,
    };

    hours.checked_mul(60)?.checked_add(minutes)
}

/// Total minutes of a display duration, 0 when it cannot be read
///
/// A 0 here means either "unknown" or "truly zero"; use [`parse_duration`]
/// to tell them apart.
pub fn duration_minutes(text: &str) -> u32 {
    parse_duration(text).unwrap_or(0)
}
