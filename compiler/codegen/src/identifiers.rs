//! Identifier normalization for protocol tokens.

/// Converts a raw protocol token into a PascalCase identifier fragment.
///
/// Words are split on any non-alphanumeric separator and title-cased,
/// so `time_since_epoch`, `timeSinceEpoch`, and `time-since-epoch` all
/// normalize to `TimeSinceEpoch`.
///
/// A leading `-` marks a negative numeric literal used as an enum value
/// name (e.g. `-Infinity`, `-0` in `Runtime.UnserializableValue`); the
/// sign is stripped, the remainder normalized, and the word `Negative`
/// prefixed, since a bare identifier cannot start with `-`.
///
/// # Examples
/// ```
/// use codegen::identifiers::dehumanize;
/// assert_eq!(dehumanize("timeSinceEpoch"), "TimeSinceEpoch");
/// assert_eq!(dehumanize("address_bar"), "AddressBar");
/// assert_eq!(dehumanize("-Infinity"), "NegativeInfinity");
/// ```
pub fn dehumanize(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix('-') {
        return format!("Negative{}", dehumanize(rest));
    }

    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// Capitalize the first letter of a word, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
