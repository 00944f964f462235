//! Identifier normalization for rule-text matching.

/// Normalize a rules identifier for comparison.
///
/// Lowercases, drops punctuation, and collapses whitespace, so
/// `"Weapon Proficiency (Pistols)"` and `"weapon proficiency - pistols"`
/// compare equal.
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || matches!(ch, '-' | '_' | '/') {
            pending_space = true;
        }
    }
    out
}
