/// Normalize a raw skill name into its registry key
///
/// Lowercases, turns the separators `-`, `_` and `/` into spaces, drops every
/// other punctuation character and collapses runs of whitespace.
///
/// `"  Node.js / React "` becomes `"nodejs react"`.
pub fn normalize_skill_name(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());

    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            cleaned.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || matches!(ch, '-' | '_' | '/') {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split an already normalized name into tokens
#[inline]
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}
