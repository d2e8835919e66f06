//! Text helpers for notification bodies.

/// Take the first `max_chars` characters of `s`.
///
/// Counts `char`s, not bytes, so multi-byte text can never be cut on a
/// UTF-8 boundary. Returns the whole string when it is short enough.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
