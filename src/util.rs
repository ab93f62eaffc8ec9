// src/util.rs — Shared utility functions

/// Truncate a string to at most `max_len` bytes on a UTF-8 boundary.
pub fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

/// One-line preview of a cell or message for status output: newlines
/// folded into spaces, cut to `max_len` bytes with a trailing "...".
pub fn preview(s: &str, max_len: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim();
    if flat.len() <= max_len {
        flat.to_string()
    } else {
        format!("{}...", truncate_str(flat, max_len))
    }
}
