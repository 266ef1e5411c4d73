//! String helpers for logging untrusted backend text.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// One-line preview of a model response for log messages.
///
/// Collapses all whitespace runs (including newlines) into single spaces,
/// then truncates.
pub fn preview(s: &str, max_len: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_len)
}
