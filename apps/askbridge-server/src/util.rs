//! Small helpers shared by the page handlers.

/// Longest document excerpt interpolated into a chat prompt.
pub(crate) const CONTEXT_CHAR_LIMIT: usize = 4000;

/// Reduce an uploaded filename to its final component and a conservative
/// character set before it becomes a storage path.
pub(crate) fn sanitize_file_name(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .trim_start_matches('.');
    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Clip text to the context limit on a char boundary.
pub(crate) fn clip_context(text: &str) -> &str {
    match text.char_indices().nth(CONTEXT_CHAR_LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub(crate) fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
