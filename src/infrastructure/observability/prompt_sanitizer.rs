const MAX_VISIBLE_CHARS: usize = 100;

const REDACTED_PREFIXES: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Sanitizes user-supplied text (URLs, custom system messages) for safe
/// logging: trims, truncates, and redacts credential-looking values.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let visible = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((cut, _)) => format!(
            "{}... ({} chars total)",
            &trimmed[..cut],
            trimmed.chars().count()
        ),
        None => trimmed.to_string(),
    };

    redact_credentials(&visible)
}

fn redact_credentials(text: &str) -> String {
    let mut result = text.to_string();

    for prefix in REDACTED_PREFIXES {
        if let Some(start) = result.find(prefix) {
            let value_start = start + prefix.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map_or(result.len(), |i| value_start + i);
            result.replace_range(value_start..value_end, "[REDACTED]");
        }
    }

    result
}
