use oratio::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_input_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_input_when_sanitizing_then_returns_unchanged() {
    let url = "https://example.com/audio/sample.mp3";
    assert_eq!(sanitize_prompt(url), url);
}

#[test]
fn given_long_input_when_sanitizing_then_truncates_with_length() {
    let message = "a".repeat(150);
    let result = sanitize_prompt(&message);
    assert!(result.contains("... (150 chars total)"));
    assert!(result.starts_with(&"a".repeat(100)));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_it() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz");
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_api_key_in_query_when_sanitizing_then_redacts_it() {
    let result = sanitize_prompt("https://example.com/audio.mp3?api_key=secret123&b=1");
    assert!(result.contains("api_key=[REDACTED]"));
    assert!(!result.contains("secret123"));
}

#[test]
fn given_padded_input_when_sanitizing_then_trims() {
    assert_eq!(sanitize_prompt("  hello world  "), "hello world");
}
