//! Scrubbing for free text and contact details before they leave the engine.

use std::sync::OnceLock;

use regex::Regex;

use super::validation::is_valid_email;

static EVENT_HANDLER: OnceLock<Option<Regex>> = OnceLock::new();

fn event_handler_pattern() -> Option<&'static Regex> {
    EVENT_HANDLER
        .get_or_init(|| Regex::new(r#"(?i)on\w+\s*=\s*["']?[^"']*["']?"#).ok())
        .as_ref()
}

/// Truncate to `max_chars`, escape HTML, drop inline event handlers, trim.
pub fn sanitize_text(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let truncated: String = text.chars().take(max_chars).collect();
    let escaped = html_escape::encode_quoted_attribute(&truncated).into_owned();
    let stripped = match event_handler_pattern() {
        Some(pattern) => pattern.replace_all(&escaped, "").into_owned(),
        None => escaped,
    };

    stripped.trim().to_string()
}

/// Lowercased and trimmed, or empty when it is not an address.
pub fn sanitize_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    if is_valid_email(&normalized) {
        normalized
    } else {
        String::new()
    }
}

pub fn sanitize_phone(phone: &str) -> Option<String> {
    let kept: String = phone
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '+' | '(' | ')'))
        .collect();
    let kept = kept.trim();
    (!kept.is_empty()).then(|| kept.to_string())
}
