//! Cleanup applied to raw model output before it reaches the app.

use std::sync::LazyLock;

use regex::Regex;

/// Emojis that count as an existing closing emoji
pub const CLOSING_EMOJIS: &[&str] = &[
    "💙", "💜", "💛", "🤍", "🌸", "🌿", "🌱", "✨", "🤗", "😊", "🫶", "🙏",
];

const ELLIPSIS: &str = "...";

static INSTRUCTION_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[/?INST\]|</?s>").expect("valid instruction token regex"));

static LEADING_SPEAKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:assistant|companion|kintsugi|ai|bot)\s*:\s*")
        .expect("valid speaker prefix regex")
});

static NEXT_TURN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:user|human)\s*:|\n\s*(?:assistant|companion|kintsugi|ai|bot)\s*:")
        .expect("valid next turn regex")
});

/// Turns raw model output into a display-ready reply.
///
/// Returns `None` when nothing usable is left after cleanup.
#[must_use]
pub fn polish(raw: &str, prompt: &str, max_chars: usize, closing_emoji: &str) -> Option<String> {
    let cleaned = clean_reply(raw, prompt);
    if cleaned.is_empty() {
        return None;
    }
    let fitted = truncate_at_sentence(&cleaned, max_chars);
    Some(ensure_closing_emoji(fitted, max_chars, closing_emoji))
}

/// Strips prompt echo, speaker labels and hallucinated follow-up turns
#[must_use]
pub fn clean_reply(raw: &str, prompt: &str) -> String {
    let mut text = raw.trim_start();

    let prompt = prompt.trim();
    if !prompt.is_empty() {
        if let Some(rest) = text.strip_prefix(prompt) {
            text = rest;
        }
    }

    let without_tokens = INSTRUCTION_TOKENS.replace_all(text, " ");
    let mut text: &str = &without_tokens;
    while let Some(found) = LEADING_SPEAKER.find(text) {
        text = &text[found.end()..];
    }

    if let Some(found) = NEXT_TURN.find(text) {
        text = &text[..found.start()];
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_matches('"').trim().to_string()
}

/// Caps `text` at `max_chars` characters.
///
/// Prefers the last sentence boundary inside the cap; without one the text
/// is cut at a word boundary and closed with an ellipsis.
#[must_use]
pub fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let window: String = text.chars().take(max_chars).collect();
    if let Some(idx) = window.rfind(|c| matches!(c, '.' | '!' | '?')) {
        // Punctuation is ASCII so idx + 1 is a char boundary
        let sentence = window[..=idx].trim();
        if sentence.chars().count() * 4 >= max_chars {
            return sentence.to_string();
        }
    }

    let budget = max_chars.saturating_sub(ELLIPSIS.len());
    let head: String = text.chars().take(budget).collect();
    let head = match head.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &head[..idx],
        _ => head.as_str(),
    };
    format!("{}{ELLIPSIS}", head.trim_end())
}

/// Appends `emoji` unless the text already has one of [`CLOSING_EMOJIS`], staying within `max_chars`
#[must_use]
pub fn ensure_closing_emoji(text: String, max_chars: usize, emoji: &str) -> String {
    if has_closing_emoji(&text) {
        return text;
    }

    let room = max_chars.saturating_sub(emoji.chars().count() + 1);
    let mut out = truncate_at_sentence(&text, room);
    out.push(' ');
    out.push_str(emoji);
    out
}

fn has_closing_emoji(text: &str) -> bool {
    CLOSING_EMOJIS.iter().any(|emoji| text.contains(emoji))
}
