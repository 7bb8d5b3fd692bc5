use std::fmt::Write as _;

use common_types::{ChatTurn, Emotion, UserMoodData};

use crate::inference::GenerationParameters;

/// How many prior turns are replayed into the prompt
pub const HISTORY_WINDOW: usize = 6;

/// Models behind the lenient companion endpoint
const COMPANION_MODELS: &[&str] = &["microsoft/DialoGPT-large"];

/// Models behind the Kintsugi endpoint, tried strictly in this order
const KINTSUGI_MODELS: &[&str] = &[
    "mistralai/Mistral-7B-Instruct-v0.2",
    "HuggingFaceH4/zephyr-7b-beta",
    "google/flan-t5-large",
];

/// The two voices the app can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    /// General wellness companion, never surfaces configuration errors
    Companion,
    /// Kintsugi guide, tries several models and reports missing credentials
    Kintsugi,
}

/// Request details a prompt is built from
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub message: &'a str,
    pub history: &'a [ChatTurn],
    pub emotion_tag: Option<&'a str>,
    pub mood_data: Option<&'a UserMoodData>,
}

impl Persona {
    /// Candidate models in the order they are attempted
    #[must_use]
    pub const fn models(self) -> &'static [&'static str] {
        match self {
            Self::Companion => COMPANION_MODELS,
            Self::Kintsugi => KINTSUGI_MODELS,
        }
    }

    /// Longest reply shown in the app, in characters
    #[must_use]
    pub const fn max_reply_chars(self) -> usize {
        match self {
            Self::Companion => 300,
            Self::Kintsugi => 400,
        }
    }

    #[must_use]
    pub const fn parameters(self) -> GenerationParameters {
        match self {
            Self::Companion => GenerationParameters {
                max_new_tokens: 100,
                temperature: 0.7,
                top_p: 0.9,
            },
            Self::Kintsugi => GenerationParameters {
                max_new_tokens: 150,
                temperature: 0.8,
                top_p: 0.92,
            },
        }
    }

    /// Speaker label the persona uses inside its prompt
    #[must_use]
    pub const fn speaker(self) -> &'static str {
        match self {
            Self::Companion => "Assistant",
            Self::Kintsugi => "Kintsugi",
        }
    }

    /// Emoji appended when a generated reply carries none
    #[must_use]
    pub const fn closing_emoji(self, emotion: Emotion) -> &'static str {
        match self {
            Self::Kintsugi => "✨",
            Self::Companion => match emotion {
                Emotion::Happy => "😊",
                Emotion::Sad => "💙",
                Emotion::Anxious => "🌿",
                Emotion::Angry => "🫶",
                Emotion::Neutral => "💛",
                Emotion::Stressed => "🌱",
            },
        }
    }

    #[must_use]
    pub fn build_prompt(self, ctx: &PromptContext<'_>) -> String {
        match self {
            Self::Companion => companion_prompt(ctx),
            Self::Kintsugi => kintsugi_prompt(ctx),
        }
    }
}

fn companion_prompt(ctx: &PromptContext<'_>) -> String {
    let mut prompt = String::from(
        "You are a warm, empathetic wellness companion. Answer in two or three short, \
         gentle sentences. Validate feelings, never judge, and never give medical advice.\n",
    );

    if let Some(tag) = ctx.emotion_tag.map(str::trim).filter(|t| !t.is_empty()) {
        writeln!(prompt, "The user is currently feeling {}.", single_line(tag)).ok();
    }

    push_history(&mut prompt, ctx.history, Persona::Companion.speaker());
    write!(
        prompt,
        "User: {}\n{}:",
        single_line(ctx.message),
        Persona::Companion.speaker()
    )
    .ok();
    prompt
}

fn kintsugi_prompt(ctx: &PromptContext<'_>) -> String {
    let mut prompt = String::from(
        "<s>[INST] You are Kintsugi, a compassionate wellness guide. Like the Japanese art of \
         mending broken pottery with gold, you help people see their struggles as part of a \
         story worth honouring. Reply in at most four warm, encouraging sentences.\n",
    );

    if let Some(mood) = ctx.mood_data {
        if let Some(summary) = mood_summary(mood) {
            writeln!(prompt, "Mood context: {summary}").ok();
        }
    }

    push_history(&mut prompt, ctx.history, Persona::Kintsugi.speaker());
    write!(prompt, "User: {} [/INST]", single_line(ctx.message)).ok();
    prompt
}

/// One-line summary of what the app knows about the user's mood
fn mood_summary(mood: &UserMoodData) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(current) = mood.current_mood.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        parts.push(format!("currently feeling {}", single_line(current)));
    }
    if !mood.recent_moods.is_empty() {
        let recent: Vec<String> = mood
            .recent_moods
            .iter()
            .rev()
            .take(5)
            .map(|m| single_line(m))
            .collect();
        parts.push(format!("recently {}", recent.join(", ")));
    }
    if let Some(notes) = mood.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        parts.push(format!("notes: {}", single_line(notes)));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn push_history(prompt: &mut String, history: &[ChatTurn], speaker: &str) {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    for turn in &history[start..] {
        let content = single_line(&turn.content);
        if content.is_empty() {
            continue;
        }
        let who = if turn.is_user() { "User" } else { speaker };
        writeln!(prompt, "{who}: {content}").ok();
    }
}

/// Flattens user text so it cannot open a new speaker line in the prompt
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
