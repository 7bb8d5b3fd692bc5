use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Emotion labels the companion keys its canned replies and playlists on.
///
/// Tags coming from the app are free text; anything outside this set is
/// looked up as [`Emotion::Neutral`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Emotion {
    Happy,
    Sad,
    Anxious,
    Angry,
    #[default]
    Neutral,
    Stressed,
}

impl Emotion {
    /// Resolves an optional free-text tag, defaulting to `Neutral`
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.trim().parse().ok()).unwrap_or_default()
    }
}

/// A prior turn of the conversation as the app sends it
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatTurn {
    /// `user` for the person, anything else is the assistant
    #[serde(alias = "sender")]
    pub role: String,
    #[serde(alias = "text")]
    pub content: String,
}

impl ChatTurn {
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role.trim().eq_ignore_ascii_case("user")
    }
}

/// Mood tracking summary attached by the app to Kintsugi conversations
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserMoodData {
    pub current_mood: Option<String>,
    #[serde(default)]
    pub recent_moods: Vec<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_emotion_from_tag() {
        assert_eq!(Emotion::from_tag(Some("sad")), Emotion::Sad);
        assert_eq!(Emotion::from_tag(Some("  ANXIOUS ")), Emotion::Anxious);
        assert_eq!(Emotion::from_tag(Some("melancholic")), Emotion::Neutral);
        assert_eq!(Emotion::from_tag(Some("")), Emotion::Neutral);
        assert_eq!(Emotion::from_tag(None), Emotion::Neutral);
    }

    #[test]
    fn test_emotion_labels() {
        let labels: Vec<&str> = Emotion::iter().map(Into::into).collect();
        assert_eq!(
            labels,
            vec!["happy", "sad", "anxious", "angry", "neutral", "stressed"]
        );
    }

    #[test]
    fn test_chat_turn_aliases() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"sender":"User","text":"hello"}"#).unwrap();
        assert!(turn.is_user());
        assert_eq!(turn.content, "hello");

        let turn: ChatTurn =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert!(!turn.is_user());
    }

    #[test]
    fn test_user_mood_data_defaults() {
        let data: UserMoodData = serde_json::from_str(r#"{"currentMood":"stressed"}"#).unwrap();
        assert_eq!(data.current_mood.as_deref(), Some("stressed"));
        assert!(data.recent_moods.is_empty());
        assert!(data.notes.is_none());
    }
}
