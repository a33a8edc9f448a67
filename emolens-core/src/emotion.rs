//! Emotion labels and classification readings

use serde::{Deserialize, Serialize};

/// Emotion categories recognized by the classification service
///
/// `Unknown` is the sentinel used whenever no valid classification is
/// available (no request yet, transport failure, or an unrecognized label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprised,
    Scared,
    Disgusted,
    Neutral,
    Unknown,
}

impl Emotion {
    /// Parse a service label, case-insensitively; anything unrecognized
    /// maps to `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "happy" | "happiness" => Emotion::Happy,
            "sad" | "sadness" => Emotion::Sad,
            "angry" | "anger" => Emotion::Angry,
            "surprised" | "surprise" => Emotion::Surprised,
            "scared" | "fear" | "fearful" => Emotion::Scared,
            "disgusted" | "disgust" => Emotion::Disgusted,
            "neutral" => Emotion::Neutral,
            _ => Emotion::Unknown,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
            Emotion::Scared => "scared",
            Emotion::Disgusted => "disgusted",
            Emotion::Neutral => "neutral",
            Emotion::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// One classification result as returned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionReading {
    /// Parsed emotion category
    pub emotion: Emotion,
    /// Raw label string from the service
    pub label: String,
    /// Raw logit vector, when the service includes one
    pub logits: Option<Vec<f32>>,
}

impl EmotionReading {
    pub fn new(label: impl Into<String>, logits: Option<Vec<f32>>) -> Self {
        let label = label.into();
        Self {
            emotion: Emotion::from_label(&label),
            label,
            logits,
        }
    }

    /// The sentinel reading used before any request completes and after
    /// any failed one
    pub fn unknown() -> Self {
        Self {
            emotion: Emotion::Unknown,
            label: "unknown".to_string(),
            logits: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.emotion == Emotion::Unknown
    }
}

impl Default for EmotionReading {
    fn default() -> Self {
        Self::unknown()
    }
}
