use serde::{Deserialize, Serialize};

/// A single word from the single-channel document, with raw float timestamps.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Word {
    /// The recognized text
    pub text: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Transcription accuracy score (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Numeric speaker identifier, present only with diarization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<u32>,
    /// Reliability of the speaker assignment (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_confidence: Option<f64>,
}

impl Word {
    /// Whether this word carries both a speaker ID and a speaker confidence.
    pub fn has_speaker_info(&self) -> bool {
        self.speaker.is_some() && self.speaker_confidence.is_some()
    }
}

/// A word paired with its transcription confidence, for confidence views.
#[derive(Debug, Clone, Serialize)]
pub struct WordConfidence {
    pub text: String,
    pub confidence: f64,
}

/// A paragraph with pre-formatted `HH:MM:SS` timestamps.
///
/// These are whole-second strings from upstream, not the raw float seconds
/// that [`Word`] carries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paragraph {
    pub text: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Topic {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Intent {
    pub intent: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sentence {
    pub text: String,
}

/// A span of transcript text with the topics detected inside it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopicSegment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// A span of transcript text with the intents detected inside it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntentSegment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub intents: Vec<Intent>,
}

/// The single-channel document shape, the common case for documents that
/// carry paragraphs, topics, and intents alongside the word list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranscriptDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub topics: Vec<TopicSegment>,
    #[serde(default)]
    pub intents: Vec<IntentSegment>,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}
