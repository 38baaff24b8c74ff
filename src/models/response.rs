use serde::{Deserialize, Serialize};

use super::Topic;

/// `results` payload of a raw transcription API response.
///
/// The upstream service produces three incompatible shapes under this one
/// key; every field is optional so a single type can receive all of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub utterances: Option<Vec<RawUtterance>>,
    #[serde(default)]
    pub channels: Option<Vec<RawChannel>>,
    #[serde(default)]
    pub topics: Option<RawTopics>,
    #[serde(default)]
    pub summary: Option<RawSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChannel {
    #[serde(default)]
    pub alternatives: Vec<RawAlternative>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlternative {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub words: Vec<RawWord>,
}

/// A word as it appears in the raw response, keyed `word` rather than `text`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub speaker: Option<u32>,
    #[serde(default)]
    pub speaker_confidence: Option<f64>,
    #[serde(default)]
    pub punctuated_word: Option<String>,
}

impl RawWord {
    /// Display text for this word, preferring the punctuated form.
    pub fn display_text(&self) -> &str {
        self.punctuated_word.as_deref().unwrap_or(&self.word)
    }
}

/// A pre-segmented span of speech with its own timing and speaker.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUtterance {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub speaker: Option<u32>,
}

/// `results.topics` comes in two shapes: a flat array of topics, or a
/// `segments` wrapper where each segment carries its own topic list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTopics {
    Segmented { segments: Vec<RawTopicSegment> },
    Flat(Vec<Topic>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTopicSegment {
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSummary {
    #[serde(default)]
    pub short: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_results_word_shape() {
        let json = r#"{
            "channels": [{
                "alternatives": [{
                    "transcript": "hello world",
                    "confidence": 0.97,
                    "words": [
                        {"word": "hello", "start": 0.5, "end": 0.8, "confidence": 0.95, "speaker": 0, "speaker_confidence": 0.85, "punctuated_word": "Hello"},
                        {"word": "world", "start": 0.9, "end": 1.2, "confidence": 0.92}
                    ]
                }]
            }]
        }"#;

        let results: RawResults = serde_json::from_str(json).unwrap();
        let channels = results.channels.unwrap();
        let words = &channels[0].alternatives[0].words;

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].display_text(), "Hello");
        assert_eq!(words[1].display_text(), "world");
        assert_eq!(words[1].speaker, None);
        assert!(results.utterances.is_none());
    }

    #[test]
    fn test_parse_raw_topics_both_shapes() {
        let flat: RawTopics =
            serde_json::from_str(r#"[{"topic": "pricing", "confidence": 0.9}]"#).unwrap();
        assert!(matches!(flat, RawTopics::Flat(ref t) if t[0].topic == "pricing"));

        let segmented: RawTopics =
            serde_json::from_str(r#"{"segments": [{"topics": [{"topic": "pricing"}]}]}"#).unwrap();
        assert!(
            matches!(segmented, RawTopics::Segmented { ref segments } if segments[0].topics[0].topic == "pricing")
        );
    }
}
