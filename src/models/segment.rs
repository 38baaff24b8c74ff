use serde::{Deserialize, Serialize};

/// A contiguous run of words attributed to one speaker.
///
/// Produced only by the segmenter, consumed only by the renderer; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerSegment {
    /// Zero-based speaker ID (one-based when displayed)
    pub speaker_id: u32,
    /// Space-joined text of the constituent words
    pub text: String,
    /// Start timestamp in seconds (from the first word)
    pub start: f64,
    /// End timestamp in seconds (from the last word)
    pub end: f64,
    /// Mean speaker confidence of the constituent words (0-1)
    pub confidence: f64,
    /// Number of constituent words
    pub word_count: usize,
}

impl SpeakerSegment {
    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The normalized, shape-independent segment record produced by the
/// response normalizer.
///
/// `topics` and `summary` are document-level metadata broadcast into every
/// segment; `topic` keeps the first topic for single-value callers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CanonicalSegment {
    pub segment_id: String,
    pub transcript: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl CanonicalSegment {
    /// A bare segment with only an ID and transcript; metadata is attached
    /// by the normalizer's post-processing pass.
    pub fn new(segment_id: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            segment_id: segment_id.into(),
            transcript: transcript.into(),
            speaker: None,
            start_time: None,
            end_time: None,
            confidence: None,
            topics: None,
            topic: None,
            summary: None,
        }
    }
}
