use serde::{Deserialize, Serialize};

/// Default label format; `%d` is replaced with the one-based speaker number.
pub const DEFAULT_LABEL_FORMAT: &str = "[Speaker %d]: ";

/// Configuration for speaker-aware rendering, typically loaded from a YAML
/// file by the caller and validated before use.
///
/// A policy failing [`validate`](SpeakerPolicy::validate) is handled by the
/// caller disabling speaker rendering, not by the pipeline erroring.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeakerPolicy {
    /// Whether speaker-aware rendering is active at all
    pub enable: bool,
    /// Minimum per-word speaker confidence for a word to participate (0-1)
    pub confidence_threshold: f64,
    /// Label prefix template; must contain exactly one `%d` placeholder
    pub label_format: String,
    /// Fold adjacent segments that share a speaker into one
    pub merge_consecutive_segments: bool,
    /// Drop segments shorter than this many seconds
    pub min_segment_duration: f64,
    /// Keep only the first N distinct speakers by chronological appearance (1-50)
    pub max_speakers: usize,
}

impl Default for SpeakerPolicy {
    fn default() -> Self {
        Self {
            enable: true,
            confidence_threshold: 0.8,
            label_format: DEFAULT_LABEL_FORMAT.to_string(),
            merge_consecutive_segments: true,
            min_segment_duration: 1.0,
            max_speakers: 10,
        }
    }
}

impl SpeakerPolicy {
    /// Range and placeholder checks. The caller reacts to a failure by
    /// falling back to non-speaker rendering.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            ));
        }
        if self.label_format.matches("%d").count() != 1 {
            return Err(format!(
                "label_format must contain exactly one %d placeholder, got {:?}",
                self.label_format
            ));
        }
        if self.min_segment_duration < 0.0 {
            return Err(format!(
                "min_segment_duration must be non-negative, got {}",
                self.min_segment_duration
            ));
        }
        if !(1..=50).contains(&self.max_speakers) {
            return Err(format!(
                "max_speakers must be within [1, 50], got {}",
                self.max_speakers
            ));
        }
        Ok(())
    }

    /// Format the display label for a zero-based speaker ID.
    ///
    /// Speaker IDs are shown to humans one-based. A format lacking the `%d`
    /// placeholder falls back to the default rather than erroring.
    pub fn format_label(&self, speaker_id: u32) -> String {
        let display_number = speaker_id + 1;
        let format = if self.label_format.contains("%d") {
            self.label_format.as_str()
        } else {
            DEFAULT_LABEL_FORMAT
        };
        format.replacen("%d", &display_number.to_string(), 1)
    }
}
