pub mod markdown;
pub mod srt;
pub mod summary;

pub use markdown::render_markdown;
pub use srt::render_srt;
pub use summary::render_summary;

use crate::transcript::TranscriptModel;

/// Format raw float seconds as an SRT timestamp, `HH:MM:SS,mmm`, flooring
/// to the millisecond.
pub(crate) fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).floor() as u64;
    let millis = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// Serialize the model's accessors into one flat JSON object, no reshaping.
pub fn render_json(model: &TranscriptModel) -> String {
    let value = serde_json::json!({
        "transcript": model.transcript(),
        "paragraphs": model.paragraphs(),
        "intents": model.intents(),
        "topics": model.topics(),
        "words_with_confidence": model.words_with_confidence(),
        "segmented_sentences": model.segmented_sentences(),
        "segments_with_topics": model.segments_with_topics(),
        "segments_with_intents": model.segments_with_intents(),
        "summary_stats": model.summary_stats(),
    });
    serde_json::to_string_pretty(&value).unwrap_or_default()
}
