pub mod analyzer;
pub mod error;
pub mod io;
pub mod models;
pub mod normalizer;
pub mod render;
pub mod segmenter;
pub mod transcript;

pub use analyzer::{AnalyzerStats, FieldAnalyzer, FIELD_MAPPING};
pub use error::PipelineError;
pub use io::{load_json_file, load_policy_file, load_transcript_file};
pub use models::{
    CanonicalSegment, Intent, Paragraph, Sentence, SpeakerPolicy, SpeakerSegment, Topic, Word,
};
pub use normalizer::{looks_like_raw_response, parse_response, ResponseShape};
pub use render::{render_json, render_markdown, render_srt, render_summary};
pub use segmenter::{apply_policy, speaker_segments, speaker_statistics, SpeakerStatistics};
pub use transcript::{SummaryStats, TranscriptModel};
