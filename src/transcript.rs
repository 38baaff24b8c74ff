use std::sync::OnceLock;

use serde::Serialize;

use crate::error::PipelineError;
use crate::models::{
    Intent, IntentSegment, Paragraph, Sentence, Topic, TopicSegment, TranscriptDocument, Word,
    WordConfidence,
};

/// Simple counts over the model's collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total_words: usize,
    pub total_sentences: usize,
    pub total_paragraphs: usize,
    pub transcript_length: usize,
    pub total_topics: usize,
    pub total_intents: usize,
}

/// The canonical in-memory representation of a single-channel document.
///
/// Derived collections are memoized per instance. Recomputing one twice
/// under concurrent reads is fine; `OnceLock` guarantees no torn writes.
#[derive(Debug)]
pub struct TranscriptModel {
    document: TranscriptDocument,
    speaker_words: OnceLock<Vec<Word>>,
    flat_topics: OnceLock<Vec<Topic>>,
    flat_intents: OnceLock<Vec<Intent>>,
    confident_words: OnceLock<Vec<WordConfidence>>,
}

impl TranscriptModel {
    pub fn new(document: TranscriptDocument) -> Self {
        Self {
            document,
            speaker_words: OnceLock::new(),
            flat_topics: OnceLock::new(),
            flat_intents: OnceLock::new(),
            confident_words: OnceLock::new(),
        }
    }

    /// Parse a single-channel JSON document into a model.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let document: TranscriptDocument = serde_json::from_str(json)
            .map_err(|e| PipelineError::MalformedInput(format!("cannot parse document: {e}")))?;
        Ok(Self::new(document))
    }

    pub fn transcript(&self) -> Option<&str> {
        self.document.transcript.as_deref()
    }

    pub fn words(&self) -> &[Word] {
        &self.document.words
    }

    /// Words carrying both a speaker ID and a speaker confidence. Empty,
    /// never an error, when the document has no diarization data.
    pub fn words_with_speaker_info(&self) -> &[Word] {
        self.speaker_words.get_or_init(|| {
            self.document
                .words
                .iter()
                .filter(|w| w.has_speaker_info())
                .cloned()
                .collect()
        })
    }

    pub fn has_speaker_data(&self) -> bool {
        !self.words_with_speaker_info().is_empty()
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.document.paragraphs
    }

    /// All topics across topic segments, flattened.
    pub fn topics(&self) -> &[Topic] {
        self.flat_topics.get_or_init(|| {
            self.document
                .topics
                .iter()
                .flat_map(|segment| segment.topics.iter().cloned())
                .collect()
        })
    }

    /// All intents across intent segments, flattened.
    pub fn intents(&self) -> &[Intent] {
        self.flat_intents.get_or_init(|| {
            self.document
                .intents
                .iter()
                .flat_map(|segment| segment.intents.iter().cloned())
                .collect()
        })
    }

    pub fn segments_with_topics(&self) -> &[TopicSegment] {
        &self.document.topics
    }

    pub fn segments_with_intents(&self) -> &[IntentSegment] {
        &self.document.intents
    }

    pub fn segmented_sentences(&self) -> &[Sentence] {
        &self.document.sentences
    }

    /// Words that carry a transcription confidence score.
    pub fn words_with_confidence(&self) -> &[WordConfidence] {
        self.confident_words.get_or_init(|| {
            self.document
                .words
                .iter()
                .filter_map(|w| {
                    w.confidence.map(|confidence| WordConfidence {
                        text: w.text.clone(),
                        confidence,
                    })
                })
                .collect()
        })
    }

    pub fn summary_stats(&self) -> SummaryStats {
        SummaryStats {
            total_words: self.document.words.len(),
            total_sentences: self.document.sentences.len(),
            total_paragraphs: self.document.paragraphs.len(),
            transcript_length: self.document.transcript.as_deref().map_or(0, str::len),
            total_topics: self.topics().len(),
            total_intents: self.intents().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> TranscriptModel {
        let json = r#"{
            "transcript": "hello world how are you",
            "words": [
                {"text": "hello", "start": 0.5, "end": 0.8, "confidence": 0.95, "speaker": 0, "speaker_confidence": 0.85},
                {"text": "world", "start": 0.9, "end": 1.2, "confidence": 0.92, "speaker": 0, "speaker_confidence": 0.80},
                {"text": "how", "start": 1.5, "end": 1.7, "confidence": 0.90},
                {"text": "are", "start": 1.8, "end": 2.0},
                {"text": "you", "start": 2.1, "end": 2.3, "speaker": 1, "speaker_confidence": 0.70}
            ],
            "paragraphs": [
                {"text": "hello world", "start": "00:00:00", "end": "00:00:01"},
                {"text": "how are you", "start": "00:00:01", "end": "00:00:02"}
            ],
            "topics": [
                {"text": "hello world", "topics": [{"topic": "greetings", "confidence": 0.9}]},
                {"text": "how are you", "topics": [{"topic": "smalltalk"}]}
            ],
            "intents": [
                {"text": "how are you", "intents": [{"intent": "check_in", "start": 1.5, "end": 2.3}]}
            ],
            "sentences": [
                {"text": "hello world"},
                {"text": "how are you"}
            ]
        }"#;
        TranscriptModel::from_json(json).unwrap()
    }

    #[test]
    fn test_words_with_speaker_info_filters() {
        let model = sample_model();
        let words = model.words_with_speaker_info();

        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|w| w.has_speaker_info()));
        assert!(model.has_speaker_data());
    }

    #[test]
    fn test_no_speaker_data_is_empty_not_error() {
        let model = TranscriptModel::from_json(
            r#"{"words": [{"text": "hi", "start": 0.0, "end": 0.5}]}"#,
        )
        .unwrap();

        assert!(model.words_with_speaker_info().is_empty());
        assert!(!model.has_speaker_data());
    }

    #[test]
    fn test_flattened_topics_and_intents() {
        let model = sample_model();

        let topics: Vec<&str> = model.topics().iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(topics, vec!["greetings", "smalltalk"]);

        let intents: Vec<&str> = model.intents().iter().map(|i| i.intent.as_str()).collect();
        assert_eq!(intents, vec!["check_in"]);

        assert_eq!(model.segments_with_topics().len(), 2);
        assert_eq!(model.segments_with_intents().len(), 1);
    }

    #[test]
    fn test_words_with_confidence_skips_unscored_words() {
        let model = sample_model();
        let scored = model.words_with_confidence();

        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].text, "hello");
        assert_eq!(scored[0].confidence, 0.95);
    }

    #[test]
    fn test_summary_stats() {
        let model = sample_model();
        let stats = model.summary_stats();

        assert_eq!(
            stats,
            SummaryStats {
                total_words: 5,
                total_sentences: 2,
                total_paragraphs: 2,
                transcript_length: "hello world how are you".len(),
                total_topics: 2,
                total_intents: 1,
            }
        );
    }

    #[test]
    fn test_malformed_input_is_fatal() {
        assert!(TranscriptModel::from_json("not json at all").is_err());
    }
}
