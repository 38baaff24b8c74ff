use serde_json::Value;
use tracing::debug;

use crate::error::PipelineError;
use crate::models::{CanonicalSegment, RawResults, RawTopics, RawUtterance, RawWord};

/// The three incompatible shapes a raw response can take, in detection
/// order: the first constructor that matches wins.
#[derive(Debug, Clone)]
pub enum ResponseShape {
    /// Pre-segmented utterances with their own timing and speakers
    Utterances(Vec<RawUtterance>),
    /// A word list to be grouped into segments by consecutive speaker runs
    WordGroups(Vec<RawWord>),
    /// Nothing but a full transcript string on the first alternative
    PlainTranscript {
        transcript: String,
        confidence: Option<f64>,
    },
}

/// Whether `doc` is a raw API response rather than an already-flattened
/// list of legacy segment records: a JSON object carrying a
/// `results.channels` array (possibly empty).
pub fn looks_like_raw_response(doc: &Value) -> bool {
    doc.get("results")
        .and_then(|results| results.get("channels"))
        .is_some_and(Value::is_array)
}

/// Reconcile a raw response into a flat, ordered list of canonical
/// segments, with document-level metadata broadcast into each one.
pub fn parse_response(doc: &Value) -> Result<Vec<CanonicalSegment>, PipelineError> {
    if !doc.is_object() {
        return Err(PipelineError::InvalidDocument(
            "response is not a JSON object".to_string(),
        ));
    }
    let results_value = doc.get("results").ok_or_else(|| {
        PipelineError::InvalidDocument("response lacks a `results` key".to_string())
    })?;
    let results: RawResults = serde_json::from_value(results_value.clone())
        .map_err(|e| PipelineError::InvalidDocument(format!("unrecognized `results` payload: {e}")))?;

    let mut segments = match detect_shape(&results)? {
        Some(ResponseShape::Utterances(utterances)) => segments_from_utterances(&utterances),
        Some(ResponseShape::WordGroups(words)) => segments_from_word_groups(&words),
        Some(ResponseShape::PlainTranscript {
            transcript,
            confidence,
        }) => {
            let mut segment = CanonicalSegment::new("transcript_0", transcript);
            segment.confidence = confidence;
            vec![segment]
        }
        None => Vec::new(),
    };

    attach_metadata(&mut segments, &results);
    debug!("normalized response into {} segments", segments.len());
    Ok(segments)
}

/// Probe the shapes in order. `Ok(None)` means an empty `channels` array:
/// a valid document with zero segments.
fn detect_shape(results: &RawResults) -> Result<Option<ResponseShape>, PipelineError> {
    if let Some(utterances) = &results.utterances
        && !utterances.is_empty()
    {
        return Ok(Some(ResponseShape::Utterances(utterances.clone())));
    }

    let channels = results.channels.as_ref().ok_or_else(|| {
        PipelineError::InvalidDocument("results lack a `channels` array".to_string())
    })?;
    if channels.is_empty() {
        return Ok(None);
    }

    let alternative = channels.first().and_then(|c| c.alternatives.first());
    if let Some(alternative) = alternative {
        if !alternative.words.is_empty() {
            return Ok(Some(ResponseShape::WordGroups(alternative.words.clone())));
        }
        if let Some(transcript) = &alternative.transcript {
            return Ok(Some(ResponseShape::PlainTranscript {
                transcript: transcript.clone(),
                confidence: alternative.confidence,
            }));
        }
    }

    Err(PipelineError::InvalidDocument(
        "channels carry neither words nor a transcript".to_string(),
    ))
}

fn segments_from_utterances(utterances: &[RawUtterance]) -> Vec<CanonicalSegment> {
    utterances
        .iter()
        .enumerate()
        .map(|(index, utterance)| {
            let mut segment =
                CanonicalSegment::new(format!("utterance_{index}"), utterance.transcript.clone());
            segment.speaker = utterance.speaker;
            segment.start_time = utterance.start;
            segment.end_time = utterance.end;
            segment.confidence = utterance.confidence;
            segment
        })
        .collect()
}

/// Group consecutive words sharing a `speaker` value into one segment per
/// contiguous run. Words lacking a speaker group among themselves.
fn segments_from_word_groups(words: &[RawWord]) -> Vec<CanonicalSegment> {
    let mut segments = Vec::new();
    let mut run: Vec<&RawWord> = Vec::new();

    for word in words {
        if let Some(first) = run.first()
            && first.speaker != word.speaker
        {
            segments.push(segment_from_run(&run, segments.len()));
            run.clear();
        }
        run.push(word);
    }
    if !run.is_empty() {
        segments.push(segment_from_run(&run, segments.len()));
    }

    segments
}

fn segment_from_run(run: &[&RawWord], index: usize) -> CanonicalSegment {
    let transcript = run
        .iter()
        .map(|w| w.display_text())
        .collect::<Vec<_>>()
        .join(" ");
    let mut segment = CanonicalSegment::new(format!("word_group_{index}"), transcript);
    segment.speaker = run.first().and_then(|w| w.speaker);
    segment.start_time = run.first().map(|w| w.start);
    segment.end_time = run.last().map(|w| w.end);
    segment
}

/// Broadcast document-level topics and summary into every segment. Missing
/// metadata leaves the fields unset; absent is distinct from empty.
fn attach_metadata(segments: &mut [CanonicalSegment], results: &RawResults) {
    if let Some(raw_topics) = &results.topics {
        let names = collect_topic_names(raw_topics);
        let first = names.first().cloned();
        for segment in segments.iter_mut() {
            segment.topics = Some(names.clone());
            segment.topic = first.clone();
        }
    }

    if let Some(short) = results.summary.as_ref().and_then(|s| s.short.as_ref()) {
        for segment in segments.iter_mut() {
            segment.summary = Some(short.clone());
        }
    }
}

/// Distinct topic names in first-seen order, across both `results.topics`
/// shapes.
fn collect_topic_names(raw_topics: &RawTopics) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut push_unique = |name: &str| {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    };

    match raw_topics {
        RawTopics::Flat(topics) => {
            for topic in topics {
                push_unique(&topic.topic);
            }
        }
        RawTopics::Segmented { segments } => {
            for segment in segments {
                for topic in &segment.topics {
                    push_unique(&topic.topic);
                }
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_utterance_shape_takes_precedence() {
        let doc = json!({
            "results": {
                "utterances": [
                    {"transcript": "hello there", "start": 0.0, "end": 1.5, "confidence": 0.9, "speaker": 0}
                ],
                "channels": [{
                    "alternatives": [{
                        "transcript": "hello there general",
                        "words": [
                            {"word": "hello", "start": 0.0, "end": 0.5, "speaker": 0}
                        ]
                    }]
                }]
            }
        });

        let segments = parse_response(&doc).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].segment_id, "utterance_0");
        assert_eq!(segments[0].transcript, "hello there");
        assert_eq!(segments[0].speaker, Some(0));
        assert_eq!(segments[0].confidence, Some(0.9));
    }

    #[test]
    fn test_word_group_shape_groups_consecutive_speakers() {
        let doc = json!({
            "results": {
                "channels": [{
                    "alternatives": [{
                        "words": [
                            {"word": "hello", "start": 0.0, "end": 0.4, "speaker": 0},
                            {"word": "world", "start": 0.5, "end": 0.9, "speaker": 0},
                            {"word": "hi", "start": 1.0, "end": 1.2, "speaker": 1},
                            {"word": "back", "start": 1.3, "end": 1.6, "speaker": 0}
                        ]
                    }]
                }]
            }
        });

        let segments = parse_response(&doc).unwrap();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].segment_id, "word_group_0");
        assert_eq!(segments[0].transcript, "hello world");
        assert_eq!(segments[0].speaker, Some(0));
        assert_eq!(segments[0].start_time, Some(0.0));
        assert_eq!(segments[0].end_time, Some(0.9));
        assert_eq!(segments[1].transcript, "hi");
        assert_eq!(segments[1].speaker, Some(1));
        assert_eq!(segments[2].transcript, "back");
    }

    #[test]
    fn test_words_without_speaker_group_among_themselves() {
        let doc = json!({
            "results": {
                "channels": [{
                    "alternatives": [{
                        "words": [
                            {"word": "one", "start": 0.0, "end": 0.2},
                            {"word": "two", "start": 0.3, "end": 0.5},
                            {"word": "three", "start": 0.6, "end": 0.8, "speaker": 2}
                        ]
                    }]
                }]
            }
        });

        let segments = parse_response(&doc).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].transcript, "one two");
        assert_eq!(segments[0].speaker, None);
        assert_eq!(segments[1].transcript, "three");
        assert_eq!(segments[1].speaker, Some(2));
    }

    #[test]
    fn test_plain_transcript_shape() {
        let doc = json!({
            "results": {
                "channels": [{
                    "alternatives": [{
                        "transcript": "the whole thing",
                        "confidence": 0.88
                    }]
                }]
            }
        });

        let segments = parse_response(&doc).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].segment_id, "transcript_0");
        assert_eq!(segments[0].transcript, "the whole thing");
        assert_eq!(segments[0].confidence, Some(0.88));
        assert_eq!(segments[0].start_time, None);
    }

    #[test]
    fn test_empty_channels_yield_zero_segments() {
        let doc = json!({"results": {"channels": []}});
        let segments = parse_response(&doc).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_invalid_documents() {
        assert!(parse_response(&json!([1, 2, 3])).is_err());
        assert!(parse_response(&json!({"no_results": true})).is_err());
        assert!(parse_response(&json!({"results": {}})).is_err());
        // Non-empty channels with no recognizable shape inside.
        assert!(parse_response(&json!({"results": {"channels": [{"alternatives": [{}]}]}})).is_err());
    }

    #[test]
    fn test_topics_and_summary_broadcast_to_every_segment() {
        let doc = json!({
            "results": {
                "channels": [{
                    "alternatives": [{
                        "words": [
                            {"word": "a", "start": 0.0, "end": 0.1, "speaker": 0},
                            {"word": "b", "start": 0.2, "end": 0.3, "speaker": 1}
                        ]
                    }]
                }],
                "topics": {
                    "segments": [
                        {"topics": [{"topic": "pricing"}, {"topic": "support"}]},
                        {"topics": [{"topic": "pricing"}]}
                    ]
                },
                "summary": {"short": "a quick chat"}
            }
        });

        let segments = parse_response(&doc).unwrap();

        assert_eq!(segments.len(), 2);
        for segment in &segments {
            assert_eq!(
                segment.topics,
                Some(vec!["pricing".to_string(), "support".to_string()])
            );
            assert_eq!(segment.topic.as_deref(), Some("pricing"));
            assert_eq!(segment.summary.as_deref(), Some("a quick chat"));
        }
    }

    #[test]
    fn test_flat_topics_shape() {
        let doc = json!({
            "results": {
                "channels": [{
                    "alternatives": [{"transcript": "hi"}]
                }],
                "topics": [{"topic": "greetings", "confidence": 0.7}]
            }
        });

        let segments = parse_response(&doc).unwrap();
        assert_eq!(segments[0].topics, Some(vec!["greetings".to_string()]));
        assert_eq!(segments[0].topic.as_deref(), Some("greetings"));
        assert_eq!(segments[0].summary, None);
    }

    #[test]
    fn test_looks_like_raw_response() {
        assert!(looks_like_raw_response(&json!({"results": {"channels": []}})));
        assert!(looks_like_raw_response(
            &json!({"results": {"channels": [{"alternatives": []}]}})
        ));
        assert!(!looks_like_raw_response(&json!({"results": {}})));
        assert!(!looks_like_raw_response(
            &json!([{"segment_id": "legacy_0", "transcript": "old"}])
        ));
        assert!(!looks_like_raw_response(&json!("nope")));
    }
}
