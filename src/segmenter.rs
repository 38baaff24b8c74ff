use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::models::{SpeakerPolicy, SpeakerSegment, Word};

/// Per-speaker aggregates for [`speaker_statistics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerStats {
    pub word_count: usize,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeakerStatistics {
    pub speaker_count: usize,
    pub total_words_with_speaker_data: usize,
    pub speakers: BTreeMap<u32, SpeakerStats>,
    pub overall_avg_confidence: f64,
}

/// Segment words into chronological per-speaker runs.
///
/// Words below `min_confidence` are dropped before scanning. A new segment
/// starts whenever the speaker changes; each segment's confidence is the
/// mean of its words' speaker confidence.
pub fn speaker_segments(words: &[Word], min_confidence: f64) -> Vec<SpeakerSegment> {
    let mut segments: Vec<SpeakerSegment> = Vec::new();
    let mut confidence_sum = 0.0;

    for word in words {
        let (Some(speaker), Some(confidence)) = (word.speaker, word.speaker_confidence) else {
            continue;
        };
        if confidence < min_confidence {
            continue;
        }

        match segments.last_mut() {
            Some(segment) if segment.speaker_id == speaker => {
                segment.text.push(' ');
                segment.text.push_str(&word.text);
                segment.end = word.end;
                segment.word_count += 1;
                confidence_sum += confidence;
                segment.confidence = confidence_sum / segment.word_count as f64;
            }
            _ => {
                confidence_sum = confidence;
                segments.push(SpeakerSegment {
                    speaker_id: speaker,
                    text: word.text.clone(),
                    start: word.start,
                    end: word.end,
                    confidence,
                    word_count: 1,
                });
            }
        }
    }

    debug!("segmented {} words into {} runs", words.len(), segments.len());
    segments
}

/// Aggregate statistics over every word carrying a speaker ID, with no
/// confidence filtering. Words without a speaker confidence still count;
/// averages are taken over the scored words.
pub fn speaker_statistics(words: &[Word]) -> SpeakerStatistics {
    let mut counts: BTreeMap<u32, (usize, f64, usize)> = BTreeMap::new();
    let mut total_words = 0usize;
    let mut overall_sum = 0.0;
    let mut overall_scored = 0usize;

    for word in words {
        let Some(speaker) = word.speaker else { continue };
        total_words += 1;
        let entry = counts.entry(speaker).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(confidence) = word.speaker_confidence {
            entry.1 += confidence;
            entry.2 += 1;
            overall_sum += confidence;
            overall_scored += 1;
        }
    }

    let speakers: BTreeMap<u32, SpeakerStats> = counts
        .into_iter()
        .map(|(speaker, (word_count, sum, scored))| {
            let avg_confidence = if scored > 0 { sum / scored as f64 } else { 0.0 };
            (
                speaker,
                SpeakerStats {
                    word_count,
                    avg_confidence,
                },
            )
        })
        .collect();

    SpeakerStatistics {
        speaker_count: speakers.len(),
        total_words_with_speaker_data: total_words,
        overall_avg_confidence: if overall_scored > 0 {
            overall_sum / overall_scored as f64
        } else {
            0.0
        },
        speakers,
    }
}

/// Apply a rendering policy to raw segments: merge, then duration-filter,
/// then cap speakers.
///
/// The order matters. Merging can turn several sub-threshold fragments into
/// one segment long enough to survive the duration filter, and the speaker
/// cap is decided from first appearances in the pre-merge list.
pub fn apply_policy(segments: &[SpeakerSegment], policy: &SpeakerPolicy) -> Vec<SpeakerSegment> {
    let mut retained_speakers: Vec<u32> = Vec::new();
    for segment in segments {
        if !retained_speakers.contains(&segment.speaker_id) {
            retained_speakers.push(segment.speaker_id);
        }
    }
    retained_speakers.truncate(policy.max_speakers);

    let mut result = if policy.merge_consecutive_segments {
        merge_consecutive(segments)
    } else {
        segments.to_vec()
    };

    result.retain(|s| s.duration() >= policy.min_segment_duration);
    result.retain(|s| retained_speakers.contains(&s.speaker_id));
    result
}

/// Fold adjacent segments sharing a speaker into one, recomputing the
/// confidence as a word-count-weighted mean.
fn merge_consecutive(segments: &[SpeakerSegment]) -> Vec<SpeakerSegment> {
    let mut merged: Vec<SpeakerSegment> = Vec::new();

    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.speaker_id == segment.speaker_id => {
                last.text.push(' ');
                last.text.push_str(&segment.text);
                last.end = segment.end;
                let total_words = last.word_count + segment.word_count;
                last.confidence = (last.confidence * last.word_count as f64
                    + segment.confidence * segment.word_count as f64)
                    / total_words as f64;
                last.word_count = total_words;
            }
            _ => merged.push(segment.clone()),
        }
    }

    merged
}
