use tracing::debug;

use super::format_srt_timestamp;
use crate::models::{Paragraph, SpeakerPolicy, SpeakerSegment};
use crate::segmenter::apply_policy;

/// Render subtitle blocks from paragraphs, or from speaker segments when a
/// valid, enabled policy and segments are supplied.
///
/// The paragraph fallback is unconditional: a disabled or invalid policy,
/// missing segments, or a policy pass that leaves nothing to render all
/// degrade silently to paragraph rendering. Speaker problems never error.
pub fn render_srt(
    paragraphs: &[Paragraph],
    speaker_segments: Option<&[SpeakerSegment]>,
    policy: Option<&SpeakerPolicy>,
) -> String {
    if let (Some(segments), Some(policy)) = (speaker_segments, policy)
        && policy.enable
        && policy.validate().is_ok()
    {
        let applied = apply_policy(segments, policy);
        if !applied.is_empty() {
            return render_speaker_blocks(&applied, policy);
        }
        debug!("policy left no speaker segments, falling back to paragraphs");
    }

    render_paragraph_blocks(paragraphs)
}

/// Paragraph timestamps are whole-second `HH:MM:SS` strings; milliseconds
/// are always `000` in this path.
fn render_paragraph_blocks(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .enumerate()
        .map(|(index, paragraph)| {
            format!(
                "{}\n{},000 --> {},000\n{}",
                index + 1,
                paragraph.start,
                paragraph.end,
                paragraph.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_speaker_blocks(segments: &[SpeakerSegment], policy: &SpeakerPolicy) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            format!(
                "{}\n{} --> {}\n{}{}",
                index + 1,
                format_srt_timestamp(segment.start),
                format_srt_timestamp(segment.end),
                policy.format_label(segment.speaker_id),
                segment.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
