use std::fmt::Write as _;

use crate::transcript::TranscriptModel;

/// Render a fixed plain-text summary: counts, topic names, intent names,
/// and the duration taken from the last paragraph's end.
pub fn render_summary(model: &TranscriptModel) -> String {
    let stats = model.summary_stats();

    let topics = join_or_none(model.topics().iter().map(|t| t.topic.as_str()));
    let intents = join_or_none(model.intents().iter().map(|i| i.intent.as_str()));
    let duration = model
        .paragraphs()
        .last()
        .map(|p| p.end.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut out = String::from("Transcript Summary\n==================\n\n");
    let _ = writeln!(out, "Total words: {}", stats.total_words);
    let _ = writeln!(out, "Total sentences: {}", stats.total_sentences);
    let _ = writeln!(out, "Total paragraphs: {}", stats.total_paragraphs);
    let _ = writeln!(out, "Transcript length: {} characters", stats.transcript_length);
    let _ = writeln!(out, "Total topics: {}", stats.total_topics);
    let _ = writeln!(out, "Total intents: {}", stats.total_intents);
    out.push('\n');
    let _ = writeln!(out, "Topics: {topics}");
    let _ = writeln!(out, "Intents: {intents}");
    let _ = writeln!(out, "Duration: {duration}");

    out
}

fn join_or_none<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}
