use std::fmt::Write as _;

use crate::transcript::TranscriptModel;

/// Render the model as a Markdown report. Sections with no data are
/// omitted entirely, not emitted empty.
pub fn render_markdown(model: &TranscriptModel) -> String {
    let mut out = String::from("# Transcript Report\n");

    if let Some(transcript) = model.transcript() {
        out.push_str("\n## Full Transcript\n\n");
        out.push_str(transcript);
        out.push('\n');
    }

    if !model.paragraphs().is_empty() {
        out.push_str("\n## Paragraphs\n\n");
        for paragraph in model.paragraphs() {
            let _ = writeln!(
                out,
                "- [{} - {}] {}",
                paragraph.start, paragraph.end, paragraph.text
            );
        }
    }

    if !model.intents().is_empty() {
        out.push_str("\n## Intents\n\n");
        for intent in model.intents() {
            let _ = writeln!(
                out,
                "- {} ({:.2}s - {:.2}s)",
                intent.intent, intent.start, intent.end
            );
        }
    }

    if !model.topics().is_empty() {
        out.push_str("\n## Topics\n\n");
        for topic in model.topics() {
            let _ = writeln!(out, "- {}", topic.topic);
        }
    }

    if !model.words_with_confidence().is_empty() {
        out.push_str("\n## Word Confidence\n\n");
        for word in model.words_with_confidence() {
            let _ = writeln!(out, "- {}: {:.2}", word.text, word.confidence);
        }
    }

    if !model.segmented_sentences().is_empty() {
        out.push_str("\n## Segmented Sentences\n\n");
        for sentence in model.segmented_sentences() {
            let _ = writeln!(out, "- {}", sentence.text);
        }
    }

    out
}
