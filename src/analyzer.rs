use serde::Serialize;
use serde_json::{Map, Value};

/// Fixed bijection between human-readable field labels and the keys of a
/// flat segment record. Static configuration, not mutable state.
pub const FIELD_MAPPING: &[(&str, &str)] = &[
    ("Segment Identifier", "segment_id"),
    ("Start Time of Segment", "start_time"),
    ("End Time of Segment", "end_time"),
    ("Segment Transcript", "transcript"),
    ("Segment Topic", "topic"),
    ("Relevant Keywords", "keywords"),
    ("AI Analysis of Segment", "gemini_analysis"),
    ("Software Detected in Segment", "software_detected"),
    ("List of Software Detections", "software_detections"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerStats {
    pub total_segments: usize,
    pub available_fields: usize,
    pub fields_with_data: usize,
}

/// Generic field-extraction and filtering engine over flat segment-like
/// records (normalizer output or ad-hoc enrichment records).
///
/// Never raises for absent fields; they are silently omitted.
#[derive(Debug, Clone)]
pub struct FieldAnalyzer {
    segments: Vec<Map<String, Value>>,
}

impl FieldAnalyzer {
    /// Build an analyzer over a list of records. Non-object values are
    /// ignored.
    pub fn new(segments: Vec<Value>) -> Self {
        let segments = segments
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        Self { segments }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Project each record down to the requested labels. Nil values are
    /// skipped, arrays are joined with `", "`, and records that end up with
    /// no extracted keys are dropped.
    pub fn extract_fields(&self, selected_field_labels: &[&str]) -> Vec<Map<String, Value>> {
        self.segments
            .iter()
            .filter_map(|record| {
                let mut extracted = Map::new();
                for label in selected_field_labels {
                    let Some(key) = mapped_key(label) else {
                        continue;
                    };
                    match record.get(key) {
                        None | Some(Value::Null) => {}
                        Some(Value::Array(items)) => {
                            extracted
                                .insert(key.to_string(), Value::String(join_values(items)));
                        }
                        Some(value) => {
                            extracted.insert(key.to_string(), value.clone());
                        }
                    }
                }
                if extracted.is_empty() {
                    None
                } else {
                    Some(extracted)
                }
            })
            .collect()
    }

    /// Labels whose mapped key carries a non-nil, non-blank value in at
    /// least one record.
    pub fn get_field_options(&self) -> Vec<&'static str> {
        FIELD_MAPPING
            .iter()
            .filter(|(_, key)| self.segments.iter().any(|r| has_data(r.get(*key))))
            .map(|(label, _)| *label)
            .collect()
    }

    pub fn summary_stats(&self) -> AnalyzerStats {
        let available_fields = FIELD_MAPPING
            .iter()
            .filter(|(_, key)| {
                self.segments
                    .iter()
                    .any(|r| matches!(r.get(*key), Some(v) if !v.is_null()))
            })
            .count();

        AnalyzerStats {
            total_segments: self.segments.len(),
            available_fields,
            fields_with_data: self.get_field_options().len(),
        }
    }

    /// Records whose `topic` key equals `topic` exactly.
    pub fn filter_by_topic(&self, topic: &str) -> Vec<&Map<String, Value>> {
        self.segments
            .iter()
            .filter(|r| r.get("topic").and_then(Value::as_str) == Some(topic))
            .collect()
    }

    /// Records mentioning `name` either as the scalar `software_detected`
    /// value or as a member of the `software_detections` array.
    pub fn filter_by_software(&self, name: &str) -> Vec<&Map<String, Value>> {
        self.segments
            .iter()
            .filter(|r| {
                let scalar = r.get("software_detected").and_then(Value::as_str) == Some(name);
                let listed = r
                    .get("software_detections")
                    .and_then(Value::as_array)
                    .is_some_and(|items| items.iter().any(|v| v.as_str() == Some(name)));
                scalar || listed
            })
            .collect()
    }

    /// Deduplicated topics in first-seen order.
    pub fn get_all_topics(&self) -> Vec<String> {
        let mut topics = Vec::new();
        for record in &self.segments {
            if let Some(topic) = record.get("topic").and_then(Value::as_str)
                && !topics.iter().any(|t| t == topic)
            {
                topics.push(topic.to_string());
            }
        }
        topics
    }

    /// Deduplicated software names in first-seen order, flattening both the
    /// scalar and array representations.
    pub fn get_all_software(&self) -> Vec<String> {
        let mut software = Vec::new();
        let mut push_unique = |name: &str| {
            if !software.iter().any(|s| s == name) {
                software.push(name.to_string());
            }
        };

        for record in &self.segments {
            if let Some(name) = record.get("software_detected").and_then(Value::as_str) {
                push_unique(name);
            }
            if let Some(items) = record.get("software_detections").and_then(Value::as_array) {
                for item in items {
                    if let Some(name) = item.as_str() {
                        push_unique(name);
                    }
                }
            }
        }

        software
    }
}

fn mapped_key(label: &str) -> Option<&'static str> {
    FIELD_MAPPING
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, key)| *key)
}

fn join_values(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Non-nil and non-blank: whitespace-only strings and empty arrays do not
/// count as data.
fn has_data(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}
