use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::SpeakerPolicy;
use crate::transcript::TranscriptModel;

/// Read a raw JSON document of any shape.
pub fn load_json_file(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path:?}"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON: {path:?}"))
}

/// Read and parse a single-channel document into a transcript model.
pub fn load_transcript_file(path: &Path) -> Result<TranscriptModel> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path:?}"))?;
    Ok(TranscriptModel::from_json(&content)?)
}

/// Read a speaker policy from a YAML file. Validation is the caller's
/// concern; an invalid policy is handled by disabling speaker rendering.
pub fn load_policy_file(path: &Path) -> Result<SpeakerPolicy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file: {path:?}"))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse policy YAML: {path:?}"))
}
