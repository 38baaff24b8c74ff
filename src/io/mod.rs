pub mod input;

pub use input::{load_json_file, load_policy_file, load_transcript_file};
