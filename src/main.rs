use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use palaver::{
    load_json_file, load_policy_file, load_transcript_file, parse_response, render_json,
    render_markdown, render_srt, render_summary, speaker_segments, speaker_statistics,
    FieldAnalyzer, TranscriptModel,
};

#[derive(Parser)]
#[command(name = "palaver")]
#[command(author, version, about = "Transcript normalization and multi-format rendering pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Srt,
    Markdown,
    Json,
    Summary,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single-channel transcript document into an output format
    Convert {
        /// Input transcript file (single-channel JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "srt")]
        format: OutputFormat,

        /// Speaker policy YAML file for speaker-aware SRT rendering
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Normalize a raw API response into canonical segments
    Normalize {
        /// Input raw response file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Explore the fields of normalized segment records
    Fields {
        /// Input raw response file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Only show segments matching this topic
        #[arg(long)]
        topic: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print speaker and summary statistics for a transcript
    Analyze {
        /// Input transcript file (single-channel JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            policy,
            verbose,
        } => {
            setup_logging(verbose);
            convert(input, output, format, policy)
        }
        Commands::Normalize {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            normalize(input, output)
        }
        Commands::Fields {
            input,
            topic,
            verbose,
        } => {
            setup_logging(verbose);
            explore_fields(input, topic)
        }
        Commands::Analyze { input, verbose } => {
            setup_logging(verbose);
            analyze(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn convert(
    input: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    policy_path: Option<PathBuf>,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let model = load_transcript_file(&input).context("Failed to parse input transcript")?;

    let rendered = match format {
        OutputFormat::Srt => render_srt_with_policy(&model, policy_path)?,
        OutputFormat::Markdown => render_markdown(&model),
        OutputFormat::Json => render_json(&model),
        OutputFormat::Summary => render_summary(&model),
    };

    write_output(&rendered, output)
}

fn render_srt_with_policy(model: &TranscriptModel, policy_path: Option<PathBuf>) -> Result<String> {
    let Some(path) = policy_path else {
        return Ok(render_srt(model.paragraphs(), None, None));
    };

    let mut policy = load_policy_file(&path)?;
    if let Err(reason) = policy.validate() {
        warn!("Invalid speaker policy, disabling speaker rendering: {reason}");
        policy.enable = false;
    }

    if !policy.enable || !model.has_speaker_data() {
        return Ok(render_srt(model.paragraphs(), None, None));
    }

    let segments = speaker_segments(model.words_with_speaker_info(), policy.confidence_threshold);
    info!(
        "Speaker rendering active: {} segments from {} words",
        segments.len(),
        model.words_with_speaker_info().len()
    );
    Ok(render_srt(model.paragraphs(), Some(&segments), Some(&policy)))
}

fn normalize(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    info!("Normalizing raw response from {:?}", input);
    let doc = load_json_file(&input)?;
    let segments = parse_response(&doc).context("Failed to normalize response")?;

    info!("Normalized {} segments", segments.len());
    let rendered = serde_json::to_string_pretty(&segments)?;
    write_output(&rendered, output)
}

fn explore_fields(input: PathBuf, topic: Option<String>) -> Result<()> {
    let doc = load_json_file(&input)?;
    let segments = parse_response(&doc).context("Failed to normalize response")?;
    let records = segments
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    let analyzer = FieldAnalyzer::new(records);

    let stats = analyzer.summary_stats();
    println!("Segments: {}", stats.total_segments);
    println!("Available fields: {}", stats.available_fields);
    println!("Fields with data: {}", stats.fields_with_data);
    println!();

    println!("Field options:");
    for label in analyzer.get_field_options() {
        println!("- {label}");
    }

    if let Some(topic) = topic {
        println!();
        println!("Segments on {topic:?}:");
        for record in analyzer.filter_by_topic(&topic) {
            let transcript = record
                .get("transcript")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("");
            println!("- {transcript}");
        }
    }

    Ok(())
}

fn analyze(input: PathBuf) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let model = load_transcript_file(&input).context("Failed to parse input transcript")?;

    let stats = model.summary_stats();
    println!("Transcript Analysis");
    println!("===================");
    println!("Total words: {}", stats.total_words);
    println!("Total sentences: {}", stats.total_sentences);
    println!("Total paragraphs: {}", stats.total_paragraphs);
    println!("Transcript length: {}", stats.transcript_length);
    println!("Total topics: {}", stats.total_topics);
    println!("Total intents: {}", stats.total_intents);
    println!();

    if !model.has_speaker_data() {
        println!("No speaker data present.");
        return Ok(());
    }

    let speaker_stats = speaker_statistics(model.words());
    println!("Speaker Statistics");
    println!("------------------");
    println!("Speakers: {}", speaker_stats.speaker_count);
    println!(
        "Words with speaker data: {}",
        speaker_stats.total_words_with_speaker_data
    );
    println!(
        "Overall avg confidence: {:.2}",
        speaker_stats.overall_avg_confidence
    );
    for (speaker, per_speaker) in &speaker_stats.speakers {
        println!(
            "Speaker {}: {} words, avg conf {:.2}",
            speaker, per_speaker.word_count, per_speaker.avg_confidence
        );
    }

    Ok(())
}

fn write_output(rendered: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write output: {path:?}"))?;
            info!("Output written to {:?}", path);
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
