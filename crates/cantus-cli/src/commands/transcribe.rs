//! Transcribe command implementation
//!
//! Runs the full pipeline over an analysis input file, writes the LilyPond
//! output, and optionally renders a PDF.

use anyhow::{Context, Result};
use cantus_backend_lilypond::{Renderer, RendererConfig};
use cantus_core::{transcribe, AnalysisInput, Overflow, TimeSignature, TranscribeConfig};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Options for one transcribe run, assembled from CLI arguments.
pub struct TranscribeArgs<'a> {
    pub input: &'a str,
    pub output: Option<&'a str>,
    pub threshold: f64,
    pub time_signature: &'a str,
    pub split_measures: bool,
    pub render: bool,
    pub lilypond: Option<&'a str>,
    pub json: bool,
}

/// Machine-readable output of the transcribe command.
#[derive(Serialize)]
struct TranscribeOutput {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcription: Option<cantus_core::Transcription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lilypond_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_file: Option<PathBuf>,
}

/// Run the transcribe command
///
/// # Returns
/// Exit code: 0 success, 1 input error, 2 render error
pub fn run(args: &TranscribeArgs) -> Result<ExitCode> {
    let config = build_config(args)?;

    let raw = std::fs::read_to_string(args.input)
        .with_context(|| format!("Failed to read analysis input: {}", args.input))?;
    let input = AnalysisInput::from_json(&raw)
        .with_context(|| format!("Failed to parse analysis input: {}", args.input))?;

    let result = match transcribe(&input, &config) {
        Ok(result) => result,
        Err(e) => {
            if args.json {
                print_json(&TranscribeOutput {
                    ok: false,
                    error: Some(e.to_string()),
                    transcription: None,
                    lilypond_file: None,
                    pdf_file: None,
                })?;
            } else {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
            return Ok(ExitCode::from(1));
        }
    };

    if !args.json {
        println!("{} {}", "Transcribing:".cyan().bold(), args.input);
        for note in &result.notes {
            println!(
                "  {} {} ({}, {:.3}s - {:.3}s)",
                "+".green(),
                note.name,
                note.duration,
                note.start,
                note.end
            );
        }
        for warning in &result.warnings {
            println!(
                "  {} [{}] {}",
                "!".yellow(),
                warning.code.dimmed(),
                warning.message
            );
        }
        println!(
            "{} {} notes in {} measures",
            "Score:".cyan().bold(),
            result.score.note_count(),
            result.score.measures.len()
        );
    }

    let ly_path = output_path(args.input, args.output);
    let renderer = Renderer::with_config(renderer_config(args));
    renderer
        .write_source(&result.score, &ly_path)
        .with_context(|| format!("Failed to write LilyPond output: {}", ly_path.display()))?;
    if !args.json {
        println!("{} {}", "Wrote:".cyan().bold(), ly_path.display());
    }

    let mut pdf_file = None;
    if args.render {
        let out_dir = ly_path.parent().unwrap_or(Path::new("."));
        let basename = ly_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("score");
        match renderer.render(&result.score, out_dir, basename) {
            Ok(pdf) => {
                if !args.json {
                    println!("{} {}", "Rendered:".cyan().bold(), pdf.display());
                }
                pdf_file = Some(pdf);
            }
            Err(e) => {
                // Collaborator failures are surfaced as-is, never retried.
                if args.json {
                    print_json(&TranscribeOutput {
                        ok: false,
                        error: Some(e.to_string()),
                        transcription: Some(result),
                        lilypond_file: Some(ly_path),
                        pdf_file: None,
                    })?;
                } else {
                    eprintln!("{} {}", "render error:".red().bold(), e);
                }
                return Ok(ExitCode::from(2));
            }
        }
    }

    if args.json {
        print_json(&TranscribeOutput {
            ok: true,
            error: None,
            transcription: Some(result),
            lilypond_file: Some(ly_path),
            pdf_file,
        })?;
    }

    Ok(ExitCode::SUCCESS)
}

fn build_config(args: &TranscribeArgs) -> Result<TranscribeConfig> {
    let time_signature: TimeSignature = args
        .time_signature
        .parse()
        .with_context(|| format!("Invalid time signature: {}", args.time_signature))?;
    let overflow = if args.split_measures {
        Overflow::Split
    } else {
        Overflow::Allow
    };
    Ok(TranscribeConfig::default()
        .confidence_threshold(args.threshold)
        .time_signature(time_signature)
        .overflow(overflow))
}

fn renderer_config(args: &TranscribeArgs) -> RendererConfig {
    let mut config = RendererConfig::default();
    if let Some(path) = args.lilypond {
        config = config.lilypond_path(path);
    }
    config
}

fn output_path(input: &str, output: Option<&str>) -> PathBuf {
    match output {
        Some(path) => PathBuf::from(path),
        None => Path::new(input).with_extension("ly"),
    }
}

fn print_json(output: &TranscribeOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
