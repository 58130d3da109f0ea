//! Validate command implementation
//!
//! Checks an analysis input file against the pipeline's invariants without
//! transcribing.

use anyhow::{Context, Result};
use cantus_core::AnalysisInput;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

/// Machine-readable output of the validate command.
#[derive(Serialize)]
struct ValidateOutput {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    frames: usize,
    onsets: usize,
}

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(input_path: &str, json_output: bool) -> Result<ExitCode> {
    let json = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read analysis input: {}", input_path))?;
    let input = AnalysisInput::from_json(&json)
        .with_context(|| format!("Failed to parse analysis input: {}", input_path))?;

    let result = input.validate();
    let ok = result.is_ok();

    if json_output {
        let output = ValidateOutput {
            ok,
            error: result.as_ref().err().map(|e| e.to_string()),
            frames: input.pitch_hz.len(),
            onsets: input.onsets.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), input_path);
        println!(
            "{} {} frames, {} onsets",
            "Input:".dimmed(),
            input.pitch_hz.len(),
            input.onsets.len()
        );
        match &result {
            Ok(()) => println!("{}", "OK".green().bold()),
            Err(e) => eprintln!("{} {}", "invalid:".red().bold(), e),
        }
    }

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
