//! Cantus CLI - Command-line interface for melody transcription
//!
//! This binary transcribes analysis input files (per-frame pitch and
//! confidence plus onset timestamps) into quantized scores, writes
//! LilyPond output, and optionally renders PDFs.

use clap::Parser;
use std::process::ExitCode;

use cantus_cli::cli_args::{Cli, Commands};
use cantus_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transcribe {
            input,
            output,
            threshold,
            time_signature,
            split_measures,
            render,
            lilypond,
            json,
        } => commands::transcribe::run(&commands::transcribe::TranscribeArgs {
            input: &input,
            output: output.as_deref(),
            threshold,
            time_signature: &time_signature,
            split_measures,
            render,
            lilypond: lilypond.as_deref(),
            json,
        }),
        Commands::Validate { input, json } => commands::validate::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
