//! CLI argument definitions for the Cantus command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined
//! here, keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Cantus - Monophonic Melody Transcription
#[derive(Parser)]
#[command(name = "cantus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transcribe an analysis input file into a score
    Transcribe {
        /// Path to the analysis input JSON (pitch/confidence frames + onsets)
        #[arg(short, long)]
        input: String,

        /// Output LilyPond file path (default: input path with .ly extension)
        #[arg(short, long)]
        output: Option<String>,

        /// Confidence threshold in [0, 1] for pitch filtering
        #[arg(short, long, default_value_t = cantus_core::DEFAULT_CONFIDENCE_THRESHOLD)]
        threshold: f64,

        /// Time signature (e.g., 4/4, 3/4)
        #[arg(long, default_value = "4/4")]
        time_signature: String,

        /// Split notes at measure boundaries instead of letting a measure
        /// close over-full
        #[arg(long)]
        split_measures: bool,

        /// Also render the score to PDF with LilyPond
        #[arg(long)]
        render: bool,

        /// Path to the LilyPond executable (overrides PATH lookup)
        #[arg(long)]
        lilypond: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate an analysis input file without transcribing
    Validate {
        /// Path to the analysis input JSON
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_transcribe() {
        let cli = Cli::try_parse_from([
            "cantus",
            "transcribe",
            "--input",
            "melody.json",
            "--render",
            "--time-signature",
            "3/4",
        ])
        .unwrap();
        match cli.command {
            Commands::Transcribe {
                input,
                render,
                time_signature,
                threshold,
                split_measures,
                ..
            } => {
                assert_eq!(input, "melody.json");
                assert!(render);
                assert_eq!(time_signature, "3/4");
                assert_eq!(threshold, cantus_core::DEFAULT_CONFIDENCE_THRESHOLD);
                assert!(!split_measures);
            }
            _ => panic!("expected transcribe command"),
        }
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from(["cantus", "validate", "-i", "melody.json", "--json"])
            .unwrap();
        match cli.command {
            Commands::Validate { input, json } => {
                assert_eq!(input, "melody.json");
                assert!(json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["cantus", "transcribe"]).is_err());
    }
}
