//! The transcription pipeline: analysis input to assembled score.
//!
//! Stages run strictly forward, each fully consuming its input before the
//! next begins: pitch filtering, event extraction, duration quantization,
//! measure packing, score assembly. Degraded estimates never abort the run;
//! every fallback is collected as a warning on the result.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisInput;
use crate::error::{TranscribeResult, TranscribeWarning};
use crate::event::extract_candidates;
use crate::measure::{pack_measures, Overflow, TimeSignature};
use crate::onset::OnsetTimeline;
use crate::quantize::quantize_candidates;
use crate::score::Score;
use crate::track::PitchTrack;

/// Default confidence threshold for pitch filtering.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Pipeline configuration. Explicit and passed by value; there is no
/// process-global configuration anywhere in the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranscribeConfig {
    /// Confidence threshold in [0, 1]; frames below it are unvoiced.
    pub confidence_threshold: f64,
    /// Active time signature; sets the measure capacity.
    pub time_signature: TimeSignature,
    /// Measure overflow policy.
    pub overflow: Overflow,
}

impl Default for TranscribeConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            time_signature: TimeSignature::COMMON,
            overflow: Overflow::Allow,
        }
    }
}

impl TranscribeConfig {
    /// Sets the confidence threshold.
    pub fn confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Sets the time signature.
    pub fn time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.time_signature = time_signature;
        self
    }

    /// Sets the overflow policy.
    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }
}

/// One entry of the note-by-note log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDiagnostic {
    /// Spelled pitch name (e.g., "C4").
    pub name: String,
    /// Categorical duration name (e.g., "quarter").
    pub duration: String,
    /// Candidate start time in seconds.
    pub start: f64,
    /// Candidate end time in seconds.
    pub end: f64,
}

/// A completed transcription: the score plus everything the run reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// The assembled score.
    pub score: Score,
    /// Every degraded-estimate fallback the run took, in stage order.
    pub warnings: Vec<TranscribeWarning>,
    /// Per-note diagnostics in note order.
    pub notes: Vec<NoteDiagnostic>,
}

/// Runs the full pipeline over one analysis input.
///
/// # Errors
///
/// Fails on invalid input (bad threshold, mismatched arrays, non-increasing
/// onsets, empty pitch track with onsets present, degenerate time
/// signature); no partial score is returned.
pub fn transcribe(
    input: &AnalysisInput,
    config: &TranscribeConfig,
) -> TranscribeResult<Transcription> {
    let timing = input.frame_timing()?;
    let onsets = OnsetTimeline::new(input.onsets.clone())?;

    let filtered = PitchTrack::filter(
        &input.pitch_hz,
        &input.confidence,
        config.confidence_threshold,
        timing,
    )?;
    let mut warnings = filtered.warnings;

    let extracted = extract_candidates(&onsets, &filtered.track)?;
    warnings.extend(extracted.warnings);

    let notes = quantize_candidates(&extracted.candidates)?;

    let diagnostics: Vec<NoteDiagnostic> = notes
        .iter()
        .zip(extracted.candidates.iter())
        .map(|(note, candidate)| NoteDiagnostic {
            name: note.pitch.name(),
            duration: note.duration.as_str().to_string(),
            start: candidate.start,
            end: candidate.end,
        })
        .collect();

    let measures = pack_measures(&notes, config.time_signature, config.overflow)?;
    let score = Score::assemble(config.time_signature, measures);

    Ok(Transcription {
        score,
        warnings,
        notes: diagnostics,
    })
}
