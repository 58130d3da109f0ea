//! Duration quantization: continuous spans to categorical note durations.
//!
//! The thresholds are fixed absolute seconds, independent of tempo. This is
//! a deliberately coarse mapping (no tempo estimation happens anywhere in
//! the pipeline) and a known limitation, not a precision guarantee.

use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult};
use crate::event::NoteCandidate;
use crate::pitch::Pitch;

/// Categorical note duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationClass {
    /// Half a quarter-note unit.
    Eighth,
    /// One quarter-note unit.
    Quarter,
    /// Two quarter-note units.
    Half,
    /// Four quarter-note units.
    Whole,
}

impl DurationClass {
    /// Duration weight in quarter-note units.
    pub fn weight(&self) -> f64 {
        match self {
            DurationClass::Eighth => 0.5,
            DurationClass::Quarter => 1.0,
            DurationClass::Half => 2.0,
            DurationClass::Whole => 4.0,
        }
    }

    /// Lowercase name as used in note logs (e.g., "quarter").
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationClass::Eighth => "eighth",
            DurationClass::Quarter => "quarter",
            DurationClass::Half => "half",
            DurationClass::Whole => "whole",
        }
    }

    /// Classes in descending weight order. Used by the split overflow
    /// policy to decompose a remainder into tied notes.
    pub const DESCENDING: [DurationClass; 4] = [
        DurationClass::Whole,
        DurationClass::Half,
        DurationClass::Quarter,
        DurationClass::Eighth,
    ];
}

impl std::fmt::Display for DurationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a span in seconds to its duration class.
///
/// Half-open intervals, closed on the lower bound, first match wins:
/// `[0, 0.25)` eighth, `[0.25, 0.5)` quarter, `[0.5, 1.0)` half,
/// `[1.0, inf)` whole.
///
/// # Errors
///
/// Zero and negative spans are invalid input, never silently classified.
pub fn classify_span(span_seconds: f64) -> TranscribeResult<DurationClass> {
    if !(span_seconds > 0.0) {
        return Err(TranscribeError::InvalidSpan {
            span: span_seconds,
            start: 0.0,
            end: span_seconds,
        });
    }
    Ok(if span_seconds < 0.25 {
        DurationClass::Eighth
    } else if span_seconds < 0.5 {
        DurationClass::Quarter
    } else if span_seconds < 1.0 {
        DurationClass::Half
    } else {
        DurationClass::Whole
    })
}

/// A note with categorical duration, ready for measure packing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizedNote {
    /// The note's pitch.
    pub pitch: Pitch,
    /// Categorical duration.
    pub duration: DurationClass,
    /// The original continuous span in seconds, kept for diagnostics.
    pub span_seconds: f64,
    /// True when this note is the non-final part of a note split across a
    /// measure boundary (split overflow policy only).
    pub tied: bool,
}

impl QuantizedNote {
    /// Creates an untied quantized note.
    pub fn new(pitch: Pitch, duration: DurationClass, span_seconds: f64) -> Self {
        Self {
            pitch,
            duration,
            span_seconds,
            tied: false,
        }
    }
}

/// Quantizes candidates in order, preserving their original spans for
/// diagnostics.
///
/// # Errors
///
/// Fails on the first candidate with a non-positive span.
pub fn quantize_candidates(candidates: &[NoteCandidate]) -> TranscribeResult<Vec<QuantizedNote>> {
    candidates
        .iter()
        .map(|c| {
            let span = c.span();
            let duration = classify_span(span).map_err(|_| TranscribeError::invalid_span(c.start, c.end))?;
            Ok(QuantizedNote::new(c.pitch, duration, span))
        })
        .collect()
}
