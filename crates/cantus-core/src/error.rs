//! Error and warning types for the transcription pipeline.

use thiserror::Error;

/// Result type for transcription operations.
pub type TranscribeResult<T> = Result<T, TranscribeError>;

/// Fatal input errors. Any of these aborts the current run; no partial
/// score is returned.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// Onset timestamps must be strictly increasing.
    #[error("onset timeline is not strictly increasing: onset[{index}] = {value} follows {previous}")]
    NonIncreasingOnsets {
        /// Index of the offending onset.
        index: usize,
        /// The offending timestamp.
        value: f64,
        /// The preceding timestamp.
        previous: f64,
    },

    /// Onset timestamp is not a finite number.
    #[error("onset[{index}] is not a finite timestamp")]
    NonFiniteOnset {
        /// Index of the offending onset.
        index: usize,
    },

    /// The pitch track is empty but the onset timeline is not.
    #[error("pitch track is empty but {onsets} onsets were supplied")]
    EmptyPitchTrack {
        /// Number of onsets in the timeline.
        onsets: usize,
    },

    /// Pitch and confidence arrays must have the same length.
    #[error("analysis arrays disagree in length: {pitches} pitch frames, {confidences} confidence values")]
    FrameCountMismatch {
        /// Length of the pitch array.
        pitches: usize,
        /// Length of the confidence array.
        confidences: usize,
    },

    /// Confidence threshold outside [0, 1]. The pipeline never clamps.
    #[error("confidence threshold {threshold} is outside [0, 1]")]
    ThresholdOutOfRange {
        /// The rejected threshold.
        threshold: f64,
    },

    /// A note candidate with zero or negative span reached the quantizer.
    #[error("note span must be positive, got {span} seconds (start {start}, end {end})")]
    InvalidSpan {
        /// The non-positive span in seconds.
        span: f64,
        /// Candidate start time.
        start: f64,
        /// Candidate end time.
        end: f64,
    },

    /// Time signature with non-positive measure capacity.
    #[error("time signature {numerator}/{denominator} has no positive measure capacity")]
    InvalidTimeSignature {
        /// Beats per measure.
        numerator: u32,
        /// Beat unit.
        denominator: u32,
    },

    /// Frame timing with a zero sample rate or hop size.
    #[error("frame timing is degenerate: sample rate {sample_rate}, hop size {hop_size}")]
    InvalidFrameTiming {
        /// Samples per second.
        sample_rate: u32,
        /// Samples between analysis frames.
        hop_size: u32,
    },
}

impl TranscribeError {
    /// Creates an error for an onset that does not increase over its predecessor.
    pub fn non_increasing(index: usize, value: f64, previous: f64) -> Self {
        Self::NonIncreasingOnsets {
            index,
            value,
            previous,
        }
    }

    /// Creates an error for a non-positive candidate span.
    pub fn invalid_span(start: f64, end: f64) -> Self {
        Self::InvalidSpan {
            span: end - start,
            start,
            end,
        }
    }
}

/// Warning codes for recoverable degraded-estimate conditions.
///
/// Every fallback the pipeline takes is reported with one of these codes;
/// nothing is swallowed. Codes are stable strings so callers can match on
/// them across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: The entire pitch track fell below the confidence threshold and
    /// was replaced with the default pitch.
    UnvoicedTrack,
    /// W002: A candidate's sampled pitch was unusable and the default pitch
    /// was substituted.
    DefaultPitchSubstituted,
    /// W003: An unvoiced gap was filled by interpolation or hold.
    LowConfidenceFill,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnvoicedTrack => "W001",
            WarningCode::DefaultPitchSubstituted => "W002",
            WarningCode::LowConfidenceFill => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A recoverable degraded-estimate warning with code and message.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TranscribeWarning {
    /// Stable warning code (e.g., "W002").
    pub code: String,
    /// Human-readable description of the fallback that was taken.
    pub message: String,
}

impl TranscribeWarning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code().to_string(),
            message: message.into(),
        }
    }
}
