//! The upstream analysis handoff.
//!
//! The audio analyzer (pitch estimator + onset detector) runs outside this
//! crate. Its result arrives as one JSON document with parallel per-frame
//! pitch and confidence arrays plus an onset timestamp array; this module
//! only defines the shape and checks the invariants the pipeline relies on.

use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult};
use crate::pitch::PitchValue;
use crate::track::FrameTiming;

/// Raw analysis of one recording, as produced by the upstream collaborator.
///
/// `pitch_hz` and `confidence` are parallel arrays, one entry per analysis
/// frame; a `null` pitch entry means the estimator reported no pitch for
/// that frame. `onsets` are detected note-start timestamps in seconds,
/// strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Sample rate of the analyzed audio.
    pub sample_rate: u32,
    /// Hop size of the analysis frames, in samples.
    pub hop_size: u32,
    /// Per-frame pitch estimate; unvoiced where the estimator gave up.
    pub pitch_hz: Vec<PitchValue>,
    /// Per-frame confidence in [0, 1].
    pub confidence: Vec<f64>,
    /// Onset timestamps in seconds, strictly increasing.
    pub onsets: Vec<f64>,
}

impl AnalysisInput {
    /// Parses an analysis input from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Frame timing derived from the analysis parameters.
    pub fn frame_timing(&self) -> TranscribeResult<FrameTiming> {
        FrameTiming::new(self.sample_rate, self.hop_size)
    }

    /// Checks the structural invariants the pipeline relies on. The
    /// pipeline re-checks these itself; this is for callers that want to
    /// validate before running.
    pub fn validate(&self) -> TranscribeResult<()> {
        self.frame_timing()?;
        if self.pitch_hz.len() != self.confidence.len() {
            return Err(TranscribeError::FrameCountMismatch {
                pitches: self.pitch_hz.len(),
                confidences: self.confidence.len(),
            });
        }
        if self.pitch_hz.is_empty() && !self.onsets.is_empty() {
            return Err(TranscribeError::EmptyPitchTrack {
                onsets: self.onsets.len(),
            });
        }
        crate::onset::OnsetTimeline::new(self.onsets.clone())?;
        Ok(())
    }
}
