//! Pitch track filtering.
//!
//! The raw per-frame estimates from the upstream analyzer arrive with a
//! parallel confidence signal. Filtering resolves every low-confidence or
//! missing frame to a concrete frequency: interior gaps by linear
//! interpolation between the nearest voiced neighbors, leading and trailing
//! gaps by holding the nearest voiced value. The filtered track is dense by
//! construction.

use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult, TranscribeWarning, WarningCode};
use crate::pitch::{PitchValue, MIDDLE_C_HZ};

/// Frame timing of the upstream analysis: maps frame indices to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTiming {
    /// Samples per second.
    pub sample_rate: u32,
    /// Samples between consecutive analysis frames.
    pub hop_size: u32,
}

impl FrameTiming {
    /// Creates a frame timing, rejecting degenerate values.
    pub fn new(sample_rate: u32, hop_size: u32) -> TranscribeResult<Self> {
        if sample_rate == 0 || hop_size == 0 {
            return Err(TranscribeError::InvalidFrameTiming {
                sample_rate,
                hop_size,
            });
        }
        Ok(Self {
            sample_rate,
            hop_size,
        })
    }

    /// Seconds at the start of the given frame.
    pub fn frame_to_seconds(&self, frame: usize) -> f64 {
        frame as f64 * self.hop_size as f64 / self.sample_rate as f64
    }

    /// Index of the analysis frame nearest to the given time.
    pub fn nearest_frame(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64 / self.hop_size as f64).round() as usize
    }
}

/// A filtered, dense pitch track: one concrete frequency per analysis frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchTrack {
    frequencies: Vec<f64>,
    timing: FrameTiming,
}

/// Result of filtering: the dense track plus any degraded-estimate warnings.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// The filtered track.
    pub track: PitchTrack,
    /// Warnings for every fallback taken during filtering.
    pub warnings: Vec<TranscribeWarning>,
}

impl PitchTrack {
    /// Filters raw per-frame estimates into a dense track.
    ///
    /// A frame is voiced when its confidence is at least `threshold` (the
    /// boundary itself is accepted) and its raw estimate is a finite
    /// positive frequency. Everything else is resolved by interpolation or
    /// hold; a track with no voiced frame at all becomes constant middle C.
    ///
    /// # Errors
    ///
    /// Rejects thresholds outside `[0, 1]` and mismatched array lengths.
    /// The threshold is never clamped.
    pub fn filter(
        pitch_hz: &[PitchValue],
        confidence: &[f64],
        threshold: f64,
        timing: FrameTiming,
    ) -> TranscribeResult<FilterOutcome> {
        if !(0.0..=1.0).contains(&threshold) || threshold.is_nan() {
            return Err(TranscribeError::ThresholdOutOfRange { threshold });
        }
        if pitch_hz.len() != confidence.len() {
            return Err(TranscribeError::FrameCountMismatch {
                pitches: pitch_hz.len(),
                confidences: confidence.len(),
            });
        }

        let voiced: Vec<Option<f64>> = pitch_hz
            .iter()
            .zip(confidence.iter())
            .map(|(value, conf)| match value.frequency() {
                Some(hz) if *conf >= threshold => Some(hz),
                _ => None,
            })
            .collect();

        let mut warnings = Vec::new();
        let gap_count = voiced.iter().filter(|v| v.is_none()).count();

        if gap_count == voiced.len() {
            // Nothing to anchor interpolation on.
            if !voiced.is_empty() {
                warnings.push(TranscribeWarning::new(
                    WarningCode::UnvoicedTrack,
                    format!(
                        "all {} frames below threshold {}; track replaced with middle C",
                        voiced.len(),
                        threshold
                    ),
                ));
            }
            return Ok(FilterOutcome {
                track: Self {
                    frequencies: vec![MIDDLE_C_HZ; voiced.len()],
                    timing,
                },
                warnings,
            });
        }

        let frequencies = fill_gaps(&voiced);
        if gap_count > 0 {
            warnings.push(TranscribeWarning::new(
                WarningCode::LowConfidenceFill,
                format!(
                    "{} of {} frames below threshold {}; filled by interpolation/hold",
                    gap_count,
                    voiced.len(),
                    threshold
                ),
            ));
        }

        Ok(FilterOutcome {
            track: Self { frequencies, timing },
            warnings,
        })
    }

    /// Number of frames in the track.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the track has no frames.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frame timing of the track.
    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// Frequency at the given frame, if in range.
    pub fn frequency_at(&self, frame: usize) -> Option<f64> {
        self.frequencies.get(frame).copied()
    }

    /// Frequency at the frame nearest to the given time, if in range.
    pub fn frequency_near(&self, seconds: f64) -> Option<f64> {
        self.frequency_at(self.timing.nearest_frame(seconds))
    }
}

/// Fills `None` gaps in a sparse series. Interior gaps are linearly
/// interpolated between the surrounding values; leading and trailing gaps
/// hold the nearest value. At least one `Some` must be present.
fn fill_gaps(sparse: &[Option<f64>]) -> Vec<f64> {
    let mut filled = vec![0.0; sparse.len()];

    let first_voiced = sparse.iter().position(|v| v.is_some()).unwrap_or(0);
    let last_voiced = sparse
        .iter()
        .rposition(|v| v.is_some())
        .unwrap_or(sparse.len().saturating_sub(1));

    let mut prev: Option<(usize, f64)> = None;
    for (i, value) in sparse.iter().enumerate() {
        match value {
            Some(hz) => {
                // Interpolate the gap we just crossed.
                if let Some((pi, phz)) = prev {
                    let gap = i - pi;
                    for (step, slot) in filled[pi + 1..i].iter_mut().enumerate() {
                        let frac = (step + 1) as f64 / gap as f64;
                        *slot = phz + (hz - phz) * frac;
                    }
                }
                filled[i] = *hz;
                prev = Some((i, *hz));
            }
            None => {
                if i < first_voiced {
                    // Backward-fill from the first voiced frame.
                    filled[i] = sparse[first_voiced].unwrap_or(MIDDLE_C_HZ);
                } else if i > last_voiced {
                    // Forward-fill from the last voiced frame.
                    filled[i] = sparse[last_voiced].unwrap_or(MIDDLE_C_HZ);
                }
                // Interior gaps are written when the closing frame arrives.
            }
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn timing() -> FrameTiming {
        FrameTiming::new(22050, 512).unwrap()
    }

    fn voiced(hz: f64) -> PitchValue {
        PitchValue::Voiced(hz)
    }

    #[test]
    fn test_frame_timing_rejects_degenerate() {
        assert!(FrameTiming::new(0, 512).is_err());
        assert!(FrameTiming::new(22050, 0).is_err());
    }

    #[test]
    fn test_nearest_frame_roundtrip() {
        let t = timing();
        for frame in [0usize, 1, 10, 100] {
            let seconds = t.frame_to_seconds(frame);
            assert_eq!(t.nearest_frame(seconds), frame);
        }
    }

    #[test]
    fn test_filter_keeps_confident_frames() {
        let pitch = vec![voiced(440.0), voiced(220.0), voiced(330.0)];
        let conf = vec![0.9, 0.95, 1.0];
        let out = PitchTrack::filter(&pitch, &conf, 0.8, timing()).unwrap();
        assert_eq!(out.track.frequency_at(0), Some(440.0));
        assert_eq!(out.track.frequency_at(1), Some(220.0));
        assert_eq!(out.track.frequency_at(2), Some(330.0));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_threshold_boundary_is_accepted() {
        // Confidence exactly equal to the threshold is voiced.
        let pitch = vec![voiced(440.0), voiced(220.0)];
        let conf = vec![0.8, 0.79];
        let out = PitchTrack::filter(&pitch, &conf, 0.8, timing()).unwrap();
        assert_eq!(out.track.frequency_at(0), Some(440.0));
        // Frame 1 was filtered and forward-filled, not kept.
        assert_eq!(out.track.frequency_at(1), Some(440.0));
    }

    #[test]
    fn test_interior_gap_is_interpolated() {
        let pitch = vec![
            voiced(100.0),
            PitchValue::Unvoiced,
            PitchValue::Unvoiced,
            PitchValue::Unvoiced,
            voiced(500.0),
        ];
        let conf = vec![1.0, 0.0, 0.0, 0.0, 1.0];
        let out = PitchTrack::filter(&pitch, &conf, 0.8, timing()).unwrap();
        assert_eq!(out.track.frequency_at(1), Some(200.0));
        assert_eq!(out.track.frequency_at(2), Some(300.0));
        assert_eq!(out.track.frequency_at(3), Some(400.0));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].code, "W003");
    }

    #[test]
    fn test_edges_are_held() {
        let pitch = vec![
            PitchValue::Unvoiced,
            PitchValue::Unvoiced,
            voiced(440.0),
            PitchValue::Unvoiced,
            PitchValue::Unvoiced,
        ];
        let conf = vec![0.0, 0.0, 1.0, 0.0, 0.0];
        let out = PitchTrack::filter(&pitch, &conf, 0.8, timing()).unwrap();
        for frame in 0..5 {
            assert_eq!(out.track.frequency_at(frame), Some(440.0));
        }
    }

    #[test]
    fn test_fully_unvoiced_track_falls_back_to_middle_c() {
        let pitch = vec![voiced(440.0), voiced(220.0), PitchValue::Unvoiced];
        let conf = vec![0.1, 0.2, 0.0];
        let out = PitchTrack::filter(&pitch, &conf, 0.8, timing()).unwrap();
        for frame in 0..3 {
            assert_eq!(out.track.frequency_at(frame), Some(MIDDLE_C_HZ));
        }
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].code, "W001");
    }

    #[test]
    fn test_unusable_raw_values_are_gaps() {
        // High confidence does not rescue a NaN or non-positive estimate.
        let pitch = vec![
            voiced(440.0),
            voiced(f64::NAN),
            voiced(-5.0),
            PitchValue::Unvoiced,
            voiced(440.0),
        ];
        let conf = vec![1.0, 1.0, 1.0, 1.0, 1.0];
        let out = PitchTrack::filter(&pitch, &conf, 0.8, timing()).unwrap();
        for frame in 0..5 {
            assert_eq!(out.track.frequency_at(frame), Some(440.0));
        }
    }

    #[test]
    fn test_threshold_out_of_range() {
        let pitch = vec![voiced(440.0)];
        let conf = vec![1.0];
        assert!(PitchTrack::filter(&pitch, &conf, -0.1, timing()).is_err());
        assert!(PitchTrack::filter(&pitch, &conf, 1.1, timing()).is_err());
        assert!(PitchTrack::filter(&pitch, &conf, f64::NAN, timing()).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let pitch = vec![voiced(440.0), voiced(220.0)];
        let conf = vec![1.0];
        let err = PitchTrack::filter(&pitch, &conf, 0.8, timing()).unwrap_err();
        assert!(err.to_string().contains("disagree in length"));
    }

    #[test]
    fn test_empty_track() {
        let out = PitchTrack::filter(&[], &[], 0.8, timing()).unwrap();
        assert!(out.track.is_empty());
        assert!(out.warnings.is_empty());
    }
}
