//! Event extraction: onset boundaries plus the filtered pitch track become
//! discrete note candidates.

use crate::error::{TranscribeError, TranscribeResult, TranscribeWarning, WarningCode};
use crate::onset::OnsetTimeline;
use crate::pitch::Pitch;
use crate::track::PitchTrack;

/// A pitched span between two onset boundaries. Transient: lives only
/// between extraction and quantization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteCandidate {
    /// The candidate's pitch.
    pub pitch: Pitch,
    /// Start time in seconds (the opening onset).
    pub start: f64,
    /// End time in seconds (the closing onset).
    pub end: f64,
}

impl NoteCandidate {
    /// The candidate's span in seconds.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Result of extraction: candidates plus any default-pitch substitutions.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    /// One candidate per adjacent onset pair, in onset order.
    pub candidates: Vec<NoteCandidate>,
    /// One warning per candidate that received the default pitch.
    pub warnings: Vec<TranscribeWarning>,
}

/// Converts adjacent onset pairs into note candidates.
///
/// For candidate `i`, the pitch is the filtered track value at the frame
/// nearest `onset[i]`: a single representative sample, not an average over
/// the span. A candidate whose sampled value is unusable (frame out of
/// range, or not a finite positive frequency) is assigned middle C and the
/// substitution is reported as a warning, one per affected candidate.
///
/// # Errors
///
/// A non-empty timeline over an empty pitch track is an input error.
pub fn extract_candidates(
    onsets: &OnsetTimeline,
    track: &PitchTrack,
) -> TranscribeResult<ExtractOutcome> {
    if track.is_empty() && !onsets.is_empty() {
        return Err(TranscribeError::EmptyPitchTrack {
            onsets: onsets.len(),
        });
    }

    let mut candidates = Vec::with_capacity(onsets.len().saturating_sub(1));
    let mut warnings = Vec::new();

    for (index, (start, end)) in onsets.pairs().enumerate() {
        let sampled = track.frequency_near(start);
        let pitch = match sampled.and_then(Pitch::from_hz) {
            Some(pitch) => pitch,
            None => {
                warnings.push(TranscribeWarning::new(
                    WarningCode::DefaultPitchSubstituted,
                    format!(
                        "candidate {} at {:.3}s: no usable pitch sample, using middle C",
                        index, start
                    ),
                ));
                Pitch::middle_c()
            }
        };
        candidates.push(NoteCandidate { pitch, start, end });
    }

    Ok(ExtractOutcome {
        candidates,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchValue;
    use crate::track::{FrameTiming, PitchTrack};
    use pretty_assertions::assert_eq;

    fn constant_track(hz: f64, frames: usize) -> PitchTrack {
        let pitch = vec![PitchValue::Voiced(hz); frames];
        let conf = vec![1.0; frames];
        let timing = FrameTiming::new(22050, 512).unwrap();
        PitchTrack::filter(&pitch, &conf, 0.8, timing).unwrap().track
    }

    #[test]
    fn test_candidate_count_is_n_minus_one() {
        let track = constant_track(440.0, 200);
        let onsets = OnsetTimeline::new(vec![0.0, 0.2, 0.5, 1.6, 2.0]).unwrap();
        let out = extract_candidates(&onsets, &track).unwrap();
        assert_eq!(out.candidates.len(), 4);
        assert!(out.warnings.is_empty());

        let spans: Vec<f64> = out.candidates.iter().map(|c| c.span()).collect();
        for (span, expected) in spans.iter().zip([0.2, 0.3, 1.1, 0.4]) {
            assert!((span - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_and_one_onset_produce_nothing() {
        let track = constant_track(440.0, 10);
        let empty = OnsetTimeline::new(vec![]).unwrap();
        assert!(extract_candidates(&empty, &track).unwrap().candidates.is_empty());

        let single = OnsetTimeline::new(vec![0.1]).unwrap();
        assert!(extract_candidates(&single, &track).unwrap().candidates.is_empty());
    }

    #[test]
    fn test_pitch_is_sampled_at_start_onset() {
        // Two regions: 220 Hz then 440 Hz. The candidate spanning the
        // boundary takes its pitch from its start, not an average.
        let timing = FrameTiming::new(22050, 512).unwrap();
        let frames = 100;
        let pitch: Vec<PitchValue> = (0..frames)
            .map(|i| PitchValue::Voiced(if i < 50 { 220.0 } else { 440.0 }))
            .collect();
        let conf = vec![1.0; frames];
        let track = PitchTrack::filter(&pitch, &conf, 0.8, timing).unwrap().track;

        let boundary = timing.frame_to_seconds(50);
        let onsets = OnsetTimeline::new(vec![0.0, boundary, boundary + 0.5]).unwrap();
        let out = extract_candidates(&onsets, &track).unwrap();
        assert_eq!(out.candidates[0].pitch.midi, 57); // A3
        assert_eq!(out.candidates[1].pitch.midi, 69); // A4
    }

    #[test]
    fn test_out_of_range_frame_substitutes_middle_c() {
        let track = constant_track(440.0, 5); // ends well before 2.0s
        let onsets = OnsetTimeline::new(vec![0.0, 2.0, 3.0]).unwrap();
        let out = extract_candidates(&onsets, &track).unwrap();
        assert_eq!(out.candidates[0].pitch.midi, 69);
        assert_eq!(out.candidates[1].pitch.midi, 60);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].code, "W002");
    }

    #[test]
    fn test_empty_track_with_onsets_is_an_error() {
        let track = constant_track(440.0, 0);
        let onsets = OnsetTimeline::new(vec![0.0, 1.0]).unwrap();
        assert!(extract_candidates(&onsets, &track).is_err());
    }
}
