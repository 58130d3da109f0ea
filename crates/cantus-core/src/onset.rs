//! Onset timeline: the segmentation boundaries for note candidates.

use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult};

/// A strictly increasing sequence of onset timestamps in seconds.
///
/// Onsets are boundaries, not notes: a candidate needs both a start and an
/// end boundary, so the final onset never becomes a note by itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnsetTimeline {
    times: Vec<f64>,
}

impl OnsetTimeline {
    /// Validates and wraps a sequence of onset timestamps.
    ///
    /// # Errors
    ///
    /// Rejects non-finite timestamps and any timestamp that does not
    /// strictly increase over its predecessor.
    pub fn new(times: Vec<f64>) -> TranscribeResult<Self> {
        for (i, &t) in times.iter().enumerate() {
            if !t.is_finite() {
                return Err(TranscribeError::NonFiniteOnset { index: i });
            }
            if i > 0 && t <= times[i - 1] {
                return Err(TranscribeError::non_increasing(i, t, times[i - 1]));
            }
        }
        Ok(Self { times })
    }

    /// Number of onsets.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the timeline has no onsets.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The onset timestamps in order.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Adjacent onset pairs: each pair is one candidate's `[start, end)`.
    /// Empty for timelines with fewer than two onsets.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_increasing() {
        let t = OnsetTimeline::new(vec![0.0, 0.2, 0.5, 1.6, 2.0]).unwrap();
        assert_eq!(t.len(), 5);
        let pairs: Vec<_> = t.pairs().collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], (0.0, 0.2));
        assert_eq!(pairs[3], (1.6, 2.0));
    }

    #[test]
    fn test_rejects_non_increasing() {
        assert!(OnsetTimeline::new(vec![0.0, 0.2, 0.2]).is_err());
        assert!(OnsetTimeline::new(vec![0.5, 0.3]).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(OnsetTimeline::new(vec![0.0, f64::NAN]).is_err());
        assert!(OnsetTimeline::new(vec![0.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(OnsetTimeline::new(vec![]).unwrap().pairs().count(), 0);
        assert_eq!(OnsetTimeline::new(vec![1.0]).unwrap().pairs().count(), 0);
    }
}
