//! The assembled score: ordered measures under a time signature.

use serde::{Deserialize, Serialize};

use crate::measure::{Measure, TimeSignature};

/// A complete score, ready for the notation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// The active time signature, prefixed to the measures.
    pub time_signature: TimeSignature,
    /// Measures in emission order.
    pub measures: Vec<Measure>,
}

impl Score {
    /// Assembles closed measures, in emission order, into a score.
    pub fn assemble(time_signature: TimeSignature, measures: Vec<Measure>) -> Self {
        Self {
            time_signature,
            measures,
        }
    }

    /// Total number of notes across all measures.
    pub fn note_count(&self) -> usize {
        self.measures.iter().map(|m| m.notes.len()).sum()
    }

    /// True when the score has no measures.
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}
