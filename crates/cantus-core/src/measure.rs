//! Measure packing: quantized notes accumulate into fixed-capacity measures.

use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult};
use crate::quantize::{DurationClass, QuantizedNote};

/// A time signature: beats per measure over the beat unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Beats per measure.
    pub numerator: u32,
    /// Beat unit (4 = quarter note).
    pub denominator: u32,
}

impl TimeSignature {
    /// Common time, 4/4.
    pub const COMMON: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    /// Creates a time signature, rejecting one with no positive capacity.
    pub fn new(numerator: u32, denominator: u32) -> TranscribeResult<Self> {
        let ts = Self {
            numerator,
            denominator,
        };
        if numerator == 0 || denominator == 0 {
            return Err(TranscribeError::InvalidTimeSignature {
                numerator,
                denominator,
            });
        }
        Ok(ts)
    }

    /// Measure capacity in quarter-note units (4.0 for 4/4, 3.0 for 3/4,
    /// 3.5 for 7/8).
    pub fn capacity(&self) -> f64 {
        self.numerator as f64 * 4.0 / self.denominator as f64
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl std::str::FromStr for TimeSignature {
    type Err = TranscribeError;

    /// Parses "N/D" (e.g., "4/4", "3/4").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TranscribeError::InvalidTimeSignature {
            numerator: 0,
            denominator: 0,
        };
        let (num, den) = s.split_once('/').ok_or_else(invalid)?;
        let numerator: u32 = num.trim().parse().map_err(|_| invalid())?;
        let denominator: u32 = den.trim().parse().map_err(|_| invalid())?;
        TimeSignature::new(numerator, denominator)
    }
}

/// What to do with a note that would carry a measure past its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Overflow {
    /// Keep the note whole; the measure closes over-full. This matches the
    /// historical behavior and is the compatibility baseline.
    #[default]
    Allow,
    /// Close the measure exactly at capacity by splitting the crossing note
    /// into tied notes across the boundary.
    Split,
}

/// A closed measure: its notes plus the accumulated duration weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    /// Notes in arrival order.
    pub notes: Vec<QuantizedNote>,
    /// Sum of the notes' duration weights in quarter-note units.
    pub filled: f64,
}

impl<'de> Deserialize<'de> for Measure {
    /// Rejects a serialized measure whose `filled` disagrees with the sum
    /// of its note weights.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            notes: Vec<QuantizedNote>,
            filled: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        let sum: f64 = raw.notes.iter().map(|n| n.duration.weight()).sum();
        if (raw.filled - sum).abs() > 1e-6 {
            return Err(serde::de::Error::custom(format!(
                "measure fill {} disagrees with note weight sum {}",
                raw.filled, sum
            )));
        }
        Ok(Measure {
            notes: raw.notes,
            filled: raw.filled,
        })
    }
}

impl Measure {
    fn empty() -> Self {
        Self {
            notes: Vec::new(),
            filled: 0.0,
        }
    }

    fn push(&mut self, note: QuantizedNote) {
        self.filled += note.duration.weight();
        self.notes.push(note);
    }
}

/// Packs notes into measures under the given time signature.
///
/// One measure is open at a time. Each note is appended whole (under
/// [`Overflow::Allow`]) and the measure closes as soon as its fill reaches
/// capacity; a boundary-straddling note is not split, so a closed measure
/// may exceed capacity. Under [`Overflow::Split`] the crossing note is
/// decomposed into tied notes and the measure closes exactly at capacity.
/// A non-empty final measure is emitted regardless of fill.
pub fn pack_measures(
    notes: &[QuantizedNote],
    time_signature: TimeSignature,
    overflow: Overflow,
) -> TranscribeResult<Vec<Measure>> {
    let capacity = time_signature.capacity();
    if !(capacity > 0.0) {
        return Err(TranscribeError::InvalidTimeSignature {
            numerator: time_signature.numerator,
            denominator: time_signature.denominator,
        });
    }

    let mut measures = Vec::new();
    let mut open = Measure::empty();

    for &note in notes {
        match overflow {
            Overflow::Allow => {
                open.push(note);
                if open.filled >= capacity {
                    measures.push(std::mem::replace(&mut open, Measure::empty()));
                }
            }
            Overflow::Split => {
                let mut remaining = note.duration.weight();
                while remaining > 1e-9 {
                    // Largest piece that still fits, in half-beat steps.
                    let room = capacity - open.filled;
                    let fit = (room * 2.0 + 1e-9).floor() / 2.0;
                    if fit <= 0.0 {
                        if open.notes.is_empty() {
                            // Capacity below the smallest class; keep the
                            // remainder whole to guarantee progress.
                            for part in decompose_weight(remaining) {
                                open.push(QuantizedNote {
                                    pitch: note.pitch,
                                    duration: part,
                                    span_seconds: note.span_seconds,
                                    tied: false,
                                });
                            }
                            remaining = 0.0;
                        }
                        measures.push(std::mem::replace(&mut open, Measure::empty()));
                        continue;
                    }
                    let part_weight = remaining.min(fit);
                    remaining -= part_weight;
                    let parts = decompose_weight(part_weight);
                    let count = parts.len();
                    for (i, part) in parts.into_iter().enumerate() {
                        // Every piece but the very last carries a tie.
                        let final_piece = remaining <= 1e-9 && i == count - 1;
                        open.push(QuantizedNote {
                            pitch: note.pitch,
                            duration: part,
                            span_seconds: note.span_seconds,
                            tied: !final_piece,
                        });
                    }
                    if open.filled >= capacity - 1e-9 {
                        measures.push(std::mem::replace(&mut open, Measure::empty()));
                    }
                }
            }
        }
    }

    if !open.notes.is_empty() {
        measures.push(open);
    }

    Ok(measures)
}

/// Greedily decomposes a weight into duration classes, largest first.
/// All class weights are multiples of 0.5, so any multiple of 0.5
/// decomposes exactly.
fn decompose_weight(mut weight: f64) -> Vec<DurationClass> {
    let mut parts = Vec::new();
    for class in DurationClass::DESCENDING {
        while weight >= class.weight() - 1e-9 {
            parts.push(class);
            weight -= class.weight();
        }
    }
    parts
}
