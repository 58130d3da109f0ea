//! Pitch representation and frequency conversion.
//!
//! Frequencies are mapped to the nearest equal-tempered pitch using the
//! standard MIDI formula `n = 69 + 12 * log2(f / 440)`.

use serde::{Deserialize, Serialize};

/// Frequency of middle C (C4), the documented default pitch for every
/// fallback in the pipeline.
pub const MIDDLE_C_HZ: f64 = 261.6255653005986;

/// MIDI note number of middle C.
pub const MIDDLE_C_MIDI: u8 = 60;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A per-frame pitch estimate. Missing values are an explicit variant, never
/// a NaN sentinel. Serializes untagged so the wire form stays a plain
/// number or `null`, matching the upstream analyzer's output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PitchValue {
    /// A voiced estimate in Hz.
    Voiced(f64),
    /// No usable estimate for this frame.
    Unvoiced,
}

impl PitchValue {
    /// Returns the frequency if this value is voiced and usable
    /// (finite and strictly positive).
    pub fn frequency(&self) -> Option<f64> {
        match self {
            PitchValue::Voiced(hz) if hz.is_finite() && *hz > 0.0 => Some(*hz),
            _ => None,
        }
    }
}

/// A concrete pitch: the nearest equal-tempered note to a frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    /// Nearest MIDI note number (0-127).
    pub midi: u8,
    /// The source frequency in Hz.
    pub frequency_hz: f64,
}

impl Pitch {
    /// Converts a frequency to its nearest pitch.
    ///
    /// Returns `None` for frequencies that are not finite and strictly
    /// positive; the caller decides how to substitute. This replaces
    /// exception-style pitch construction with an explicit tagged value.
    pub fn from_hz(frequency_hz: f64) -> Option<Self> {
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
            return None;
        }
        let note = 69.0 + 12.0 * (frequency_hz / 440.0).log2();
        let midi = note.round().clamp(0.0, 127.0) as u8;
        Some(Self { midi, frequency_hz })
    }

    /// The default pitch: middle C.
    pub fn middle_c() -> Self {
        Self {
            midi: MIDDLE_C_MIDI,
            frequency_hz: MIDDLE_C_HZ,
        }
    }

    /// Spelled note name with octave (e.g., "C4", "A#3").
    ///
    /// Octave numbering follows the MIDI convention where C4 = 60.
    pub fn name(&self) -> String {
        let semitone = (self.midi % 12) as usize;
        let octave = (self.midi / 12) as i32 - 1;
        format!("{}{}", NOTE_NAMES[semitone], octave)
    }
}
