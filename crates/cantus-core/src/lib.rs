//! Cantus Transcription Core
//!
//! This crate turns the analysis of a monophonic recording (a per-frame
//! pitch/confidence track and a list of onset timestamps) into a
//! discretized musical score: pitched, duration-quantized notes grouped
//! into fixed-capacity measures under a time signature.
//!
//! The pipeline runs strictly forward, one synchronous stage at a time:
//!
//! 1. **Pitch track filter**: low-confidence frames are resolved by
//!    interpolation/hold so the track is dense.
//! 2. **Event extractor**: adjacent onset pairs become pitched note
//!    candidates.
//! 3. **Duration quantizer**: continuous spans map to eighth / quarter /
//!    half / whole classes.
//! 4. **Measure packer**: notes accumulate into measures of fixed
//!    capacity.
//! 5. **Score assembler**: measures fold into a [`Score`].
//!
//! The core performs no I/O and holds no global state. Invalid input aborts
//! a run with a [`TranscribeError`]; every degraded-estimate fallback
//! (interpolated frames, default-pitch substitution) is recovered locally
//! and reported as a [`TranscribeWarning`] on the result.
//!
//! # Example
//!
//! ```
//! use cantus_core::{transcribe, AnalysisInput, PitchValue, TranscribeConfig};
//!
//! let input = AnalysisInput {
//!     sample_rate: 22050,
//!     hop_size: 512,
//!     pitch_hz: vec![PitchValue::Voiced(440.0); 100],
//!     confidence: vec![0.95; 100],
//!     onsets: vec![0.0, 0.3, 0.9],
//! };
//!
//! let result = transcribe(&input, &TranscribeConfig::default()).unwrap();
//! assert_eq!(result.score.note_count(), 2);
//! ```
//!
//! # Modules
//!
//! - [`analysis`]: the upstream analyzer's handoff type
//! - [`track`]: pitch track filtering
//! - [`onset`]: onset timeline validation
//! - [`event`]: note candidate extraction
//! - [`quantize`]: duration quantization
//! - [`measure`]: time signatures and measure packing
//! - [`score`]: the assembled score
//! - [`transcribe`]: the pipeline entry point
//! - [`error`]: error and warning types

pub mod analysis;
pub mod error;
pub mod event;
pub mod measure;
pub mod onset;
pub mod pitch;
pub mod quantize;
pub mod score;
pub mod track;
pub mod transcribe;

// Re-export commonly used types at the crate root
pub use analysis::AnalysisInput;
pub use error::{TranscribeError, TranscribeResult, TranscribeWarning, WarningCode};
pub use event::{extract_candidates, ExtractOutcome, NoteCandidate};
pub use measure::{pack_measures, Measure, Overflow, TimeSignature};
pub use onset::OnsetTimeline;
pub use pitch::{Pitch, PitchValue, MIDDLE_C_HZ};
pub use quantize::{classify_span, quantize_candidates, DurationClass, QuantizedNote};
pub use score::Score;
pub use track::{FilterOutcome, FrameTiming, PitchTrack};
pub use transcribe::{
    transcribe, NoteDiagnostic, TranscribeConfig, Transcription, DEFAULT_CONFIDENCE_THRESHOLD,
};

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
