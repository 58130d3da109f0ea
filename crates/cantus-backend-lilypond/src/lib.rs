//! Cantus LilyPond Backend - Notation Serialization and PDF Rendering
//!
//! This crate is the downstream notation collaborator of the transcription
//! core: it serializes a completed [`cantus_core::Score`] to LilyPond
//! source and orchestrates the external `lilypond` binary to render a PDF.
//! The core itself never formats or renders; it hands over a finished
//! score value and any failure here is reported back to the caller as-is.
//!
//! # Example
//!
//! ```no_run
//! use cantus_backend_lilypond::{Renderer, RendererConfig};
//! use cantus_core::{Score, TimeSignature};
//!
//! let score = Score::assemble(TimeSignature::COMMON, vec![]);
//! let renderer = Renderer::with_config(
//!     RendererConfig::default().timeout_secs(60),
//! );
//! let pdf = renderer.render(&score, std::path::Path::new("out"), "sheet")?;
//! println!("rendered {}", pdf.display());
//! # Ok::<(), cantus_backend_lilypond::LilypondError>(())
//! ```
//!
//! # Modules
//!
//! - [`writer`]: Score to LilyPond source serialization
//! - [`renderer`]: LilyPond subprocess orchestration
//! - [`error`]: Backend error types

pub mod error;
pub mod renderer;
pub mod writer;

// Re-export main types
pub use error::{LilypondError, LilypondResult};
pub use renderer::{Renderer, RendererConfig, DEFAULT_TIMEOUT_SECS};
pub use writer::{score_to_lilypond, pitch_name};

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
