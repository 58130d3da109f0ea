//! LilyPond subprocess renderer.
//!
//! Turns a score into a PDF by writing a `.ly` source file and invoking the
//! external `lilypond` binary. All configuration is explicit: the renderer
//! holds a [`RendererConfig`] and consults no global state beyond the
//! documented environment-variable fallback for locating the binary.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use cantus_core::Score;

use crate::error::{LilypondError, LilypondResult};
use crate::writer::score_to_lilypond;

/// Default timeout for LilyPond execution (2 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the LilyPond renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Path to the LilyPond executable. When unset, resolution falls back
    /// to the `LILYPOND_PATH` environment variable, then a `PATH` lookup,
    /// then common install locations.
    pub lilypond_path: Option<PathBuf>,
    /// Timeout for LilyPond execution.
    pub timeout: Duration,
    /// Whether to capture LilyPond's stderr for error reporting.
    pub capture_output: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            lilypond_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }
}

impl RendererConfig {
    /// Sets the LilyPond executable path.
    pub fn lilypond_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lilypond_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// The LilyPond subprocess renderer.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Creates a renderer with default configuration.
    pub fn new() -> Self {
        Self {
            config: RendererConfig::default(),
        }
    }

    /// Creates a renderer with the given configuration.
    pub fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Finds the LilyPond executable path.
    fn find_lilypond(&self) -> LilypondResult<PathBuf> {
        // Check config override first
        if let Some(ref path) = self.config.lilypond_path {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        // Check LILYPOND_PATH environment variable
        if let Ok(path) = std::env::var("LILYPOND_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        // Try to find LilyPond in PATH
        let names = if cfg!(windows) {
            vec!["lilypond.exe", "lilypond"]
        } else {
            vec!["lilypond"]
        };

        for name in names {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        // Try common installation paths
        let common_paths = if cfg!(windows) {
            vec![
                "C:\\Program Files (x86)\\LilyPond\\usr\\bin\\lilypond.exe",
                "C:\\Program Files\\LilyPond\\usr\\bin\\lilypond.exe",
            ]
        } else if cfg!(target_os = "macos") {
            vec![
                "/opt/homebrew/bin/lilypond",
                "/Applications/LilyPond.app/Contents/Resources/bin/lilypond",
            ]
        } else {
            vec![
                "/usr/bin/lilypond",
                "/usr/local/bin/lilypond",
                "/snap/bin/lilypond",
            ]
        };

        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(LilypondError::LilypondNotFound)
    }

    /// Writes the score's LilyPond source next to the requested output.
    ///
    /// Returns the path of the written `.ly` file.
    pub fn write_source(&self, score: &Score, ly_path: &Path) -> LilypondResult<PathBuf> {
        let source = score_to_lilypond(score);
        std::fs::write(ly_path, source).map_err(|e| LilypondError::WriteSourceFailed {
            path: ly_path.to_path_buf(),
            source: e,
        })?;
        Ok(ly_path.to_path_buf())
    }

    /// Renders a score to a PDF.
    ///
    /// Writes `<out_dir>/<basename>.ly`, invokes
    /// `lilypond --pdf -o <out_dir>/<basename> <ly file>`, and returns the
    /// path of the produced PDF.
    pub fn render(&self, score: &Score, out_dir: &Path, basename: &str) -> LilypondResult<PathBuf> {
        let lilypond_path = self.find_lilypond()?;

        let ly_path = out_dir.join(format!("{}.ly", basename));
        self.write_source(score, &ly_path)?;

        let out_base = out_dir.join(basename);
        let mut cmd = Command::new(&lilypond_path);
        cmd.arg("--pdf").arg("-o").arg(&out_base).arg(&ly_path);

        if self.config.capture_output {
            // Keep stdout unpiped to reduce the risk of subprocess
            // deadlocks caused by a filled stdout pipe.
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        let child = cmd.spawn().map_err(LilypondError::SpawnFailed)?;
        let (status, stderr) = wait_with_timeout(child, self.config.timeout)?;

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(LilypondError::process_failed(exit_code, stderr));
        }

        let pdf_path = out_dir.join(format!("{}.pdf", basename));
        if !pdf_path.exists() {
            return Err(LilypondError::OutputNotFound { path: pdf_path });
        }

        Ok(pdf_path)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn wait_with_timeout(mut child: Child, timeout: Duration) -> LilypondResult<(ExitStatus, String)> {
    // Drain stderr on its own thread while the child runs; a chatty run
    // would otherwise fill the pipe and block the child until the timeout.
    let stderr_reader = child.stderr.take().map(|mut err| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = err.read_to_string(&mut buf);
            buf
        })
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(LilypondError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(LilypondError::SpawnFailed(e)),
        }
    };

    let stderr = match stderr_reader {
        Some(handle) => handle.join().unwrap_or_default(),
        None => String::new(),
    };

    Ok((status, stderr))
}
