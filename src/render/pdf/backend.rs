//! Native HTML-to-PDF backend probing.
//!
//! When a high-fidelity converter is installed, PDF rendering delegates
//! to it; otherwise the fallback serializer takes over. Absence is not
//! an error. A backend that is present but fails must surface its
//! failure instead of being masked by a degraded fallback render.

use crate::error::{Error, Result};
use log::debug;
use std::io::Write;
use std::process::Command;

/// Default converter executable looked up on `PATH`.
const DEFAULT_BACKEND: &str = "weasyprint";

/// Environment variable overriding the backend executable.
///
/// Set to a program name or path to use that converter, or to `none`
/// to force the fallback serializer.
pub const BACKEND_ENV: &str = "CVRENDER_PDF_BACKEND";

/// A usable native converter found in the environment.
pub struct NativeBackend {
    program: String,
}

impl NativeBackend {
    /// Probe the environment for a converter, at call time.
    ///
    /// Returns `None` when no converter is runnable; the caller falls
    /// back to the built-in serializer.
    pub fn probe() -> Option<Self> {
        let program = match std::env::var(BACKEND_ENV) {
            Ok(value) if value.eq_ignore_ascii_case("none") => {
                debug!("native PDF backend disabled via {BACKEND_ENV}");
                return None;
            }
            Ok(value) if !value.trim().is_empty() => value,
            _ => DEFAULT_BACKEND.to_string(),
        };

        match Command::new(&program).arg("--version").output() {
            Ok(output) if output.status.success() => {
                debug!("native PDF backend available: {program}");
                Some(Self { program })
            }
            Ok(output) => {
                debug!(
                    "native PDF backend '{program}' not usable (exit {:?})",
                    output.status.code()
                );
                None
            }
            Err(err) => {
                debug!("native PDF backend '{program}' not found: {err}");
                None
            }
        }
    }

    /// Name or path of the probed executable.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Convert HTML to PDF bytes with the probed converter.
    ///
    /// A failing conversion is an error, never a fallback.
    pub fn convert(&self, html: &str) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("resume.html");
        let output = dir.path().join("resume.pdf");

        let mut file = std::fs::File::create(&input)?;
        file.write_all(html.as_bytes())?;
        file.flush()?;

        let result = Command::new(&self.program)
            .arg(&input)
            .arg(&output)
            .output()
            .map_err(|err| Error::Backend {
                backend: self.program.clone(),
                message: err.to_string(),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Backend {
                backend: self.program.clone(),
                message: format!(
                    "exit {:?}: {}",
                    result.status.code(),
                    stderr.lines().next().unwrap_or("no output")
                ),
            });
        }

        let bytes = std::fs::read(&output).map_err(|err| Error::Backend {
            backend: self.program.clone(),
            message: format!("no output file produced: {err}"),
        })?;
        Ok(bytes)
    }
}
