//! Field-dump backend that shells out to `pdftk <file> dump_data_fields`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;

use formscout_core::{BackendError, FieldDumpBackend};

const TOOL_NAME: &str = "pdftk";

/// Runs pdftk to obtain the field dump of a PDF.
pub struct PdftkBackend {
    command: PathBuf,
}

impl Default for PdftkBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdftkBackend {
    /// Use `pdftk` from `PATH`.
    pub fn new() -> Self {
        Self {
            command: PathBuf::from(TOOL_NAME),
        }
    }

    /// Use a specific pdftk executable.
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &Path {
        &self.command
    }
}

impl FieldDumpBackend for PdftkBackend {
    fn dump_fields(&self, path: &Path) -> Result<String, BackendError> {
        // Distinguish an unreadable input from a pdftk failure
        File::open(path).map_err(|e| {
            BackendError::ExtractionFailed(format!("cannot read {}: {}", path.display(), e))
        })?;

        let output = Command::new(&self.command)
            .arg(path)
            .arg("dump_data_fields")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BackendError::ToolUnavailable {
                        tool: TOOL_NAME.to_string(),
                    }
                } else {
                    BackendError::ExtractionFailed(format!("failed to run pdftk: {e}"))
                }
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();

        if !output.status.success() {
            return Err(BackendError::ExtractionFailed(format!(
                "pdftk exited with {}: {}",
                output.status, stderr
            )));
        }

        if !stderr.is_empty() {
            if stderr.contains("Warning") {
                tracing::debug!(path = %path.display(), stderr, "pdftk warning");
            } else {
                tracing::warn!(path = %path.display(), stderr, "pdftk reported an error");
            }
        }

        let dump = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(path = %path.display(), bytes = dump.len(), "pdftk field dump");
        Ok(dump)
    }
}

/// Size of the file in KiB, rounded to the nearest whole KiB.
pub fn file_size_kb(path: &Path) -> Result<u64, BackendError> {
    let bytes = std::fs::metadata(path)?.len();
    Ok((bytes + 512) / 1024)
}
