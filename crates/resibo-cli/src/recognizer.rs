//! Recognizer backed by an external OCR command (tesseract by default).

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use resibo_core::models::config::OcrConfig;
use resibo_core::{OcrError, Recognition, TextRecognizer};

/// Runs `<command> <image> stdout -l <language> [extra args]` and reads the
/// recognized text from stdout.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    command: String,
    language: String,
    extra_args: Vec<String>,
    timeout: Duration,
}

impl CommandRecognizer {
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
            extra_args: config.extra_args.clone(),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }

    fn args(&self, image: &Path) -> Vec<String> {
        let mut args = vec![
            image.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl TextRecognizer for CommandRecognizer {
    async fn recognize(&self, image: &Path) -> Result<Recognition, OcrError> {
        if !image.is_file() {
            return Err(OcrError::InvalidImage(format!(
                "{} is not a file",
                image.display()
            )));
        }

        let args = self.args(image);
        debug!("Running {} {}", self.command, args.join(" "));

        let child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OcrError::Unavailable(format!("{}: {}", self.command, e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                OcrError::Recognition(format!("timed out after {}s", self.timeout.as_secs()))
            })?
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(Recognition::new(String::from_utf8_lossy(&output.stdout)))
    }
}
