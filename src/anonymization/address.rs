//! Optional free-text address recognition
//!
//! Postal addresses have no reliable structural pattern, so recognizing
//! them is delegated to an external NLP process. The recognizer is a
//! best-effort add-on: the scan engine calls it after the regex detector and
//! ignores any failure.
//!
//! # Process protocol
//!
//! The configured command receives the text on stdin and must print a JSON
//! array on stdout, with offsets counted in characters:
//!
//! ```json
//! [{"text": "10 Downing Street", "start": 12, "length": 17, "confidence": 0.85}]
//! ```
//!
//! A non-zero exit status, a timeout, or output that is not such an array is
//! an error.

use crate::anonymization::models::{PiiCategory, PiiEntity};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::ops::Range;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};

/// Trait for external address recognizers
#[async_trait]
pub trait AddressRecognizer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Find addresses in `text`, reported as [`PiiCategory::Address`] entities
    /// located in `text`
    async fn recognize(&self, text: &str) -> Result<Vec<PiiEntity>>;
}

/// One finding as printed by the external process
#[derive(Debug, Clone, Deserialize)]
pub struct AddressFinding {
    /// Address text
    pub text: String,
    /// Start, in characters
    pub start: usize,
    /// Length, in characters
    pub length: usize,
    /// Confidence score (0.0 - 1.0)
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

/// Address recognizer backed by an external command
#[derive(Debug, Clone)]
pub struct ProcessAddressRecognizer {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessAddressRecognizer {
    /// Create a new process-backed recognizer
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    async fn run(&self, text: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start address recognizer '{}'", self.command))?;

        let stdin = child
            .stdin
            .take()
            .context("Address recognizer stdin unavailable")?;

        let (write_result, output) = tokio::join!(write_input(stdin, text), child.wait_with_output());
        let output = output.context("Failed to collect address recognizer output")?;

        if let Err(e) = write_result {
            // The process may exit without reading all of its input.
            tracing::debug!(error = %e, "Address recognizer closed stdin early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Address recognizer exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl AddressRecognizer for ProcessAddressRecognizer {
    fn name(&self) -> &str {
        &self.command
    }

    async fn recognize(&self, text: &str) -> Result<Vec<PiiEntity>> {
        let stdout = tokio::time::timeout(self.timeout, self.run(text))
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "Address recognizer timed out after {}ms",
                    self.timeout.as_millis()
                )
            })??;

        let findings: Vec<AddressFinding> = serde_json::from_slice(&stdout)
            .context("Address recognizer printed invalid JSON")?;

        Ok(findings_to_entities(text, findings))
    }
}

async fn write_input(mut stdin: ChildStdin, text: &str) -> std::io::Result<()> {
    stdin.write_all(text.as_bytes()).await?;
    stdin.shutdown().await
}

/// Convert character-offset findings into entities over `text`
///
/// Findings that are empty, fall outside the text, or whose reported text
/// differs from the text at their span are dropped.
pub fn findings_to_entities(text: &str, findings: Vec<AddressFinding>) -> Vec<PiiEntity> {
    findings
        .into_iter()
        .filter_map(|finding| {
            let located = char_span_to_bytes(text, finding.start, finding.length)
                .and_then(|span| PiiEntity::locate(PiiCategory::Address, text, span));
            let Some(entity) = located else {
                tracing::debug!(
                    start = finding.start,
                    length = finding.length,
                    "Dropping address finding outside text"
                );
                return None;
            };

            if entity.matched_text != finding.text {
                tracing::debug!(
                    start = finding.start,
                    length = finding.length,
                    "Dropping address finding that does not match text"
                );
                return None;
            }

            Some(entity.with_confidence(finding.confidence))
        })
        .collect()
}

/// Map a character span to a byte range of `text`
fn char_span_to_bytes(text: &str, start: usize, length: usize) -> Option<Range<usize>> {
    if length == 0 {
        return None;
    }

    let mut boundaries = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()));

    let start_byte = boundaries.nth(start)?;
    let end_byte = boundaries.nth(length - 1)?;
    Some(start_byte..end_byte)
}
