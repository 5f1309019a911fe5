//! Scan command implementation
//!
//! This module implements the `scan` command, which detects and masks PII in
//! files or standard input and prints the results to stdout.

use crate::anonymization::{ScanEngine, ScanReport, ScanResult};
use crate::config::load_config_or_default;
use crate::log_error_with_context;
use crate::log_scan_complete;
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::AsyncReadExt;

/// Source name used for standard input
pub const STDIN_SOURCE: &str = "-";

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Files to scan (standard input when none are given)
    pub files: Vec<PathBuf>,

    /// Print only the masked text
    #[arg(long)]
    pub mask_only: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print a summary report to stderr
    #[arg(long)]
    pub summary: bool,
}

/// Scan result for one input document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    /// File path, or `-` for standard input
    pub source: String,

    /// Detections and masked text
    #[serde(flatten)]
    pub result: ScanResult,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ Failed to load configuration");
                eprintln!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let engine =
            ScanEngine::new(&config.detection).context("Failed to initialize PII detection")?;

        let (documents, report) = self.scan_sources(&engine).await;

        for document in &documents {
            print!("{}", self.render(document)?);
        }

        if self.summary {
            eprint!("{}", report.format_console());
        }

        if documents.is_empty() && !report.warnings.is_empty() {
            return Ok(5); // Fatal error exit code
        }

        Ok(0)
    }

    /// Read and scan every requested input
    ///
    /// Unreadable files are recorded as report warnings and skipped.
    pub async fn scan_sources(&self, engine: &ScanEngine) -> (Vec<DocumentResult>, ScanReport) {
        let mut report = ScanReport::new();
        let mut documents = Vec::new();

        for (source, text) in self.read_inputs(&mut report).await {
            let started = Instant::now();
            let result = engine.scan(&text).await;
            let elapsed = started.elapsed();

            log_scan_complete!(source.as_str(), result.detected_entities.len(), elapsed);
            report.add_result(&result, elapsed.as_millis() as u64);
            documents.push(DocumentResult { source, result });
        }

        (documents, report)
    }

    async fn read_inputs(&self, report: &mut ScanReport) -> Vec<(String, String)> {
        if self.files.is_empty() {
            let mut text = String::new();
            return match tokio::io::stdin().read_to_string(&mut text).await {
                Ok(_) => vec![(STDIN_SOURCE.to_string(), text)],
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read standard input");
                    report.add_warning(format!("{STDIN_SOURCE}: {e}"));
                    Vec::new()
                }
            };
        }

        let mut inputs = Vec::with_capacity(self.files.len());
        for path in &self.files {
            match tokio::fs::read_to_string(path).await {
                Ok(text) => inputs.push((path.display().to_string(), text)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable input");
                    report.add_warning(format!("{}: {}", path.display(), e));
                }
            }
        }
        inputs
    }

    /// Render one document for stdout
    pub fn render(&self, document: &DocumentResult) -> anyhow::Result<String> {
        if self.mask_only {
            return Ok(document.result.masked_text.clone());
        }

        let mut json = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::config::DetectionConfig;
    use tempfile::TempDir;

    fn args(files: Vec<PathBuf>) -> ScanArgs {
        ScanArgs {
            files,
            mask_only: false,
            pretty: false,
            summary: false,
        }
    }

    fn engine() -> ScanEngine {
        ScanEngine::new(&DetectionConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_scan_sources_reads_files_and_skips_missing() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("note.txt");
        std::fs::write(&present, "Reach me at john@example.com").unwrap();
        let missing = dir.path().join("missing.txt");

        let (documents, report) = args(vec![present.clone(), missing])
            .scan_sources(&engine())
            .await;

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].source, present.display().to_string());
        assert_eq!(documents[0].result.masked_text, "Reach me at ****************");
        assert_eq!(report.documents_scanned, 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("missing.txt"));
    }

    #[test]
    fn test_render_json_line() {
        let document = DocumentResult {
            source: "a.txt".to_string(),
            result: engine().scan_core("ip 10.0.0.1"),
        };

        let line = args(vec![]).render(&document).unwrap();
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["source"], "a.txt");
        assert_eq!(value["maskedText"], "ip ********");
        assert_eq!(value["detectedEntities"][0]["category"], "IP_ADDRESS");
        assert_eq!(value["detectedEntities"][0]["startOffset"], 3);
    }

    #[test]
    fn test_render_mask_only() {
        let document = DocumentResult {
            source: STDIN_SOURCE.to_string(),
            result: engine().scan_core("postcode SW1A 1AA\n"),
        };

        let mut args = args(vec![]);
        args.mask_only = true;
        assert_eq!(args.render(&document).unwrap(), "postcode ********\n");
    }
}
