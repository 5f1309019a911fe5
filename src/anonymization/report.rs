//! Scan reporting
//!
//! This module aggregates the results of scanning several documents into a
//! [`ScanReport`] with PII statistics and warnings. Reports never contain
//! matched text.

use crate::anonymization::engine::ScanResult;
use crate::anonymization::models::PiiCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate report over one or more scanned documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the report was created
    pub generated_at: DateTime<Utc>,

    /// Total documents scanned
    pub documents_scanned: usize,

    /// Documents with at least one detection
    pub documents_with_pii: usize,

    /// Total PII entities detected
    pub total_entities: usize,

    /// Detections by category
    pub entities_by_category: BTreeMap<PiiCategory, usize>,

    /// Total processing time (ms)
    pub total_processing_time_ms: u64,

    /// Documents that could not be scanned, and other warnings
    pub warnings: Vec<String>,
}

impl ScanReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            documents_scanned: 0,
            documents_with_pii: 0,
            total_entities: 0,
            entities_by_category: BTreeMap::new(),
            total_processing_time_ms: 0,
            warnings: Vec::new(),
        }
    }

    /// Add the result of scanning one document
    pub fn add_result(&mut self, result: &ScanResult, processing_time_ms: u64) {
        self.documents_scanned += 1;
        self.total_processing_time_ms += processing_time_ms;

        if !result.has_detections() {
            return;
        }

        self.documents_with_pii += 1;
        self.total_entities += result.detected_entities.len();

        for entity in &result.detected_entities {
            *self
                .entities_by_category
                .entry(entity.category)
                .or_insert(0) += 1;
        }
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Documents without any detection
    pub fn documents_without_pii(&self) -> usize {
        self.documents_scanned - self.documents_with_pii
    }

    /// Average processing time per document (ms)
    pub fn avg_processing_time_ms(&self) -> u64 {
        if self.documents_scanned == 0 {
            0
        } else {
            self.total_processing_time_ms / self.documents_scanned as u64
        }
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                      PII SCAN REPORT                          \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Documents Scanned:           {}\n",
            self.documents_scanned
        ));
        output.push_str(&format!(
            "  Documents with PII:          {}\n",
            self.documents_with_pii
        ));
        output.push_str(&format!(
            "  Documents without PII:       {}\n",
            self.documents_without_pii()
        ));
        output.push_str(&format!(
            "  Total PII Entities Detected: {}\n",
            self.total_entities
        ));
        output.push_str(&format!(
            "  Avg Processing Time:         {} ms\n",
            self.avg_processing_time_ms()
        ));
        output.push('\n');

        if !self.entities_by_category.is_empty() {
            output.push_str("🔍 PII DETECTIONS BY CATEGORY\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut categories: Vec<_> = self.entities_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1)); // Sort by count descending

            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.label(), count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}
