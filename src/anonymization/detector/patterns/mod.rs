//! Pattern library for PII detection
//!
//! A [`PatternRegistry`] is an ordered list of recognition rules, at most one
//! per [`PiiCategory`]. Rules are declared in a TOML pattern library as an
//! array of `[[rules]]` tables; declaration order is evaluation order.
//!
//! ```toml
//! [[rules]]
//! category = "CARD_NUMBER"
//! pattern = '\b(?:[0-9]{13,19}|[0-9]{4}(?:[ -][0-9]{4}){3})\b'
//! validator = "luhn"
//! ```

use crate::anonymization::detector::validators::Validator;
use crate::anonymization::models::{PiiCategory, PiiEntity};
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Embedded built-in pattern library
const BUILTIN_LIBRARY: &str = include_str!("../../../../patterns/pii_patterns.toml");

/// Process-wide built-in registry, compiled on first use
static BUILTIN: OnceCell<Arc<PatternRegistry>> = OnceCell::new();

/// Rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// PII category label
    pub category: String,
    /// Regex pattern
    pub pattern: String,
    /// Optional post-match validator name
    #[serde(default)]
    pub validator: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    rules: Vec<RuleDefinition>,
}

/// Compiled recognition rule
#[derive(Debug, Clone)]
pub struct RecognitionRule {
    /// PII category this rule detects
    pub category: PiiCategory,
    /// Compiled regex
    pub regex: Regex,
    /// Extra validation for raw matches
    pub validator: Option<Validator>,
    /// Description from the pattern library
    pub description: Option<String>,
}

impl RecognitionRule {
    /// Find every accepted match of this rule in `text`
    ///
    /// Uses the regex engine's leftmost, non-overlapping scan. Matches that
    /// fail the rule's validator are dropped.
    pub fn find_entities<'t>(&'t self, text: &'t str) -> impl Iterator<Item = PiiEntity> + 't {
        // (byte, char) position of the previous match start
        let mut cursor = (0, 0);
        self.regex
            .find_iter(text)
            .filter(move |m| m.start() < m.end())
            .filter(move |m| self.validator.map_or(true, |v| v.accepts(m.as_str())))
            .map(move |m| {
                let (byte, chars) = cursor;
                let start_offset = chars + text[byte..m.start()].chars().count();
                cursor = (m.start(), start_offset);
                PiiEntity::new(self.category, m.as_str(), m.start(), start_offset)
            })
    }
}

/// Pattern registry for PII detection
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug)]
pub struct PatternRegistry {
    rules: Vec<RecognitionRule>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
            .with_context(|| format!("Invalid pattern library: {}", path.as_ref().display()))
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        if library.rules.is_empty() {
            anyhow::bail!("Pattern library declares no rules");
        }

        let mut rules = Vec::with_capacity(library.rules.len());
        let mut seen = HashSet::new();

        for (idx, def) in library.rules.into_iter().enumerate() {
            let category: PiiCategory = def
                .category
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid category in rule #{}", idx + 1))?;

            if !seen.insert(category) {
                anyhow::bail!("Duplicate rule for category {category} (rule #{})", idx + 1);
            }

            let validator = def
                .validator
                .as_deref()
                .map(str::parse::<Validator>)
                .transpose()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid validator in rule for {category}"))?;

            let regex = Regex::new(&def.pattern)
                .with_context(|| format!("Invalid regex for {category}: {}", def.pattern))?;

            rules.push(RecognitionRule {
                category,
                regex,
                validator,
                description: def.description,
            });
        }

        Ok(Self { rules })
    }

    /// Create a default pattern registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        Self::from_toml(BUILTIN_LIBRARY).context("Built-in pattern library is invalid")
    }

    /// Shared built-in registry
    ///
    /// Compiled once per process; later calls hand out the same instance.
    pub fn builtin() -> Result<Arc<Self>> {
        BUILTIN
            .get_or_try_init(|| Self::default_patterns().map(Arc::new))
            .cloned()
    }

    /// Get all rules, in evaluation order
    pub fn rules(&self) -> &[RecognitionRule] {
        &self.rules
    }

    /// Categories covered by this registry, in evaluation order
    pub fn categories(&self) -> Vec<PiiCategory> {
        self.rules.iter().map(|rule| rule.category).collect()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
