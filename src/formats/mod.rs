//! Environment import/export formats
//!
//! A strategy per supported file format (native JSON, Postman environment
//! JSON, dotenv text), plus the registry that arbitrates between them:
//! every registered strategy scores unknown content and the highest
//! non-zero confidence wins.
//!
//! The registry is the only process-wide state in the crate. It is built
//! once, never mutated afterwards, and every strategy is stateless, so
//! detection sweeps may run concurrently from any number of callers.

pub mod dotenv;
pub mod json;
pub mod postman;
pub mod validate;

pub use dotenv::DotenvStrategy;
pub use json::JsonStrategy;
pub use postman::PostmanStrategy;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::errors::{ImpexError, Result};
use crate::models::{EnvironmentRecord, FormatInfo, ValidationResult};

/// One pluggable import/detection implementation, bound to exactly one
/// file format.
pub trait FormatStrategy: Send + Sync {
    /// Static metadata for UI enumeration.
    fn info(&self) -> &'static FormatInfo;

    /// Cheap yes/no: could this content be an instance of the format?
    fn detect(&self, content: &str) -> bool;

    /// Self-reported certainty in `[0, 1]`. 0 means "not this format",
    /// 1 means "unambiguously this format".
    fn confidence(&self, content: &str) -> f64;

    /// Convert raw content into normalized environment records.
    fn parse(&self, content: &str) -> Result<Vec<EnvironmentRecord>>;

    /// Serialize records back to this format's text form.
    fn export(&self, _records: &[EnvironmentRecord]) -> Result<String> {
        Err(ImpexError::ExportUnsupported(self.info().name.to_string()))
    }

    /// Structural validation; the shared default suits most formats.
    fn validate(&self, records: &[EnvironmentRecord]) -> ValidationResult {
        validate::validate_records(records)
    }
}

/// Result of a registry-wide import: the winning format, its parsed
/// records, and their validation report. The caller decides how to surface
/// errors and warnings.
#[derive(Debug)]
pub struct ImportResult {
    /// Machine id of the strategy that claimed the content.
    pub format: &'static str,
    pub records: Vec<EnvironmentRecord>,
    pub validation: ValidationResult,
}

/// Ordered collection of format strategies. Registration order doubles as
/// the tiebreaker when two strategies report the same confidence.
pub struct FormatRegistry {
    strategies: Vec<Box<dyn FormatStrategy>>,
}

impl FormatRegistry {
    /// A registry with no strategies; useful for custom assemblies.
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// The built-in strategy set: native JSON, Postman, dotenv, in that
    /// arbitration order.
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(JsonStrategy));
        registry.register(Box::new(PostmanStrategy));
        registry.register(Box::new(DotenvStrategy));
        registry
    }

    pub fn register(&mut self, strategy: Box<dyn FormatStrategy>) {
        self.strategies.push(strategy);
    }

    /// Format descriptors in registration order, for UI pickers.
    pub fn formats(&self) -> Vec<&'static FormatInfo> {
        self.strategies.iter().map(|s| s.info()).collect()
    }

    /// Score the content against every registered strategy and return the
    /// one with the highest non-zero confidence. Ties go to the
    /// first-registered strategy.
    pub fn classify(&self, content: &str) -> Result<&dyn FormatStrategy> {
        let mut best: Option<(&dyn FormatStrategy, f64)> = None;

        for strategy in &self.strategies {
            let score = strategy.confidence(content);
            tracing::debug!(format = strategy.info().name, score, "format confidence");
            if score > 0.0 && best.map_or(true, |(_, top)| score > top) {
                best = Some((strategy.as_ref(), score));
            }
        }

        match best {
            Some((strategy, score)) => {
                tracing::debug!(format = strategy.info().name, score, "selected import format");
                Ok(strategy)
            }
            None => Err(ImpexError::UnrecognizedFormat),
        }
    }

    /// Classify, parse with the winning strategy, and validate the result.
    pub fn detect_and_parse(&self, content: &str) -> Result<ImportResult> {
        let strategy = self.classify(content)?;
        let records = strategy.parse(content)?;
        let validation = strategy.validate(&records);

        Ok(ImportResult {
            format: strategy.info().name,
            records,
            validation,
        })
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_builtin_formats()
    }
}

/// Process-wide registry, built on first use and read-only thereafter.
static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::default);

pub fn default_registry() -> &'static FormatRegistry {
    &DEFAULT_REGISTRY
}

/// Run registry-wide detection and parse with the winning strategy.
pub fn detect_and_parse(content: &str) -> Result<ImportResult> {
    DEFAULT_REGISTRY.detect_and_parse(content)
}

/// Identify which built-in format the content most likely is.
pub fn classify_format(content: &str) -> Result<&'static dyn FormatStrategy> {
    DEFAULT_REGISTRY.classify(content)
}

/// Coerce a JSON scalar to its string form. Strings pass through, numbers
/// and booleans are stringified, null and compound values are dropped.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
