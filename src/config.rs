use crate::error::{Result, ValidatorError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Phrases that mark an income statement page or table.
pub const DEFAULT_KEYWORDS: [&str; 3] = ["profit after tax", "total income", "total expenses"];

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_min_keyword_hits() -> usize {
    DEFAULT_KEYWORDS.len()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ValidatorConfig {
    #[schemars(description = "Phrases counted on each page when selecting income statement pages")]
    #[serde(default = "default_keywords")]
    pub page_keywords: Vec<String>,

    #[schemars(description = "A page is selected when at least this many page keywords occur on it")]
    #[serde(default = "default_min_keyword_hits")]
    pub min_keyword_hits: usize,

    #[schemars(description = "A table block is kept when any one of these phrases occurs in it")]
    #[serde(default = "default_keywords")]
    pub table_keywords: Vec<String>,

    #[schemars(
        description = "Absolute tolerance when comparing submitted and parsed net income. Absent means exact equality."
    )]
    #[serde(default)]
    pub net_income_tolerance: Option<f64>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            page_keywords: default_keywords(),
            min_keyword_hits: default_min_keyword_hits(),
            table_keywords: default_keywords(),
            net_income_tolerance: None,
        }
    }
}

impl ValidatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.net_income_tolerance = Some(tolerance);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_keywords.is_empty() {
            return Err(ValidatorError::InvalidConfig(
                "page_keywords must not be empty".to_string(),
            ));
        }
        if self.table_keywords.is_empty() {
            return Err(ValidatorError::InvalidConfig(
                "table_keywords must not be empty".to_string(),
            ));
        }
        if self.min_keyword_hits == 0 || self.min_keyword_hits > self.page_keywords.len() {
            return Err(ValidatorError::InvalidConfig(format!(
                "min_keyword_hits must be between 1 and {}, got {}",
                self.page_keywords.len(),
                self.min_keyword_hits
            )));
        }
        if let Some(tolerance) = self.net_income_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ValidatorError::InvalidConfig(format!(
                    "net_income_tolerance must be a non-negative number, got {}",
                    tolerance
                )));
            }
        }
        Ok(())
    }
}
