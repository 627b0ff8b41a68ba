//! Validator options.
//!
//! This module provides configuration options for the tree validator.

use ecow::EcoString;
use serde::Serialize;

/// How reference identifiers are compared with definition identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierMatching {
    /// Identifiers must be equal byte for byte
    #[default]
    Exact,
    /// Identifiers are compared after lowercasing and collapsing whitespace
    CaseInsensitive,
}

impl IdentifierMatching {
    /// Normalizes `identifier` into the form used for comparison.
    pub fn normalize(self, identifier: &str) -> EcoString {
        match self {
            IdentifierMatching::Exact => identifier.into(),
            IdentifierMatching::CaseInsensitive => {
                let mut normalized = EcoString::new();
                for word in identifier.split_whitespace() {
                    if !normalized.is_empty() {
                        normalized.push(' ');
                    }
                    normalized.push_str(&word.to_lowercase());
                }
                normalized
            }
        }
    }
}

/// Tree validator options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorOptions {
    /// Whether to check node attributes against their variant definitions
    pub check_attributes: bool,
    /// Whether to resolve references against definitions in the tree
    pub check_references: bool,
    /// How reference identifiers are matched
    pub identifier_matching: IdentifierMatching,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            check_attributes: true,
            check_references: true,
            identifier_matching: IdentifierMatching::Exact,
        }
    }
}

/// Builder for ValidatorOptions
#[derive(Debug, Default)]
pub struct ValidatorOptionsBuilder {
    options: ValidatorOptions,
}

impl ValidatorOptionsBuilder {
    /// Create a new ValidatorOptionsBuilder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether attributes are checked
    pub fn check_attributes(mut self, check: bool) -> Self {
        self.options.check_attributes = check;
        self
    }

    /// Set whether references are resolved
    pub fn check_references(mut self, check: bool) -> Self {
        self.options.check_references = check;
        self
    }

    /// Set how reference identifiers are matched
    pub fn identifier_matching(mut self, matching: IdentifierMatching) -> Self {
        self.options.identifier_matching = matching;
        self
    }

    /// Build the ValidatorOptions
    pub fn build(self) -> ValidatorOptions {
        self.options
    }
}
