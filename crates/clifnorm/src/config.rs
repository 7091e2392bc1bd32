//! Normalizer configuration types.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ClifnormError;

/// Configuration for the normalization pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub variable_naming: VariableNaming,
    pub unbound_variables: UnboundPolicy,
}

/// Name supply for variable standardization
///
/// Both policies hand out `z`, `y`, ..., `a` first, so outputs agree until
/// the 27th bound variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableNaming {
    /// Reverse alphabet, then numbered rounds: `z1`, ..., `a1`, `z2`, ...
    Unbounded,
    /// Reverse alphabet only; the 27th variable is an error
    Legacy,
}

/// Handling of variables with no enclosing quantifier during standardization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnboundPolicy {
    /// Fail with `UnboundVariable`
    Strict,
    /// Log a warning and keep the name
    Permissive,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            variable_naming: VariableNaming::Unbounded,
            unbound_variables: UnboundPolicy::Strict,
        }
    }
}

impl NormalizerConfig {
    /// Configuration reproducing the legacy tool: 26-name budget, warnings
    /// for unbound variables
    pub fn legacy() -> Self {
        NormalizerConfig {
            variable_naming: VariableNaming::Legacy,
            unbound_variables: UnboundPolicy::Permissive,
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ClifnormError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ClifnormError> {
        serde_json::from_str(content).map_err(|e| ClifnormError::Config(e.to_string()))
    }
}
