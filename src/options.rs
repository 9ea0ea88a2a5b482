//! Options for condensation and report output

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CondenseResult;

/// Options controlling the derivation and the emitted report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondensationOptions {
    /// Reduce every result entry to lowest terms
    pub simplify: bool,
    /// Powers up to this exponent are written as repeated products in code
    pub max_expanded_power: u32,
    /// Spaces in front of every report line
    pub indent: usize,
    /// Print the matrices before the code statements
    pub show_matrices: bool,
    /// Name of the stiffness matrix object in emitted code
    pub stiffness_name: String,
    /// Name of the load vector object in emitted code
    pub load_name: String,
    /// Name of the displacement vector object in emitted code
    pub displacement_name: String,
}

impl Default for CondensationOptions {
    fn default() -> Self {
        Self {
            simplify: true,
            max_expanded_power: 6,
            indent: 4,
            show_matrices: true,
            stiffness_name: "k".to_string(),
            load_name: "r".to_string(),
            displacement_name: "d".to_string(),
        }
    }
}

impl CondensationOptions {
    /// Load options from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> CondenseResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> CondenseResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Keep results unsimplified
    pub fn without_simplify(mut self) -> Self {
        self.simplify = false;
        self
    }

    /// Set the largest power expanded into a product
    pub fn with_max_expanded_power(mut self, max: u32) -> Self {
        self.max_expanded_power = max;
        self
    }

    /// Only emit code statements
    pub fn code_only(mut self) -> Self {
        self.show_matrices = false;
        self
    }

    /// Set the report indentation
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
