//! Output format value object

use serde::{Deserialize, Serialize};

/// How an analysis report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report with colours
    Full,
    /// Machine-readable JSON
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Full
    }
}
