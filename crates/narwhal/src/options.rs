//! Layout configuration.
//!
//! Options deserialize from camelCase JSON documents; every field is optional and falls back to
//! [`LayoutOptions::default`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Acyclicer {
    #[default]
    Dfs,
    /// Leave cycles alone; ranking fails if one exists.
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranker {
    #[default]
    LongestPath,
    /// Keep the ranks already assigned by the caller.
    #[serde(rename = "none", alias = "fixed")]
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub node_sep: f64,
    pub rank_sep: f64,
    pub acyclicer: Acyclicer,
    pub ranker: Ranker,
    pub order_iterations: usize,
    pub position_iterations: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_sep: 20.0,
            rank_sep: 40.0,
            acyclicer: Acyclicer::Dfs,
            ranker: Ranker::LongestPath,
            order_iterations: 4,
            position_iterations: 8,
        }
    }
}

impl LayoutOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: LayoutOptions =
            serde_json::from_str(text).map_err(|e| Error::InvalidOptions {
                message: e.to_string(),
            })?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let options: LayoutOptions =
            serde_json::from_value(value).map_err(|e| Error::InvalidOptions {
                message: e.to_string(),
            })?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("nodeSep", self.node_sep), ("rankSep", self.rank_sep)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOptions {
                    message: format!("{name} must be a finite, non-negative number (got {value})"),
                });
            }
        }
        Ok(())
    }
}
