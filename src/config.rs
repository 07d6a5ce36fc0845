//! Caller-supplied settings.
//!
//! Plain `serde` structs so the JS side can pass an object literal through
//! `serde-wasm-bindgen`; every field has a default.

use crate::types::Position;
use serde::Deserialize;

/// How to lay out a random board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub hazard_count: usize,
    /// Cell the player opens first. Hazards are kept out of the square of
    /// `safe_radius` around it.
    pub start: Option<Position>,
    pub safe_radius: usize,
    /// Fixed seed for reproducible layouts; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 16,
            hazard_count: 80,
            start: None,
            safe_radius: 1,
            seed: None,
        }
    }
}

/// Limits for repeated deduction passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoplayConfig {
    /// Stop after this many passes. Defaults to the cell count, which is
    /// enough since every productive pass resolves at least one cell.
    pub max_passes: Option<usize>,
}

impl AutoplayConfig {
    pub fn pass_limit(&self, width: usize, height: usize) -> usize {
        self.max_passes.unwrap_or(width * height)
    }
}
