//! Country Threat Risk Model
//!
//! Computes a weighted risk score per country from an immutable threat catalog
//! and derives the bar geometry used to draw the scores in a fixed-height
//! SVG chart.
//!
//! # Scoring Model
//!
//! ```text
//! score(country) = Σ_c severity[country][c] · weight[c] / Σ_c weight[c]
//! ```
//!
//! | Term | Range | Description |
//! |------|-------|-------------|
//! | severity | 1-5   | Base severity of a threat category for a country (catalog) |
//! | weight   | 0-10  | Caller-supplied emphasis for a category in one submission |
//! | score    | 1-5   | Weighted average, rounded to 2 decimals |
//!
//! A zero weight sum yields a score of 0.00 rather than an undefined ratio.
//!
//! The catalog is constructed once at process start and passed explicitly into
//! every scoring call; nothing in this crate holds ambient state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod catalog;
pub mod chart;
pub mod scorer;
pub mod weights;

pub use catalog::ThreatCatalog;
pub use chart::{bar_geometry, bar_height, y_offset, BarGeometry, CHART_HEIGHT};
pub use scorer::{assess, risk_score};
pub use weights::{parse_submission, parse_weight, Submission};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("unknown country: {0}")]
    UnknownCountry(String),
    #[error("unknown threat category {category:?} for {country}")]
    UnknownCategory { country: String, category: String },
    #[error("severity {0} out of range (expected 1-5)")]
    SeverityOutOfRange(u8),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// A threat dimension tracked by the catalog.
///
/// The category set is seed data, not a closed enum: alternate catalogs may
/// carry a different set without touching the scoring code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreatCategory {
    /// Display label used in reports and chart keys (e.g. "DDoS").
    pub label: String,
    /// Lowercase key used in form field names (e.g. "ddos").
    pub field_key: String,
}

impl ThreatCategory {
    pub fn new(label: impl Into<String>, field_key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field_key: field_key.into(),
        }
    }
}

/// Per-category weights for one country in one submission, keyed by category
/// label. Absent categories count as weight 0.
pub type WeightSet = BTreeMap<String, u32>;

/// Per-country assessment output.
///
/// `ui_data` carries the chart geometry: `<label>_y` / `<label>_h` per
/// category plus `main_y` / `main_h` for the aggregate score bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryReport {
    pub country: String,
    /// Weighted-average risk score, rounded to 2 decimals.
    pub risk_score: f64,
    /// The weights that produced this score, one per catalog category.
    pub threat_weights: WeightSet,
    /// Bar y-offsets and heights for the 281-unit chart.
    pub ui_data: BTreeMap<String, f64>,
}
