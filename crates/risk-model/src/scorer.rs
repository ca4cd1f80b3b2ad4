//! Risk scoring: weighted average of catalog severities.
//!
//! ```text
//! score(country) = Σ_c severity[country][c] · weight[c] / Σ_c weight[c]
//! ```
//!
//! Scores are rounded to 2 decimals half-away-from-zero (`f64::round`). A
//! submission where every weight is zero has no defined ratio; it scores
//! 0.00 so the request stays non-fatal.

use crate::{chart, CountryReport, ModelError, Result, ThreatCatalog, WeightSet};
use std::collections::BTreeMap;
use tracing::debug;

/// Round to 2 decimal places, half-away-from-zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted-average risk score for one country.
///
/// Every category in `weights` must exist in the catalog for `country`;
/// catalog categories absent from `weights` count as weight 0.
pub fn risk_score(catalog: &ThreatCatalog, country: &str, weights: &WeightSet) -> Result<f64> {
    if !catalog.contains_country(country) {
        return Err(ModelError::UnknownCountry(country.to_string()));
    }

    let mut weighted_sum: u64 = 0;
    let mut total_weight: u64 = 0;

    for (category, &weight) in weights {
        let severity = catalog.severity(country, category)?;
        weighted_sum += u64::from(severity) * u64::from(weight);
        total_weight += u64::from(weight);
    }

    if total_weight == 0 {
        return Ok(0.0);
    }

    Ok(round2(weighted_sum as f64 / total_weight as f64))
}

/// Score one country and assemble its report with chart geometry.
///
/// `threat_weights` in the report covers every catalog category, defaulting
/// absent ones to 0. `ui_data` holds `<label>_y` / `<label>_h` per category
/// plus `main_y` / `main_h` for the aggregate score bar.
pub fn assess(catalog: &ThreatCatalog, country: &str, weights: &WeightSet) -> Result<CountryReport> {
    let mut full_weights = WeightSet::new();
    for category in catalog.categories() {
        let weight = weights.get(&category.label).copied().unwrap_or(0);
        full_weights.insert(category.label.clone(), weight);
    }
    // Reject categories the catalog does not know for this country.
    for category in weights.keys() {
        catalog.severity(country, category)?;
    }

    let score = risk_score(catalog, country, &full_weights)?;

    let mut ui_data = BTreeMap::new();
    for (label, &weight) in &full_weights {
        let geo = chart::bar_geometry(f64::from(weight));
        ui_data.insert(format!("{label}_y"), geo.y);
        ui_data.insert(format!("{label}_h"), geo.height);
    }
    let main = chart::bar_geometry(score);
    ui_data.insert("main_y".to_string(), main.y);
    ui_data.insert("main_h".to_string(), main.height);

    debug!("Scored {country}: {score:.2} (weights {full_weights:?})");

    Ok(CountryReport {
        country: country.to_string(),
        risk_score: score,
        threat_weights: full_weights,
        ui_data,
    })
}
