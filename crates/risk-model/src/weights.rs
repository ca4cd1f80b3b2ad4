//! Weight parsing from raw form fields.
//!
//! The form posts one field per country/category pair, named
//! `{Country}_{category_key}_weight` (e.g. `Canada_physical_attack_weight`).
//! Values are untrusted strings: a non-empty ASCII-digit string parses as the
//! weight, anything else coerces silently to 0. That silent fallback is the
//! documented contract of the form, not an error path.
//!
//! Field names that do not end in a known category key are ignored (the form
//! carries other controls). A recognized category key with an unknown country
//! prefix is a validation error.

use crate::{ModelError, Result, ThreatCatalog, WeightSet};
use std::collections::BTreeMap;
use tracing::debug;

/// Parsed submission: per-country weight sets, keyed by country name.
pub type Submission = BTreeMap<String, WeightSet>;

/// Suffix every weight field name carries.
const FIELD_SUFFIX: &str = "_weight";

/// Coerce a raw form value to a weight.
///
/// Mirrors the form contract: only non-empty ASCII-digit strings count, and
/// values too large for `u32` fall back to 0 under the same silent policy.
pub fn parse_weight(raw: &str) -> u32 {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

/// Decompose a field name into its country prefix and category.
///
/// Returns `None` for field names that are not weight fields.
fn split_field<'a>(
    catalog: &'a ThreatCatalog,
    name: &'a str,
) -> Option<(&'a str, &'a crate::ThreatCategory)> {
    let rest = name.strip_suffix(FIELD_SUFFIX)?;

    // Longest field key wins, so a key can safely be a suffix of another.
    let mut best: Option<(&str, &crate::ThreatCategory)> = None;
    for category in catalog.categories() {
        if let Some(country) = rest
            .strip_suffix(category.field_key.as_str())
            .and_then(|p| p.strip_suffix('_'))
        {
            let longer = best.map_or(true, |(_, b)| category.field_key.len() > b.field_key.len());
            if longer {
                best = Some((country, category));
            }
        }
    }
    best
}

/// Parse the raw form-field map into per-country weight sets.
///
/// Countries never mentioned in the fields are absent from the result; the
/// caller assesses exactly what was submitted.
pub fn parse_submission(
    catalog: &ThreatCatalog,
    fields: &BTreeMap<String, String>,
) -> Result<Submission> {
    let mut submission = Submission::new();

    for (name, value) in fields {
        let Some((country, category)) = split_field(catalog, name) else {
            debug!("Ignoring non-weight field {name:?}");
            continue;
        };

        if !catalog.contains_country(country) {
            return Err(ModelError::UnknownCountry(country.to_string()));
        }

        submission
            .entry(country.to_string())
            .or_default()
            .insert(category.label.clone(), parse_weight(value));
    }

    Ok(submission)
}
