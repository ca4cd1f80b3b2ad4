//! Threat catalog: country → category → base severity.
//!
//! The catalog is the fixed input side of the scoring model. It is built once
//! at process start (normally via [`ThreatCatalog::with_defaults`]) and never
//! mutated afterwards; tests may construct alternate tables through
//! [`ThreatCatalog::new`] and [`ThreatCatalog::add_country`].

use crate::{ModelError, Result, ThreatCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base severity bounds (inclusive).
pub const SEVERITY_MIN: u8 = 1;
pub const SEVERITY_MAX: u8 = 5;

/// Immutable country → category → severity table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatCatalog {
    /// Category definitions, in display order.
    categories: Vec<ThreatCategory>,
    /// Severity per country, keyed by category label.
    severities: BTreeMap<String, BTreeMap<String, u8>>,
}

impl ThreatCatalog {
    /// Create an empty catalog with the given category set.
    pub fn new(categories: Vec<ThreatCategory>) -> Self {
        Self {
            categories,
            severities: BTreeMap::new(),
        }
    }

    /// Catalog seeded with the reference threat-model table.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new(vec![
            ThreatCategory::new("DDoS", "ddos"),
            ThreatCategory::new("Phishing", "phishing"),
            ThreatCategory::new("PhysicalAttack", "physical_attack"),
            ThreatCategory::new("CloudSecurity", "cloud_security"),
        ]);

        // Severities ordered DDoS, Phishing, PhysicalAttack, CloudSecurity.
        let seed: [(&str, [u8; 4]); 4] = [
            ("Canada", [3, 4, 2, 3]),
            ("India", [4, 5, 3, 2]),
            ("China", [5, 5, 2, 2]),
            ("Poland", [2, 3, 1, 4]),
        ];
        for (country, severities) in seed {
            catalog
                .add_country(country, &severities)
                .expect("default catalog severities are in range");
        }

        catalog
    }

    /// Add a country with one severity per category, in category order.
    pub fn add_country(&mut self, country: impl Into<String>, severities: &[u8]) -> Result<()> {
        debug_assert_eq!(severities.len(), self.categories.len());

        let mut row = BTreeMap::new();
        for (category, &severity) in self.categories.iter().zip(severities) {
            if !(SEVERITY_MIN..=SEVERITY_MAX).contains(&severity) {
                return Err(ModelError::SeverityOutOfRange(severity));
            }
            row.insert(category.label.clone(), severity);
        }
        self.severities.insert(country.into(), row);
        Ok(())
    }

    /// Category definitions, in display order.
    pub fn categories(&self) -> &[ThreatCategory] {
        &self.categories
    }

    /// Country names, sorted.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.severities.keys().map(String::as_str)
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.severities.contains_key(country)
    }

    /// Resolve a form field key (e.g. "physical_attack") to its category.
    pub fn category_by_field_key(&self, field_key: &str) -> Option<&ThreatCategory> {
        self.categories.iter().find(|c| c.field_key == field_key)
    }

    /// Base severity for a country/category pair.
    pub fn severity(&self, country: &str, category_label: &str) -> Result<u8> {
        let row = self
            .severities
            .get(country)
            .ok_or_else(|| ModelError::UnknownCountry(country.to_string()))?;
        row.get(category_label)
            .copied()
            .ok_or_else(|| ModelError::UnknownCategory {
                country: country.to_string(),
                category: category_label.to_string(),
            })
    }

    /// Severity bounds for a country, used by the score-bounds invariant.
    pub fn severity_bounds(&self, country: &str) -> Result<(u8, u8)> {
        let row = self
            .severities
            .get(country)
            .ok_or_else(|| ModelError::UnknownCountry(country.to_string()))?;
        let min = row.values().copied().min().unwrap_or(SEVERITY_MIN);
        let max = row.values().copied().max().unwrap_or(SEVERITY_MAX);
        Ok((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = ThreatCatalog::with_defaults();

        let countries: Vec<&str> = catalog.countries().collect();
        assert_eq!(countries, vec!["Canada", "China", "India", "Poland"]);
        assert_eq!(catalog.categories().len(), 4);

        assert_eq!(catalog.severity("Canada", "Phishing").unwrap(), 4);
        assert_eq!(catalog.severity("China", "DDoS").unwrap(), 5);
        assert_eq!(catalog.severity("Poland", "PhysicalAttack").unwrap(), 1);
    }

    #[test]
    fn test_unknown_lookups() {
        let catalog = ThreatCatalog::with_defaults();

        assert_eq!(
            catalog.severity("Atlantis", "DDoS"),
            Err(ModelError::UnknownCountry("Atlantis".to_string()))
        );
        assert!(matches!(
            catalog.severity("Canada", "Ransomware"),
            Err(ModelError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_severity_range_enforced() {
        let mut catalog = ThreatCatalog::new(vec![ThreatCategory::new("DDoS", "ddos")]);

        assert_eq!(
            catalog.add_country("Nowhere", &[0]),
            Err(ModelError::SeverityOutOfRange(0))
        );
        assert_eq!(
            catalog.add_country("Nowhere", &[6]),
            Err(ModelError::SeverityOutOfRange(6))
        );
        assert!(catalog.add_country("Nowhere", &[5]).is_ok());
    }

    #[test]
    fn test_category_by_field_key() {
        let catalog = ThreatCatalog::with_defaults();

        assert_eq!(
            catalog.category_by_field_key("physical_attack").unwrap().label,
            "PhysicalAttack"
        );
        assert!(catalog.category_by_field_key("ransomware").is_none());
    }

    #[test]
    fn test_severity_bounds() {
        let catalog = ThreatCatalog::with_defaults();

        assert_eq!(catalog.severity_bounds("Canada").unwrap(), (2, 4));
        assert_eq!(catalog.severity_bounds("China").unwrap(), (2, 5));
    }
}
