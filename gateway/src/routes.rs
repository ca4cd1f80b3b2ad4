//! Risk board routes.
//!
//! Two surfaces over the same computation:
//! - HTML: `GET /` (weight form), `POST /` (results page with SVG charts)
//! - JSON: `POST /api/v1/assess`, `GET /api/v1/catalog`
//!
//! Both accept the raw form-field map (`{Country}_{category}_weight` keys)
//! and return per-country reports. An unknown country prefix maps to 400
//! with the fixed "Invalid country selected." message.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{render, AppState};
use risk_model::{scorer, weights, CountryReport, ModelError, ThreatCatalog, ThreatCategory};

/// User-facing message for an unrecognized country prefix.
pub const INVALID_COUNTRY_MESSAGE: &str = "Invalid country selected.";

// ========== Request/Response Types ==========

#[derive(Debug, Serialize)]
pub struct AssessResponse {
    pub generated_at: String,
    /// Per-country reports, keyed by country name.
    pub results: BTreeMap<String, CountryReport>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub countries: Vec<String>,
    pub categories: Vec<ThreatCategory>,
}

// ========== Assessment Core ==========

/// Parse the raw field map and score every submitted country.
fn run_assessment(
    catalog: &ThreatCatalog,
    fields: &BTreeMap<String, String>,
) -> risk_model::Result<BTreeMap<String, CountryReport>> {
    let submission = weights::parse_submission(catalog, fields)?;

    let mut results = BTreeMap::new();
    for (country, weight_set) in &submission {
        let report = scorer::assess(catalog, country, weight_set)?;
        results.insert(country.clone(), report);
    }
    Ok(results)
}

fn error_message(err: &ModelError) -> String {
    match err {
        ModelError::UnknownCountry(_) => INVALID_COUNTRY_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

// ========== Route Handlers ==========

/// Weight-entry form for all catalog countries.
pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    Html(render::form_page(&state.catalog))
}

/// Form submission: score the submitted countries and render the charts.
pub async fn submit_weights(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let results = run_assessment(&state.catalog, &fields).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Html(render::error_page(&error_message(&err))),
        )
    })?;

    tracing::info!("Assessed {} countries", results.len());
    Ok(Html(render::results_page(&results)))
}

/// JSON assessment over the same field map the form posts.
pub async fn assess(
    State(state): State<AppState>,
    Json(fields): Json<BTreeMap<String, String>>,
) -> Result<Json<AssessResponse>, (StatusCode, String)> {
    let results = run_assessment(&state.catalog, &fields)
        .map_err(|err| (StatusCode::BAD_REQUEST, error_message(&err)))?;

    Ok(Json(AssessResponse {
        generated_at: chrono::Utc::now().to_rfc3339(),
        results,
    }))
}

/// Countries and categories of the active catalog.
pub async fn catalog_info(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        countries: state.catalog.countries().map(str::to_string).collect(),
        categories: state.catalog.categories().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            catalog: Arc::new(ThreatCatalog::with_defaults()),
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_index_page_shows_form() {
        let Html(page) = index_page(State(test_state())).await;

        assert!(page.contains("Country Threat Weights"));
        assert!(page.contains("Canada_ddos_weight"));
        assert!(page.contains("Poland_cloud_security_weight"));
    }

    #[tokio::test]
    async fn test_submit_valid_subset() {
        let form = fields(&[
            ("Canada_ddos_weight", "3"),
            ("Canada_phishing_weight", "4"),
            ("Canada_physical_attack_weight", "2"),
            ("Canada_cloud_security_weight", "3"),
            ("India_ddos_weight", "4"),
            ("India_phishing_weight", "5"),
            ("India_physical_attack_weight", "3"),
            ("India_cloud_security_weight", "2"),
        ]);

        let Html(page) = submit_weights(State(test_state()), Form(form))
            .await
            .expect("valid submission");

        assert!(page.contains("Results"));
        assert!(page.contains("Canada"));
        assert!(page.contains("3.17"));
    }

    #[tokio::test]
    async fn test_submit_invalid_country() {
        let form = fields(&[("InvalidCountry_ddos_weight", "3")]);

        let err = submit_weights(State(test_state()), Form(form))
            .await
            .expect_err("unknown country must be rejected");

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1 .0.contains("Invalid country selected."));
    }

    #[tokio::test]
    async fn test_assess_reference_score() {
        let form = fields(&[
            ("Canada_ddos_weight", "3"),
            ("Canada_phishing_weight", "4"),
            ("Canada_physical_attack_weight", "2"),
            ("Canada_cloud_security_weight", "3"),
        ]);

        let Json(response) = assess(State(test_state()), Json(form))
            .await
            .expect("valid submission");

        assert_eq!(response.results.len(), 1);
        let report = &response.results["Canada"];
        assert_eq!(report.risk_score, 3.17);
        assert_eq!(report.threat_weights["Phishing"], 4);
        assert_eq!(report.ui_data["Phishing_h"], 112.4);
    }

    #[tokio::test]
    async fn test_assess_invalid_country_message() {
        let form = fields(&[("Wakanda_phishing_weight", "5")]);

        let err = assess(State(test_state()), Json(form))
            .await
            .expect_err("unknown country must be rejected");

        assert_eq!(err, (StatusCode::BAD_REQUEST, INVALID_COUNTRY_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_non_numeric_weight_equals_zero() {
        let garbage = fields(&[
            ("China_ddos_weight", "abc"),
            ("China_phishing_weight", "5"),
        ]);
        let explicit = fields(&[
            ("China_ddos_weight", "0"),
            ("China_phishing_weight", "5"),
        ]);

        let Json(from_garbage) = assess(State(test_state()), Json(garbage)).await.unwrap();
        let Json(from_zero) = assess(State(test_state()), Json(explicit)).await.unwrap();

        let a = &from_garbage.results["China"];
        let b = &from_zero.results["China"];
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.threat_weights, b.threat_weights);
    }

    #[tokio::test]
    async fn test_catalog_info_contents() {
        let Json(info) = catalog_info(State(test_state())).await;

        assert_eq!(info.countries, vec!["Canada", "China", "India", "Poland"]);
        assert_eq!(info.categories.len(), 4);
        assert_eq!(info.categories[0].field_key, "ddos");
    }
}
