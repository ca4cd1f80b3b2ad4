//! Server-rendered views: the weight-entry form and the results page with
//! one inline SVG bar chart per country.
//!
//! Everything interpolated here comes from the catalog or from computed
//! reports, never raw request text.

use risk_model::{chart::CHART_HEIGHT, CountryReport, ThreatCatalog};
use std::collections::BTreeMap;

const BAR_WIDTH: f64 = 48.0;
const BAR_GAP: f64 = 24.0;
/// Vertical band under the chart for category labels.
const LABEL_BAND: f64 = 36.0;

/// Shared page shell.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem; }}\n\
         fieldset {{ margin-bottom: 1rem; }}\n\
         .bar {{ fill: #4a7bd0; }}\n\
         .bar-main {{ fill: #d0564a; }}\n\
         .chart {{ background: #f4f4f4; }}\n\
         </style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

/// Weight-entry form covering every catalog country and category.
pub fn form_page(catalog: &ThreatCatalog) -> String {
    let mut body = String::from("<h1>Country Threat Weights</h1>\n<form method=\"post\" action=\"/\">\n");

    for country in catalog.countries() {
        body.push_str(&format!("<fieldset>\n<legend>{country}</legend>\n"));
        for category in catalog.categories() {
            let name = format!("{}_{}_weight", country, category.field_key);
            body.push_str(&format!(
                "<label>{label} \
                 <input type=\"number\" name=\"{name}\" min=\"0\" max=\"10\" value=\"0\"></label>\n",
                label = category.label,
            ));
        }
        body.push_str("</fieldset>\n");
    }

    body.push_str("<button type=\"submit\">Analyze</button>\n</form>\n");
    page("Country Threat Weights", &body)
}

/// Results page: score plus chart for each assessed country.
pub fn results_page(results: &BTreeMap<String, CountryReport>) -> String {
    let mut body = String::from("<h1>Results</h1>\n");

    for report in results.values() {
        body.push_str(&format!(
            "<section>\n<h2>{country}</h2>\n<p>Risk score: {score:.2}</p>\n{chart}</section>\n",
            country = report.country,
            score = report.risk_score,
            chart = country_chart(report),
        ));
    }

    body.push_str("<p><a href=\"/\">Back to form</a></p>\n");
    page("Results", &body)
}

/// Error page with the validation message.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Error</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to form</a></p>\n"
    );
    page("Error", &body)
}

/// One country's SVG chart: a bar per category plus the aggregate score bar.
fn country_chart(report: &CountryReport) -> String {
    let slots = report.threat_weights.len() + 1;
    let width = slots as f64 * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
    let height = CHART_HEIGHT + LABEL_BAND;

    let mut svg = format!(
        "<svg class=\"chart\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\" role=\"img\">\n"
    );

    let mut x = BAR_GAP;
    for (label, weight) in &report.threat_weights {
        let y = ui_value(report, &format!("{label}_y"), CHART_HEIGHT);
        let h = ui_value(report, &format!("{label}_h"), 0.0);
        svg.push_str(&bar(x, y, h, "bar", label, &weight.to_string()));
        x += BAR_WIDTH + BAR_GAP;
    }

    let main_y = ui_value(report, "main_y", CHART_HEIGHT);
    let main_h = ui_value(report, "main_h", 0.0);
    let score = format!("{:.2}", report.risk_score);
    svg.push_str(&bar(x, main_y, main_h, "bar-main", "Score", &score));

    svg.push_str(&format!(
        "<line x1=\"0\" y1=\"{CHART_HEIGHT}\" x2=\"{width}\" y2=\"{CHART_HEIGHT}\" stroke=\"#333\"/>\n</svg>\n"
    ));
    svg
}

/// Chart value for a report, or a collapsed-on-the-baseline fallback when a
/// hand-built report omits the key.
fn ui_value(report: &CountryReport, key: &str, fallback: f64) -> f64 {
    report.ui_data.get(key).copied().unwrap_or(fallback)
}

fn bar(x: f64, y: f64, height: f64, class: &str, label: &str, value: &str) -> String {
    let label_y = CHART_HEIGHT + 16.0;
    let value_y = CHART_HEIGHT + 32.0;
    let center = x + BAR_WIDTH / 2.0;
    format!(
        "<rect class=\"{class}\" x=\"{x}\" y=\"{y}\" width=\"{BAR_WIDTH}\" height=\"{height}\"/>\n\
         <text x=\"{center}\" y=\"{label_y}\" text-anchor=\"middle\" font-size=\"11\">{label}</text>\n\
         <text x=\"{center}\" y=\"{value_y}\" text-anchor=\"middle\" font-size=\"11\">{value}</text>\n"
    )
}
