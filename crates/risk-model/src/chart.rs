//! Bar-chart geometry for the fixed-height SVG view.
//!
//! A weight on the 0-10 scale maps linearly onto a 281-unit-tall chart:
//! weight 10 fills the chart, weight 0 collapses the bar onto the baseline.
//! Bars grow upward, so the y-offset is the chart height minus the bar
//! height. Inputs outside [0, 10] are clamped at the boundary, which keeps
//! both outputs non-negative by construction.

use serde::Serialize;

/// Chart height in SVG user units.
pub const CHART_HEIGHT: f64 = 281.0;

/// Upper end of the weight scale (weights run 0-10).
pub const FULL_SCALE: f64 = 10.0;

/// One bar's placement inside the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    /// Distance from the chart top to the top of the bar.
    pub y: f64,
    /// Bar height.
    pub height: f64,
}

fn clamp_weight(weight: f64) -> f64 {
    weight.clamp(0.0, FULL_SCALE)
}

/// Bar height for a weight: `(w · 10) / 100 · 281`.
pub fn bar_height(weight: f64) -> f64 {
    (clamp_weight(weight) * 10.0) / 100.0 * CHART_HEIGHT
}

/// Y-offset of the bar top: chart height minus bar height.
pub fn y_offset(weight: f64) -> f64 {
    CHART_HEIGHT - bar_height(weight)
}

/// Both placements for one weight.
pub fn bar_geometry(weight: f64) -> BarGeometry {
    let height = bar_height(weight);
    BarGeometry {
        y: CHART_HEIGHT - height,
        height,
    }
}
