//! Weighted overall-performance rating.

use crate::state::GameState;

/// Metric weights for the overall rating. Negative weights mark
/// lower-is-better quantities (unemployment, debt).
pub const RATING_WEIGHTS: &[(&str, f64)] = &[
    ("popularity", 0.15),
    ("economic_growth", 0.12),
    ("unemployment", -0.10),
    ("co2_reduction_path", 0.10),
    ("future_viability_index", 0.10),
    ("debt", -0.08),
    ("coalition_social", 0.08),
    ("coalition_liberal", 0.08),
    ("investment_attractiveness", 0.07),
    ("energy_security", 0.05),
    ("digitalization_index", 0.05),
];

/// Metric id the aggregated rating is written into.
pub const OVERALL_RATING: &str = "overall_rating";

/// Recomputes the overall rating: each weighted metric normalized to
/// 0-100, multiplied by its signed weight, summed, divided by the sum
/// of absolute weights, clamped to [5, 98]. Writes the result into the
/// `overall_rating` metric (appending a history point when it moved).
/// Returns whether the metric changed.
pub(crate) fn recalculate(state: &mut GameState) -> bool {
    let mut score = 0.0;
    let mut weight_sum = 0.0;
    for (id, weight) in RATING_WEIGHTS {
        let Some(metric) = state.metrics.get(id) else {
            continue;
        };
        let normalized = (metric.value - metric.min_value)
            / (metric.max_value - metric.min_value)
            * 100.0;
        score += normalized * weight;
        weight_sum += weight.abs();
    }
    if weight_sum == 0.0 {
        return false;
    }
    let rating = (score / weight_sum).clamp(5.0, 98.0);
    state.metrics.set_value(
        OVERALL_RATING,
        rating,
        state.date,
        "Weighted overall rating recomputed",
    )
}
