//! Yearly report generation: per-metric deltas, major events, grade,
//! and threshold recommendations.

use crate::state::GameState;
use statecraft_core::{Grade, Importance, MetricChange, MetricId, YearlyReport};
use std::collections::BTreeMap;

/// Aggregates one simulated year into a graded summary.
///
/// For every metric, the start value is the first history point dated
/// January of `year` (falling back to the current value) and the end
/// value is the last history point dated within `year` (same fallback).
pub(crate) fn generate(state: &GameState, year: i32, skipped: bool) -> YearlyReport {
    let decisions_count = state
        .decision_log
        .iter()
        .filter(|d| d.date.year == year)
        .count();
    let major_events = state
        .event_log
        .iter()
        .filter(|e| e.date.year == year && e.importance >= Importance::High)
        .cloned()
        .collect();

    let mut metric_changes = BTreeMap::new();
    for metric in state.metrics.iter() {
        let start = metric
            .history
            .iter()
            .find(|h| h.date.year == year && h.date.month == 1)
            .map_or(metric.value, |h| h.value);
        let end = metric
            .history
            .iter()
            .filter(|h| h.date.year == year)
            .next_back()
            .map_or(metric.value, |h| h.value);
        metric_changes.insert(
            metric.id.clone(),
            MetricChange {
                start,
                end,
                change: end - start,
            },
        );
    }

    let overall_change = metric_changes
        .get(&MetricId::new("overall_rating"))
        .map_or(0.0, |c| c.change);

    YearlyReport {
        year,
        decisions_count,
        major_events,
        metric_changes,
        coalition_stability: state.coalition.stability,
        public_approval: state.metrics.value("popularity").unwrap_or(50.0),
        economic_performance: state.metrics.value("economic_growth").unwrap_or(0.0),
        recommendations: recommendations(state),
        grade: Grade::from_change(overall_change),
        skipped,
    }
}

/// Independent threshold checks; any subset may fire, order-free.
fn recommendations(state: &GameState) -> Vec<String> {
    let mut out = Vec::new();
    if state.metrics.value("debt").is_some_and(|v| v < -100.0) {
        out.push("Debt level critical - urgent consolidation required".to_string());
    }
    if state.metrics.value("popularity").is_some_and(|v| v < 30.0) {
        out.push("Low public approval - policies closer to citizens needed".to_string());
    }
    let social = state.metrics.value("coalition_social").unwrap_or(f64::MAX);
    let liberal = state.metrics.value("coalition_liberal").unwrap_or(f64::MAX);
    if social < 25.0 || liberal < 25.0 {
        out.push("Coalition unstable - seek compromises with partners".to_string());
    }
    if state
        .metrics
        .value("co2_reduction_path")
        .is_some_and(|v| v < 40.0)
    {
        out.push("Climate targets at risk - stronger efforts needed".to_string());
    }
    out
}
