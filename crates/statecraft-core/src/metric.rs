//! Bounded metrics with append-only history provenance.
//!
//! Every tracked quantity lives in the [`MetricStore`]; all mutation goes
//! through [`MetricStore::apply_delta`], which clamps on every single
//! write so a metric can never transiently leave its bounds.

use crate::calendar::SimDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Unique identifier for a metric, e.g. "popularity", "overall_rating".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricId(pub String);

impl MetricId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MetricId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Who caused a metric mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Decision,
    Event,
    Natural,
}

/// One entry of a metric's append-only history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: SimDate,
    /// Value after the mutation (post-clamp).
    pub value: f64,
    pub source: Provenance,
    /// Id of the acting decision or event, if any.
    pub source_id: Option<String>,
    pub explanation: String,
}

/// Dashboard grouping for a metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Politics,
    Economy,
    Society,
    Security,
    Environment,
    Overall,
}

/// A bounded quantity with full historical provenance.
///
/// Invariant: `min_value <= value <= max_value` after every mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metric {
    pub id: MetricId,
    pub name: String,
    pub unit: String,
    pub value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub category: MetricCategory,
    pub history: Vec<HistoryPoint>,
}

impl Metric {
    /// Builds a metric seeded with one `Natural` history point.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        value: f64,
        min_value: f64,
        max_value: f64,
        category: MetricCategory,
        start: SimDate,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: MetricId::new(id),
            name: name.into(),
            unit: unit.into(),
            value,
            min_value,
            max_value,
            category,
            history: vec![HistoryPoint {
                date: start,
                value,
                source: Provenance::Natural,
                source_id: None,
                explanation: explanation.into(),
            }],
        }
    }
}

/// Exclusive owner of all metrics. Other components receive read access
/// and effect-application requests, never a mutable handle.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MetricStore {
    metrics: BTreeMap<MetricId, Metric>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a metric; replaces any previous one with the same id.
    pub fn insert(&mut self, metric: Metric) {
        self.metrics.insert(metric.id.clone(), metric);
    }

    pub fn get(&self, id: &str) -> Option<&Metric> {
        self.metrics.get(&MetricId::new(id))
    }

    /// Current value of a metric, if present.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.get(id).map(|m| m.value)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.values()
    }

    /// Applies a delta with clamp-on-write and appends a history point.
    ///
    /// Unknown metric ids are a traced no-op: effects may reference
    /// metrics absent from a given configuration. Returns whether a
    /// metric was mutated.
    pub fn apply_delta(
        &mut self,
        id: &MetricId,
        delta: f64,
        date: SimDate,
        source: Provenance,
        source_id: Option<&str>,
        explanation: &str,
    ) -> bool {
        let Some(metric) = self.metrics.get_mut(id) else {
            debug!(metric = id.as_str(), "delta for unknown metric ignored");
            return false;
        };
        let value = (metric.value + delta).clamp(metric.min_value, metric.max_value);
        metric.value = value;
        metric.history.push(HistoryPoint {
            date,
            value,
            source,
            source_id: source_id.map(str::to_string),
            explanation: explanation.to_string(),
        });
        true
    }

    /// Writes an absolute value (clamped); appends a `Natural` history
    /// point only when the value actually moved. Used by the rating
    /// aggregator, which recomputes rather than accumulates.
    pub fn set_value(&mut self, id: &str, value: f64, date: SimDate, explanation: &str) -> bool {
        let metric_id = MetricId::new(id);
        let Some(metric) = self.metrics.get_mut(&metric_id) else {
            debug!(metric = id, "set_value for unknown metric ignored");
            return false;
        };
        let clamped = value.clamp(metric.min_value, metric.max_value);
        if (clamped - metric.value).abs() < 1e-9 {
            return false;
        }
        metric.value = clamped;
        metric.history.push(HistoryPoint {
            date,
            value: clamped,
            source: Provenance::Natural,
            source_id: None,
            explanation: explanation.to_string(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::GAME_START;
    use proptest::prelude::*;

    fn store_with(value: f64, min: f64, max: f64) -> MetricStore {
        let mut store = MetricStore::new();
        store.insert(Metric::new(
            "popularity",
            "Public approval",
            "%",
            value,
            min,
            max,
            MetricCategory::Politics,
            GAME_START,
            "baseline",
        ));
        store
    }

    #[test]
    fn delta_is_clamped_to_bounds() {
        let mut store = store_with(50.0, 20.0, 80.0);
        let id = MetricId::new("popularity");
        store.apply_delta(&id, 100.0, GAME_START, Provenance::Event, None, "spike");
        assert_eq!(store.value("popularity"), Some(80.0));
        store.apply_delta(&id, -500.0, GAME_START, Provenance::Event, None, "crash");
        assert_eq!(store.value("popularity"), Some(20.0));
    }

    #[test]
    fn history_records_provenance() {
        let mut store = store_with(50.0, 20.0, 80.0);
        let id = MetricId::new("popularity");
        store.apply_delta(
            &id,
            5.0,
            GAME_START.add_days(10),
            Provenance::Decision,
            Some("tax_reform"),
            "popular measure",
        );
        let metric = store.get("popularity").unwrap();
        assert_eq!(metric.history.len(), 2);
        let point = &metric.history[1];
        assert_eq!(point.value, 55.0);
        assert_eq!(point.source, Provenance::Decision);
        assert_eq!(point.source_id.as_deref(), Some("tax_reform"));
    }

    #[test]
    fn unknown_metric_is_a_noop() {
        let mut store = store_with(50.0, 20.0, 80.0);
        let applied = store.apply_delta(
            &MetricId::new("nonexistent"),
            5.0,
            GAME_START,
            Provenance::Event,
            None,
            "ignored",
        );
        assert!(!applied);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_value_skips_history_when_unchanged() {
        let mut store = store_with(50.0, 20.0, 80.0);
        assert!(!store.set_value("popularity", 50.0, GAME_START, "no move"));
        assert_eq!(store.get("popularity").unwrap().history.len(), 1);
        assert!(store.set_value("popularity", 61.5, GAME_START, "recomputed"));
        assert_eq!(store.get("popularity").unwrap().history.len(), 2);
    }

    #[test]
    fn serde_roundtrip() {
        let store = store_with(50.0, 20.0, 80.0);
        let json = serde_json::to_string(&store).unwrap();
        let back: MetricStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value("popularity"), Some(50.0));
    }

    proptest! {
        #[test]
        fn bounds_hold_under_arbitrary_deltas(deltas in prop::collection::vec(-200.0f64..200.0, 1..50)) {
            let mut store = store_with(50.0, 20.0, 80.0);
            let id = MetricId::new("popularity");
            let mut date = GAME_START;
            for delta in deltas {
                date = date.add_days(1);
                store.apply_delta(&id, delta, date, Provenance::Natural, None, "drift");
                let metric = store.get("popularity").unwrap();
                prop_assert!(metric.value >= metric.min_value);
                prop_assert!(metric.value <= metric.max_value);
            }
            // History never reordered: dates non-decreasing.
            let metric = store.get("popularity").unwrap();
            for pair in metric.history.windows(2) {
                prop_assert!(pair[0].date <= pair[1].date);
            }
        }
    }
}
