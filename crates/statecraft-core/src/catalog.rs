//! Immutable content catalog: decisions the player can take and
//! conditional event triggers, with cross-reference validation.
//!
//! The catalog is created once at game start and never mutated; per-run
//! trigger state (fired flags, duration counters) lives in the engine.

use crate::calendar::SimDate;
use crate::metric::{MetricId, MetricStore};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Comparison tolerance for `=` and `!=` conditions, absorbing float noise.
pub const CONDITION_EPSILON: f64 = 0.1;

/// Unique identifier for a decision.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub String);

impl DecisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a decision option.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionId(pub String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for an event trigger.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub String);

impl TriggerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A metric delta applied some months after the decision is taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayedEffect {
    pub delay_months: u32,
    pub value: f64,
}

/// Per-metric effect of a decision option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricEffect {
    pub immediate: f64,
    #[serde(default)]
    pub delayed: Vec<DelayedEffect>,
    pub explanation: String,
}

impl MetricEffect {
    pub fn immediate(value: f64, explanation: impl Into<String>) -> Self {
        Self {
            immediate: value,
            delayed: Vec::new(),
            explanation: explanation.into(),
        }
    }

    pub fn with_delayed(mut self, delay_months: u32, value: f64) -> Self {
        self.delayed.push(DelayedEffect {
            delay_months,
            value,
        });
        self
    }
}

/// Metric-gated eligibility: the metric must lie inside `[min, max]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl StateRange {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// One selectable option within a decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: OptionId,
    pub title: String,
    pub description: String,
    /// Cost in billion euro.
    pub costs: Decimal,
    pub effects: BTreeMap<MetricId, MetricEffect>,
    /// Options in the same decision this one cannot be combined with.
    #[serde(default)]
    pub conflicts: BTreeSet<OptionId>,
    /// Options in the same decision that must be selected alongside.
    #[serde(default)]
    pub dependencies: BTreeSet<OptionId>,
}

/// Whether a decision accepts one or several options at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Single,
    Multiple,
}

/// Policy field a decision belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionCategory {
    Social,
    Environment,
    Transport,
    Energy,
    Defense,
    Education,
    Economy,
    Infrastructure,
    Digitalization,
    Agriculture,
    Health,
    Housing,
    Development,
}

/// A player-facing decision: options under a selection mode, an
/// availability window, and an optional metric-gated eligibility check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub title: String,
    pub question: String,
    pub category: DecisionCategory,
    pub description: String,
    pub options: Vec<DecisionOption>,
    pub selection: SelectionMode,
    #[serde(default)]
    pub available_from: Option<SimDate>,
    #[serde(default)]
    pub available_until: Option<SimDate>,
    #[serde(default)]
    pub required_state: BTreeMap<MetricId, StateRange>,
}

impl Decision {
    pub fn option(&self, id: &str) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.id.as_str() == id)
    }

    /// Whether the decision is open on `date` and its metric gate passes.
    /// Metrics missing from the store fail the gate.
    pub fn is_available(&self, date: SimDate, metrics: &MetricStore) -> bool {
        if self.available_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.available_until.is_some_and(|until| date > until) {
            return false;
        }
        self.required_state.iter().all(|(metric, range)| {
            metrics
                .value(metric.as_str())
                .is_some_and(|v| range.contains(v))
        })
    }
}

/// Condition comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "!=")]
    Ne,
}

impl ConditionOp {
    /// Evaluates `value <op> threshold`; equality classes use
    /// [`CONDITION_EPSILON`].
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Lt => value < threshold,
            Self::Eq => (value - threshold).abs() < CONDITION_EPSILON,
            Self::Ge => value >= threshold,
            Self::Le => value <= threshold,
            Self::Ne => (value - threshold).abs() >= CONDITION_EPSILON,
        }
    }
}

/// One condition of an event trigger. Immutable; the consecutive-day
/// counter lives in per-run engine state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventCondition {
    pub metric: MetricId,
    pub op: ConditionOp,
    pub threshold: f64,
    /// Consecutive days the condition must hold before it counts.
    #[serde(default)]
    pub duration: Option<u32>,
}

impl EventCondition {
    pub fn new(metric: impl Into<String>, op: ConditionOp, threshold: f64) -> Self {
        Self {
            metric: MetricId::new(metric),
            op,
            threshold,
            duration: None,
        }
    }

    pub fn held_for(mut self, days: u32) -> Self {
        self.duration = Some(days);
        self
    }
}

/// External actor a trigger is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stakeholder {
    Eu,
    China,
    Usa,
    Nato,
    Economy,
    Unions,
    Environment,
    Media,
}

/// How prominently a fired event features in reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    Medium,
    High,
    Critical,
}

/// A conditional rule that fires autonomously once its conditions hold
/// for the required duration and a probability draw passes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventTrigger {
    pub id: TriggerId,
    pub name: String,
    pub description: String,
    pub conditions: Vec<EventCondition>,
    pub effects: BTreeMap<MetricId, f64>,
    /// Cost in billion euro settled against the ledger on firing.
    #[serde(default)]
    pub cost: Decimal,
    pub one_time: bool,
    /// Daily firing probability in [0, 1] once conditions are satisfied.
    pub probability: f64,
    #[serde(default)]
    pub stakeholder: Option<Stakeholder>,
    pub importance: Importance,
}

/// The full immutable content catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub decisions: Vec<Decision>,
    pub triggers: Vec<EventTrigger>,
}

impl Catalog {
    pub fn decision(&self, id: &str) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.id.as_str() == id)
    }

    pub fn trigger(&self, id: &str) -> Option<&EventTrigger> {
        self.triggers.iter().find(|t| t.id.as_str() == id)
    }
}

/// Validation errors for catalog invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Two decisions, options, or triggers share an id.
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    /// A decision has no options.
    #[error("decision {0} has no options")]
    NoOptions(String),
    /// A trigger has no conditions.
    #[error("trigger {0} has no conditions")]
    NoConditions(String),
    /// Probability outside [0, 1].
    #[error("trigger {0} has probability {1} outside [0, 1]")]
    InvalidProbability(String, f64),
    /// Negative monetary cost.
    #[error("{0} has a negative cost")]
    NegativeCost(String),
    /// Conflict or dependency names an option not in the same decision.
    #[error("option {option} referenced by {owner} does not exist")]
    UnknownOptionRef { owner: String, option: String },
    /// Condition or gate references a metric missing from the store.
    #[error("{owner} references unknown metric {metric}")]
    UnknownMetric { owner: String, metric: String },
    /// Metric bounds are inverted or the value lies outside them.
    #[error("metric {0} violates min <= value <= max")]
    InvalidBounds(String),
    /// Non-finite numeric field.
    #[error("non-finite value in {0}")]
    NonFinite(String),
}

/// Validates a metric store: finite bounds, `min < max`, value inside.
pub fn validate_metrics(store: &MetricStore) -> Result<(), ValidationError> {
    for metric in store.iter() {
        if !(metric.value.is_finite() && metric.min_value.is_finite() && metric.max_value.is_finite())
        {
            return Err(ValidationError::NonFinite(metric.id.as_str().to_string()));
        }
        if metric.min_value >= metric.max_value
            || metric.value < metric.min_value
            || metric.value > metric.max_value
        {
            return Err(ValidationError::InvalidBounds(metric.id.as_str().to_string()));
        }
    }
    Ok(())
}

/// Validates a single decision: options present and uniquely named,
/// conflicts/dependencies resolve within the decision, costs non-negative.
pub fn validate_decision(decision: &Decision) -> Result<(), ValidationError> {
    if decision.options.is_empty() {
        return Err(ValidationError::NoOptions(decision.id.as_str().to_string()));
    }
    let mut ids: BTreeSet<&OptionId> = BTreeSet::new();
    for option in &decision.options {
        if !ids.insert(&option.id) {
            return Err(ValidationError::DuplicateId(option.id.as_str().to_string()));
        }
        if option.costs < Decimal::ZERO {
            return Err(ValidationError::NegativeCost(option.id.as_str().to_string()));
        }
    }
    for option in &decision.options {
        for referenced in option.conflicts.iter().chain(option.dependencies.iter()) {
            if !ids.contains(referenced) {
                return Err(ValidationError::UnknownOptionRef {
                    owner: option.id.as_str().to_string(),
                    option: referenced.as_str().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Validates a trigger against the metric store.
pub fn validate_trigger(
    trigger: &EventTrigger,
    metrics: &MetricStore,
) -> Result<(), ValidationError> {
    if trigger.conditions.is_empty() {
        return Err(ValidationError::NoConditions(trigger.id.as_str().to_string()));
    }
    if !(0.0..=1.0).contains(&trigger.probability) || !trigger.probability.is_finite() {
        return Err(ValidationError::InvalidProbability(
            trigger.id.as_str().to_string(),
            trigger.probability,
        ));
    }
    if trigger.cost < Decimal::ZERO {
        return Err(ValidationError::NegativeCost(trigger.id.as_str().to_string()));
    }
    for condition in &trigger.conditions {
        if metrics.get(condition.metric.as_str()).is_none() {
            return Err(ValidationError::UnknownMetric {
                owner: trigger.id.as_str().to_string(),
                metric: condition.metric.as_str().to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the whole catalog against the metric store, including
/// id uniqueness across decisions and triggers.
pub fn validate_catalog(catalog: &Catalog, metrics: &MetricStore) -> Result<(), ValidationError> {
    validate_metrics(metrics)?;
    let mut decision_ids: BTreeSet<&DecisionId> = BTreeSet::new();
    for decision in &catalog.decisions {
        if !decision_ids.insert(&decision.id) {
            return Err(ValidationError::DuplicateId(
                decision.id.as_str().to_string(),
            ));
        }
        validate_decision(decision)?;
    }
    let mut trigger_ids: BTreeSet<&TriggerId> = BTreeSet::new();
    for trigger in &catalog.triggers {
        if !trigger_ids.insert(&trigger.id) {
            return Err(ValidationError::DuplicateId(trigger.id.as_str().to_string()));
        }
        validate_trigger(trigger, metrics)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::GAME_START;
    use crate::metric::{Metric, MetricCategory};

    fn metrics() -> MetricStore {
        let mut store = MetricStore::new();
        store.insert(Metric::new(
            "debt",
            "Debt",
            "bn EUR",
            0.0,
            -500.0,
            0.0,
            MetricCategory::Economy,
            GAME_START,
            "baseline",
        ));
        store
    }

    fn option(id: &str) -> DecisionOption {
        DecisionOption {
            id: OptionId::new(id),
            title: id.to_string(),
            description: String::new(),
            costs: Decimal::new(5, 0),
            effects: BTreeMap::new(),
            conflicts: BTreeSet::new(),
            dependencies: BTreeSet::new(),
        }
    }

    fn decision(options: Vec<DecisionOption>) -> Decision {
        Decision {
            id: DecisionId::new("test"),
            title: "Test".into(),
            question: String::new(),
            category: DecisionCategory::Economy,
            description: String::new(),
            options,
            selection: SelectionMode::Multiple,
            available_from: None,
            available_until: None,
            required_state: BTreeMap::new(),
        }
    }

    #[test]
    fn condition_epsilon_for_equality() {
        assert!(ConditionOp::Eq.holds(50.05, 50.0));
        assert!(!ConditionOp::Eq.holds(50.2, 50.0));
        assert!(ConditionOp::Ne.holds(50.2, 50.0));
        assert!(!ConditionOp::Ne.holds(50.05, 50.0));
    }

    #[test]
    fn ordering_operators() {
        assert!(ConditionOp::Gt.holds(1.0, 0.5));
        assert!(!ConditionOp::Gt.holds(0.5, 0.5));
        assert!(ConditionOp::Ge.holds(0.5, 0.5));
        assert!(ConditionOp::Lt.holds(-200.5, -200.0));
        assert!(ConditionOp::Le.holds(-200.0, -200.0));
    }

    #[test]
    fn state_range_gates() {
        let range = StateRange::at_least(25.0);
        assert!(range.contains(25.0));
        assert!(!range.contains(24.9));
        let range = StateRange {
            min: Some(10.0),
            max: Some(20.0),
        };
        assert!(range.contains(15.0));
        assert!(!range.contains(21.0));
    }

    #[test]
    fn availability_window() {
        let mut d = decision(vec![option("a")]);
        d.available_from = Some(SimDate::new(2026, 1, 1));
        let store = metrics();
        assert!(!d.is_available(GAME_START, &store));
        assert!(d.is_available(SimDate::new(2026, 1, 1), &store));
    }

    #[test]
    fn missing_gate_metric_fails_availability() {
        let mut d = decision(vec![option("a")]);
        d.required_state
            .insert(MetricId::new("popularity"), StateRange::at_least(25.0));
        assert!(!d.is_available(GAME_START, &metrics()));
    }

    #[test]
    fn duplicate_option_ids_rejected() {
        let d = decision(vec![option("a"), option("a")]);
        assert_eq!(
            validate_decision(&d),
            Err(ValidationError::DuplicateId("a".into()))
        );
    }

    #[test]
    fn dangling_conflict_rejected() {
        let mut a = option("a");
        a.conflicts.insert(OptionId::new("ghost"));
        let d = decision(vec![a, option("b")]);
        assert!(matches!(
            validate_decision(&d),
            Err(ValidationError::UnknownOptionRef { .. })
        ));
    }

    #[test]
    fn trigger_with_unknown_metric_rejected() {
        let trigger = EventTrigger {
            id: TriggerId::new("t"),
            name: "T".into(),
            description: String::new(),
            conditions: vec![EventCondition::new("ghost", ConditionOp::Gt, 1.0)],
            effects: BTreeMap::new(),
            cost: Decimal::ZERO,
            one_time: true,
            probability: 0.5,
            stakeholder: None,
            importance: Importance::Medium,
        };
        assert!(matches!(
            validate_trigger(&trigger, &metrics()),
            Err(ValidationError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn probability_bounds_enforced() {
        let trigger = EventTrigger {
            id: TriggerId::new("t"),
            name: "T".into(),
            description: String::new(),
            conditions: vec![EventCondition::new("debt", ConditionOp::Lt, -100.0)],
            effects: BTreeMap::new(),
            cost: Decimal::ZERO,
            one_time: false,
            probability: 1.5,
            stakeholder: None,
            importance: Importance::Medium,
        };
        assert!(matches!(
            validate_trigger(&trigger, &metrics()),
            Err(ValidationError::InvalidProbability(_, _))
        ));
    }
}
