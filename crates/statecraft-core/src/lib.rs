#![deny(warnings)]

//! Core domain models and invariants for the governance simulation.
//!
//! This crate defines the simulated-era calendar, the bounded metric
//! store with historical provenance, the budget/debt ledger, the
//! immutable decision/trigger catalog, and validation helpers that
//! guarantee basic invariants across them.

pub mod calendar;
pub mod catalog;
pub mod ledger;
pub mod metric;
pub mod record;

pub use calendar::{
    days_in_month, days_in_year, is_leap_year, Legislature, SimDate, ELECTION_YEARS, GAME_END,
    GAME_START,
};
pub use catalog::{
    validate_catalog, validate_decision, validate_metrics, validate_trigger, Catalog, ConditionOp,
    Decision, DecisionCategory, DecisionId, DecisionOption, DelayedEffect, EventCondition,
    EventTrigger, Importance, MetricEffect, OptionId, SelectionMode, Stakeholder, StateRange,
    TriggerId, ValidationError, CONDITION_EPSILON,
};
pub use ledger::Ledger;
pub use metric::{HistoryPoint, Metric, MetricCategory, MetricId, MetricStore, Provenance};
pub use record::{Coalition, DecisionRecord, GameEvent, Grade, MetricChange, YearlyReport};
