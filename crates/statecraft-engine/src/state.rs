//! The game state snapshot.
//!
//! `GameState` is a plain value: transitions consume the current
//! snapshot and return the next one. Nothing outside the engine holds a
//! mutable reference to it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statecraft_core::{
    Catalog, Coalition, DecisionId, DecisionRecord, GameEvent, Ledger, MetricId, MetricStore,
    SimDate, TriggerId, YearlyReport, GAME_START,
};
use std::collections::BTreeMap;

/// Simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    pub start_date: SimDate,
    /// Annual budget in billion euro.
    pub annual_budget: Decimal,
    pub max_decisions_per_year: u32,
    /// Seed for the deterministic event RNG.
    pub rng_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_date: GAME_START,
            annual_budget: Decimal::new(25, 0),
            max_decisions_per_year: 8,
            rng_seed: 42,
        }
    }
}

/// Per-run hysteresis state of one trigger, kept apart from the
/// immutable trigger catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TriggerState {
    /// Set on first firing; permanently retires one-time triggers.
    pub triggered: bool,
    /// Consecutive days each condition has held, indexed like the
    /// trigger's condition list. Reset to 0 the day a condition fails.
    pub duration_met: Vec<u32>,
}

/// A delayed decision effect waiting for its due date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub due: SimDate,
    pub metric: MetricId,
    pub value: f64,
    pub decision: DecisionId,
    pub explanation: String,
}

/// Complete simulation state at one point in simulated time.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameState {
    pub date: SimDate,
    pub decisions_this_year: u32,
    pub max_decisions_per_year: u32,
    pub metrics: MetricStore,
    pub ledger: Ledger,
    /// Static reference data; read for reports, never updated.
    pub coalition: Coalition,
    pub decision_log: Vec<DecisionRecord>,
    pub event_log: Vec<GameEvent>,
    pub yearly_reports: BTreeMap<i32, YearlyReport>,
    pub trigger_state: BTreeMap<TriggerId, TriggerState>,
    pub pending_effects: Vec<PendingEffect>,
    /// Monotonic counter backing deterministic event ids.
    pub event_seq: u64,
    /// Set once the era end is reached; transitions become no-ops.
    pub game_over: bool,
}

impl GameState {
    /// Builds the initial state, deriving per-trigger hysteresis slots
    /// from the catalog.
    pub fn new(
        metrics: MetricStore,
        coalition: Coalition,
        config: &SimConfig,
        catalog: &Catalog,
    ) -> Self {
        let trigger_state = catalog
            .triggers
            .iter()
            .map(|t| {
                (
                    t.id.clone(),
                    TriggerState {
                        triggered: false,
                        duration_met: vec![0; t.conditions.len()],
                    },
                )
            })
            .collect();
        Self {
            date: config.start_date,
            decisions_this_year: 0,
            max_decisions_per_year: config.max_decisions_per_year,
            metrics,
            ledger: Ledger::new(config.annual_budget),
            coalition,
            decision_log: Vec::new(),
            event_log: Vec::new(),
            yearly_reports: BTreeMap::new(),
            trigger_state,
            pending_effects: Vec::new(),
            event_seq: 0,
            game_over: false,
        }
    }
}
