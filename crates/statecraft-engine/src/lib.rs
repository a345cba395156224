#![deny(warnings)]
//! Deterministic governance simulation engine.
//!
//! The engine owns a [`GameState`] snapshot and advances it through
//! pure transitions: player decisions, daily ticks, and bulk jumps.
//! Event firing is driven by a seeded RNG, so two engines built from
//! the same configuration and fed the same calls produce identical
//! histories.

pub mod data;
mod decision;
mod events;
mod notify;
mod rating;
mod report;
mod state;
mod tick;

pub use decision::DecisionError;
pub use notify::{
    BufferSink, Notification, NotificationKind, NotificationSink, NullSink, TracingSink,
};
pub use rating::{OVERALL_RATING, RATING_WEIGHTS};
pub use state::{GameState, PendingEffect, SimConfig, TriggerState};
pub use tick::DayOutcome;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use statecraft_core::{
    validate_catalog, Catalog, Coalition, DecisionRecord, GameEvent, Ledger, MetricStore, SimDate,
    ValidationError, YearlyReport,
};
use std::collections::BTreeMap;
use std::mem;
use tracing::info;

/// The simulation facade: catalog, state snapshot, seeded RNG, and a
/// notification sink.
pub struct Engine {
    state: GameState,
    catalog: Catalog,
    rng: ChaCha8Rng,
    sink: Box<dyn NotificationSink>,
}

impl Engine {
    /// Builds an engine after validating the catalog against the
    /// metric store. Notifications go to a [`NullSink`] by default.
    pub fn new(
        catalog: Catalog,
        metrics: MetricStore,
        coalition: Coalition,
        config: SimConfig,
    ) -> Result<Self, ValidationError> {
        validate_catalog(&catalog, &metrics)?;
        let state = GameState::new(metrics, coalition, &config, &catalog);
        info!(
            start = %state.date,
            decisions = catalog.decisions.len(),
            triggers = catalog.triggers.len(),
            seed = config.rng_seed,
            "engine initialized"
        );
        Ok(Self {
            state,
            catalog,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            sink: Box::new(NullSink),
        })
    }

    /// Replaces the notification sink.
    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Takes a decision with the given selected options. On error the
    /// state is untouched; recoverable errors additionally surface a
    /// notification.
    pub fn make_decision(
        &mut self,
        decision_id: &str,
        selected: &[&str],
    ) -> Result<(), DecisionError> {
        let state = mem::take(&mut self.state);
        let (state, result) = decision::apply(state, &self.catalog, decision_id, selected);
        self.state = state;
        match &result {
            Ok(()) => {
                let title = self
                    .catalog
                    .decision(decision_id)
                    .map_or_else(|| decision_id.to_string(), |d| d.title.clone());
                self.sink.notify(Notification {
                    kind: NotificationKind::Success,
                    title: "Decision taken".to_string(),
                    message: title,
                });
            }
            Err(err @ DecisionError::LimitReached(_)) => {
                self.sink.notify(Notification {
                    kind: NotificationKind::Error,
                    title: "Decision limit reached".to_string(),
                    message: err.to_string(),
                });
            }
            Err(
                err @ (DecisionError::ConflictingOptions(_, _)
                | DecisionError::MissingDependency(_, _)),
            ) => {
                self.sink.notify(Notification {
                    kind: NotificationKind::Error,
                    title: "Invalid option combination".to_string(),
                    message: err.to_string(),
                });
            }
            Err(_) => {}
        }
        result
    }

    /// Advances the simulation by one day.
    pub fn advance_one_day(&mut self) -> DayOutcome {
        let state = mem::take(&mut self.state);
        let (state, outcome) = tick::advance_one_day(state, &self.catalog, &mut self.rng);
        self.state = state;
        for event in &outcome.fired {
            self.sink.notify(Notification {
                kind: NotificationKind::Warning,
                title: event.title.clone(),
                message: format!("Event on {}", event.date),
            });
        }
        outcome
    }

    /// Jumps to January 1 of the next year, skipping daily simulation.
    pub fn jump_to_next_year(&mut self) {
        let state = mem::take(&mut self.state);
        self.state = tick::jump_to_next_year(state);
    }

    /// Jumps to the end of the current legislature period.
    pub fn jump_to_legislature_end(&mut self) {
        let state = mem::take(&mut self.state);
        self.state = tick::jump_to_legislature_end(state);
    }

    pub fn date(&self) -> SimDate {
        self.state.date
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &MetricStore {
        &self.state.metrics
    }

    pub fn ledger(&self) -> &Ledger {
        &self.state.ledger
    }

    pub fn decision_log(&self) -> &[DecisionRecord] {
        &self.state.decision_log
    }

    pub fn event_log(&self) -> &[GameEvent] {
        &self.state.event_log
    }

    pub fn yearly_reports(&self) -> &BTreeMap<i32, YearlyReport> {
        &self.state.yearly_reports
    }

    /// Remaining budget for the current year in billion euro.
    pub fn remaining_budget(&self) -> Decimal {
        self.state.ledger.budget
    }

    /// Decisions still allowed this year.
    pub fn remaining_decisions(&self) -> u32 {
        self.state
            .max_decisions_per_year
            .saturating_sub(self.state.decisions_this_year)
    }

    /// Clones the current snapshot, e.g. for serialization.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }
}
