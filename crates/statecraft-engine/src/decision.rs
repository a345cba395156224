//! Decision resolution: validation, all-or-nothing effect application,
//! and budget/debt settlement.

use crate::rating;
use crate::state::{GameState, PendingEffect};
use rust_decimal::Decimal;
use statecraft_core::{Catalog, DecisionRecord, Provenance, SelectionMode, GAME_END};
use thiserror::Error;
use tracing::debug;

/// User-triggerable and defensive failures of `make_decision`.
///
/// `LimitReached`, `ConflictingOptions`, and `MissingDependency` are
/// recoverable and surfaced as notifications; the remaining variants
/// are defensive rejections handled silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    #[error("the annual limit of {0} decisions is exhausted")]
    LimitReached(u32),
    #[error("unknown decision {0}")]
    UnknownDecision(String),
    #[error("option {option} does not belong to decision {decision}")]
    UnknownOption { decision: String, option: String },
    #[error("no options selected")]
    EmptySelection,
    #[error("decision {0} is not currently available")]
    NotAvailable(String),
    #[error("decision {0} accepts exactly one option")]
    SingleSelection(String),
    #[error("options {0} and {1} conflict")]
    ConflictingOptions(String, String),
    #[error("option {0} requires option {1}")]
    MissingDependency(String, String),
}

/// Applies a decision to the snapshot. All checks run before any
/// mutation: on error the returned state is the input, untouched.
pub(crate) fn apply(
    mut state: GameState,
    catalog: &Catalog,
    decision_id: &str,
    selected: &[&str],
) -> (GameState, Result<(), DecisionError>) {
    if state.decisions_this_year >= state.max_decisions_per_year {
        let err = DecisionError::LimitReached(state.max_decisions_per_year);
        return (state, Err(err));
    }
    let Some(decision) = catalog.decision(decision_id) else {
        return (
            state,
            Err(DecisionError::UnknownDecision(decision_id.to_string())),
        );
    };
    if !decision.is_available(state.date, &state.metrics) {
        let err = DecisionError::NotAvailable(decision_id.to_string());
        return (state, Err(err));
    }
    if selected.is_empty() {
        return (state, Err(DecisionError::EmptySelection));
    }
    if decision.selection == SelectionMode::Single && selected.len() > 1 {
        let err = DecisionError::SingleSelection(decision_id.to_string());
        return (state, Err(err));
    }
    let mut options = Vec::with_capacity(selected.len());
    for id in selected {
        match decision.option(id) {
            Some(option) => options.push(option),
            None => {
                let err = DecisionError::UnknownOption {
                    decision: decision_id.to_string(),
                    option: (*id).to_string(),
                };
                return (state, Err(err));
            }
        }
    }
    // Conflict and dependency checks precede any mutation: all-or-nothing.
    for option in &options {
        for conflict in &option.conflicts {
            if selected.contains(&conflict.as_str()) {
                let err = DecisionError::ConflictingOptions(
                    option.id.as_str().to_string(),
                    conflict.as_str().to_string(),
                );
                return (state, Err(err));
            }
        }
        for dependency in &option.dependencies {
            if !selected.contains(&dependency.as_str()) {
                let err = DecisionError::MissingDependency(
                    option.id.as_str().to_string(),
                    dependency.as_str().to_string(),
                );
                return (state, Err(err));
            }
        }
    }

    let date = state.date;
    let total_costs: Decimal = options.iter().map(|o| o.costs).sum();
    for option in &options {
        for (metric, effect) in &option.effects {
            state.metrics.apply_delta(
                metric,
                effect.immediate,
                date,
                Provenance::Decision,
                Some(decision_id),
                &effect.explanation,
            );
            for delayed in &effect.delayed {
                // Effects due past the era land on its last day.
                state.pending_effects.push(PendingEffect {
                    due: date.add_months(delayed.delay_months as i32).min(GAME_END),
                    metric: metric.clone(),
                    value: delayed.value,
                    decision: decision.id.clone(),
                    explanation: effect.explanation.clone(),
                });
            }
        }
    }
    if total_costs > Decimal::ZERO {
        state.ledger.settle(total_costs);
        state.ledger.recompute_interest();
    }
    state.decision_log.push(DecisionRecord {
        decision: decision.id.clone(),
        selected: options.iter().map(|o| o.id.clone()).collect(),
        date,
        total_costs,
    });
    state.decisions_this_year += 1;
    rating::recalculate(&mut state);
    debug!(
        decision = decision_id,
        options = selected.len(),
        costs = %total_costs,
        "decision applied"
    );
    (state, Ok(()))
}
