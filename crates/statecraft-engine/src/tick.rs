//! Time advancement: the daily tick and the bulk jump operations.
//!
//! Jumps bypass per-day ticking: skipped years get reports but no event
//! evaluation.

use crate::state::{GameState, PendingEffect};
use crate::{events, rating, report};
use rand_chacha::ChaCha8Rng;
use statecraft_core::{GameEvent, Provenance, SimDate, GAME_END};
use tracing::debug;

/// Result of one simulated day.
#[derive(Clone, Debug, Default)]
pub struct DayOutcome {
    pub date: SimDate,
    pub fired: Vec<GameEvent>,
    /// Year that just rolled over, if the tick crossed a year boundary.
    pub completed_year: Option<i32>,
}

/// Advances the snapshot by one simulated day: date, year rollover,
/// due delayed effects, event evaluation, rating recomputation.
pub(crate) fn advance_one_day(
    mut state: GameState,
    catalog: &statecraft_core::Catalog,
    rng: &mut ChaCha8Rng,
) -> (GameState, DayOutcome) {
    if state.game_over {
        let outcome = DayOutcome {
            date: state.date,
            ..DayOutcome::default()
        };
        return (state, outcome);
    }
    let prev = state.date;
    state.date = prev.add_days(1);
    let completed_year = if state.date.year != prev.year {
        rollover_year(&mut state, prev.year);
        Some(prev.year)
    } else {
        None
    };
    let today = state.date;
    let effects_applied = apply_due_effects(&mut state, today);
    let fired = events::evaluate(&mut state, catalog, rng);
    if effects_applied || !fired.is_empty() {
        rating::recalculate(&mut state);
    }
    if state.date >= GAME_END {
        state.game_over = true;
        debug!(date = %state.date, "era end reached");
    }
    let outcome = DayOutcome {
        date: state.date,
        fired,
        completed_year,
    };
    (state, outcome)
}

/// Sets the date to January 1 of the following year, marking the
/// current year's report as skipped. No event evaluation.
pub(crate) fn jump_to_next_year(mut state: GameState) -> GameState {
    if state.game_over {
        return state;
    }
    let year = state.date.year;
    if !state.yearly_reports.contains_key(&year) {
        let skipped = report::generate(&state, year, true);
        state.yearly_reports.insert(year, skipped);
    }
    if year >= GAME_END.year {
        state.date = GAME_END;
        state.game_over = true;
    } else {
        state.date = SimDate::new(year + 1, 1, 1);
    }
    finish_jump(&mut state);
    state
}

/// Sets the date to the end of the current legislature period,
/// synthesizing skipped reports for every spanned year lacking one.
pub(crate) fn jump_to_legislature_end(mut state: GameState) -> GameState {
    if state.game_over {
        return state;
    }
    let target = state.date.legislature().end;
    let missing: Vec<i32> = (state.date.year..=target.year)
        .filter(|year| !state.yearly_reports.contains_key(year))
        .collect();
    for year in missing {
        let skipped = report::generate(&state, year, true);
        state.yearly_reports.insert(year, skipped);
    }
    state.date = target;
    if target >= GAME_END {
        state.game_over = true;
    }
    finish_jump(&mut state);
    state
}

fn finish_jump(state: &mut GameState) {
    state.decisions_this_year = 0;
    state.ledger.rollover_year();
    if apply_due_effects(state, state.date) {
        rating::recalculate(state);
    }
}

fn rollover_year(state: &mut GameState, ended_year: i32) {
    // A skipped report from an earlier jump stays; reports are
    // immutable once created.
    if !state.yearly_reports.contains_key(&ended_year) {
        let report = report::generate(state, ended_year, false);
        state.yearly_reports.insert(ended_year, report);
    }
    state.decisions_this_year = 0;
    state.ledger.rollover_year();
    debug!(year = ended_year, "year rollover");
}

/// Applies every pending delayed effect due on or before `upto`, in due
/// order so metric history stays date-monotonic.
fn apply_due_effects(state: &mut GameState, upto: SimDate) -> bool {
    let mut due: Vec<PendingEffect> = Vec::new();
    state.pending_effects.retain(|pending| {
        if pending.due <= upto {
            due.push(pending.clone());
            false
        } else {
            true
        }
    });
    if due.is_empty() {
        return false;
    }
    due.sort_by_key(|pending| pending.due);
    for pending in &due {
        state.metrics.apply_delta(
            &pending.metric,
            pending.value,
            pending.due,
            Provenance::Decision,
            Some(pending.decision.as_str()),
            &pending.explanation,
        );
    }
    true
}
