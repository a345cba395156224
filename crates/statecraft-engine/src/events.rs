//! Daily trigger evaluation with duration hysteresis and probabilistic
//! firing.

use crate::state::GameState;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use statecraft_core::{Catalog, GameEvent, Provenance};
use tracing::info;

/// Evaluates every trigger against the current metrics for one simulated
/// day and fires those whose conditions are satisfied and whose
/// probability draw succeeds. Returns the events fired today.
pub(crate) fn evaluate(
    state: &mut GameState,
    catalog: &Catalog,
    rng: &mut ChaCha8Rng,
) -> Vec<GameEvent> {
    let date = state.date;
    let mut fired = Vec::new();
    for trigger in &catalog.triggers {
        let hysteresis = state
            .trigger_state
            .entry(trigger.id.clone())
            .or_insert_with(|| crate::state::TriggerState {
                triggered: false,
                duration_met: vec![0; trigger.conditions.len()],
            });
        if trigger.one_time && hysteresis.triggered {
            continue;
        }
        let mut ready = true;
        for (i, condition) in trigger.conditions.iter().enumerate() {
            let met = state
                .metrics
                .value(condition.metric.as_str())
                .map(|value| condition.op.holds(value, condition.threshold))
                .unwrap_or(false);
            if met {
                hysteresis.duration_met[i] += 1;
                if let Some(duration) = condition.duration {
                    if hysteresis.duration_met[i] < duration {
                        // Condition holding, but not long enough yet.
                        ready = false;
                    }
                }
            } else {
                hysteresis.duration_met[i] = 0;
                ready = false;
            }
        }
        if !ready || rng.gen::<f64>() >= trigger.probability {
            continue;
        }
        hysteresis.triggered = true;
        state.event_seq += 1;
        let event = GameEvent {
            id: format!("event_{}_{}", state.event_seq, trigger.id.as_str()),
            trigger: trigger.id.clone(),
            title: trigger.name.clone(),
            date,
            effects: trigger.effects.clone(),
            cost: trigger.cost,
            stakeholder: trigger.stakeholder,
            importance: trigger.importance,
        };
        let explanation = format!("Event: {}", trigger.name);
        for (metric, delta) in &trigger.effects {
            state.metrics.apply_delta(
                metric,
                *delta,
                date,
                Provenance::Event,
                Some(&event.id),
                &explanation,
            );
        }
        state.ledger.settle(trigger.cost);
        info!(
            trigger = trigger.id.as_str(),
            date = %date,
            importance = ?trigger.importance,
            "event fired"
        );
        state.event_log.push(event.clone());
        fired.push(event);
    }
    fired
}
