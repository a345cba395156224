//! End-to-end scenarios exercising decisions, ticks, jumps, and reports
//! through the public engine API.

use rust_decimal::Decimal;
use statecraft_core::{
    Catalog, ConditionOp, Decision, DecisionCategory, DecisionId, DecisionOption, EventCondition,
    EventTrigger, Importance, MetricEffect, MetricId, OptionId, SelectionMode, SimDate, TriggerId,
};
use statecraft_engine::{data, DecisionError, Engine, NotificationKind, SimConfig};
use statecraft_engine::{BufferSink, GameState};
use std::collections::{BTreeMap, BTreeSet};

fn free_option(id: &str, metric: &str, delta: f64) -> DecisionOption {
    let mut effects = BTreeMap::new();
    effects.insert(
        MetricId::new(metric),
        MetricEffect::immediate(delta, "test effect"),
    );
    DecisionOption {
        id: OptionId::new(id),
        title: id.to_string(),
        description: String::new(),
        costs: Decimal::ZERO,
        effects,
        conflicts: BTreeSet::new(),
        dependencies: BTreeSet::new(),
    }
}

fn single_decision(id: &str, options: Vec<DecisionOption>) -> Decision {
    Decision {
        id: DecisionId::new(id),
        title: id.to_string(),
        question: String::new(),
        category: DecisionCategory::Economy,
        description: String::new(),
        options,
        selection: SelectionMode::Single,
        available_from: None,
        available_until: None,
        required_state: BTreeMap::new(),
    }
}

fn trigger(id: &str, condition: EventCondition, one_time: bool) -> EventTrigger {
    let mut effects = BTreeMap::new();
    effects.insert(MetricId::new("security"), -1.0);
    EventTrigger {
        id: TriggerId::new(id),
        name: id.to_string(),
        description: String::new(),
        conditions: vec![condition],
        effects,
        cost: Decimal::ZERO,
        one_time,
        probability: 1.0,
        stakeholder: None,
        importance: Importance::High,
    }
}

fn engine_with(catalog: Catalog, config: SimConfig) -> Engine {
    Engine::new(
        catalog,
        data::default_metrics(),
        data::default_coalition(),
        config,
    )
    .unwrap()
}

#[test]
fn decision_limit_enforced() {
    let catalog = Catalog {
        decisions: vec![single_decision(
            "tweak",
            vec![free_option("up", "popularity", 0.5)],
        )],
        triggers: Vec::new(),
    };
    let mut engine = engine_with(catalog, SimConfig::default());
    for _ in 0..8 {
        engine.make_decision("tweak", &["up"]).unwrap();
    }
    assert_eq!(engine.remaining_decisions(), 0);
    let err = engine.make_decision("tweak", &["up"]).unwrap_err();
    assert_eq!(err, DecisionError::LimitReached(8));
    assert_eq!(engine.decision_log().len(), 8);
}

#[test]
fn conflicting_selection_leaves_state_untouched() {
    let mut engine = engine_with(data::default_catalog(), SimConfig::default());
    let before: GameState = engine.snapshot();
    let err = engine
        .make_decision(
            "climate_investment_program",
            &["coal_phaseout_accelerated", "gas_bridge"],
        )
        .unwrap_err();
    assert!(matches!(err, DecisionError::ConflictingOptions(_, _)));
    assert_eq!(engine.ledger().budget, before.ledger.budget);
    assert_eq!(engine.ledger().debt, before.ledger.debt);
    assert_eq!(
        engine.metrics().value("co2_reduction_path"),
        before.metrics.value("co2_reduction_path")
    );
    assert!(engine.decision_log().is_empty());
}

#[test]
fn dependency_enforced() {
    let mut engine = engine_with(data::default_catalog(), SimConfig::default());
    let err = engine
        .make_decision("defense_modernization", &["cyber_command"])
        .unwrap_err();
    assert!(matches!(err, DecisionError::MissingDependency(_, _)));
    engine
        .make_decision("defense_modernization", &["procurement_program", "cyber_command"])
        .unwrap();
}

#[test]
fn costs_overflow_into_debt_and_raise_interest() {
    let mut expensive = free_option("big", "security", 1.0);
    expensive.costs = Decimal::new(30, 0);
    let catalog = Catalog {
        decisions: vec![single_decision("spend", vec![expensive])],
        triggers: Vec::new(),
    };
    let mut engine = engine_with(catalog, SimConfig::default());
    engine.make_decision("spend", &["big"]).unwrap();
    assert_eq!(engine.ledger().budget, Decimal::ZERO);
    assert_eq!(engine.ledger().debt, Decimal::new(-5, 0));
    // 3.0 + 5/100 * 0.3
    assert_eq!(engine.ledger().interest_rate, Decimal::new(3015, 3));
}

#[test]
fn one_time_trigger_fires_once() {
    let catalog = Catalog {
        decisions: Vec::new(),
        triggers: vec![trigger(
            "always",
            EventCondition::new("popularity", ConditionOp::Gt, 0.0),
            true,
        )],
    };
    let mut engine = engine_with(catalog, SimConfig::default());
    for _ in 0..5 {
        engine.advance_one_day();
    }
    assert_eq!(engine.event_log().len(), 1);
    assert_eq!(engine.event_log()[0].id, "event_1_always");
}

#[test]
fn repeatable_trigger_fires_while_condition_holds() {
    let catalog = Catalog {
        decisions: Vec::new(),
        triggers: vec![trigger(
            "grind",
            EventCondition::new("popularity", ConditionOp::Gt, 0.0),
            false,
        )],
    };
    let mut engine = engine_with(catalog, SimConfig::default());
    for _ in 0..3 {
        engine.advance_one_day();
    }
    assert_eq!(engine.event_log().len(), 3);
}

#[test]
fn duration_hysteresis_counts_consecutive_days_and_resets() {
    let catalog = Catalog {
        decisions: vec![single_decision(
            "swing",
            vec![
                free_option("boost", "popularity", 20.0),
                free_option("drop", "popularity", -20.0),
            ],
        )],
        triggers: vec![trigger(
            "hype",
            EventCondition::new("popularity", ConditionOp::Gt, 60.0).held_for(3),
            true,
        )],
    };
    let mut engine = engine_with(catalog, SimConfig::default());
    // popularity 50 -> 70: condition starts holding.
    engine.make_decision("swing", &["boost"]).unwrap();
    engine.advance_one_day();
    engine.advance_one_day();
    assert!(engine.event_log().is_empty());
    // Condition breaks on day 3; the counter must restart from zero.
    engine.make_decision("swing", &["drop"]).unwrap();
    engine.advance_one_day();
    engine.make_decision("swing", &["boost"]).unwrap();
    engine.advance_one_day();
    engine.advance_one_day();
    assert!(engine.event_log().is_empty());
    let outcome = engine.advance_one_day();
    assert_eq!(outcome.fired.len(), 1);
    assert_eq!(engine.event_log().len(), 1);
}

#[test]
fn year_rollover_resets_budget_and_decision_count() {
    let catalog = Catalog {
        decisions: vec![single_decision(
            "tweak",
            vec![free_option("up", "popularity", 0.5)],
        )],
        triggers: Vec::new(),
    };
    let config = SimConfig {
        start_date: SimDate::new(2025, 12, 30),
        ..SimConfig::default()
    };
    let mut engine = engine_with(catalog, config);
    engine.make_decision("tweak", &["up"]).unwrap();
    let first = engine.advance_one_day();
    assert_eq!(first.completed_year, None);
    let second = engine.advance_one_day();
    assert_eq!(second.completed_year, Some(2025));
    assert_eq!(engine.date(), SimDate::new(2026, 1, 1));
    assert_eq!(engine.remaining_decisions(), 8);
    assert_eq!(engine.remaining_budget(), Decimal::new(25, 0));
    let report = &engine.yearly_reports()[&2025];
    assert_eq!(report.decisions_count, 1);
    assert!(!report.skipped);
}

#[test]
fn jump_to_next_year_marks_report_skipped() {
    let mut engine = engine_with(data::default_catalog(), SimConfig::default());
    engine.jump_to_next_year();
    assert_eq!(engine.date(), SimDate::new(2026, 1, 1));
    let report = &engine.yearly_reports()[&2025];
    assert!(report.skipped);
    assert_eq!(report.decisions_count, 0);
}

#[test]
fn jump_to_legislature_end_covers_spanned_years() {
    let mut engine = engine_with(data::default_catalog(), SimConfig::default());
    engine.jump_to_legislature_end();
    assert_eq!(engine.date(), SimDate::new(2029, 12, 31));
    for year in 2025..=2029 {
        assert!(engine.yearly_reports()[&year].skipped, "year {year}");
    }
    assert!(!engine.game_over());
}

#[test]
fn era_end_sets_game_over_and_freezes_state() {
    let mut engine = engine_with(data::default_catalog(), SimConfig::default());
    engine.jump_to_legislature_end();
    engine.jump_to_legislature_end();
    engine.jump_to_legislature_end();
    assert_eq!(engine.date(), statecraft_core::GAME_END);
    assert!(engine.game_over());
    let before = engine.date();
    let outcome = engine.advance_one_day();
    assert_eq!(outcome.date, before);
    assert_eq!(engine.date(), before);
}

#[test]
fn delayed_effect_lands_on_its_due_date() {
    let mut option = free_option("later", "digitalization_index", 2.0);
    option.effects.insert(
        MetricId::new("digitalization_index"),
        MetricEffect::immediate(2.0, "rollout").with_delayed(1, 5.0),
    );
    let catalog = Catalog {
        decisions: vec![single_decision("program", vec![option])],
        triggers: Vec::new(),
    };
    let mut engine = engine_with(catalog, SimConfig::default());
    engine.make_decision("program", &["later"]).unwrap();
    // 45 + 2 immediately.
    assert_eq!(engine.metrics().value("digitalization_index"), Some(47.0));
    for _ in 0..31 {
        engine.advance_one_day();
    }
    // Delayed +5 due on 2025-02-01.
    assert_eq!(engine.metrics().value("digitalization_index"), Some(52.0));
    assert!(engine.state().pending_effects.is_empty());
}

#[test]
fn identical_seeds_replay_identically() {
    let run = |seed: u64| {
        let config = SimConfig {
            rng_seed: seed,
            ..SimConfig::default()
        };
        let mut engine = engine_with(data::default_catalog(), config);
        engine
            .make_decision("climate_investment_program", &["solar_expansion"])
            .unwrap();
        for _ in 0..120 {
            engine.advance_one_day();
        }
        (
            engine
                .event_log()
                .iter()
                .map(|e| e.id.clone())
                .collect::<Vec<_>>(),
            engine.metrics().value("overall_rating"),
        )
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn notifications_surface_decision_outcomes() {
    let sink = BufferSink::new();
    let buffer = sink.buffer();
    let catalog = Catalog {
        decisions: vec![single_decision(
            "tweak",
            vec![free_option("up", "popularity", 0.5)],
        )],
        triggers: Vec::new(),
    };
    let config = SimConfig {
        max_decisions_per_year: 1,
        ..SimConfig::default()
    };
    let mut engine = engine_with(catalog, config).with_sink(sink);
    engine.make_decision("tweak", &["up"]).unwrap();
    engine.make_decision("tweak", &["up"]).unwrap_err();
    let notes = buffer.lock().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert_eq!(notes[1].kind, NotificationKind::Error);
    assert_eq!(notes[1].title, "Decision limit reached");
}

#[test]
fn snapshot_survives_serde() {
    let mut engine = engine_with(data::default_catalog(), SimConfig::default());
    engine
        .make_decision("climate_investment_program", &["solar_expansion"])
        .unwrap();
    for _ in 0..10 {
        engine.advance_one_day();
    }
    let json = serde_json::to_string(&engine.snapshot()).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back.date, engine.date());
    assert_eq!(back.decision_log.len(), 1);
    assert_eq!(
        back.metrics.value("overall_rating"),
        engine.metrics().value("overall_rating")
    );
}

#[test]
fn rating_moves_with_weighted_metrics() {
    let catalog = Catalog {
        decisions: vec![single_decision(
            "rally",
            vec![free_option("boost", "popularity", 20.0)],
        )],
        triggers: Vec::new(),
    };
    let mut engine = engine_with(catalog, SimConfig::default());
    let before = engine.metrics().value("overall_rating").unwrap();
    engine.make_decision("rally", &["boost"]).unwrap();
    let after = engine.metrics().value("overall_rating").unwrap();
    assert!(after > before);
    assert!((5.0..=98.0).contains(&after));
}
