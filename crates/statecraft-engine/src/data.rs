//! Default content: the evaluation metrics, the governing coalition,
//! and the decision/trigger catalog of the baseline scenario.

use rust_decimal::Decimal;
use statecraft_core::{
    Catalog, Coalition, ConditionOp, Decision, DecisionCategory, DecisionId, DecisionOption,
    EventCondition, EventTrigger, Importance, Metric, MetricCategory, MetricEffect, MetricId,
    MetricStore, OptionId, SelectionMode, SimDate, Stakeholder, StateRange, TriggerId, GAME_START,
};
use std::collections::{BTreeMap, BTreeSet};

use ConditionOp::{Gt, Lt};
use MetricCategory::{Economy, Environment, Overall, Politics, Security, Society};

/// All 31 evaluation metrics with their baseline values and bounds,
/// each seeded with one natural history point at era start.
pub fn default_metrics() -> MetricStore {
    let mut store = MetricStore::new();
    let mut add = |id: &str,
                   name: &str,
                   unit: &str,
                   value: f64,
                   min: f64,
                   max: f64,
                   category: MetricCategory,
                   explanation: &str| {
        store.insert(Metric::new(
            id, name, unit, value, min, max, category, GAME_START, explanation,
        ));
    };

    // Politics
    add("popularity", "Public approval", "%", 50.0, 20.0, 80.0, Politics,
        "Baseline at the start of the legislature");
    add("coalition_social", "Social-democratic partner satisfaction", "%", 50.0, 0.0, 90.0,
        Politics, "Coalition start with neutral satisfaction");
    add("coalition_liberal", "Liberal partner satisfaction", "%", 50.0, 0.0, 90.0, Politics,
        "Coalition start with neutral satisfaction");
    add("corruption_perception_index", "Corruption perception index", "%", 75.0, 30.0, 95.0,
        Politics, "Strong reputation for clean government");

    // Economy
    add("unemployment", "Unemployment rate", "%", 5.0, 1.0, 7.0, Economy,
        "Average unemployment in 2025");
    add("economic_growth", "Economic growth", "%", 0.0, -5.0, 5.0, Economy,
        "Stagnation at the start of 2025");
    add("investment_attractiveness", "Investment attractiveness", "%", 50.0, 10.0, 95.0,
        Economy, "Mid-field in international comparison");
    add("median_income", "Median gross income", "EUR", 52_000.0, 40_000.0, 80_000.0, Economy,
        "Baseline median income 2025");
    add("tax_revenue", "Tax revenue", "bn EUR", 420.0, 300.0, 600.0, Economy,
        "Revenue reflecting the 2025 economy");
    add("debt", "Debt", "bn EUR", 0.0, -500.0, 0.0, Economy, "Debt-neutral starting position");
    add("interest_costs", "Interest costs", "bn EUR", 0.0, 0.0, 50.0, Economy,
        "No interest payments at zero debt");
    add("inflation_rate", "Inflation rate", "%", 2.5, -2.0, 8.0, Economy,
        "Moderate inflation at the start of the year");
    add("financial_sustainability", "Financial sustainability", "%", 50.0, 0.0, 100.0, Economy,
        "Balanced fiscal situation");

    // Security
    add("foreign_dependency", "Critical non-EU foreign dependency", "%", 70.0, 20.0, 90.0,
        Security, "High dependency on non-EU suppliers");
    add("security", "Security", "%", 50.0, 20.0, 90.0, Security, "Average security posture");
    add("energy_security", "Energy security", "%", 50.0, 10.0, 95.0, Security,
        "Medium energy security after import diversification");

    // Society
    add("age_ratio", "Old-age dependency ratio", "%", 35.0, 25.0, 55.0, Society,
        "Demographic change pushes the ratio upward");
    add("emigration", "Emigration", "persons/year", 150_000.0, 80_000.0, 300_000.0, Society,
        "Average emigration rate");
    add("immigration_eu", "Immigration from the EU", "persons/year", 200_000.0, 100_000.0,
        400_000.0, Society, "Intra-EU mobility and skilled inflow");
    add("immigration_non_eu", "Immigration from outside the EU", "persons/year", 400_000.0,
        200_000.0, 800_000.0, Society, "High inflow driven by global crises");
    add("gini_coefficient", "Gini coefficient", "", 0.31, 0.25, 0.45, Society,
        "Medium income inequality");
    add("broadband_coverage", "Broadband coverage", "%", 75.0, 40.0, 100.0, Society,
        "Advanced but not universal coverage");
    add("digitalization_index", "Digitalization index", "%", 45.0, 20.0, 95.0, Society,
        "Administration lagging behind on digitalization");
    add("bureaucracy_index", "Bureaucracy index", "%", 65.0, 20.0, 90.0, Society,
        "Heavy administrative burden");

    // Environment
    add("co2_reduction", "CO2 reduction", "Mt", 0.0, 0.0, 500.0, Environment,
        "Reduction effort starts in 2025");
    add("co2_reduction_path", "CO2 reduction path", "%", 50.0, 0.0, 100.0, Environment,
        "Starting position on the climate target path");
    add("electrification_level", "Electrification level", "%", 35.0, 20.0, 90.0, Environment,
        "Electrification of all sectors beginning");
    add("renewable_electricity", "Renewable share of electricity", "%", 45.0, 20.0, 100.0,
        Environment, "Advanced build-out of renewable generation");
    add("renewable_energy_total", "Renewable share of total energy", "%", 20.0, 10.0, 90.0,
        Environment, "Lower share including heat and transport");

    // Overall
    add("future_viability_index", "Future viability index", "%", 50.0, 20.0, 90.0, Overall,
        "Average future readiness");
    add("overall_rating", "Overall rating", "%", 50.0, 5.0, 98.0, Overall,
        "Average starting position at the start of government");

    store
}

/// The static three-party coalition the rating computation reads.
pub fn default_coalition() -> Coalition {
    Coalition {
        parties: vec![
            "progressives".to_string(),
            "social_democrats".to_string(),
            "liberals".to_string(),
        ],
        total_seats: 50,
        stability: 75.0,
        agreement_level: 65.0,
        formed: GAME_START,
    }
}

/// The baseline decision and trigger catalog.
pub fn default_catalog() -> Catalog {
    Catalog {
        decisions: default_decisions(),
        triggers: default_triggers(),
    }
}

fn effects(entries: &[(&str, f64)]) -> BTreeMap<MetricId, f64> {
    entries
        .iter()
        .map(|(id, delta)| (MetricId::new(*id), *delta))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn trigger(
    id: &str,
    name: &str,
    description: &str,
    conditions: Vec<EventCondition>,
    effect_entries: &[(&str, f64)],
    cost: i64,
    one_time: bool,
    probability: f64,
    stakeholder: Option<Stakeholder>,
    importance: Importance,
) -> EventTrigger {
    EventTrigger {
        id: TriggerId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        conditions,
        effects: effects(effect_entries),
        cost: Decimal::new(cost, 0),
        one_time,
        probability,
        stakeholder,
        importance,
    }
}

fn default_triggers() -> Vec<EventTrigger> {
    vec![
        trigger(
            "green_tech_boom",
            "Green tech boom",
            "Domestic industry profits massively from the energy transition",
            vec![
                EventCondition::new("co2_reduction_path", Gt, 60.0).held_for(30),
                EventCondition::new("economic_growth", Gt, 1.5).held_for(15),
            ],
            &[
                ("investment_attractiveness", 20.0),
                ("economic_growth", 1.2),
                ("tax_revenue", 35.0),
                ("future_viability_index", 15.0),
                ("popularity", 8.0),
            ],
            0,
            true,
            0.8,
            Some(Stakeholder::Economy),
            Importance::High,
        ),
        trigger(
            "rating_downgrade",
            "Rating agency warning",
            "International rating agencies warn about rising debt",
            vec![EventCondition::new("debt", Lt, -100.0).held_for(30)],
            &[
                ("interest_costs", 8.0),
                ("investment_attractiveness", -15.0),
                ("financial_sustainability", -20.0),
                ("popularity", -5.0),
                ("coalition_liberal", -10.0),
            ],
            5,
            false,
            0.9,
            None,
            Importance::Medium,
        ),
        trigger(
            "debt_crisis",
            "Debt crisis looming",
            "Debt reaches a critical level",
            vec![EventCondition::new("debt", Lt, -200.0).held_for(60)],
            &[
                ("interest_costs", 15.0),
                ("investment_attractiveness", -30.0),
                ("financial_sustainability", -35.0),
                ("popularity", -15.0),
                ("coalition_liberal", -25.0),
                ("coalition_social", -20.0),
            ],
            20,
            true,
            1.0,
            None,
            Importance::Critical,
        ),
        trigger(
            "eu_climate_leader_bonus",
            "EU climate leadership bonus",
            "The EU rewards climate leadership with additional funds",
            vec![EventCondition::new("co2_reduction_path", Gt, 70.0).held_for(90)],
            &[
                ("tax_revenue", 25.0),
                ("energy_security", 10.0),
                ("popularity", 12.0),
                ("future_viability_index", 10.0),
            ],
            0,
            true,
            0.7,
            Some(Stakeholder::Eu),
            Importance::High,
        ),
        trigger(
            "eu_deficit_procedure",
            "EU deficit procedure",
            "The EU opens a deficit procedure over high debt",
            vec![
                EventCondition::new("debt", Lt, -150.0).held_for(180),
                EventCondition::new("financial_sustainability", Lt, 25.0).held_for(90),
            ],
            &[
                ("investment_attractiveness", -20.0),
                ("popularity", -10.0),
                ("coalition_liberal", -15.0),
                ("coalition_social", -10.0),
            ],
            10,
            true,
            0.9,
            Some(Stakeholder::Eu),
            Importance::High,
        ),
        trigger(
            "climate_disaster",
            "Climate disaster",
            "Severe flooding or drought hits the country",
            vec![EventCondition::new("co2_reduction_path", Lt, 40.0).held_for(365)],
            &[
                ("economic_growth", -1.5),
                ("popularity", -10.0),
                ("coalition_social", 8.0),
            ],
            25,
            false,
            0.3,
            Some(Stakeholder::Environment),
            Importance::Critical,
        ),
        trigger(
            "energy_independence",
            "Energy independence achieved",
            "Renewables cover nearly the whole electricity demand",
            vec![
                EventCondition::new("renewable_electricity", Gt, 85.0).held_for(90),
                EventCondition::new("energy_security", Gt, 80.0).held_for(60),
            ],
            &[
                ("energy_security", 15.0),
                ("foreign_dependency", -20.0),
                ("popularity", 15.0),
                ("investment_attractiveness", 18.0),
                ("future_viability_index", 20.0),
            ],
            0,
            true,
            0.8,
            None,
            Importance::High,
        ),
        trigger(
            "ai_breakthrough",
            "AI breakthrough",
            "Domestic research achieves a breakthrough in AI",
            vec![
                EventCondition::new("digitalization_index", Gt, 80.0).held_for(120),
                EventCondition::new("investment_attractiveness", Gt, 70.0).held_for(90),
            ],
            &[
                ("digitalization_index", 20.0),
                ("investment_attractiveness", 25.0),
                ("future_viability_index", 25.0),
                ("economic_growth", 1.5),
                ("tax_revenue", 30.0),
            ],
            0,
            true,
            0.3,
            None,
            Importance::High,
        ),
        trigger(
            "cyber_attack",
            "Cyber attack on infrastructure",
            "A severe cyber attack paralyzes critical infrastructure",
            vec![
                EventCondition::new("digitalization_index", Gt, 60.0).held_for(90),
                EventCondition::new("security", Lt, 50.0).held_for(120),
            ],
            &[
                ("security", -15.0),
                ("digitalization_index", -10.0),
                ("economic_growth", -0.8),
                ("popularity", -12.0),
            ],
            15,
            false,
            0.4,
            None,
            Importance::Critical,
        ),
        trigger(
            "coalition_crisis",
            "Coalition crisis looming",
            "Massive disagreements between the coalition partners",
            vec![
                EventCondition::new("coalition_liberal", Lt, 25.0).held_for(60),
                EventCondition::new("coalition_social", Lt, 25.0).held_for(60),
            ],
            &[
                ("popularity", -15.0),
                ("coalition_liberal", -10.0),
                ("coalition_social", -10.0),
                ("investment_attractiveness", -12.0),
            ],
            0,
            false,
            0.8,
            None,
            Importance::High,
        ),
        trigger(
            "media_campaign",
            "Media campaign against the government",
            "Intense media criticism of the government's record",
            vec![EventCondition::new("popularity", Lt, 30.0).held_for(90)],
            &[
                ("popularity", -8.0),
                ("coalition_liberal", -5.0),
                ("coalition_social", -5.0),
            ],
            0,
            false,
            0.6,
            Some(Stakeholder::Media),
            Importance::Medium,
        ),
        trigger(
            "international_recognition",
            "International recognition",
            "The government is praised internationally for exemplary policy",
            vec![EventCondition::new("overall_rating", Gt, 75.0).held_for(120)],
            &[
                ("popularity", 12.0),
                ("investment_attractiveness", 15.0),
                ("foreign_dependency", -8.0),
                ("future_viability_index", 10.0),
            ],
            0,
            true,
            0.5,
            None,
            Importance::High,
        ),
        trigger(
            "global_recession",
            "Global recession",
            "A worldwide economic crisis reaches the country",
            vec![EventCondition::new("economic_growth", Lt, -1.0).held_for(90)],
            &[
                ("economic_growth", -2.0),
                ("unemployment", 1.5),
                ("tax_revenue", -40.0),
                ("investment_attractiveness", -20.0),
                ("popularity", -18.0),
            ],
            30,
            true,
            0.2,
            Some(Stakeholder::Economy),
            Importance::Critical,
        ),
    ]
}

fn option(
    id: &str,
    title: &str,
    description: &str,
    costs: i64,
    effect_entries: Vec<(&str, MetricEffect)>,
) -> DecisionOption {
    DecisionOption {
        id: OptionId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        costs: Decimal::new(costs, 0),
        effects: effect_entries
            .into_iter()
            .map(|(id, effect)| (MetricId::new(id), effect))
            .collect(),
        conflicts: BTreeSet::new(),
        dependencies: BTreeSet::new(),
    }
}

fn default_decisions() -> Vec<Decision> {
    let solar = option(
        "solar_expansion",
        "Accelerated solar expansion",
        "Subsidize photovoltaics on every suitable roof",
        8,
        vec![
            (
                "renewable_electricity",
                MetricEffect::immediate(6.0, "Subsidized solar build-out").with_delayed(12, 3.0),
            ),
            (
                "co2_reduction_path",
                MetricEffect::immediate(4.0, "Lower-carbon electricity mix"),
            ),
        ],
    );
    let mut coal_exit = option(
        "coal_phaseout_accelerated",
        "Accelerated coal phase-out",
        "Bring the coal exit forward by several years",
        5,
        vec![
            (
                "co2_reduction_path",
                MetricEffect::immediate(8.0, "Earlier coal exit"),
            ),
            (
                "energy_security",
                MetricEffect::immediate(-4.0, "Less dispatchable capacity"),
            ),
            (
                "coalition_liberal",
                MetricEffect::immediate(-5.0, "Liberal partner fears industry costs"),
            ),
        ],
    );
    let mut gas_bridge = option(
        "gas_bridge",
        "Gas as a bridge technology",
        "Keep gas plants as backup capacity",
        3,
        vec![
            (
                "energy_security",
                MetricEffect::immediate(6.0, "Reliable backup capacity"),
            ),
            (
                "co2_reduction_path",
                MetricEffect::immediate(-3.0, "Continued fossil generation"),
            ),
        ],
    );
    coal_exit.conflicts.insert(OptionId::new("gas_bridge"));
    gas_bridge
        .conflicts
        .insert(OptionId::new("coal_phaseout_accelerated"));

    let climate = Decision {
        id: DecisionId::new("climate_investment_program"),
        title: "Climate investment program".to_string(),
        question: "How should the energy transition be financed?".to_string(),
        category: DecisionCategory::Environment,
        description: "A package of measures shaping the electricity mix for a decade".to_string(),
        options: vec![solar, coal_exit, gas_bridge],
        selection: SelectionMode::Multiple,
        available_from: None,
        available_until: None,
        required_state: BTreeMap::new(),
    };

    let digital = Decision {
        id: DecisionId::new("digital_administration"),
        title: "Digital administration".to_string(),
        question: "How fast should public services digitalize?".to_string(),
        category: DecisionCategory::Digitalization,
        description: "Modernization of federal and municipal IT".to_string(),
        options: vec![
            option(
                "federal_cloud",
                "Sovereign federal cloud",
                "One shared platform for all agencies",
                6,
                vec![
                    (
                        "digitalization_index",
                        MetricEffect::immediate(8.0, "Shared platform replaces paper processes")
                            .with_delayed(6, 4.0),
                    ),
                    (
                        "bureaucracy_index",
                        MetricEffect::immediate(-6.0, "Fewer duplicate procedures"),
                    ),
                ],
            ),
            option(
                "incremental_upgrade",
                "Incremental upgrades",
                "Modernize agency by agency",
                2,
                vec![
                    (
                        "digitalization_index",
                        MetricEffect::immediate(3.0, "Gradual modernization"),
                    ),
                    (
                        "bureaucracy_index",
                        MetricEffect::immediate(-2.0, "Some procedures simplified"),
                    ),
                ],
            ),
        ],
        selection: SelectionMode::Single,
        available_from: None,
        available_until: None,
        required_state: BTreeMap::new(),
    };

    let mut housing_gate = BTreeMap::new();
    housing_gate.insert(MetricId::new("popularity"), StateRange::at_least(25.0));
    let housing = Decision {
        id: DecisionId::new("social_housing_package"),
        title: "Social housing package".to_string(),
        question: "How should affordable housing be expanded?".to_string(),
        category: DecisionCategory::Housing,
        description: "Response to rent pressure in metropolitan areas".to_string(),
        options: vec![
            option(
                "public_construction",
                "Public construction program",
                "Direct federal funding for social housing",
                10,
                vec![
                    (
                        "popularity",
                        MetricEffect::immediate(6.0, "Visible relief for renters"),
                    ),
                    (
                        "coalition_social",
                        MetricEffect::immediate(8.0, "Core social-democratic demand fulfilled"),
                    ),
                ],
            ),
            option(
                "tax_incentives",
                "Tax incentives for private construction",
                "Accelerated depreciation for new rental buildings",
                4,
                vec![
                    (
                        "investment_attractiveness",
                        MetricEffect::immediate(5.0, "Attractive conditions for developers"),
                    ),
                    (
                        "coalition_liberal",
                        MetricEffect::immediate(6.0, "Market-based approach"),
                    ),
                    (
                        "popularity",
                        MetricEffect::immediate(2.0, "Indirect relief"),
                    ),
                ],
            ),
        ],
        selection: SelectionMode::Single,
        available_from: Some(SimDate::new(2026, 1, 1)),
        available_until: None,
        required_state: housing_gate,
    };

    let mut cyber_command = option(
        "cyber_command",
        "Cyber defense command",
        "Dedicated command for digital threats",
        4,
        vec![
            (
                "security",
                MetricEffect::immediate(6.0, "Hardened critical infrastructure"),
            ),
            (
                "digitalization_index",
                MetricEffect::immediate(3.0, "Security expertise spills over"),
            ),
        ],
    );
    cyber_command
        .dependencies
        .insert(OptionId::new("procurement_program"));
    let defense = Decision {
        id: DecisionId::new("defense_modernization"),
        title: "Defense modernization".to_string(),
        question: "Which capabilities should be built up first?".to_string(),
        category: DecisionCategory::Defense,
        description: "Long-delayed modernization of the armed forces".to_string(),
        options: vec![
            option(
                "procurement_program",
                "Procurement program",
                "Replace aging equipment across all branches",
                12,
                vec![
                    (
                        "security",
                        MetricEffect::immediate(10.0, "Modernized equipment"),
                    ),
                    (
                        "foreign_dependency",
                        MetricEffect::immediate(-5.0, "More domestic procurement"),
                    ),
                ],
            ),
            cyber_command,
        ],
        selection: SelectionMode::Multiple,
        available_from: None,
        available_until: None,
        required_state: BTreeMap::new(),
    };

    vec![climate, digital, housing, defense]
}

#[cfg(test)]
mod tests {
    use super::*;
    use statecraft_core::validate_catalog;

    #[test]
    fn default_content_validates() {
        let metrics = default_metrics();
        assert_eq!(metrics.len(), 31);
        validate_catalog(&default_catalog(), &metrics).unwrap();
    }

    #[test]
    fn rating_weights_reference_existing_metrics() {
        let metrics = default_metrics();
        for (id, _) in crate::rating::RATING_WEIGHTS {
            assert!(metrics.get(id).is_some(), "missing weighted metric {id}");
        }
    }

    #[test]
    fn conflicting_options_are_symmetric() {
        let catalog = default_catalog();
        let climate = catalog.decision("climate_investment_program").unwrap();
        let coal = climate.option("coal_phaseout_accelerated").unwrap();
        let gas = climate.option("gas_bridge").unwrap();
        assert!(coal.conflicts.contains(&OptionId::new("gas_bridge")));
        assert!(gas
            .conflicts
            .contains(&OptionId::new("coal_phaseout_accelerated")));
    }
}
