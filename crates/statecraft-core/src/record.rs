//! Immutable records produced by the engine: fired events, taken
//! decisions, yearly report cards, and the static coalition data the
//! rating computation reads.

use crate::calendar::SimDate;
use crate::catalog::{DecisionId, Importance, OptionId, Stakeholder, TriggerId};
use crate::metric::MetricId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An event firing, appended to the event log and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Deterministic id: `event_{seq}_{trigger}`.
    pub id: String,
    pub trigger: TriggerId,
    pub title: String,
    pub date: SimDate,
    pub effects: BTreeMap<MetricId, f64>,
    pub cost: Decimal,
    pub stakeholder: Option<Stakeholder>,
    pub importance: Importance,
}

/// A taken decision, appended to the decision log and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision: DecisionId,
    pub selected: Vec<OptionId>,
    pub date: SimDate,
    pub total_costs: Decimal,
}

/// Start and end value of a metric within one simulated year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub start: f64,
    pub end: f64,
    pub change: f64,
}

/// Report card grade, a step function of the overall rating change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    DPlus,
    CPlus,
    C,
    B,
    BPlus,
    A,
    APlus,
}

impl Grade {
    /// Grades a year from its overall-rating change. Boundaries are
    /// exclusive lower bounds: a change of exactly +15 grades `A`.
    pub fn from_change(change: f64) -> Self {
        if change > 15.0 {
            Self::APlus
        } else if change > 10.0 {
            Self::A
        } else if change > 5.0 {
            Self::BPlus
        } else if change > 0.0 {
            Self::B
        } else if change > -5.0 {
            Self::CPlus
        } else if change > -10.0 {
            Self::DPlus
        } else if change > -15.0 {
            Self::D
        } else {
            Self::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(s)
    }
}

/// Graded summary of one simulated year. Derived and immutable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct YearlyReport {
    pub year: i32,
    pub decisions_count: usize,
    /// Events of high or critical importance fired during the year.
    pub major_events: Vec<GameEvent>,
    pub metric_changes: BTreeMap<MetricId, MetricChange>,
    pub coalition_stability: f64,
    pub public_approval: f64,
    pub economic_performance: f64,
    pub recommendations: Vec<String>,
    pub grade: Grade,
    /// True when the year was bypassed via a jump operation.
    pub skipped: bool,
}

/// Governing coalition. Reference data: the engine core reads
/// `stability` and `total_seats` for reports and never updates them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Coalition {
    pub parties: Vec<String>,
    pub total_seats: u16,
    pub stability: f64,
    pub agreement_level: f64,
    pub formed: SimDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries_are_exclusive() {
        assert_eq!(Grade::from_change(15.1), Grade::APlus);
        assert_eq!(Grade::from_change(15.0), Grade::A);
        assert_eq!(Grade::from_change(12.0), Grade::A);
        assert_eq!(Grade::from_change(10.0), Grade::BPlus);
        assert_eq!(Grade::from_change(0.0), Grade::CPlus);
        assert_eq!(Grade::from_change(-5.0), Grade::DPlus);
        assert_eq!(Grade::from_change(-15.0), Grade::F);
        assert_eq!(Grade::from_change(-40.0), Grade::F);
    }

    #[test]
    fn grade_display() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::F.to_string(), "F");
    }
}
