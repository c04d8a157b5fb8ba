use serde::Serialize;

use crate::grading::round2;
use crate::models::SessionGpa;

const TREND_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpaTrend {
    pub trend: Trend,
    pub change: f64,
    pub sessions: usize,
}

/// Compares the first and last session GPA of an ordered list.
///
/// The change is rounded to two places before it is compared, so a change of exactly
/// 0.1 reads as stable.
pub fn get_gpa_trend(sessions: &[SessionGpa]) -> GpaTrend {
    let (first, last) = match (sessions.first(), sessions.last()) {
        (Some(first), Some(last)) if sessions.len() >= 2 => (first, last),
        _ => {
            return GpaTrend {
                trend: Trend::Stable,
                change: 0.0,
                sessions: sessions.len(),
            }
        }
    };

    let change = round2(last.gpa - first.gpa);
    let trend = if change > TREND_THRESHOLD {
        Trend::Improving
    } else if change < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    };

    GpaTrend {
        trend,
        change,
        sessions: sessions.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DegreeClass {
    FirstClass,
    SecondClassUpper,
    SecondClassLower,
    ThirdClass,
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingBand {
    pub class: DegreeClass,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

// Highest band first; each band owns its lower bound.
static STANDING_BANDS: [StandingBand; 6] = [
    StandingBand {
        class: DegreeClass::FirstClass,
        label: "First Class",
        min: 4.5,
        max: 5.0,
    },
    StandingBand {
        class: DegreeClass::SecondClassUpper,
        label: "Second Class Upper",
        min: 3.5,
        max: 4.49,
    },
    StandingBand {
        class: DegreeClass::SecondClassLower,
        label: "Second Class Lower",
        min: 2.4,
        max: 3.49,
    },
    StandingBand {
        class: DegreeClass::ThirdClass,
        label: "Third Class",
        min: 1.5,
        max: 2.39,
    },
    StandingBand {
        class: DegreeClass::Pass,
        label: "Pass",
        min: 1.0,
        max: 1.49,
    },
    StandingBand {
        class: DegreeClass::Fail,
        label: "Fail",
        min: 0.0,
        max: 0.99,
    },
];

pub fn standing_bands() -> &'static [StandingBand] {
    &STANDING_BANDS
}

pub fn get_academic_standing(cgpa: f64) -> &'static StandingBand {
    STANDING_BANDS
        .iter()
        .find(|band| cgpa >= band.min)
        .unwrap_or(&STANDING_BANDS[STANDING_BANDS.len() - 1])
}
