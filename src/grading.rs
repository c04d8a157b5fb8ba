//! Grade scale, point lookup and the SCT/SGP/TCT/CGP primitives.

use serde::Serialize;

use crate::models::{CourseResult, Grade};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInfo {
    pub grade: Grade,
    pub points: f64,
    pub is_pass: bool,
    pub description: &'static str,
}

// Ordered best to worst; points never increase down the table.
static GRADE_SCALE: [GradeInfo; 6] = [
    GradeInfo {
        grade: Grade::A,
        points: 5.0,
        is_pass: true,
        description: "Excellent",
    },
    GradeInfo {
        grade: Grade::B,
        points: 4.0,
        is_pass: true,
        description: "Very Good",
    },
    GradeInfo {
        grade: Grade::C,
        points: 3.0,
        is_pass: true,
        description: "Good",
    },
    GradeInfo {
        grade: Grade::D,
        points: 2.0,
        is_pass: true,
        description: "Fair",
    },
    GradeInfo {
        grade: Grade::E,
        points: 1.0,
        is_pass: false,
        description: "Weak Pass",
    },
    GradeInfo {
        grade: Grade::F,
        points: 0.0,
        is_pass: false,
        description: "Fail",
    },
];

pub const MAX_GRADE_POINTS: f64 = 5.0;

pub fn grade_scale() -> &'static [GradeInfo] {
    &GRADE_SCALE
}

pub fn grade_info(grade: Grade) -> &'static GradeInfo {
    match grade {
        Grade::A => &GRADE_SCALE[0],
        Grade::B => &GRADE_SCALE[1],
        Grade::C => &GRADE_SCALE[2],
        Grade::D => &GRADE_SCALE[3],
        Grade::E => &GRADE_SCALE[4],
        Grade::F => &GRADE_SCALE[5],
    }
}

/// Looks up a grade symbol as written on a result sheet.
pub fn lookup_grade(symbol: &str) -> Option<&'static GradeInfo> {
    symbol.parse::<Grade>().ok().map(grade_info)
}

pub fn is_valid_grade(symbol: &str) -> bool {
    lookup_grade(symbol).is_some()
}

pub fn is_valid_score(score: f64) -> bool {
    (0.0..=100.0).contains(&score)
}

impl Grade {
    /// Resolves a total score to a grade. Lower bounds are inclusive; NaN and negative
    /// scores fall through to F.
    pub fn from_score(score: f64) -> Grade {
        if score >= 70.0 {
            Grade::A
        } else if score >= 60.0 {
            Grade::B
        } else if score >= 50.0 {
            Grade::C
        } else if score >= 45.0 {
            Grade::D
        } else if score >= 40.0 {
            Grade::E
        } else {
            Grade::F
        }
    }

    pub fn points(self) -> f64 {
        grade_info(self).points
    }
}

pub fn grade_info_for_score(score: f64) -> &'static GradeInfo {
    grade_info(Grade::from_score(score))
}

/// Anything that carries a grade and a credit weight.
///
/// `grade()` returns `None` for symbols outside the scale; those items contribute neither
/// credits nor points to any total.
pub trait Graded {
    fn grade(&self) -> Option<Grade>;
    fn credit_unit(&self) -> u32;
}

impl Graded for CourseResult {
    fn grade(&self) -> Option<Grade> {
        self.grade.grade()
    }

    fn credit_unit(&self) -> u32 {
        self.credit_unit
    }
}

impl<T: Graded + ?Sized> Graded for &T {
    fn grade(&self) -> Option<Grade> {
        (**self).grade()
    }

    fn credit_unit(&self) -> u32 {
        (**self).credit_unit()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradedUnit {
    pub grade: Grade,
    pub credit_unit: u32,
}

impl GradedUnit {
    pub fn new(grade: Grade, credit_unit: u32) -> Self {
        Self { grade, credit_unit }
    }
}

impl Graded for GradedUnit {
    fn grade(&self) -> Option<Grade> {
        Some(self.grade)
    }

    fn credit_unit(&self) -> u32 {
        self.credit_unit
    }
}

/// Credit units an item contributes; zero when its grade is off the scale.
pub fn counted_credits<T: Graded>(item: &T) -> u32 {
    match item.grade() {
        Some(_) => item.credit_unit(),
        None => 0,
    }
}

fn grade_points<T: Graded>(item: &T) -> f64 {
    match item.grade() {
        Some(grade) => grade.points() * f64::from(item.credit_unit()),
        None => 0.0,
    }
}

/// Semesterial Course Taken: credit units carried in one semester. Saturates at `u32::MAX`.
pub fn sct<T: Graded>(items: &[T]) -> u32 {
    items
        .iter()
        .map(counted_credits)
        .fold(0u32, |total, credits| total.saturating_add(credits))
}

/// Semesterial Grade Point: sum of points times credit units for one semester.
pub fn sgp<T: Graded>(items: &[T]) -> f64 {
    items.iter().map(grade_points).sum()
}

/// Total Course Taken across the whole history.
pub fn tct<T: Graded>(items: &[T]) -> u32 {
    sct(items)
}

/// Cumulative Grade Point across the whole history.
pub fn cgp<T: Graded>(items: &[T]) -> f64 {
    sgp(items)
}

/// Division guarded against zero credits. Unrounded.
pub fn ratio(grade_points: f64, credits: u32) -> f64 {
    if credits > 0 {
        grade_points / f64::from(credits)
    } else {
        0.0
    }
}

pub fn gpa<T: Graded>(items: &[T]) -> f64 {
    ratio(sgp(items), sct(items))
}

pub fn cgpa<T: Graded>(items: &[T]) -> f64 {
    ratio(cgp(items), tct(items))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SemesterSummary {
    pub sct: u32,
    pub sgp: f64,
    pub gpa: f64,
}

impl SemesterSummary {
    pub fn from_items<T: Graded>(items: &[T]) -> Self {
        let sct = sct(items);
        let sgp = sgp(items);
        Self {
            sct,
            sgp,
            gpa: round2(ratio(sgp, sct)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct CumulativeSummary {
    pub tct: u32,
    pub cgp: f64,
    pub cgpa: f64,
}

impl CumulativeSummary {
    pub fn from_items<T: Graded>(items: &[T]) -> Self {
        let tct = tct(items);
        let cgp = cgp(items);
        Self {
            tct,
            cgp,
            cgpa: round2(ratio(cgp, tct)),
        }
    }
}
