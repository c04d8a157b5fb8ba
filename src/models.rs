use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseError;

/// Status value the approval workflow assigns to results that count toward GPA.
pub const FINALIZED_STATUS: &str = "SENATE_APPROVED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub const ALL: [Grade; 6] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E, Grade::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "E" => Ok(Grade::E),
            "F" => Ok(Grade::F),
            _ => Err(ParseError::UnknownGrade(s.to_string())),
        }
    }
}

/// Grade symbol as supplied by the result workflow.
///
/// Symbols outside the scale are kept verbatim so they can be reported, but they never
/// contribute credits or points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordedGrade {
    Recognized(Grade),
    Unrecognized(String),
}

impl RecordedGrade {
    pub fn grade(&self) -> Option<Grade> {
        match self {
            RecordedGrade::Recognized(grade) => Some(*grade),
            RecordedGrade::Unrecognized(_) => None,
        }
    }
}

impl From<Grade> for RecordedGrade {
    fn from(grade: Grade) -> Self {
        RecordedGrade::Recognized(grade)
    }
}

impl From<String> for RecordedGrade {
    fn from(raw: String) -> Self {
        match raw.parse::<Grade>() {
            Ok(grade) => RecordedGrade::Recognized(grade),
            Err(_) => RecordedGrade::Unrecognized(raw),
        }
    }
}

impl From<&str> for RecordedGrade {
    fn from(raw: &str) -> Self {
        RecordedGrade::from(raw.to_string())
    }
}

impl From<RecordedGrade> for String {
    fn from(grade: RecordedGrade) -> Self {
        match grade {
            RecordedGrade::Recognized(grade) => grade.as_str().to_string(),
            RecordedGrade::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub fn as_str(self) -> &'static str {
        match self {
            Semester::First => "FIRST",
            Semester::Second => "SECOND",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIRST" | "1" => Ok(Semester::First),
            "SECOND" | "2" => Ok(Semester::Second),
            _ => Err(ParseError::UnknownSemester(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "LEVEL_100")]
    L100,
    #[serde(rename = "LEVEL_200")]
    L200,
    #[serde(rename = "LEVEL_300")]
    L300,
    #[serde(rename = "LEVEL_400")]
    L400,
    #[serde(rename = "LEVEL_500")]
    L500,
}

impl Level {
    /// Levels in progression order.
    pub const ALL: [Level; 5] = [Level::L100, Level::L200, Level::L300, Level::L400, Level::L500];

    pub fn number(self) -> u16 {
        match self {
            Level::L100 => 100,
            Level::L200 => 200,
            Level::L300 => 300,
            Level::L400 => 400,
            Level::L500 => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::L100 => "LEVEL_100",
            Level::L200 => "LEVEL_200",
            Level::L300 => "LEVEL_300",
            Level::L400 => "LEVEL_400",
            Level::L500 => "LEVEL_500",
        }
    }

    pub fn from_number(number: i64) -> Option<Level> {
        match number {
            100 => Some(Level::L100),
            200 => Some(Level::L200),
            300 => Some(Level::L300),
            400 => Some(Level::L400),
            500 => Some(Level::L500),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Level> {
        match self {
            Level::L100 => Some(Level::L200),
            Level::L200 => Some(Level::L300),
            Level::L300 => Some(Level::L400),
            Level::L400 => Some(Level::L500),
            Level::L500 => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let digits = upper.strip_prefix("LEVEL_").unwrap_or(&upper);
        digits
            .parse::<i64>()
            .ok()
            .and_then(Level::from_number)
            .ok_or_else(|| ParseError::UnknownLevel(s.to_string()))
    }
}

/// Session label such as `2023/2024`. Ordering is lexical, which is chronological for
/// well-formed values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AcademicYear(String);

impl AcademicYear {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AcademicYear {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let well_formed = match trimmed.split_once('/') {
            Some((start, end)) => {
                start.len() == 4
                    && end.len() == 4
                    && start.bytes().all(|b| b.is_ascii_digit())
                    && end.bytes().all(|b| b.is_ascii_digit())
            }
            None => false,
        };

        if well_formed {
            Ok(AcademicYear(trimmed.to_string()))
        } else {
            Err(ParseError::MalformedAcademicYear(s.to_string()))
        }
    }
}

impl TryFrom<String> for AcademicYear {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AcademicYear> for String {
    fn from(year: AcademicYear) -> Self {
        year.0
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grouping key for one semester of one academic year. Sorts by year, then FIRST before SECOND.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey {
    pub academic_year: AcademicYear,
    pub semester: Semester,
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.academic_year, self.semester)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResult {
    pub id: Uuid,
    pub grade: RecordedGrade,
    pub credit_unit: u32,
    pub academic_year: AcademicYear,
    pub semester: Semester,
    pub level: Level,
    pub course_code: String,
    pub status: String,
}

impl CourseResult {
    pub fn session_key(&self) -> SessionKey {
        SessionKey {
            academic_year: self.academic_year.clone(),
            semester: self.semester,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGpa {
    pub academic_year: AcademicYear,
    pub semester: Semester,
    pub gpa: f64,
    pub total_credits: u32,
    pub total_grade_points: f64,
    pub courses: Vec<CourseResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelGpa {
    pub level: Level,
    pub gpa: f64,
    pub total_credits: u32,
    pub total_grade_points: f64,
    pub courses: Vec<CourseResult>,
    pub sessions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextLevel {
    #[serde(rename = "GRADUATION")]
    Graduation,
    #[serde(untagged)]
    Level(Level),
}

impl fmt::Display for NextLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextLevel::Graduation => f.write_str("GRADUATION"),
            NextLevel::Level(level) => level.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub current_level: Level,
    pub next_level: NextLevel,
    pub credits_by_level: BTreeMap<Level, u32>,
    pub current_level_credits: u32,
    pub credits_to_next_level: u32,
    pub total_credits_earned: u32,
    pub required_credits: u32,
    pub credits_remaining: u32,
    pub eligible_for_graduation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStatistics {
    pub total_courses: usize,
    pub passed: usize,
    pub weak_pass: usize,
    pub failed: usize,
    pub unrecognized: usize,
    pub pass_rate: u32,
    pub grade_distribution: BTreeMap<Grade, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveGpa {
    pub cgpa: f64,
    #[serde(rename = "totalCredits")]
    pub total_credits: u32,
    #[serde(rename = "totalGradePoints")]
    pub total_grade_points: f64,
    #[serde(rename = "sessionGPAs")]
    pub session_gpas: Vec<SessionGpa>,
    #[serde(rename = "levelGPAs")]
    pub level_gpas: Vec<LevelGpa>,
    pub progression: Progression,
    pub statistics: GradeStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_prefixed_and_bare_forms() {
        assert_eq!("LEVEL_300".parse::<Level>().unwrap(), Level::L300);
        assert_eq!("200".parse::<Level>().unwrap(), Level::L200);
        assert_eq!(" level_500 ".parse::<Level>().unwrap(), Level::L500);
        assert!("LEVEL_600".parse::<Level>().is_err());
    }

    #[test]
    fn academic_year_requires_two_four_digit_years() {
        assert!("2023/2024".parse::<AcademicYear>().is_ok());
        assert!("2023-2024".parse::<AcademicYear>().is_err());
        assert!("23/24".parse::<AcademicYear>().is_err());
    }

    #[test]
    fn session_keys_order_by_year_then_semester() {
        let key = |year: &str, semester| SessionKey {
            academic_year: year.parse().unwrap(),
            semester,
        };
        let mut keys = vec![
            key("2023/2024", Semester::Second),
            key("2022/2023", Semester::Second),
            key("2023/2024", Semester::First),
        ];
        keys.sort();
        let labels: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec!["2022/2023-SECOND", "2023/2024-FIRST", "2023/2024-SECOND"]
        );
    }

    #[test]
    fn unknown_grade_symbols_are_preserved() {
        let grade = RecordedGrade::from("x+");
        assert_eq!(grade, RecordedGrade::Unrecognized("x+".to_string()));
        assert_eq!(grade.grade(), None);
        assert_eq!(RecordedGrade::from(" b").grade(), Some(Grade::B));
    }

    #[test]
    fn next_level_serializes_as_symbol() {
        let graduation = serde_json::to_string(&NextLevel::Graduation).unwrap();
        let level = serde_json::to_string(&NextLevel::Level(Level::L300)).unwrap();
        assert_eq!(graduation, "\"GRADUATION\"");
        assert_eq!(level, "\"LEVEL_300\"");
    }
}
