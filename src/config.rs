use crate::models::{Level, FINALIZED_STATUS};

pub const DEFAULT_MIN_LEVEL_CREDITS: u32 = 20;
pub const DEFAULT_CREDITS_PER_LEVEL: u32 = 24;
pub const DEFAULT_GRADUATION_CREDITS: u32 = 120;
pub const DEFAULT_MIN_GRADUATION_CGPA: f64 = 1.0;

/// Institutional policy numbers used by progression and graduation checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionPolicy {
    /// Only results with this status take part in GPA computation.
    pub finalized_status: String,
    /// Credits a level needs before it can be the student's current level.
    pub min_level_credits: u32,
    /// Credits required at the current level before moving up.
    pub credits_per_level: u32,
    pub graduation_credits: u32,
    pub min_graduation_cgpa: f64,
    pub terminal_level: Level,
}

impl Default for ProgressionPolicy {
    fn default() -> Self {
        Self {
            finalized_status: FINALIZED_STATUS.to_string(),
            min_level_credits: DEFAULT_MIN_LEVEL_CREDITS,
            credits_per_level: DEFAULT_CREDITS_PER_LEVEL,
            graduation_credits: DEFAULT_GRADUATION_CREDITS,
            min_graduation_cgpa: DEFAULT_MIN_GRADUATION_CGPA,
            terminal_level: Level::L500,
        }
    }
}
