//! Grade-point and progression engine for approved course results.
//!
//! The engine is a set of pure functions: a caller supplies a snapshot of a student's
//! [`models::CourseResult`] records and gets back a [`models::ComprehensiveGpa`] report.

pub mod config;
pub mod error;
pub mod grading;
pub mod input;
pub mod models;
pub mod progression;
pub mod report;
pub mod standing;
pub mod terminology;

pub use config::ProgressionPolicy;
pub use models::{ComprehensiveGpa, CourseResult};
pub use progression::{calculate_comprehensive_gpa, calculate_comprehensive_gpa_with};
pub use standing::{get_academic_standing, get_gpa_trend};
