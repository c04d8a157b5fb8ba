use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::config::ProgressionPolicy;
use crate::grading::{counted_credits, ratio, round2, sct, sgp};
use crate::models::{
    ComprehensiveGpa, CourseResult, Grade, GradeStatistics, Level, LevelGpa, NextLevel,
    Progression, SessionGpa, SessionKey,
};

pub fn calculate_comprehensive_gpa(results: &[CourseResult]) -> ComprehensiveGpa {
    calculate_comprehensive_gpa_with(results, &ProgressionPolicy::default())
}

/// Builds the full GPA report from a snapshot of a student's results.
///
/// Only results whose status matches `policy.finalized_status` are considered. The output is
/// always well formed; an empty or fully filtered input yields an all-zero report.
pub fn calculate_comprehensive_gpa_with(
    results: &[CourseResult],
    policy: &ProgressionPolicy,
) -> ComprehensiveGpa {
    let finalized: Vec<&CourseResult> = results
        .iter()
        .filter(|result| result.status == policy.finalized_status)
        .collect();

    for result in finalized.iter().filter(|result| result.grade.grade().is_none()) {
        warn!(
            result_id = %result.id,
            course_code = %result.course_code,
            grade = ?result.grade,
            "unrecognized grade symbol; result contributes no credits"
        );
    }

    let total_credits = sct(&finalized);
    let total_grade_points = sgp(&finalized);
    let cgpa = ratio(total_grade_points, total_credits);

    let session_gpas = group_by_session(&finalized);
    let level_gpas = group_by_level(&finalized);
    let progression = determine_progression(&finalized, total_credits, cgpa, policy);
    let statistics = grade_statistics(&finalized);

    debug!(
        supplied = results.len(),
        finalized = finalized.len(),
        total_credits,
        cgpa,
        sessions = session_gpas.len(),
        levels = level_gpas.len(),
        "computed comprehensive gpa"
    );

    ComprehensiveGpa {
        cgpa: round2(cgpa),
        total_credits,
        total_grade_points,
        session_gpas,
        level_gpas,
        progression,
        statistics,
    }
}

pub fn group_by_session(results: &[&CourseResult]) -> Vec<SessionGpa> {
    let mut groups: BTreeMap<SessionKey, Vec<&CourseResult>> = BTreeMap::new();
    for result in results {
        groups.entry(result.session_key()).or_default().push(*result);
    }

    // BTreeMap iteration already yields year order with FIRST before SECOND.
    groups
        .into_iter()
        .map(|(key, courses)| {
            let total_credits = sct(&courses);
            let total_grade_points = sgp(&courses);
            SessionGpa {
                academic_year: key.academic_year,
                semester: key.semester,
                gpa: round2(ratio(total_grade_points, total_credits)),
                total_credits,
                total_grade_points,
                courses: courses.into_iter().cloned().collect(),
            }
        })
        .collect()
}

pub fn group_by_level(results: &[&CourseResult]) -> Vec<LevelGpa> {
    let mut groups: BTreeMap<Level, Vec<&CourseResult>> = BTreeMap::new();
    for result in results {
        groups.entry(result.level).or_default().push(*result);
    }

    groups
        .into_iter()
        .map(|(level, courses)| {
            let total_credits = sct(&courses);
            let total_grade_points = sgp(&courses);
            let sessions: BTreeSet<SessionKey> =
                courses.iter().map(|result| result.session_key()).collect();
            LevelGpa {
                level,
                gpa: round2(ratio(total_grade_points, total_credits)),
                total_credits,
                total_grade_points,
                courses: courses.into_iter().cloned().collect(),
                sessions: sessions.iter().map(ToString::to_string).collect(),
            }
        })
        .collect()
}

fn determine_progression(
    results: &[&CourseResult],
    total_credits: u32,
    cgpa: f64,
    policy: &ProgressionPolicy,
) -> Progression {
    let mut credits_by_level: BTreeMap<Level, u32> = BTreeMap::new();
    for result in results {
        let credits = credits_by_level.entry(result.level).or_insert(0);
        *credits = credits.saturating_add(counted_credits(result));
    }

    let current_level = Level::ALL
        .iter()
        .rev()
        .copied()
        .find(|level| {
            credits_by_level.get(level).copied().unwrap_or(0) >= policy.min_level_credits
        })
        .unwrap_or(Level::L100);

    let next_level = match current_level.next() {
        Some(level) if current_level < policy.terminal_level => NextLevel::Level(level),
        _ => NextLevel::Graduation,
    };

    let current_level_credits = credits_by_level.get(&current_level).copied().unwrap_or(0);
    let eligible_for_graduation = total_credits >= policy.graduation_credits
        && current_level >= policy.terminal_level
        && cgpa >= policy.min_graduation_cgpa;

    Progression {
        current_level,
        next_level,
        credits_by_level,
        current_level_credits,
        credits_to_next_level: policy.credits_per_level.saturating_sub(current_level_credits),
        total_credits_earned: total_credits,
        required_credits: policy.graduation_credits,
        credits_remaining: policy.graduation_credits.saturating_sub(total_credits),
        eligible_for_graduation,
    }
}

pub fn grade_statistics(results: &[&CourseResult]) -> GradeStatistics {
    let mut grade_distribution: BTreeMap<Grade, usize> =
        Grade::ALL.iter().map(|grade| (*grade, 0)).collect();
    let mut passed = 0;
    let mut weak_pass = 0;
    let mut failed = 0;
    let mut unrecognized = 0;

    for result in results {
        match result.grade.grade() {
            Some(grade) => {
                *grade_distribution.entry(grade).or_insert(0) += 1;
                match grade {
                    Grade::A | Grade::B | Grade::C | Grade::D => passed += 1,
                    Grade::E => weak_pass += 1,
                    Grade::F => failed += 1,
                }
            }
            None => unrecognized += 1,
        }
    }

    let total_courses = results.len();
    let pass_rate = if total_courses == 0 {
        0
    } else {
        (passed as f64 / total_courses as f64 * 100.0).round() as u32
    };

    GradeStatistics {
        total_courses,
        passed,
        weak_pass,
        failed,
        unrecognized,
        pass_rate,
        grade_distribution,
    }
}
