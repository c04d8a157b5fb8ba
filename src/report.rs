use std::fmt::Write;

use chrono::NaiveDate;

use crate::grading::{grade_info, ratio};
use crate::models::ComprehensiveGpa;
use crate::standing::{get_academic_standing, get_gpa_trend};
use crate::terminology::TERMINOLOGY;

pub fn build_transcript(
    student: &str,
    generated_on: NaiveDate,
    gpa: &ComprehensiveGpa,
) -> String {
    let standing = get_academic_standing(gpa.cgpa);
    let trend = get_gpa_trend(&gpa.session_gpas);
    let progression = &gpa.progression;
    let stats = &gpa.statistics;

    let mut output = String::new();

    let _ = writeln!(output, "# Academic Transcript Summary");
    let _ = writeln!(output, "Generated for {} on {}", student, generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Standing");
    let _ = writeln!(
        output,
        "- CGPA {:.2} ({}, {:.2} to {:.2})",
        gpa.cgpa, standing.label, standing.min, standing.max
    );
    let _ = writeln!(
        output,
        "- TCT {} / CGP {:.0}",
        gpa.total_credits, gpa.total_grade_points
    );
    let _ = writeln!(
        output,
        "- Trend {} ({:+.2} across {} sessions)",
        trend.trend.as_str(),
        trend.change,
        trend.sessions
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Sessions");

    if gpa.session_gpas.is_empty() {
        let _ = writeln!(output, "No approved results yet.");
    } else {
        for session in gpa.session_gpas.iter() {
            let _ = writeln!(
                output,
                "- {} {}: GPA {:.2} (SCT {}, SGP {:.0}, {} courses)",
                session.academic_year,
                session.semester,
                session.gpa,
                session.total_credits,
                session.total_grade_points,
                session.courses.len()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Levels");

    if gpa.level_gpas.is_empty() {
        let _ = writeln!(output, "No approved results yet.");
    } else {
        for level in gpa.level_gpas.iter() {
            let _ = writeln!(
                output,
                "- {}: GPA {:.2} over {} credits in {}",
                level.level,
                level.gpa,
                level.total_credits,
                level.sessions.join(", ")
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Progression");
    let _ = writeln!(
        output,
        "- Current level {} ({} credits), next {}",
        progression.current_level, progression.current_level_credits, progression.next_level
    );
    let _ = writeln!(
        output,
        "- {} credits to next level",
        progression.credits_to_next_level
    );
    let _ = writeln!(
        output,
        "- {} of {} credits earned, {} remaining",
        progression.total_credits_earned,
        progression.required_credits,
        progression.credits_remaining
    );
    let _ = writeln!(
        output,
        "- Eligible for graduation: {}",
        if progression.eligible_for_graduation {
            "yes"
        } else {
            "no"
        }
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Mix");
    let _ = writeln!(
        output,
        "- {} courses: {} passed, {} weak pass, {} failed (pass rate {}%)",
        stats.total_courses, stats.passed, stats.weak_pass, stats.failed, stats.pass_rate
    );
    if stats.unrecognized > 0 {
        let _ = writeln!(
            output,
            "- {} results carry a grade outside the scale and were not counted",
            stats.unrecognized
        );
    }
    for (grade, count) in stats.grade_distribution.iter() {
        let _ = writeln!(
            output,
            "- {} ({}): {}",
            grade,
            grade_info(*grade).description,
            count
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Key");
    for term in TERMINOLOGY.iter() {
        let _ = writeln!(output, "- {}: {}", term.abbreviation, term.meaning);
    }

    output
}

/// Per-session export with running TCT, CGP and CGPA columns.
pub fn sessions_csv(gpa: &ComprehensiveGpa) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "academic_year",
        "semester",
        "sct",
        "sgp",
        "gpa",
        "tct",
        "cgp",
        "cgpa",
    ])?;

    let mut tct = 0u32;
    let mut cgp = 0.0f64;
    for session in gpa.session_gpas.iter() {
        tct = tct.saturating_add(session.total_credits);
        cgp += session.total_grade_points;
        writer.write_record([
            session.academic_year.to_string(),
            session.semester.to_string(),
            session.total_credits.to_string(),
            format!("{:.0}", session.total_grade_points),
            format!("{:.2}", session.gpa),
            tct.to_string(),
            format!("{:.0}", cgp),
            format!("{:.2}", ratio(cgp, tct)),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseResult, Level, RecordedGrade, Semester, FINALIZED_STATUS};
    use crate::progression::calculate_comprehensive_gpa;
    use uuid::Uuid;

    fn sample_result(grade: &str, year: &str, semester: Semester) -> CourseResult {
        CourseResult {
            id: Uuid::new_v4(),
            grade: RecordedGrade::from(grade),
            credit_unit: 3,
            academic_year: year.parse().unwrap(),
            semester,
            level: Level::L100,
            course_code: "GST101".to_string(),
            status: FINALIZED_STATUS.to_string(),
        }
    }

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn transcript_lists_standing_and_sessions() {
        let results = vec![
            sample_result("A", "2023/2024", Semester::First),
            sample_result("B", "2023/2024", Semester::Second),
        ];
        let gpa = calculate_comprehensive_gpa(&results);
        let transcript = build_transcript("U2020/001", generated_on(), &gpa);

        assert!(transcript.contains("Generated for U2020/001 on 2026-03-02"));
        assert!(transcript.contains("CGPA 4.50 (First Class"));
        assert!(transcript.contains("- 2023/2024 FIRST: GPA 5.00 (SCT 3, SGP 15, 1 courses)"));
        assert!(transcript.contains("Trend declining (-1.00 across 2 sessions)"));
        assert!(transcript.contains("- SCT: Semesterial Course Taken"));
    }

    #[test]
    fn empty_transcript_still_renders() {
        let gpa = calculate_comprehensive_gpa(&[]);
        let transcript = build_transcript("U2020/002", generated_on(), &gpa);

        assert!(transcript.contains("No approved results yet."));
        assert!(transcript.contains("CGPA 0.00 (Fail"));
        assert!(transcript.contains("Eligible for graduation: no"));
    }

    #[test]
    fn csv_export_carries_running_totals() {
        let results = vec![
            sample_result("A", "2023/2024", Semester::First),
            sample_result("F", "2023/2024", Semester::Second),
        ];
        let gpa = calculate_comprehensive_gpa(&results);
        let csv = sessions_csv(&gpa).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "academic_year,semester,sct,sgp,gpa,tct,cgp,cgpa");
        assert_eq!(lines[1], "2023/2024,FIRST,3,15,5.00,3,15,5.00");
        assert_eq!(lines[2], "2023/2024,SECOND,3,0,0.00,6,15,2.50");
    }
}
