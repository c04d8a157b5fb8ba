use academic_progression::grading::{grade_info_for_score, MAX_GRADE_POINTS};
use academic_progression::input::{read_rows, results_for};
use academic_progression::models::{
    CourseResult, Grade, Level, NextLevel, RecordedGrade, Semester, FINALIZED_STATUS,
};
use academic_progression::standing::Trend;
use academic_progression::{calculate_comprehensive_gpa, get_academic_standing, get_gpa_trend};
use uuid::Uuid;

fn approved(
    grade: &str,
    credit_unit: u32,
    year: &str,
    semester: Semester,
    level: Level,
) -> CourseResult {
    CourseResult {
        id: Uuid::new_v4(),
        grade: RecordedGrade::from(grade),
        credit_unit,
        academic_year: year.parse().expect("valid academic year"),
        semester,
        level,
        course_code: "CSC201".to_string(),
        status: FINALIZED_STATUS.to_string(),
    }
}

fn transcript() -> Vec<CourseResult> {
    vec![
        approved("A", 3, "2021/2022", Semester::First, Level::L100),
        approved("C", 3, "2021/2022", Semester::First, Level::L100),
        approved("B", 2, "2021/2022", Semester::Second, Level::L100),
        approved("E", 3, "2021/2022", Semester::Second, Level::L100),
        approved("F", 2, "2022/2023", Semester::First, Level::L200),
        approved("A", 4, "2022/2023", Semester::Second, Level::L200),
        approved("??", 3, "2022/2023", Semester::Second, Level::L200),
    ]
}

#[test]
fn report_json_uses_consumer_field_names() {
    let results = vec![approved("A", 3, "2023/2024", Semester::First, Level::L100)];
    let report = calculate_comprehensive_gpa(&results);
    let json = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(json["cgpa"], 5.0);
    assert_eq!(json["totalCredits"], 3);
    assert_eq!(json["sessionGPAs"][0]["academicYear"], "2023/2024");
    assert_eq!(json["sessionGPAs"][0]["semester"], "FIRST");
    assert_eq!(json["sessionGPAs"][0]["courses"][0]["grade"], "A");
    assert_eq!(json["levelGPAs"][0]["level"], "LEVEL_100");
    assert_eq!(json["levelGPAs"][0]["sessions"][0], "2023/2024-FIRST");
    assert_eq!(json["progression"]["currentLevel"], "LEVEL_100");
    assert_eq!(json["progression"]["nextLevel"], "LEVEL_200");
    assert_eq!(json["progression"]["creditsByLevel"]["LEVEL_100"], 3);
    assert_eq!(json["statistics"]["passRate"], 100);
    assert_eq!(json["statistics"]["weakPass"], 0);
    assert_eq!(json["statistics"]["gradeDistribution"]["A"], 1);
    assert_eq!(json["statistics"]["gradeDistribution"]["F"], 0);
}

#[test]
fn aggregates_stay_consistent_across_groupings() {
    let report = calculate_comprehensive_gpa(&transcript());

    let session_credits: u32 = report.session_gpas.iter().map(|s| s.total_credits).sum();
    let level_credits: u32 = report.level_gpas.iter().map(|l| l.total_credits).sum();
    let session_points: f64 = report.session_gpas.iter().map(|s| s.total_grade_points).sum();

    assert_eq!(report.total_credits, 17);
    assert_eq!(session_credits, report.total_credits);
    assert_eq!(level_credits, report.total_credits);
    assert_eq!(session_points, report.total_grade_points);
    assert_eq!(report.total_grade_points, 15.0 + 9.0 + 8.0 + 3.0 + 0.0 + 20.0);
    assert_eq!(report.cgpa, 3.24);
    assert!(report.cgpa >= 0.0 && report.cgpa <= MAX_GRADE_POINTS);

    assert_eq!(report.statistics.total_courses, 7);
    assert_eq!(report.statistics.passed, 4);
    assert_eq!(report.statistics.weak_pass, 1);
    assert_eq!(report.statistics.failed, 1);
    assert_eq!(report.statistics.unrecognized, 1);
    assert_eq!(report.statistics.pass_rate, 57);
}

#[test]
fn repeated_calls_produce_identical_output() {
    let results = transcript();
    let first = serde_json::to_string(&calculate_comprehensive_gpa(&results)).unwrap();
    let second = serde_json::to_string(&calculate_comprehensive_gpa(&results)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn input_order_does_not_change_the_report() {
    let results = transcript();
    let mut reversed = results.clone();
    reversed.reverse();

    let forward = calculate_comprehensive_gpa(&results);
    let backward = calculate_comprehensive_gpa(&reversed);

    assert_eq!(forward.cgpa, backward.cgpa);
    assert_eq!(forward.total_credits, backward.total_credits);
    let gpas = |report: &academic_progression::ComprehensiveGpa| -> Vec<f64> {
        report.session_gpas.iter().map(|s| s.gpa).collect()
    };
    assert_eq!(gpas(&forward), gpas(&backward));
    assert_eq!(forward.progression, backward.progression);
}

#[test]
fn only_pending_results_give_an_empty_report() {
    let mut pending = transcript();
    for result in &mut pending {
        result.status = "PENDING".to_string();
    }
    let report = calculate_comprehensive_gpa(&pending);

    assert_eq!(report.cgpa, 0.0);
    assert!(report.session_gpas.is_empty());
    assert!(report.level_gpas.is_empty());
    assert_eq!(report.statistics.total_courses, 0);
    assert_eq!(report.statistics.pass_rate, 0);
    assert_eq!(get_gpa_trend(&report.session_gpas).trend, Trend::Stable);
}

#[test]
fn level_200_with_full_credits_is_current() {
    let results: Vec<CourseResult> = (0..8)
        .map(|_| approved("B", 3, "2022/2023", Semester::First, Level::L200))
        .collect();
    let report = calculate_comprehensive_gpa(&results);

    assert_eq!(report.progression.current_level, Level::L200);
    assert_eq!(report.progression.next_level, NextLevel::Level(Level::L300));
    assert_eq!(report.progression.credits_to_next_level, 0);
    assert_eq!(report.progression.credits_remaining, 96);
    assert!(!report.progression.eligible_for_graduation);
}

#[test]
fn score_boundaries_and_standing_boundaries() {
    let grades: Vec<Grade> = [70.0, 60.0, 50.0, 45.0, 40.0]
        .iter()
        .map(|score| grade_info_for_score(*score).grade)
        .collect();
    assert_eq!(grades, vec![Grade::A, Grade::B, Grade::C, Grade::D, Grade::E]);

    assert_eq!(get_academic_standing(4.5).label, "First Class");
    assert_eq!(get_academic_standing(4.49).label, "Second Class Upper");
}

#[test]
fn session_trend_across_a_transcript() {
    let report = calculate_comprehensive_gpa(&transcript());
    let trend = get_gpa_trend(&report.session_gpas);

    // 4.00 in the first session, 5.00 in the last.
    assert_eq!(trend.trend, Trend::Improving);
    assert_eq!(trend.change, 1.0);
    assert_eq!(trend.sessions, 4);
}

#[test]
fn result_sheet_feeds_the_engine() {
    let sheet = "\
matric_number,full_name,course_code,grade,credit_unit,academic_year,semester,level,status,source_key
U1,Ada Obi,CSC101,A,3,2023/2024,FIRST,LEVEL_100,SENATE_APPROVED,a
U1,Ada Obi,CSC102,F,3,2023/2024,FIRST,LEVEL_100,SENATE_APPROVED,b
U1,Ada Obi,CSC103,A,3,2023/2024,FIRST,LEVEL_100,PENDING,c
U2,Femi Ade,CSC101,B,3,2023/2024,FIRST,LEVEL_100,SENATE_APPROVED,d
";
    let rows = read_rows(sheet.as_bytes()).expect("sheet parses");
    let report = calculate_comprehensive_gpa(&results_for(&rows, Some("U1")));

    assert_eq!(report.total_grade_points, 15.0);
    assert_eq!(report.total_credits, 6);
    assert_eq!(report.cgpa, 2.5);
}
