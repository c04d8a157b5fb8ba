use anyhow::Context;
use sqlx::{PgPool, Row};
use tracing::{debug, info};
use uuid::Uuid;

use academic_progression::input::{self, ResultRow};
use academic_progression::models::{CourseResult, Level, RecordedGrade, FINALIZED_STATUS};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

async fn upsert_student(
    pool: &PgPool,
    matric_number: &str,
    full_name: &str,
) -> anyhow::Result<Uuid> {
    let student_id: Uuid = sqlx::query(
        r#"
        INSERT INTO academic_progression.students (id, matric_number, full_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (matric_number) DO UPDATE
        SET full_name = EXCLUDED.full_name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(matric_number)
    .bind(full_name)
    .fetch_one(pool)
    .await?
    .get("id");

    Ok(student_id)
}

/// Inserts one result row. Returns false when `source_key` was already imported.
async fn insert_result(
    pool: &PgPool,
    student_id: Uuid,
    row: &ResultRow,
    source_key: &str,
) -> anyhow::Result<bool> {
    let result = row
        .to_course_result()
        .with_context(|| format!("invalid result row for {}", row.matric_number))?;

    let outcome = sqlx::query(
        r#"
        INSERT INTO academic_progression.course_results
        (id, student_id, course_code, grade, credit_unit, academic_year, semester, level, status, source_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(result.id)
    .bind(student_id)
    .bind(&result.course_code)
    .bind(String::from(result.grade.clone()))
    .bind(i32::try_from(result.credit_unit).context("credit unit out of range")?)
    .bind(result.academic_year.as_str())
    .bind(result.semester.as_str())
    .bind(i32::from(result.level.number()))
    .bind(&result.status)
    .bind(source_key)
    .execute(pool)
    .await?;

    Ok(outcome.rows_affected() > 0)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let matric_number = "U2021/5570001";
    let full_name = "Chiamaka Eze";
    let student_id = upsert_student(pool, matric_number, full_name).await?;

    let results = vec![
        ("seed-001", "GST111", "A", 2, "2021/2022", "FIRST", "LEVEL_100", FINALIZED_STATUS),
        ("seed-002", "MTH110", "B", 3, "2021/2022", "FIRST", "LEVEL_100", FINALIZED_STATUS),
        ("seed-003", "CSC180", "C", 3, "2021/2022", "FIRST", "LEVEL_100", FINALIZED_STATUS),
        ("seed-004", "PHY101", "E", 3, "2021/2022", "FIRST", "LEVEL_100", FINALIZED_STATUS),
        ("seed-005", "MTH120", "B", 3, "2021/2022", "SECOND", "LEVEL_100", FINALIZED_STATUS),
        ("seed-006", "CSC190", "A", 3, "2021/2022", "SECOND", "LEVEL_100", FINALIZED_STATUS),
        ("seed-007", "STA160", "D", 3, "2021/2022", "SECOND", "LEVEL_100", FINALIZED_STATUS),
        ("seed-008", "CHM130", "F", 3, "2021/2022", "SECOND", "LEVEL_100", FINALIZED_STATUS),
        ("seed-009", "CSC280", "B", 3, "2022/2023", "FIRST", "LEVEL_200", FINALIZED_STATUS),
        ("seed-010", "CSC283", "A", 3, "2022/2023", "FIRST", "LEVEL_200", FINALIZED_STATUS),
        ("seed-011", "CSC286", "C", 3, "2022/2023", "SECOND", "LEVEL_200", "DEPARTMENT_APPROVED"),
    ];

    for (source_key, course_code, grade, credit_unit, year, semester, level, status) in results {
        let row = ResultRow {
            matric_number: matric_number.to_string(),
            full_name: full_name.to_string(),
            course_code: course_code.to_string(),
            grade: grade.to_string(),
            credit_unit,
            academic_year: year.to_string(),
            semester: semester.to_string(),
            level: level.to_string(),
            status: status.to_string(),
            source_key: Some(source_key.to_string()),
        };
        insert_result(pool, student_id, &row, source_key).await?;
    }

    Ok(())
}

pub async fn fetch_results(
    pool: &PgPool,
    matric_number: &str,
) -> anyhow::Result<Vec<CourseResult>> {
    let records = sqlx::query(
        "SELECT r.id, r.course_code, r.grade, r.credit_unit, r.academic_year, r.semester, \
         r.level, r.status \
         FROM academic_progression.course_results r \
         JOIN academic_progression.students s ON s.id = r.student_id \
         WHERE s.matric_number = $1",
    )
    .bind(matric_number)
    .fetch_all(pool)
    .await?;

    let mut results = Vec::with_capacity(records.len());

    for row in records {
        let credit_unit: i32 = row.get("credit_unit");
        let level: i32 = row.get("level");
        let academic_year: String = row.get("academic_year");
        let semester: String = row.get("semester");
        let grade: String = row.get("grade");

        results.push(CourseResult {
            id: row.get("id"),
            grade: RecordedGrade::from(grade),
            credit_unit: u32::try_from(credit_unit).context("negative credit unit in database")?,
            academic_year: academic_year.parse()?,
            semester: semester.parse()?,
            level: Level::from_number(i64::from(level))
                .with_context(|| format!("unsupported level {level} in database"))?,
            course_code: row.get("course_code"),
            status: row.get("status"),
        });
    }

    debug!(matric_number, count = results.len(), "fetched course results");
    Ok(results)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    let rows = input::read_rows_csv(csv_path)?;
    let mut inserted = 0usize;

    for row in rows.iter() {
        let student_id = upsert_student(pool, &row.matric_number, &row.full_name).await?;

        let source_key = row
            .source_key
            .clone()
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        if insert_result(pool, student_id, row, &source_key).await? {
            inserted += 1;
        }
    }

    info!(rows = rows.len(), inserted, "imported result sheet");
    Ok(inserted)
}
