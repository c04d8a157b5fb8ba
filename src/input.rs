use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{InputError, ParseError};
use crate::models::{CourseResult, RecordedGrade};

/// One line of a result sheet export.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultRow {
    pub matric_number: String,
    pub full_name: String,
    pub course_code: String,
    pub grade: String,
    pub credit_unit: u32,
    pub academic_year: String,
    pub semester: String,
    pub level: String,
    pub status: String,
    #[serde(default)]
    pub source_key: Option<String>,
}

impl ResultRow {
    pub fn to_course_result(&self) -> Result<CourseResult, ParseError> {
        Ok(CourseResult {
            id: Uuid::new_v4(),
            grade: RecordedGrade::from(self.grade.as_str()),
            credit_unit: self.credit_unit,
            academic_year: self.academic_year.parse()?,
            semester: self.semester.parse()?,
            level: self.level.parse()?,
            course_code: self.course_code.trim().to_string(),
            status: self.status.trim().to_string(),
        })
    }
}

pub fn read_rows_csv(path: &Path) -> Result<Vec<ResultRow>, InputError> {
    let reader = csv::Reader::from_path(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    collect_rows(reader)
}

pub fn read_rows<R: Read>(input: R) -> Result<Vec<ResultRow>, InputError> {
    collect_rows(csv::Reader::from_reader(input))
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<ResultRow>, InputError> {
    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<ResultRow>().enumerate() {
        // Header is line 1.
        let row_number = index + 2;
        let row = record.map_err(|source| InputError::Csv {
            row: row_number,
            source,
        })?;
        if row.credit_unit == 0 {
            return Err(InputError::ZeroCreditUnit(row_number));
        }
        // Validate eagerly so a bad row is reported with its position.
        row.to_course_result().map_err(|source| InputError::Field {
            row: row_number,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Converts rows to results, optionally keeping only one student's rows.
pub fn results_for(rows: &[ResultRow], matric_number: Option<&str>) -> Vec<CourseResult> {
    rows.iter()
        .filter(|row| matric_number.map_or(true, |matric| row.matric_number == matric))
        .filter_map(|row| row.to_course_result().ok())
        .collect()
}
