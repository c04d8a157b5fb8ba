use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown grade symbol: {0}")]
    UnknownGrade(String),
    #[error("Unknown semester: {0} (expected FIRST or SECOND)")]
    UnknownSemester(String),
    #[error("Unknown level: {0} (expected LEVEL_100..LEVEL_500)")]
    UnknownLevel(String),
    #[error("Malformed academic year: {0} (expected YYYY/YYYY)")]
    MalformedAcademicYear(String),
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Malformed CSV at row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Invalid value at row {row}: {source}")]
    Field {
        row: usize,
        #[source]
        source: ParseError,
    },
    #[error("Credit unit must be positive at row {0}")]
    ZeroCreditUnit(usize),
}
