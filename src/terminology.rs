//! Institutional abbreviations used on result sheets and dashboards.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Term {
    pub abbreviation: &'static str,
    pub meaning: &'static str,
}

pub const TERMINOLOGY: [Term; 6] = [
    Term {
        abbreviation: "SCT",
        meaning: "Semesterial Course Taken",
    },
    Term {
        abbreviation: "SGP",
        meaning: "Semesterial Grade Point",
    },
    Term {
        abbreviation: "TCT",
        meaning: "Total Course Taken",
    },
    Term {
        abbreviation: "CGP",
        meaning: "Cumulative Grade Point",
    },
    Term {
        abbreviation: "GPA",
        meaning: "Grade Point Average",
    },
    Term {
        abbreviation: "CGPA",
        meaning: "Cumulative Grade Point Average",
    },
];

pub fn lookup_term(abbreviation: &str) -> Option<&'static str> {
    TERMINOLOGY
        .iter()
        .find(|term| term.abbreviation.eq_ignore_ascii_case(abbreviation.trim()))
        .map(|term| term.meaning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_terms_case_insensitively() {
        assert_eq!(lookup_term("sct"), Some("Semesterial Course Taken"));
        assert_eq!(lookup_term("CGPA"), Some("Cumulative Grade Point Average"));
        assert_eq!(lookup_term("XYZ"), None);
    }
}
