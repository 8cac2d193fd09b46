//! Grok pattern generation for fixed-width records.

use regex::Regex;
use serde_json::{json, Value};

use super::spec::ColumnSpec;
use crate::errors::PatternError;

/// Sub-pattern name prefix for generated column patterns.
const PATTERN_PREFIX: &str = "GET";

/// Catch-all reference closing every generated format.
pub const CATCH_ALL: &str = "%{GREEDYDATA:extras}";

/// A composed Grok pattern for one fixed-width record layout.
///
/// Holds the line-matching format referencing one generated sub-pattern per
/// column, plus the definitions of those sub-patterns. Both halves are
/// handed to the parsing engine as configuration strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrokPattern {
    log_format: String,
    patterns: Vec<(String, String)>,
}

impl GrokPattern {
    /// Returns the composed line-matching format.
    #[must_use]
    pub fn log_format(&self) -> &str {
        &self.log_format
    }

    /// Returns the generated name → regex pairs, one per column in input
    /// order.
    #[must_use]
    pub fn patterns(&self) -> &[(String, String)] {
        &self.patterns
    }

    /// Returns the regex for a generated sub-pattern name.
    #[must_use]
    pub fn pattern_for(&self, name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(pattern_name, _)| pattern_name == name)
            .map(|(_, regex)| regex.as_str())
    }

    /// Renders the newline-terminated custom pattern definitions.
    #[must_use]
    pub fn custom_patterns(&self) -> String {
        self.patterns
            .iter()
            .map(|(name, regex)| format!("{name} {regex}\n"))
            .collect()
    }

    /// Renders the format options handed to the parsing engine.
    #[must_use]
    pub fn format_options(&self) -> Value {
        json!({
            "logFormat": self.log_format,
            "customPatterns": self.custom_patterns(),
        })
    }
}

/// Builds the Grok pattern for an ordered column list.
///
/// Each column contributes a `%{GET<NAME>:<NAME>}` reference to the format
/// and a `GET<NAME> ([^*]{<len>})` definition to the pattern map; a
/// `GREEDYDATA` catch-all closes the format. Construction failures are
/// logged and returned, never swallowed.
pub fn build_pattern(columns: &[ColumnSpec]) -> Result<GrokPattern, PatternError> {
    build(columns).map_err(|err| {
        tracing::error!(error = %err, "fixed-width pattern construction failed");
        err
    })
}

fn build(columns: &[ColumnSpec]) -> Result<GrokPattern, PatternError> {
    if columns.is_empty() {
        return Err(PatternError::EmptySpec);
    }

    let mut log_format = String::new();
    let mut patterns: Vec<(String, String)> = Vec::with_capacity(columns.len());

    for (index, column) in columns.iter().enumerate() {
        if column.name.is_empty() {
            return Err(PatternError::EmptyName { index });
        }
        if !column
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(PatternError::InvalidName {
                name: column.name.clone(),
            });
        }
        if column.len == 0 {
            return Err(PatternError::ZeroWidth {
                name: column.name.clone(),
            });
        }

        let pattern_name = format!("{PATTERN_PREFIX}{}", column.name);
        if patterns.iter().any(|(existing, _)| *existing == pattern_name) {
            return Err(PatternError::DuplicateName {
                name: column.name.clone(),
            });
        }

        let regex = format!("([^*]{{{}}})", column.len);
        Regex::new(&regex).map_err(|err| PatternError::Regex {
            name: column.name.clone(),
            reason: err.to_string(),
        })?;

        log_format.push_str(&format!("%{{{pattern_name}:{}}}", column.name));
        patterns.push((pattern_name, regex));
    }

    log_format.push_str(CATCH_ALL);

    Ok(GrokPattern {
        log_format,
        patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_columns() -> Vec<ColumnSpec> {
        vec![ColumnSpec::new("ID", 5), ColumnSpec::new("NAME", 8)]
    }

    #[test]
    fn test_build_pattern_two_columns() {
        let pattern = build_pattern(&two_columns()).expect("build");

        assert_eq!(
            pattern.log_format(),
            "%{GETID:ID}%{GETNAME:NAME}%{GREEDYDATA:extras}"
        );
        assert_eq!(
            pattern.patterns(),
            &[
                ("GETID".to_string(), "([^*]{5})".to_string()),
                ("GETNAME".to_string(), "([^*]{8})".to_string()),
            ]
        );
    }

    #[test]
    fn test_custom_patterns_rendering() {
        let pattern = build_pattern(&two_columns()).expect("build");
        assert_eq!(
            pattern.custom_patterns(),
            "GETID ([^*]{5})\nGETNAME ([^*]{8})\n"
        );
    }

    #[test]
    fn test_format_options_shape() {
        let pattern = build_pattern(&two_columns()).expect("build");
        let options = pattern.format_options();

        assert_eq!(
            options["logFormat"],
            "%{GETID:ID}%{GETNAME:NAME}%{GREEDYDATA:extras}"
        );
        assert_eq!(options["customPatterns"], "GETID ([^*]{5})\nGETNAME ([^*]{8})\n");
    }

    #[test]
    fn test_generated_width_is_exact() {
        let pattern = build_pattern(&two_columns()).expect("build");
        let id_regex = Regex::new(&format!("^{}$", pattern.pattern_for("GETID").expect("GETID")))
            .expect("compile");

        assert!(id_regex.is_match("ABCDE"));
        assert!(!id_regex.is_match("ABCD"));
        assert!(!id_regex.is_match("ABCDEF"));
        assert!(!id_regex.is_match("AB*DE"));
    }

    #[test]
    fn test_column_order_drives_pattern_order() {
        let columns = vec![
            ColumnSpec::new("DOB", 10),
            ColumnSpec::new("EMPID", 5),
            ColumnSpec::new("COMPANY", 7),
        ];
        let pattern = build_pattern(&columns).expect("build");

        assert_eq!(
            pattern.log_format(),
            "%{GETDOB:DOB}%{GETEMPID:EMPID}%{GETCOMPANY:COMPANY}%{GREEDYDATA:extras}"
        );
    }

    #[test]
    fn test_offsets_do_not_affect_pattern() {
        let with_offsets = vec![ColumnSpec::new("ID", 5).with_offsets(3, 9)];
        let without = vec![ColumnSpec::new("ID", 5)];

        assert_eq!(
            build_pattern(&with_offsets).expect("build"),
            build_pattern(&without).expect("build")
        );
    }

    #[test]
    fn test_empty_spec_rejected() {
        let err = build_pattern(&[]).expect_err("should fail");
        assert!(matches!(err, PatternError::EmptySpec));
    }

    #[test]
    fn test_empty_name_rejected() {
        let columns = vec![ColumnSpec::new("ID", 5), ColumnSpec::new("", 3)];
        let err = build_pattern(&columns).expect_err("should fail");
        assert!(matches!(err, PatternError::EmptyName { index: 1 }));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let columns = vec![ColumnSpec::new("BAD NAME", 5)];
        let err = build_pattern(&columns).expect_err("should fail");
        assert!(matches!(err, PatternError::InvalidName { .. }));
    }

    #[test]
    fn test_zero_width_rejected() {
        let columns = vec![ColumnSpec::new("ID", 0)];
        let err = build_pattern(&columns).expect_err("should fail");
        assert!(matches!(err, PatternError::ZeroWidth { .. }));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let columns = vec![ColumnSpec::new("ID", 5), ColumnSpec::new("ID", 8)];
        let err = build_pattern(&columns).expect_err("should fail");
        assert!(matches!(err, PatternError::DuplicateName { .. }));
    }
}
