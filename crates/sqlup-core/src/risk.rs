//! High-risk keyword detection

use regex::{Regex, RegexBuilder};

/// Flags SQL text containing any configured keyword as a whole word,
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    pattern: Option<Regex>,
}

impl RiskClassifier {
    /// Build a classifier for `keywords`.
    ///
    /// An empty keyword list yields a classifier that never flags anything.
    /// Keywords are matched literally; regex metacharacters are escaped. The
    /// words of a multi-word keyword such as `drop table` may be separated by
    /// any run of whitespace.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| {
                k.as_ref()
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .filter(|k| !k.is_empty())
            .collect();

        if alternatives.is_empty() {
            return Self { pattern: None };
        }

        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
            .case_insensitive(true)
            .build()
            .expect("escaped keywords form a valid regex");

        Self {
            pattern: Some(pattern),
        }
    }

    /// Whether `sql` contains any keyword
    pub fn is_high_risk(&self, sql: &str) -> bool {
        self.find_keyword(sql).is_some()
    }

    /// First keyword occurrence in `sql`, as written in the text
    pub fn find_keyword<'a>(&self, sql: &'a str) -> Option<&'a str> {
        self.pattern
            .as_ref()
            .and_then(|re| re.find(sql))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_classifier() -> RiskClassifier {
        RiskClassifier::new(&["drop", "truncate", "delete"])
    }

    #[test]
    fn test_flags_drop_table() {
        assert!(default_classifier().is_high_risk("DROP TABLE foo;"));
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = default_classifier();
        assert!(classifier.is_high_risk("Truncate table foo"));
        assert!(classifier.is_high_risk("delete from foo where id = 1"));
    }

    #[test]
    fn test_whole_word_only() {
        let classifier = default_classifier();
        assert!(!classifier.is_high_risk("CREATE TABLE dropbox_files (id INT)"));
        assert!(!classifier.is_high_risk("ALTER TABLE t ADD COLUMN is_deleted BOOLEAN"));
        assert!(!classifier.is_high_risk("SELECT undrop FROM t"));
    }

    #[test]
    fn test_word_boundary_at_punctuation() {
        assert!(default_classifier().is_high_risk("SELECT 1;DROP TABLE t"));
    }

    #[test]
    fn test_find_keyword_returns_matched_text() {
        let classifier = default_classifier();
        assert_eq!(
            classifier.find_keyword("CREATE TABLE a (id INT);Delete FROM a;"),
            Some("Delete")
        );
        assert_eq!(classifier.find_keyword("SELECT 1"), None);
    }

    #[test]
    fn test_empty_keyword_list_never_flags() {
        let classifier = RiskClassifier::new::<&str>(&[]);
        assert!(!classifier.is_high_risk("DROP TABLE foo"));
    }

    #[test]
    fn test_multi_word_keyword() {
        let classifier = RiskClassifier::new(&["drop table"]);
        assert!(classifier.is_high_risk("DROP   TABLE users"));
        assert_eq!(
            classifier.find_keyword("select 1;drop table t"),
            Some("drop table")
        );
        assert!(!classifier.is_high_risk("DROP VIEW v"));
        assert!(!classifier.is_high_risk("DROP TABLESPACE ts"));
    }

    #[test]
    fn test_custom_keywords() {
        let classifier = RiskClassifier::new(&["alter".to_string()]);
        assert!(classifier.is_high_risk("ALTER TABLE t ADD COLUMN x INT"));
        assert!(!classifier.is_high_risk("DROP TABLE t"));
    }
}
