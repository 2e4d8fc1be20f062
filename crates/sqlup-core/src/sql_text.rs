//! Comment stripping and statement splitting for migration files
//!
//! This is pattern-based text processing, not a SQL parser: a `;`, `--` or
//! `/*` inside a string literal is treated exactly like one outside it.
//! Existing migration files rely on that behaviour, so it is kept as is.

use regex::Regex;
use std::sync::OnceLock;

/// Statement delimiter
pub const STATEMENT_DELIMITER: char = ';';

static BLOCK_COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static LINE_COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static LINE_BREAK_RE: OnceLock<Regex> = OnceLock::new();

/// `/* ... */`, non-greedy, may span lines
fn block_comment_re() -> &'static Regex {
    BLOCK_COMMENT_RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex literal"))
}

/// `-- ...` up to (not including) the line break, plus the whitespace before it
fn line_comment_re() -> &'static Regex {
    LINE_COMMENT_RE.get_or_init(|| Regex::new(r"\s*--[^\n]*").expect("valid regex literal"))
}

/// A line break and any whitespace after it
fn line_break_re() -> &'static Regex {
    LINE_BREAK_RE.get_or_init(|| Regex::new(r"[\r\n]\s*").expect("valid regex literal"))
}

/// Normalize raw migration file text into a single SQL blob.
///
/// Steps, in order:
/// 1. remove block comments
/// 2. remove line comments, keeping the line break that ends them
/// 3. remove every line break together with the whitespace following it
/// 4. trim
///
/// Line breaks are removed, not replaced by a space: a statement that relies
/// on a bare newline to separate two tokens gets them joined.
///
/// # Examples
/// ```
/// use sqlup_core::sql_text::normalize;
/// assert_eq!(normalize("SELECT 1; -- one\nSELECT 2;"), "SELECT 1;SELECT 2;");
/// ```
pub fn normalize(raw: &str) -> String {
    let sql = block_comment_re().replace_all(raw, "");
    let sql = line_comment_re().replace_all(&sql, "");
    let sql = line_break_re().replace_all(&sql, "");
    sql.trim().to_string()
}

/// Split normalized SQL into statements on `;`.
///
/// Statement text is returned untrimmed; pieces that are empty or
/// whitespace-only are dropped.
///
/// # Examples
/// ```
/// use sqlup_core::sql_text::split_statements;
/// assert_eq!(split_statements(";;SELECT 1;;"), vec!["SELECT 1"]);
/// ```
pub fn split_statements(normalized: &str) -> Vec<&str> {
    normalized
        .split(STATEMENT_DELIMITER)
        .filter(|stmt| !stmt.trim().is_empty())
        .collect()
}

#[cfg(test)]
#[path = "sql_text_test.rs"]
mod tests;
