use super::*;

#[test]
fn test_normalize_strips_line_and_block_comments() {
    let raw = "SELECT 1; -- comment\n/* block\ncomment */ SELECT 2;";
    let normalized = normalize(raw);

    assert!(!normalized.contains("comment"));
    assert!(!normalized.contains("--"));
    assert!(!normalized.contains("/*"));
    assert_eq!(split_statements(&normalized), vec!["SELECT 1", "SELECT 2"]);
}

#[test]
fn test_normalize_block_comment_is_non_greedy() {
    let raw = "/* a */SELECT 1;/* b */SELECT 2;";
    assert_eq!(normalize(raw), "SELECT 1;SELECT 2;");
}

#[test]
fn test_normalize_collapses_multiline_statement() {
    let raw = "CREATE TABLE t (\n    id INT,\n    name VARCHAR\n);\n";
    assert_eq!(normalize(raw), "CREATE TABLE t (id INT,name VARCHAR);");
}

#[test]
fn test_normalize_keeps_whitespace_before_line_break() {
    let raw = "SELECT a \nFROM t;";
    assert_eq!(normalize(raw), "SELECT a FROM t;");
}

#[test]
fn test_normalize_joins_tokens_split_only_by_newline() {
    // Known limitation: the line break is dropped, not replaced by a space.
    let raw = "SELECT a\nFROM t;";
    assert_eq!(normalize(raw), "SELECT aFROM t;");
}

#[test]
fn test_normalize_line_comment_at_end_of_input() {
    assert_eq!(normalize("SELECT 1; -- trailing"), "SELECT 1;");
}

#[test]
fn test_normalize_whole_line_comments() {
    let raw = "-- header\n-- another\nCREATE TABLE a (id INT);\n";
    assert_eq!(normalize(raw), "CREATE TABLE a (id INT);");
}

#[test]
fn test_normalize_crlf_line_endings() {
    let raw = "SELECT 1; -- c\r\nSELECT 2;\r\n";
    assert_eq!(normalize(raw), "SELECT 1;SELECT 2;");
}

#[test]
fn test_normalize_trims_result() {
    assert_eq!(normalize("   SELECT 1;   "), "SELECT 1;");
}

#[test]
fn test_normalize_comment_only_file_is_empty() {
    let raw = "/* nothing\n   to do */\n-- really\n";
    assert_eq!(normalize(raw), "");
    assert!(split_statements(&normalize(raw)).is_empty());
}

#[test]
fn test_normalize_does_not_protect_string_literals() {
    // Known limitation: comment markers inside literals are stripped too.
    assert_eq!(normalize("SELECT '--x';"), "SELECT '");
}

#[test]
fn test_split_drops_empty_statements() {
    assert_eq!(split_statements(";;SELECT 1;;"), vec!["SELECT 1"]);
}

#[test]
fn test_split_drops_whitespace_only_statements() {
    assert_eq!(
        split_statements("SELECT 1;   ;SELECT 2"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_split_preserves_order_and_text() {
    assert_eq!(
        split_statements("SELECT 1; SELECT 2;SELECT 3"),
        vec!["SELECT 1", " SELECT 2", "SELECT 3"]
    );
}

#[test]
fn test_split_empty_input() {
    assert!(split_statements("").is_empty());
}

#[test]
fn test_split_semicolon_inside_literal_is_not_protected() {
    assert_eq!(
        split_statements("INSERT INTO t VALUES ('a;b')"),
        vec!["INSERT INTO t VALUES ('a", "b')"]
    );
}
