//! Generated SQL queries and their syntactic validation.
//!
//! The backend is asked for bare SQL but often wraps it in a markdown code
//! fence. [`strip_code_fence`] removes one fence pair and one language tag,
//! then [`GeneratedQuery::from_response`] parses what is left. Queries are
//! never executed; the parse only proves the text is well-formed.

use crate::core::error::{QuerySynthesisError, QuerySynthesisFailure};
use serde::{Deserialize, Serialize};
use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect, GenericDialect, dialect_from_str};
use sqlparser::parser::Parser;

const FENCE: &str = "```";

/// Tags accepted after an opening fence even when the query starts on the
/// same line as the fence.
const SQL_LANGUAGE_TAGS: &[&str] = &[
    "sql",
    "ansi",
    "postgres",
    "postgresql",
    "psql",
    "mysql",
    "sqlite",
    "tsql",
    "plsql",
    "duckdb",
    "bigquery",
    "snowflake",
];

/// Keywords a statement can start with. A fenced query that puts one of
/// these alone on the first line has no language tag.
const STATEMENT_KEYWORDS: &[&str] = &[
    "select", "with", "insert", "update", "delete", "merge", "upsert", "replace", "create",
    "alter", "drop", "truncate", "explain", "describe", "desc", "show", "values", "table",
    "copy", "grant", "revoke", "begin", "commit", "rollback", "set", "use", "pragma",
];

/// SQL dialect used to validate generated queries (Value Object)
///
/// Stores the dialect name; any name understood by `sqlparser` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SqlDialect(String);

impl SqlDialect {
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into().trim().to_lowercase();
        if dialect_from_str(&name).is_some() {
            Ok(Self(name))
        } else {
            Err(format!("unknown SQL dialect: {}", name))
        }
    }

    pub fn generic() -> Self {
        Self("generic".to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn parser_dialect(&self) -> Box<dyn Dialect> {
        dialect_from_str(&self.0).unwrap_or_else(|| Box::new(GenericDialect {}))
    }
}

impl Default for SqlDialect {
    fn default() -> Self {
        Self::generic()
    }
}

impl TryFrom<String> for SqlDialect {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SqlDialect> for String {
    fn from(dialect: SqlDialect) -> Self {
        dialect.0
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remove one code-fence pair and one language tag from a backend response.
///
/// - An opening fence at the start and a closing fence at the end are each
///   removed once when present.
/// - The word right after the opening fence is a language tag when it is
///   a known SQL tag, or when it is alone on the fence line and cannot
///   start a statement.
/// - Text without a leading fence is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let Some(body) = text.strip_prefix(FENCE) else {
        return text.strip_suffix(FENCE).unwrap_or(text).trim();
    };
    let body = body.strip_suffix(FENCE).unwrap_or(body);
    strip_language_tag(body).trim()
}

fn strip_language_tag(body: &str) -> &str {
    let line_end = body.find('\n').unwrap_or(body.len());
    let first_line = &body[..line_end];
    if first_line.is_empty() || first_line.starts_with(char::is_whitespace) {
        return body;
    }

    let token_end = first_line
        .find(char::is_whitespace)
        .unwrap_or(first_line.len());
    let token = &first_line[..token_end];
    let alone_on_line = line_end < body.len() && first_line[token_end..].trim().is_empty();
    let known_tag = SQL_LANGUAGE_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(token));
    let starts_statement = STATEMENT_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(token));

    if known_tag || (alone_on_line && !starts_statement) {
        &body[token_end..]
    } else {
        body
    }
}

/// A syntactically valid SQL query produced by the backend (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuery {
    sql: String,
    statement_count: usize,
    read_only: bool,
}

impl GeneratedQuery {
    /// Clean and validate a raw backend response.
    pub fn from_response(raw: &str, dialect: &SqlDialect) -> Result<Self, QuerySynthesisError> {
        if raw.trim().is_empty() {
            return Err(QuerySynthesisError::new(raw, QuerySynthesisFailure::Empty));
        }
        Self::parse(strip_code_fence(raw), dialect)
    }

    /// Validate already-cleaned SQL text.
    pub fn parse(sql: &str, dialect: &SqlDialect) -> Result<Self, QuerySynthesisError> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(QuerySynthesisError::new(sql, QuerySynthesisFailure::Empty));
        }

        let statements = Parser::parse_sql(dialect.parser_dialect().as_ref(), sql).map_err(|e| {
            QuerySynthesisError::new(sql, QuerySynthesisFailure::Unparseable(e.to_string()))
        })?;
        if statements.is_empty() {
            return Err(QuerySynthesisError::new(
                sql,
                QuerySynthesisFailure::NoStatements,
            ));
        }

        Ok(Self {
            sql: sql.to_string(),
            statement_count: statements.len(),
            read_only: statements.iter().all(|s| matches!(s, Statement::Query(_))),
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn statement_count(&self) -> usize {
        self.statement_count
    }

    /// True when every statement is a query (SELECT / WITH ... SELECT)
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl std::fmt::Display for GeneratedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAX_QUERY: &str = "SELECT AVG(amount) FROM Tax WHERE is_paid = TRUE";

    #[test]
    fn test_strip_fenced_block_with_tag() {
        let raw = format!("```sql\n{}\n```", TAX_QUERY);
        assert_eq!(strip_code_fence(&raw), TAX_QUERY);
    }

    #[test]
    fn test_strip_fence_without_tag() {
        let raw = format!("```\n{}\n```", TAX_QUERY);
        assert_eq!(strip_code_fence(&raw), TAX_QUERY);
    }

    #[test]
    fn test_strip_single_line_fence() {
        assert_eq!(strip_code_fence("```sql SELECT 1```"), "SELECT 1");
        assert_eq!(strip_code_fence("```SELECT 1```"), "SELECT 1");
    }

    #[test]
    fn test_strip_unknown_tag_alone_on_line() {
        assert_eq!(strip_code_fence("```text\nSELECT 1\n```"), "SELECT 1");
    }

    #[test]
    fn test_leading_keyword_alone_on_line_is_kept() {
        let raw = "```SELECT\n    AVG(amount)\nFROM Tax\n```";
        assert_eq!(strip_code_fence(raw), "SELECT\n    AVG(amount)\nFROM Tax");

        let query = GeneratedQuery::from_response(raw, &SqlDialect::generic()).unwrap();
        assert_eq!(query.statement_count(), 1);
    }

    #[test]
    fn test_leading_with_alone_on_line_is_kept() {
        let raw = "```WITH\nt AS (SELECT amount FROM Tax)\nSELECT AVG(amount) FROM t\n```";
        let query = GeneratedQuery::from_response(raw, &SqlDialect::generic()).unwrap();
        assert!(query.sql().starts_with("WITH\nt AS"));
        assert!(query.is_read_only());
    }

    #[test]
    fn test_tag_before_keyword_line_is_still_removed() {
        let raw = "```sql\nSELECT\n    AVG(amount)\nFROM Tax\n```";
        assert_eq!(strip_code_fence(raw), "SELECT\n    AVG(amount)\nFROM Tax");
    }

    #[test]
    fn test_plain_text_is_only_trimmed() {
        assert_eq!(strip_code_fence("  SELECT 1  \n"), "SELECT 1");
    }

    #[test]
    fn test_only_one_fence_pair_removed() {
        let raw = "```sql\nSELECT 1\n```\n```sql\nSELECT 2\n```";
        let stripped = strip_code_fence(raw);
        assert!(stripped.starts_with("SELECT 1"));
        assert!(stripped.contains("```"));
    }

    #[test]
    fn test_identifiers_containing_sql_survive() {
        let raw = "```sql\nSELECT sql_text FROM mysql_log\n```";
        assert_eq!(strip_code_fence(raw), "SELECT sql_text FROM mysql_log");
    }

    #[test]
    fn test_from_response_accepts_fenced_query() {
        let raw = format!("```sql\n{};\n```", TAX_QUERY);
        let query = GeneratedQuery::from_response(&raw, &SqlDialect::generic()).unwrap();
        assert_eq!(query.sql(), format!("{};", TAX_QUERY));
        assert_eq!(query.statement_count(), 1);
        assert!(query.is_read_only());
    }

    #[test]
    fn test_from_response_empty_fails() {
        let err = GeneratedQuery::from_response("", &SqlDialect::generic()).unwrap_err();
        assert_eq!(err.failure(), &QuerySynthesisFailure::Empty);

        let err = GeneratedQuery::from_response("```sql\n```", &SqlDialect::generic()).unwrap_err();
        assert_eq!(err.failure(), &QuerySynthesisFailure::Empty);
    }

    #[test]
    fn test_prose_fails_to_parse() {
        let err = GeneratedQuery::from_response(
            "Here is the query you asked for",
            &SqlDialect::generic(),
        )
        .unwrap_err();
        assert!(matches!(err.failure(), QuerySynthesisFailure::Unparseable(_)));
        assert_eq!(err.raw(), "Here is the query you asked for");
    }

    #[test]
    fn test_bare_token_fails() {
        let err = GeneratedQuery::parse("revenue", &SqlDialect::generic()).unwrap_err();
        assert!(matches!(err.failure(), QuerySynthesisFailure::Unparseable(_)));
    }

    #[test]
    fn test_lone_semicolon_has_no_statements() {
        let err = GeneratedQuery::parse(";", &SqlDialect::generic()).unwrap_err();
        assert_eq!(err.failure(), &QuerySynthesisFailure::NoStatements);
    }

    #[test]
    fn test_non_query_statement_is_not_read_only() {
        let query = GeneratedQuery::parse("DELETE FROM Tax", &SqlDialect::generic()).unwrap();
        assert!(!query.is_read_only());
    }

    #[test]
    fn test_dialect_names() {
        assert_eq!(SqlDialect::new("PostgreSQL").unwrap().name(), "postgresql");
        assert!(SqlDialect::new("mysql").is_ok());
        assert!(SqlDialect::new("cobol").is_err());
        assert_eq!(SqlDialect::default(), SqlDialect::generic());
    }
}
