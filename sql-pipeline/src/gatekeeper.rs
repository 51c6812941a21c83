//! SELECT-only gatekeeper.
//!
//! A textual allow-list: lowercase, left-trim, split on whitespace, and the
//! first token must equal `select` exactly. It does not parse SQL, does not
//! catch a stacked statement after a leading SELECT (`select 1; drop ...`),
//! and does not look inside comments. Callers treat a rejection as data to
//! report back, not as a server error.

use thiserror::Error;

/// A statement the gatekeeper refused, carrying the original-case text for
/// diagnostic display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Only SELECT queries are allowed.")]
pub struct RejectedStatement {
    /// The generated text exactly as it arrived (case preserved).
    pub sql: String,
}

/// Authorizes `sql` for execution.
///
/// Returns the statement unchanged when its first whitespace-delimited token
/// is `select` (case-insensitive, leading whitespace ignored).
///
/// # Errors
/// [`RejectedStatement`] for any other leading token, including the empty
/// string.
pub fn authorize(sql: String) -> Result<String, RejectedStatement> {
    let first = sql
        .to_lowercase()
        .trim_start()
        .split_whitespace()
        .next()
        .map(str::to_owned);

    match first.as_deref() {
        Some("select") => Ok(sql),
        _ => Err(RejectedStatement { sql }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_select() {
        let sql = "SELECT * FROM orders".to_string();
        assert_eq!(authorize(sql.clone()).unwrap(), sql);
    }

    #[test]
    fn accepts_lowercase_with_leading_whitespace() {
        let sql = "  \n\tselect count(*) AS total FROM orders".to_string();
        // Case and whitespace are preserved in the returned text.
        assert_eq!(authorize(sql.clone()).unwrap(), sql);
    }

    #[test]
    fn accepts_mixed_case() {
        assert!(authorize("SeLeCt 1".to_string()).is_ok());
    }

    #[test]
    fn rejects_mutating_statements() {
        for sql in [
            "INSERT INTO orders VALUES (1)",
            "update orders set price = 0",
            "DELETE FROM orders",
            "DROP TABLE orders;",
            "TRUNCATE orders",
        ] {
            let err = authorize(sql.to_string()).unwrap_err();
            assert_eq!(err.sql, sql, "original text must be echoed back");
        }
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(authorize(String::new()).is_err());
        assert!(authorize("   \n ".to_string()).is_err());
    }

    #[test]
    fn rejects_statement_not_starting_with_select() {
        // A stacked payload whose *first* token is not select.
        let err = authorize("; DROP TABLE orders; SELECT 1".to_string()).unwrap_err();
        assert!(err.sql.contains("DROP TABLE"));
    }

    #[test]
    fn select_prefix_must_be_a_whole_token() {
        // "selection" is not "select".
        assert!(authorize("selection FROM orders".to_string()).is_err());
    }
}
