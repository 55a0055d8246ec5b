//! Statement classification and matching.
//!
//! Classification is an ordered substring scan over the raw text; the
//! per-kind matchers then walk the token stream and either produce a fully
//! bound [`Statement`] or give up. A failed match is not an error here —
//! the caller treats it exactly like an unrecognized statement.
//!
//! Two parameter-binding rules coexist on purpose, because callers depend
//! on the observable behavior of both:
//!
//! - [`bind_by_position`] — SELECT predicates and UPDATE assignments bind
//!   to the parameter at the fragment's position within its clause. The
//!   digits of the `$n` placeholder are matched and then ignored.
//! - [`bind_by_digit`] — UPDATE and DELETE WHERE filters bind to
//!   `params[n - 1]`, honoring the placeholder digits.
//!
//! Do not unify these without confirming every caller first.

use super::token::{tokenize, Token};
use super::types::*;

/// Bucket raw statement text into a [`StatementKind`].
///
/// The tests run in a fixed order and the first hit wins: a statement
/// containing both `INSERT` and `SELECT` anywhere in its text (including
/// inside identifiers or string literals) classifies as Insert. There is no
/// error case; `Unrecognized` is a legitimate terminal answer.
pub fn classify(text: &str) -> StatementKind {
    let upper = text.to_uppercase();
    if upper.contains("INSERT") {
        StatementKind::Insert
    } else if upper.contains("SELECT") {
        StatementKind::Select
    } else if upper.contains("UPDATE") {
        StatementKind::Update
    } else if upper.contains("DELETE") {
        StatementKind::Delete
    } else {
        StatementKind::Unrecognized
    }
}

/// Parse statement text into a bound [`Statement`].
///
/// A text whose classification keyword is present but whose structure does
/// not match the expected shape collapses to `Statement::Unrecognized`,
/// same as a text with no keyword at all.
pub fn parse_statement(text: &str) -> Statement {
    let tokens = tokenize(text);
    match classify(text) {
        StatementKind::Insert => parse_insert(&tokens)
            .map(Statement::Insert)
            .unwrap_or(Statement::Unrecognized),
        StatementKind::Select => parse_select(&tokens)
            .map(Statement::Select)
            .unwrap_or(Statement::Unrecognized),
        StatementKind::Update => parse_update(&tokens)
            .map(Statement::Update)
            .unwrap_or(Statement::Unrecognized),
        StatementKind::Delete => parse_delete(&tokens)
            .map(Statement::Delete)
            .unwrap_or(Statement::Unrecognized),
        StatementKind::Unrecognized => Statement::Unrecognized,
    }
}

/// Positional binding: the fragment at clause position `i` reads
/// `params[i]`, whatever digits its placeholder carried.
pub fn bind_by_position(position: usize) -> usize {
    position
}

/// Digit binding: a `$n` placeholder reads `params[n - 1]`. `$0` has no
/// zero-based index and yields `None`.
pub fn bind_by_digit(digit: usize) -> Option<usize> {
    digit.checked_sub(1)
}

/// Forward-only walk over a token slice.
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Consume the next token if it is the given keyword.
    fn eat_kw(&mut self, kw: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_kw(kw)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the next token if it equals `tok`.
    fn eat(&mut self, tok: &Token) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Advance past the first occurrence of the keyword. On a miss the
    /// cursor is exhausted.
    fn seek_kw(&mut self, kw: &str) -> bool {
        while let Some(tok) = self.peek() {
            self.pos += 1;
            if tok.is_kw(kw) {
                return true;
            }
        }
        false
    }

    /// Consume an identifier token.
    fn ident(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::Ident(s)) => {
                self.pos += 1;
                Some(s.clone())
            }
            _ => None,
        }
    }

    /// Everything not yet consumed.
    fn rest(&self) -> &'a [Token] {
        &self.tokens[self.pos..]
    }
}

/// `INSERT INTO <table> ( <col> [, <col>]* ) VALUES`
fn parse_insert(tokens: &[Token]) -> Option<InsertStatement> {
    let mut cur = Cursor::new(tokens);
    if !cur.seek_kw("INSERT") || !cur.eat_kw("INTO") {
        return None;
    }
    let table = cur.ident()?;
    if !cur.eat(&Token::LParen) {
        return None;
    }
    let mut columns = vec![cur.ident()?];
    loop {
        if cur.eat(&Token::RParen) {
            break;
        }
        if !cur.eat(&Token::Comma) {
            return None;
        }
        columns.push(cur.ident()?);
    }
    if !cur.eat_kw("VALUES") {
        return None;
    }
    Some(InsertStatement { table, columns })
}

/// `... FROM <table> [WHERE <cond> [AND <cond>]* [ORDER ...|LIMIT ...]]`
///
/// ORDER and LIMIT terminate the WHERE span but are otherwise ignored: the
/// resulting statement carries no ordering or row limit, and the backend
/// call will not either.
fn parse_select(tokens: &[Token]) -> Option<SelectStatement> {
    let mut cur = Cursor::new(tokens);
    if !cur.seek_kw("FROM") {
        return None;
    }
    let table = cur.ident()?;

    let mut predicates = Vec::new();
    if cur.seek_kw("WHERE") {
        for (position, fragment) in split_conditions(cur.rest()).into_iter().enumerate() {
            // Unmatched fragments are skipped but still consume their
            // position in the clause.
            if let Some((column, _digit)) = match_equality(fragment) {
                predicates.push(Predicate {
                    column,
                    param: bind_by_position(position),
                });
            }
        }
    }
    Some(SelectStatement { table, predicates })
}

/// `UPDATE <table> SET <col> = $n [, <col> = $n]* WHERE <cond> ...`
///
/// Both SET and WHERE are mandatory; without either the statement is
/// unmatched.
fn parse_update(tokens: &[Token]) -> Option<UpdateStatement> {
    let mut cur = Cursor::new(tokens);
    if !cur.seek_kw("UPDATE") {
        return None;
    }
    let table = cur.ident()?;
    if !cur.eat_kw("SET") {
        return None;
    }

    let rest = cur.rest();
    let where_at = rest.iter().position(|t| t.is_kw("WHERE"))?;
    let (set_span, where_span) = (&rest[..where_at], &rest[where_at + 1..]);

    let mut assignments = Vec::new();
    for (position, fragment) in split_on(set_span, |t| *t == Token::Comma)
        .into_iter()
        .enumerate()
    {
        if let Some((column, _digit)) = match_equality(fragment) {
            assignments.push(Assignment {
                column,
                param: bind_by_position(position),
            });
        }
    }

    Some(UpdateStatement {
        table,
        assignments,
        where_clause: parse_where(where_span),
    })
}

/// `DELETE FROM <table> WHERE <cond> ...`
fn parse_delete(tokens: &[Token]) -> Option<DeleteStatement> {
    let mut cur = Cursor::new(tokens);
    if !cur.seek_kw("DELETE") || !cur.eat_kw("FROM") {
        return None;
    }
    let table = cur.ident()?;
    if !cur.seek_kw("WHERE") {
        return None;
    }
    Some(DeleteStatement {
        table,
        where_clause: parse_where(cur.rest()),
    })
}

/// Digit-bound WHERE clause for UPDATE and DELETE.
///
/// Only the first shape-matching predicate will ever be consulted. If that
/// predicate's placeholder is `$0` the clause is unusable as a whole —
/// later predicates do not get promoted into its place.
fn parse_where(span: &[Token]) -> WhereClause {
    let mut predicates = Vec::new();
    for fragment in split_conditions(span) {
        let Some((column, digit)) = match_equality(fragment) else {
            continue;
        };
        match bind_by_digit(digit) {
            Some(param) => predicates.push(Predicate { column, param }),
            None if predicates.is_empty() => return WhereClause::default(),
            None => {}
        }
    }
    WhereClause::new(predicates)
}

/// Split a WHERE span into condition fragments on the `AND` keyword,
/// stopping at `ORDER` or `LIMIT` or end-of-span.
fn split_conditions(span: &[Token]) -> Vec<&[Token]> {
    let end = span
        .iter()
        .position(|t| t.is_kw("ORDER") || t.is_kw("LIMIT"))
        .unwrap_or(span.len());
    split_on(&span[..end], |t| t.is_kw("AND"))
}

/// Split a token slice on a separator. An empty input yields no fragments;
/// otherwise separators delimit fragments even when those are empty.
fn split_on<'a>(span: &'a [Token], sep: impl Fn(&Token) -> bool) -> Vec<&'a [Token]> {
    if span.is_empty() {
        return Vec::new();
    }
    let mut fragments = Vec::new();
    let mut start = 0;
    for (i, tok) in span.iter().enumerate() {
        if sep(tok) {
            fragments.push(&span[start..i]);
            start = i + 1;
        }
    }
    fragments.push(&span[start..]);
    fragments
}

/// Match a fragment of exactly the shape `<identifier> = $<digits>`,
/// returning the column name and the raw placeholder digits.
fn match_equality(fragment: &[Token]) -> Option<(String, usize)> {
    match fragment {
        [Token::Ident(column), Token::Eq, Token::Param(digit)] => {
            Some((column.clone(), *digit))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- classify ---

    #[test]
    fn test_classify_order_insert_first() {
        // Both keywords present: INSERT wins because it is tested first.
        assert_eq!(
            classify("INSERT INTO t (a) VALUES -- via SELECT"),
            StatementKind::Insert
        );
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify("select * from t"), StatementKind::Select);
        assert_eq!(classify("Update t Set a = $1 Where b = $2"), StatementKind::Update);
    }

    #[test]
    fn test_classify_substring_quirk() {
        // "inserts" contains INSERT; the scan is substring-based on purpose.
        assert_eq!(classify("SELECT * FROM inserts"), StatementKind::Insert);
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(
            classify("EXPLAIN ANALYZE something"),
            StatementKind::Unrecognized
        );
        assert_eq!(classify(""), StatementKind::Unrecognized);
    }

    // --- binding rules ---

    #[test]
    fn test_bind_by_position_is_identity() {
        assert_eq!(bind_by_position(0), 0);
        assert_eq!(bind_by_position(7), 7);
    }

    #[test]
    fn test_bind_by_digit_is_one_indexed() {
        assert_eq!(bind_by_digit(1), Some(0));
        assert_eq!(bind_by_digit(4), Some(3));
        assert_eq!(bind_by_digit(0), None);
    }

    // --- insert ---

    #[test]
    fn test_parse_insert() {
        let s = parse_statement("INSERT INTO contacts (name, email, phone) VALUES ($1, $2, $3)");
        match s {
            Statement::Insert(i) => {
                assert_eq!(i.table, "contacts");
                assert_eq!(i.columns, vec!["name", "email", "phone"]);
            }
            _ => panic!("Expected Insert statement"),
        }
    }

    #[test]
    fn test_parse_insert_whitespace_variations() {
        let s = parse_statement("insert into t(a,b)values($1,$2)");
        match s {
            Statement::Insert(i) => {
                assert_eq!(i.table, "t");
                assert_eq!(i.columns, vec!["a", "b"]);
            }
            _ => panic!("Expected Insert statement"),
        }
    }

    #[test]
    fn test_parse_insert_malformed_is_unrecognized() {
        // Missing column list: keyword matched, structure did not.
        assert_eq!(
            parse_statement("INSERT INTO t VALUES ($1)"),
            Statement::Unrecognized
        );
        // Missing VALUES.
        assert_eq!(
            parse_statement("INSERT INTO t (a, b)"),
            Statement::Unrecognized
        );
        // Empty column list.
        assert_eq!(
            parse_statement("INSERT INTO t () VALUES"),
            Statement::Unrecognized
        );
    }

    #[test]
    fn test_parse_select_named_like_insert_is_unrecognized() {
        // Classified Insert by substring, then fails the Insert shape.
        assert_eq!(
            parse_statement("SELECT * FROM inserts"),
            Statement::Unrecognized
        );
    }

    // --- select ---

    #[test]
    fn test_parse_select_no_where() {
        let s = parse_statement("SELECT * FROM agents");
        match s {
            Statement::Select(sel) => {
                assert_eq!(sel.table, "agents");
                assert!(sel.predicates.is_empty());
            }
            _ => panic!("Expected Select statement"),
        }
    }

    #[test]
    fn test_parse_select_binds_by_position_not_digit() {
        let s = parse_statement("SELECT * FROM t WHERE b = $2 AND a = $1");
        match s {
            Statement::Select(sel) => {
                assert_eq!(sel.predicates.len(), 2);
                // First fragment reads params[0] even though it says $2.
                assert_eq!(sel.predicates[0].column, "b");
                assert_eq!(sel.predicates[0].param, 0);
                assert_eq!(sel.predicates[1].column, "a");
                assert_eq!(sel.predicates[1].param, 1);
            }
            _ => panic!("Expected Select statement"),
        }
    }

    #[test]
    fn test_parse_select_skipped_fragment_keeps_position() {
        // The first fragment fails the shape; the second still binds to
        // position 1.
        let s = parse_statement("SELECT * FROM t WHERE a > $1 AND b = $2");
        match s {
            Statement::Select(sel) => {
                assert_eq!(sel.predicates.len(), 1);
                assert_eq!(sel.predicates[0].column, "b");
                assert_eq!(sel.predicates[0].param, 1);
            }
            _ => panic!("Expected Select statement"),
        }
    }

    #[test]
    fn test_parse_select_order_limit_terminate_where() {
        let s = parse_statement(
            "SELECT * FROM t WHERE a = $1 ORDER BY created_at LIMIT 10",
        );
        match s {
            Statement::Select(sel) => {
                assert_eq!(sel.predicates.len(), 1);
                assert_eq!(sel.predicates[0].column, "a");
            }
            _ => panic!("Expected Select statement"),
        }
    }

    #[test]
    fn test_parse_select_limit_without_where() {
        let s = parse_statement("SELECT * FROM t ORDER BY created_at LIMIT 10");
        match s {
            Statement::Select(sel) => {
                assert_eq!(sel.table, "t");
                assert!(sel.predicates.is_empty());
            }
            _ => panic!("Expected Select statement"),
        }
    }

    #[test]
    fn test_parse_select_missing_from_is_unrecognized() {
        assert_eq!(parse_statement("SELECT 1"), Statement::Unrecognized);
        assert_eq!(parse_statement("SELECT * FROM"), Statement::Unrecognized);
    }

    // --- update ---

    #[test]
    fn test_parse_update_dual_binding() {
        let s = parse_statement("UPDATE t SET x = $1, y = $2 WHERE id = $3");
        match s {
            Statement::Update(u) => {
                assert_eq!(u.table, "t");
                // Assignments bind by position...
                assert_eq!(u.assignments.len(), 2);
                assert_eq!(u.assignments[0].column, "x");
                assert_eq!(u.assignments[0].param, 0);
                assert_eq!(u.assignments[1].column, "y");
                assert_eq!(u.assignments[1].param, 1);
                // ...while the WHERE filter binds by its digit.
                let pred = u.where_clause.first().unwrap();
                assert_eq!(pred.column, "id");
                assert_eq!(pred.param, 2);
            }
            _ => panic!("Expected Update statement"),
        }
    }

    #[test]
    fn test_parse_update_assignment_digits_ignored() {
        let s = parse_statement("UPDATE t SET x = $9 WHERE id = $2");
        match s {
            Statement::Update(u) => {
                // $9 notwithstanding, the first assignment reads params[0].
                assert_eq!(u.assignments[0].param, 0);
                assert_eq!(u.where_clause.first().unwrap().param, 1);
            }
            _ => panic!("Expected Update statement"),
        }
    }

    #[test]
    fn test_parse_update_extra_where_predicates_carried_not_honored() {
        let s = parse_statement("UPDATE t SET x = $1 WHERE id = $2 AND org = $3");
        match s {
            Statement::Update(u) => {
                assert_eq!(u.where_clause.len(), 2);
                assert_eq!(u.where_clause.first().unwrap().column, "id");
            }
            _ => panic!("Expected Update statement"),
        }
    }

    #[test]
    fn test_parse_update_requires_set_and_where() {
        assert_eq!(
            parse_statement("UPDATE t SET x = $1"),
            Statement::Unrecognized
        );
        assert_eq!(
            parse_statement("UPDATE t WHERE id = $1"),
            Statement::Unrecognized
        );
    }

    #[test]
    fn test_parse_update_dollar_zero_where_unusable() {
        // $0 has no zero-based index; the clause as a whole is unusable and
        // the later predicate does not take its place.
        let s = parse_statement("UPDATE t SET x = $1 WHERE id = $0 AND org = $2");
        match s {
            Statement::Update(u) => assert!(u.where_clause.is_empty()),
            _ => panic!("Expected Update statement"),
        }
    }

    // --- delete ---

    #[test]
    fn test_parse_delete() {
        let s = parse_statement("DELETE FROM sessions WHERE id = $1");
        match s {
            Statement::Delete(d) => {
                assert_eq!(d.table, "sessions");
                let pred = d.where_clause.first().unwrap();
                assert_eq!(pred.column, "id");
                assert_eq!(pred.param, 0);
            }
            _ => panic!("Expected Delete statement"),
        }
    }

    #[test]
    fn test_parse_delete_requires_where() {
        assert_eq!(
            parse_statement("DELETE FROM sessions"),
            Statement::Unrecognized
        );
    }

    #[test]
    fn test_parse_delete_unmatched_predicate_gives_empty_clause() {
        let s = parse_statement("DELETE FROM t WHERE id > $1");
        match s {
            Statement::Delete(d) => assert!(d.where_clause.is_empty()),
            _ => panic!("Expected Delete statement"),
        }
    }

    // --- fallback ---

    #[test]
    fn test_parse_unrecognized_text() {
        assert_eq!(
            parse_statement("EXPLAIN ANALYZE whatever"),
            Statement::Unrecognized
        );
    }
}
