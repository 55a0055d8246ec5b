//! Tagged statement representation.
//!
//! A parsed statement is already bound: every predicate and assignment
//! carries the zero-based index into the caller's parameter list that the
//! translator will consult. Which binding rule produced that index depends
//! on the statement kind — see `parser::bind_by_position` and
//! `parser::bind_by_digit`.

/// Statement kind, as decided by the ordered keyword scan in
/// [`super::parser::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Select,
    Update,
    Delete,
    Unrecognized,
}

/// A fully matched statement, ready for translation into one table-store
/// call. `Unrecognized` covers both texts with no recognized keyword and
/// texts whose keyword matched but whose structure did not.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(InsertStatement),
    Select(SelectStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Unrecognized,
}

impl Statement {
    /// A statement is valid only with a non-empty table identifier, so every
    /// non-`Unrecognized` variant exposes one.
    pub fn table(&self) -> Option<&str> {
        match self {
            Statement::Insert(s) => Some(&s.table),
            Statement::Select(s) => Some(&s.table),
            Statement::Update(s) => Some(&s.table),
            Statement::Delete(s) => Some(&s.table),
            Statement::Unrecognized => None,
        }
    }
}

/// `INSERT INTO <table> (<columns>) VALUES`. Values never appear inline;
/// they arrive through the parameter list and are zipped to columns by
/// position at translation time.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: String,
    pub columns: Vec<String>,
}

/// `SELECT ... FROM <table> [WHERE ...]`. Predicates are position-bound.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub table: String,
    pub predicates: Vec<Predicate>,
}

/// `UPDATE <table> SET <assignments> WHERE ...`. Assignments are
/// position-bound; the WHERE clause is digit-bound.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: String,
    pub assignments: Vec<Assignment>,
    pub where_clause: WhereClause,
}

/// `DELETE FROM <table> WHERE ...`. The WHERE clause is digit-bound.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: String,
    pub where_clause: WhereClause,
}

/// One equality condition: `column = params[param]`. `param` is the
/// zero-based index into the caller's parameter list, already resolved by
/// whichever binding rule the enclosing statement kind uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub param: usize,
}

/// One SET assignment: `column = params[param]`, position-bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub param: usize,
}

/// The WHERE clause of an UPDATE or DELETE.
///
/// The full predicate list is retained so the limitation stays visible,
/// but translation only ever consults [`WhereClause::first`]: additional
/// AND-joined predicates are accepted syntactically and then ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause {
    predicates: Vec<Predicate>,
}

impl WhereClause {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// The only predicate translation honors.
    pub fn first(&self) -> Option<&Predicate> {
        self.predicates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }
}
