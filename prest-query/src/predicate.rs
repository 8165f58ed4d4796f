//! Predicate constructors.
//!
//! One function per operator. Each returns a rendered [`Query`] whose
//! column and value have been escaped.
//!
//! ```rust
//! use prest_query::predicate::{and, eq, in_list, is, lt, not};
//!
//! assert_eq!(eq("a", "b").to_string(), "a=eq.b");
//! assert_eq!(in_list("a", [1, 2, 3]).to_string(), "a=in.(1,2,3)");
//! assert_eq!(and([eq("a", "b"), lt("c", "d")]).to_string(), "and=(a.eq.b,c.lt.d)");
//! assert_eq!(not(eq("a", "b")).to_string(), "a=not.eq.b");
//! assert_eq!(is("a", None).to_string(), "a=is.null");
//! ```

use crate::filter::{Comparison, FilterValue, Predicate, Query};

fn compare(cmp: Comparison, column: &str, value: impl Into<FilterValue>) -> Query {
    Predicate::Compare(cmp, column.to_string(), value.into()).to_query()
}

/// `column = value`
#[inline]
pub fn eq(column: &str, value: impl Into<FilterValue>) -> Query {
    compare(Comparison::Eq, column, value)
}

/// `column <> value`
#[inline]
pub fn neq(column: &str, value: impl Into<FilterValue>) -> Query {
    compare(Comparison::Neq, column, value)
}

/// `column < value`
#[inline]
pub fn lt(column: &str, value: impl Into<FilterValue>) -> Query {
    compare(Comparison::Lt, column, value)
}

/// `column > value`
#[inline]
pub fn gt(column: &str, value: impl Into<FilterValue>) -> Query {
    compare(Comparison::Gt, column, value)
}

/// `column <= value`
#[inline]
pub fn lte(column: &str, value: impl Into<FilterValue>) -> Query {
    compare(Comparison::Lte, column, value)
}

/// `column >= value`
#[inline]
pub fn gte(column: &str, value: impl Into<FilterValue>) -> Query {
    compare(Comparison::Gte, column, value)
}

/// `column LIKE pattern`
///
/// PostgREST accepts `*` as an alias for `%` in patterns.
#[inline]
pub fn like(column: &str, pattern: impl Into<FilterValue>) -> Query {
    compare(Comparison::Like, column, pattern)
}

/// `column ILIKE pattern`
#[inline]
pub fn ilike(column: &str, pattern: impl Into<FilterValue>) -> Query {
    compare(Comparison::Ilike, column, pattern)
}

/// `column IN (values...)`
pub fn in_list<V: Into<FilterValue>>(column: &str, values: impl IntoIterator<Item = V>) -> Query {
    Predicate::In(
        column.to_string(),
        values.into_iter().map(Into::into).collect(),
    )
    .to_query()
}

/// `column IS NULL | TRUE | FALSE`
///
/// Accepts a plain `bool` or an `Option<bool>`; `None` means `IS NULL`.
pub fn is(column: &str, value: impl Into<Option<bool>>) -> Query {
    Predicate::Is(column.to_string(), value.into()).to_query()
}

/// Negate a query.
///
/// The negation wraps the already-serialized value: `not(eq("a", "b"))`
/// becomes `a=not.eq.b`.
pub fn not(query: Query) -> Query {
    Predicate::Not(query).to_query()
}

/// Group queries so that all of them must hold.
pub fn and(queries: impl IntoIterator<Item = Query>) -> Query {
    Predicate::And(queries.into_iter().collect()).to_query()
}

/// Group queries so that at least one of them must hold.
pub fn or(queries: impl IntoIterator<Item = Query>) -> Query {
    Predicate::Or(queries.into_iter().collect()).to_query()
}
