//! Shorthand macros for building filters.
//!
//! ```rust
//! use prest_query::{and, or, query};
//!
//! let q = or!(
//!     query!(status == "pending"),
//!     and!(query!(age >= 18), query!(verified is true)),
//! );
//! assert_eq!(q.to_string(), "or=(status.eq.pending,and(age.gte.18,verified.is.true))");
//! ```

/// Build a single filter from a comparison written inline.
///
/// # Syntax
///
/// - `query!(column == value)`, `!=`, `>`, `>=`, `<`, `<=`
/// - `query!(column like pattern)`, `query!(column ilike pattern)`
/// - `query!(column is null)`, `is true`, `is false`
/// - `query!(column in [v1, v2, ...])`
#[macro_export]
macro_rules! query {
    ($column:ident == $value:expr) => {
        $crate::predicate::eq(stringify!($column), $value)
    };
    ($column:ident != $value:expr) => {
        $crate::predicate::neq(stringify!($column), $value)
    };
    ($column:ident > $value:expr) => {
        $crate::predicate::gt(stringify!($column), $value)
    };
    ($column:ident >= $value:expr) => {
        $crate::predicate::gte(stringify!($column), $value)
    };
    ($column:ident < $value:expr) => {
        $crate::predicate::lt(stringify!($column), $value)
    };
    ($column:ident <= $value:expr) => {
        $crate::predicate::lte(stringify!($column), $value)
    };
    ($column:ident like $value:expr) => {
        $crate::predicate::like(stringify!($column), $value)
    };
    ($column:ident ilike $value:expr) => {
        $crate::predicate::ilike(stringify!($column), $value)
    };
    ($column:ident is null) => {
        $crate::predicate::is(stringify!($column), None)
    };
    ($column:ident is true) => {
        $crate::predicate::is(stringify!($column), Some(true))
    };
    ($column:ident is false) => {
        $crate::predicate::is(stringify!($column), Some(false))
    };
    ($column:ident in [$($value:expr),* $(,)?]) => {
        $crate::predicate::in_list(
            stringify!($column),
            ::std::vec![$($crate::filter::FilterValue::from($value)),*],
        )
    };
}

/// Combine any number of filters with `AND`.
#[macro_export]
macro_rules! and {
    () => {
        $crate::predicate::and(::std::iter::empty::<$crate::filter::Query>())
    };
    ($($query:expr),+ $(,)?) => {
        $crate::predicate::and([$($query),+])
    };
}

/// Combine any number of filters with `OR`.
#[macro_export]
macro_rules! or {
    () => {
        $crate::predicate::or(::std::iter::empty::<$crate::filter::Query>())
    };
    ($($query:expr),+ $(,)?) => {
        $crate::predicate::or([$($query),+])
    };
}
