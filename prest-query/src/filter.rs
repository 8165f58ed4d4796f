//! Filter types for building PostgREST query strings.
//!
//! A [`Predicate`] is a structured filter expression; rendering it yields a
//! [`Query`], the `(column, encoded value)` pair that becomes one
//! query-string parameter. The free functions in [`crate::predicate`] build
//! and render predicates in one step and are the usual entry point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::escape::escape;

/// A filter value that can be placed on the right-hand side of an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// JSON value.
    Json(serde_json::Value),
    /// List of values, rendered as a PostgreSQL array literal.
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Escaped wire form of this value.
    pub fn encode(&self) -> String {
        escape(&self.to_string())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Json(serde_json::Value::String(v)) => f.write_str(v),
            Self::Json(v) => write!(f, "{}", v),
            Self::List(values) => {
                f.write_str("{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<&String> for FilterValue {
    fn from(v: &String) -> Self {
        Self::String(v.clone())
    }
}

impl From<serde_json::Value> for FilterValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Operator codes understood by PostgREST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equals.
    Eq,
    /// Not equals.
    Neq,
    /// Less than.
    Lt,
    /// Greater than.
    Gt,
    /// Less than or equal.
    Lte,
    /// Greater than or equal.
    Gte,
    /// Case-sensitive pattern match.
    Like,
    /// Case-insensitive pattern match.
    Ilike,
    /// Membership in a list.
    In,
    /// Tri-state `IS` check (null, true, false).
    Is,
    /// Negation prefix.
    Not,
    /// Logical conjunction of a group.
    And,
    /// Logical disjunction of a group.
    Or,
}

impl Operator {
    /// Get the operator code as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Gte => "gte",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::In => "in",
            Self::Is => "is",
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Whether this operator combines other queries into a group.
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary comparison operators: column + single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `eq`
    Eq,
    /// `neq`
    Neq,
    /// `lt`
    Lt,
    /// `gt`
    Gt,
    /// `lte`
    Lte,
    /// `gte`
    Gte,
    /// `like`
    Like,
    /// `ilike`
    Ilike,
}

impl Comparison {
    /// The operator this comparison renders as.
    pub fn operator(&self) -> Operator {
        match self {
            Self::Eq => Operator::Eq,
            Self::Neq => Operator::Neq,
            Self::Lt => Operator::Lt,
            Self::Gt => Operator::Gt,
            Self::Lte => Operator::Lte,
            Self::Gte => Operator::Gte,
            Self::Like => Operator::Like,
            Self::Ilike => Operator::Ilike,
        }
    }
}

/// One fully-formed filter fragment, ready to become a query parameter.
///
/// Both parts are already escaped. A `Query` can only be produced by the
/// predicate algebra, which is what guarantees that the structural
/// characters it contains were put there on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    column: String,
    value: String,
    group: bool,
}

impl Query {
    pub(crate) fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            group: false,
        }
    }

    fn grouped(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            group: true,
        }
    }

    /// The query-string key.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The encoded query-string value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this query is an `and`/`or` group (possibly negated).
    pub fn is_group(&self) -> bool {
        self.group
    }

    /// Split into the `(key, value)` query parameter.
    pub fn into_param(self) -> (String, String) {
        (self.column, self.value)
    }

    /// Form used when this query is nested inside an `and`/`or` group.
    ///
    /// Plain filters nest as `col.op.value`; groups nest as `and(...)` or
    /// `not.and(...)`.
    pub fn sub_expression(&self) -> String {
        if self.group {
            format!("{}{}", self.column, self.value)
        } else {
            format!("{}.{}", self.column, self.value)
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.value)
    }
}

/// A structured filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Binary comparison of a column against a value.
    Compare(Comparison, String, FilterValue),
    /// Column value is one of the listed values.
    In(String, Vec<FilterValue>),
    /// Tri-state check: `None` is `IS NULL`.
    Is(String, Option<bool>),
    /// Negation of an already rendered query.
    Not(Query),
    /// All of the queries hold.
    And(Vec<Query>),
    /// Any of the queries holds.
    Or(Vec<Query>),
}

impl Predicate {
    /// The operator at the root of this predicate.
    pub fn operator(&self) -> Operator {
        match self {
            Self::Compare(cmp, _, _) => cmp.operator(),
            Self::In(_, _) => Operator::In,
            Self::Is(_, _) => Operator::Is,
            Self::Not(_) => Operator::Not,
            Self::And(_) => Operator::And,
            Self::Or(_) => Operator::Or,
        }
    }

    /// Render to a wire-ready query.
    pub fn to_query(&self) -> Query {
        match self {
            Self::Compare(cmp, column, value) => Query::new(
                escape(column),
                format!("{}.{}", cmp.operator(), value.encode()),
            ),
            Self::In(column, values) => {
                let list: Vec<String> = values.iter().map(FilterValue::encode).collect();
                Query::new(
                    escape(column),
                    format!("{}.({})", Operator::In, list.join(",")),
                )
            }
            Self::Is(column, value) => {
                let state = match value {
                    None => "null",
                    Some(true) => "true",
                    Some(false) => "false",
                };
                Query::new(escape(column), format!("{}.{}", Operator::Is, state))
            }
            Self::Not(query) if query.group => Query::grouped(
                format!("{}.{}", Operator::Not, query.column),
                query.value.clone(),
            ),
            Self::Not(query) => Query::new(
                query.column.clone(),
                format!("{}.{}", Operator::Not, query.value),
            ),
            Self::And(queries) => group(Operator::And, queries),
            Self::Or(queries) => group(Operator::Or, queries),
        }
    }
}

fn group(operator: Operator, queries: &[Query]) -> Query {
    let parts: Vec<String> = queries.iter().map(Query::sub_expression).collect();
    Query::grouped(operator.as_str(), format!("({})", parts.join(",")))
}

impl From<Predicate> for Query {
    fn from(predicate: Predicate) -> Self {
        predicate.to_query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_display() {
        assert_eq!(FilterValue::Null.to_string(), "null");
        assert_eq!(FilterValue::from(true).to_string(), "true");
        assert_eq!(FilterValue::from(42).to_string(), "42");
        assert_eq!(FilterValue::from(2.5).to_string(), "2.5");
        assert_eq!(FilterValue::from("x").to_string(), "x");
        assert_eq!(FilterValue::from(vec![1, 2]).to_string(), "{1,2}");
        assert_eq!(
            FilterValue::from(serde_json::json!({"a": 1})).to_string(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<i32> = None;
        assert!(FilterValue::from(none).is_null());
        assert_eq!(FilterValue::from(Some(3)), FilterValue::Int(3));
    }

    #[test]
    fn test_compare_escapes_column_and_value() {
        let query = Predicate::Compare(Comparison::Eq, "first name".into(), "a,b".into()).to_query();
        assert_eq!(query.column(), "first%20name");
        assert_eq!(query.value(), "eq.a%2Cb");
    }

    #[test]
    fn test_float_dot_is_escaped() {
        let query = Predicate::Compare(Comparison::Gt, "price".into(), 2.5.into()).to_query();
        assert_eq!(query.value(), "gt.2%2E5");
    }

    #[test]
    fn test_operator_of_predicate() {
        assert_eq!(Predicate::Is("a".into(), None).operator(), Operator::Is);
        assert_eq!(Predicate::And(vec![]).operator(), Operator::And);
        assert!(Operator::Or.is_logical());
        assert!(!Operator::Eq.is_logical());
    }

    #[test]
    fn test_empty_group() {
        let query = Predicate::Or(vec![]).to_query();
        assert_eq!(query.to_string(), "or=()");
    }

    #[test]
    fn test_query_display_and_param() {
        let query = Predicate::Is("deleted".into(), Some(false)).to_query();
        assert_eq!(query.to_string(), "deleted=is.false");
        assert_eq!(
            query.into_param(),
            ("deleted".to_string(), "is.false".to_string())
        );
    }
}
