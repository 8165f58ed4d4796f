//! Fuzz target for predicate construction.
//!
//! Generates arbitrary predicate trees and checks that caller data never
//! leaks structural characters into the rendered query.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_predicate_construction
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use prest_query::filter::{FilterValue, Query};
use prest_query::predicate;

#[derive(Debug, Arbitrary, Clone)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<FuzzValue> for FilterValue {
    fn from(val: FuzzValue) -> Self {
        match val {
            FuzzValue::Null => FilterValue::Null,
            FuzzValue::Bool(b) => FilterValue::Bool(b),
            FuzzValue::Int(i) => FilterValue::Int(i),
            FuzzValue::Float(f) => FilterValue::Float(f),
            FuzzValue::String(s) => FilterValue::String(s),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum FuzzPredicate {
    Eq(String, FuzzValue),
    Neq(String, FuzzValue),
    Lt(String, FuzzValue),
    Gte(String, FuzzValue),
    Like(String, String),
    In(String, Vec<FuzzValue>),
    Is(String, Option<bool>),
    Not(Box<FuzzPredicate>),
    And(Vec<FuzzPredicate>),
    Or(Vec<FuzzPredicate>),
}

impl FuzzPredicate {
    fn to_query(self, depth: usize) -> Query {
        // Bound recursion
        if depth > 8 {
            return predicate::is("depth", None);
        }

        match self {
            Self::Eq(c, v) => predicate::eq(&c, v),
            Self::Neq(c, v) => predicate::neq(&c, v),
            Self::Lt(c, v) => predicate::lt(&c, v),
            Self::Gte(c, v) => predicate::gte(&c, v),
            Self::Like(c, p) => predicate::like(&c, p),
            Self::In(c, vs) => predicate::in_list(&c, vs),
            Self::Is(c, v) => predicate::is(&c, v),
            Self::Not(inner) => predicate::not(inner.to_query(depth + 1)),
            Self::And(inner) => predicate::and(inner.into_iter().map(|p| p.to_query(depth + 1))),
            Self::Or(inner) => predicate::or(inner.into_iter().map(|p| p.to_query(depth + 1))),
        }
    }
}

fuzz_target!(|input: FuzzPredicate| {
    let query = input.to_query(0);

    // The wire form never contains a raw `&`, `=` or `#`.
    let value = query.value();
    assert!(!value.contains('&'));
    assert!(!value.contains('='));
    assert!(!value.contains('#'));

    // Parentheses stay balanced in grouped values.
    let mut depth = 0i64;
    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);

    let _ = query.to_string();
});
