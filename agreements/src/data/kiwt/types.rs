//! Filter expression type definitions
//!
//! Defines the nodes, comparators and boolean operators of the KIWT filter
//! expression grammar consumed by the agreements search endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Boolean operator joining two items of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BoolOp {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

impl BoolOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparator between a path and a value
///
/// Unary comparators (`isNull`, `isEmpty`, ...) take no value and are written
/// after the path separated by whitespace. Binary comparators are written
/// between the path and the value with no separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    NotEq,
    EqIgnoreCase,
    Like,
    NotLike,
    Gte,
    Lte,
    Gt,
    Lt,
    IsNull,
    IsNotNull,
    IsEmpty,
    IsNotEmpty,
    IsSet,
    IsNotSet,
}

impl Comparator {
    /// Binary comparators in match order (longest token first at a position)
    pub const BINARY: [Comparator; 9] = [
        Self::EqIgnoreCase,
        Self::Eq,
        Self::NotEq,
        Self::Like,
        Self::NotLike,
        Self::Gte,
        Self::Lte,
        Self::Gt,
        Self::Lt,
    ];

    pub const UNARY: [Comparator; 6] = [
        Self::IsNull,
        Self::IsNotNull,
        Self::IsEmpty,
        Self::IsNotEmpty,
        Self::IsSet,
        Self::IsNotSet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::EqIgnoreCase => "=i=",
            Self::Like => "=~",
            Self::NotLike => "!~",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
            Self::IsSet => "isSet",
            Self::IsNotSet => "isNotSet",
        }
    }

    pub fn is_unary(&self) -> bool {
        Self::UNARY.contains(self)
    }

    /// Look up a unary comparator keyword
    pub fn from_unary(keyword: &str) -> Option<Self> {
        Self::UNARY.into_iter().find(|c| c.as_str() == keyword)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomic `path comparator [value]` condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KiwtTerm {
    pub path: String,
    pub comparator: Comparator,
    /// Always `None` for unary comparators
    pub value: Option<String>,
}

impl KiwtTerm {
    pub fn unary(path: impl Into<String>, comparator: Comparator) -> Self {
        Self {
            path: path.into(),
            comparator,
            value: None,
        }
    }

    pub fn binary(path: impl Into<String>, comparator: Comparator, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            comparator,
            value: Some(value.into()),
        }
    }
}

/// One element of a parsed expression
///
/// A parsed sequence alternates items (terms or groups) at even positions
/// with operators at odd positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KiwtNode {
    Operator(BoolOp),
    Term(KiwtTerm),
    Group(Vec<KiwtNode>),
}
