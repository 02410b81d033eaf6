//! Attribute filters: `attribute OP value` predicates over nodes.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use graphlens_core::{DateFormat, Error, Result};
use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::value::{AttrValue, Timestamp};

/// Comparison applied by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 6] = [
        Self::Equal,
        Self::NotEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
        }
    }

    /// `(name, symbol)` pairs for building operator pickers.
    pub fn choices() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|op| (op.name(), op.symbol())).collect()
    }

    /// Decide the operator given how the attribute orders against the operand.
    ///
    /// An unordered pair (NaN) is only ever "not equal".
    pub fn holds(self, ordering: Option<Ordering>) -> bool {
        let Some(ord) = ordering else {
            return self == Self::NotEqual;
        };
        match self {
            Self::Equal => ord == Ordering::Equal,
            Self::NotEqual => ord != Ordering::Equal,
            Self::GreaterThan => ord == Ordering::Greater,
            Self::GreaterThanOrEqual => ord != Ordering::Less,
            Self::LessThan => ord == Ordering::Less,
            Self::LessThanOrEqual => ord != Ordering::Greater,
        }
    }
}

impl FromStr for FilterOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == s || op.name().eq_ignore_ascii_case(s))
            .or_else(|| (s == "==").then_some(Self::Equal))
            .ok_or_else(|| Error::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A node predicate built from an attribute, an operator and an operand.
///
/// The operand is kept as given and coerced to the attribute's kind at
/// evaluation time, so one filter works across nodes whose attribute types
/// differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    id: u64,
    attribute: String,
    operator: FilterOperator,
    value: AttrValue,
    #[serde(skip)]
    date_format: DateFormat,
}

impl Filter {
    pub fn new(
        id: u64,
        attribute: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<AttrValue>,
    ) -> Self {
        Self {
            id,
            attribute: attribute.into(),
            operator,
            value: value.into(),
            date_format: DateFormat::default(),
        }
    }

    /// Use `format` when reading the operand as a date.
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Evaluate against `node`.
    ///
    /// A node without the attribute never matches. An operand that cannot be
    /// read as the attribute's kind is an [`Error::Incomparable`].
    pub fn matches(&self, node: &Node) -> Result<bool> {
        let Some(attribute) = node.get(&self.attribute) else {
            return Ok(false);
        };
        let operand = self.coerce_to(attribute)?;
        Ok(self.operator.holds(attribute.compare(&operand)))
    }

    fn coerce_to(&self, target: &AttrValue) -> Result<AttrValue> {
        let coerced = match (target, &self.value) {
            (AttrValue::Str(_), AttrValue::Str(s)) => Some(AttrValue::Str(s.trim().to_string())),
            (AttrValue::Str(_), other) => Some(AttrValue::Str(other.to_string())),

            (AttrValue::Int(_) | AttrValue::Float(_), AttrValue::Str(s)) => parse_number(s.trim()),
            (AttrValue::Int(_) | AttrValue::Float(_), n @ (AttrValue::Int(_) | AttrValue::Float(_))) => {
                Some(n.clone())
            }

            (AttrValue::Timestamp(_), AttrValue::Str(s)) => {
                Timestamp::parse_with(s, self.date_format).map(AttrValue::Timestamp)
            }
            (AttrValue::Timestamp(_), t @ AttrValue::Timestamp(_)) => Some(t.clone()),

            _ => None,
        };

        coerced.ok_or_else(|| Error::Incomparable {
            attribute: target.kind().to_string(),
            value: self.value.kind().to_string(),
        })
    }
}

/// Integers stay integers; anything else numeric is read as a float.
fn parse_number(s: &str) -> Option<AttrValue> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(AttrValue::Int(i));
    }
    s.parse::<f64>().ok().map(AttrValue::Float)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.operator.name(), self.value)
    }
}
