// Copyright (C) 2021-2026 The Tarn Team.
// This file is part of the Tarn library.

// The Tarn library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Tarn library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Tarn library. If not, see <https://www.gnu.org/licenses/>.

use super::*;

use chrono::{DateTime, SecondsFormat, Utc};
use num_rational::BigRational;

/// A literal value; the IR's notion of a *constant*.
///
/// Lists and structs of constants are constants themselves, so a literal is
/// already a fully-evaluated datum. `Rational` holds exact intermediate
/// results of constant arithmetic; the folder densifies integral rationals
/// back to `Integer` before they escape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// SQL NULL.
    Null,
    /// SQL MISSING; a value that is absent rather than unknown.
    Missing,
    /// A boolean, i.e. `TRUE` or `FALSE`.
    Bool(bool),
    /// A signed 64-bit integer, e.g. `42`.
    Integer(i64),
    /// An IEEE 754 double, e.g. `3.5`.
    Float(f64),
    /// An arbitrary-precision ratio produced by constant folding.
    Rational(BigRational),
    /// A UTF-8 string, e.g. `'fred'`.
    String(String),
    /// A point in calendar time with nanosecond precision.
    Timestamp(DateTime<Utc>),
    /// A list of constants, e.g. `[1, 'two']`.
    List(Vec<Literal>),
    /// An ordered sequence of labeled constants, e.g. `{'x': 1}`.
    Struct(Vec<(String, Literal)>),
}

impl Literal {
    /// Whether this is the NULL literal.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Whether this is the MISSING literal.
    pub fn is_missing(&self) -> bool {
        matches!(self, Literal::Missing)
    }

    /// Whether this literal is NULL or MISSING.
    pub fn is_absent(&self) -> bool {
        matches!(self, Literal::Null | Literal::Missing)
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The timestamp payload, if this is a timestamp.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Literal::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Missing => write!(f, "MISSING"),
            Literal::Bool(true) => write!(f, "TRUE"),
            Literal::Bool(false) => write!(f, "FALSE"),
            _ if redact => write!(f, "?"),
            Literal::Integer(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Timestamp(ts) => {
                write!(f, "`{}`", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Literal::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.text(f, redact)?;
                }
                write!(f, "]")
            }
            Literal::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (label, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': ", label.replace('\'', "''"))?;
                    value.text(f, redact)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Expression::Literal(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}
