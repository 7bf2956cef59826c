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

/// A comparison operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperation {
    /// Equality, i.e. `=`.
    Equals,
    /// Inequality, i.e. `<>`.
    NotEquals,
    /// Strictly less, i.e. `<`.
    Less,
    /// Less or equal, i.e. `<=`.
    LessEquals,
    /// Strictly greater, i.e. `>`.
    Greater,
    /// Greater or equal, i.e. `>=`.
    GreaterEquals,
    /// SQL pattern match, i.e. `LIKE`; `%` and `_` are wildcards.
    Like,
    /// Case-insensitive pattern match, i.e. `ILIKE`.
    Ilike,
}

impl ComparisonOperation {
    /// The operator with its operands swapped: `a < b` iff `b > a`.
    ///
    /// Pattern matches have no mirror because the pattern must stay on the
    /// right.
    pub fn mirror(&self) -> Option<Self> {
        Some(match self {
            Self::Equals => Self::Equals,
            Self::NotEquals => Self::NotEquals,
            Self::Less => Self::Greater,
            Self::LessEquals => Self::GreaterEquals,
            Self::Greater => Self::Less,
            Self::GreaterEquals => Self::LessEquals,
            Self::Like | Self::Ilike => return None,
        })
    }

    /// The operator whose result is the boolean negation of this one, where
    /// one exists with identical NULL/MISSING behavior.
    pub fn inverse(&self) -> Option<Self> {
        Some(match self {
            Self::Equals => Self::NotEquals,
            Self::NotEquals => Self::Equals,
            Self::Less => Self::GreaterEquals,
            Self::LessEquals => Self::Greater,
            Self::Greater => Self::LessEquals,
            Self::GreaterEquals => Self::Less,
            Self::Like | Self::Ilike => return None,
        })
    }

    /// Whether this operator orders its operands rather than just testing
    /// equality or a pattern.
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Less | Self::LessEquals | Self::Greater | Self::GreaterEquals)
    }
}

impl fmt::Display for ComparisonOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::Less => "<",
            Self::LessEquals => "<=",
            Self::Greater => ">",
            Self::GreaterEquals => ">=",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
        })
    }
}

/// A comparison expression, e.g. `x >= 3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonExpression {
    /// The operator.
    pub op: ComparisonOperation,
    /// The left operand.
    pub left: Box<Expression>,
    /// The right operand.
    pub right: Box<Expression>,
}

impl ComparisonExpression {
    pub fn new(op: ComparisonOperation, left: Expression, right: Expression) -> Self {
        ComparisonExpression { op, left: Box::new(left), right: Box::new(right) }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "(")?;
        self.left.text(f, redact)?;
        write!(f, " {} ", self.op)?;
        self.right.text(f, redact)?;
        write!(f, ")")
    }
}

impl fmt::Display for ComparisonExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<ComparisonExpression> for Expression {
    fn from(value: ComparisonExpression) -> Self {
        Expression::Comparison(value)
    }
}
