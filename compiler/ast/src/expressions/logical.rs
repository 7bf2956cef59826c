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

/// A binary logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperation {
    /// Conjunction, i.e. `AND`.
    And,
    /// Disjunction, i.e. `OR`.
    Or,
    /// Exclusive or, i.e. `XOR`; also boolean inequality.
    Xor,
    /// Negated exclusive or, i.e. `XNOR`; also boolean equality.
    Xnor,
}

impl LogicalOperation {
    /// The operator computing the boolean negation of this one, where one
    /// exists without rewriting the operands.
    pub fn inverse(&self) -> Option<Self> {
        match self {
            Self::Xor => Some(Self::Xnor),
            Self::Xnor => Some(Self::Xor),
            Self::And | Self::Or => None,
        }
    }
}

impl fmt::Display for LogicalOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Xnor => "XNOR",
        })
    }
}

/// A binary logical expression, e.g. `a AND b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalExpression {
    /// The operator.
    pub op: LogicalOperation,
    /// The left operand.
    pub left: Box<Expression>,
    /// The right operand.
    pub right: Box<Expression>,
}

impl LogicalExpression {
    pub fn new(op: LogicalOperation, left: Expression, right: Expression) -> Self {
        LogicalExpression { op, left: Box::new(left), right: Box::new(right) }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "(")?;
        self.left.text(f, redact)?;
        write!(f, " {} ", self.op)?;
        self.right.text(f, redact)?;
        write!(f, ")")
    }
}

impl fmt::Display for LogicalExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<LogicalExpression> for Expression {
    fn from(value: LogicalExpression) -> Self {
        Expression::Logical(value)
    }
}

/// Logical negation, e.g. `NOT a`.
///
/// `NOT` maps NULL and MISSING to MISSING; it is not a plain boolean flip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotExpression {
    /// The operand being negated.
    pub operand: Box<Expression>,
}

impl NotExpression {
    pub fn new(operand: Expression) -> Self {
        NotExpression { operand: Box::new(operand) }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "NOT ")?;
        self.operand.text(f, redact)
    }
}

impl fmt::Display for NotExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<NotExpression> for Expression {
    fn from(value: NotExpression) -> Self {
        Expression::Not(value)
    }
}
