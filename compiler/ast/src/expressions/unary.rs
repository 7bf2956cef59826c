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

/// A unary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperation {
    /// Numeric negation, i.e. `-x`.
    Negate,
}

/// A unary arithmetic expression, e.g. `-x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    /// The operator.
    pub op: UnaryOperation,
    /// The operand.
    pub operand: Box<Expression>,
}

impl UnaryExpression {
    pub fn negate(operand: Expression) -> Self {
        UnaryExpression { op: UnaryOperation::Negate, operand: Box::new(operand) }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        match self.op {
            UnaryOperation::Negate => write!(f, "-")?,
        }
        self.operand.text(f, redact)
    }
}

impl fmt::Display for UnaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<UnaryExpression> for Expression {
    fn from(value: UnaryExpression) -> Self {
        Expression::Unary(value)
    }
}
