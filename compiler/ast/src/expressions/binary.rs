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

/// A binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperation {
    /// Addition, i.e. `+`.
    Add,
    /// Subtraction, i.e. `-`.
    Sub,
    /// Multiplication, i.e. `*`.
    Mul,
    /// Division, i.e. `/`; MISSING on a zero divisor.
    Div,
    /// Modulus, i.e. `%`; MISSING on a zero divisor.
    Mod,
    /// Bitwise AND, i.e. `&`.
    BitAnd,
    /// Bitwise OR, i.e. `|`.
    BitOr,
    /// Bitwise XOR, i.e. `^`.
    BitXor,
    /// Shift left, i.e. `<<`.
    Shl,
    /// Sign-replicating (arithmetic) shift right, i.e. `>>`.
    SraShr,
    /// Zero-filling (logical) shift right, i.e. `>>>`.
    SrlShr,
}

impl BinaryOperation {
    /// Whether operands can be swapped without changing the result.
    pub fn is_commutative(&self) -> bool {
        matches!(
            self,
            BinaryOperation::Add
                | BinaryOperation::Mul
                | BinaryOperation::BitAnd
                | BinaryOperation::BitOr
                | BinaryOperation::BitXor
        )
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::SraShr => ">>",
            Self::SrlShr => ">>>",
        })
    }
}

/// A binary arithmetic expression, e.g. `x + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    /// The operator.
    pub op: BinaryOperation,
    /// The left operand.
    pub left: Box<Expression>,
    /// The right operand.
    pub right: Box<Expression>,
}

impl BinaryExpression {
    pub fn new(op: BinaryOperation, left: Expression, right: Expression) -> Self {
        BinaryExpression { op, left: Box::new(left), right: Box::new(right) }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "(")?;
        self.left.text(f, redact)?;
        write!(f, " {} ", self.op)?;
        self.right.text(f, redact)?;
        write!(f, ")")
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<BinaryExpression> for Expression {
    fn from(value: BinaryExpression) -> Self {
        Expression::Binary(value)
    }
}
