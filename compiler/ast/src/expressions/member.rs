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

/// A membership test against a literal set, e.g. `x IN (1, 2, 3)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpression {
    /// The expression being searched for.
    pub operand: Box<Expression>,
    /// The candidate values; always constants.
    pub values: Vec<Literal>,
}

impl MemberExpression {
    pub fn new(operand: Expression, values: Vec<Literal>) -> Self {
        MemberExpression { operand: Box::new(operand), values }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        self.operand.text(f, redact)?;
        write!(f, " IN (")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            value.text(f, redact)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for MemberExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<MemberExpression> for Expression {
    fn from(value: MemberExpression) -> Self {
        Expression::Member(value)
    }
}
