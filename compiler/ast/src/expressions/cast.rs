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

use crate::TypeSet;

/// A conversion, e.g. `CAST(x AS {int,uint})`.
///
/// A value that cannot be converted to the target set becomes MISSING at
/// runtime rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpression {
    /// The expression being converted.
    pub operand: Box<Expression>,
    /// The target type set.
    pub target: TypeSet,
}

impl CastExpression {
    pub fn new(operand: Expression, target: TypeSet) -> Self {
        CastExpression { operand: Box::new(operand), target }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "CAST(")?;
        self.operand.text(f, redact)?;
        write!(f, " AS {})", self.target)
    }
}

impl fmt::Display for CastExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<CastExpression> for Expression {
    fn from(value: CastExpression) -> Self {
        Expression::Cast(value)
    }
}
