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

use itertools::Itertools as _;

/// The first present, non-null entry, e.g. `COALESCE(t.x, 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoalesceExpression {
    /// The candidate expressions, in priority order.
    pub args: Vec<Expression>,
}

impl CoalesceExpression {
    pub fn new(args: Vec<Expression>) -> Self {
        CoalesceExpression { args }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "COALESCE(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            arg.text(f, redact)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for CoalesceExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "COALESCE({})", self.args.iter().format(", "))
    }
}

impl From<CoalesceExpression> for Expression {
    fn from(value: CoalesceExpression) -> Self {
        Expression::Coalesce(value)
    }
}
