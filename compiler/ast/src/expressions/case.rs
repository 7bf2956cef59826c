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

/// An advisory tag describing how a CASE's result is consumed.
///
/// `Logical` marks a CASE whose result is only ever tested against IS TRUE,
/// which licenses the stronger logical-context rewrites.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Valence {
    /// The result is used as a value.
    #[default]
    Value,
    /// The result is used as a predicate.
    Logical,
}

/// One `WHEN … THEN …` arm of a CASE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseLimb {
    /// The predicate deciding whether this limb is taken.
    pub when: Expression,
    /// The limb's result.
    pub then: Expression,
}

/// A searched CASE, e.g. `CASE WHEN a THEN 1 ELSE 2 END`.
///
/// A CASE that falls through every limb with no ELSE yields NULL; a CASE
/// with no limbs and no ELSE is equivalent to the NULL literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpression {
    /// The `WHEN`/`THEN` arms, in order.
    pub limbs: Vec<CaseLimb>,
    /// The `ELSE` arm, if present.
    pub otherwise: Option<Box<Expression>>,
    /// How the result is consumed.
    pub valence: Valence,
}

impl CaseExpression {
    pub fn new(
        limbs: Vec<CaseLimb>,
        otherwise: Option<Expression>,
        valence: Valence,
    ) -> Self {
        CaseExpression { limbs, otherwise: otherwise.map(Box::new), valence }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "CASE")?;
        for limb in &self.limbs {
            write!(f, " WHEN ")?;
            limb.when.text(f, redact)?;
            write!(f, " THEN ")?;
            limb.then.text(f, redact)?;
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, " ELSE ")?;
            otherwise.text(f, redact)?;
        }
        write!(f, " END")
    }
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<CaseExpression> for Expression {
    fn from(value: CaseExpression) -> Self {
        Expression::Case(value)
    }
}
