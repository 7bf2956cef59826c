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

/// The predicate tested by an `IS` expression.
///
/// `IS` always evaluates to a plain boolean; it never produces MISSING.
/// `IS NULL` follows PartiQL in treating an absent (MISSING) value as null.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsKey {
    /// `IS NULL`.
    Null,
    /// `IS NOT NULL`.
    NotNull,
    /// `IS MISSING`.
    Missing,
    /// `IS NOT MISSING`.
    NotMissing,
    /// `IS TRUE`.
    True,
    /// `IS NOT TRUE`.
    NotTrue,
    /// `IS FALSE`.
    False,
    /// `IS NOT FALSE`.
    NotFalse,
}

impl IsKey {
    /// The key testing the boolean negation of this one.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Null => Self::NotNull,
            Self::NotNull => Self::Null,
            Self::Missing => Self::NotMissing,
            Self::NotMissing => Self::Missing,
            Self::True => Self::NotTrue,
            Self::NotTrue => Self::True,
            Self::False => Self::NotFalse,
            Self::NotFalse => Self::False,
        }
    }

    /// Evaluates the predicate against a literal.
    pub fn eval(&self, lit: &Literal) -> bool {
        match self {
            Self::Null => lit.is_absent(),
            Self::NotNull => !lit.is_absent(),
            Self::Missing => lit.is_missing(),
            Self::NotMissing => !lit.is_missing(),
            Self::True => lit.as_bool() == Some(true),
            Self::NotTrue => lit.as_bool() != Some(true),
            Self::False => lit.as_bool() == Some(false),
            Self::NotFalse => lit.as_bool() != Some(false),
        }
    }
}

impl fmt::Display for IsKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Null => "NULL",
            Self::NotNull => "NOT NULL",
            Self::Missing => "MISSING",
            Self::NotMissing => "NOT MISSING",
            Self::True => "TRUE",
            Self::NotTrue => "NOT TRUE",
            Self::False => "FALSE",
            Self::NotFalse => "NOT FALSE",
        })
    }
}

/// An `IS` expression, e.g. `t.x IS NOT NULL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsExpression {
    /// The expression being tested.
    pub operand: Box<Expression>,
    /// The predicate.
    pub key: IsKey,
}

impl IsExpression {
    pub fn new(operand: Expression, key: IsKey) -> Self {
        IsExpression { operand: Box::new(operand), key }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        self.operand.text(f, redact)?;
        write!(f, " IS {}", self.key)
    }
}

impl fmt::Display for IsExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<IsExpression> for Expression {
    fn from(value: IsExpression) -> Self {
        Expression::Is(value)
    }
}
