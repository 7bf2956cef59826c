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

//! Rules for the IS predicates.
//!
//! A literal operand evaluates directly. A typed operand that provably
//! cannot satisfy (or fail) the predicate reduces to a constant boolean:
//! `x IS NOT MISSING` is TRUE whenever x's type set excludes MISSING.

use super::comparison::{case_outcomes_constant, push_into_case};
use super::simplifier::Simplifier;

use tarn_ast::{Expression, IsExpression, IsKey, Literal, RuntimeType, TypeSet};

pub(super) fn simplify_is(s: &mut Simplifier, input: IsExpression) -> Expression {
    let IsExpression { operand, key } = input;
    let operand = *operand;

    if let Some(lit) = operand.as_literal() {
        return Expression::Literal(Literal::Bool(key.eval(lit)));
    }

    let t = s.type_of(&operand);
    let absent = TypeSet::NULL | TypeSet::MISSING;
    let decided = match key {
        IsKey::Missing if !t.maybe_missing() => Some(false),
        IsKey::NotMissing if !t.maybe_missing() => Some(true),
        IsKey::Missing if t.only(TypeSet::MISSING) => Some(true),
        IsKey::NotMissing if t.only(TypeSet::MISSING) => Some(false),
        IsKey::Null if !t.any_of(absent) => Some(false),
        IsKey::NotNull if !t.any_of(absent) => Some(true),
        IsKey::Null if t.only(absent) => Some(true),
        IsKey::NotNull if t.only(absent) => Some(false),
        IsKey::True | IsKey::False if !t.contains(RuntimeType::Bool) => Some(false),
        IsKey::NotTrue | IsKey::NotFalse if !t.contains(RuntimeType::Bool) => Some(true),
        _ => None,
    };
    if let Some(value) = decided {
        return Expression::Literal(Literal::Bool(value));
    }

    // IS over a CASE with constant outcomes pushes into each limb.
    match operand {
        Expression::Case(case) if case_outcomes_constant(&case) => {
            let wrapped =
                push_into_case(case, |then| Expression::Is(IsExpression::new(then, key)));
            s.resimplify(wrapped)
        }
        operand => Expression::Is(IsExpression::new(operand, key)),
    }
}
