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

//! Rules for IN membership tests.

use super::simplifier::Simplifier;

use tarn_ast::{
    literal_type, ComparisonExpression, ComparisonOperation, Expression, Literal,
    MemberExpression,
};

pub(super) fn simplify_member(s: &mut Simplifier, input: MemberExpression) -> Expression {
    let MemberExpression { operand, mut values } = input;
    let operand = *operand;

    // A constant probe is a direct membership check.
    if let Some(lit) = operand.as_literal() {
        let found = values.iter().any(|v| lit.equivalent(v));
        return Expression::Literal(Literal::Bool(found));
    }

    // Candidates whose type cannot meet the probe's type can never match.
    let probe_type = s.type_of(&operand);
    values.retain(|v| literal_type(v).comparable(probe_type));

    match values.len() {
        0 => Expression::Literal(Literal::Bool(false)),
        1 => {
            let value = values.pop().expect("one value");
            s.resimplify(Expression::Comparison(ComparisonExpression::new(
                ComparisonOperation::Equals,
                operand,
                Expression::Literal(value),
            )))
        }
        _ => Expression::Member(MemberExpression { operand: Box::new(operand), values }),
    }
}
