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

//! Rules for AND, OR, XOR, XNOR and NOT.

use super::simplifier::Simplifier;

use tarn_ast::{
    Expression, Literal, LogicalExpression, LogicalOperation, NotExpression, TypeSet,
};

pub(super) fn simplify_logical(s: &mut Simplifier, input: LogicalExpression) -> Expression {
    use LogicalOperation::*;

    let LogicalExpression { op, left, right } = input;
    let (mut left, mut right) = (*left, *right);

    // Under IS TRUE, a provably absent operand decides AND/XOR/XNOR (the
    // result can never be true) and vanishes from OR.
    if s.in_logical_context() {
        let left_absent = s.always_absent(&left);
        let right_absent = s.always_absent(&right);
        match op {
            And | Xor | Xnor if left_absent || right_absent => {
                return Expression::Literal(Literal::Bool(false));
            }
            Or if left_absent => return right,
            Or if right_absent => return left,
            _ => {}
        }
    }

    // Fold fully-constant operands under three-valued logic: an absent
    // operand is "unknown", which only AND false / OR true can override.
    if let (Some(a), Some(b)) = (left.as_literal(), right.as_literal()) {
        if let Some(lit) = fold_logical(op, a, b) {
            return Expression::Literal(lit);
        }
    }

    // Canonical form: a constant operand sits on the left.
    if right.is_constant() && !left.is_constant() {
        std::mem::swap(&mut left, &mut right);
    }

    // A boolean constant on the left either decides the node or reduces it
    // to (possibly negated) right.
    if let Some(value) = left.as_literal().and_then(Literal::as_bool) {
        return match (op, value) {
            (And, true) | (Or, false) | (Xnor, true) => right,
            (And, false) => Expression::Literal(Literal::Bool(false)),
            (Or, true) => Expression::Literal(Literal::Bool(true)),
            (Xor, false) => right,
            (Xor, true) | (Xnor, false) => {
                s.resimplify(Expression::Not(NotExpression::new(right)))
            }
        };
    }

    // Idempotence by structure: x AND x is x, x OR x is x.
    if matches!(op, And | Or) && left.equivalent(&right) {
        return left;
    }

    Expression::Logical(LogicalExpression::new(op, left, right))
}

/// Three-valued fold over constant operands; `None` when an operand is not
/// a boolean or an absence marker.
fn fold_logical(op: LogicalOperation, a: &Literal, b: &Literal) -> Option<Literal> {
    use LogicalOperation::*;

    let (a_bool, b_bool) = (a.as_bool(), b.as_bool());
    if (a_bool.is_none() && !a.is_absent()) || (b_bool.is_none() && !b.is_absent()) {
        return None;
    }
    Some(match op {
        And if a_bool == Some(false) || b_bool == Some(false) => Literal::Bool(false),
        Or if a_bool == Some(true) || b_bool == Some(true) => Literal::Bool(true),
        _ if a.is_absent() || b.is_absent() => Literal::Missing,
        And => Literal::Bool(a_bool? && b_bool?),
        Or => Literal::Bool(a_bool? || b_bool?),
        Xor => Literal::Bool(a_bool? ^ b_bool?),
        Xnor => Literal::Bool(a_bool? == b_bool?),
    })
}

pub(super) fn simplify_not(s: &mut Simplifier, input: NotExpression) -> Expression {
    match *input.operand {
        Expression::Literal(lit) => match lit {
            Literal::Bool(b) => Expression::Literal(Literal::Bool(!b)),
            // NOT of an absent value is MISSING, not NULL.
            Literal::Null | Literal::Missing => Expression::Literal(Literal::Missing),
            other => Expression::Not(NotExpression::new(Expression::Literal(other))),
        },
        Expression::Comparison(cmp) => match cmp.op.inverse() {
            Some(inverse) => Expression::Comparison(tarn_ast::ComparisonExpression {
                op: inverse,
                left: cmp.left,
                right: cmp.right,
            }),
            None => Expression::Not(NotExpression::new(Expression::Comparison(cmp))),
        },
        Expression::Logical(inner) => match inner.op.inverse() {
            Some(inverse) => Expression::Logical(LogicalExpression {
                op: inverse,
                left: inner.left,
                right: inner.right,
            }),
            None => Expression::Not(NotExpression::new(Expression::Logical(inner))),
        },
        Expression::Is(is) => Expression::Is(tarn_ast::IsExpression {
            operand: is.operand,
            key: is.key.inverse(),
        }),
        // Double negation cancels only when the inner operand is known to
        // be boolean-or-missing; NOT NOT NULL is MISSING, not NULL.
        Expression::Not(inner) if s.type_of(&inner.operand).only(TypeSet::LOGICAL) => {
            *inner.operand
        }
        other => Expression::Not(NotExpression::new(other)),
    }
}
