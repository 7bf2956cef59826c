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

//! Rules for the comparison operators.
//!
//! Canonical form puts the constant on the right; constant pairs fold in
//! the rationals. Comparisons against UPPER/LOWER recognize case-folded
//! equality and substring search, becoming the planner-private EQUALS_CI /
//! CONTAINS_CI ops, or a constant FALSE when the literal's case makes a
//! match impossible.

use super::simplifier::Simplifier;
use crate::builtins::{like_match, LikePattern};

use tarn_ast::{
    compare_literals, BuiltinExpression, BuiltinOp, CaseExpression, CaseLimb,
    ComparisonExpression, ComparisonOperation, Expression, IsExpression, IsKey, Literal,
    LogicalExpression, LogicalOperation, TypeSet, Valence,
};

use std::cmp::Ordering;

pub(super) fn simplify_comparison(
    s: &mut Simplifier,
    input: ComparisonExpression,
) -> Expression {
    use ComparisonOperation::*;

    let ComparisonExpression { mut op, left, right } = input;
    let (mut left, mut right) = (*left, *right);

    // Under IS TRUE, a comparison with a provably absent side is never
    // true.
    if s.in_logical_context() && (s.always_absent(&left) || s.always_absent(&right)) {
        return Expression::Literal(Literal::Bool(false));
    }

    // Constant against constant folds outright.
    if let (Some(a), Some(b)) = (left.as_literal(), right.as_literal()) {
        if let Some(out) = fold_comparison(op, a, b) {
            return out;
        }
    }

    // Canonical form: the constant goes to the right, mirroring the
    // operator. Pattern matches keep their pattern on the right already.
    if left.is_constant() && !right.is_constant() {
        if let Some(mirrored) = op.mirror() {
            std::mem::swap(&mut left, &mut right);
            op = mirrored;
        }
    }

    // x = x is TRUE wherever x is present, and propagates absence
    // otherwise; x <> x likewise with FALSE.
    if matches!(op, Equals | NotEquals) && !left.is_constant() && left.equivalent(&right) {
        let outcome = Literal::Bool(op == Equals);
        if !s.type_of(&left).any_of(TypeSet::NULL | TypeSet::MISSING) {
            return Expression::Literal(outcome);
        }
        let case = CaseExpression::new(
            vec![CaseLimb {
                when: Expression::Is(IsExpression::new(left, IsKey::NotNull)),
                then: Expression::Literal(outcome),
            }],
            Some(Expression::Literal(Literal::Missing)),
            Valence::Logical,
        );
        return s.resimplify(Expression::Case(case));
    }

    // Equality of two boolean-typed operands is XNOR; inequality is XOR.
    if matches!(op, Equals | NotEquals)
        && s.type_of(&left).only(TypeSet::LOGICAL)
        && s.type_of(&right).only(TypeSet::LOGICAL)
    {
        let logical_op =
            if op == Equals { LogicalOperation::Xnor } else { LogicalOperation::Xor };
        return s.resimplify(Expression::Logical(LogicalExpression::new(
            logical_op, left, right,
        )));
    }

    // A comparison against a CASE with constant outcomes pushes into each
    // limb, where it folds immediately.
    if right.is_constant() {
        left = match left {
            Expression::Case(case) if case_outcomes_constant(&case) => {
                let wrapped = push_into_case(case, |then| {
                    Expression::Comparison(ComparisonExpression::new(op, then, right.clone()))
                });
                return s.resimplify(wrapped);
            }
            other => other,
        };
    }

    // UPPER(x) and LOWER(x) against a string literal.
    if let Some(out) = simplify_case_folded(s, op, &left, &right) {
        return out;
    }

    Expression::Comparison(ComparisonExpression::new(op, left, right))
}

/// Whether every outcome of the CASE (each THEN and the ELSE, if present)
/// is a constant, which guarantees a pushed-in operation folds away.
pub(super) fn case_outcomes_constant(case: &CaseExpression) -> bool {
    case.limbs.iter().all(|limb| limb.then.is_constant())
        && case.otherwise.as_ref().map_or(true, |e| e.is_constant())
}

/// Rebuilds a CASE with `wrap` applied to every THEN and to the ELSE. An
/// absent ELSE is materialized as NULL first, since the wrapped operation
/// observes the CASE's fall-through value.
pub(super) fn push_into_case(
    case: CaseExpression,
    mut wrap: impl FnMut(Expression) -> Expression,
) -> Expression {
    let limbs = case
        .limbs
        .into_iter()
        .map(|limb| CaseLimb { when: limb.when, then: wrap(limb.then) })
        .collect();
    let otherwise = case
        .otherwise
        .map(|e| *e)
        .unwrap_or(Expression::Literal(Literal::Null));
    Expression::Case(CaseExpression::new(
        limbs,
        Some(wrap(otherwise)),
        case.valence,
    ))
}

/// Folds a comparison of two constants. `None` when the pair is not
/// foldable (e.g. ordering across kinds), which leaves diagnosis to check.
fn fold_comparison(op: ComparisonOperation, a: &Literal, b: &Literal) -> Option<Expression> {
    use ComparisonOperation::*;

    // An absent operand poisons the comparison.
    if a.is_absent() || b.is_absent() {
        let lit = if a.is_missing() || b.is_missing() { Literal::Missing } else { Literal::Null };
        return Some(Expression::Literal(lit));
    }

    match op {
        Like | Ilike => {
            let s = a.as_str()?;
            let pattern = b.as_str()?;
            Some(Expression::Literal(Literal::Bool(like_match(pattern, s, op == Ilike))))
        }
        Equals => Some(Expression::Literal(Literal::Bool(a.equivalent(b)))),
        NotEquals => Some(Expression::Literal(Literal::Bool(!a.equivalent(b)))),
        Less | LessEquals | Greater | GreaterEquals => {
            let ord = compare_literals(a, b)?;
            let holds = match op {
                Less => ord == Ordering::Less,
                LessEquals => ord != Ordering::Greater,
                Greater => ord == Ordering::Greater,
                GreaterEquals => ord != Ordering::Less,
                _ => unreachable!("ordering op"),
            };
            Some(Expression::Literal(Literal::Bool(holds)))
        }
    }
}

/// `UPPER(x) = 'FRED'` becomes `EQUALS_CI(x, 'FRED')`; `UPPER(x) = 'fred'`
/// is impossible because UPPER never yields lowercase. LIKE against a
/// wildcard-free or `%needle%` pattern reduces the same way.
fn simplify_case_folded(
    s: &mut Simplifier,
    op: ComparisonOperation,
    left: &Expression,
    right: &Expression,
) -> Option<Expression> {
    use ComparisonOperation::*;

    let call = match left {
        Expression::Builtin(call)
            if matches!(call.func, BuiltinOp::Upper | BuiltinOp::Lower)
                && call.args.len() == 1 =>
        {
            call
        }
        _ => return None,
    };
    let literal = right.as_literal()?.as_str()?;
    // The literal as the case fold could actually produce it.
    let reachable = match call.func {
        BuiltinOp::Upper => literal.to_uppercase() == literal,
        _ => literal.to_lowercase() == literal,
    };
    let inner = call.args[0].clone();

    match op {
        Equals if !reachable => Some(Expression::Literal(Literal::Bool(false))),
        NotEquals if !reachable => Some(Expression::Literal(Literal::Bool(true))),
        Equals => Some(Expression::Builtin(BuiltinExpression::new(
            BuiltinOp::EqualsCi,
            vec![inner, right.clone()],
        ))),
        Like => match LikePattern::classify(literal) {
            LikePattern::Exact(needle) => {
                let reachable = match call.func {
                    BuiltinOp::Upper => needle.to_uppercase() == needle,
                    _ => needle.to_lowercase() == needle,
                };
                if !reachable {
                    return Some(Expression::Literal(Literal::Bool(false)));
                }
                Some(s.resimplify(Expression::Builtin(BuiltinExpression::new(
                    BuiltinOp::EqualsCi,
                    vec![inner, Expression::Literal(Literal::String(needle))],
                ))))
            }
            LikePattern::Substring(needle) => {
                let reachable = match call.func {
                    BuiltinOp::Upper => needle.to_uppercase() == needle,
                    _ => needle.to_lowercase() == needle,
                };
                if !reachable {
                    return Some(Expression::Literal(Literal::Bool(false)));
                }
                Some(s.resimplify(Expression::Builtin(BuiltinExpression::new(
                    BuiltinOp::ContainsCi,
                    vec![inner, Expression::Literal(Literal::String(needle))],
                ))))
            }
            LikePattern::Other => None,
        },
        _ => None,
    }
}
