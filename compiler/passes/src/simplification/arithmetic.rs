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

//! Rules for the arithmetic operators.
//!
//! Constant pairs fold exactly in the rationals; a zero divisor folds to
//! MISSING rather than erroring. Commutative ops rotate their constant to
//! the right and re-associate so chained constants accumulate:
//! `(x + 1) + 2` becomes `x + 3`.

use super::simplifier::Simplifier;

use tarn_ast::{
    BinaryExpression, BinaryOperation, Expression, Literal, TypeSet, UnaryExpression,
    UnaryOperation,
};

use num_traits::{One, ToPrimitive, Zero};

pub(super) fn simplify_binary(s: &mut Simplifier, input: BinaryExpression) -> Expression {
    use BinaryOperation::*;

    let BinaryExpression { mut op, left, right } = input;
    let (mut left, mut right) = (*left, *right);

    // Arithmetic over an absent operand is MISSING.
    if is_missing(&left) || is_missing(&right) {
        return Expression::Literal(Literal::Missing);
    }

    // Constant against constant folds exactly.
    if let (Some(a), Some(b)) = (left.as_literal(), right.as_literal()) {
        if let Some(lit) = fold_binary(op, a, b) {
            return Expression::Literal(lit);
        }
    }

    // Canonical form: commutative ops keep their constant on the right.
    if op.is_commutative() && left.is_constant() && !right.is_constant() {
        std::mem::swap(&mut left, &mut right);
    }

    // Subtracting a numeric constant is adding its negation, which exposes
    // the re-association below.
    if op == Sub {
        if let Some(neg) = right.as_literal().and_then(negate_literal) {
            op = Add;
            right = Expression::Literal(neg);
        }
    }

    // (x ⊕ c1) ⊕ c2 accumulates into x ⊕ (c1 ⊕ c2).
    if matches!(op, Add | Mul) && right.is_constant() {
        if let Expression::Binary(inner) = &left {
            if inner.op == op && inner.right.is_constant() && !inner.left.is_constant() {
                if let (Some(c1), Some(c2)) = (inner.right.as_literal(), right.as_literal()) {
                    if let Some(folded) = fold_binary(op, c1, c2) {
                        let Expression::Binary(inner) = left else { unreachable!() };
                        return s.resimplify(Expression::Binary(BinaryExpression::new(
                            op,
                            *inner.left,
                            Expression::Literal(folded),
                        )));
                    }
                }
            }
        }
    }

    // Identity elements; sound only when the left operand is certainly
    // numeric or MISSING, which the identity propagates unchanged. A NULL
    // operand is not safe: NULL + 0 evaluates to MISSING, not NULL.
    let left_numeric_or_missing =
        s.type_of(&left).only(TypeSet::NUMERIC | TypeSet::MISSING);
    if left_numeric_or_missing {
        if let Some(r) = right.as_literal().and_then(Literal::as_rational) {
            match op {
                Add if r.is_zero() => return left,
                Mul if r.is_one() => return left,
                Div if r.is_one() => return left,
                Mul if r.is_zero() && s.type_of(&left).only(TypeSet::NUMERIC) => {
                    return Expression::Literal(Literal::Integer(0));
                }
                _ => {}
            }
        }
    }

    Expression::Binary(BinaryExpression::new(op, left, right))
}

pub(super) fn simplify_unary(s: &mut Simplifier, input: UnaryExpression) -> Expression {
    let UnaryExpression { op, operand } = input;
    let operand = *operand;
    match op {
        UnaryOperation::Negate => {
            if is_missing(&operand) {
                return Expression::Literal(Literal::Missing);
            }
            if let Some(neg) = operand.as_literal().and_then(negate_literal) {
                return Expression::Literal(neg);
            }
            // --x cancels when x is certainly numeric or absent.
            if let Expression::Unary(inner) = &operand {
                if inner.op == UnaryOperation::Negate
                    && s.type_of(&inner.operand).only(TypeSet::NUMERIC | TypeSet::MISSING)
                {
                    let Expression::Unary(inner) = operand else { unreachable!() };
                    return *inner.operand;
                }
            }
            Expression::Unary(UnaryExpression { op, operand: Box::new(operand) })
        }
    }
}

fn is_missing(expr: &Expression) -> bool {
    expr.as_literal().is_some_and(Literal::is_missing)
}

/// Negates a numeric literal, preserving its representation.
fn negate_literal(lit: &Literal) -> Option<Literal> {
    match lit {
        Literal::Float(x) => Some(Literal::Float(-x)),
        _ => Some(Literal::from_rational(-lit.as_rational()?)),
    }
}

/// Folds one binary operation over two numeric constants. `None` when an
/// operand is not numeric or not integral where integrality is required;
/// a zero divisor folds to MISSING.
fn fold_binary(op: BinaryOperation, a: &Literal, b: &Literal) -> Option<Literal> {
    use BinaryOperation::*;

    match op {
        Add | Sub | Mul | Div | Mod => {
            let x = a.as_rational()?;
            let y = b.as_rational()?;
            Some(match op {
                Add => Literal::from_rational(x + y),
                Sub => Literal::from_rational(x - y),
                Mul => Literal::from_rational(x * y),
                Div => {
                    if y.is_zero() {
                        Literal::Missing
                    } else {
                        Literal::from_rational(x / y)
                    }
                }
                Mod => {
                    if y.is_zero() {
                        Literal::Missing
                    } else {
                        let quotient = (&x / &y).trunc();
                        Literal::from_rational(x - quotient * y)
                    }
                }
                _ => unreachable!("rational op"),
            })
        }
        BitAnd | BitOr | BitXor | Shl | SraShr | SrlShr => {
            let x = integral(a)?;
            let y = integral(b)?;
            Some(Literal::Integer(match op {
                BitAnd => x & y,
                BitOr => x | y,
                BitXor => x ^ y,
                // Shifts use 64-bit semantics with the count taken mod 64.
                Shl => x.wrapping_shl(y as u32),
                SraShr => x.wrapping_shr(y as u32),
                SrlShr => ((x as u64).wrapping_shr(y as u32)) as i64,
                _ => unreachable!("integral op"),
            }))
        }
    }
}

/// The i64 payload of an integral numeric literal.
fn integral(lit: &Literal) -> Option<i64> {
    let r = lit.as_rational()?;
    if !r.is_integer() {
        return None;
    }
    r.to_integer().to_i64()
}
