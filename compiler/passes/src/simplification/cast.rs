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

//! Rules for CAST.
//!
//! A cast whose input already lies inside the target set is the identity;
//! one whose input can never convert is MISSING. Constant numeric and
//! boolean operands convert at fold time.

use super::simplifier::Simplifier;

use tarn_ast::{round_rational, CastExpression, Expression, Literal, RoundMode, RuntimeType, TypeSet};

use num_traits::ToPrimitive;

pub(super) fn simplify_cast(s: &mut Simplifier, input: CastExpression) -> Expression {
    let CastExpression { operand, target } = input;
    let operand = *operand;

    // Degenerate targets decide the result outright.
    if target == TypeSet::NULL {
        return Expression::Literal(Literal::Null);
    }
    if target == TypeSet::MISSING {
        return Expression::Literal(Literal::Missing);
    }

    if let Some(lit) = operand.as_literal() {
        if lit.is_absent() {
            // NULL converts to NULL, absence stays absent.
            return Expression::Literal(lit.clone());
        }
        if let Some(folded) = fold_cast(lit, target) {
            return Expression::Literal(folded);
        }
    }

    let from = s.type_of(&operand).and_not(TypeSet::MISSING);
    // Identity: every present value the input can take is already in the
    // target set.
    if !from.is_empty() && from.only(target) {
        return operand;
    }
    // Impossible: no present input type converts into the target, so the
    // result is always MISSING.
    if !from.any_of(convertible_to(target)) {
        return Expression::Literal(Literal::Missing);
    }

    Expression::Cast(CastExpression::new(operand, target))
}

/// Converts a constant when the target is one of the narrow numeric,
/// string or boolean sets.
fn fold_cast(lit: &Literal, target: TypeSet) -> Option<Literal> {
    let target = target.and_not(TypeSet::MISSING);
    if target == TypeSet::INTEGER || target == TypeSet::of(RuntimeType::Int) {
        return match lit {
            Literal::Bool(b) => Some(Literal::Integer(*b as i64)),
            _ => {
                let r = lit.as_rational()?;
                round_rational(&r, RoundMode::Trunc).to_i64().map(Literal::Integer)
            }
        };
    }
    if target == TypeSet::FLOAT {
        return match lit {
            Literal::Bool(b) => Some(Literal::Float(*b as i64 as f64)),
            _ => lit.as_f64().map(Literal::Float),
        };
    }
    if target == TypeSet::of(RuntimeType::String) || target == TypeSet::STRING {
        return match lit {
            Literal::Integer(i) => Some(Literal::String(i.to_string())),
            Literal::Float(x) => Some(Literal::String(format!("{x:?}"))),
            Literal::String(_) => Some(lit.clone()),
            _ => None,
        };
    }
    None
}

/// The set of present input types that can convert into some member of
/// `target`; MISSING is handled by the caller, since absence always casts
/// to absence.
fn convertible_to(target: TypeSet) -> TypeSet {
    let mut sources = TypeSet::EMPTY;
    for t in target.members() {
        sources = sources
            | match t {
                RuntimeType::Null => TypeSet::NULL,
                RuntimeType::Missing => TypeSet::MISSING,
                RuntimeType::Bool => TypeSet::BOOL | TypeSet::NUMERIC | TypeSet::STRING,
                RuntimeType::Uint
                | RuntimeType::Int
                | RuntimeType::Float
                | RuntimeType::Decimal => {
                    TypeSet::NUMERIC | TypeSet::BOOL | TypeSet::STRING
                }
                RuntimeType::Timestamp => TypeSet::TIME | TypeSet::STRING,
                RuntimeType::Symbol | RuntimeType::String | RuntimeType::Clob => {
                    TypeSet::STRING
                        | TypeSet::NUMERIC
                        | TypeSet::BOOL
                        | TypeSet::TIME
                        | TypeSet::of(RuntimeType::Clob)
                }
                RuntimeType::Blob => TypeSet::of(RuntimeType::Blob) | TypeSet::STRING,
                RuntimeType::List | RuntimeType::Sexp => {
                    TypeSet::LIST | TypeSet::of(RuntimeType::Sexp)
                }
                RuntimeType::Struct => TypeSet::STRUCT,
                RuntimeType::Annotation => TypeSet::of(RuntimeType::Annotation),
            };
    }
    // NULL converts to anything nullable.
    sources | TypeSet::NULL
}
