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

//! Folding rules for the arithmetic helpers and transcendentals.
//!
//! ABS, SIGN, BIT_COUNT and the rounding family fold in the rationals and
//! preserve the argument's representation. The transcendentals are
//! float-native: they promote integer arguments to doubles and fold there.

use super::*;

use tarn_ast::{literal_abs, literal_sign, round_rational, Literal, RoundMode};

use num_traits::ToPrimitive;

pub(super) fn fold(node: &BuiltinExpression) -> Option<Expression> {
    use BuiltinOp::*;

    if node.args.iter().any(|arg| arg.as_literal().is_some_and(Literal::is_missing)) {
        return Some(Expression::Literal(Literal::Missing));
    }

    match node.func {
        Abs => literal_abs(node.args.first()?.as_literal()?).map(Expression::Literal),
        Sign => literal_sign(node.args.first()?.as_literal()?).map(Expression::Literal),
        BitCount => {
            let r = node.args.first()?.as_literal()?.as_rational()?;
            if !r.is_integer() {
                return None;
            }
            let bits = r.to_integer().to_i64()? as u64;
            Some(Expression::Literal(Literal::Integer(bits.count_ones() as i64)))
        }
        Round => fold_round(node, RoundMode::Nearest),
        RoundEven => fold_round(node, RoundMode::NearestEven),
        Trunc => fold_round(node, RoundMode::Trunc),
        Floor => fold_round(node, RoundMode::Floor),
        Ceil => fold_round(node, RoundMode::Ceil),
        Sqrt => fold_float(node, f64::sqrt),
        Cbrt => fold_float(node, f64::cbrt),
        Exp => fold_float(node, f64::exp),
        ExpM1 => fold_float(node, f64::exp_m1),
        Exp2 => fold_float(node, f64::exp2),
        Exp10 => fold_float(node, |x| 10f64.powf(x)),
        Ln => fold_float(node, f64::ln),
        Ln1P => fold_float(node, f64::ln_1p),
        Log2 => fold_float(node, f64::log2),
        Log10 => fold_float(node, f64::log10),
        Sin => fold_float(node, f64::sin),
        Cos => fold_float(node, f64::cos),
        Tan => fold_float(node, f64::tan),
        Asin => fold_float(node, f64::asin),
        Acos => fold_float(node, f64::acos),
        Atan => fold_float(node, f64::atan),
        Pow => fold_float2(node, f64::powf),
        Hypot => fold_float2(node, f64::hypot),
        Atan2 => fold_float2(node, f64::atan2),
        _ => unreachable!("non-math op {} dispatched to the math folder", node.func.name()),
    }
}

/// Rounds a constant, preserving its representation: floats stay floats,
/// exact inputs densify to integers.
fn fold_round(node: &BuiltinExpression, mode: RoundMode) -> Option<Expression> {
    let lit = node.args.first()?.as_literal()?;
    let rounded = round_rational(&lit.as_rational()?, mode);
    let out = match lit {
        Literal::Float(_) => Literal::Float(rounded.to_f64()?),
        _ => Literal::from_rational(rounded.into()),
    };
    Some(Expression::Literal(out))
}

fn fold_float(node: &BuiltinExpression, op: impl Fn(f64) -> f64) -> Option<Expression> {
    let x = node.args.first()?.as_literal()?.as_f64()?;
    Some(Expression::Literal(Literal::Float(op(x))))
}

fn fold_float2(node: &BuiltinExpression, op: impl Fn(f64, f64) -> f64) -> Option<Expression> {
    let x = node.args.first()?.as_literal()?.as_f64()?;
    let y = node.args.get(1)?.as_literal()?.as_f64()?;
    Some(Expression::Literal(Literal::Float(op(x, y))))
}
