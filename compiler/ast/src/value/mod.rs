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

//! The arithmetic substrate for constant folding.
//!
//! Numeric literals fold through arbitrary-precision rationals, never
//! through intermediate doubles: `9007199254740993 + 1` is exact here even
//! though the addends do not round-trip through an f64. Only the
//! float-native transcendental folds (trig, exp, log) leave the rationals,
//! and those promote their integer arguments explicitly.

use crate::Literal;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use std::cmp::Ordering;

/// How a rational is rounded to an integer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundMode {
    /// To the nearest integer, ties toward positive infinity; SQL `ROUND`
    /// rounds -3.5 to -3.
    Nearest,
    /// To the nearest integer, half to even; `ROUND_EVEN`.
    NearestEven,
    /// Toward zero; `TRUNC`.
    Trunc,
    /// Toward negative infinity; `FLOOR`.
    Floor,
    /// Toward positive infinity; `CEIL`.
    Ceil,
}

/// Rounds `r` to an integer under `mode`.
pub fn round_rational(r: &BigRational, mode: RoundMode) -> BigInt {
    match mode {
        RoundMode::Nearest => {
            let half = BigRational::new(BigInt::from(1), BigInt::from(2));
            (r + half).floor().to_integer()
        }
        RoundMode::Trunc => r.trunc().to_integer(),
        RoundMode::Floor => r.floor().to_integer(),
        RoundMode::Ceil => r.ceil().to_integer(),
        RoundMode::NearestEven => {
            let floor = r.floor();
            let frac = r - &floor;
            let floor = floor.to_integer();
            let half = BigRational::new(BigInt::from(1), BigInt::from(2));
            match frac.cmp(&half) {
                Ordering::Less => floor,
                Ordering::Greater => floor + 1,
                Ordering::Equal => {
                    if (&floor % BigInt::from(2)).is_zero() {
                        floor
                    } else {
                        floor + 1
                    }
                }
            }
        }
    }
}

impl Literal {
    /// The exact rational value of a numeric literal. `None` for
    /// non-numerics and for non-finite floats.
    pub fn as_rational(&self) -> Option<BigRational> {
        match self {
            Literal::Integer(i) => Some(BigRational::from_integer(BigInt::from(*i))),
            Literal::Float(x) => BigRational::from_float(*x),
            Literal::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// Densifies a rational back into the narrowest literal that holds it
    /// exactly: an integral ratio that fits an i64 becomes `Integer`,
    /// anything else stays `Rational`.
    pub fn from_rational(r: BigRational) -> Literal {
        if r.is_integer() {
            if let Some(i) = r.to_integer().to_i64() {
                return Literal::Integer(i);
            }
        }
        Literal::Rational(r)
    }

    /// The numeric payload as a double, for float-native folds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Integer(i) => Some(*i as f64),
            Literal::Float(x) => Some(*x),
            Literal::Rational(r) => r.to_f64(),
            _ => None,
        }
    }

    /// Whether this literal is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Integer(_) | Literal::Float(_) | Literal::Rational(_))
    }

    /// Value equality across numeric representations; non-numerics compare
    /// structurally. The equivalence backing [`Expression::equivalent`].
    ///
    /// [`Expression::equivalent`]: crate::Expression::equivalent
    pub fn equivalent(&self, other: &Literal) -> bool {
        match (self.as_rational(), other.as_rational()) {
            (Some(a), Some(b)) => return a == b,
            // A non-finite float has no rational; fall through so NaN stays
            // equivalent to itself.
            (None, None) => {}
            _ => {
                if self.is_numeric() && other.is_numeric() {
                    return false;
                }
            }
        }
        match (self, other) {
            (Literal::Null, Literal::Null) => true,
            (Literal::Missing, Literal::Missing) => true,
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Timestamp(a), Literal::Timestamp(b)) => a == b,
            (Literal::List(a), Literal::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equivalent(y))
            }
            (Literal::Struct(a), Literal::Struct(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|((la, va), (lb, vb))| la == lb && va.equivalent(vb))
            }
            _ => false,
        }
    }
}

/// Orders two literals of the same kind: numerics in the rationals, strings
/// lexicographically, timestamps chronologically, booleans false-first.
/// `None` when the kinds are not mutually ordered.
pub fn compare_literals(a: &Literal, b: &Literal) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_rational(), b.as_rational()) {
        return Some(x.cmp(&y));
    }
    match (a, b) {
        (Literal::String(x), Literal::String(y)) => Some(x.cmp(y)),
        (Literal::Timestamp(x), Literal::Timestamp(y)) => Some(x.cmp(y)),
        (Literal::Bool(x), Literal::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// The absolute value of a numeric literal, preserving its representation.
pub fn literal_abs(lit: &Literal) -> Option<Literal> {
    match lit {
        Literal::Integer(i) => Some(Literal::Integer(i.checked_abs()?)),
        Literal::Float(x) => Some(Literal::Float(x.abs())),
        Literal::Rational(r) => Some(Literal::Rational(r.abs())),
        _ => None,
    }
}

/// The sign of a numeric literal as -1, 0 or 1.
pub fn literal_sign(lit: &Literal) -> Option<Literal> {
    match lit {
        Literal::Float(x) if x.is_nan() => None,
        _ => {
            let r = lit.as_rational().or_else(|| match lit {
                // Infinities have a sign even without a rational value.
                Literal::Float(x) if *x > 0.0 => Some(BigRational::from_integer(BigInt::from(1))),
                Literal::Float(x) if *x < 0.0 => Some(BigRational::from_integer(BigInt::from(-1))),
                _ => None,
            })?;
            Some(Literal::Integer(match r.numer().sign() {
                num_bigint::Sign::Minus => -1,
                num_bigint::Sign::NoSign => 0,
                num_bigint::Sign::Plus => 1,
            }))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_round_modes() {
        let cases = [
            // (value, nearest, even, trunc, floor, ceil)
            (rat(7, 2), 4, 4, 3, 3, 4),    // 3.5
            (rat(-7, 2), -3, -4, -3, -4, -3), // -3.5
            (rat(5, 2), 3, 2, 2, 2, 3),    // 2.5
            (rat(-5, 2), -2, -2, -2, -3, -2), // -2.5
            (rat(9, 4), 2, 2, 2, 2, 3),    // 2.25
        ];
        for (r, nearest, even, trunc, floor, ceil) in cases {
            assert_eq!(round_rational(&r, RoundMode::Nearest), BigInt::from(nearest));
            assert_eq!(round_rational(&r, RoundMode::NearestEven), BigInt::from(even));
            assert_eq!(round_rational(&r, RoundMode::Trunc), BigInt::from(trunc));
            assert_eq!(round_rational(&r, RoundMode::Floor), BigInt::from(floor));
            assert_eq!(round_rational(&r, RoundMode::Ceil), BigInt::from(ceil));
        }
    }

    #[test]
    fn test_densify() {
        assert_eq!(Literal::from_rational(rat(8, 2)), Literal::Integer(4));
        assert_eq!(Literal::from_rational(rat(-9, 3)), Literal::Integer(-3));
        assert_eq!(Literal::from_rational(rat(1, 3)), Literal::Rational(rat(1, 3)));
    }

    #[test]
    fn test_exact_folding_beyond_f64() {
        // 2^53 + 1 is not representable as f64; the rationals keep it.
        let big = Literal::Integer((1i64 << 53) + 1);
        let r = big.as_rational().unwrap();
        assert_eq!(Literal::from_rational(r), big);
    }

    #[test]
    fn test_compare_literals() {
        assert_eq!(
            compare_literals(&Literal::Integer(3), &Literal::Float(3.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_literals(&Literal::String("a".into()), &Literal::String("b".into())),
            Some(Ordering::Less)
        );
        assert_eq!(compare_literals(&Literal::Integer(1), &Literal::String("a".into())), None);
    }

    #[test]
    fn test_sign_and_abs() {
        assert_eq!(literal_sign(&Literal::Integer(-7)), Some(Literal::Integer(-1)));
        assert_eq!(literal_sign(&Literal::Float(0.0)), Some(Literal::Integer(0)));
        assert_eq!(literal_abs(&Literal::Float(-2.5)), Some(Literal::Float(2.5)));
        assert_eq!(literal_abs(&Literal::Integer(-2)), Some(Literal::Integer(2)));
    }
}
