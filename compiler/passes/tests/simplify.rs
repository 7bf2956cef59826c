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

use tarn_ast::*;
use tarn_passes::{simplify, simplify_logic};

use chrono::{DateTime, Utc};

fn int(i: i64) -> Expression {
    Expression::Literal(Literal::Integer(i))
}

fn float(x: f64) -> Expression {
    Expression::Literal(Literal::Float(x))
}

fn string(s: &str) -> Expression {
    Expression::Literal(Literal::String(s.to_string()))
}

fn boolean(b: bool) -> Expression {
    Expression::Literal(Literal::Bool(b))
}

fn missing() -> Expression {
    Expression::Literal(Literal::Missing)
}

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn timestamp(s: &str) -> Expression {
    Expression::Literal(Literal::Timestamp(ts(s)))
}

fn call(func: BuiltinOp, args: Vec<Expression>) -> Expression {
    Expression::Builtin(BuiltinExpression::new(func, args))
}

fn compare(op: ComparisonOperation, left: Expression, right: Expression) -> Expression {
    Expression::Comparison(ComparisonExpression::new(op, left, right))
}

fn eq(left: Expression, right: Expression) -> Expression {
    compare(ComparisonOperation::Equals, left, right)
}

fn logical(op: LogicalOperation, left: Expression, right: Expression) -> Expression {
    Expression::Logical(LogicalExpression::new(op, left, right))
}

fn binary(op: BinaryOperation, left: Expression, right: Expression) -> Expression {
    Expression::Binary(BinaryExpression::new(op, left, right))
}

fn is_key(operand: Expression, key: IsKey) -> Expression {
    Expression::Is(IsExpression::new(operand, key))
}

fn casen(limbs: Vec<(Expression, Expression)>, otherwise: Option<Expression>) -> Expression {
    Expression::Case(CaseExpression::new(
        limbs.into_iter().map(|(when, then)| CaseLimb { when, then }).collect(),
        otherwise,
        Valence::Value,
    ))
}

/// Asserts that `input` simplifies to `expected` in a value position, and
/// that simplifying again changes nothing.
fn expect_simplify(input: Expression, expected: Expression) {
    let once = simplify(input.clone(), &NoHint);
    assert!(
        once.equivalent(&expected),
        "{input} simplified to {once}, expected {expected}"
    );
    let twice = simplify(once.clone(), &NoHint);
    assert!(twice.equivalent(&once), "not idempotent: {once} resimplified to {twice}");
}

fn expect_simplify_logic(input: Expression, expected: Expression) {
    let once = simplify_logic(input.clone(), &NoHint);
    assert!(
        once.equivalent(&expected),
        "{input} logically simplified to {once}, expected {expected}"
    );
    let twice = simplify_logic(once.clone(), &NoHint);
    assert!(twice.equivalent(&once), "not idempotent: {once} resimplified to {twice}");
}

#[test]
fn test_constant_comparison_folds() {
    expect_simplify(eq(int(3), int(4)), boolean(false));
    expect_simplify(eq(int(3), int(3)), boolean(true));
    expect_simplify(eq(int(3), float(3.0)), boolean(true));
    expect_simplify(
        compare(ComparisonOperation::Less, float(1.5), int(2)),
        boolean(true),
    );
    expect_simplify(
        compare(ComparisonOperation::GreaterEquals, string("b"), string("a")),
        boolean(true),
    );
    // Equality across kinds is simply false, inequality true.
    expect_simplify(eq(int(1), string("1")), boolean(false));
    expect_simplify(
        compare(ComparisonOperation::NotEquals, int(1), string("1")),
        boolean(true),
    );
}

#[test]
fn test_true_and_x_reduces() {
    let tested = is_key(Expression::path(["t", "x"]), IsKey::Null);
    expect_simplify(
        logical(LogicalOperation::And, boolean(true), tested.clone()),
        tested,
    );
}

#[test]
fn test_constant_moves_right_of_comparison() {
    expect_simplify(
        compare(ComparisonOperation::Less, int(3), Expression::path(["x"])),
        compare(ComparisonOperation::Greater, Expression::path(["x"]), int(3)),
    );
    expect_simplify(
        eq(int(7), Expression::path(["x"])),
        eq(Expression::path(["x"]), int(7)),
    );
}

#[test]
fn test_upper_of_constant_folds() {
    expect_simplify(call(BuiltinOp::Upper, vec![string("tarn")]), string("TARN"));
    expect_simplify(call(BuiltinOp::Lower, vec![string("TARN")]), string("tarn"));
    expect_simplify(
        call(BuiltinOp::Upper, vec![call(BuiltinOp::Lower, vec![Expression::path(["s"])])]),
        call(BuiltinOp::Upper, vec![Expression::path(["s"])]),
    );
}

#[test]
fn test_date_extract_year_folds() {
    expect_simplify(
        call(BuiltinOp::DateExtractYear, vec![timestamp("2009-01-14T23:59:59Z")]),
        int(2009),
    );
}

#[test]
fn test_case_of_equalities_becomes_hash_lookup() {
    let x = || Expression::path(["x"]);
    let input = casen(
        vec![
            (eq(x(), int(0)), string("z")),
            (eq(string("f"), x()), int(0)),
        ],
        None,
    );
    expect_simplify(
        input,
        call(BuiltinOp::HashLookup, vec![x(), int(0), string("z"), string("f"), int(0)]),
    );
}

#[test]
fn test_hash_lookup_keeps_meaningful_else() {
    let x = || Expression::path(["x"]);
    let input = casen(vec![(eq(x(), int(0)), string("z"))], Some(string("w")));
    let out = simplify(input, &NoHint);
    assert!(matches!(out, Expression::Case(_)), "else must block synthesis, got {out}");
}

#[test]
fn test_subnet_range_precomputes() {
    let input = call(
        BuiltinOp::IsSubnetOf,
        vec![string("192.168.1.0/24"), Expression::path(["ip"])],
    );
    expect_simplify(
        input,
        call(
            BuiltinOp::IsSubnetOf,
            vec![string("192.168.1.0"), string("192.168.1.255"), Expression::path(["ip"])],
        ),
    );

    // Host bits in the mask do not change the range.
    let input = call(
        BuiltinOp::IsSubnetOf,
        vec![string("192.168.1.77/24"), Expression::path(["ip"])],
    );
    expect_simplify(
        input,
        call(
            BuiltinOp::IsSubnetOf,
            vec![string("192.168.1.0"), string("192.168.1.255"), Expression::path(["ip"])],
        ),
    );

    // A host route collapses to equality.
    let input = call(
        BuiltinOp::IsSubnetOf,
        vec![string("10.1.2.3/32"), Expression::path(["ip"])],
    );
    expect_simplify(input, eq(Expression::path(["ip"]), string("10.1.2.3")));

    // An inverted explicit range is never true.
    let input = call(
        BuiltinOp::IsSubnetOf,
        vec![string("10.0.0.9"), string("10.0.0.1"), Expression::path(["ip"])],
    );
    expect_simplify(input, boolean(false));
}

#[test]
fn test_impossible_case_folded_equality() {
    expect_simplify(
        eq(call(BuiltinOp::Upper, vec![Expression::path(["s"])]), string("fred")),
        boolean(false),
    );
    expect_simplify(
        eq(call(BuiltinOp::Upper, vec![Expression::path(["s"])]), string("FRED")),
        call(BuiltinOp::EqualsCi, vec![Expression::path(["s"]), string("FRED")]),
    );
    expect_simplify(
        eq(call(BuiltinOp::Lower, vec![Expression::path(["s"])]), string("FRED")),
        boolean(false),
    );
}

#[test]
fn test_like_over_case_fold() {
    let upper = || call(BuiltinOp::Upper, vec![Expression::path(["s"])]);
    expect_simplify(
        compare(ComparisonOperation::Like, upper(), string("%FRED%")),
        call(BuiltinOp::ContainsCi, vec![Expression::path(["s"]), string("FRED")]),
    );
    expect_simplify(
        compare(ComparisonOperation::Like, upper(), string("%fred%")),
        boolean(false),
    );
    expect_simplify(
        compare(ComparisonOperation::Like, upper(), string("FRED")),
        call(BuiltinOp::EqualsCi, vec![Expression::path(["s"]), string("FRED")]),
    );
    // A structured pattern stays a LIKE.
    let kept = simplify(
        compare(ComparisonOperation::Like, upper(), string("F%D")),
        &NoHint,
    );
    assert!(matches!(kept, Expression::Comparison(_)), "got {kept}");
}

#[test]
fn test_constant_like_folds() {
    expect_simplify(
        compare(ComparisonOperation::Like, string("fred"), string("f__d")),
        boolean(true),
    );
    expect_simplify(
        compare(ComparisonOperation::Ilike, string("FRED"), string("fred")),
        boolean(true),
    );
    expect_simplify(
        compare(ComparisonOperation::Like, string("fred"), string("x%")),
        boolean(false),
    );
}

#[test]
fn test_concat_accumulates_literals() {
    let input = call(
        BuiltinOp::Concat,
        vec![
            call(BuiltinOp::Concat, vec![Expression::path(["x"]), string("a")]),
            string("b"),
        ],
    );
    expect_simplify(
        input,
        call(BuiltinOp::Concat, vec![Expression::path(["x"]), string("ab")]),
    );
    expect_simplify(
        call(BuiltinOp::Concat, vec![string("foo"), string("bar")]),
        string("foobar"),
    );
    expect_simplify(call(BuiltinOp::Concat, vec![Expression::path(["x"])]), Expression::path(["x"]));
}

#[test]
fn test_round_modes_on_floats() {
    expect_simplify(call(BuiltinOp::Round, vec![float(-3.5)]), float(-3.0));
    expect_simplify(call(BuiltinOp::RoundEven, vec![float(-3.5)]), float(-4.0));
    expect_simplify(call(BuiltinOp::Round, vec![float(3.5)]), float(4.0));
    expect_simplify(call(BuiltinOp::Trunc, vec![float(-3.5)]), float(-3.0));
    expect_simplify(call(BuiltinOp::Floor, vec![float(-3.5)]), float(-4.0));
    expect_simplify(call(BuiltinOp::Ceil, vec![float(-3.5)]), float(-3.0));
    expect_simplify(call(BuiltinOp::Round, vec![int(7)]), int(7));
}

#[test]
fn test_arithmetic_folds_exactly() {
    expect_simplify(binary(BinaryOperation::Add, int(3), int(4)), int(7));
    expect_simplify(binary(BinaryOperation::Mul, int(6), int(7)), int(42));
    // 2^53 + 1 must not round through a double.
    let big = (1i64 << 53) + 1;
    expect_simplify(binary(BinaryOperation::Add, int(big), int(0)), int(big));
    expect_simplify(binary(BinaryOperation::Div, int(1), int(3)), {
        Expression::Literal(Literal::Rational(num_rational::BigRational::new(
            1.into(),
            3.into(),
        )))
    });
}

#[test]
fn test_division_by_zero_is_missing() {
    expect_simplify(binary(BinaryOperation::Div, int(1), int(0)), missing());
    expect_simplify(binary(BinaryOperation::Mod, int(1), int(0)), missing());
    expect_simplify(binary(BinaryOperation::Div, float(1.0), float(0.0)), missing());
}

#[test]
fn test_arithmetic_with_missing_is_missing() {
    expect_simplify(binary(BinaryOperation::Add, Expression::path(["x"]), missing()), missing());
    expect_simplify(
        Expression::Unary(UnaryExpression::negate(missing())),
        missing(),
    );
}

#[test]
fn test_constants_accumulate_across_additions() {
    let x = || Expression::path(["x"]);
    expect_simplify(
        binary(
            BinaryOperation::Add,
            binary(BinaryOperation::Add, x(), int(1)),
            int(2),
        ),
        binary(BinaryOperation::Add, x(), int(3)),
    );
    // Constants rotate right first: (1 + x) + 2 accumulates the same way.
    expect_simplify(
        binary(
            BinaryOperation::Add,
            binary(BinaryOperation::Add, int(1), x()),
            int(2),
        ),
        binary(BinaryOperation::Add, x(), int(3)),
    );
    // Subtraction feeds the same accumulator.
    expect_simplify(
        binary(
            BinaryOperation::Sub,
            binary(BinaryOperation::Add, x(), int(5)),
            int(2),
        ),
        binary(BinaryOperation::Add, x(), int(3)),
    );
}

#[test]
fn test_shifts_fold_with_64_bit_semantics() {
    expect_simplify(binary(BinaryOperation::Shl, int(1), int(4)), int(16));
    expect_simplify(binary(BinaryOperation::SraShr, int(-8), int(1)), int(-4));
    expect_simplify(binary(BinaryOperation::SrlShr, int(-8), int(1)), int(((-8i64) as u64 >> 1) as i64));
    expect_simplify(binary(BinaryOperation::BitAnd, int(0b1100), int(0b1010)), int(0b1000));
}

#[test]
fn test_logical_constant_reductions() {
    let tested = || is_key(Expression::path(["x"]), IsKey::Null);
    expect_simplify(logical(LogicalOperation::And, tested(), boolean(false)), boolean(false));
    expect_simplify(logical(LogicalOperation::Or, tested(), boolean(true)), boolean(true));
    expect_simplify(logical(LogicalOperation::Or, boolean(false), tested()), tested());
    expect_simplify(logical(LogicalOperation::Xor, boolean(false), tested()), tested());
    expect_simplify(logical(LogicalOperation::Xnor, boolean(true), tested()), tested());
    expect_simplify(
        logical(LogicalOperation::Xor, boolean(true), tested()),
        is_key(Expression::path(["x"]), IsKey::NotNull),
    );
    expect_simplify(logical(LogicalOperation::And, tested(), tested()), tested());
    expect_simplify(logical(LogicalOperation::Or, tested(), tested()), tested());
}

#[test]
fn test_not_pushes_through_inversions() {
    let x = || Expression::path(["x"]);
    expect_simplify(
        Expression::Not(NotExpression::new(compare(ComparisonOperation::Less, x(), int(3)))),
        compare(ComparisonOperation::GreaterEquals, x(), int(3)),
    );
    expect_simplify(
        Expression::Not(NotExpression::new(is_key(x(), IsKey::Null))),
        is_key(x(), IsKey::NotNull),
    );
    expect_simplify(
        Expression::Not(NotExpression::new(logical(
            LogicalOperation::Xor,
            is_key(x(), IsKey::Null),
            is_key(x(), IsKey::Missing),
        ))),
        logical(
            LogicalOperation::Xnor,
            is_key(x(), IsKey::Null),
            is_key(x(), IsKey::Missing),
        ),
    );
    expect_simplify(Expression::Not(NotExpression::new(boolean(true))), boolean(false));
    expect_simplify(Expression::Not(NotExpression::new(Expression::Literal(Literal::Null))), missing());
}

#[test]
fn test_is_on_literals() {
    expect_simplify(is_key(int(3), IsKey::NotNull), boolean(true));
    expect_simplify(is_key(Expression::Literal(Literal::Null), IsKey::Null), boolean(true));
    // PartiQL: an absent value is null, and MISSING is distinct from NULL.
    expect_simplify(is_key(missing(), IsKey::Null), boolean(true));
    expect_simplify(is_key(missing(), IsKey::Missing), boolean(true));
    expect_simplify(is_key(Expression::Literal(Literal::Null), IsKey::Missing), boolean(false));
    expect_simplify(is_key(int(3), IsKey::True), boolean(false));
    expect_simplify(is_key(boolean(false), IsKey::NotTrue), boolean(true));
}

#[test]
fn test_is_decided_by_types() {
    // A comparison can only be bool or missing, never null.
    let cmp = || eq(Expression::path(["x"]), int(3));
    expect_simplify(is_key(is_key(cmp(), IsKey::True), IsKey::Missing), boolean(false));
    expect_simplify(is_key(is_key(cmp(), IsKey::True), IsKey::NotMissing), boolean(true));
    // Arithmetic is never boolean.
    let arith = || binary(BinaryOperation::Add, Expression::path(["x"]), int(1));
    expect_simplify(is_key(arith(), IsKey::True), boolean(false));
    expect_simplify(is_key(arith(), IsKey::NotFalse), boolean(true));
}

#[test]
fn test_x_equals_x_propagates_null() {
    let x = || Expression::path(["x"]);
    let out = simplify(eq(x(), x()), &NoHint);
    // x = x is TRUE where x is present and MISSING otherwise, which is a
    // CASE on x IS NOT NULL.
    let expected = Expression::Case(CaseExpression::new(
        vec![CaseLimb {
            when: is_key(x(), IsKey::NotNull),
            then: boolean(true),
        }],
        Some(missing()),
        Valence::Logical,
    ));
    assert!(out.equivalent(&expected), "got {out}");

    // An IS result is never absent, so its self-equality is just TRUE.
    let self_eq = eq(is_key(x(), IsKey::Null), is_key(x(), IsKey::Null));
    let out = simplify(self_eq, &NoHint);
    assert!(out.equivalent(&boolean(true)), "got {out}");
}

#[test]
fn test_boolean_equality_becomes_xnor() {
    let p = || is_key(Expression::path(["x"]), IsKey::Null);
    let q = || is_key(Expression::path(["y"]), IsKey::Null);
    expect_simplify(eq(p(), q()), logical(LogicalOperation::Xnor, p(), q()));
    expect_simplify(
        compare(ComparisonOperation::NotEquals, p(), q()),
        logical(LogicalOperation::Xor, p(), q()),
    );
    // Against a literal TRUE the XNOR evaporates.
    expect_simplify(eq(p(), boolean(true)), p());
}

#[test]
fn test_comparison_pushes_into_constant_case() {
    let x = || Expression::path(["x"]);
    // CASE WHEN x IS NULL THEN 1 ELSE 2 END = 2 picks out the ELSE branch.
    let input = eq(
        casen(vec![(is_key(x(), IsKey::Null), int(1))], Some(int(2))),
        int(2),
    );
    let expected = casen(
        vec![(is_key(x(), IsKey::Null), boolean(false))],
        Some(boolean(true)),
    );
    expect_simplify(input, expected);
}

#[test]
fn test_dead_limbs_are_dropped() {
    let x = || Expression::path(["x"]);
    let live = || (is_key(x(), IsKey::Null), int(1));
    let input = casen(vec![(boolean(false), int(0)), live()], Some(int(9)));
    expect_simplify(input, casen(vec![live()], Some(int(9))));

    // A literally-true WHEN becomes the ELSE and truncates the rest.
    let input = casen(
        vec![(boolean(true), int(7)), live()],
        Some(int(9)),
    );
    expect_simplify(input, int(7));

    // A trailing limb that matches the ELSE is redundant.
    let input = casen(vec![live(), (is_key(x(), IsKey::Missing), int(9))], Some(int(9)));
    expect_simplify(input, casen(vec![live()], Some(int(9))));

    // No limbs left: the ELSE (or NULL) remains.
    expect_simplify(
        casen(vec![(boolean(false), int(0))], Some(int(9))),
        int(9),
    );
    expect_simplify(
        casen(vec![(boolean(false), int(0))], None),
        Expression::Literal(Literal::Null),
    );
}

#[test]
fn test_coalesce_rules() {
    let x = || Expression::path(["x"]);
    // A present constant in front wins.
    expect_simplify(
        Expression::Coalesce(CoalesceExpression::new(vec![int(3), x()])),
        int(3),
    );
    // Certainly-absent entries disappear.
    expect_simplify(
        Expression::Coalesce(CoalesceExpression::new(vec![
            Expression::Literal(Literal::Null),
            int(5),
        ])),
        int(5),
    );
    // A maybe-null head expands into the NULL-propagating CASE.
    let out = simplify(
        Expression::Coalesce(CoalesceExpression::new(vec![x(), int(0)])),
        &NoHint,
    );
    let expected = Expression::Case(CaseExpression::new(
        vec![CaseLimb { when: is_key(x(), IsKey::NotNull), then: x() }],
        Some(int(0)),
        Valence::Value,
    ));
    assert!(out.equivalent(&expected), "got {out}");
    // Empty after discarding: NULL.
    expect_simplify(
        Expression::Coalesce(CoalesceExpression::new(vec![Expression::Literal(
            Literal::Null,
        )])),
        Expression::Literal(Literal::Null),
    );
}

#[test]
fn test_member_rules() {
    let x = || Expression::path(["x"]);
    // Constant probe: a direct answer.
    expect_simplify(
        Expression::Member(MemberExpression::new(int(2), vec![
            Literal::Integer(1),
            Literal::Integer(2),
        ])),
        boolean(true),
    );
    expect_simplify(
        Expression::Member(MemberExpression::new(int(9), vec![Literal::Integer(1)])),
        boolean(false),
    );
    // A single survivor degenerates to equality.
    expect_simplify(
        Expression::Member(MemberExpression::new(x(), vec![Literal::Integer(1)])),
        eq(x(), int(1)),
    );
    // No survivors: false. (An IS result can never be a string.)
    expect_simplify(
        Expression::Member(MemberExpression::new(
            is_key(x(), IsKey::Null),
            vec![Literal::String("a".into())],
        )),
        boolean(false),
    );
}

#[test]
fn test_cast_rules() {
    let x = || Expression::path(["x"]);
    expect_simplify(
        Expression::Cast(CastExpression::new(x(), TypeSet::NULL)),
        Expression::Literal(Literal::Null),
    );
    expect_simplify(
        Expression::Cast(CastExpression::new(x(), TypeSet::MISSING)),
        missing(),
    );
    expect_simplify(
        Expression::Cast(CastExpression::new(float(3.7), TypeSet::INTEGER)),
        int(3),
    );
    expect_simplify(
        Expression::Cast(CastExpression::new(boolean(true), TypeSet::INTEGER)),
        int(1),
    );
    expect_simplify(
        Expression::Cast(CastExpression::new(int(3), TypeSet::FLOAT)),
        float(3.0),
    );
    expect_simplify(
        Expression::Cast(CastExpression::new(int(42), TypeSet::of(RuntimeType::String))),
        string("42"),
    );
    // Casting a comparison to a list can never convert.
    expect_simplify(
        Expression::Cast(CastExpression::new(eq(x(), int(1)), TypeSet::LIST)),
        missing(),
    );
    // The identity cast vanishes.
    expect_simplify(
        Expression::Cast(CastExpression::new(
            call(BuiltinOp::Upper, vec![x()]),
            TypeSet::of(RuntimeType::String) | TypeSet::MISSING,
        )),
        call(BuiltinOp::Upper, vec![x()]),
    );
}

#[test]
fn test_date_arithmetic_folds() {
    expect_simplify(
        call(
            BuiltinOp::DateAddDay,
            vec![int(2), timestamp("2009-01-14T23:59:59Z")],
        ),
        timestamp("2009-01-16T23:59:59Z"),
    );
    expect_simplify(
        call(
            BuiltinOp::DateAddMonth,
            vec![int(1), timestamp("2020-01-31T00:00:00Z")],
        ),
        timestamp("2020-02-29T00:00:00Z"),
    );
    expect_simplify(
        call(
            BuiltinOp::DateTruncQuarter,
            vec![timestamp("2009-05-14T23:59:59Z")],
        ),
        timestamp("2009-04-01T00:00:00Z"),
    );
    expect_simplify(
        call(
            BuiltinOp::DateDiffHour,
            vec![
                timestamp("2009-01-14T00:00:00Z"),
                timestamp("2009-01-14T05:30:00Z"),
            ],
        ),
        int(5),
    );
    expect_simplify(
        call(BuiltinOp::DateExtractDow, vec![timestamp("2009-01-14T00:00:00Z")]),
        int(3),
    );
}

#[test]
fn test_transcendental_folds() {
    expect_simplify(call(BuiltinOp::Sqrt, vec![int(9)]), float(3.0));
    expect_simplify(call(BuiltinOp::Ln, vec![int(1)]), float(0.0));
    expect_simplify(call(BuiltinOp::Pow, vec![int(2), int(10)]), float(1024.0));
    expect_simplify(call(BuiltinOp::Atan2, vec![float(0.0), float(1.0)]), float(0.0));
    expect_simplify(call(BuiltinOp::Abs, vec![int(-7)]), int(7));
    expect_simplify(call(BuiltinOp::Sign, vec![float(-2.5)]), int(-1));
    expect_simplify(call(BuiltinOp::BitCount, vec![int(0b1011)]), int(3));
}

#[test]
fn test_string_folds() {
    expect_simplify(call(BuiltinOp::CharLength, vec![string("héllo")]), int(5));
    expect_simplify(
        call(BuiltinOp::Substring, vec![string("hello"), int(2), int(3)]),
        string("ell"),
    );
    // Offsets below one normalize to one.
    expect_simplify(
        call(BuiltinOp::Substring, vec![string("hello"), int(-1)]),
        string("hello"),
    );
    expect_simplify(
        call(BuiltinOp::SplitPart, vec![string("a,b,c"), string(","), int(2)]),
        string("b"),
    );
    expect_simplify(
        call(BuiltinOp::Trim, vec![string("  pad  ")]),
        string("pad"),
    );
    expect_simplify(
        call(BuiltinOp::Rtrim, vec![string("xxpadxx"), string("x")]),
        string("xxpad"),
    );
    expect_simplify(
        call(BuiltinOp::Contains, vec![string("haystack"), string("sta")]),
        boolean(true),
    );
    expect_simplify(
        call(BuiltinOp::EqualsCi, vec![string("FRED"), string("fred")]),
        boolean(true),
    );
}

#[test]
fn test_structural_folds() {
    expect_simplify(
        call(BuiltinOp::TypeBit, vec![string("s")]),
        int(16),
    );
    expect_simplify(call(BuiltinOp::TypeBit, vec![missing()]), int(0));
    expect_simplify(
        call(BuiltinOp::MakeList, vec![int(1), string("two")]),
        Expression::Literal(Literal::List(vec![
            Literal::Integer(1),
            Literal::String("two".into()),
        ])),
    );
    expect_simplify(
        call(BuiltinOp::MakeStruct, vec![string("x"), int(1)]),
        Expression::Literal(Literal::Struct(vec![("x".into(), Literal::Integer(1))])),
    );
    expect_simplify(
        call(
            BuiltinOp::HashLookup,
            vec![string("f"), string("f"), int(1), string("g"), int(2)],
        ),
        int(1),
    );
    expect_simplify(
        call(BuiltinOp::HashLookup, vec![string("q"), string("f"), int(1)]),
        missing(),
    );
    expect_simplify(
        call(
            BuiltinOp::HashLookup,
            vec![string("q"), string("f"), int(1), int(9)],
        ),
        int(9),
    );
}

#[test]
fn test_logic_context_absent_operands() {
    let null = || Expression::Literal(Literal::Null);
    let tested = || is_key(Expression::path(["x"]), IsKey::Null);
    // In a WHERE, a provably absent AND side can never let the row pass.
    expect_simplify_logic(logical(LogicalOperation::And, null(), tested()), boolean(false));
    // An absent OR side just disappears.
    expect_simplify_logic(logical(LogicalOperation::Or, null(), tested()), tested());
    // A comparison against a certain NULL is never true.
    expect_simplify_logic(eq(Expression::path(["x"]), null()), boolean(false));
    // Value context must NOT do any of this.
    let kept = simplify(logical(LogicalOperation::And, null(), tested()), &NoHint);
    assert!(matches!(kept, Expression::Logical(_)), "got {kept}");
}

#[test]
fn test_logic_context_self_equality_becomes_presence_test() {
    let x = || Expression::path(["x"]);
    // Under IS TRUE the x = x CASE reduces to the bare presence test.
    expect_simplify_logic(eq(x(), x()), is_key(x(), IsKey::NotNull));
}

#[test]
fn test_type_narrowing_never_widens() {
    let samples = vec![
        eq(int(3), int(4)),
        logical(LogicalOperation::And, boolean(true), is_key(Expression::path(["x"]), IsKey::Null)),
        binary(BinaryOperation::Add, binary(BinaryOperation::Add, Expression::path(["x"]), int(1)), int(2)),
        call(BuiltinOp::Upper, vec![string("tarn")]),
        casen(vec![(boolean(false), int(0))], None),
        Expression::Coalesce(CoalesceExpression::new(vec![Expression::path(["x"]), int(0)])),
    ];
    for expr in samples {
        let before = type_of(&expr, &NoHint);
        let after = type_of(&simplify(expr.clone(), &NoHint), &NoHint);
        assert!(
            after.only(before),
            "{expr}: simplification widened {before} to {after}"
        );
    }
}

#[test]
fn test_aggregate_operands_simplify() {
    let input = Expression::Aggregate(AggregateExpression::new(
        AggregateOperation::Sum,
        binary(BinaryOperation::Add, int(1), int(2)),
    ));
    expect_simplify(
        input,
        Expression::Aggregate(AggregateExpression::new(AggregateOperation::Sum, int(3))),
    );
}

/// A hint that narrows one path to a fixed type set.
struct FixedHint {
    path: Expression,
    narrowed: TypeSet,
}

impl TypeHint for FixedHint {
    fn type_of(&self, path: &Expression) -> TypeSet {
        if path.equivalent(&self.path) {
            self.narrowed
        } else {
            TypeSet::ANY
        }
    }
}

#[test]
fn test_hint_narrows_is_tests() {
    let x = Expression::path(["t", "x"]);
    let hint = FixedHint { path: x.clone(), narrowed: TypeSet::of(RuntimeType::String) };
    // The schema says t.x is always a present string.
    let out = simplify(is_key(x.clone(), IsKey::NotMissing), &hint);
    assert!(out.equivalent(&boolean(true)), "got {out}");
    let out = simplify(is_key(x.clone(), IsKey::Null), &hint);
    assert!(out.equivalent(&boolean(false)), "got {out}");
    let out = simplify(is_key(x.clone(), IsKey::True), &hint);
    assert!(out.equivalent(&boolean(false)), "got {out}");
    // Without the hint none of that is known.
    let kept = simplify(is_key(x, IsKey::NotMissing), &NoHint);
    assert!(matches!(kept, Expression::Is(_)), "got {kept}");
}
