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
use tarn_errors::TarnError;
use tarn_passes::check;

fn int(i: i64) -> Expression {
    Expression::Literal(Literal::Integer(i))
}

fn string(s: &str) -> Expression {
    Expression::Literal(Literal::String(s.to_string()))
}

fn call(func: BuiltinOp, args: Vec<Expression>) -> Expression {
    Expression::Builtin(BuiltinExpression::new(func, args))
}

fn expect_type_error(expr: Expression) {
    match check(&expr) {
        Err(TarnError::Type(_)) => {}
        other => panic!("{expr}: expected a type error, got {other:?}"),
    }
}

fn expect_syntax_error(expr: Expression) {
    match check(&expr) {
        Err(TarnError::Syntax(_)) => {}
        other => panic!("{expr}: expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_well_formed_passes() {
    let x = || Expression::path(["t", "x"]);
    let exprs = vec![
        call(BuiltinOp::Upper, vec![x()]),
        call(BuiltinOp::Substring, vec![x(), int(1), int(3)]),
        call(BuiltinOp::Trim, vec![x(), string("/ ")]),
        call(BuiltinOp::Contains, vec![x(), string("needle")]),
        call(BuiltinOp::IsSubnetOf, vec![string("10.0.0.0/8"), x()]),
        call(BuiltinOp::DateAddDay, vec![int(1), x()]),
        call(BuiltinOp::HashLookup, vec![x(), int(1), string("a")]),
        Expression::Comparison(ComparisonExpression::new(
            ComparisonOperation::Less,
            x(),
            int(3),
        )),
        Expression::Logical(LogicalExpression::new(
            LogicalOperation::And,
            Expression::Is(IsExpression::new(x(), IsKey::NotNull)),
            Expression::Literal(Literal::Bool(true)),
        )),
        // NULL arguments are absence, not type violations.
        call(BuiltinOp::Upper, vec![Expression::Literal(Literal::Null)]),
    ];
    for expr in exprs {
        assert!(check(&expr).is_ok(), "{expr}: {:?}", check(&expr));
    }
}

#[test]
fn test_string_op_rejects_numbers() {
    expect_type_error(call(BuiltinOp::Upper, vec![int(3)]));
    expect_type_error(call(BuiltinOp::CharLength, vec![int(3)]));
}

#[test]
fn test_math_op_rejects_strings() {
    expect_type_error(call(BuiltinOp::Abs, vec![string("x")]));
    expect_type_error(Expression::Binary(BinaryExpression::new(
        BinaryOperation::Add,
        string("a"),
        int(1),
    )));
    expect_type_error(Expression::Unary(UnaryExpression::negate(string("a"))));
}

#[test]
fn test_arity_violations() {
    expect_syntax_error(call(BuiltinOp::Upper, vec![]));
    expect_syntax_error(call(BuiltinOp::Upper, vec![string("a"), string("b")]));
    expect_syntax_error(call(BuiltinOp::Substring, vec![string("a")]));
    expect_syntax_error(call(BuiltinOp::HashLookup, vec![Expression::path(["x"]), int(1)]));
}

#[test]
fn test_contains_needle_must_be_literal() {
    expect_syntax_error(call(
        BuiltinOp::Contains,
        vec![Expression::path(["s"]), Expression::path(["needle"])],
    ));
    expect_syntax_error(call(BuiltinOp::Contains, vec![Expression::path(["s"]), int(3)]));
}

#[test]
fn test_hash_lookup_keys_must_be_constant() {
    // The key in position 1 is a path, not a constant; the checker must
    // return (not merely record) the violation.
    let err = check(&call(
        BuiltinOp::HashLookup,
        vec![Expression::path(["x"]), Expression::path(["k"]), int(1)],
    ));
    assert!(matches!(err, Err(TarnError::Syntax(_))), "got {err:?}");
}

#[test]
fn test_trim_cutset_constraints() {
    let s = || Expression::path(["s"]);
    expect_syntax_error(call(BuiltinOp::Trim, vec![s(), string("")]));
    expect_syntax_error(call(BuiltinOp::Trim, vec![s(), string("abcde")]));
    expect_syntax_error(call(BuiltinOp::Trim, vec![s(), string("é")]));
    expect_syntax_error(call(BuiltinOp::Ltrim, vec![s(), Expression::path(["cut"])]));
    assert!(check(&call(BuiltinOp::Rtrim, vec![s(), string("/.")])).is_ok());
}

#[test]
fn test_split_part_separator() {
    let s = || Expression::path(["s"]);
    expect_syntax_error(call(
        BuiltinOp::SplitPart,
        vec![s(), string(",,"), int(1)],
    ));
    expect_syntax_error(call(BuiltinOp::SplitPart, vec![s(), Expression::path(["sep"]), int(1)]));
    assert!(check(&call(BuiltinOp::SplitPart, vec![s(), string(","), int(1)])).is_ok());
}

#[test]
fn test_subnet_arguments() {
    let ip = || Expression::path(["ip"]);
    expect_syntax_error(call(BuiltinOp::IsSubnetOf, vec![string("not-a-cidr"), ip()]));
    expect_syntax_error(call(BuiltinOp::IsSubnetOf, vec![string("10.0.0.0/40"), ip()]));
    expect_syntax_error(call(BuiltinOp::IsSubnetOf, vec![ip(), ip()]));
    assert!(check(&call(
        BuiltinOp::IsSubnetOf,
        vec![string("10.0.0.0"), string("10.0.0.9"), ip()]
    ))
    .is_ok());
}

#[test]
fn test_like_pattern_must_be_literal() {
    expect_syntax_error(Expression::Comparison(ComparisonExpression::new(
        ComparisonOperation::Like,
        Expression::path(["s"]),
        Expression::path(["pattern"]),
    )));
}

#[test]
fn test_ordering_across_kinds() {
    // `3 < 'x'` can never compare.
    expect_type_error(Expression::Comparison(ComparisonExpression::new(
        ComparisonOperation::Less,
        int(3),
        string("x"),
    )));
    // Equality across kinds is legal; it folds to FALSE instead.
    assert!(check(&Expression::Comparison(ComparisonExpression::new(
        ComparisonOperation::Equals,
        int(3),
        string("x"),
    )))
    .is_ok());
}

#[test]
fn test_logical_operands_must_be_boolean() {
    expect_type_error(Expression::Logical(LogicalExpression::new(
        LogicalOperation::And,
        int(1),
        Expression::Literal(Literal::Bool(true)),
    )));
    expect_type_error(Expression::Not(NotExpression::new(string("x"))));
}

#[test]
fn test_coalesce_requires_arguments() {
    expect_syntax_error(Expression::Coalesce(CoalesceExpression::new(vec![])));
}

#[test]
fn test_cast_target_must_be_non_empty() {
    expect_syntax_error(Expression::Cast(CastExpression::new(
        Expression::path(["x"]),
        TypeSet::EMPTY,
    )));
    assert!(check(&Expression::Cast(CastExpression::new(
        Expression::path(["x"]),
        TypeSet::INTEGER | TypeSet::MISSING,
    )))
    .is_ok());
}

#[test]
fn test_make_struct_shape() {
    expect_syntax_error(call(BuiltinOp::MakeStruct, vec![string("x")]));
    expect_syntax_error(call(BuiltinOp::MakeStruct, vec![int(1), int(2)]));
    assert!(check(&call(BuiltinOp::MakeStruct, vec![string("x"), int(2)])).is_ok());
}

#[test]
fn test_table_ops_take_one_literal_pattern() {
    expect_syntax_error(call(BuiltinOp::TableGlob, vec![Expression::path(["p"])]));
    assert!(check(&call(BuiltinOp::TableGlob, vec![string("db/table/*")])).is_ok());
    assert!(BuiltinOp::TableGlob.is_table());
}

#[test]
fn test_innermost_error_wins() {
    // The bad UPPER is nested inside a well-formed comparison; the error
    // must reference the inner call.
    let expr = Expression::Comparison(ComparisonExpression::new(
        ComparisonOperation::Equals,
        call(BuiltinOp::Upper, vec![int(3)]),
        string("X"),
    ));
    let err = check(&expr).unwrap_err();
    assert_eq!(err.node(), Some("3"), "got {err}");
}

#[test]
fn test_aggregate_operand_types() {
    expect_type_error(Expression::Aggregate(AggregateExpression::new(
        AggregateOperation::Sum,
        string("a"),
    )));
    assert!(check(&Expression::Aggregate(AggregateExpression::new(
        AggregateOperation::Count,
        Expression::path(["x"]),
    )))
    .is_ok());
}
