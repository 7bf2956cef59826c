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

use super::check::TypeChecker;
use crate::builtins;

use tarn_ast::{
    AggregateExpression, AggregateOperation, BinaryExpression, BinaryOperation,
    BuiltinExpression, CaseExpression, CastExpression, CoalesceExpression,
    ComparisonExpression, ComparisonOperation, ExpressionVisitor, Literal,
    LogicalExpression, NotExpression, TypeSet, UnaryExpression,
};
use tarn_errors::TarnError;

impl<'a, 'h> ExpressionVisitor<'a> for TypeChecker<'h> {
    type Output = ();

    fn visit_binary(&mut self, input: &'a BinaryExpression) {
        self.visit_expression(&input.left);
        self.visit_expression(&input.right);
        let want = match input.op {
            BinaryOperation::BitAnd
            | BinaryOperation::BitOr
            | BinaryOperation::BitXor
            | BinaryOperation::Shl
            | BinaryOperation::SraShr
            | BinaryOperation::SrlShr => TypeSet::INTEGER,
            _ => TypeSet::NUMERIC,
        };
        let what = format!("operand of `{}`", input.op);
        self.expect_type(&input.left, want, &what);
        self.expect_type(&input.right, want, &what);
    }

    fn visit_unary(&mut self, input: &'a UnaryExpression) {
        self.visit_expression(&input.operand);
        self.expect_type(&input.operand, TypeSet::NUMERIC, "negated operand");
    }

    fn visit_comparison(&mut self, input: &'a ComparisonExpression) {
        self.visit_expression(&input.left);
        self.visit_expression(&input.right);
        match input.op {
            ComparisonOperation::Like | ComparisonOperation::Ilike => {
                self.expect_type(&input.left, TypeSet::STRING, "pattern-match subject");
                if input.right.as_literal().and_then(Literal::as_str).is_none() {
                    self.emit_err(TarnError::syntax_error(format!(
                        "{} pattern must be a string literal, found `{}`",
                        input.op, input.right
                    )));
                }
            }
            op if op.is_ordering() => {
                let (lt, rt) = (self.type_of(&input.left), self.type_of(&input.right));
                // Absent operands compare to an absent result, never an
                // error; anything else must overlap somewhere.
                let absent = TypeSet::NULL | TypeSet::MISSING;
                if !lt.comparable(rt) && !lt.only(absent) && !rt.only(absent) {
                    self.emit_err(
                        TarnError::type_error(format!(
                            "operands of `{}` can never compare: {lt} against {rt}",
                            input.op
                        ))
                        .errat(input),
                    );
                }
            }
            _ => {}
        }
    }

    fn visit_logical(&mut self, input: &'a LogicalExpression) {
        self.visit_expression(&input.left);
        self.visit_expression(&input.right);
        let what = format!("operand of `{}`", input.op);
        self.expect_type(&input.left, TypeSet::BOOL, &what);
        self.expect_type(&input.right, TypeSet::BOOL, &what);
    }

    fn visit_not(&mut self, input: &'a NotExpression) {
        self.visit_expression(&input.operand);
        self.expect_type(&input.operand, TypeSet::BOOL, "operand of NOT");
    }

    fn visit_cast(&mut self, input: &'a CastExpression) {
        self.visit_expression(&input.operand);
        if input.target.is_empty() {
            self.emit_err(TarnError::syntax_error("CAST target is the empty type set"));
        }
    }

    fn visit_case(&mut self, input: &'a CaseExpression) {
        for limb in &input.limbs {
            self.visit_expression(&limb.when);
            self.visit_expression(&limb.then);
            self.expect_type(&limb.when, TypeSet::BOOL, "WHEN condition");
        }
        if let Some(otherwise) = &input.otherwise {
            self.visit_expression(otherwise);
        }
    }

    fn visit_coalesce(&mut self, input: &'a CoalesceExpression) {
        if input.args.is_empty() {
            self.emit_err(TarnError::syntax_error("COALESCE expects at least 1 argument"));
        }
        for arg in &input.args {
            self.visit_expression(arg);
        }
    }

    fn visit_builtin(&mut self, input: &'a BuiltinExpression) {
        for arg in &input.args {
            self.visit_expression(arg);
        }
        if let Err(err) = builtins::check_builtin(self.hint, input) {
            self.emit_err(err.errat(input));
        }
    }

    fn visit_aggregate(&mut self, input: &'a AggregateExpression) {
        self.visit_expression(&input.operand);
        if let Some(filter) = &input.filter {
            self.visit_expression(filter);
            self.expect_type(filter, TypeSet::BOOL, "FILTER predicate");
        }
        let what = format!("operand of {}", input.op);
        match input.op {
            AggregateOperation::Sum | AggregateOperation::Avg => {
                self.expect_type(&input.operand, TypeSet::NUMERIC, &what);
            }
            AggregateOperation::BoolAnd | AggregateOperation::BoolOr => {
                self.expect_type(&input.operand, TypeSet::BOOL, &what);
            }
            AggregateOperation::Earliest | AggregateOperation::Latest => {
                self.expect_type(&input.operand, TypeSet::TIME, &what);
            }
            AggregateOperation::Count | AggregateOperation::Min | AggregateOperation::Max => {}
        }
    }
}
