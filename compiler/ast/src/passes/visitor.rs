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

use crate::*;

/// A read-only traversal over borrowed expressions.
///
/// The default methods visit every child and return `Output::default()`;
/// an implementation overrides the node kinds it inspects.
pub trait ExpressionVisitor<'a> {
    type Output: Default;

    fn visit_expression(&mut self, input: &'a Expression) -> Self::Output {
        match input {
            Expression::Aggregate(aggregate) => self.visit_aggregate(aggregate),
            Expression::Binary(binary) => self.visit_binary(binary),
            Expression::Builtin(builtin) => self.visit_builtin(builtin),
            Expression::Case(case) => self.visit_case(case),
            Expression::Cast(cast) => self.visit_cast(cast),
            Expression::Coalesce(coalesce) => self.visit_coalesce(coalesce),
            Expression::Comparison(comparison) => self.visit_comparison(comparison),
            Expression::Dot(dot) => self.visit_dot(dot),
            Expression::Ident(ident) => self.visit_ident(ident),
            Expression::Index(index) => self.visit_index(index),
            Expression::Is(is) => self.visit_is(is),
            Expression::Literal(literal) => self.visit_literal(literal),
            Expression::Logical(logical) => self.visit_logical(logical),
            Expression::Member(member) => self.visit_member(member),
            Expression::Not(not) => self.visit_not(not),
            Expression::Unary(unary) => self.visit_unary(unary),
        }
    }

    fn visit_aggregate(&mut self, input: &'a AggregateExpression) -> Self::Output {
        self.visit_expression(&input.operand);
        if let Some(filter) = &input.filter {
            self.visit_expression(filter);
        }
        Default::default()
    }

    fn visit_binary(&mut self, input: &'a BinaryExpression) -> Self::Output {
        self.visit_expression(&input.left);
        self.visit_expression(&input.right);
        Default::default()
    }

    fn visit_builtin(&mut self, input: &'a BuiltinExpression) -> Self::Output {
        for arg in &input.args {
            self.visit_expression(arg);
        }
        Default::default()
    }

    fn visit_case(&mut self, input: &'a CaseExpression) -> Self::Output {
        for limb in &input.limbs {
            self.visit_expression(&limb.when);
            self.visit_expression(&limb.then);
        }
        if let Some(otherwise) = &input.otherwise {
            self.visit_expression(otherwise);
        }
        Default::default()
    }

    fn visit_cast(&mut self, input: &'a CastExpression) -> Self::Output {
        self.visit_expression(&input.operand);
        Default::default()
    }

    fn visit_coalesce(&mut self, input: &'a CoalesceExpression) -> Self::Output {
        for arg in &input.args {
            self.visit_expression(arg);
        }
        Default::default()
    }

    fn visit_comparison(&mut self, input: &'a ComparisonExpression) -> Self::Output {
        self.visit_expression(&input.left);
        self.visit_expression(&input.right);
        Default::default()
    }

    fn visit_dot(&mut self, input: &'a DotAccess) -> Self::Output {
        self.visit_expression(&input.inner);
        Default::default()
    }

    fn visit_ident(&mut self, _input: &'a Identifier) -> Self::Output {
        Default::default()
    }

    fn visit_index(&mut self, input: &'a IndexAccess) -> Self::Output {
        self.visit_expression(&input.inner);
        Default::default()
    }

    fn visit_is(&mut self, input: &'a IsExpression) -> Self::Output {
        self.visit_expression(&input.operand);
        Default::default()
    }

    fn visit_literal(&mut self, _input: &'a Literal) -> Self::Output {
        Default::default()
    }

    fn visit_logical(&mut self, input: &'a LogicalExpression) -> Self::Output {
        self.visit_expression(&input.left);
        self.visit_expression(&input.right);
        Default::default()
    }

    fn visit_member(&mut self, input: &'a MemberExpression) -> Self::Output {
        self.visit_expression(&input.operand);
        Default::default()
    }

    fn visit_not(&mut self, input: &'a NotExpression) -> Self::Output {
        self.visit_expression(&input.operand);
        Default::default()
    }

    fn visit_unary(&mut self, input: &'a UnaryExpression) -> Self::Output {
        self.visit_expression(&input.operand);
        Default::default()
    }
}
