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

/// A rewriting traversal over owned expressions.
///
/// The default methods reconstruct each child and rebuild the node
/// unchanged, so an implementation overrides only the node kinds it
/// rewrites. Children are always reconstructed before the parent sees them.
pub trait ExpressionReconstructor {
    fn reconstruct_expression(&mut self, input: Expression) -> Expression {
        match input {
            Expression::Aggregate(aggregate) => self.reconstruct_aggregate(aggregate),
            Expression::Binary(binary) => self.reconstruct_binary(binary),
            Expression::Builtin(builtin) => self.reconstruct_builtin(builtin),
            Expression::Case(case) => self.reconstruct_case(case),
            Expression::Cast(cast) => self.reconstruct_cast(cast),
            Expression::Coalesce(coalesce) => self.reconstruct_coalesce(coalesce),
            Expression::Comparison(comparison) => self.reconstruct_comparison(comparison),
            Expression::Dot(dot) => self.reconstruct_dot(dot),
            Expression::Ident(ident) => self.reconstruct_ident(ident),
            Expression::Index(index) => self.reconstruct_index(index),
            Expression::Is(is) => self.reconstruct_is(is),
            Expression::Literal(literal) => self.reconstruct_literal(literal),
            Expression::Logical(logical) => self.reconstruct_logical(logical),
            Expression::Member(member) => self.reconstruct_member(member),
            Expression::Not(not) => self.reconstruct_not(not),
            Expression::Unary(unary) => self.reconstruct_unary(unary),
        }
    }

    fn reconstruct_aggregate(&mut self, input: AggregateExpression) -> Expression {
        Expression::Aggregate(AggregateExpression {
            op: input.op,
            operand: Box::new(self.reconstruct_expression(*input.operand)),
            filter: input.filter.map(|f| Box::new(self.reconstruct_expression(*f))),
            distinct: input.distinct,
        })
    }

    fn reconstruct_binary(&mut self, input: BinaryExpression) -> Expression {
        Expression::Binary(BinaryExpression {
            op: input.op,
            left: Box::new(self.reconstruct_expression(*input.left)),
            right: Box::new(self.reconstruct_expression(*input.right)),
        })
    }

    fn reconstruct_builtin(&mut self, input: BuiltinExpression) -> Expression {
        Expression::Builtin(BuiltinExpression {
            func: input.func,
            args: input.args.into_iter().map(|arg| self.reconstruct_expression(arg)).collect(),
        })
    }

    fn reconstruct_case(&mut self, input: CaseExpression) -> Expression {
        Expression::Case(CaseExpression {
            limbs: input
                .limbs
                .into_iter()
                .map(|limb| CaseLimb {
                    when: self.reconstruct_expression(limb.when),
                    then: self.reconstruct_expression(limb.then),
                })
                .collect(),
            otherwise: input.otherwise.map(|e| Box::new(self.reconstruct_expression(*e))),
            valence: input.valence,
        })
    }

    fn reconstruct_cast(&mut self, input: CastExpression) -> Expression {
        Expression::Cast(CastExpression {
            operand: Box::new(self.reconstruct_expression(*input.operand)),
            target: input.target,
        })
    }

    fn reconstruct_coalesce(&mut self, input: CoalesceExpression) -> Expression {
        Expression::Coalesce(CoalesceExpression {
            args: input.args.into_iter().map(|arg| self.reconstruct_expression(arg)).collect(),
        })
    }

    fn reconstruct_comparison(&mut self, input: ComparisonExpression) -> Expression {
        Expression::Comparison(ComparisonExpression {
            op: input.op,
            left: Box::new(self.reconstruct_expression(*input.left)),
            right: Box::new(self.reconstruct_expression(*input.right)),
        })
    }

    fn reconstruct_dot(&mut self, input: DotAccess) -> Expression {
        Expression::Dot(DotAccess {
            inner: Box::new(self.reconstruct_expression(*input.inner)),
            field: input.field,
        })
    }

    fn reconstruct_ident(&mut self, input: Identifier) -> Expression {
        Expression::Ident(input)
    }

    fn reconstruct_index(&mut self, input: IndexAccess) -> Expression {
        Expression::Index(IndexAccess {
            inner: Box::new(self.reconstruct_expression(*input.inner)),
            offset: input.offset,
        })
    }

    fn reconstruct_is(&mut self, input: IsExpression) -> Expression {
        Expression::Is(IsExpression {
            operand: Box::new(self.reconstruct_expression(*input.operand)),
            key: input.key,
        })
    }

    fn reconstruct_literal(&mut self, input: Literal) -> Expression {
        Expression::Literal(input)
    }

    fn reconstruct_logical(&mut self, input: LogicalExpression) -> Expression {
        Expression::Logical(LogicalExpression {
            op: input.op,
            left: Box::new(self.reconstruct_expression(*input.left)),
            right: Box::new(self.reconstruct_expression(*input.right)),
        })
    }

    fn reconstruct_member(&mut self, input: MemberExpression) -> Expression {
        Expression::Member(MemberExpression {
            operand: Box::new(self.reconstruct_expression(*input.operand)),
            values: input.values,
        })
    }

    fn reconstruct_not(&mut self, input: NotExpression) -> Expression {
        Expression::Not(NotExpression {
            operand: Box::new(self.reconstruct_expression(*input.operand)),
        })
    }

    fn reconstruct_unary(&mut self, input: UnaryExpression) -> Expression {
        Expression::Unary(UnaryExpression {
            op: input.op,
            operand: Box::new(self.reconstruct_expression(*input.operand)),
        })
    }
}
