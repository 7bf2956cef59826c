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

use super::{arithmetic, case, cast, coalesce, comparison, is, logical, member};
use crate::builtins;

use tarn_ast::{
    type_of, AggregateExpression, BinaryExpression, BuiltinExpression, CaseExpression,
    CaseLimb, CastExpression, CoalesceExpression, ComparisonExpression, Expression,
    ExpressionReconstructor, IsExpression, IsKey, LogicalExpression, LogicalOperation,
    MemberExpression, NotExpression, TypeHint, TypeSet, UnaryExpression,
};

use tracing::trace;

/// Rewrites `expr` into a smaller, canonical equivalent for a value
/// position: the result must evaluate to exactly the same datum.
pub fn simplify(expr: Expression, hint: &dyn TypeHint) -> Expression {
    let out = Simplifier::new(hint).reconstruct_expression(expr);
    trace!(output = %out, "value-context simplification complete");
    out
}

/// Rewrites `expr` for a position whose result is only ever tested against
/// IS TRUE (WHERE, ON, HAVING). NULL and MISSING results are
/// indistinguishable from FALSE there, which licenses stronger rewrites
/// than [`simplify`].
pub fn simplify_logic(expr: Expression, hint: &dyn TypeHint) -> Expression {
    let out = Simplifier::new_logical(hint).reconstruct_expression(expr);
    trace!(output = %out, "logical-context simplification complete");
    out
}

/// The rewriting pass. One instance walks one tree; the `logical` flag
/// tracks whether the node currently being visited feeds an IS TRUE test,
/// and is saved and restored around every child whose context differs.
pub struct Simplifier<'a> {
    hint: &'a dyn TypeHint,
    logical: bool,
}

impl<'a> Simplifier<'a> {
    pub fn new(hint: &'a dyn TypeHint) -> Self {
        Simplifier { hint, logical: false }
    }

    pub fn new_logical(hint: &'a dyn TypeHint) -> Self {
        Simplifier { hint, logical: true }
    }

    /// Whether the current node's result is only tested against IS TRUE.
    pub(crate) fn in_logical_context(&self) -> bool {
        self.logical
    }

    pub(crate) fn type_of(&self, expr: &Expression) -> TypeSet {
        type_of(expr, self.hint)
    }

    /// Whether `expr` is provably NULL or MISSING.
    pub(crate) fn always_absent(&self, expr: &Expression) -> bool {
        self.type_of(expr).only(TypeSet::NULL | TypeSet::MISSING)
    }

    /// Runs a rewrite with the logical flag pinned to `logical`, restoring
    /// the caller's context afterwards.
    pub(crate) fn in_context(
        &mut self,
        logical: bool,
        rewrite: impl FnOnce(&mut Self) -> Expression,
    ) -> Expression {
        let prior = self.logical;
        self.logical = logical;
        let out = rewrite(self);
        self.logical = prior;
        out
    }

    /// Re-simplifies a subtree a rule just built. The rule must guarantee
    /// the new subtree is strictly smaller or more canonical than what it
    /// replaced, or this would not terminate.
    pub(crate) fn resimplify(&mut self, expr: Expression) -> Expression {
        self.reconstruct_expression(expr)
    }
}

impl ExpressionReconstructor for Simplifier<'_> {
    fn reconstruct_binary(&mut self, input: BinaryExpression) -> Expression {
        let left = self.in_context(false, |s| s.reconstruct_expression(*input.left));
        let right = self.in_context(false, |s| s.reconstruct_expression(*input.right));
        arithmetic::simplify_binary(self, BinaryExpression::new(input.op, left, right))
    }

    fn reconstruct_unary(&mut self, input: UnaryExpression) -> Expression {
        let operand = self.in_context(false, |s| s.reconstruct_expression(*input.operand));
        arithmetic::simplify_unary(self, UnaryExpression { op: input.op, operand: Box::new(operand) })
    }

    fn reconstruct_comparison(&mut self, input: ComparisonExpression) -> Expression {
        let left = self.in_context(false, |s| s.reconstruct_expression(*input.left));
        let right = self.in_context(false, |s| s.reconstruct_expression(*input.right));
        comparison::simplify_comparison(self, ComparisonExpression::new(input.op, left, right))
    }

    fn reconstruct_logical(&mut self, input: LogicalExpression) -> Expression {
        // AND/OR operands inherit the IS TRUE context: an absent operand
        // makes the whole node not-true. XOR/XNOR see absent operands in
        // their result, so their operands are value positions.
        let inherit =
            self.logical && matches!(input.op, LogicalOperation::And | LogicalOperation::Or);
        let left = self.in_context(inherit, |s| s.reconstruct_expression(*input.left));
        let right = self.in_context(inherit, |s| s.reconstruct_expression(*input.right));
        logical::simplify_logical(self, LogicalExpression::new(input.op, left, right))
    }

    fn reconstruct_not(&mut self, input: NotExpression) -> Expression {
        // NOT is not transparent to IS TRUE: `NOT x` is true iff x is
        // false, so x must keep its value semantics.
        let operand = self.in_context(false, |s| s.reconstruct_expression(*input.operand));
        logical::simplify_not(self, NotExpression::new(operand))
    }

    fn reconstruct_is(&mut self, input: IsExpression) -> Expression {
        // `x IS TRUE` holds exactly when x is true, so the operand may be
        // simplified as if it fed an IS TRUE test directly.
        let operand_logical = input.key == IsKey::True;
        let operand =
            self.in_context(operand_logical, |s| s.reconstruct_expression(*input.operand));
        is::simplify_is(self, IsExpression::new(operand, input.key))
    }

    fn reconstruct_case(&mut self, input: CaseExpression) -> Expression {
        // WHEN arms are IS TRUE tests by CASE semantics, in any context.
        // THEN arms and the ELSE produce the CASE's value and inherit the
        // caller's context.
        let limbs = input
            .limbs
            .into_iter()
            .map(|limb| CaseLimb {
                when: self.in_context(true, |s| s.reconstruct_expression(limb.when)),
                then: self.reconstruct_expression(limb.then),
            })
            .collect();
        let otherwise = input.otherwise.map(|e| self.reconstruct_expression(*e));
        case::simplify_case(
            self,
            CaseExpression::new(limbs, otherwise, input.valence),
        )
    }

    fn reconstruct_cast(&mut self, input: CastExpression) -> Expression {
        let operand = self.in_context(false, |s| s.reconstruct_expression(*input.operand));
        cast::simplify_cast(self, CastExpression::new(operand, input.target))
    }

    fn reconstruct_coalesce(&mut self, input: CoalesceExpression) -> Expression {
        let args = input
            .args
            .into_iter()
            .map(|arg| self.in_context(false, |s| s.reconstruct_expression(arg)))
            .collect();
        coalesce::simplify_coalesce(self, CoalesceExpression::new(args))
    }

    fn reconstruct_member(&mut self, input: MemberExpression) -> Expression {
        let operand = self.in_context(false, |s| s.reconstruct_expression(*input.operand));
        member::simplify_member(self, MemberExpression { operand: Box::new(operand), values: input.values })
    }

    fn reconstruct_builtin(&mut self, input: BuiltinExpression) -> Expression {
        let args = input
            .args
            .into_iter()
            .map(|arg| self.in_context(false, |s| s.reconstruct_expression(arg)))
            .collect();
        let node = BuiltinExpression::new(input.func, args);
        match builtins::fold_builtin(&node) {
            Some(out) => {
                trace!(from = %node, to = %out, "folded builtin");
                self.resimplify(out)
            }
            None => Expression::Builtin(node),
        }
    }

    fn reconstruct_aggregate(&mut self, input: AggregateExpression) -> Expression {
        let operand = self.in_context(false, |s| s.reconstruct_expression(*input.operand));
        // FILTER (WHERE …) is a predicate position.
        let filter = input
            .filter
            .map(|f| Box::new(self.in_context(true, |s| s.reconstruct_expression(*f))));
        Expression::Aggregate(AggregateExpression {
            op: input.op,
            operand: Box::new(operand),
            filter,
            distinct: input.distinct,
        })
    }
}
