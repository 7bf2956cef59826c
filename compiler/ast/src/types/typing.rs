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

use crate::{
    AggregateOperation, BinaryOperation, Expression, Literal, RuntimeType, TypeSet,
};

/// A caller-supplied capability narrowing the types of path expressions.
///
/// The typing function consults the hint for `Ident`/`Dot`/`Index` nodes
/// only; everything else is derived structurally. Implementations must
/// return a superset of the types the path can actually take — schema
/// knowledge and previously-established predicates are the usual sources.
pub trait TypeHint {
    /// The possible runtime types of `path`.
    fn type_of(&self, path: &Expression) -> TypeSet;
}

/// The hint that knows nothing: every path may be anything.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoHint;

impl TypeHint for NoHint {
    fn type_of(&self, _: &Expression) -> TypeSet {
        TypeSet::ANY
    }
}

/// Computes the set of runtime types `expr` may evaluate to.
///
/// The result is conservative: it contains every type the expression can
/// actually produce under any input, but never a fact not implied by the
/// tree and the hint.
pub fn type_of(expr: &Expression, hint: &dyn TypeHint) -> TypeSet {
    match expr {
        Expression::Literal(lit) => literal_type(lit),
        Expression::Ident(_) | Expression::Dot(_) | Expression::Index(_) => hint.type_of(expr),
        Expression::Binary(b) => match b.op {
            // Bit operations and shifts stay integral.
            BinaryOperation::BitAnd
            | BinaryOperation::BitOr
            | BinaryOperation::BitXor
            | BinaryOperation::Shl
            | BinaryOperation::SraShr
            | BinaryOperation::SrlShr => TypeSet::INTEGER | TypeSet::MISSING,
            // Div and Mod can produce MISSING on a zero divisor, and every
            // arithmetic op is MISSING on a non-numeric or absent input.
            _ => TypeSet::NUMERIC | TypeSet::MISSING,
        },
        Expression::Unary(_) => TypeSet::NUMERIC | TypeSet::MISSING,
        Expression::Comparison(_) | Expression::Logical(_) | Expression::Not(_) => {
            TypeSet::LOGICAL
        }
        // IS always produces a boolean, even on MISSING input.
        Expression::Is(_) => TypeSet::BOOL,
        Expression::Cast(c) => {
            let from = type_of(&c.operand, hint);
            if from.only(c.target) {
                c.target
            } else {
                // The input may fail to convert, which yields MISSING.
                c.target | TypeSet::MISSING
            }
        }
        Expression::Case(c) => {
            let mut out = TypeSet::EMPTY;
            for limb in &c.limbs {
                out = out | type_of(&limb.then, hint);
            }
            match &c.otherwise {
                Some(e) => out | type_of(e, hint),
                // A CASE that falls through every limb yields NULL.
                None => out | TypeSet::NULL,
            }
        }
        Expression::Member(_) => TypeSet::LOGICAL,
        Expression::Coalesce(c) => {
            if c.args.is_empty() {
                return TypeSet::NULL;
            }
            let mut out = TypeSet::NULL;
            for arg in &c.args {
                out = out | type_of(arg, hint);
            }
            out
        }
        Expression::Builtin(b) => b.func.ret_type(),
        Expression::Aggregate(agg) => match agg.op {
            AggregateOperation::Count => TypeSet::INTEGER,
            AggregateOperation::BoolAnd | AggregateOperation::BoolOr => TypeSet::LOGICAL,
            AggregateOperation::Earliest | AggregateOperation::Latest => {
                TypeSet::TIME | TypeSet::MISSING
            }
            AggregateOperation::Min | AggregateOperation::Max => {
                type_of(&agg.operand, hint) | TypeSet::MISSING
            }
            AggregateOperation::Sum | AggregateOperation::Avg => {
                TypeSet::NUMERIC | TypeSet::MISSING
            }
        },
    }
}

/// The singleton (or near-singleton) type of a literal.
pub fn literal_type(lit: &Literal) -> TypeSet {
    match lit {
        Literal::Null => TypeSet::NULL,
        Literal::Missing => TypeSet::MISSING,
        Literal::Bool(_) => TypeSet::BOOL,
        Literal::Integer(_) => TypeSet::INTEGER,
        Literal::Float(_) => TypeSet::FLOAT,
        // A rational is materialized as whichever numeric representation
        // fits; keep the whole numeric set.
        Literal::Rational(_) => TypeSet::NUMERIC,
        Literal::String(_) => TypeSet::of(RuntimeType::String),
        Literal::Timestamp(_) => TypeSet::TIME,
        Literal::List(_) => TypeSet::LIST,
        Literal::Struct(_) => TypeSet::STRUCT,
    }
}
