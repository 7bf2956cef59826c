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

//! Rules for COALESCE.
//!
//! Provably absent entries disappear, a present constant in front wins
//! outright, and what remains unfolds into the CASE the backend actually
//! executes: `COALESCE(x, y)` is
//! `CASE WHEN x IS NOT NULL THEN x ELSE COALESCE(y) END`.

use super::simplifier::Simplifier;

use tarn_ast::{
    CaseExpression, CaseLimb, CoalesceExpression, Expression, IsExpression, IsKey, Literal,
    TypeSet, Valence,
};

pub(super) fn simplify_coalesce(s: &mut Simplifier, input: CoalesceExpression) -> Expression {
    let mut args = input.args;

    // Entries that are certainly NULL or MISSING can never be chosen.
    args.retain(|arg| !s.always_absent(arg));

    // Everything after a never-absent entry is unreachable.
    if let Some(stop) = args.iter().position(|arg| {
        !s.type_of(arg).any_of(TypeSet::NULL | TypeSet::MISSING)
    }) {
        args.truncate(stop + 1);
    }

    let Some(first) = args.first() else {
        return Expression::Literal(Literal::Null);
    };

    // A present constant in front is the answer.
    if let Some(lit) = first.as_literal() {
        if !lit.is_absent() {
            return args.swap_remove(0);
        }
    }

    // A single never-absent entry needs no fallback machinery.
    if args.len() == 1 && !s.type_of(&args[0]).any_of(TypeSet::NULL | TypeSet::MISSING) {
        return args.swap_remove(0);
    }

    // Unfold into the NULL-propagating CASE, simplifying the shortened
    // tail recursively.
    let head = args.remove(0);
    let fallback = if args.is_empty() {
        Expression::Literal(Literal::Null)
    } else {
        simplify_coalesce(s, CoalesceExpression::new(args))
    };
    let case = CaseExpression::new(
        vec![CaseLimb {
            when: Expression::Is(IsExpression::new(head.clone(), IsKey::NotNull)),
            then: head,
        }],
        Some(fallback),
        Valence::Value,
    );
    s.resimplify(Expression::Case(case))
}
