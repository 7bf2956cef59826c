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

//! Rules for CASE.
//!
//! Dead limbs disappear, a literally-true WHEN becomes the ELSE, and a
//! dispatch-shaped CASE (every WHEN comparing one key against a constant,
//! every THEN constant) collapses into a single HASH_LOOKUP call.

use super::simplifier::Simplifier;

use tarn_ast::{
    BuiltinExpression, BuiltinOp, CaseExpression, CaseLimb, ComparisonOperation, Expression,
    Literal,
};

pub(super) fn simplify_case(s: &mut Simplifier, input: CaseExpression) -> Expression {
    let CaseExpression { limbs, otherwise, valence } = input;
    let mut otherwise = otherwise.map(|e| *e);

    // ELSE NULL is the fall-through default already; under IS TRUE an
    // ELSE MISSING is equally invisible.
    if let Some(e) = &otherwise {
        if let Some(lit) = e.as_literal() {
            if lit.is_null() || (s.in_logical_context() && lit.is_missing()) {
                otherwise = None;
            }
        }
    }

    // Drop limbs whose WHEN can never be true; a literally-true WHEN
    // becomes the ELSE and everything after it is unreachable.
    let mut kept: Vec<CaseLimb> = Vec::with_capacity(limbs.len());
    for limb in limbs {
        match limb.when.as_literal() {
            Some(Literal::Bool(true)) => {
                otherwise = Some(limb.then);
                break;
            }
            Some(_) => continue,
            None => kept.push(limb),
        }
    }

    // A trailing limb that produces the fall-through value is redundant;
    // under IS TRUE that includes any not-true constant outcome.
    loop {
        let Some(last) = kept.last() else { break };
        let redundant = match &otherwise {
            Some(e) => last.then.equivalent(e),
            None => last.then.as_literal().is_some_and(|lit| {
                lit.is_null()
                    || (s.in_logical_context() && lit.as_bool() != Some(true))
            }),
        };
        if !redundant {
            break;
        }
        kept.pop();
    }

    if kept.is_empty() {
        return otherwise.unwrap_or(Expression::Literal(Literal::Null));
    }

    // Under IS TRUE, `CASE WHEN w THEN TRUE END` is just w.
    if s.in_logical_context() && otherwise.is_none() && kept.len() == 1 {
        if kept[0].then.as_literal().and_then(Literal::as_bool) == Some(true) {
            return kept.swap_remove(0).when;
        }
    }

    if let Some(lookup) = synthesize_hash_lookup(&kept, &otherwise) {
        return lookup;
    }

    Expression::Case(CaseExpression::new(kept, otherwise, valence))
}

/// `CASE WHEN k = c1 THEN r1 … END` with one shared key, constant results
/// and no meaningful ELSE is a table dispatch: HASH_LOOKUP(k, c1, r1, …).
fn synthesize_hash_lookup(
    limbs: &[CaseLimb],
    otherwise: &Option<Expression>,
) -> Option<Expression> {
    match otherwise {
        None => {}
        Some(e) if e.as_literal().is_some_and(Literal::is_missing) => {}
        Some(_) => return None,
    }

    let mut key: Option<&Expression> = None;
    let mut args = Vec::with_capacity(1 + limbs.len() * 2);
    args.push(Expression::Literal(Literal::Null)); // placeholder for the key
    for limb in limbs {
        let cmp = match &limb.when {
            Expression::Comparison(cmp) if cmp.op == ComparisonOperation::Equals => cmp,
            _ => return None,
        };
        // Canonicalization has already put the constant on the right.
        if cmp.left.is_constant() || !cmp.right.is_constant() {
            return None;
        }
        match key {
            None => key = Some(&*cmp.left),
            Some(key) if key.equivalent(&cmp.left) => {}
            Some(_) => return None,
        }
        if !limb.then.is_constant() {
            return None;
        }
        args.push((*cmp.right).clone());
        args.push(limb.then.clone());
    }

    args[0] = (*key?).clone();
    Some(Expression::Builtin(BuiltinExpression::new(BuiltinOp::HashLookup, args)))
}
