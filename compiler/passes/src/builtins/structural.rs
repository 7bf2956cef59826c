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

//! Folding rules for the planner-private lookup and constructor ops.

use super::*;

use tarn_ast::Literal;

pub(super) fn fold(node: &BuiltinExpression) -> Option<Expression> {
    match node.func {
        BuiltinOp::HashLookup => fold_hash_lookup(node),
        BuiltinOp::TypeBit => fold_type_bit(node),
        BuiltinOp::MakeList => fold_make_list(node),
        BuiltinOp::MakeStruct => fold_make_struct(node),
        _ => unreachable!(
            "non-structural op {} dispatched to the structural folder",
            node.func.name()
        ),
    }
}

/// HASH_LOOKUP(value, k1, r1, …, [default]): with a constant probe the
/// whole table collapses to the matched result, the default, or MISSING.
fn fold_hash_lookup(node: &BuiltinExpression) -> Option<Expression> {
    let probe = node.args.first()?.as_literal()?;
    let mut default = None;
    for pair in node.args[1..].chunks(2) {
        match pair {
            [key, result] => {
                if probe.equivalent(key.as_literal()?) {
                    return Some(result.clone());
                }
            }
            [fallback] => default = Some(fallback.clone()),
            _ => unreachable!("chunks(2) yields one or two"),
        }
    }
    Some(default.unwrap_or(Expression::Literal(Literal::Missing)))
}

/// TYPE_BIT(x): a bitmask identifying x's runtime type. Absence has no
/// type, so MISSING maps to zero.
fn fold_type_bit(node: &BuiltinExpression) -> Option<Expression> {
    let bit = match node.args.first()?.as_literal()? {
        Literal::Null => 1,
        Literal::Bool(_) => 2,
        Literal::Integer(_) | Literal::Float(_) | Literal::Rational(_) => 4,
        Literal::Timestamp(_) => 8,
        Literal::String(_) => 16,
        Literal::List(_) => 32,
        Literal::Struct(_) => 64,
        Literal::Missing => 0,
    };
    Some(Expression::Literal(Literal::Integer(bit)))
}

fn fold_make_list(node: &BuiltinExpression) -> Option<Expression> {
    let items = node
        .args
        .iter()
        .map(|arg| arg.as_literal().cloned())
        .collect::<Option<Vec<Literal>>>()?;
    Some(Expression::Literal(Literal::List(items)))
}

fn fold_make_struct(node: &BuiltinExpression) -> Option<Expression> {
    if node.args.len() % 2 != 0 {
        return None;
    }
    let mut fields = Vec::with_capacity(node.args.len() / 2);
    for pair in node.args.chunks(2) {
        if let [label, value] = pair {
            let label = label.as_literal()?.as_str()?;
            fields.push((label.to_string(), value.as_literal()?.clone()));
        }
    }
    Some(Expression::Literal(Literal::Struct(fields)))
}
