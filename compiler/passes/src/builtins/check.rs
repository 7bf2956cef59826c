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

//! Arity and argument-type checkers for the built-in ops.
//!
//! Wrong arity and non-literal-where-literal-required are syntax errors;
//! an argument whose type set cannot intersect what the op consumes is a
//! type error. An argument that may be NULL or MISSING is never rejected:
//! absence propagates at runtime instead of failing the check.

use super::*;

use tarn_ast::{type_of, Literal, TypeSet};
use tarn_errors::TarnError;

/// Fails unless the call has exactly `n` arguments.
fn arity(node: &BuiltinExpression, n: usize) -> Result<()> {
    if node.args.len() != n {
        return Err(TarnError::syntax_error(format!(
            "{} expects {n} argument(s), found {}",
            node.func.name(),
            node.args.len()
        )));
    }
    Ok(())
}

/// Fails unless the argument count is within `min..=max`.
fn arity_range(node: &BuiltinExpression, min: usize, max: usize) -> Result<()> {
    if node.args.len() < min || node.args.len() > max {
        return Err(TarnError::syntax_error(format!(
            "{} expects {min} to {max} arguments, found {}",
            node.func.name(),
            node.args.len()
        )));
    }
    Ok(())
}

/// Fails with a type error unless `arg` may produce a type in `want`.
/// NULL and MISSING always pass; they propagate at runtime.
fn expect(hint: &dyn TypeHint, arg: &Expression, want: TypeSet, what: &str) -> Result<()> {
    let t = type_of(arg, hint);
    if t.any_of(want | TypeSet::NULL | TypeSet::MISSING) {
        Ok(())
    } else {
        Err(TarnError::type_error(format!("{what} argument must be {want}, found {t}"))
            .errat(arg))
    }
}

/// The string payload of a literal string argument, or a syntax error.
fn expect_string_literal<'a>(arg: &'a Expression, what: &str) -> Result<&'a str> {
    match arg.as_literal().and_then(Literal::as_str) {
        Some(s) => Ok(s),
        None => Err(TarnError::syntax_error(format!("{what} must be a string literal"))),
    }
}

pub(super) fn math_unary(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 1)?;
    expect(hint, &node.args[0], TypeSet::NUMERIC, node.func.name())
}

pub(super) fn math_binary(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 2)?;
    expect(hint, &node.args[0], TypeSet::NUMERIC, node.func.name())?;
    expect(hint, &node.args[1], TypeSet::NUMERIC, node.func.name())
}

pub(super) fn string_unary(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 1)?;
    expect(hint, &node.args[0], TypeSet::STRING, node.func.name())
}

pub(super) fn substring(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity_range(node, 2, 3)?;
    expect(hint, &node.args[0], TypeSet::STRING, "SUBSTRING")?;
    expect(hint, &node.args[1], TypeSet::NUMERIC, "SUBSTRING start")?;
    if let Some(len) = node.args.get(2) {
        expect(hint, len, TypeSet::NUMERIC, "SUBSTRING length")?;
    }
    Ok(())
}

pub(super) fn split_part(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 3)?;
    expect(hint, &node.args[0], TypeSet::STRING, "SPLIT_PART")?;
    let sep = expect_string_literal(&node.args[1], "SPLIT_PART separator")?;
    if sep.chars().count() != 1 {
        return Err(TarnError::syntax_error(format!(
            "SPLIT_PART separator must be a single character, found '{sep}'"
        )));
    }
    expect(hint, &node.args[2], TypeSet::NUMERIC, "SPLIT_PART field")
}

pub(super) fn concat(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    if node.args.is_empty() {
        return Err(TarnError::syntax_error("CONCAT expects at least 1 argument"));
    }
    for arg in &node.args {
        expect(hint, arg, TypeSet::STRING, "CONCAT")?;
    }
    Ok(())
}

pub(super) fn trim(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity_range(node, 1, 2)?;
    expect(hint, &node.args[0], TypeSet::STRING, node.func.name())?;
    if let Some(cutset) = node.args.get(1) {
        let cutset = expect_string_literal(cutset, "TRIM cutset")?;
        if cutset.is_empty() || cutset.len() > 4 || !cutset.is_ascii() {
            return Err(TarnError::syntax_error(format!(
                "TRIM cutset must be 1 to 4 ASCII characters, found '{cutset}'"
            )));
        }
    }
    Ok(())
}

pub(super) fn contains(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 2)?;
    expect(hint, &node.args[0], TypeSet::STRING, node.func.name())?;
    expect_string_literal(&node.args[1], "CONTAINS needle")?;
    Ok(())
}

pub(super) fn is_subnet_of(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity_range(node, 2, 3)?;
    if node.args.len() == 2 {
        // User-visible form: IS_SUBNET_OF('a.b.c.d/n', addr).
        let cidr = expect_string_literal(&node.args[0], "IS_SUBNET_OF subnet")?;
        if net::parse_cidr(cidr).is_none() {
            return Err(TarnError::syntax_error(format!(
                "IS_SUBNET_OF subnet must be IPv4 CIDR notation, found '{cidr}'"
            )));
        }
        expect(hint, &node.args[1], TypeSet::STRING, "IS_SUBNET_OF address")
    } else {
        // Planner-private range form: IS_SUBNET_OF(min, max, addr).
        for arg in &node.args[..2] {
            let ip = expect_string_literal(arg, "IS_SUBNET_OF bound")?;
            if ip.parse::<std::net::Ipv4Addr>().is_err() {
                return Err(TarnError::syntax_error(format!(
                    "IS_SUBNET_OF bound must be a dotted IPv4 address, found '{ip}'"
                )));
            }
        }
        expect(hint, &node.args[2], TypeSet::STRING, "IS_SUBNET_OF address")
    }
}

pub(super) fn date_add(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 2)?;
    expect(hint, &node.args[0], TypeSet::NUMERIC, node.func.name())?;
    expect(hint, &node.args[1], TypeSet::TIME, node.func.name())
}

pub(super) fn date_diff(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 2)?;
    expect(hint, &node.args[0], TypeSet::TIME, node.func.name())?;
    expect(hint, &node.args[1], TypeSet::TIME, node.func.name())
}

pub(super) fn date_unary(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 1)?;
    expect(hint, &node.args[0], TypeSet::TIME, node.func.name())
}

pub(super) fn hash_lookup(_: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    if node.args.len() < 3 {
        return Err(TarnError::syntax_error(format!(
            "HASH_LOOKUP expects at least 3 arguments, found {}",
            node.args.len()
        )));
    }
    // Arguments after the probed value come in key/result pairs, optionally
    // followed by a default. Every key must be a constant.
    for pair in node.args[1..].chunks(2) {
        if let [key, _result] = pair {
            if !key.is_constant() {
                return Err(TarnError::syntax_error(format!(
                    "HASH_LOOKUP key must be a constant, found `{key}`"
                )));
            }
        }
    }
    Ok(())
}

pub(super) fn type_bit(_: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 1)
}

pub(super) fn make_list(_: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    let _ = node;
    Ok(())
}

pub(super) fn make_struct(_: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    if node.args.len() % 2 != 0 {
        return Err(TarnError::syntax_error(format!(
            "MAKE_STRUCT expects label/value pairs, found {} arguments",
            node.args.len()
        )));
    }
    for pair in node.args.chunks(2) {
        if let [label, _value] = pair {
            expect_string_literal(label, "MAKE_STRUCT label")?;
        }
    }
    Ok(())
}

pub(super) fn table_pattern(_: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    arity(node, 1)?;
    expect_string_literal(&node.args[0], "table pattern")?;
    Ok(())
}
