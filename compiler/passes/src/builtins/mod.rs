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

//! The built-in function dispatch table.
//!
//! Every [`BuiltinOp`] resolves to a record holding its arity/type checker
//! and its constant-folding rule, if it has one. Dispatch is a match over
//! the compact op enum, which compiles to a jump table; nothing on this path
//! hashes or allocates.

mod check;
mod date;
mod math;
mod net;
mod string;
mod structural;

pub(crate) use string::{like_match, LikePattern};

use tarn_ast::{BuiltinExpression, BuiltinOp, DateOpKind, Expression, TypeHint};
use tarn_errors::Result;

/// The dispatch record of one built-in op.
pub struct BuiltinInfo {
    /// Validates arity and argument types.
    pub check: fn(&dyn TypeHint, &BuiltinExpression) -> Result<()>,
    /// The constant-folding or algebraic rule, if the op has one. Returns
    /// `None` when the rule does not apply; it never fails.
    pub fold: Option<fn(&BuiltinExpression) -> Option<Expression>>,
}

/// The dispatch record for `op`.
pub fn info(op: BuiltinOp) -> BuiltinInfo {
    use BuiltinOp::*;
    let (check, fold): (
        fn(&dyn TypeHint, &BuiltinExpression) -> Result<()>,
        Option<fn(&BuiltinExpression) -> Option<Expression>>,
    ) = match op {
        Abs | Sign | BitCount | Round | RoundEven | Trunc | Floor | Ceil | Sqrt | Cbrt | Exp
        | ExpM1 | Exp2 | Exp10 | Ln | Ln1P | Log2 | Log10 | Sin | Cos | Tan | Asin | Acos
        | Atan => (check::math_unary, Some(math::fold)),
        Pow | Hypot | Atan2 => (check::math_binary, Some(math::fold)),
        Upper | Lower | CharLength => (check::string_unary, Some(string::fold)),
        Substring => (check::substring, Some(string::fold)),
        SplitPart => (check::split_part, Some(string::fold)),
        Concat => (check::concat, Some(string::fold)),
        Trim | Ltrim | Rtrim => (check::trim, Some(string::fold)),
        Contains | ContainsCi | EqualsCi => (check::contains, Some(string::fold)),
        IsSubnetOf => (check::is_subnet_of, Some(net::fold)),
        HashLookup => (check::hash_lookup, Some(structural::fold)),
        TypeBit => (check::type_bit, Some(structural::fold)),
        MakeList => (check::make_list, Some(structural::fold)),
        MakeStruct => (check::make_struct, Some(structural::fold)),
        TableGlob | TablePattern => (check::table_pattern, None),
        op => match op.date_op() {
            Some((DateOpKind::Add, _)) => (check::date_add, Some(date::fold)),
            Some((DateOpKind::Diff, _)) => (check::date_diff, Some(date::fold)),
            Some((DateOpKind::Extract | DateOpKind::Trunc, _)) => {
                (check::date_unary, Some(date::fold))
            }
            None => unreachable!("op {} missing from the builtin table", op.name()),
        },
    };
    BuiltinInfo { check, fold }
}

/// Runs the op's checker against a call node.
pub fn check_builtin(hint: &dyn TypeHint, node: &BuiltinExpression) -> Result<()> {
    (info(node.func).check)(hint, node)
}

/// Runs the op's folding rule, if any.
pub(crate) fn fold_builtin(node: &BuiltinExpression) -> Option<Expression> {
    info(node.func).fold.and_then(|fold| fold(node))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_every_op_has_a_record() {
        // info() panics on a table gap; touching every op proves coverage.
        for op in BuiltinOp::all() {
            let rec = info(op);
            let _ = rec.fold;
        }
    }
}
