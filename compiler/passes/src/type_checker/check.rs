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

use tarn_ast::{type_of, Expression, ExpressionVisitor, NoHint, TypeHint, TypeSet};
use tarn_errors::{Result, TarnError};

use tracing::debug;

/// Validates `expr` bottom-up: arity, literal-argument requirements, and
/// argument types. The innermost violation is returned, with the offending
/// node attached.
pub fn check(expr: &Expression) -> Result<()> {
    TypeChecker::new(&NoHint).check(expr)
}

/// The checking pass. Children are visited before their parent's contract
/// is tested, so the first recorded error is the innermost one.
pub struct TypeChecker<'a> {
    pub(super) hint: &'a dyn TypeHint,
    pub(super) errors: Vec<TarnError>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(hint: &'a dyn TypeHint) -> Self {
        TypeChecker { hint, errors: Vec::new() }
    }

    /// Runs the checker over one expression tree.
    pub fn check(mut self, expr: &Expression) -> Result<()> {
        self.visit_expression(expr);
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(super) fn emit_err(&mut self, err: TarnError) {
        debug!(%err, "expression check failed");
        self.errors.push(err);
    }

    pub(super) fn type_of(&self, expr: &Expression) -> TypeSet {
        type_of(expr, self.hint)
    }

    /// Records a type error unless `operand` may produce a type in `want`;
    /// NULL and MISSING always pass, since absence propagates at runtime
    /// instead of being a type violation.
    pub(super) fn expect_type(&mut self, operand: &Expression, want: TypeSet, what: &str) {
        let t = self.type_of(operand);
        if !t.any_of(want | TypeSet::NULL | TypeSet::MISSING) {
            self.emit_err(
                TarnError::type_error(format!("{what} must be {want}, found {t}"))
                    .errat(operand),
            );
        }
    }
}
