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

use super::*;

use crate::BuiltinOp;

/// A call to a built-in function, e.g. `UPPER(t.name)`.
///
/// Ops marked private are constructed by the planner and the simplifier
/// only; the parser rejects them in user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinExpression {
    /// Which built-in is being called.
    pub func: BuiltinOp,
    /// The arguments, in order.
    pub args: Vec<Expression>,
}

impl BuiltinExpression {
    pub fn new(func: BuiltinOp, args: Vec<Expression>) -> Self {
        BuiltinExpression { func, args }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        // List and struct constructors print as the composite they build.
        match self.func {
            BuiltinOp::MakeList => {
                write!(f, "[")?;
                for (i, arg) in self.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.text(f, redact)?;
                }
                write!(f, "]")
            }
            BuiltinOp::MakeStruct => {
                write!(f, "{{")?;
                for (i, pair) in self.args.chunks(2).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match pair {
                        [label, value] => {
                            label.text(f, redact)?;
                            write!(f, ": ")?;
                            value.text(f, redact)?;
                        }
                        [label] => label.text(f, redact)?,
                        _ => unreachable!("chunks(2) yields one or two"),
                    }
                }
                write!(f, "}}")
            }
            _ => {
                write!(f, "{}(", self.func.name())?;
                for (i, arg) in self.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.text(f, redact)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for BuiltinExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<BuiltinExpression> for Expression {
    fn from(value: BuiltinExpression) -> Self {
        Expression::Builtin(value)
    }
}
