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

use serde::{Deserialize, Serialize};
use std::fmt;

mod aggregate;
pub use aggregate::*;

mod binary;
pub use binary::*;

mod builtin;
pub use builtin::*;

mod case;
pub use case::*;

mod cast;
pub use cast::*;

mod coalesce;
pub use coalesce::*;

mod comparison;
pub use comparison::*;

mod is;
pub use is::*;

mod literal;
pub use literal::*;

mod logical;
pub use logical::*;

mod member;
pub use member::*;

mod path;
pub use path::*;

mod unary;
pub use unary::*;

/// An expression over input rows.
///
/// Expressions form a tree with exclusive ownership: no node is shared and
/// no node refers back to an ancestor. Rewrites consume a node and return a
/// replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// An aggregation, e.g. `SUM(t.x)`.
    Aggregate(AggregateExpression),
    /// A binary arithmetic expression, e.g. `x + 1`.
    Binary(BinaryExpression),
    /// A call to a built-in function, e.g. `UPPER(t.name)`.
    Builtin(BuiltinExpression),
    /// A searched CASE, e.g. `CASE WHEN a THEN 1 ELSE 2 END`.
    Case(CaseExpression),
    /// A conversion, e.g. `CAST(x AS {string})`.
    Cast(CastExpression),
    /// The first present, non-null entry, e.g. `COALESCE(t.x, 0)`.
    Coalesce(CoalesceExpression),
    /// A comparison, e.g. `x >= 3`.
    Comparison(ComparisonExpression),
    /// A field projection, e.g. `t.x`.
    Dot(DotAccess),
    /// A bare identifier, e.g. `x`.
    Ident(Identifier),
    /// An element projection, e.g. `xs[3]`.
    Index(IndexAccess),
    /// An `IS` test, e.g. `t.x IS NOT NULL`.
    Is(IsExpression),
    /// A literal constant, e.g. `'fred'`.
    Literal(Literal),
    /// A binary logical expression, e.g. `a AND b`.
    Logical(LogicalExpression),
    /// A membership test, e.g. `x IN (1, 2, 3)`.
    Member(MemberExpression),
    /// Logical negation, e.g. `NOT a`.
    Not(NotExpression),
    /// A unary arithmetic expression, e.g. `-x`.
    Unary(UnaryExpression),
}

impl Expression {
    /// A bare identifier expression.
    pub fn ident(name: impl Into<String>) -> Expression {
        Expression::Ident(Identifier::new(name))
    }

    /// A path expression: the first part is the root identifier, the rest
    /// become field projections, e.g. `path(["t", "x"])` is `t.x`.
    ///
    /// Panics when given no parts; paths are never empty.
    pub fn path<'a>(parts: impl IntoIterator<Item = &'a str>) -> Expression {
        let mut parts = parts.into_iter();
        let root = parts.next().expect("a path needs at least a root identifier");
        parts.fold(Expression::ident(root), |inner, field| {
            Expression::Dot(DotAccess { inner: Box::new(inner), field: field.to_string() })
        })
    }

    /// The literal payload, if this node is a constant.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expression::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Whether this node is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Expression::Literal(_))
    }

    /// Whether this node is a value projection from the input row.
    pub fn is_path(&self) -> bool {
        matches!(self, Expression::Ident(_) | Expression::Dot(_) | Expression::Index(_))
    }

    /// Structural equality modulo literal equality: numeric literals compare
    /// by value, so `3`, `3.0` and the rational 3 are all equivalent.
    pub fn equivalent(&self, other: &Expression) -> bool {
        use Expression::*;
        match (self, other) {
            (Literal(a), Literal(b)) => a.equivalent(b),
            (Ident(a), Ident(b)) => a.name == b.name,
            (Dot(a), Dot(b)) => a.field == b.field && a.inner.equivalent(&b.inner),
            (Index(a), Index(b)) => a.offset == b.offset && a.inner.equivalent(&b.inner),
            (Binary(a), Binary(b)) => {
                a.op == b.op && a.left.equivalent(&b.left) && a.right.equivalent(&b.right)
            }
            (Unary(a), Unary(b)) => a.op == b.op && a.operand.equivalent(&b.operand),
            (Comparison(a), Comparison(b)) => {
                a.op == b.op && a.left.equivalent(&b.left) && a.right.equivalent(&b.right)
            }
            (Logical(a), Logical(b)) => {
                a.op == b.op && a.left.equivalent(&b.left) && a.right.equivalent(&b.right)
            }
            (Not(a), Not(b)) => a.operand.equivalent(&b.operand),
            (Is(a), Is(b)) => a.key == b.key && a.operand.equivalent(&b.operand),
            (Cast(a), Cast(b)) => a.target == b.target && a.operand.equivalent(&b.operand),
            // The valence tag is advisory and does not affect equivalence.
            (Case(a), Case(b)) => {
                a.limbs.len() == b.limbs.len()
                    && a.limbs.iter().zip(&b.limbs).all(|(x, y)| {
                        x.when.equivalent(&y.when) && x.then.equivalent(&y.then)
                    })
                    && match (&a.otherwise, &b.otherwise) {
                        (Some(x), Some(y)) => x.equivalent(y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (Member(a), Member(b)) => {
                a.operand.equivalent(&b.operand)
                    && a.values.len() == b.values.len()
                    && a.values.iter().zip(&b.values).all(|(x, y)| x.equivalent(y))
            }
            (Coalesce(a), Coalesce(b)) => {
                a.args.len() == b.args.len()
                    && a.args.iter().zip(&b.args).all(|(x, y)| x.equivalent(y))
            }
            (Builtin(a), Builtin(b)) => {
                a.func == b.func
                    && a.args.len() == b.args.len()
                    && a.args.iter().zip(&b.args).all(|(x, y)| x.equivalent(y))
            }
            (Aggregate(a), Aggregate(b)) => {
                a.op == b.op
                    && a.distinct == b.distinct
                    && a.operand.equivalent(&b.operand)
                    && match (&a.filter, &b.filter) {
                        (Some(x), Some(y)) => x.equivalent(y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => false,
        }
    }

    /// Renders the expression; with `redact` set, literal payloads are
    /// masked so the output is safe for logs.
    pub fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        use Expression::*;
        match self {
            Aggregate(n) => n.text(f, redact),
            Binary(n) => n.text(f, redact),
            Builtin(n) => n.text(f, redact),
            Case(n) => n.text(f, redact),
            Cast(n) => n.text(f, redact),
            Coalesce(n) => n.text(f, redact),
            Comparison(n) => n.text(f, redact),
            Dot(n) => n.text(f, redact),
            Ident(n) => n.text(f, redact),
            Index(n) => n.text(f, redact),
            Is(n) => n.text(f, redact),
            Literal(n) => n.text(f, redact),
            Logical(n) => n.text(f, redact),
            Member(n) => n.text(f, redact),
            Not(n) => n.text(f, redact),
            Unary(n) => n.text(f, redact),
        }
    }

    /// A display adapter that masks literal payloads.
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

/// Displays an expression with literal payloads masked; see
/// [`Expression::redacted`].
#[derive(Debug)]
pub struct Redacted<'a>(pub &'a Expression);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.text(f, true)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::BuiltinOp;

    #[test]
    fn test_display() {
        let cmp = Expression::Comparison(ComparisonExpression::new(
            ComparisonOperation::GreaterEquals,
            Expression::path(["t", "x"]),
            Expression::Literal(Literal::Integer(3)),
        ));
        assert_eq!(cmp.to_string(), "(t.x >= 3)");

        let call = Expression::Builtin(BuiltinExpression::new(
            BuiltinOp::Upper,
            vec![Expression::Literal(Literal::String("o'neill".into()))],
        ));
        assert_eq!(call.to_string(), "UPPER('o''neill')");
    }

    #[test]
    fn test_redacted_display() {
        let cmp = Expression::Comparison(ComparisonExpression::new(
            ComparisonOperation::Equals,
            Expression::path(["user", "ssn"]),
            Expression::Literal(Literal::String("123-45-6789".into())),
        ));
        assert_eq!(cmp.redacted().to_string(), "(user.ssn = ?)");
        // NULL, MISSING and booleans carry no payload and stay visible.
        let null = Expression::Literal(Literal::Null);
        assert_eq!(null.redacted().to_string(), "NULL");
    }

    #[test]
    fn test_equivalence_is_symmetric_and_reflexive() {
        let a = Expression::Literal(Literal::Integer(3));
        let b = Expression::Literal(Literal::Float(3.0));
        let c = Expression::Literal(Literal::Float(3.5));
        assert!(a.equivalent(&b));
        assert!(b.equivalent(&a));
        assert!(a.equivalent(&a));
        assert!(!a.equivalent(&c));
        assert!(!c.equivalent(&a));
    }

    #[test]
    fn test_path_builder() {
        let p = Expression::path(["t", "a", "b"]);
        assert_eq!(p.to_string(), "t.a.b");
        assert!(p.is_path());
        assert!(!p.is_constant());
    }
}
