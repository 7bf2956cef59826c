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

/// A bare identifier, e.g. `x`; the root of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    /// The name of the binding being referenced.
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier { name: name.into() }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, _redact: bool) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<Identifier> for Expression {
    fn from(value: Identifier) -> Self {
        Expression::Ident(value)
    }
}

/// A field projection, e.g. `t.x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotAccess {
    /// The expression being projected from.
    pub inner: Box<Expression>,
    /// The field label.
    pub field: String,
}

impl DotAccess {
    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        self.inner.text(f, redact)?;
        write!(f, ".{}", self.field)
    }
}

impl fmt::Display for DotAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<DotAccess> for Expression {
    fn from(value: DotAccess) -> Self {
        Expression::Dot(value)
    }
}

/// An element projection, e.g. `xs[3]`. The offset is always non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAccess {
    /// The expression being indexed into.
    pub inner: Box<Expression>,
    /// The zero-based element offset.
    pub offset: usize,
}

impl IndexAccess {
    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        self.inner.text(f, redact)?;
        write!(f, "[{}]", self.offset)
    }
}

impl fmt::Display for IndexAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<IndexAccess> for Expression {
    fn from(value: IndexAccess) -> Self {
        Expression::Index(value)
    }
}
