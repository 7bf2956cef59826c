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
use std::ops::{BitAnd, BitOr};

/// A concrete runtime type, one bit position of a [`TypeSet`].
///
/// Bits 0 through 14 are the datum types a value can take at runtime;
/// bit 15 stands for MISSING, the absence of a value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum RuntimeType {
    Null = 0,
    Bool = 1,
    Uint = 2,
    Int = 3,
    Float = 4,
    Decimal = 5,
    Timestamp = 6,
    Symbol = 7,
    String = 8,
    Clob = 9,
    Blob = 10,
    List = 11,
    Sexp = 12,
    Struct = 13,
    Annotation = 14,
    Missing = 15,
}

impl RuntimeType {
    fn name(&self) -> &'static str {
        match self {
            RuntimeType::Null => "null",
            RuntimeType::Bool => "bool",
            RuntimeType::Uint => "uint",
            RuntimeType::Int => "int",
            RuntimeType::Float => "float",
            RuntimeType::Decimal => "decimal",
            RuntimeType::Timestamp => "timestamp",
            RuntimeType::Symbol => "symbol",
            RuntimeType::String => "string",
            RuntimeType::Clob => "clob",
            RuntimeType::Blob => "blob",
            RuntimeType::List => "list",
            RuntimeType::Sexp => "sexp",
            RuntimeType::Struct => "struct",
            RuntimeType::Annotation => "annotation",
            RuntimeType::Missing => "missing",
        }
    }
}

const ALL_RUNTIME_TYPES: [RuntimeType; 16] = [
    RuntimeType::Null,
    RuntimeType::Bool,
    RuntimeType::Uint,
    RuntimeType::Int,
    RuntimeType::Float,
    RuntimeType::Decimal,
    RuntimeType::Timestamp,
    RuntimeType::Symbol,
    RuntimeType::String,
    RuntimeType::Clob,
    RuntimeType::Blob,
    RuntimeType::List,
    RuntimeType::Sexp,
    RuntimeType::Struct,
    RuntimeType::Annotation,
    RuntimeType::Missing,
];

/// The set of runtime types an expression may evaluate to.
///
/// A `TypeSet` is a 16-bit set, one bit per [`RuntimeType`]. Typing is
/// conservative: the set of an expression always contains every type the
/// expression can actually produce, and usually more. The empty set only
/// arises from intersections and means "no runtime value is possible".
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSet(pub u16);

impl TypeSet {
    /// The empty set.
    pub const EMPTY: TypeSet = TypeSet(0);
    /// Every runtime type including MISSING.
    pub const ANY: TypeSet = TypeSet(0xffff);
    /// MISSING alone.
    pub const MISSING: TypeSet = TypeSet(1 << RuntimeType::Missing as u16);
    /// SQL NULL alone.
    pub const NULL: TypeSet = TypeSet(1 << RuntimeType::Null as u16);
    /// The boolean singleton.
    pub const BOOL: TypeSet = TypeSet(1 << RuntimeType::Bool as u16);
    /// What a predicate can produce: a boolean, or MISSING.
    pub const LOGICAL: TypeSet = TypeSet(Self::BOOL.0 | Self::MISSING.0);
    /// Unsigned and signed integers.
    pub const INTEGER: TypeSet =
        TypeSet(1 << RuntimeType::Uint as u16 | 1 << RuntimeType::Int as u16);
    /// IEEE 754 doubles.
    pub const FLOAT: TypeSet = TypeSet(1 << RuntimeType::Float as u16);
    /// Exact decimals and rationals.
    pub const DECIMAL: TypeSet = TypeSet(1 << RuntimeType::Decimal as u16);
    /// Anything arithmetic operates on.
    pub const NUMERIC: TypeSet = TypeSet(Self::INTEGER.0 | Self::FLOAT.0 | Self::DECIMAL.0);
    /// Strings and interned symbols.
    pub const STRING: TypeSet =
        TypeSet(1 << RuntimeType::String as u16 | 1 << RuntimeType::Symbol as u16);
    /// The timestamp singleton.
    pub const TIME: TypeSet = TypeSet(1 << RuntimeType::Timestamp as u16);
    /// The list singleton.
    pub const LIST: TypeSet = TypeSet(1 << RuntimeType::List as u16);
    /// The struct singleton.
    pub const STRUCT: TypeSet = TypeSet(1 << RuntimeType::Struct as u16);

    /// The set holding exactly `t`.
    pub const fn of(t: RuntimeType) -> TypeSet {
        TypeSet(1 << t as u16)
    }

    /// Whether `t` is in the set.
    pub const fn contains(self, t: RuntimeType) -> bool {
        self.0 & (1 << t as u16) != 0
    }

    /// The members of `self` that are not members of `other`.
    pub const fn and_not(self, other: TypeSet) -> TypeSet {
        TypeSet(self.0 & !other.0)
    }

    /// Whether `self` is a subset of `other`.
    pub const fn only(self, other: TypeSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Whether `self` and `other` intersect.
    pub const fn any_of(self, other: TypeSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether a value of a type in `self` can compare against a value of a
    /// type in `other`: the sets intersect somewhere other than MISSING.
    pub const fn comparable(self, other: TypeSet) -> bool {
        self.0 & other.0 & !Self::MISSING.0 != 0
    }

    /// Whether the expression may be MISSING.
    pub const fn maybe_missing(self) -> bool {
        self.contains(RuntimeType::Missing)
    }

    /// Whether no runtime value is possible.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the member types, lowest bit first.
    pub fn members(self) -> impl Iterator<Item = RuntimeType> {
        ALL_RUNTIME_TYPES.into_iter().filter(move |t| self.contains(*t))
    }
}

impl BitOr for TypeSet {
    type Output = TypeSet;

    fn bitor(self, rhs: TypeSet) -> TypeSet {
        TypeSet(self.0 | rhs.0)
    }
}

impl BitAnd for TypeSet {
    type Output = TypeSet;

    fn bitand(self, rhs: TypeSet) -> TypeSet {
        TypeSet(self.0 & rhs.0)
    }
}

impl From<RuntimeType> for TypeSet {
    fn from(t: RuntimeType) -> TypeSet {
        TypeSet::of(t)
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if *self == TypeSet::ANY {
            return write!(f, "{{any}}");
        }
        write!(f, "{{")?;
        for (i, t) in self.members().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", t.name())?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
