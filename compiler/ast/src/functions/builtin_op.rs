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

use crate::{RuntimeType, TypeSet};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A discrete calendar or clock unit addressed by the date operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timepart {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    /// Day of week; extraction only. Sunday is 0.
    DayOfWeek,
    /// Day of year; extraction only. January 1st is 1.
    DayOfYear,
}

/// Which of the four date operator families an op belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateOpKind {
    /// `DATE_ADD_<unit>(amount, ts)`.
    Add,
    /// `DATE_DIFF_<unit>(from, to)`.
    Diff,
    /// `DATE_EXTRACT_<unit>(ts)`.
    Extract,
    /// `DATE_TRUNC_<unit>(ts)`.
    Trunc,
}

/// Every built-in function the expression core knows.
///
/// Declaration order is the stable encoding order; append new ops at the
/// end of their family and never reorder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinOp {
    // -- arithmetic helpers --
    Abs,
    Sign,
    BitCount,
    Round,
    RoundEven,
    Trunc,
    Floor,
    Ceil,
    // -- transcendentals; these fold through f64 --
    Sqrt,
    Cbrt,
    Exp,
    ExpM1,
    Exp2,
    Exp10,
    Ln,
    Ln1P,
    Log2,
    Log10,
    Pow,
    Hypot,
    Atan2,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    // -- strings --
    Upper,
    Lower,
    CharLength,
    Substring,
    SplitPart,
    Concat,
    Trim,
    Ltrim,
    Rtrim,
    /// Substring search; planner-private.
    Contains,
    /// Case-insensitive substring search; planner-private.
    ContainsCi,
    /// Case-insensitive string equality; planner-private.
    EqualsCi,
    // -- networking --
    IsSubnetOf,
    // -- date arithmetic --
    DateAddMicrosecond,
    DateAddMillisecond,
    DateAddSecond,
    DateAddMinute,
    DateAddHour,
    DateAddDay,
    DateAddWeek,
    DateAddMonth,
    DateAddQuarter,
    DateAddYear,
    DateDiffMicrosecond,
    DateDiffMillisecond,
    DateDiffSecond,
    DateDiffMinute,
    DateDiffHour,
    DateDiffDay,
    DateDiffWeek,
    DateDiffMonth,
    DateDiffQuarter,
    DateDiffYear,
    DateExtractMicrosecond,
    DateExtractMillisecond,
    DateExtractSecond,
    DateExtractMinute,
    DateExtractHour,
    DateExtractDay,
    DateExtractDow,
    DateExtractDoy,
    DateExtractWeek,
    DateExtractMonth,
    DateExtractQuarter,
    DateExtractYear,
    DateTruncMicrosecond,
    DateTruncMillisecond,
    DateTruncSecond,
    DateTruncMinute,
    DateTruncHour,
    DateTruncDay,
    DateTruncWeek,
    DateTruncMonth,
    DateTruncQuarter,
    DateTruncYear,
    // -- planner-private lookup and constructors --
    HashLookup,
    TypeBit,
    MakeList,
    MakeStruct,
    // -- table-position constructors --
    TableGlob,
    TablePattern,
}

/// Every op, in declaration (encoding) order.
pub const ALL_BUILTINS: &[BuiltinOp] = &[
    BuiltinOp::Abs,
    BuiltinOp::Sign,
    BuiltinOp::BitCount,
    BuiltinOp::Round,
    BuiltinOp::RoundEven,
    BuiltinOp::Trunc,
    BuiltinOp::Floor,
    BuiltinOp::Ceil,
    BuiltinOp::Sqrt,
    BuiltinOp::Cbrt,
    BuiltinOp::Exp,
    BuiltinOp::ExpM1,
    BuiltinOp::Exp2,
    BuiltinOp::Exp10,
    BuiltinOp::Ln,
    BuiltinOp::Ln1P,
    BuiltinOp::Log2,
    BuiltinOp::Log10,
    BuiltinOp::Pow,
    BuiltinOp::Hypot,
    BuiltinOp::Atan2,
    BuiltinOp::Sin,
    BuiltinOp::Cos,
    BuiltinOp::Tan,
    BuiltinOp::Asin,
    BuiltinOp::Acos,
    BuiltinOp::Atan,
    BuiltinOp::Upper,
    BuiltinOp::Lower,
    BuiltinOp::CharLength,
    BuiltinOp::Substring,
    BuiltinOp::SplitPart,
    BuiltinOp::Concat,
    BuiltinOp::Trim,
    BuiltinOp::Ltrim,
    BuiltinOp::Rtrim,
    BuiltinOp::Contains,
    BuiltinOp::ContainsCi,
    BuiltinOp::EqualsCi,
    BuiltinOp::IsSubnetOf,
    BuiltinOp::DateAddMicrosecond,
    BuiltinOp::DateAddMillisecond,
    BuiltinOp::DateAddSecond,
    BuiltinOp::DateAddMinute,
    BuiltinOp::DateAddHour,
    BuiltinOp::DateAddDay,
    BuiltinOp::DateAddWeek,
    BuiltinOp::DateAddMonth,
    BuiltinOp::DateAddQuarter,
    BuiltinOp::DateAddYear,
    BuiltinOp::DateDiffMicrosecond,
    BuiltinOp::DateDiffMillisecond,
    BuiltinOp::DateDiffSecond,
    BuiltinOp::DateDiffMinute,
    BuiltinOp::DateDiffHour,
    BuiltinOp::DateDiffDay,
    BuiltinOp::DateDiffWeek,
    BuiltinOp::DateDiffMonth,
    BuiltinOp::DateDiffQuarter,
    BuiltinOp::DateDiffYear,
    BuiltinOp::DateExtractMicrosecond,
    BuiltinOp::DateExtractMillisecond,
    BuiltinOp::DateExtractSecond,
    BuiltinOp::DateExtractMinute,
    BuiltinOp::DateExtractHour,
    BuiltinOp::DateExtractDay,
    BuiltinOp::DateExtractDow,
    BuiltinOp::DateExtractDoy,
    BuiltinOp::DateExtractWeek,
    BuiltinOp::DateExtractMonth,
    BuiltinOp::DateExtractQuarter,
    BuiltinOp::DateExtractYear,
    BuiltinOp::DateTruncMicrosecond,
    BuiltinOp::DateTruncMillisecond,
    BuiltinOp::DateTruncSecond,
    BuiltinOp::DateTruncMinute,
    BuiltinOp::DateTruncHour,
    BuiltinOp::DateTruncDay,
    BuiltinOp::DateTruncWeek,
    BuiltinOp::DateTruncMonth,
    BuiltinOp::DateTruncQuarter,
    BuiltinOp::DateTruncYear,
    BuiltinOp::HashLookup,
    BuiltinOp::TypeBit,
    BuiltinOp::MakeList,
    BuiltinOp::MakeStruct,
    BuiltinOp::TableGlob,
    BuiltinOp::TablePattern,
];

/// Alternate spellings accepted by name lookup.
const ALIASES: &[(&str, BuiltinOp)] = &[
    ("POWER", BuiltinOp::Pow),
    ("CEILING", BuiltinOp::Ceil),
    ("CHARACTER_LENGTH", BuiltinOp::CharLength),
];

static BY_NAME: Lazy<IndexMap<&'static str, BuiltinOp>> = Lazy::new(|| {
    let mut map = IndexMap::new();
    for op in ALL_BUILTINS {
        map.insert(op.name(), *op);
    }
    for (alias, op) in ALIASES {
        map.insert(*alias, *op);
    }
    map
});

impl BuiltinOp {
    /// Every op, in encoding order.
    pub fn all() -> impl Iterator<Item = BuiltinOp> {
        ALL_BUILTINS.iter().copied()
    }

    /// The canonical upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Abs => "ABS",
            Self::Sign => "SIGN",
            Self::BitCount => "BIT_COUNT",
            Self::Round => "ROUND",
            Self::RoundEven => "ROUND_EVEN",
            Self::Trunc => "TRUNC",
            Self::Floor => "FLOOR",
            Self::Ceil => "CEIL",
            Self::Sqrt => "SQRT",
            Self::Cbrt => "CBRT",
            Self::Exp => "EXP",
            Self::ExpM1 => "EXPM1",
            Self::Exp2 => "EXP2",
            Self::Exp10 => "EXP10",
            Self::Ln => "LN",
            Self::Ln1P => "LN1P",
            Self::Log2 => "LOG2",
            Self::Log10 => "LOG10",
            Self::Pow => "POW",
            Self::Hypot => "HYPOT",
            Self::Atan2 => "ATAN2",
            Self::Sin => "SIN",
            Self::Cos => "COS",
            Self::Tan => "TAN",
            Self::Asin => "ASIN",
            Self::Acos => "ACOS",
            Self::Atan => "ATAN",
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::CharLength => "CHAR_LENGTH",
            Self::Substring => "SUBSTRING",
            Self::SplitPart => "SPLIT_PART",
            Self::Concat => "CONCAT",
            Self::Trim => "TRIM",
            Self::Ltrim => "LTRIM",
            Self::Rtrim => "RTRIM",
            Self::Contains => "CONTAINS",
            Self::ContainsCi => "CONTAINS_CI",
            Self::EqualsCi => "EQUALS_CI",
            Self::IsSubnetOf => "IS_SUBNET_OF",
            Self::DateAddMicrosecond => "DATE_ADD_MICROSECOND",
            Self::DateAddMillisecond => "DATE_ADD_MILLISECOND",
            Self::DateAddSecond => "DATE_ADD_SECOND",
            Self::DateAddMinute => "DATE_ADD_MINUTE",
            Self::DateAddHour => "DATE_ADD_HOUR",
            Self::DateAddDay => "DATE_ADD_DAY",
            Self::DateAddWeek => "DATE_ADD_WEEK",
            Self::DateAddMonth => "DATE_ADD_MONTH",
            Self::DateAddQuarter => "DATE_ADD_QUARTER",
            Self::DateAddYear => "DATE_ADD_YEAR",
            Self::DateDiffMicrosecond => "DATE_DIFF_MICROSECOND",
            Self::DateDiffMillisecond => "DATE_DIFF_MILLISECOND",
            Self::DateDiffSecond => "DATE_DIFF_SECOND",
            Self::DateDiffMinute => "DATE_DIFF_MINUTE",
            Self::DateDiffHour => "DATE_DIFF_HOUR",
            Self::DateDiffDay => "DATE_DIFF_DAY",
            Self::DateDiffWeek => "DATE_DIFF_WEEK",
            Self::DateDiffMonth => "DATE_DIFF_MONTH",
            Self::DateDiffQuarter => "DATE_DIFF_QUARTER",
            Self::DateDiffYear => "DATE_DIFF_YEAR",
            Self::DateExtractMicrosecond => "DATE_EXTRACT_MICROSECOND",
            Self::DateExtractMillisecond => "DATE_EXTRACT_MILLISECOND",
            Self::DateExtractSecond => "DATE_EXTRACT_SECOND",
            Self::DateExtractMinute => "DATE_EXTRACT_MINUTE",
            Self::DateExtractHour => "DATE_EXTRACT_HOUR",
            Self::DateExtractDay => "DATE_EXTRACT_DAY",
            Self::DateExtractDow => "DATE_EXTRACT_DOW",
            Self::DateExtractDoy => "DATE_EXTRACT_DOY",
            Self::DateExtractWeek => "DATE_EXTRACT_WEEK",
            Self::DateExtractMonth => "DATE_EXTRACT_MONTH",
            Self::DateExtractQuarter => "DATE_EXTRACT_QUARTER",
            Self::DateExtractYear => "DATE_EXTRACT_YEAR",
            Self::DateTruncMicrosecond => "DATE_TRUNC_MICROSECOND",
            Self::DateTruncMillisecond => "DATE_TRUNC_MILLISECOND",
            Self::DateTruncSecond => "DATE_TRUNC_SECOND",
            Self::DateTruncMinute => "DATE_TRUNC_MINUTE",
            Self::DateTruncHour => "DATE_TRUNC_HOUR",
            Self::DateTruncDay => "DATE_TRUNC_DAY",
            Self::DateTruncWeek => "DATE_TRUNC_WEEK",
            Self::DateTruncMonth => "DATE_TRUNC_MONTH",
            Self::DateTruncQuarter => "DATE_TRUNC_QUARTER",
            Self::DateTruncYear => "DATE_TRUNC_YEAR",
            Self::HashLookup => "HASH_LOOKUP",
            Self::TypeBit => "TYPE_BIT",
            Self::MakeList => "MAKE_LIST",
            Self::MakeStruct => "MAKE_STRUCT",
            Self::TableGlob => "TABLE_GLOB",
            Self::TablePattern => "TABLE_PATTERN",
        }
    }

    /// Looks up an op by its canonical name or a registered alias. Lookup is
    /// case-sensitive on the upper-case form.
    pub fn from_name(name: &str) -> Option<BuiltinOp> {
        BY_NAME.get(name).copied()
    }

    /// The set of types a call to this op can return.
    pub fn ret_type(&self) -> TypeSet {
        use BuiltinOp::*;
        match self {
            Abs | Round | RoundEven | Trunc | Floor | Ceil => {
                TypeSet::NUMERIC | TypeSet::MISSING
            }
            Sign | BitCount | CharLength => TypeSet::INTEGER | TypeSet::MISSING,
            Sqrt | Cbrt | Exp | ExpM1 | Exp2 | Exp10 | Ln | Ln1P | Log2 | Log10 | Pow
            | Hypot | Atan2 | Sin | Cos | Tan | Asin | Acos | Atan => {
                TypeSet::FLOAT | TypeSet::MISSING
            }
            Upper | Lower | Substring | SplitPart | Concat | Trim | Ltrim | Rtrim => {
                TypeSet::of(RuntimeType::String) | TypeSet::MISSING
            }
            Contains | ContainsCi | EqualsCi | IsSubnetOf => TypeSet::LOGICAL,
            DateAddMicrosecond | DateAddMillisecond | DateAddSecond | DateAddMinute
            | DateAddHour | DateAddDay | DateAddWeek | DateAddMonth | DateAddQuarter
            | DateAddYear | DateTruncMicrosecond | DateTruncMillisecond | DateTruncSecond
            | DateTruncMinute | DateTruncHour | DateTruncDay | DateTruncWeek
            | DateTruncMonth | DateTruncQuarter | DateTruncYear => {
                TypeSet::TIME | TypeSet::MISSING
            }
            DateDiffMicrosecond | DateDiffMillisecond | DateDiffSecond | DateDiffMinute
            | DateDiffHour | DateDiffDay | DateDiffWeek | DateDiffMonth | DateDiffQuarter
            | DateDiffYear | DateExtractMicrosecond | DateExtractMillisecond
            | DateExtractSecond | DateExtractMinute | DateExtractHour | DateExtractDay
            | DateExtractDow | DateExtractDoy | DateExtractWeek | DateExtractMonth
            | DateExtractQuarter | DateExtractYear => TypeSet::INTEGER | TypeSet::MISSING,
            HashLookup => TypeSet::ANY,
            TypeBit => TypeSet::INTEGER,
            MakeList => TypeSet::LIST,
            MakeStruct => TypeSet::STRUCT,
            TableGlob | TablePattern => TypeSet::ANY,
        }
    }

    /// Whether only the planner and the simplifier may construct this op;
    /// the parser rejects private ops in user input.
    pub fn is_private(&self) -> bool {
        matches!(
            self,
            Self::Contains
                | Self::ContainsCi
                | Self::EqualsCi
                | Self::HashLookup
                | Self::TypeBit
                | Self::MakeList
                | Self::MakeStruct
        )
    }

    /// Whether this op may only appear in a table (FROM) position.
    pub fn is_table(&self) -> bool {
        matches!(self, Self::TableGlob | Self::TablePattern)
    }

    /// The date operator family and unit, for the `DATE_*` ops.
    pub fn date_op(&self) -> Option<(DateOpKind, Timepart)> {
        use BuiltinOp::*;
        use DateOpKind::*;
        use Timepart::*;
        Some(match self {
            DateAddMicrosecond => (Add, Microsecond),
            DateAddMillisecond => (Add, Millisecond),
            DateAddSecond => (Add, Second),
            DateAddMinute => (Add, Minute),
            DateAddHour => (Add, Hour),
            DateAddDay => (Add, Day),
            DateAddWeek => (Add, Week),
            DateAddMonth => (Add, Month),
            DateAddQuarter => (Add, Quarter),
            DateAddYear => (Add, Year),
            DateDiffMicrosecond => (Diff, Microsecond),
            DateDiffMillisecond => (Diff, Millisecond),
            DateDiffSecond => (Diff, Second),
            DateDiffMinute => (Diff, Minute),
            DateDiffHour => (Diff, Hour),
            DateDiffDay => (Diff, Day),
            DateDiffWeek => (Diff, Week),
            DateDiffMonth => (Diff, Month),
            DateDiffQuarter => (Diff, Quarter),
            DateDiffYear => (Diff, Year),
            DateExtractMicrosecond => (Extract, Microsecond),
            DateExtractMillisecond => (Extract, Millisecond),
            DateExtractSecond => (Extract, Second),
            DateExtractMinute => (Extract, Minute),
            DateExtractHour => (Extract, Hour),
            DateExtractDay => (Extract, Day),
            DateExtractDow => (Extract, DayOfWeek),
            DateExtractDoy => (Extract, DayOfYear),
            DateExtractWeek => (Extract, Week),
            DateExtractMonth => (Extract, Month),
            DateExtractQuarter => (Extract, Quarter),
            DateExtractYear => (Extract, Year),
            DateTruncMicrosecond => (DateOpKind::Trunc, Microsecond),
            DateTruncMillisecond => (DateOpKind::Trunc, Millisecond),
            DateTruncSecond => (DateOpKind::Trunc, Second),
            DateTruncMinute => (DateOpKind::Trunc, Minute),
            DateTruncHour => (DateOpKind::Trunc, Hour),
            DateTruncDay => (DateOpKind::Trunc, Day),
            DateTruncWeek => (DateOpKind::Trunc, Week),
            DateTruncMonth => (DateOpKind::Trunc, Month),
            DateTruncQuarter => (DateOpKind::Trunc, Quarter),
            DateTruncYear => (DateOpKind::Trunc, Year),
            _ => return None,
        })
    }
}

impl fmt::Display for BuiltinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for op in BuiltinOp::all() {
            assert_eq!(BuiltinOp::from_name(op.name()), Some(op), "{}", op.name());
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(BuiltinOp::from_name("POWER"), Some(BuiltinOp::Pow));
        assert_eq!(BuiltinOp::from_name("CEILING"), Some(BuiltinOp::Ceil));
        assert_eq!(BuiltinOp::from_name("CHARACTER_LENGTH"), Some(BuiltinOp::CharLength));
        // Lookup is case-sensitive on the canonical upper-case form.
        assert_eq!(BuiltinOp::from_name("power"), None);
    }

    #[test]
    fn test_every_op_listed_once() {
        let mut seen = std::collections::HashSet::new();
        for op in ALL_BUILTINS {
            assert!(seen.insert(op.name()), "duplicate name {}", op.name());
        }
    }

    #[test]
    fn test_private_ops_never_in_table_position() {
        for op in BuiltinOp::all() {
            assert!(!(op.is_private() && op.is_table()), "{}", op.name());
        }
    }

    #[test]
    fn test_every_public_op_is_documented() {
        // The operator reference must name every op a user can write.
        let reference = include_str!("../../../../docs/operators.md");
        for op in BuiltinOp::all() {
            if op.is_private() {
                assert!(
                    !reference.contains(op.name()),
                    "private op {} must not be documented",
                    op.name()
                );
            } else {
                assert!(reference.contains(op.name()), "{} undocumented", op.name());
            }
        }
    }

    #[test]
    fn test_date_families() {
        assert_eq!(
            BuiltinOp::DateAddWeek.date_op(),
            Some((DateOpKind::Add, Timepart::Week))
        );
        assert_eq!(
            BuiltinOp::DateExtractDow.date_op(),
            Some((DateOpKind::Extract, Timepart::DayOfWeek))
        );
        assert_eq!(BuiltinOp::Upper.date_op(), None);
    }
}
