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

/// An aggregation operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateOperation {
    /// `COUNT`.
    Count,
    /// `SUM`.
    Sum,
    /// `MIN`.
    Min,
    /// `MAX`.
    Max,
    /// `AVG`.
    Avg,
    /// `BOOL_AND`; true iff every input is true.
    BoolAnd,
    /// `BOOL_OR`; true iff any input is true.
    BoolOr,
    /// `EARLIEST`; the minimum timestamp.
    Earliest,
    /// `LATEST`; the maximum timestamp.
    Latest,
}

impl fmt::Display for AggregateOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Avg => "AVG",
            Self::BoolAnd => "BOOL_AND",
            Self::BoolOr => "BOOL_OR",
            Self::Earliest => "EARLIEST",
            Self::Latest => "LATEST",
        })
    }
}

/// An aggregation over grouped rows, e.g. `SUM(t.x) FILTER (WHERE t.y > 0)`.
///
/// The simplifier rewrites the operand and filter subtrees but never folds
/// the aggregation itself; that is the planner's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateExpression {
    /// The operator.
    pub op: AggregateOperation,
    /// The aggregated expression.
    pub operand: Box<Expression>,
    /// The `FILTER (WHERE …)` predicate, if present.
    pub filter: Option<Box<Expression>>,
    /// Whether duplicates are collapsed before aggregation.
    pub distinct: bool,
}

impl AggregateExpression {
    pub fn new(op: AggregateOperation, operand: Expression) -> Self {
        AggregateExpression { op, operand: Box::new(operand), filter: None, distinct: false }
    }

    pub(crate) fn text(&self, f: &mut fmt::Formatter, redact: bool) -> fmt::Result {
        write!(f, "{}(", self.op)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        self.operand.text(f, redact)?;
        write!(f, ")")?;
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE ")?;
            filter.text(f, redact)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for AggregateExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text(f, false)
    }
}

impl From<AggregateExpression> for Expression {
    fn from(value: AggregateExpression) -> Self {
        Expression::Aggregate(value)
    }
}
