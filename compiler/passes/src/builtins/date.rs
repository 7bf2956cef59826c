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

//! Folding rules for the date operator families.
//!
//! Fixed-width units go through `TimeDelta`; month, quarter and year use
//! calendar arithmetic. Truncation clears every field below the unit; weeks
//! truncate to Monday. DOW extraction counts Sunday as 0, DOY is one-based.

use super::*;

use tarn_ast::{Literal, Timepart};

use chrono::{DateTime, Datelike, Months, TimeDelta, Timelike, Utc};

pub(super) fn fold(node: &BuiltinExpression) -> Option<Expression> {
    if node.args.iter().any(|arg| arg.as_literal().is_some_and(Literal::is_missing)) {
        return Some(Expression::Literal(Literal::Missing));
    }

    let (kind, part) = node.func.date_op()?;
    match kind {
        DateOpKind::Add => {
            let amount = node.args.first()?.as_literal()?.as_int()?;
            let ts = node.args.get(1)?.as_literal()?.as_timestamp()?;
            let out = date_add(part, amount, ts)?;
            Some(Expression::Literal(Literal::Timestamp(out)))
        }
        DateOpKind::Diff => {
            let from = node.args.first()?.as_literal()?.as_timestamp()?;
            let to = node.args.get(1)?.as_literal()?.as_timestamp()?;
            let out = date_diff(part, from, to)?;
            Some(Expression::Literal(Literal::Integer(out)))
        }
        DateOpKind::Extract => {
            let ts = node.args.first()?.as_literal()?.as_timestamp()?;
            let out = date_extract(part, ts)?;
            Some(Expression::Literal(Literal::Integer(out)))
        }
        DateOpKind::Trunc => {
            let ts = node.args.first()?.as_literal()?.as_timestamp()?;
            let out = date_trunc(part, ts)?;
            Some(Expression::Literal(Literal::Timestamp(out)))
        }
    }
}

fn add_months(ts: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    if months >= 0 {
        ts.checked_add_months(Months::new(u32::try_from(months).ok()?))
    } else {
        ts.checked_sub_months(Months::new(u32::try_from(-months).ok()?))
    }
}

pub(crate) fn date_add(part: Timepart, amount: i64, ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match part {
        Timepart::Microsecond => ts.checked_add_signed(TimeDelta::microseconds(amount)),
        Timepart::Millisecond => ts.checked_add_signed(TimeDelta::milliseconds(amount)),
        Timepart::Second => ts.checked_add_signed(TimeDelta::try_seconds(amount)?),
        Timepart::Minute => ts.checked_add_signed(TimeDelta::try_minutes(amount)?),
        Timepart::Hour => ts.checked_add_signed(TimeDelta::try_hours(amount)?),
        Timepart::Day => ts.checked_add_signed(TimeDelta::try_days(amount)?),
        Timepart::Week => ts.checked_add_signed(TimeDelta::try_weeks(amount)?),
        Timepart::Month => add_months(ts, amount),
        Timepart::Quarter => add_months(ts, amount.checked_mul(3)?),
        Timepart::Year => add_months(ts, amount.checked_mul(12)?),
        Timepart::DayOfWeek | Timepart::DayOfYear => None,
    }
}

/// Whole units elapsed from `from` to `to`; negative when `to` precedes
/// `from`. Calendar units count boundary crossings between the truncated
/// endpoints.
pub(crate) fn date_diff(part: Timepart, from: DateTime<Utc>, to: DateTime<Utc>) -> Option<i64> {
    let delta = to.signed_duration_since(from);
    match part {
        Timepart::Microsecond => delta.num_microseconds(),
        Timepart::Millisecond => Some(delta.num_milliseconds()),
        Timepart::Second => Some(delta.num_seconds()),
        Timepart::Minute => Some(delta.num_minutes()),
        Timepart::Hour => Some(delta.num_hours()),
        Timepart::Day => Some(delta.num_days()),
        Timepart::Week => Some(delta.num_weeks()),
        Timepart::Month => Some(month_index(to) - month_index(from)),
        Timepart::Quarter => Some(quarter_index(to) - quarter_index(from)),
        Timepart::Year => Some(to.year() as i64 - from.year() as i64),
        Timepart::DayOfWeek | Timepart::DayOfYear => None,
    }
}

fn month_index(ts: DateTime<Utc>) -> i64 {
    ts.year() as i64 * 12 + ts.month0() as i64
}

fn quarter_index(ts: DateTime<Utc>) -> i64 {
    ts.year() as i64 * 4 + ts.month0() as i64 / 3
}

pub(crate) fn date_extract(part: Timepart, ts: DateTime<Utc>) -> Option<i64> {
    Some(match part {
        Timepart::Microsecond => (ts.nanosecond() / 1_000) as i64,
        Timepart::Millisecond => (ts.nanosecond() / 1_000_000) as i64,
        Timepart::Second => ts.second() as i64,
        Timepart::Minute => ts.minute() as i64,
        Timepart::Hour => ts.hour() as i64,
        Timepart::Day => ts.day() as i64,
        Timepart::Week => ts.iso_week().week() as i64,
        Timepart::Month => ts.month() as i64,
        Timepart::Quarter => (ts.month0() / 3) as i64 + 1,
        Timepart::Year => ts.year() as i64,
        Timepart::DayOfWeek => ts.weekday().num_days_from_sunday() as i64,
        Timepart::DayOfYear => ts.ordinal() as i64,
    })
}

pub(crate) fn date_trunc(part: Timepart, ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match part {
        Timepart::Microsecond => ts.with_nanosecond(ts.nanosecond() / 1_000 * 1_000),
        Timepart::Millisecond => ts.with_nanosecond(ts.nanosecond() / 1_000_000 * 1_000_000),
        Timepart::Second => ts.with_nanosecond(0),
        Timepart::Minute => ts.with_nanosecond(0)?.with_second(0),
        Timepart::Hour => ts.with_nanosecond(0)?.with_second(0)?.with_minute(0),
        Timepart::Day => day_start(ts),
        Timepart::Week => {
            let days_into_week = ts.weekday().num_days_from_monday() as i64;
            day_start(ts.checked_sub_signed(TimeDelta::try_days(days_into_week)?)?)
        }
        Timepart::Month => day_start(ts)?.with_day(1),
        Timepart::Quarter => day_start(ts)?.with_day(1)?.with_month0(ts.month0() / 3 * 3),
        Timepart::Year => day_start(ts)?.with_day(1)?.with_month(1),
        Timepart::DayOfWeek | Timepart::DayOfYear => None,
    }
}

fn day_start(ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    ts.with_nanosecond(0)?.with_second(0)?.with_minute(0)?.with_hour(0)
}

#[cfg(test)]
mod test {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_add_calendar_units() {
        let t = ts("2020-01-31T10:30:00Z");
        // Clamps to the end of the shorter month.
        assert_eq!(date_add(Timepart::Month, 1, t), Some(ts("2020-02-29T10:30:00Z")));
        assert_eq!(date_add(Timepart::Year, -1, t), Some(ts("2019-01-31T10:30:00Z")));
        assert_eq!(date_add(Timepart::Quarter, 1, t), Some(ts("2020-04-30T10:30:00Z")));
    }

    #[test]
    fn test_diff_counts_boundaries() {
        let a = ts("2020-01-31T23:00:00Z");
        let b = ts("2020-02-01T01:00:00Z");
        assert_eq!(date_diff(Timepart::Month, a, b), Some(1));
        assert_eq!(date_diff(Timepart::Day, a, b), Some(0));
        assert_eq!(date_diff(Timepart::Hour, a, b), Some(2));
        assert_eq!(date_diff(Timepart::Hour, b, a), Some(-2));
    }

    #[test]
    fn test_trunc() {
        let t = ts("2009-01-14T23:59:59.123456789Z");
        assert_eq!(date_trunc(Timepart::Second, t), Some(ts("2009-01-14T23:59:59Z")));
        assert_eq!(date_trunc(Timepart::Day, t), Some(ts("2009-01-14T00:00:00Z")));
        // 2009-01-14 is a Wednesday; the week starts Monday the 12th.
        assert_eq!(date_trunc(Timepart::Week, t), Some(ts("2009-01-12T00:00:00Z")));
        assert_eq!(date_trunc(Timepart::Quarter, t), Some(ts("2009-01-01T00:00:00Z")));
        assert_eq!(date_trunc(Timepart::Year, t), Some(ts("2009-01-01T00:00:00Z")));
    }

    #[test]
    fn test_extract() {
        let t = ts("2009-01-14T23:59:59.123456Z");
        assert_eq!(date_extract(Timepart::Year, t), Some(2009));
        assert_eq!(date_extract(Timepart::Quarter, t), Some(1));
        assert_eq!(date_extract(Timepart::Millisecond, t), Some(123));
        assert_eq!(date_extract(Timepart::Microsecond, t), Some(123_456));
        // A Wednesday: Sunday-based DOW is 3.
        assert_eq!(date_extract(Timepart::DayOfWeek, t), Some(3));
        assert_eq!(date_extract(Timepart::DayOfYear, t), Some(14));
    }
}
