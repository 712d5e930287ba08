use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::TransactionRecord;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Logical time range a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// The calendar month containing the reference date.
    Monthly,
    /// The calendar year containing the reference date.
    Yearly,
    /// Explicit dates, both inclusive.
    Custom { start: NaiveDate, end: NaiveDate },
    /// The last `n` months up to and including the reference date.
    TrailingMonths(u32),
}

impl FromStr for WindowMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "1m" => Ok(Self::TrailingMonths(1)),
            "3m" => Ok(Self::TrailingMonths(3)),
            "6m" => Ok(Self::TrailingMonths(6)),
            "12m" => Ok(Self::TrailingMonths(12)),
            _ => Err(()),
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.write_str("monthly"),
            Self::Yearly => f.write_str("yearly"),
            Self::Custom { start, end } => write!(f, "{} to {}", start, end),
            Self::TrailingMonths(n) => write!(f, "{}m", n),
        }
    }
}

/// A calendar month, used as a bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Move by whole months. The year saturates at the `i32` range.
    pub fn shifted(&self, months: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = total
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Self {
            year: year as i32,
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// "Apr"
    pub fn short_label(&self) -> &'static str {
        &self.month_name()[..3]
    }

    /// "April 2025"
    pub fn long_label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    fn month_name(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|index| MONTH_NAMES.get(index as usize))
            .copied()
            .unwrap_or("Unknown")
    }
}

/// A concrete date range. `end` is exclusive unless `end_inclusive` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub end_inclusive: bool,
}

impl TimeWindow {
    /// `[start, end)`. Collapses to an empty window if `end < start`.
    pub fn half_open(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            return Self::empty(start);
        }
        Self {
            start,
            end,
            end_inclusive: false,
        }
    }

    /// `[start, end]`. Collapses to an empty window if `end < start`.
    pub fn closed(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            return Self::empty(start);
        }
        Self {
            start,
            end,
            end_inclusive: true,
        }
    }

    /// A window that contains no date.
    pub fn empty(at: NaiveDate) -> Self {
        Self {
            start: at,
            end: at,
            end_inclusive: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.end_inclusive && self.start >= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.end_inclusive {
            self.start <= date && date <= self.end
        } else {
            self.start <= date && date < self.end
        }
    }

    /// Last day covered by the window, if any.
    pub fn last_day(&self) -> Option<NaiveDate> {
        if self.is_empty() {
            None
        } else if self.end_inclusive {
            Some(self.end)
        } else {
            self.end.pred_opt()
        }
    }

    /// Records with a valid date inside the window, in input order.
    pub fn filter<'a>(&self, records: &'a [TransactionRecord]) -> Vec<&'a TransactionRecord> {
        records
            .iter()
            .filter(|record| record.parsed_date().is_some_and(|date| self.contains(date)))
            .collect()
    }

    /// Human-readable label, e.g. "April 2025", "2025", or
    /// "January 2025 – April 2025".
    pub fn label(&self) -> String {
        let Some(last) = self.last_day() else {
            return String::new();
        };
        let first = self.start;

        if first == year_start(first) && Some(last) == year_end(first) {
            return first.year().to_string();
        }

        let (from, to) = (YearMonth::of(first), YearMonth::of(last));
        if from == to {
            from.long_label()
        } else {
            format!("{} – {}", from.long_label(), to.long_label())
        }
    }
}

/// Resolve a window mode against a reference date.
pub fn select_time_window(mode: WindowMode, reference: NaiveDate) -> TimeWindow {
    match mode {
        WindowMode::Monthly => {
            let start = month_start(reference);
            TimeWindow::half_open(start, shift_months(start, 1))
        }
        WindowMode::Yearly => {
            let start = year_start(reference);
            let end = NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1).unwrap_or(NaiveDate::MAX);
            TimeWindow::half_open(start, end)
        }
        WindowMode::Custom { start, end } => TimeWindow::closed(start, end),
        WindowMode::TrailingMonths(months) => {
            let back = i32::try_from(months).unwrap_or(i32::MAX);
            let start = shift_months(reference, -back);
            TimeWindow::closed(start, reference)
        }
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn year_start(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

fn year_end(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), 12, 31)
}

/// Move a date by whole calendar months, clamping the day to the target
/// month's length (Mar 31 - 1 month = Feb 28/29).
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let target = YearMonth::of(date).shifted(months);
    let day = date.day().min(days_in_month(target));
    NaiveDate::from_ymd_opt(target.year, target.month, day).unwrap_or(if months < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

fn days_in_month(month: YearMonth) -> u32 {
    month
        .next()
        .first_day()
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
