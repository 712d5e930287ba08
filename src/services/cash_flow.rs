use crate::date_utils::YearMonth;
use crate::models::TransactionRecord;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Transactions of one calendar month, for a sectioned feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyGroup<'a> {
    /// "April 2025"
    pub label: String,
    pub month: YearMonth,
    pub transactions: Vec<&'a TransactionRecord>,
}

/// Parallel income/expense series over consecutive months, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub months: Vec<YearMonth>,
    pub income: Vec<i64>,
    pub expense: Vec<i64>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Partition transactions into calendar months, most recent month first.
///
/// Records are ordered by date (newest first, ties keep input order) before
/// grouping, so the result does not depend on the order the backend used.
/// Records whose date does not parse are left out.
pub fn group_by_month(transactions: &[TransactionRecord]) -> Vec<MonthlyGroup<'_>> {
    let mut dated: Vec<(NaiveDate, &TransactionRecord)> = transactions
        .iter()
        .filter_map(|record| record.parsed_date().map(|date| (date, record)))
        .collect();

    let skipped = transactions.len() - dated.len();
    if skipped > 0 {
        tracing::warn!(skipped, "Skipping transactions with unparseable dates");
    }

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut groups: Vec<MonthlyGroup<'_>> = Vec::new();
    for (date, record) in dated {
        let month = YearMonth::of(date);
        match groups.last_mut() {
            Some(group) if group.month == month => group.transactions.push(record),
            _ => groups.push(MonthlyGroup {
                label: month.long_label(),
                month,
                transactions: vec![record],
            }),
        }
    }

    tracing::debug!(groups = groups.len(), "Grouped transactions by month");
    groups
}

/// Longest series `build_monthly_series` produces; longer requests are clamped.
pub const MAX_SERIES_MONTHS: usize = 1200;

/// Monthly income and expense totals for the `window_length` months ending at
/// the anchor month.
///
/// Without an explicit anchor the series ends at the month of the latest
/// dated transaction, or at the current month when nothing has a valid date.
pub fn build_monthly_series(
    transactions: &[TransactionRecord],
    window_length: usize,
    anchor: Option<NaiveDate>,
) -> MonthlySeries {
    if window_length == 0 {
        return MonthlySeries::default();
    }
    if window_length > MAX_SERIES_MONTHS {
        tracing::warn!(
            requested = window_length,
            max = MAX_SERIES_MONTHS,
            "Series length clamped"
        );
    }
    let window_length = window_length.min(MAX_SERIES_MONTHS);
    let span = i32::try_from(window_length).unwrap_or(i32::MAX);

    let anchor = anchor
        .or_else(|| transactions.iter().filter_map(|r| r.parsed_date()).max())
        .unwrap_or_else(|| Local::now().date_naive());
    let last = YearMonth::of(anchor);
    let first = last.shifted(1 - span);

    let months: Vec<YearMonth> = (0..span).map(|offset| first.shifted(offset)).collect();
    let index: HashMap<YearMonth, usize> = months
        .iter()
        .enumerate()
        .map(|(position, month)| (*month, position))
        .collect();

    let mut income = vec![0i64; window_length];
    let mut expense = vec![0i64; window_length];

    for record in transactions {
        let Some(date) = record.parsed_date() else {
            continue;
        };
        let Some(&position) = index.get(&YearMonth::of(date)) else {
            continue;
        };
        if record.is_credit() {
            income[position] = income[position].saturating_add(record.amount_cents());
        } else {
            expense[position] = expense[position].saturating_add(record.amount_cents());
        }
    }

    MonthlySeries {
        labels: months.iter().map(|m| m.short_label().to_string()).collect(),
        months,
        income,
        expense,
    }
}
