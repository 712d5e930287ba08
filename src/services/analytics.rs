use crate::date_utils::TimeWindow;
use crate::models::{palette_color, Category, TransactionRecord, PALETTE};
use serde::Serialize;
use std::collections::HashMap;

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CashFlowSummary {
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
    pub transaction_count: usize,
}

impl CashFlowSummary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        let mut summary = Self::default();
        for record in transactions {
            if record.is_credit() {
                summary.income_cents = summary
                    .income_cents
                    .saturating_add(record.amount_cents());
            } else {
                summary.expense_cents = summary
                    .expense_cents
                    .saturating_add(record.amount_cents());
            }
            summary.transaction_count += 1;
        }
        summary.net_cents = summary.income_cents.saturating_sub(summary.expense_cents);
        summary
    }
}

/// Spending for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub label: &'static str,
    pub total_cents: i64,
    pub transaction_count: usize,
    /// Share of total spending, 0 when there is no spending at all.
    pub percentage: f64,
    pub color_index: usize,
}

impl CategoryTotal {
    pub fn color(&self) -> &'static str {
        palette_color(self.color_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<CategoryTotal>,
    pub total_spending_cents: i64,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CategoryTotal> {
        self.categories.iter().find(|c| c.category.key() == key)
    }
}

/// Sum debit amounts per category.
///
/// Categories appear in the order they are first seen; credits are ignored.
/// Callers restrict `transactions` to a window first.
pub fn aggregate_by_category<'a, I>(transactions: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&Category, i64, usize)> = Vec::new();
    let mut seen = 0usize;

    for record in transactions {
        seen += 1;
        if !record.is_debit() {
            continue;
        }
        let category = &record.transaction_category;
        let position = *positions.entry(category.key()).or_insert_with(|| {
            totals.push((category, 0, 0));
            totals.len() - 1
        });
        let entry = &mut totals[position];
        entry.1 = entry.1.saturating_add(record.amount_cents());
        entry.2 += 1;
    }

    let total_spending_cents = totals
        .iter()
        .fold(0i64, |sum, (_, total, _)| sum.saturating_add(*total));

    let categories = totals
        .into_iter()
        .enumerate()
        .map(
            |(position, (category, total_cents, transaction_count))| CategoryTotal {
                category: category.clone(),
                label: category.label(),
                total_cents,
                transaction_count,
                percentage: if total_spending_cents > 0 {
                    (total_cents as f64 / total_spending_cents as f64) * 100.0
                } else {
                    0.0
                },
                color_index: position % PALETTE.len(),
            },
        )
        .collect();

    tracing::debug!(
        records = seen,
        total_spending_cents,
        "Aggregated spending by category"
    );

    CategoryBreakdown {
        categories,
        total_spending_cents,
    }
}

/// [`aggregate_by_category`] over the records inside `window`.
pub fn aggregate_by_category_in(
    transactions: &[TransactionRecord],
    window: &TimeWindow,
) -> CategoryBreakdown {
    aggregate_by_category(window.filter(transactions))
}

/// The `n` categories with the highest spending, largest first.
pub fn top_categories<'a, I>(transactions: I, n: usize) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut categories = aggregate_by_category(transactions).categories;
    categories.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
    categories.truncate(n);
    categories
}

pub fn summarize<'a, I>(transactions: I) -> CashFlowSummary
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    CashFlowSummary::from_transactions(transactions)
}

/// Credits minus debits over every record, dated or not. Saturates instead
/// of overflowing.
pub fn current_balance<'a, I>(transactions: I) -> i64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    transactions
        .into_iter()
        .map(TransactionRecord::signed_cents)
        .fold(0, i64::saturating_add)
}
