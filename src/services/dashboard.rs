use crate::date_utils::{select_time_window, WindowMode};
use crate::format::{format_compact, format_money, format_share};
use crate::models::TransactionRecord;
use crate::services::analytics::{
    aggregate_by_category, current_balance, summarize, top_categories, CashFlowSummary,
    CategoryBreakdown, CategoryTotal,
};
use crate::services::cash_flow::{build_monthly_series, group_by_month, MonthlySeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub window: WindowMode,
    pub series_months: usize,
    pub top_n: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            window: WindowMode::Monthly,
            series_months: 5,
            top_n: 3,
        }
    }
}

/// Section header of the month-grouped feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSection {
    pub label: String,
    pub income_cents: i64,
    pub expense_cents: i64,
    pub transaction_count: usize,
}

/// Everything the home and cash-flow views show, computed in one pass over
/// the fetched transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub generated_for: NaiveDate,
    pub balance_cents: i64,
    pub this_month: CashFlowSummary,
    pub top_spending: Vec<CategoryTotal>,
    pub window_label: String,
    pub breakdown: CategoryBreakdown,
    pub series: MonthlySeries,
    pub months: Vec<MonthSection>,
}

impl DashboardReport {
    pub fn build(
        transactions: &[TransactionRecord],
        options: &ReportOptions,
        today: NaiveDate,
    ) -> Self {
        let this_month_window = select_time_window(WindowMode::Monthly, today);
        let this_month = this_month_window.filter(transactions);

        let window = select_time_window(options.window, today);
        let in_window = window.filter(transactions);

        let months = group_by_month(transactions)
            .into_iter()
            .map(|group| {
                let summary = summarize(group.transactions);
                MonthSection {
                    label: group.label,
                    income_cents: summary.income_cents,
                    expense_cents: summary.expense_cents,
                    transaction_count: summary.transaction_count,
                }
            })
            .collect();

        tracing::debug!(
            transactions = transactions.len(),
            window = %options.window,
            in_window = in_window.len(),
            "Building dashboard report"
        );

        Self {
            generated_for: today,
            balance_cents: current_balance(transactions),
            this_month: summarize(this_month.iter().copied()),
            top_spending: top_categories(this_month, options.top_n),
            window_label: window.label(),
            breakdown: aggregate_by_category(in_window),
            series: build_monthly_series(transactions, options.series_months, None),
            months,
        }
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self, currency: &str, locale: &str) -> String {
        let money = |cents: i64| format_money(cents, currency, locale);
        let mut out = String::new();

        let _ = writeln!(out, "Balance: {}", money(self.balance_cents));
        let _ = writeln!(
            out,
            "This month: income {}, spending {}",
            money(self.this_month.income_cents),
            money(self.this_month.expense_cents)
        );

        let _ = writeln!(out, "\nTop spending");
        if self.top_spending.is_empty() {
            let _ = writeln!(out, "  No spending this month");
        }
        for item in &self.top_spending {
            let _ = writeln!(out, "  {:<16} {}", item.label, money(item.total_cents));
        }

        let _ = writeln!(
            out,
            "\nSpending overview ({}): {}",
            self.window_label,
            money(self.breakdown.total_spending_cents)
        );
        if self.breakdown.is_empty() {
            let _ = writeln!(out, "  No spending in this period");
        }
        for item in &self.breakdown.categories {
            let _ = writeln!(
                out,
                "  {:<16} {:>7} {}",
                item.label,
                format_share(item.percentage, locale),
                money(item.total_cents)
            );
        }

        let _ = writeln!(out, "\nCash flow");
        for (i, label) in self.series.labels.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:<4} +{:<8} -{}",
                label,
                format_compact(self.series.income[i]),
                format_compact(self.series.expense[i])
            );
        }

        let _ = writeln!(out, "\nTransactions");
        for section in &self.months {
            let _ = writeln!(
                out,
                "  {:<16} {:>3} items  +{} -{}",
                section.label,
                section.transaction_count,
                money(section.income_cents),
                money(section.expense_cents)
            );
        }

        out
    }
}
