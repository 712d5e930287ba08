pub mod config;
pub mod date_utils;
pub mod error;
pub mod format;
pub mod models;
pub mod services;

pub use date_utils::{select_time_window, TimeWindow, WindowMode, YearMonth};
pub use error::{AppError, AppResult};
pub use models::{Category, KnownCategory, TransactionRecord, TransactionType};
pub use services::analytics::{aggregate_by_category, CategoryBreakdown, CategoryTotal};
pub use services::cash_flow::{build_monthly_series, group_by_month, MonthlyGroup, MonthlySeries};
pub use services::dashboard::{DashboardReport, ReportOptions};

/// Application version from Cargo.toml (single source of truth)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
