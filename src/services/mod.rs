pub mod analytics;
pub mod cash_flow;
pub mod dashboard;
pub mod transaction_client;
