pub mod category;
pub mod transaction;

pub use category::{palette_color, Category, KnownCategory, PALETTE};
pub use transaction::{parse_date, TransactionRecord, TransactionType};
