pub mod errors;
pub mod money;
pub mod reply;
pub mod table;

pub use errors::extract_clean_error;
pub use money::{currency_symbol, format_money, parse_amount, parse_positive_amount, MoneyParseError};
pub use reply::{progress_bar, Reply};
pub use table::{Align, Table};
