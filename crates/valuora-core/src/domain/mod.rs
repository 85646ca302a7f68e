//! # Domain Models
//!
//! Value types shared by search, the wizard, and project submission.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TickerRecord`] | Raw dataset row (symbol, company name, currencies) |
//! | [`Symbol`] | Validated, uppercase ticker |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Dataset rows are lenient: a record with a malformed currency still loads,
//! with that currency dropped. User-entered tickers are strict and go
//! through [`Symbol::parse`].

mod symbol;
mod ticker;
mod timestamp;

pub use symbol::Symbol;
pub use ticker::{validate_currency_code, TickerRecord, UNAVAILABLE_SYMBOL};
pub use timestamp::UtcDateTime;
