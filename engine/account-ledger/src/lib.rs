//! League-participant money accounts.

mod error;
mod funds;
mod ledger;

pub use error::{LedgerError, Result};
pub use funds::Funds;
pub use ledger::{Account, AccountLedger};
