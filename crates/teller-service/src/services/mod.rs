//! Domain services: the operations consumed by the HTTP handlers.
//!
//! Each public operation performs all storage reads and rule checks
//! before its first write, so an error exit never leaves partial state.

pub mod accounts;
pub mod numbers;
pub mod transactions;

pub use accounts::{AccountDto, AccountService};
pub use numbers::AccountNumberGenerator;
pub use transactions::{TransactionDto, TransactionService};
