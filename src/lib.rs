//! # Rent Ledger Core
//!
//! A rent ledger engine that rebuilds a tenant's month-by-month statement of
//! rent due, payments received, and running balance.
//!
//! ## Features
//!
//! - **Monthly schedule**: one row per calendar month from lease start through an as-of date
//! - **Proration**: day-weighted rent for the first month and the contract end month
//! - **Overrides**: month-specific rent that supersedes computed rent, with tolerant decoding of legacy records
//! - **Payment matching**: payments grouped by month with earliest payment date and totals
//! - **Notices**: contract expiry and payment-due notices
//! - **Storage abstraction**: trait-based loading of leases and payments
//!
//! ## Quick Start
//!
//! ```rust
//! use rent_ledger_core::{build_ledger, LeaseBuilder, Payment};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let lease = LeaseBuilder::new("unit-101".to_string(), start, BigDecimal::from(300000))
//!     .prorated()
//!     .build()
//!     .unwrap();
//! let payments = vec![Payment::new(
//!     "unit-101".to_string(),
//!     NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
//!     BigDecimal::from(100000),
//! )];
//!
//! let rows = build_ledger(&lease, &payments, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()).unwrap();
//! assert_eq!(rows.len(), 3);
//! ```

pub mod config;
pub mod ledger;
pub mod notices;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use notices::*;
pub use traits::*;
pub use types::*;
