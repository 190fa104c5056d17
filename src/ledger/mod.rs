//! Ledger module containing the rent engine, month keys, overrides and lease amendments

pub mod book;
pub mod core;
pub mod lease;
pub mod month;
pub mod overrides;

pub use book::*;
pub use self::core::*;
pub use lease::*;
pub use month::*;
pub use overrides::*;
