//! Ledger configuration

use serde::{Deserialize, Serialize};

/// Marker attached to a prorated first month
pub const DEFAULT_PRORATED_START_NOTE: &str = "prorated-start";

/// Marker attached to a prorated contract end month
pub const DEFAULT_PRORATED_END_NOTE: &str = "prorated-end";

/// Days before contract end at which an expiry notice is raised
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 30;

/// Tunables for ledger generation and notices
///
/// Missing fields fall back to their defaults when deserializing, so a
/// partial document such as `{"expiry_warning_days": 60}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Note for a month charged under start-month proration
    pub prorated_start_note: String,
    /// Note for a month charged under end-month proration
    pub prorated_end_note: String,
    /// Window, in days, for contract expiry notices
    pub expiry_warning_days: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            prorated_start_note: DEFAULT_PRORATED_START_NOTE.to_string(),
            prorated_end_note: DEFAULT_PRORATED_END_NOTE.to_string(),
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
        }
    }
}
