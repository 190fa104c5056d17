//! Month-specific rent overrides
//!
//! Stored data carries two shapes for an override: a bare amount (legacy
//! records) and an `{ amount, note }` object. Both are accepted at the
//! boundary through [`RawOverride`] and normalized into [`RentOverride`]
//! before the engine sees them. Entries that cannot be normalized (bad month
//! key, missing or non-numeric amount, any other shape) are skipped so the
//! month falls back to its computed rent.

use bigdecimal::BigDecimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ledger::month::MonthKey;
use crate::utils::decimal;

/// An explicit rent amount for one month, superseding computed rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentOverride {
    #[serde(deserialize_with = "decimal::deserialize")]
    pub amount: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RentOverride {
    pub fn new(amount: BigDecimal, note: Option<String>) -> Self {
        Self {
            amount,
            note: normalize_note(note),
        }
    }
}

/// Override entry as found in stored data
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawOverride {
    /// Legacy records store the amount alone
    Amount(#[serde(deserialize_with = "decimal::deserialize")] BigDecimal),
    Detailed {
        #[serde(default, deserialize_with = "decimal::deserialize_option")]
        amount: Option<BigDecimal>,
        #[serde(default)]
        note: Option<String>,
    },
    /// Anything else: `null`, arrays, non-numeric amounts, non-string notes
    Malformed(IgnoredAny),
}

impl RawOverride {
    /// Normalize into an override, or `None` when no amount is present
    pub fn normalize(self) -> Option<RentOverride> {
        match self {
            RawOverride::Amount(amount) => Some(RentOverride::new(amount, None)),
            RawOverride::Detailed { amount, note } => {
                amount.map(|amount| RentOverride::new(amount, note))
            }
            RawOverride::Malformed(_) => None,
        }
    }
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Sparse mapping from month to rent override
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, RawOverride>",
    into = "BTreeMap<String, RentOverride>"
)]
pub struct RentOverrides {
    entries: BTreeMap<MonthKey, RentOverride>,
}

impl RentOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, skipping anything that does not normalize
    pub fn from_raw<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, RawOverride)>,
    {
        let mut overrides = Self::new();
        for (key, raw) in entries {
            let month = match key.parse::<MonthKey>() {
                Ok(month) => month,
                Err(_) => {
                    tracing::warn!(key = %key, "skipping rent override with malformed month key");
                    continue;
                }
            };
            match raw.normalize() {
                Some(entry) => {
                    overrides.entries.insert(month, entry);
                }
                None => {
                    tracing::warn!(month = %month, "skipping rent override without a usable amount");
                }
            }
        }
        overrides
    }

    /// Set the override for a month, returning any override it replaced
    pub fn insert(&mut self, month: MonthKey, entry: RentOverride) -> Option<RentOverride> {
        self.entries.insert(month, entry)
    }

    pub fn remove(&mut self, month: &MonthKey) -> Option<RentOverride> {
        self.entries.remove(month)
    }

    pub fn get(&self, month: &MonthKey) -> Option<&RentOverride> {
        self.entries.get(month)
    }

    pub fn contains(&self, month: &MonthKey) -> bool {
        self.entries.contains_key(month)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overrides in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, &RentOverride)> {
        self.entries.iter()
    }
}

impl From<BTreeMap<String, RawOverride>> for RentOverrides {
    fn from(raw: BTreeMap<String, RawOverride>) -> Self {
        Self::from_raw(raw)
    }
}

impl From<RentOverrides> for BTreeMap<String, RentOverride> {
    fn from(overrides: RentOverrides) -> Self {
        overrides
            .entries
            .into_iter()
            .map(|(month, entry)| (month.to_string(), entry))
            .collect()
    }
}
