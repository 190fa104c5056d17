//! Decimal amount decoding
//!
//! Stored amounts arrive as JSON numbers, integers or decimal strings. Floats
//! are read through their shortest text form so `12.34` decodes as exactly
//! `12.34` rather than the binary expansion of the nearest `f64`.

use bigdecimal::BigDecimal;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = BigDecimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a number or string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(BigDecimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(BigDecimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("amount is not a finite number: {v}")));
        }
        BigDecimal::from_str(&v.to_string()).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        BigDecimal::from_str(v.trim()).map_err(E::custom)
    }
}

struct Amount(BigDecimal);

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor).map(Amount)
    }
}

/// `deserialize_with` target for `BigDecimal` fields
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
    Amount::deserialize(deserializer).map(|a| a.0)
}

/// `deserialize_with` target for `Option<BigDecimal>` fields
pub fn deserialize_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BigDecimal>, D::Error> {
    Option::<Amount>::deserialize(deserializer).map(|a| a.map(|a| a.0))
}
