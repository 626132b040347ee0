//! Lenient quantity and price coercion.
//!
//! The cart API never rejects malformed numeric input; it normalizes it the
//! way the storefront always has: non-numeric quantities coerce to 1,
//! non-numeric or negative prices coerce to zero. These deserializers keep
//! that behavior at the serde boundary so the rest of the code only ever
//! sees well-formed values.

use core::fmt;

use rust_decimal::Decimal;
use serde::Deserializer;
use serde::de::{self, Visitor};

/// Deserialize a line quantity, flooring anything unusable at 1.
///
/// Accepts integers, floats (truncated), and numeric strings. Zero,
/// negative, and non-numeric input all become 1: a line item always carries
/// a positive quantity.
pub fn lenient_line_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = deserializer.deserialize_any(QuantityVisitor)?;
    Ok(u32::try_from(raw.max(1)).unwrap_or(u32::MAX))
}

/// Deserialize an update quantity, keeping zero and negatives intact.
///
/// The update endpoint treats `quantity <= 0` as removal, so the raw value
/// must survive coercion; only non-numeric input falls back to 1.
pub fn lenient_update_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(QuantityVisitor)
}

/// Deserialize a unit price, normalizing anything unusable to zero.
///
/// Accepts numbers and numeric strings; negative prices clamp to zero.
pub fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let price = deserializer.deserialize_any(PriceVisitor)?;
    Ok(price.max(Decimal::ZERO))
}

struct QuantityVisitor;

impl Visitor<'_> for QuantityVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a quantity as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        Ok(i64::try_from(v).unwrap_or(i64::MAX))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.is_finite() {
            Ok(v.trunc() as i64)
        } else {
            Ok(1)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        Ok(v.trim().parse::<i64>().unwrap_or(1))
    }

    fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
        Ok(1)
    }

    fn visit_none<E: de::Error>(self) -> Result<i64, E> {
        Ok(1)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<i64, E> {
        Ok(1)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a price as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Ok(Decimal::try_from(v).unwrap_or(Decimal::ZERO))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        Ok(v.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }
}
