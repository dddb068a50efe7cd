//! Conversions between the pricing engine's `f64` and `NUMERIC` columns.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::DbError;

/// Rounds to two places for a `NUMERIC(_, 2)` column.
pub(crate) fn to_numeric(field: &'static str, value: f64) -> Result<Decimal, DbError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or(DbError::InvalidNumber { field, value })
}

pub(crate) fn from_numeric(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
