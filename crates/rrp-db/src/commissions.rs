//! Stored commission schedules, one ordered list per retailer.

use rrp_pricing::CommissionSchedule;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::numeric::{from_numeric, to_numeric};
use crate::DbError;

/// Replaces the retailer's stored schedule in one transaction.
///
/// Returns the number of entries written.
///
/// # Errors
///
/// Returns [`DbError::InvalidNumber`] for a non-finite rate, or
/// [`DbError::Sqlx`] if any statement fails. Nothing is changed on error.
pub async fn replace_commission_schedule(
    pool: &PgPool,
    retailer: &str,
    schedule: &CommissionSchedule,
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM commission_schedules WHERE retailer = $1")
        .bind(retailer)
        .execute(&mut *tx)
        .await?;

    for (position, entry) in (0_i32..).zip(schedule.entries()) {
        sqlx::query(
            "INSERT INTO commission_schedules (retailer, position, category, pct) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(retailer)
        .bind(position)
        .bind(&entry.category)
        .bind(to_numeric("pct", entry.pct)?)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(retailer, entries = schedule.len(), "commission schedule replaced");
    Ok(schedule.len())
}

/// Loads the stored schedule in import order. An empty schedule means
/// nothing has been imported for this retailer.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn load_commission_schedule(
    pool: &PgPool,
    retailer: &str,
) -> Result<CommissionSchedule, DbError> {
    let rows = sqlx::query_as::<_, (String, Decimal)>(
        "SELECT category, pct FROM commission_schedules \
         WHERE retailer = $1 \
         ORDER BY position",
    )
    .bind(retailer)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(category, pct)| (category, from_numeric(pct)))
        .collect())
}
