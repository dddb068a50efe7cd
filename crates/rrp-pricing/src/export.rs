use std::io::Write;

use crate::batch::PricingResult;
use crate::error::PricingError;

pub const HEADERS: [&str; 19] = [
    "sku",
    "name",
    "weight_kg",
    "size_bucket",
    "volume_m3",
    "category",
    "category_source",
    "commission_pct",
    "k_percent",
    "logistics_tariff",
    "logistics_total",
    "cost",
    "rrp",
    "profit_before_tax",
    "margin_before_tax_pct",
    "tax",
    "profit_after_tax",
    "margin_after_tax_pct",
    "status",
];

/// Fixed-point formatting without a `-0.00`.
fn fixed(value: f64, places: usize) -> String {
    let s = format!("{value:.places$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

fn money(value: f64) -> String {
    fixed(value, 2)
}

fn pct(value: f64) -> String {
    fixed(value, 1)
}

/// Write results as CSV. Rounding happens here and nowhere else.
///
/// # Errors
///
/// Returns `PricingError::Csv` if writing fails.
pub fn write_results<W: Write>(writer: W, rows: &[PricingResult]) -> Result<(), PricingError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for row in rows {
        wtr.write_record([
            row.sku.clone(),
            row.name.clone(),
            fixed(row.weight_kg, 3),
            row.size_bucket.clone(),
            fixed(row.volume_m3, 6),
            row.category.clone(),
            row.category_source
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            pct(row.commission_pct),
            pct(row.k_percent),
            money(row.logistics_tariff),
            money(row.logistics_total),
            money(row.cost),
            money(row.rrp),
            money(row.profit_before_tax),
            pct(row.margin_before_tax_pct),
            money(row.tax),
            money(row.profit_after_tax),
            pct(row.margin_after_tax_pct),
            row.status.as_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
