//! Catalog command handlers for the CLI.
//!
//! Per-product write failures are logged and counted rather than propagated
//! so one bad row does not abort the import.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use rrp_core::{AppConfig, Unit};
use rrp_pricing::{read_catalog, CatalogImport, CatalogUnits};

/// Sub-commands available under `catalog`.
#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// Import products from a delimited spreadsheet export
    Import {
        /// Path to the catalog file
        path: PathBuf,
        /// Field delimiter (single character, or `tab`)
        #[arg(long, default_value = ",", value_parser = crate::parse_delimiter)]
        delimiter: u8,
        /// Unit of the length/width/height columns: cm, mm, or dim (infer)
        #[arg(long, default_value = "cm")]
        dim_unit: String,
        /// Unit of the weight column: kg, g, or weight (infer)
        #[arg(long, default_value = "kg")]
        weight_unit: String,
    },
    /// List stored products
    List,
}

/// Resolve the unit flags into catalog units using the configured thresholds.
///
/// An unrecognised label falls back to the canonical unit (cm or kg) with a
/// warning; a label of the wrong kind (e.g. `kg` for dimensions) is an error.
pub(crate) fn catalog_units(
    config: &AppConfig,
    dim_unit: &str,
    weight_unit: &str,
) -> anyhow::Result<CatalogUnits> {
    let parse = |label: &str, canonical: Unit| {
        Unit::from_label(
            label,
            config.dim_infer_threshold_cm,
            config.weight_infer_threshold_kg,
        )
        .unwrap_or_else(|| {
            tracing::warn!(label, "unknown unit; values are taken as canonical");
            canonical
        })
    };

    let dimension = parse(dim_unit, Unit::Centimeters);
    if !matches!(
        dimension,
        Unit::Centimeters | Unit::Millimeters | Unit::InferDimension { .. }
    ) {
        anyhow::bail!("'{dim_unit}' is not a length unit; use cm, mm or dim");
    }
    let weight = parse(weight_unit, Unit::Kilograms);
    if !matches!(
        weight,
        Unit::Kilograms | Unit::Grams | Unit::InferWeight { .. }
    ) {
        anyhow::bail!("'{weight_unit}' is not a weight unit; use kg, g or weight");
    }

    Ok(CatalogUnits { dimension, weight })
}

/// Read a catalog file from disk.
pub(crate) fn load_catalog_file(
    path: &Path,
    delimiter: u8,
    units: CatalogUnits,
) -> anyhow::Result<CatalogImport> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("cannot open catalog {}: {e}", path.display()))?;
    let import = read_catalog(file, delimiter, units)?;
    if import.borderline > 0 {
        tracing::warn!(
            borderline = import.borderline,
            "some values were converted close to the unit inference threshold"
        );
    }
    Ok(import)
}

pub(crate) async fn run(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    command: CatalogCommands,
) -> anyhow::Result<()> {
    match command {
        CatalogCommands::Import {
            path,
            delimiter,
            dim_unit,
            weight_unit,
        } => {
            let units = catalog_units(config, &dim_unit, &weight_unit)?;
            let import = load_catalog_file(&path, delimiter, units)?;

            let mut saved = 0usize;
            let mut failed = 0usize;
            for product in &import.products {
                match rrp_db::upsert_product(pool, product).await {
                    Ok(_) => saved += 1,
                    Err(e) => {
                        failed += 1;
                        tracing::error!(sku = %product.sku, error = %e, "failed to save product");
                    }
                }
            }

            println!(
                "saved {saved}, skipped {}, failed {failed}, borderline units {}",
                import.skipped, import.borderline
            );
            if failed > 0 {
                anyhow::bail!("{failed} product(s) could not be saved");
            }
        }
        CatalogCommands::List => {
            let rows = rrp_db::list_products(pool).await?;
            if rows.is_empty() {
                println!("no products found; run `catalog import` first");
                return Ok(());
            }

            println!(
                "{:<16}{:>10}{:>10}{:>10}{:>10}{:>12}  NAME",
                "SKU", "L, CM", "W, CM", "H, CM", "KG", "COST"
            );
            for row in &rows {
                let name = if row.name.chars().count() > 50 {
                    format!("{}...", row.name.chars().take(50).collect::<String>())
                } else {
                    row.name.clone()
                };
                println!(
                    "{:<16}{:>10.1}{:>10.1}{:>10.1}{:>10.3}{:>12}  {}",
                    row.sku, row.length_cm, row.width_cm, row.height_cm, row.weight_kg, row.cost, name
                );
            }
            println!("{} product(s)", rows.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            dim_infer_threshold_cm: 300.0,
            weight_infer_threshold_kg: 100.0,
            ..crate::tests::app_config()
        }
    }

    #[test]
    fn inference_uses_configured_thresholds() {
        let units = catalog_units(&config(), "dim", "weight").unwrap();
        assert_eq!(units.dimension, Unit::InferDimension { threshold_cm: 300.0 });
        assert_eq!(units.weight, Unit::InferWeight { threshold_kg: 100.0 });
    }

    #[test]
    fn unknown_label_falls_back_to_canonical() {
        let err = catalog_units(&config(), "inches", "мм").unwrap_err();
        assert!(err.to_string().contains("weight unit"));

        let units = catalog_units(&config(), "inches", "pounds").unwrap();
        assert_eq!(units, CatalogUnits::default());
    }

    #[test]
    fn wrong_kind_of_unit_is_rejected() {
        assert!(catalog_units(&config(), "kg", "kg").is_err());
        assert!(catalog_units(&config(), "mm", "g").is_ok());
    }
}
