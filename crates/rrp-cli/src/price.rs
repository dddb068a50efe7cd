//! The `price` command: one pricing run for one retailer.
//!
//! With `--catalog` the run is database-free: products come from the file,
//! categories are cached in memory, and the schedule is the retailer's
//! builtin one unless `--commissions` supplies another. Without it the
//! catalog, category cache and stored schedule come from Postgres.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use rrp_core::{
    load_pricing_file, validate_parameters, AppConfig, CategoryCache, MemoryCategoryCache,
    NoClassifier, PricingFile, Product, TaxRegime,
};
use rrp_pricing::commission::from_delimited;
use rrp_pricing::{
    retailer_from_id, run_batch, write_results, BatchReport, PricingRun, RetailerProfile,
};
use rrp_remote::OpenAiClassifier;

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Retailer id: mvideo, lemanpro, sportmaster, citilink
    #[arg(long)]
    pub retailer: String,
    /// Price this catalog file instead of the stored catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Commission schedule file for database-free runs
    #[arg(long, requires = "catalog")]
    pub commissions: Option<PathBuf>,
    /// Field delimiter of the input files (single character, or `tab`)
    #[arg(long, default_value = ",", value_parser = crate::parse_delimiter)]
    pub delimiter: u8,
    #[arg(long, default_value = "cm")]
    pub dim_unit: String,
    #[arg(long, default_value = "kg")]
    pub weight_unit: String,
    /// Write the result CSV here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Pricing parameter file (defaults to RRP_PRICING_PATH)
    #[arg(long)]
    pub pricing: Option<PathBuf>,
    /// Target pre-tax margin, percent of RRP
    #[arg(long)]
    pub margin: Option<f64>,
    #[arg(long)]
    pub acquiring: Option<f64>,
    #[arg(long)]
    pub marketing: Option<f64>,
    #[arg(long)]
    pub early_payout: Option<f64>,
    /// Flat money added to each product's cost base
    #[arg(long)]
    pub extra_costs: Option<f64>,
    /// Flat money added to each product's logistics tariff
    #[arg(long)]
    pub extra_logistics: Option<f64>,
    /// osno, usn-6, usn-15, ausn-8, usn-vat-5, usn-vat-7,
    /// usn-vat-5-composite, usn-vat-7-composite, none
    #[arg(long)]
    pub tax_regime: Option<String>,
    /// Lemanpro delivery zone: inside-zone, spb-lo, region
    #[arg(long)]
    pub zone: Option<String>,
    /// Sportmaster promo period
    #[arg(long)]
    pub promo: bool,
    /// Products classified concurrently (defaults to RRP_CLASSIFIER_MAX_CONCURRENT)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Parameters from the pricing file (if any) with command-line overrides
/// applied on top, validated.
pub(crate) fn resolve_pricing(
    config: &AppConfig,
    args: &PriceArgs,
) -> anyhow::Result<PricingFile> {
    let mut file = match &args.pricing {
        Some(path) => load_pricing_file(path)?,
        None if config.pricing_path.exists() => load_pricing_file(&config.pricing_path)?,
        None => {
            tracing::info!(
                path = %config.pricing_path.display(),
                "no pricing file; using default parameters"
            );
            PricingFile::default()
        }
    };
    apply_overrides(&mut file, args)?;
    validate_parameters(&file.parameters)?;
    Ok(file)
}

fn apply_overrides(file: &mut PricingFile, args: &PriceArgs) -> anyhow::Result<()> {
    let params = &mut file.parameters;
    let overrides = [
        (&mut params.target_margin_pct, args.margin),
        (&mut params.acquiring_pct, args.acquiring),
        (&mut params.marketing_pct, args.marketing),
        (&mut params.early_payout_pct, args.early_payout),
        (&mut params.extra_flat_costs, args.extra_costs),
        (&mut params.extra_logistics, args.extra_logistics),
    ];
    for (slot, value) in overrides {
        if let Some(value) = value {
            *slot = value;
        }
    }

    if let Some(raw) = &args.tax_regime {
        params.tax_regime = TaxRegime::parse(raw);
    }
    if let Some(zone) = &args.zone {
        file.retailers.lemanpro.zone = Some(zone.clone());
    }
    if args.promo {
        file.retailers.sportmaster.promo = true;
    }
    Ok(())
}

fn read_schedule_file(
    path: &Path,
    delimiter: u8,
) -> anyhow::Result<rrp_pricing::CommissionSchedule> {
    let file =
        File::open(path).map_err(|e| anyhow::anyhow!("cannot open {}: {e}", path.display()))?;
    let import = from_delimited(file, delimiter)?;
    if import.schedule.is_empty() {
        anyhow::bail!("no commission rows found in {}", path.display());
    }
    Ok(import.schedule)
}

/// Runs the batch with the configured classifier, or without one.
async fn price_with<C: CategoryCache>(
    config: &AppConfig,
    run: &PricingRun,
    products: &[Product],
    cache: &C,
) -> anyhow::Result<BatchReport> {
    match OpenAiClassifier::from_config(config)? {
        Some(classifier) => {
            let classifier = classifier.with_marketplace(run.retailer.display_name());
            Ok(run_batch(run, products, cache, &classifier).await)
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set; every product gets the fallback category");
            Ok(run_batch(run, products, cache, &NoClassifier).await)
        }
    }
}

fn build_run(
    retailer: Box<dyn RetailerProfile>,
    file: PricingFile,
    concurrency: usize,
) -> PricingRun {
    PricingRun::new(retailer, file.parameters).with_max_concurrent(concurrency)
}

pub(crate) async fn run(config: &AppConfig, args: PriceArgs) -> anyhow::Result<()> {
    let file = resolve_pricing(config, &args)?;
    let retailer = retailer_from_id(&args.retailer, &file.retailers)?;
    let concurrency = args
        .concurrency
        .unwrap_or(config.classifier_max_concurrent)
        .max(1);

    let report = if let Some(catalog_path) = &args.catalog {
        let units = crate::catalog::catalog_units(config, &args.dim_unit, &args.weight_unit)?;
        let import = crate::catalog::load_catalog_file(catalog_path, args.delimiter, units)?;
        let mut run = build_run(retailer, file, concurrency);
        if let Some(path) = &args.commissions {
            run = run.with_schedule(read_schedule_file(path, args.delimiter)?);
        }
        price_with(config, &run, &import.products, &MemoryCategoryCache::new()).await?
    } else {
        let pool = rrp_db::connect_pool_from_config(config).await?;
        let products: Vec<Product> = rrp_db::list_products(&pool)
            .await?
            .into_iter()
            .map(Product::from)
            .collect();
        if products.is_empty() {
            anyhow::bail!("no products stored; run `catalog import` or pass --catalog");
        }
        let (schedule, origin) =
            crate::commissions::effective_schedule(&pool, retailer.as_ref()).await?;
        tracing::info!(retailer = retailer.id(), origin, "commission schedule selected");
        let run = build_run(retailer, file, concurrency).with_schedule(schedule);
        let cache = rrp_db::PgCategoryCache::new(pool);
        price_with(config, &run, &products, &cache).await?
    };

    match &args.out {
        Some(path) => {
            let out = File::create(path)
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", path.display()))?;
            write_results(out, &report.rows)?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_results(&mut lock, &report.rows)?;
            lock.flush()?;
        }
    }

    print_summary(&report);
    Ok(())
}

/// Summary goes to stderr so stdout stays a clean CSV.
fn print_summary(report: &BatchReport) {
    let s = &report.summary;
    eprintln!(
        "run {} ({}): {} product(s), {} priced, {} unpriced, {} margin unreachable, {} fallback categories",
        report.run_id,
        report.retailer,
        s.total,
        s.priced,
        s.unpriced,
        s.margin_unreachable,
        s.fallback_categories
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: PriceArgs,
    }

    fn args(extra: &[&str]) -> PriceArgs {
        let mut argv = vec!["price", "--retailer", "sportmaster"];
        argv.extend_from_slice(extra);
        Harness::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut file = PricingFile::default();
        apply_overrides(
            &mut file,
            &args(&["--margin", "25", "--marketing", "8", "--tax-regime", "osno", "--promo"]),
        )
        .unwrap();

        assert!((file.parameters.target_margin_pct - 25.0).abs() < f64::EPSILON);
        assert!((file.parameters.marketing_pct - 8.0).abs() < f64::EPSILON);
        assert!((file.parameters.acquiring_pct - 1.5).abs() < f64::EPSILON);
        assert_eq!(file.parameters.tax_regime, TaxRegime::Osno);
        assert!(file.retailers.sportmaster.promo);
    }

    #[test]
    fn unknown_tax_regime_degrades_to_untaxed() {
        let mut file = PricingFile::default();
        file.parameters.tax_regime = TaxRegime::Osno;
        apply_overrides(&mut file, &args(&["--tax-regime", "patent"])).unwrap();
        assert_eq!(file.parameters.tax_regime, TaxRegime::Untaxed);
        assert!(validate_parameters(&file.parameters).is_ok());
    }

    #[test]
    fn zone_override_reaches_retailer_options() {
        let mut file = PricingFile::default();
        apply_overrides(&mut file, &args(&["--zone", "spb-lo"])).unwrap();
        assert_eq!(file.retailers.lemanpro.zone.as_deref(), Some("spb-lo"));
    }

    #[test]
    fn out_of_range_override_fails_validation() {
        let mut file = PricingFile::default();
        apply_overrides(&mut file, &args(&["--margin", "120"])).unwrap();
        assert!(validate_parameters(&file.parameters).is_err());
    }
}
