//! One pricing run over a catalog for a single retailer.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use rrp_core::{CategoryCache, CategoryClassifier, PricingParameters, Product};
use uuid::Uuid;

use crate::commission::CommissionSchedule;
use crate::resolver::{resolve_category, CategorySource};
use crate::retailers::RetailerProfile;
use crate::solver::{solve, Feasibility, SolverInput};
use crate::tax::compute_tax;

/// Everything a batch needs, passed explicitly; there is no ambient state.
pub struct PricingRun {
    pub retailer: Box<dyn RetailerProfile>,
    pub schedule: CommissionSchedule,
    pub params: PricingParameters,
    /// Products resolved concurrently. Output order is always catalog order.
    pub max_concurrent: usize,
}

impl PricingRun {
    /// A run using the retailer's builtin schedule.
    #[must_use]
    pub fn new(retailer: Box<dyn RetailerProfile>, params: PricingParameters) -> Self {
        let schedule = retailer.builtin_schedule();
        Self {
            retailer,
            schedule,
            params,
            max_concurrent: 1,
        }
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: CommissionSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Percentage deductions for a given commission.
    #[must_use]
    pub fn k_percent(&self, commission_pct: f64) -> f64 {
        let early_payout = if self.retailer.supports_early_payout() {
            self.params.early_payout_pct
        } else {
            0.0
        };
        commission_pct
            + self.params.marketing_pct
            + self.params.acquiring_pct
            + early_payout
            + self.retailer.extra_fee_pct()
    }
}

/// One output row. Money and percentages carry full precision; rounding
/// happens at export.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub sku: String,
    pub name: String,
    pub weight_kg: f64,
    pub size_bucket: String,
    pub volume_m3: f64,
    pub category: String,
    /// `None` for unpriced rows, which skip classification.
    pub category_source: Option<CategorySource>,
    pub commission_pct: f64,
    pub k_percent: f64,
    pub logistics_tariff: f64,
    pub logistics_total: f64,
    pub cost: f64,
    pub rrp: f64,
    pub profit_before_tax: f64,
    pub margin_before_tax_pct: f64,
    pub tax: f64,
    pub profit_after_tax: f64,
    pub margin_after_tax_pct: f64,
    pub status: Feasibility,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub priced: usize,
    pub unpriced: usize,
    pub margin_unreachable: usize,
    /// Rows whose category came from the fallback policy.
    pub fallback_categories: usize,
}

impl BatchSummary {
    fn from_rows(rows: &[PricingResult]) -> Self {
        let mut summary = Self {
            total: rows.len(),
            ..Self::default()
        };
        for row in rows {
            match row.status {
                Feasibility::Feasible => summary.priced += 1,
                Feasibility::Unpriced => summary.unpriced += 1,
                Feasibility::MarginUnreachable => summary.margin_unreachable += 1,
            }
            if row.category_source == Some(CategorySource::Fallback) {
                summary.fallback_categories += 1;
            }
        }
        summary
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub retailer: String,
    pub started_at: DateTime<Utc>,
    pub rows: Vec<PricingResult>,
    pub summary: BatchSummary,
}

/// Price every product. Yields exactly one row per product, in input order.
pub async fn run_batch<C, K>(
    run: &PricingRun,
    products: &[Product],
    cache: &C,
    classifier: &K,
) -> BatchReport
where
    C: CategoryCache,
    K: CategoryClassifier,
{
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let retailer = run.retailer.id();

    tracing::info!(
        %run_id,
        retailer,
        products = products.len(),
        schedule_entries = run.schedule.len(),
        classifier = classifier.is_configured(),
        "pricing run started"
    );

    let candidates = run.schedule.categories();
    let rows: Vec<PricingResult> = stream::iter(products)
        .map(|product| price_product(run, product, &candidates, cache, classifier))
        .buffered(run.max_concurrent.max(1))
        .collect()
        .await;

    let summary = BatchSummary::from_rows(&rows);

    tracing::info!(
        %run_id,
        retailer,
        priced = summary.priced,
        unpriced = summary.unpriced,
        margin_unreachable = summary.margin_unreachable,
        fallback_categories = summary.fallback_categories,
        "pricing run completed"
    );

    BatchReport {
        run_id,
        retailer: retailer.to_string(),
        started_at,
        rows,
        summary,
    }
}

/// Size → category → commission → solver → tax for a single product.
pub async fn price_product<C, K>(
    run: &PricingRun,
    product: &Product,
    candidates: &[String],
    cache: &C,
    classifier: &K,
) -> PricingResult
where
    C: CategoryCache,
    K: CategoryClassifier,
{
    let size = run.retailer.classify_size(&product.dimensions);

    let mut row = PricingResult {
        sku: product.sku.clone(),
        name: product.name.clone(),
        weight_kg: product.dimensions.weight_kg,
        size_bucket: size.bucket,
        volume_m3: size.volume_m3,
        category: String::new(),
        category_source: None,
        commission_pct: 0.0,
        k_percent: 0.0,
        logistics_tariff: 0.0,
        logistics_total: 0.0,
        cost: product.cost.max(0.0),
        rrp: 0.0,
        profit_before_tax: 0.0,
        margin_before_tax_pct: 0.0,
        tax: 0.0,
        profit_after_tax: 0.0,
        margin_after_tax_pct: 0.0,
        status: Feasibility::Unpriced,
    };

    if !product.is_priced() {
        tracing::debug!(sku = %product.sku, "no cost; skipping pricing");
        return row;
    }

    let (category, source, commission_pct) = match run.retailer.commission_override() {
        Some(fixed) => (fixed.category, CategorySource::Fixed, fixed.pct),
        None => {
            let resolution = resolve_category(
                cache,
                classifier,
                &product.name,
                candidates,
                run.retailer.id(),
            )
            .await;
            let pct = run
                .retailer
                .lookup_commission(&resolution.category, &run.schedule);
            (resolution.category, resolution.source, pct)
        }
    };

    let logistics_total = size.logistics_cost + run.params.extra_logistics;
    let k_percent = run.k_percent(commission_pct);
    let input = SolverInput {
        cost: product.cost,
        logistics_total,
        extra_flat_costs: run.params.extra_flat_costs,
        k_percent,
        target_margin_pct: run.params.target_margin_pct,
    };
    let solution = solve(&input);

    row.category = category;
    row.category_source = Some(source);
    row.commission_pct = commission_pct;
    row.k_percent = k_percent;
    row.logistics_tariff = size.logistics_cost;
    row.logistics_total = logistics_total;
    row.status = solution.feasibility;

    if solution.feasibility == Feasibility::Feasible {
        let tax = compute_tax(
            solution.rrp,
            solution.cost_total(&input),
            run.params.tax_regime,
        );
        row.rrp = solution.rrp;
        row.profit_before_tax = solution.profit_before_tax;
        row.margin_before_tax_pct = solution.margin_before_tax_pct;
        row.tax = tax.tax;
        row.profit_after_tax = tax.profit_after_tax;
        row.margin_after_tax_pct = tax.margin_after_tax_pct;
    } else {
        tracing::debug!(sku = %product.sku, k_percent, "target margin unreachable");
    }

    row
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
