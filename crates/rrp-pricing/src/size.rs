//! Logistics size classification.
//!
//! A [`SizeRule`] is plain data describing one retailer's tariff shape;
//! [`classify`] turns physical attributes into a bucket label and a fee.

use rrp_core::Dimensions;

/// Result of classifying one product.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeClass {
    pub bucket: String,
    pub volume_m3: f64,
    pub logistics_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumetricBucket {
    pub label: String,
    pub max_weight_kg: f64,
    pub max_volume_dm3: f64,
    /// Optional cap on the longest side.
    pub max_side_cm: Option<f64>,
}

impl VolumetricBucket {
    #[must_use]
    pub fn new(label: &str, max_weight_kg: f64, max_volume_dm3: f64) -> Self {
        Self {
            label: label.to_string(),
            max_weight_kg,
            max_volume_dm3,
            max_side_cm: None,
        }
    }

    #[must_use]
    pub fn with_max_side(mut self, max_side_cm: f64) -> Self {
        self.max_side_cm = Some(max_side_cm);
        self
    }

    fn fits(&self, dims: &Dimensions) -> bool {
        dims.weight_kg <= self.max_weight_kg
            && dims.volume_dm3() <= self.max_volume_dm3
            && self
                .max_side_cm
                .is_none_or(|max| dims.longest_side_cm() <= max)
    }
}

/// Fee for a bucket label, either direct or borrowed from another label.
#[derive(Debug, Clone, PartialEq)]
pub enum Tariff {
    Fee(f64),
    SameAs(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SizeRule {
    /// Weight rounded up to whole kilograms; flat fee up to the allowance,
    /// then a per-kilogram increment.
    WeightLinear {
        free_allowance_kg: f64,
        base_fee: f64,
        per_kg_fee: f64,
    },
    /// First bucket whose limits all hold wins; otherwise `overflow`.
    Volumetric {
        buckets: Vec<VolumetricBucket>,
        overflow: String,
        tariffs: Vec<(String, Tariff)>,
    },
    /// Smallest breakpoint not below the weight; beyond the table the last
    /// breakpoint's fee applies.
    ZoneTable {
        zone: String,
        breakpoints: Vec<(f64, f64)>,
    },
    /// Flat fee with a surcharge strictly above a weight threshold.
    WeightSurcharge {
        base_fee: f64,
        heavy_threshold_kg: f64,
        surcharge: f64,
    },
}

impl SizeRule {
    /// Label of the cheapest bucket, used when dimensions are unknown.
    #[must_use]
    pub fn smallest_bucket(&self) -> String {
        match self {
            SizeRule::WeightLinear {
                free_allowance_kg, ..
            } => format!("<={free_allowance_kg}kg"),
            SizeRule::Volumetric {
                buckets, overflow, ..
            } => buckets
                .first()
                .map_or_else(|| overflow.clone(), |b| b.label.clone()),
            SizeRule::ZoneTable { zone, breakpoints } => breakpoints
                .iter()
                .map(|(bp, _)| *bp)
                .min_by(f64::total_cmp)
                .map_or_else(|| zone.clone(), |bp| format!("{zone} <={bp}kg")),
            SizeRule::WeightSurcharge { .. } => "standard".to_string(),
        }
    }
}

/// Classify a product's physical attributes under `rule`.
///
/// Unknown dimensions (any side `<= 0`) resolve to the smallest bucket at
/// zero cost.
#[must_use]
pub fn classify(rule: &SizeRule, dims: &Dimensions) -> SizeClass {
    if !dims.is_complete() {
        return SizeClass {
            bucket: rule.smallest_bucket(),
            volume_m3: 0.0,
            logistics_cost: 0.0,
        };
    }

    let volume_m3 = dims.volume_m3();
    let (bucket, logistics_cost) = match rule {
        SizeRule::WeightLinear {
            free_allowance_kg,
            base_fee,
            per_kg_fee,
        } => weight_linear(dims.weight_kg, *free_allowance_kg, *base_fee, *per_kg_fee),
        SizeRule::Volumetric {
            buckets,
            overflow,
            tariffs,
        } => {
            let label = buckets
                .iter()
                .find(|b| b.fits(dims))
                .map_or(overflow.as_str(), |b| b.label.as_str());
            (label.to_string(), tariff_for(tariffs, label))
        }
        SizeRule::ZoneTable { zone, breakpoints } => zone_fee(zone, breakpoints, dims.weight_kg),
        SizeRule::WeightSurcharge {
            base_fee,
            heavy_threshold_kg,
            surcharge,
        } => {
            if dims.weight_kg > *heavy_threshold_kg {
                ("heavy".to_string(), base_fee + surcharge)
            } else {
                ("standard".to_string(), *base_fee)
            }
        }
    };

    SizeClass {
        bucket,
        volume_m3,
        logistics_cost,
    }
}

fn weight_linear(weight_kg: f64, allowance: f64, base_fee: f64, per_kg_fee: f64) -> (String, f64) {
    let billed = weight_kg.max(0.0).ceil();
    if billed <= allowance {
        (format!("<={allowance}kg"), base_fee)
    } else {
        (format!("{billed}kg"), base_fee + (billed - allowance) * per_kg_fee)
    }
}

fn zone_fee(zone: &str, breakpoints: &[(f64, f64)], weight_kg: f64) -> (String, f64) {
    let within = breakpoints
        .iter()
        .filter(|(bp, _)| weight_kg <= *bp)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((bp, fee)) = within {
        return (format!("{zone} <={bp}kg"), *fee);
    }

    match breakpoints.iter().max_by(|a, b| a.0.total_cmp(&b.0)) {
        Some((bp, fee)) => (format!("{zone} >{bp}kg"), *fee),
        None => (zone.to_string(), 0.0),
    }
}

fn tariff_for(tariffs: &[(String, Tariff)], label: &str) -> f64 {
    let mut current = label;
    // Bounded walk so a cyclic alias table cannot loop forever.
    for _ in 0..=tariffs.len() {
        match tariffs.iter().find(|(l, _)| l == current).map(|(_, t)| t) {
            Some(Tariff::Fee(fee)) => return *fee,
            Some(Tariff::SameAs(other)) => current = other.as_str(),
            None => break,
        }
    }
    tracing::warn!(bucket = %label, "no tariff registered for size bucket");
    0.0
}
