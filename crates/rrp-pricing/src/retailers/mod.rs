//! Retailer profiles: everything that varies between marketplaces.
//!
//! The solver and tax calculator never look at the retailer; they only see
//! the numbers a profile produces.

mod citilink;
mod lemanpro;
mod mvideo;
mod sportmaster;

pub use citilink::Citilink;
pub use lemanpro::{LemanPro, Zone};
pub use mvideo::MVideo;
pub use sportmaster::Sportmaster;

use rrp_core::{Dimensions, RetailerOptions};

use crate::commission::{self, CommissionSchedule};
use crate::error::PricingError;
use crate::size::{self, SizeClass, SizeRule};

pub const RETAILER_IDS: [&str; 4] = ["mvideo", "lemanpro", "sportmaster", "citilink"];

/// A fixed commission applied to every product, bypassing classification.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionOverride {
    pub category: String,
    pub pct: f64,
}

pub trait RetailerProfile: Send + Sync {
    fn id(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    fn size_rule(&self) -> &SizeRule;

    fn classify_size(&self, dims: &Dimensions) -> SizeClass {
        size::classify(self.size_rule(), dims)
    }

    /// Rate used when a category is absent from the schedule.
    fn default_commission_pct(&self) -> f64;

    /// Schedule shipped with the tool. May be empty when the schedule only
    /// comes from an external source.
    fn builtin_schedule(&self) -> CommissionSchedule;

    fn lookup_commission(&self, category: &str, schedule: &CommissionSchedule) -> f64 {
        commission::lookup(category, schedule, self.default_commission_pct())
    }

    /// Retailer-specific percentage fee on top of the commission.
    fn extra_fee_pct(&self) -> f64 {
        0.0
    }

    fn supports_early_payout(&self) -> bool {
        true
    }

    fn commission_override(&self) -> Option<CommissionOverride> {
        None
    }
}

/// Build the profile for `id`, applying per-retailer options.
///
/// # Errors
///
/// Returns `PricingError::UnknownRetailer` for ids outside [`RETAILER_IDS`],
/// or `PricingError::UnknownZone` for an unrecognised delivery zone.
pub fn retailer_from_id(
    id: &str,
    options: &RetailerOptions,
) -> Result<Box<dyn RetailerProfile>, PricingError> {
    match id.trim().to_lowercase().as_str() {
        "mvideo" => Ok(Box::new(MVideo::new())),
        "lemanpro" => {
            let zone = match options.lemanpro.zone.as_deref() {
                Some(raw) => Zone::from_id(raw).ok_or_else(|| PricingError::UnknownZone {
                    zone: raw.to_string(),
                    retailer: "lemanpro".to_string(),
                })?,
                None => Zone::default(),
            };
            Ok(Box::new(LemanPro::new(zone)))
        }
        "sportmaster" => Ok(Box::new(Sportmaster::new(options.sportmaster.promo))),
        "citilink" => Ok(Box::new(Citilink::new())),
        other => Err(PricingError::UnknownRetailer(other.to_string())),
    }
}
