use crate::commission::CommissionSchedule;
use crate::size::{SizeRule, Tariff, VolumetricBucket};

use super::RetailerProfile;

/// M.Video FBS. Commissions come only from the published document, so the
/// builtin schedule is empty and unmatched categories pay nothing.
#[derive(Debug, Clone)]
pub struct MVideo {
    rule: SizeRule,
}

impl MVideo {
    #[must_use]
    pub fn new() -> Self {
        let rule = SizeRule::Volumetric {
            buckets: vec![
                VolumetricBucket::new("S", 1.0, 27.0),
                VolumetricBucket::new("M", 5.0, 54.0),
                VolumetricBucket::new("L", 25.0, 160.0),
            ],
            overflow: "XL".to_string(),
            tariffs: vec![
                ("S".to_string(), Tariff::Fee(109.0)),
                ("M".to_string(), Tariff::Fee(149.0)),
                ("L".to_string(), Tariff::Fee(259.0)),
                // XL ships at the L rate.
                ("XL".to_string(), Tariff::SameAs("L".to_string())),
            ],
        };
        Self { rule }
    }
}

impl Default for MVideo {
    fn default() -> Self {
        Self::new()
    }
}

impl RetailerProfile for MVideo {
    fn id(&self) -> &'static str {
        "mvideo"
    }

    fn display_name(&self) -> &'static str {
        "М.Видео (FBS)"
    }

    fn size_rule(&self) -> &SizeRule {
        &self.rule
    }

    fn default_commission_pct(&self) -> f64 {
        0.0
    }

    fn builtin_schedule(&self) -> CommissionSchedule {
        CommissionSchedule::new()
    }
}
