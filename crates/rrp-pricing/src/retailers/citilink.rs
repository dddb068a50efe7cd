use crate::commission::CommissionSchedule;
use crate::size::SizeRule;

use super::RetailerProfile;

const COMMISSIONS: [(&str, f64); 6] = [
    ("Компьютеры и комплектующие (9%)", 9.0),
    ("Периферия и аксессуары (11%)", 11.0),
    ("Телевизоры и аудио (10%)", 10.0),
    ("Смартфоны и планшеты (8%)", 8.0),
    ("Бытовая техника (12%)", 12.0),
    ("Садовая техника (13%)", 13.0),
];

/// Citilink FBS: flat handling fee with a surcharge for parcels over 20 kg.
#[derive(Debug, Clone)]
pub struct Citilink {
    rule: SizeRule,
}

impl Citilink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rule: SizeRule::WeightSurcharge {
                base_fee: 120.0,
                heavy_threshold_kg: 20.0,
                surcharge: 40.0,
            },
        }
    }
}

impl Default for Citilink {
    fn default() -> Self {
        Self::new()
    }
}

impl RetailerProfile for Citilink {
    fn id(&self) -> &'static str {
        "citilink"
    }

    fn display_name(&self) -> &'static str {
        "Ситилинк (FBS)"
    }

    fn size_rule(&self) -> &SizeRule {
        &self.rule
    }

    fn default_commission_pct(&self) -> f64 {
        0.0
    }

    fn builtin_schedule(&self) -> CommissionSchedule {
        COMMISSIONS.into_iter().collect()
    }
}
