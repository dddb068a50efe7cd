use crate::commission::CommissionSchedule;
use crate::size::SizeRule;

use super::RetailerProfile;

/// Last-mile delivery zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    InsideZone,
    SpbLo,
    #[default]
    Region,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::InsideZone, Zone::SpbLo, Zone::Region];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Zone::InsideZone => "inside-zone",
            Zone::SpbLo => "spb-lo",
            Zone::Region => "region",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Zone::InsideZone => "Внутри зоны",
            Zone::SpbLo => "СПБ и ЛО",
            Zone::Region => "Регион",
        }
    }

    /// Accepts the id or the Russian label.
    #[must_use]
    pub fn from_id(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|z| z.id().eq_ignore_ascii_case(s) || z.label() == s)
    }

    fn breakpoints(self) -> Vec<(f64, f64)> {
        const WEIGHTS: [f64; 11] = [
            1.0, 3.0, 5.0, 10.0, 15.0, 20.0, 30.0, 50.0, 80.0, 100.0, 120.0,
        ];
        let fees: [f64; 11] = match self {
            Zone::InsideZone => [
                143.0, 150.0, 157.0, 201.0, 218.0, 253.0, 311.0, 524.0, 593.0, 615.0, 682.0,
            ],
            Zone::SpbLo => [
                139.0, 154.0, 172.0, 216.0, 253.0, 288.0, 343.0, 442.0, 558.0, 660.0, 762.0,
            ],
            Zone::Region => [
                142.0, 177.0, 206.0, 239.0, 276.0, 306.0, 368.0, 552.0, 888.0, 1101.0, 1257.0,
            ],
        };
        WEIGHTS.into_iter().zip(fees).collect()
    }
}

const COMMISSIONS: [(&str, f64); 7] = [
    ("Блоки, кирпич, бетон (6%)", 6.0),
    ("Арматура / крепёжные элементы (6%)", 6.0),
    ("Сухие смеси / цемент (6%)", 6.0),
    ("Кровельные покрытия (9%)", 9.0),
    ("Теплоизоляция (10%)", 10.0),
    ("Гидроизоляция / пароизоляция (10%)", 10.0),
    ("Сэндвич-панели (10%)", 10.0),
];

/// Lemana Pro FBS: last-mile tariff by zone and weight. Early payout is not
/// offered, so it never enters the deductions.
#[derive(Debug, Clone)]
pub struct LemanPro {
    zone: Zone,
    rule: SizeRule,
}

impl LemanPro {
    #[must_use]
    pub fn new(zone: Zone) -> Self {
        let rule = SizeRule::ZoneTable {
            zone: zone.id().to_string(),
            breakpoints: zone.breakpoints(),
        };
        Self { zone, rule }
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }
}

impl RetailerProfile for LemanPro {
    fn id(&self) -> &'static str {
        "lemanpro"
    }

    fn display_name(&self) -> &'static str {
        "Лемана Про (FBS)"
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

    fn supports_early_payout(&self) -> bool {
        false
    }
}
