use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tax regime applied to a sale.
///
/// Parsing is lenient: unknown strings become [`TaxRegime::Untaxed`] with a
/// warning, so a typo in configuration never aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaxRegime {
    /// General regime, 25% of profit.
    Osno,
    /// Simplified, 6% of revenue.
    UsnIncome6,
    /// Simplified income-minus-expenses, 15% of profit.
    UsnProfit15,
    /// Automated simplified, 8% of revenue.
    Ausn8,
    UsnVat5,
    UsnVat7,
    UsnVat5Composite,
    UsnVat7Composite,
    Untaxed,
}

impl TaxRegime {
    pub const ALL: [TaxRegime; 9] = [
        TaxRegime::Osno,
        TaxRegime::UsnIncome6,
        TaxRegime::UsnProfit15,
        TaxRegime::Ausn8,
        TaxRegime::UsnVat5,
        TaxRegime::UsnVat7,
        TaxRegime::UsnVat5Composite,
        TaxRegime::UsnVat7Composite,
        TaxRegime::Untaxed,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            TaxRegime::Osno => "osno",
            TaxRegime::UsnIncome6 => "usn-6",
            TaxRegime::UsnProfit15 => "usn-15",
            TaxRegime::Ausn8 => "ausn-8",
            TaxRegime::UsnVat5 => "usn-vat-5",
            TaxRegime::UsnVat7 => "usn-vat-7",
            TaxRegime::UsnVat5Composite => "usn-vat-5-composite",
            TaxRegime::UsnVat7Composite => "usn-vat-7-composite",
            TaxRegime::Untaxed => "none",
        }
    }

    /// Russian label, also accepted when parsing.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TaxRegime::Osno => "ОСНО (25% от прибыли)",
            TaxRegime::UsnIncome6 => "УСН Доходы (6%)",
            TaxRegime::UsnProfit15 => "УСН Доходы-Расходы (15%)",
            TaxRegime::Ausn8 => "АУСН (8% от дохода)",
            TaxRegime::UsnVat5 => "УСН с НДС 5%",
            TaxRegime::UsnVat7 => "УСН с НДС 7%",
            TaxRegime::UsnVat5Composite => "УСН с НДС 5% (11% суммарно)",
            TaxRegime::UsnVat7Composite => "УСН с НДС 7% (13% суммарно)",
            TaxRegime::Untaxed => "Без налога",
        }
    }

    /// Strict lookup by id or legacy label.
    #[must_use]
    pub fn from_id(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL.into_iter().find(|regime| {
            regime.id().eq_ignore_ascii_case(trimmed) || regime.label() == trimmed
        })
    }

    /// Lenient lookup: unknown values fall back to [`TaxRegime::Untaxed`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if let Some(regime) = Self::from_id(s) {
            return regime;
        }
        tracing::warn!(regime = %s, "unknown tax regime; no tax will be applied");
        TaxRegime::Untaxed
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl From<String> for TaxRegime {
    fn from(s: String) -> Self {
        TaxRegime::parse(&s)
    }
}

impl From<TaxRegime> for String {
    fn from(regime: TaxRegime) -> Self {
        regime.id().to_string()
    }
}

/// Per-run pricing inputs, applied uniformly to every product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingParameters {
    pub target_margin_pct: f64,
    pub acquiring_pct: f64,
    pub marketing_pct: f64,
    pub early_payout_pct: f64,
    /// Flat money added to every product's cost base.
    pub extra_flat_costs: f64,
    /// Flat money added on top of the retailer's logistics tariff.
    pub extra_logistics: f64,
    pub tax_regime: TaxRegime,
}

impl Default for PricingParameters {
    fn default() -> Self {
        Self {
            target_margin_pct: 20.0,
            acquiring_pct: 1.5,
            marketing_pct: 0.0,
            early_payout_pct: 0.0,
            extra_flat_costs: 0.0,
            extra_logistics: 0.0,
            tax_regime: TaxRegime::UsnIncome6,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemanProOptions {
    /// Delivery zone id; `None` selects the default zone.
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SportmasterOptions {
    /// Promo period: one flat commission for every product.
    pub promo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetailerOptions {
    pub lemanpro: LemanProOptions,
    pub sportmaster: SportmasterOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingFile {
    #[serde(flatten)]
    pub parameters: PricingParameters,
    pub retailers: RetailerOptions,
}

/// Load and validate pricing parameters from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_pricing_file(path: &Path) -> Result<PricingFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PricingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let pricing_file: PricingFile =
        serde_yaml::from_str(&content).map_err(ConfigError::PricingFileParse)?;

    validate_parameters(&pricing_file.parameters)?;

    Ok(pricing_file)
}

/// Reject parameter sets that cannot describe a sensible run.
///
/// # Errors
///
/// Returns `ConfigError::Validation` naming the first offending field.
pub fn validate_parameters(params: &PricingParameters) -> Result<(), ConfigError> {
    let percentages = [
        ("acquiring_pct", params.acquiring_pct),
        ("marketing_pct", params.marketing_pct),
        ("early_payout_pct", params.early_payout_pct),
    ];
    for (field, value) in percentages {
        if !value.is_finite() || !(0.0..100.0).contains(&value) {
            return Err(ConfigError::Validation(format!(
                "{field} must be in [0, 100), got {value}"
            )));
        }
    }

    if !params.target_margin_pct.is_finite() || !(0.0..=99.0).contains(&params.target_margin_pct)
    {
        return Err(ConfigError::Validation(format!(
            "target_margin_pct must be in [0, 99], got {}",
            params.target_margin_pct
        )));
    }

    let money = [
        ("extra_flat_costs", params.extra_flat_costs),
        ("extra_logistics", params.extra_logistics),
    ];
    for (field, value) in money {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{field} must be a non-negative amount, got {value}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_ids_and_labels_parse() {
        for regime in TaxRegime::ALL {
            assert_eq!(TaxRegime::from_id(regime.id()), Some(regime));
            assert_eq!(TaxRegime::from_id(regime.label()), Some(regime));
        }
        assert_eq!(TaxRegime::parse("USN-6"), TaxRegime::UsnIncome6);
    }

    #[test]
    fn unknown_regime_is_untaxed() {
        assert_eq!(TaxRegime::from_id("patent"), None);
        assert_eq!(TaxRegime::parse("patent"), TaxRegime::Untaxed);
    }

    #[test]
    fn defaults_match_usual_run() {
        let params = PricingParameters::default();
        assert!((params.target_margin_pct - 20.0).abs() < f64::EPSILON);
        assert!((params.acquiring_pct - 1.5).abs() < f64::EPSILON);
        assert_eq!(params.tax_regime, TaxRegime::UsnIncome6);
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn pricing_file_parses_with_partial_fields() {
        let yaml = r"
target_margin_pct: 25
tax_regime: osno
retailers:
  lemanpro:
    zone: spb-lo
  sportmaster:
    promo: true
";
        let file: PricingFile = serde_yaml::from_str(yaml).unwrap();
        assert!((file.parameters.target_margin_pct - 25.0).abs() < f64::EPSILON);
        assert!((file.parameters.acquiring_pct - 1.5).abs() < f64::EPSILON);
        assert_eq!(file.parameters.tax_regime, TaxRegime::Osno);
        assert_eq!(file.retailers.lemanpro.zone.as_deref(), Some("spb-lo"));
        assert!(file.retailers.sportmaster.promo);
    }

    #[test]
    fn pricing_file_accepts_unknown_regime_leniently() {
        let file: PricingFile = serde_yaml::from_str("tax_regime: barter\n").unwrap();
        assert_eq!(file.parameters.tax_regime, TaxRegime::Untaxed);
    }

    #[test]
    fn pricing_file_accepts_legacy_label() {
        let file: PricingFile =
            serde_yaml::from_str("tax_regime: \"УСН Доходы-Расходы (15%)\"\n").unwrap();
        assert_eq!(file.parameters.tax_regime, TaxRegime::UsnProfit15);
    }

    #[test]
    fn validate_rejects_margin_above_99() {
        let params = PricingParameters {
            target_margin_pct: 99.5,
            ..PricingParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert!(err.to_string().contains("target_margin_pct"));
    }

    #[test]
    fn validate_rejects_negative_percentage() {
        let params = PricingParameters {
            marketing_pct: -1.0,
            ..PricingParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert!(err.to_string().contains("marketing_pct"));
    }

    #[test]
    fn validate_rejects_negative_money() {
        let params = PricingParameters {
            extra_logistics: -10.0,
            ..PricingParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert!(err.to_string().contains("extra_logistics"));
    }

    #[test]
    fn load_pricing_file_reports_missing_file() {
        let err = load_pricing_file(Path::new("/nonexistent/pricing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::PricingFileIo { .. }));
    }

    #[test]
    fn load_pricing_file_reads_and_validates() {
        let dir = std::env::temp_dir().join(format!("rrp-core-pricing-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pricing.yaml");
        std::fs::write(&path, "target_margin_pct: 150\n").unwrap();
        let err = load_pricing_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        std::fs::write(&path, "target_margin_pct: 30\nmarketing_pct: 2\n").unwrap();
        let file = load_pricing_file(&path).unwrap();
        assert!((file.parameters.marketing_pct - 2.0).abs() < f64::EPSILON);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn shipped_pricing_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/pricing.yaml");
        let file = load_pricing_file(&path).unwrap();
        assert_eq!(file.parameters, PricingParameters::default());
        assert_eq!(file.retailers.lemanpro.zone.as_deref(), Some("region"));
        assert!(!file.retailers.sportmaster.promo);
    }
}
