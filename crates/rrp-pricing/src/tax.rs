use rrp_core::TaxRegime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxBase {
    Revenue,
    /// Profit before tax, floored at zero.
    Profit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRule {
    pub base: TaxBase,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxOutcome {
    pub tax: f64,
    pub profit_before_tax: f64,
    pub profit_after_tax: f64,
    pub margin_after_tax_pct: f64,
}

/// Rule table. `None` means the sale is not taxed.
#[must_use]
pub fn rule_for(regime: TaxRegime) -> Option<TaxRule> {
    let (base, rate) = match regime {
        TaxRegime::Osno => (TaxBase::Profit, 0.25),
        TaxRegime::UsnIncome6 => (TaxBase::Revenue, 0.06),
        TaxRegime::UsnProfit15 => (TaxBase::Profit, 0.15),
        TaxRegime::Ausn8 => (TaxBase::Revenue, 0.08),
        TaxRegime::UsnVat5 => (TaxBase::Revenue, 0.05),
        TaxRegime::UsnVat7 => (TaxBase::Revenue, 0.07),
        TaxRegime::UsnVat5Composite => (TaxBase::Revenue, 0.11),
        TaxRegime::UsnVat7Composite => (TaxBase::Revenue, 0.13),
        TaxRegime::Untaxed => return None,
    };
    Some(TaxRule { base, rate })
}

/// Tax on one sale. `cost_total` is the full pre-tax cost base.
#[must_use]
pub fn compute_tax(revenue: f64, cost_total: f64, regime: TaxRegime) -> TaxOutcome {
    let profit_before_tax = revenue - cost_total;

    let tax = match rule_for(regime) {
        Some(TaxRule {
            base: TaxBase::Revenue,
            rate,
        }) => revenue * rate,
        Some(TaxRule {
            base: TaxBase::Profit,
            rate,
        }) => (profit_before_tax * rate).max(0.0),
        None => 0.0,
    };

    let profit_after_tax = profit_before_tax - tax;
    let margin_after_tax_pct = if revenue > 0.0 {
        profit_after_tax / revenue * 100.0
    } else {
        0.0
    };

    TaxOutcome {
        tax,
        profit_before_tax,
        profit_after_tax,
        margin_after_tax_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn revenue_based_six_percent() {
        let outcome = compute_tax(2696.63, 2326.0, TaxRegime::UsnIncome6);
        assert!((outcome.tax - 161.80).abs() < 0.005, "tax = {}", outcome.tax);
        assert!((outcome.profit_before_tax - 370.63).abs() < 1e-9);
        assert!((outcome.profit_after_tax - (370.63 - outcome.tax)).abs() < 1e-9);
    }

    #[test]
    fn profit_based_taxes_profit() {
        let outcome = compute_tax(1000.0, 600.0, TaxRegime::Osno);
        assert!((outcome.tax - 100.0).abs() < 1e-9);
        assert!((outcome.profit_after_tax - 300.0).abs() < 1e-9);
        assert!((outcome.margin_after_tax_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn composite_rates() {
        let five = compute_tax(100.0, 0.0, TaxRegime::UsnVat5Composite);
        assert!((five.tax - 11.0).abs() < 1e-9);
        let seven = compute_tax(100.0, 0.0, TaxRegime::UsnVat7Composite);
        assert!((seven.tax - 13.0).abs() < 1e-9);
    }

    #[test]
    fn untaxed_regime_is_zero() {
        let outcome = compute_tax(1000.0, 600.0, TaxRegime::Untaxed);
        assert!(outcome.tax.abs() < f64::EPSILON);
        assert!((outcome.profit_after_tax - 400.0).abs() < 1e-9);
    }

    #[test]
    fn zero_revenue_has_zero_margin() {
        let outcome = compute_tax(0.0, 0.0, TaxRegime::Osno);
        assert!(outcome.margin_after_tax_pct.abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn loss_is_never_taxed_under_profit_regimes(
            revenue in 1.0f64..1.0e6,
            loss in 0.01f64..1.0e6,
        ) {
            for regime in [TaxRegime::Osno, TaxRegime::UsnProfit15] {
                let outcome = compute_tax(revenue, revenue + loss, regime);
                prop_assert!(outcome.tax.abs() < f64::EPSILON);
                prop_assert!((outcome.profit_after_tax - outcome.profit_before_tax).abs() < 1e-9);
            }
        }
    }
}
