//! Solve for the sale price that leaves the target margin after all
//! percentage-of-revenue deductions.
//!
//! `RRP × (1 − k/100 − m/100) = cost + logistics + extra`
//!
//! A non-positive denominator means deductions plus margin reach 100% of
//! revenue; no finite price works and the solver reports `rrp == 0`.

/// Why a price was or was not produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    Feasible,
    /// Cost is missing or zero.
    Unpriced,
    /// Deductions plus target margin are at or above 100%.
    MarginUnreachable,
}

impl Feasibility {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Feasibility::Feasible => "priced",
            Feasibility::Unpriced => "unpriced",
            Feasibility::MarginUnreachable => "margin_unreachable",
        }
    }
}

impl std::fmt::Display for Feasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverInput {
    pub cost: f64,
    pub logistics_total: f64,
    pub extra_flat_costs: f64,
    /// Sum of percentage deductions, in percentage points.
    pub k_percent: f64,
    pub target_margin_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub rrp: f64,
    pub percent_costs: f64,
    pub profit_before_tax: f64,
    pub margin_before_tax_pct: f64,
    pub feasibility: Feasibility,
}

impl Solution {
    fn zero(feasibility: Feasibility) -> Self {
        Self {
            rrp: 0.0,
            percent_costs: 0.0,
            profit_before_tax: 0.0,
            margin_before_tax_pct: 0.0,
            feasibility,
        }
    }

    /// Full pre-tax cost base: everything the sale has to pay for.
    #[must_use]
    pub fn cost_total(&self, input: &SolverInput) -> f64 {
        if self.rrp > 0.0 {
            input.cost + input.logistics_total + input.extra_flat_costs + self.percent_costs
        } else {
            0.0
        }
    }
}

#[must_use]
pub fn denominator(k_percent: f64, target_margin_pct: f64) -> f64 {
    1.0 - (k_percent / 100.0) - (target_margin_pct / 100.0)
}

#[must_use]
pub fn solve(input: &SolverInput) -> Solution {
    if input.cost <= 0.0 {
        return Solution::zero(Feasibility::Unpriced);
    }

    let denom = denominator(input.k_percent, input.target_margin_pct);
    if denom <= 0.0 {
        return Solution::zero(Feasibility::MarginUnreachable);
    }

    let rrp = (input.cost + input.logistics_total + input.extra_flat_costs) / denom;
    let percent_costs = rrp * (input.k_percent / 100.0);
    let profit_before_tax =
        rrp - input.cost - input.logistics_total - input.extra_flat_costs - percent_costs;
    let margin_before_tax_pct = profit_before_tax / rrp * 100.0;

    Solution {
        rrp,
        percent_costs,
        profit_before_tax,
        margin_before_tax_pct,
        feasibility: Feasibility::Feasible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(cost: f64, logistics: f64, extra: f64, k: f64, m: f64) -> SolverInput {
        SolverInput {
            cost,
            logistics_total: logistics,
            extra_flat_costs: extra,
            k_percent: k,
            target_margin_pct: m,
        }
    }

    #[test]
    fn standard_case() {
        // commission 20 + marketing 8 + acquiring 1.5 + retailer fee 6
        let solution = solve(&input(1000.0, 200.0, 0.0, 35.5, 20.0));
        assert_eq!(solution.feasibility, Feasibility::Feasible);
        assert!((solution.rrp - 2696.63).abs() < 0.01, "rrp = {}", solution.rrp);
        assert!((solution.margin_before_tax_pct - 20.0).abs() < 1e-9);
        assert!((solution.percent_costs - solution.rrp * 0.355).abs() < 1e-9);
    }

    #[test]
    fn infeasible_margin_is_zero() {
        let solution = solve(&input(1000.0, 200.0, 0.0, 50.0, 55.0));
        assert_eq!(solution.feasibility, Feasibility::MarginUnreachable);
        assert!(solution.rrp.abs() < f64::EPSILON);
        assert!(solution.profit_before_tax.abs() < f64::EPSILON);
        assert!(solution.margin_before_tax_pct.abs() < f64::EPSILON);
    }

    #[test]
    fn exactly_one_hundred_percent_is_infeasible() {
        let solution = solve(&input(1000.0, 0.0, 0.0, 80.0, 20.0));
        assert_eq!(solution.feasibility, Feasibility::MarginUnreachable);
        assert!(solution.rrp.abs() < f64::EPSILON);
    }

    #[test]
    fn zero_cost_is_unpriced() {
        let solution = solve(&input(0.0, 200.0, 0.0, 10.0, 20.0));
        assert_eq!(solution.feasibility, Feasibility::Unpriced);
        assert!(solution.rrp.abs() < f64::EPSILON);
        assert!(solution.cost_total(&input(0.0, 200.0, 0.0, 10.0, 20.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn cost_total_includes_percent_costs() {
        let i = input(1000.0, 200.0, 50.0, 10.0, 20.0);
        let solution = solve(&i);
        let expected = 1250.0 + solution.rrp * 0.10;
        assert!((solution.cost_total(&i) - expected).abs() < 1e-9);
        assert!((solution.rrp - solution.cost_total(&i) - solution.profit_before_tax).abs() < 1e-9);
    }

    #[test]
    fn feasibility_labels() {
        assert_eq!(Feasibility::Feasible.to_string(), "priced");
        assert_eq!(Feasibility::Unpriced.to_string(), "unpriced");
        assert_eq!(Feasibility::MarginUnreachable.to_string(), "margin_unreachable");
    }

    proptest! {
        #[test]
        fn realized_margin_equals_target(
            cost in 0.01f64..1.0e6,
            logistics in 0.0f64..1.0e4,
            extra in 0.0f64..1.0e4,
            k in 0.0f64..60.0,
            m in 0.0f64..39.0,
        ) {
            let solution = solve(&input(cost, logistics, extra, k, m));
            prop_assert_eq!(solution.feasibility, Feasibility::Feasible);
            let lhs = solution.rrp * (1.0 - k / 100.0) - cost - logistics - extra;
            let rhs = solution.rrp * m / 100.0;
            prop_assert!((lhs - rhs).abs() <= 1e-9 * solution.rrp.max(1.0));
        }

        #[test]
        fn unreachable_margin_is_always_zero(
            cost in 0.01f64..1.0e9,
            logistics in 0.0f64..1.0e6,
            k in 0.0f64..100.0,
            extra_margin in 0.001f64..50.0,
        ) {
            let m = 100.0 - k + extra_margin;
            let solution = solve(&input(cost, logistics, 0.0, k, m));
            prop_assert!(solution.rrp.abs() < f64::EPSILON);
        }
    }
}
