//! Totals computation: discount first, then tax on the discounted net.
//!
//! The order is fixed and must not change. Every view recomputes from the
//! current package, so there is no incremental accumulation anywhere.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::package::Package;

/// Legal VAT rates. The selector in the UI offers exactly these three, and
/// the template wire format carries the bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaxRate {
    Zero,
    Reduced,
    #[default]
    Standard,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid tax rate {0}% (allowed: 0, 7, 19)")]
pub struct InvalidTaxRate(pub u8);

impl TaxRate {
    pub const ALL: [TaxRate; 3] = [TaxRate::Zero, TaxRate::Reduced, TaxRate::Standard];

    pub fn percent(self) -> Decimal {
        Decimal::from(u8::from(self))
    }
}

impl From<TaxRate> for u8 {
    fn from(rate: TaxRate) -> Self {
        match rate {
            TaxRate::Zero => 0,
            TaxRate::Reduced => 7,
            TaxRate::Standard => 19,
        }
    }
}

impl TryFrom<u8> for TaxRate {
    type Error = InvalidTaxRate;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaxRate::Zero),
            7 => Ok(TaxRate::Reduced),
            19 => Ok(TaxRate::Standard),
            other => Err(InvalidTaxRate(other)),
        }
    }
}

/// Derived totals for one view of the package. Never stored, never mutated;
/// recomputed fresh via [`compute_totals`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingBreakdown {
    pub net_sum: Decimal,
    pub discount_pct: Decimal,
    pub discount_amount: Decimal,
    pub net_after_discount: Decimal,
    pub tax_pct: TaxRate,
    pub tax_amount: Decimal,
    pub gross_total: Decimal,
}

impl PricingBreakdown {
    /// Display view with every amount rounded to two decimal places,
    /// midpoint away from zero (37.5858 becomes 37.59).
    pub fn rounded(&self) -> PricingBreakdown {
        let round = |amount: Decimal| {
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        PricingBreakdown {
            net_sum: round(self.net_sum),
            discount_pct: self.discount_pct,
            discount_amount: round(self.discount_amount),
            net_after_discount: round(self.net_after_discount),
            tax_pct: self.tax_pct,
            tax_amount: round(self.tax_amount),
            gross_total: round(self.gross_total),
        }
    }
}

/// Pure totals function. Discount is clamped to [0, 100]; the tax rate is
/// constrained by construction.
pub fn compute_totals(package: &Package, discount_pct: Decimal, tax: TaxRate) -> PricingBreakdown {
    let discount_pct = discount_pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    let net_sum: Decimal = package.lines().iter().map(|line| line.line_net).sum();
    let discount_amount = net_sum * discount_pct / Decimal::ONE_HUNDRED;
    let net_after_discount = net_sum - discount_amount;
    let tax_amount = net_after_discount * tax.percent() / Decimal::ONE_HUNDRED;
    let gross_total = net_after_discount + tax_amount;

    PricingBreakdown {
        net_sum,
        discount_pct,
        discount_amount,
        net_after_discount,
        tax_pct: tax,
        tax_amount,
        gross_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::LineItem;
    use rust_decimal_macros::dec;

    fn sample_package() -> Package {
        Package::from_iter([
            LineItem::new("Regal".to_string(), 2, dec!(49.90)),
            LineItem::new("Tisch".to_string(), 1, dec!(120.00)),
        ])
    }

    #[test]
    fn zero_rates_leave_the_net_sum_untouched() {
        let package = sample_package();
        let totals = compute_totals(&package, Decimal::ZERO, TaxRate::Zero);

        assert_eq!(totals.net_sum, dec!(219.80));
        assert_eq!(totals.gross_total, dec!(219.80));
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
    }

    #[test]
    fn reference_scenario_regal_tisch() {
        let package = sample_package();
        let totals = compute_totals(&package, dec!(10), TaxRate::Standard).rounded();

        assert_eq!(totals.net_sum, dec!(219.80));
        assert_eq!(totals.net_after_discount, dec!(197.82));
        assert_eq!(totals.tax_amount, dec!(37.59));
        assert_eq!(totals.gross_total, dec!(235.41));
    }

    #[test]
    fn tax_applies_to_the_discounted_amount_not_the_original() {
        let package = Package::from_iter([LineItem::new("Regal".to_string(), 1, dec!(100))]);
        let totals = compute_totals(&package, dec!(50), TaxRate::Standard);

        // 100 -> 50 after discount -> 9.50 tax. Tax on the original would be 19.
        assert_eq!(totals.tax_amount, dec!(9.50));
        assert_eq!(totals.gross_total, dec!(59.50));
    }

    #[test]
    fn gross_matches_the_closed_form_for_all_legal_rates() {
        let package = sample_package();
        for discount in [dec!(0), dec!(3.5), dec!(50), dec!(100)] {
            for tax in TaxRate::ALL {
                let totals = compute_totals(&package, discount, tax);
                let expected = totals.net_sum
                    * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
                    * (Decimal::ONE + tax.percent() / Decimal::ONE_HUNDRED);
                assert_eq!(totals.gross_total, expected);
            }
        }
    }

    #[test]
    fn discount_is_clamped() {
        let package = sample_package();
        let totals = compute_totals(&package, dec!(150), TaxRate::Zero);
        assert_eq!(totals.gross_total, Decimal::ZERO);
    }

    #[test]
    fn empty_package_is_all_zeroes() {
        let totals = compute_totals(&Package::new(), dec!(10), TaxRate::Standard);
        assert_eq!(totals.net_sum, Decimal::ZERO);
        assert_eq!(totals.gross_total, Decimal::ZERO);
    }

    #[test]
    fn tax_rate_rejects_anything_outside_the_legal_set() {
        assert!(TaxRate::try_from(19).is_ok());
        assert!(TaxRate::try_from(16).is_err());
        assert_eq!(u8::from(TaxRate::Reduced), 7);
    }
}
