//! # Tax Engine: FY 2024-25 Slab Computation
//!
//! Pure, deterministic mapping from four validated amounts to a taxable
//! income figure, a tax payable figure, and the savings suggestions list.
//!
//! ## Slab Schedule
//!
//! | Taxable income (INR)        | Tax payable                          |
//! |-----------------------------|--------------------------------------|
//! | ≤ 3,00,000                  | 0                                    |
//! | 3,00,000 < x ≤ 7,00,000     | (x − 3,00,000) × 5%                  |
//! | 7,00,000 < x ≤ 10,00,000    | (x − 7,00,000) × 10% + 20,000        |
//! | 10,00,000 < x ≤ 12,00,000   | (x − 10,00,000) × 15% + 50,000       |
//! | 12,00,000 < x ≤ 15,00,000   | (x − 12,00,000) × 20% + 80,000       |
//! | x > 15,00,000               | (x − 15,00,000) × 30% + 1,40,000     |
//!
//! Upper bounds are inclusive and slabs are tested in ascending order, so a
//! value sitting exactly on a boundary is taxed by the lower slab.
//!
//! ## Determinism
//!
//! Taxable income is not floored at zero. A negative value falls into the
//! first slab and yields zero tax. Every formula is evaluated as
//! `(x - lower) * rate + base` on `f64`, which reproduces the reference
//! figures bit for bit.

use serde::{Deserialize, Serialize};

/// Savings suggestions returned with every result.
///
/// Input-independent placeholder; the strings and their order are part of
/// the response contract.
pub const TAX_SAVINGS_SUGGESTIONS: [&str; 2] = [
    "Invest more in Section 80C to maximize your deductions.",
    "Consider tax-saving FD schemes.",
];

/// One band of the progressive schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxSlab {
    /// Exclusive lower bound of the band (the amount taxed at earlier rates).
    pub lower: f64,
    /// Inclusive upper bound. `None` for the open top band.
    pub upper: Option<f64>,
    /// Marginal rate applied to the amount above `lower`.
    pub rate: f64,
    /// Cumulative tax of all lower bands.
    pub base: f64,
}

impl TaxSlab {
    /// Whether `taxable` falls at or below this band's upper bound.
    pub fn covers(&self, taxable: f64) -> bool {
        match self.upper {
            Some(upper) => taxable <= upper,
            None => true,
        }
    }

    /// Tax due on `taxable` under this band.
    pub fn tax_on(&self, taxable: f64) -> f64 {
        if self.rate == 0.0 {
            return self.base;
        }
        (taxable - self.lower) * self.rate + self.base
    }
}

/// The FY 2024-25 schedule, in ascending order.
pub const SLABS: [TaxSlab; 6] = [
    TaxSlab {
        lower: 0.0,
        upper: Some(300_000.0),
        rate: 0.0,
        base: 0.0,
    },
    TaxSlab {
        lower: 300_000.0,
        upper: Some(700_000.0),
        rate: 0.05,
        base: 0.0,
    },
    TaxSlab {
        lower: 700_000.0,
        upper: Some(1_000_000.0),
        rate: 0.10,
        base: 20_000.0,
    },
    TaxSlab {
        lower: 1_000_000.0,
        upper: Some(1_200_000.0),
        rate: 0.15,
        base: 50_000.0,
    },
    TaxSlab {
        lower: 1_200_000.0,
        upper: Some(1_500_000.0),
        rate: 0.20,
        base: 80_000.0,
    },
    TaxSlab {
        lower: 1_500_000.0,
        upper: None,
        rate: 0.30,
        base: 140_000.0,
    },
];

/// Outcome of a tax computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub taxable_income: f64,
    pub tax_payable: f64,
    pub tax_savings_suggestions: Vec<String>,
}

/// `income - investments - deductions + other_income`, left to right.
pub fn taxable_income(income: f64, investments: f64, deductions: f64, other_income: f64) -> f64 {
    income - investments - deductions + other_income
}

/// Tax payable on `taxable` under [`SLABS`].
pub fn tax_payable(taxable: f64) -> f64 {
    SLABS
        .iter()
        .find(|slab| slab.covers(taxable))
        .map(|slab| slab.tax_on(taxable))
        .unwrap_or(0.0)
}

/// Compute taxable income, tax payable, and suggestions.
///
/// Inputs are expected to be finite; see [`crate::RawTaxInput::parse`].
pub fn compute_tax(income: f64, investments: f64, deductions: f64, other_income: f64) -> TaxResult {
    let taxable = taxable_income(income, investments, deductions, other_income);
    TaxResult {
        taxable_income: taxable,
        tax_payable: tax_payable(taxable),
        tax_savings_suggestions: TAX_SAVINGS_SUGGESTIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}
