//! # Compute Subcommand
//!
//! Runs the tax engine over amounts given on the command line.

use std::io::Write;

use clap::Args;
use itax_core::{RawTaxInput, TaxResult};

use crate::format::format_inr;

/// Arguments for the compute subcommand.
///
/// Amounts are kept as text so they are coerced exactly like form input.
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Gross annual income.
    #[arg(long, allow_hyphen_values = true)]
    pub annual_income: String,

    /// Investments (80C, 80D, etc.).
    #[arg(long, allow_hyphen_values = true)]
    pub investments: String,

    /// Other deductions (HRA, LTA, etc.).
    #[arg(long, allow_hyphen_values = true)]
    pub other_deductions: String,

    /// Income from other sources.
    #[arg(long, allow_hyphen_values = true)]
    pub other_income: String,

    /// Print the result as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Validate the amounts, compute, and write the result to `out`.
pub fn run(args: &ComputeArgs, out: &mut dyn Write) -> anyhow::Result<TaxResult> {
    let input = RawTaxInput::from_text(
        &args.annual_income,
        &args.investments,
        &args.other_deductions,
        &args.other_income,
    )
    .parse()?;
    tracing::debug!(?input, "validated amounts");

    let result = input.compute();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        write_summary(&result, out)?;
    }
    Ok(result)
}

fn write_summary(result: &TaxResult, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Taxable Income: {}", format_inr(result.taxable_income))?;
    writeln!(out, "Tax Payable:    {}", format_inr(result.tax_payable))?;
    writeln!(out)?;
    writeln!(out, "Tax Savings Suggestions:")?;
    for suggestion in &result.tax_savings_suggestions {
        writeln!(out, "  - {suggestion}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itax_core::ValidationError;

    fn args(income: &str, json: bool) -> ComputeArgs {
        ComputeArgs {
            annual_income: income.to_string(),
            investments: "150000".to_string(),
            other_deductions: "50000".to_string(),
            other_income: "0".to_string(),
            json,
        }
    }

    #[test]
    fn summary_output() {
        let mut out = Vec::new();
        let result = run(&args("1200000", false), &mut out).unwrap();
        assert_eq!(result.taxable_income, 1_000_000.0);
        assert_eq!(result.tax_payable, 50_000.0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Taxable Income: ₹10,00,000.00"));
        assert!(text.contains("Tax Payable:    ₹50,000.00"));
        assert!(text.contains("  - Consider tax-saving FD schemes."));
    }

    #[test]
    fn json_output_matches_api_shape() {
        let mut out = Vec::new();
        run(&args("900000", true), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["taxableIncome"], 700_000.0);
        assert_eq!(value["taxPayable"], 20_000.0);
        assert_eq!(value["taxSavingsSuggestions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn non_numeric_amount_is_rejected_with_fixed_message() {
        let mut out = Vec::new();
        let err = run(&args("abc", false), &mut out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidNumber {
                field: "annualIncome"
            })
        );
        assert_eq!(
            err.to_string(),
            "Invalid input data. Please provide valid numbers."
        );
        assert!(out.is_empty());
    }

    #[test]
    fn negative_amounts_are_accepted() {
        let mut out = Vec::new();
        let result = run(&args("-5000", false), &mut out).unwrap();
        assert_eq!(result.taxable_income, -205_000.0);
        assert_eq!(result.tax_payable, 0.0);
        assert!(String::from_utf8(out).unwrap().contains("-₹2,05,000.00"));
    }
}
