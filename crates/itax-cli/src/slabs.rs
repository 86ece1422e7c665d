//! # Slabs Subcommand
//!
//! Prints the FY 2024-25 slab schedule used by the engine.

use std::io::Write;

use clap::Args;
use itax_core::SLABS;

use crate::format::format_inr;

/// Arguments for the slabs subcommand.
#[derive(Args, Debug)]
pub struct SlabsArgs {}

/// Write the slab table to `out`.
pub fn run(_args: &SlabsArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "{:<36} {:>5} {:>16}", "Taxable income", "Rate", "Base tax")?;
    for slab in SLABS.iter() {
        let band = match slab.upper {
            Some(upper) if slab.lower == 0.0 => format!("up to {}", format_inr(upper)),
            Some(upper) => format!("{} to {}", format_inr(slab.lower), format_inr(upper)),
            None => format!("above {}", format_inr(slab.lower)),
        };
        writeln!(
            out,
            "{:<36} {:>4.0}% {:>16}",
            band,
            slab.rate * 100.0,
            format_inr(slab.base)
        )?;
    }
    Ok(())
}
