//! # itax-cli: Tax Calculator Command-Line Interface
//!
//! Terminal counterpart of the calculator form. Amounts are taken as text
//! and go through the same normalization as HTTP payloads, so a value the
//! API rejects is rejected here with the same message.
//!
//! ## Subcommands
//!
//! - `compute`: taxable income, tax payable and suggestions
//! - `slabs`: print the slab schedule

pub mod compute;
pub mod format;
pub mod slabs;

use std::io::Write;

use clap::Parser;

/// itax: Indian personal income tax calculator (FY 2024-25 slabs).
#[derive(Parser, Debug)]
#[command(name = "itax", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compute taxable income and tax payable.
    Compute(compute::ComputeArgs),
    /// Print the tax slab schedule.
    Slabs(slabs::SlabsArgs),
}

/// Run the selected subcommand, writing its output to `out`.
pub fn dispatch(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Compute(args) => compute::run(args, out).map(|_| ()),
        Commands::Slabs(args) => slabs::run(args, out),
    }
}
