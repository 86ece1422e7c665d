//! # itax-core: Tax Engine for the itax Portal
//!
//! Computes Indian personal income tax under the FY 2024-25 slab schedule.
//! The crate has two halves:
//!
//! - [`input`]: turns the untyped boundary payload (a JSON object whose
//!   fields may be numbers or numeric-looking strings) into a validated
//!   [`TaxInput`], or rejects it with a [`ValidationError`].
//! - [`engine`]: the pure slab computation producing a [`TaxResult`].
//!
//! ## Crate Policy
//!
//! - No I/O, no logging, no shared mutable state. Every function is safe to
//!   call concurrently from any number of callers.
//! - Arithmetic is plain IEEE-754 `f64` in a fixed operation order so results
//!   are bit-exact with the published slab formulas.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod engine;
pub mod error;
pub mod input;

pub use engine::{
    compute_tax, tax_payable, taxable_income, TaxResult, TaxSlab, SLABS,
    TAX_SAVINGS_SUGGESTIONS,
};
pub use error::ValidationError;
pub use input::{coerce_number, parse_float_prefix, RawTaxInput, Submitter, TaxInput};
