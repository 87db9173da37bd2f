//! Post-inheritance consolidation and filtering of candidate variants.
//!
//! Candidates arrive already classified by Mendelian inheritance mode and
//! gene.  The filter engine in [`filter`] trims their modes and removes them
//! based on population frequency, in-silico predictions, population allele
//! counts, and CNV quality metrics.

pub mod candidate;
pub mod common;
pub mod err;
pub mod filter;
pub mod ped;
pub mod variant;
