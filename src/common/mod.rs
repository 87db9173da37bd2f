//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Canonicalize a chromosome name, e.g., `chrx` becomes `X` and `chrM` becomes `MT`.
///
/// Other names are returned without the `chr` prefix but otherwise unchanged.
pub fn canonicalize(chrom: &str) -> String {
    let stripped = chrom
        .strip_prefix("chr")
        .or_else(|| chrom.strip_prefix("CHR"))
        .or_else(|| chrom.strip_prefix("Chr"))
        .unwrap_or(chrom);
    match stripped {
        "x" => "X".to_string(),
        "y" => "Y".to_string(),
        "M" | "m" | "mt" | "Mt" => "MT".to_string(),
        _ => stripped.to_string(),
    }
}

/// Helper type for encoding genotypes in parsing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Genotype {
    /// hom. ref.
    HomRef,
    /// het.
    Het,
    /// hom. alt.
    HomAlt,
    /// other, includes no-call
    WithNoCall,
}

impl Genotype {
    /// Whether the genotype carries at least one alternate allele.
    pub fn is_variant(&self) -> bool {
        matches!(self, Genotype::Het | Genotype::HomAlt)
    }
}

impl std::str::FromStr for Genotype {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match strip_gt_leading_slash(s) {
            "0/0" | "0|0" | "0" => Genotype::HomRef,
            "0/1" | "1/0" | "0|1" | "1|0" => Genotype::Het,
            "1/1" | "1|1" | "1" => Genotype::HomAlt,
            "." | "./." | ".|." | "./0" | "./1" | "0/." | "1/." => Genotype::WithNoCall,
            _ => anyhow::bail!("invalid genotype value: {:?}", s),
        })
    }
}

/// Strip leading slash or pipe from genotype string, as written for haploid calls.
pub fn strip_gt_leading_slash(gt: &str) -> &str {
    gt.strip_prefix('/')
        .or_else(|| gt.strip_prefix('|'))
        .unwrap_or(gt)
}

/// Parse a comma-separated list of values and return the maximal numeric one.
///
/// Tokens that are not numbers are skipped.  Returns `None` if no token is
/// numeric.
pub fn parse_numeric_list(raw: &str) -> Option<f64> {
    numeric_tokens(raw).reduce(f64::max)
}

/// Parse a comma-separated list of values and return the sum of the numeric ones.
///
/// Returns `None` if no token is numeric.
pub fn sum_numeric_list(raw: &str) -> Option<f64> {
    numeric_tokens(raw).reduce(|acc, value| acc + value)
}

fn numeric_tokens(raw: &str) -> impl Iterator<Item = f64> + '_ {
    raw.split(',')
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .filter(|value| !value.is_nan())
}
