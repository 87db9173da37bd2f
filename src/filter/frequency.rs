//! Minor allele frequency filter.

use crate::candidate::{Candidate, InheritanceMode};
use crate::filter::conf::FilterConf;
use crate::ped::Family;

/// Frequency ceiling for `mode`, `None` if the mode is exempt.
///
/// The ceiling is stricter for proband-only analysis since inheritance
/// cannot be checked without the parents.
pub fn max_frequency(conf: &FilterConf, family: &Family, mode: InheritanceMode) -> Option<f64> {
    match mode {
        InheritanceMode::Biallelic => None,
        _ if family.has_parents() => Some(conf.maf.with_parents),
        _ => Some(conf.maf.without_parents),
    }
}

/// Whether `mode` of `candidate` survives the frequency check.
///
/// Candidates without any population frequency pass.
pub fn passes(
    conf: &FilterConf,
    family: &Family,
    candidate: &Candidate,
    mode: InheritanceMode,
) -> bool {
    let Some(ceiling) = max_frequency(conf, family, mode) else {
        return true;
    };
    match candidate
        .genotypes
        .child
        .record()
        .max_population_frequency(&conf.populations)
    {
        Some(freq) => freq <= ceiling,
        None => true,
    }
}

/// Drop the modes for which the candidate is too common.
pub fn filter(conf: &FilterConf, family: &Family, candidates: Vec<Candidate>) -> Vec<Candidate> {
    super::trim_modes(candidates, "MAF", |candidate, mode| {
        passes(conf, family, candidate, mode)
    })
}
