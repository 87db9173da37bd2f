//! CNV-specific stages: per-call quality gate and chromosome diversity.

use itertools::Itertools;

use crate::candidate::Candidate;
use crate::filter::conf::FilterConf;

/// Drop CNV candidates whose child call fails a quality check.
///
/// The derived copy-number state is written to the child call of every CNV
/// candidate examined.  SNV candidates pass untouched.
pub fn filter_quality(conf: &FilterConf, candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter_map(|mut candidate| {
            if let Some(cnv) = candidate.genotypes.child.as_cnv_mut() {
                cnv.add_cns_state();
                if let Some(failure) = cnv.quality_failure(&conf.cnv) {
                    tracing::trace!(
                        "CNV {}:{} fails quality check {}",
                        &cnv.record.chrom,
                        cnv.record.pos,
                        failure
                    );
                    return None;
                }
            }
            Some(candidate)
        })
        .collect()
}

/// Number of distinct chromosomes with CNV candidates.
pub fn count_cnv_chroms(candidates: &[Candidate]) -> usize {
    candidates
        .iter()
        .filter(|c| c.is_cnv())
        .map(|c| c.genotypes.canonical_chrom())
        .unique()
        .count()
}

/// Remove all CNV candidates.
pub fn remove_cnvs(candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.into_iter().filter(|c| !c.is_cnv()).collect()
}

/// Remove all CNVs if they are spread over too many chromosomes.
pub fn filter_chroms(conf: &FilterConf, candidates: Vec<Candidate>) -> Vec<Candidate> {
    let n_chroms = count_cnv_chroms(&candidates);
    if n_chroms > conf.cnv.max_chroms {
        tracing::debug!(
            "CNVs on {} chromosomes (> {}), removing all CNVs",
            n_chroms,
            conf.cnv.max_chroms
        );
        remove_cnvs(candidates)
    } else {
        candidates
    }
}
