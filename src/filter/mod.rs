//! Post-inheritance filtering of candidates.
//!
//! The stages run in a fixed order on the candidate list of one proband:
//!
//! 1. CNV quality gate (`cnv::filter_quality`)
//! 2. CNV chromosome diversity (`cnv::filter_chroms`)
//! 3. minor allele frequency (`frequency::filter`)
//! 4. PolyPhen and compound het partners (`polyphen::filter`)
//! 5. ExAC allele counts (`exac::filter`)
//! 6. compound het partners left after ExAC (`polyphen::prune_compound_het`)
//!
//! Stages only ever shrink the modes and categories of a candidate or drop
//! it.  The relative order of the surviving candidates is kept.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, InheritanceMode};
use crate::filter::conf::FilterConf;
use crate::ped::Family;

pub mod cli;
pub mod cnv;
pub mod conf;
pub mod exac;
pub mod frequency;
pub mod polyphen;

#[cfg(test)]
pub(crate) mod fixtures;

/// Keep the modes for which `keep` holds and drop candidates left without any.
pub(crate) fn trim_modes<F>(candidates: Vec<Candidate>, stage: &str, mut keep: F) -> Vec<Candidate>
where
    F: FnMut(&Candidate, InheritanceMode) -> bool,
{
    candidates
        .into_iter()
        .filter_map(|mut candidate| {
            let modes = candidate
                .modes
                .iter()
                .copied()
                .filter(|mode| keep(&candidate, *mode))
                .collect::<Vec<_>>();
            if modes.is_empty() {
                tracing::trace!(
                    "{} filter removes {}:{}",
                    stage,
                    &candidate.genotypes.chrom,
                    candidate.genotypes.pos
                );
                return None;
            }
            if modes.len() < candidate.modes.len() {
                tracing::trace!(
                    "{} filter trims modes of {}:{} to {:?}",
                    stage,
                    &candidate.genotypes.chrom,
                    candidate.genotypes.pos,
                    &modes
                );
            }
            candidate.modes = modes;
            Some(candidate)
        })
        .collect()
}

/// Filter engine for the candidates of one family.
#[derive(Debug, Clone, Copy)]
pub struct PostInheritanceFilter<'a> {
    conf: &'a FilterConf,
    family: &'a Family,
}

impl<'a> PostInheritanceFilter<'a> {
    pub fn new(conf: &'a FilterConf, family: &'a Family) -> Self {
        Self { conf, family }
    }

    /// Run all stages on `candidates` and return the survivors.
    pub fn filter_candidates(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let count_in = candidates.len();
        let candidates = self.stage("CNV quality", candidates, |c| {
            cnv::filter_quality(self.conf, c)
        });
        let candidates = self.stage("CNV chromosomes", candidates, |c| {
            cnv::filter_chroms(self.conf, c)
        });
        let candidates = self.stage("MAF", candidates, |c| {
            frequency::filter(self.conf, self.family, c)
        });
        let candidates = self.stage("PolyPhen", candidates, |c| polyphen::filter(self.conf, c));
        let candidates = self.stage("ExAC", candidates, |c| {
            exac::filter(self.conf, self.family, c)
        });
        let candidates = self.stage("compound het partners", candidates, |c| {
            polyphen::prune_compound_het(self.conf, c)
        });
        tracing::debug!(
            "{}: {} of {} candidates passed",
            &self.family.child.id,
            candidates.len(),
            count_in
        );
        candidates
    }

    fn stage<F>(&self, name: &str, candidates: Vec<Candidate>, func: F) -> Vec<Candidate>
    where
        F: FnOnce(Vec<Candidate>) -> Vec<Candidate>,
    {
        let before = candidates.len();
        let result = func(candidates);
        tracing::debug!(
            "{}: {} filter kept {} of {} candidates",
            &self.family.child.id,
            name,
            result.len(),
            before
        );
        result
    }
}

/// Candidates of one family for batch processing.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Job {
    /// The family the candidates were called in.
    pub family: Family,
    /// Candidates, in output order.
    pub candidates: Vec<Candidate>,
}

/// Filter the candidates of independent families in parallel.
///
/// Output jobs are in the same order as the input.
pub fn filter_jobs(conf: &FilterConf, jobs: Vec<Job>) -> Vec<Job> {
    jobs.into_par_iter()
        .map(|job| {
            let engine = PostInheritanceFilter::new(conf, &job.family);
            let candidates = engine.filter_candidates(job.candidates);
            Job {
                family: job.family,
                candidates,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{filter_jobs, Job, PostInheritanceFilter};
    use crate::candidate::Candidate;
    use crate::candidate::Category::CompoundHet;
    use crate::candidate::InheritanceMode::{Biallelic, Hemizygous, Monoallelic};
    use crate::filter::fixtures::{
        candidate, cnv_trio, compound_het, conf, proband_only_family, set_info, single, single_snv,
        snv_trio, trio_family, with_modes, CNV_INFO, SNV_INFO,
    };
    use crate::ped::Sex;

    fn candidates() -> Vec<Candidate> {
        let mut common = single_snv("X", 100, &[Monoallelic]);
        set_info(&mut common, "AFR_AF", "0.01");

        let mut benign = single_snv("X", 200, &[Monoallelic]);
        set_info(&mut benign, "PolyPhen", "benign(0.01)");

        let mut trimmed = single(
            snv_trio("X", 300, ["1/1", "0/1", "0/1"], SNV_INFO),
            &[Biallelic, Hemizygous],
        );
        set_info(&mut trimmed, "AC_Hemi", "2");

        let mut low_quality = single(cnv_trio("1", CNV_INFO), &[Biallelic]);
        set_info(&mut low_quality, "CONVEXSCORE", "3");

        let good_cnv = single(cnv_trio("2", CNV_INFO), &[Monoallelic]);

        let mut first = compound_het(snv_trio("X", 400, ["0/1", "0/1", "0/0"], SNV_INFO));
        let mut second = compound_het(snv_trio("X", 500, ["0/1", "0/0", "0/1"], SNV_INFO));
        set_info(&mut first, "PolyPhen", "probably_damaging(0.99)");
        set_info(&mut second, "PolyPhen", "possibly_damaging(0.6)");

        let keep = single_snv("7", 100, &[Monoallelic]);

        vec![
            common,
            benign,
            trimmed,
            low_quality,
            good_cnv,
            first,
            second,
            keep,
        ]
    }

    #[tracing_test::traced_test]
    #[test]
    fn filter_candidates() {
        let conf = conf();
        let family = trio_family(Sex::Male);
        let engine = PostInheritanceFilter::new(&conf, &family);
        let input = candidates();

        let result = engine.filter_candidates(input.clone());

        let positions = result
            .iter()
            .map(|c| (c.genotypes.chrom.as_str(), c.genotypes.pos))
            .collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![
                ("X", 300),
                ("2", 15_000_000),
                ("X", 400),
                ("X", 500),
                ("7", 100)
            ]
        );
        assert_eq!(result[0], with_modes(&input[2], &[Biallelic]));
        assert_eq!(
            result[1].genotypes.child.record().info_value("CNS"),
            Some("3")
        );
        assert_eq!(result[4], input[7]);
        assert!(logs_contain("PolyPhen filter kept"));
    }

    #[test]
    fn filter_candidates_idempotent() {
        let conf = conf();
        let family = trio_family(Sex::Male);
        let engine = PostInheritanceFilter::new(&conf, &family);

        let once = engine.filter_candidates(candidates());
        let twice = engine.filter_candidates(once.clone());

        assert_eq!(twice, once);
    }

    #[test]
    fn filter_candidates_idempotent_after_partner_removed() {
        let conf = conf();
        let family = trio_family(Sex::Female);
        let engine = PostInheritanceFilter::new(&conf, &family);
        let mut biallelic = compound_het(snv_trio("X", 150, ["0/1", "0/1", "0/0"], SNV_INFO));
        set_info(&mut biallelic, "PolyPhen", "probably_damaging(0.99)");
        let mut common = candidate(
            snv_trio("X", 160, ["0/1", "0/0", "0/1"], SNV_INFO),
            &[CompoundHet],
            &[Monoallelic],
            &["ATRX"],
        );
        set_info(&mut common, "PolyPhen", "probably_damaging(0.99)");
        set_info(&mut common, "AC_Het", "10");

        let once = engine.filter_candidates(vec![biallelic, common]);
        let twice = engine.filter_candidates(once.clone());

        assert_eq!(once, vec![]);
        assert_eq!(twice, once);
    }

    #[test]
    fn filter_candidates_never_adds() {
        let conf = conf();
        let family = proband_only_family(Sex::Female);
        let engine = PostInheritanceFilter::new(&conf, &family);
        let input = candidates();

        let result = engine.filter_candidates(input.clone());

        assert!(result.len() <= input.len());
        for candidate in &result {
            let original = input
                .iter()
                .find(|c| c.genotypes.same_site(&candidate.genotypes))
                .expect("candidate from input");
            assert!(candidate.modes.iter().all(|m| original.modes.contains(m)));
            assert!(candidate
                .categories
                .iter()
                .all(|c| original.categories.contains(c)));
            assert!(!candidate.modes.is_empty());
            assert!(!candidate.categories.is_empty());
        }
    }

    #[test]
    fn filter_candidates_empty() {
        let conf = conf();
        let family = trio_family(Sex::Female);
        let engine = PostInheritanceFilter::new(&conf, &family);

        assert_eq!(engine.filter_candidates(vec![]), vec![]);
    }

    #[test]
    fn filter_candidates_too_many_cnv_chroms() {
        let conf = conf();
        let family = trio_family(Sex::Female);
        let snv = single_snv("7", 100, &[Monoallelic]);
        let input = vec![
            single(cnv_trio("1", CNV_INFO), &[Monoallelic]),
            snv.clone(),
            single(cnv_trio("2", CNV_INFO), &[Monoallelic]),
            single(cnv_trio("3", CNV_INFO), &[Monoallelic]),
        ];
        let engine = PostInheritanceFilter::new(&conf, &family);

        assert_eq!(engine.filter_candidates(input), vec![snv]);
    }

    #[test]
    fn filter_jobs_keeps_order() {
        let conf = conf();
        let jobs = vec![
            Job {
                family: trio_family(Sex::Male),
                candidates: candidates(),
            },
            Job {
                family: proband_only_family(Sex::Female),
                candidates: candidates(),
            },
        ];

        let result = filter_jobs(&conf, jobs.clone());

        assert_eq!(result.len(), 2);
        for (job, expected) in result.iter().zip(jobs) {
            assert_eq!(job.family, expected.family);
            let engine = PostInheritanceFilter::new(&conf, &expected.family);
            let filtered = engine.filter_candidates(expected.candidates);
            assert_eq!(job.candidates, filtered);
        }
    }
}
