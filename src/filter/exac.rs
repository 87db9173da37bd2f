//! Filtering on ExAC-style population allele counts.

use crate::candidate::{Candidate, InheritanceMode};
use crate::common::{parse_numeric_list, sum_numeric_list};
use crate::filter::conf::{CountAggregation, FilterConf};
use crate::ped::Family;
use crate::variant::Record;

/// INFO key of the heterozygous allele count.
pub const KEY_AC_HET: &str = "AC_Het";
/// INFO key of the hemizygous allele count.
pub const KEY_AC_HEMI: &str = "AC_Hemi";

/// Allele count stored under `key`, zero if missing or not numeric.
pub fn allele_count(record: &Record, key: &str, aggregation: CountAggregation) -> f64 {
    record
        .info_value(key)
        .and_then(|raw| match aggregation {
            CountAggregation::Max => parse_numeric_list(raw),
            CountAggregation::Sum => sum_numeric_list(raw),
        })
        .unwrap_or(0.0)
}

/// Whether `mode` of `candidate` survives the allele count checks.
pub fn passes(
    conf: &FilterConf,
    family: &Family,
    candidate: &Candidate,
    mode: InheritanceMode,
) -> bool {
    let record = candidate.genotypes.child.record();
    let count = |key: &str| allele_count(record, key, conf.exac.aggregation);
    match mode {
        InheritanceMode::Hemizygous => {
            // Only inherited calls in males are checked.
            if !family.child.is_male() || candidate.genotypes.is_de_novo() {
                return true;
            }
            count(KEY_AC_HEMI) <= f64::from(conf.exac.max_hemi)
        }
        InheritanceMode::Monoallelic => count(KEY_AC_HET) <= f64::from(conf.exac.max_het),
        InheritanceMode::XLinkedDominant => {
            count(KEY_AC_HET) + count(KEY_AC_HEMI) <= f64::from(conf.exac.max_x_linked_dominant)
        }
        _ => true,
    }
}

/// Drop the modes for which the candidate is seen too often in the population.
pub fn filter(conf: &FilterConf, family: &Family, candidates: Vec<Candidate>) -> Vec<Candidate> {
    super::trim_modes(candidates, "ExAC", |candidate, mode| {
        passes(conf, family, candidate, mode)
    })
}

#[cfg(test)]
mod test {
    use float_cmp::approx_eq;
    use pretty_assertions::assert_eq;

    use crate::candidate::InheritanceMode::{
        self, Biallelic, Hemizygous, Monoallelic, XLinkedDominant,
    };
    use crate::filter::conf::{CountAggregation, FilterConf};
    use crate::filter::fixtures::{
        conf, set_info, single, snv_trio, trio_family, with_modes, SNV_INFO,
    };
    use crate::ped::Sex;

    /// Heterozygous child with hom-ref parents.
    const HET: [&str; 3] = ["0/1", "0/0", "0/0"];

    fn run(
        conf: &FilterConf,
        sex: Sex,
        genotypes: [&str; 3],
        counts: &[(&str, &str)],
        modes: &[InheritanceMode],
    ) -> Vec<InheritanceMode> {
        let mut cand = single(snv_trio("X", 150, genotypes, SNV_INFO), modes);
        for (key, value) in counts {
            set_info(&mut cand, key, value);
        }
        super::filter(conf, &trio_family(sex), vec![cand])
            .into_iter()
            .flat_map(|c| c.modes)
            .collect()
    }

    #[rstest::rstest]
    #[case(Sex::Male, ["1/1", "1/1", "1/1"], "1", &[])]
    #[case(Sex::Male, ["1/1", "1/1", "1/1"], "0", &[Hemizygous])]
    #[case(Sex::Female, ["1/1", "1/1", "1/1"], "1", &[Hemizygous])]
    #[case(Sex::Male, ["1/1", "0/0", "0/0"], "1", &[Hemizygous])]
    fn hemizygous(
        #[case] sex: Sex,
        #[case] genotypes: [&str; 3],
        #[case] ac_hemi: &str,
        #[case] expected: &[InheritanceMode],
    ) {
        let counts = [("AC_Hemi", ac_hemi)];
        assert_eq!(
            run(&conf(), sex, genotypes, &counts, &[Hemizygous]),
            expected.to_vec()
        );
    }

    #[rstest::rstest]
    #[case("4", &[Monoallelic])]
    #[case("5", &[])]
    #[case("3,5", &[])]
    #[case("1,1,1,1,1", &[Monoallelic])]
    fn monoallelic(#[case] ac_het: &str, #[case] expected: &[InheritanceMode]) {
        let counts = [("AC_Het", ac_het)];
        assert_eq!(
            run(&conf(), Sex::Female, HET, &counts, &[Monoallelic]),
            expected.to_vec()
        );
    }

    #[rstest::rstest]
    #[case("2", "2", &[XLinkedDominant])]
    #[case("3", "2", &[])]
    #[case("3", "3", &[])]
    #[case("5", "0", &[])]
    fn x_linked_dominant(
        #[case] ac_het: &str,
        #[case] ac_hemi: &str,
        #[case] expected: &[InheritanceMode],
    ) {
        let counts = [("AC_Het", ac_het), ("AC_Hemi", ac_hemi)];
        assert_eq!(
            run(&conf(), Sex::Female, HET, &counts, &[XLinkedDominant]),
            expected.to_vec()
        );
    }

    #[rstest::rstest]
    #[case("3,3", &[])]
    #[case("2,2", &[Monoallelic])]
    fn sum_aggregation(#[case] ac_het: &str, #[case] expected: &[InheritanceMode]) {
        let mut conf = conf();
        conf.exac.aggregation = CountAggregation::Sum;
        let counts = [("AC_Het", ac_het)];

        assert_eq!(
            run(&conf, Sex::Female, HET, &counts, &[Monoallelic]),
            expected.to_vec()
        );
    }

    #[test]
    fn modes_trimmed_independently() {
        let mut cand = single(
            snv_trio("X", 150, HET, SNV_INFO),
            &[Biallelic, Monoallelic, XLinkedDominant],
        );
        set_info(&mut cand, "AC_Het", "4");
        set_info(&mut cand, "AC_Hemi", "1");

        let result = super::filter(&conf(), &trio_family(Sex::Female), vec![cand.clone()]);

        assert_eq!(result, vec![with_modes(&cand, &[Biallelic, Monoallelic])]);
    }

    #[test]
    fn allele_count() {
        let cand = single(snv_trio("X", 150, HET, "AC_Het=1,7;AC_Hemi=."), &[]);
        let record = cand.genotypes.child.record();

        assert!(approx_eq!(
            f64,
            super::allele_count(record, "AC_Het", CountAggregation::Max),
            7.0,
            ulps = 2
        ));
        assert!(approx_eq!(
            f64,
            super::allele_count(record, "AC_Het", CountAggregation::Sum),
            8.0,
            ulps = 2
        ));
        assert!(approx_eq!(
            f64,
            super::allele_count(record, "AC_Hemi", CountAggregation::Max),
            0.0,
            ulps = 2
        ));
    }
}
