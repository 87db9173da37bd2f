//! Builders for candidates and families shared by the filter tests.

use crate::candidate::{Candidate, Category, InheritanceMode};
use crate::filter::conf::FilterConf;
use crate::ped::{Family, Person, Sex};
use crate::variant::{Record, TrioGenotypes, Variant};

pub const SNV_INFO: &str = "HGNC=ATRX;CQ=missense_variant;random_tag;AF_AFR=0.0001";

pub const CNV_INFO: &str = "HGNC=TEST;HGNC_ALL=TEST,OR5A1;CQ=missense_variant;CNSOLIDATE;\
     WSCORE=0.5;CALLP=0.000;COMMONFORWARDS=0.000;MEANLR2=0.5;MADL2R=0.02;\
     END=16000000;SVLEN=1000000";

/// Configuration scanning only `AFR_AF`.
pub fn conf() -> FilterConf {
    FilterConf {
        populations: vec!["AFR_AF".to_string()],
        ..Default::default()
    }
}

pub fn trio_family(child_sex: Sex) -> Family {
    Family::new("test", Person::new("child", child_sex, true))
        .with_mother(Person::new("mother", Sex::Female, false))
        .and_then(|f| f.with_father(Person::new("father", Sex::Male, true)))
        .expect("valid trio")
}

pub fn proband_only_family(child_sex: Sex) -> Family {
    Family::new("test", Person::new("child", child_sex, true))
}

fn snv(chrom: &str, pos: u64, gt: &str, info: &str) -> Variant {
    let sample = format!("{gt}:50:PASS:0.99");
    Variant::snv(
        Record::new(chrom, pos, "A", "G")
            .with_info(info)
            .and_then(|r| r.with_format("GT:DP:TEAM29_FILTER:PP_DNM", &sample))
            .expect("valid SNV"),
    )
}

fn cnv(chrom: &str, info: &str) -> Variant {
    Variant::cnv(
        Record::new(chrom, 15_000_000, "A", "<DUP>")
            .with_info(info)
            .and_then(|r| r.with_format("inheritance:DP", "deNovo:50"))
            .expect("valid CNV"),
    )
}

/// SNV trio where all members share the INFO fields.
pub fn snv_trio(chrom: &str, pos: u64, genotypes: [&str; 3], info: &str) -> TrioGenotypes {
    TrioGenotypes::new(
        snv(chrom, pos, genotypes[0], info),
        Some(snv(chrom, pos, genotypes[1], info)),
        Some(snv(chrom, pos, genotypes[2], info)),
    )
}

pub fn cnv_trio(chrom: &str, info: &str) -> TrioGenotypes {
    TrioGenotypes::new(
        cnv(chrom, info),
        Some(cnv(chrom, info)),
        Some(cnv(chrom, info)),
    )
}

pub fn candidate(
    genotypes: TrioGenotypes,
    categories: &[Category],
    modes: &[InheritanceMode],
    genes: &[&str],
) -> Candidate {
    Candidate::new(
        genotypes,
        categories.to_vec(),
        modes.to_vec(),
        genes.iter().map(|g| g.to_string()).collect(),
    )
}

/// Single-variant candidate in ATRX with the given modes.
pub fn single(genotypes: TrioGenotypes, modes: &[InheritanceMode]) -> Candidate {
    candidate(genotypes, &[Category::SingleVariant], modes, &["ATRX"])
}

/// Single-variant SNV candidate in ATRX, heterozygous in child and mother.
pub fn single_snv(chrom: &str, pos: u64, modes: &[InheritanceMode]) -> Candidate {
    let genotypes = snv_trio(chrom, pos, ["0/1", "0/1", "0/0"], SNV_INFO);
    single(genotypes, modes)
}

/// Biallelic compound het candidate in ATRX.
pub fn compound_het(genotypes: TrioGenotypes) -> Candidate {
    candidate(
        genotypes,
        &[Category::CompoundHet],
        &[InheritanceMode::Biallelic],
        &["ATRX"],
    )
}

/// Set an INFO value on the child's call.
pub fn set_info(candidate: &mut Candidate, key: &str, value: &str) {
    candidate
        .genotypes
        .child
        .record_mut()
        .info
        .insert(key.to_string(), value.to_string());
}

/// Remove an INFO value from the child's call.
pub fn remove_info(candidate: &mut Candidate, key: &str) {
    candidate
        .genotypes
        .child
        .record_mut()
        .info
        .shift_remove(key);
}

/// Copy of the candidate with only the given modes.
pub fn with_modes(candidate: &Candidate, modes: &[InheritanceMode]) -> Candidate {
    Candidate {
        modes: modes.to_vec(),
        ..candidate.clone()
    }
}
