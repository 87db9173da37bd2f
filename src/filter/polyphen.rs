//! PolyPhen-based filtering of single-variant and compound het candidates.

use itertools::izip;

use crate::candidate::{Candidate, Category};
use crate::filter::conf::{CompoundHetRule, FilterConf};
use crate::variant::{Variant, KEY_POLYPHEN, MULTI_VALUE_DELIMITER};

/// Prediction of a call that cannot explain the phenotype.
pub const BENIGN: &str = "benign";
/// Prediction assigned to MNVs whose combined effect alters the protein.
pub const MNV_CANDIDATE: &str = "mnv_candidate";
/// Consequence for which PolyPhen predictions are reported.
const MISSENSE: &str = "missense_variant";

/// MNV codes whose combined effect differs from the single calls.
pub const MNV_MODIFIED: &[&str] = &[
    "modified_protein_altering_mnv",
    "modified_synonymous_mnv",
    "modified_stop_gained_mnv",
    "masked_stop_gain_mnv",
    "alternate_residue_mnv",
];

/// MNV codes whose combined effect equals that of the single calls.
pub const MNV_UNMODIFIED: &[&str] = &[
    "unmodified_synonymous_mnv",
    "unmodified_protein_altering_mnv",
];

/// PolyPhen predictions of `variant` for the given genes, in annotation order.
///
/// Entries of non-missense consequences are empty strings.  MNV codes
/// override the annotated predictions.
pub fn polyphen_for_genes<S: AsRef<str>>(variant: &Variant, genes: &[S]) -> Vec<String> {
    let record = variant.record();
    let Some(polyphen) = record.info_value(KEY_POLYPHEN) else {
        return Vec::new();
    };
    let symbols = record.gene_from_annotation().unwrap_or_default();
    let consequences = record.consequence().unwrap_or_default();

    let predictions = izip!(symbols, consequences, polyphen.split(MULTI_VALUE_DELIMITER))
        .filter(|(symbol, _, _)| genes.iter().any(|gene| gene.as_ref() == symbol.as_str()))
        .map(|(_, consequence, prediction)| {
            if consequence == MISSENSE {
                prediction_label(prediction)
            } else {
                String::new()
            }
        })
        .collect::<Vec<_>>();

    match variant.mnv_code() {
        Some(code) if MNV_MODIFIED.contains(&code) => {
            vec![MNV_CANDIDATE.to_string(); predictions.len()]
        }
        Some(code) if MNV_UNMODIFIED.contains(&code) => {
            vec![BENIGN.to_string(); predictions.len()]
        }
        _ => predictions,
    }
}

/// Label without the score, e.g., `probably_damaging(0.99)` gives `probably_damaging`.
fn prediction_label(raw: &str) -> String {
    raw.split('(').next().unwrap_or_default().trim().to_string()
}

/// Whether all predictions are benign; an empty list is not.
pub fn is_benign(predictions: &[String]) -> bool {
    !predictions.is_empty() && predictions.iter().all(|p| p == BENIGN)
}

/// Whether any prediction is informative, i.e., non-empty.
pub fn is_informative(predictions: &[String]) -> bool {
    predictions.iter().any(|p| !p.is_empty())
}

/// Whether the single-variant category of `candidate` survives.
pub fn passes_single_variant(candidate: &Candidate) -> bool {
    let predictions = polyphen_for_genes(&candidate.genotypes.child, candidate.genes.as_slice());
    !is_benign(&predictions)
}

/// Whether `candidate` has a plausible compound het partner in `gene`.
///
/// Partners are the other compound het candidates in `candidates` at a
/// different site that share `gene`.
pub fn has_compound_match(
    rule: CompoundHetRule,
    candidate: &Candidate,
    gene: &str,
    candidates: &[Candidate],
) -> bool {
    let partners = candidates
        .iter()
        .filter(|other| {
            other.has_category(Category::CompoundHet)
                && other.has_gene(gene)
                && !other.genotypes.same_site(&candidate.genotypes)
        })
        .map(|other| polyphen_for_genes(&other.genotypes.child, &[gene]))
        .collect::<Vec<_>>();

    match rule {
        CompoundHetRule::AnnotatedPartner => partners.iter().any(|p| is_informative(p)),
        CompoundHetRule::BenignPairExclusion => {
            if partners.is_empty() {
                return true;
            }
            let own = polyphen_for_genes(&candidate.genotypes.child, &[gene]);
            !is_benign(&own) && partners.iter().any(|p| !is_benign(p))
        }
    }
}

/// Whether the compound het category of `candidate` survives.
pub fn passes_compound_het(
    rule: CompoundHetRule,
    candidate: &Candidate,
    candidates: &[Candidate],
) -> bool {
    candidate
        .genes
        .iter()
        .any(|gene| has_compound_match(rule, candidate, gene, candidates))
}

fn passes_category(
    rule: CompoundHetRule,
    candidate: &Candidate,
    category: Category,
    candidates: &[Candidate],
) -> bool {
    match category {
        Category::SingleVariant => passes_single_variant(candidate),
        Category::CompoundHet => passes_compound_het(rule, candidate, candidates),
    }
}

fn category_count(candidates: &[Candidate]) -> usize {
    candidates.iter().map(|c| c.categories.len()).sum()
}

/// One pass over all candidates against the categories as they were at its start.
///
/// Only the categories in `checked` are evaluated, the others are kept.
fn filter_once(
    rule: CompoundHetRule,
    checked: &[Category],
    candidates: Vec<Candidate>,
) -> Vec<Candidate> {
    let kept = candidates
        .iter()
        .map(|candidate| {
            candidate
                .categories
                .iter()
                .copied()
                .filter(|category| {
                    !checked.contains(category)
                        || passes_category(rule, candidate, *category, &candidates)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    candidates
        .into_iter()
        .zip(kept)
        .filter_map(|(mut candidate, categories)| {
            if candidate.categories.is_empty() {
                return Some(candidate);
            }
            if categories.is_empty() {
                tracing::trace!(
                    "PolyPhen filter removes {}:{}",
                    &candidate.genotypes.chrom,
                    candidate.genotypes.pos
                );
                return None;
            }
            candidate.categories = categories;
            Some(candidate)
        })
        .collect()
}

/// Repeat `filter_once` until no category is dropped.
fn filter_to_fixed_point(
    rule: CompoundHetRule,
    checked: &[Category],
    mut candidates: Vec<Candidate>,
) -> Vec<Candidate> {
    loop {
        let before = category_count(&candidates);
        candidates = filter_once(rule, checked, candidates);
        if category_count(&candidates) == before {
            return candidates;
        }
    }
}

/// Drop categories failing the PolyPhen checks and candidates left without any.
///
/// Removing a compound het may leave its former partners without a match,
/// so passes repeat until no category is dropped.
pub fn filter(conf: &FilterConf, candidates: Vec<Candidate>) -> Vec<Candidate> {
    filter_to_fixed_point(
        conf.compound_het_rule,
        &[Category::SingleVariant, Category::CompoundHet],
        candidates,
    )
}

/// Drop compound het categories whose partners are gone.
///
/// Later stages may remove the candidates that kept a compound het alive
/// in `filter`.  Single-variant categories are not checked again.
pub fn prune_compound_het(conf: &FilterConf, candidates: Vec<Candidate>) -> Vec<Candidate> {
    let checked = [Category::CompoundHet];
    filter_to_fixed_point(conf.compound_het_rule, &checked, candidates)
}
