//! Sequence Ontology consequence terms as emitted by VEP, ranked by severity.

use std::str::FromStr;

/// Consequence terms, declared from most to least severe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Consequence {
    TranscriptAblation,
    SpliceAcceptorVariant,
    SpliceDonorVariant,
    StopGained,
    FrameshiftVariant,
    InitiatorCodonVariant,
    StopLost,
    StartLost,
    TranscriptAmplification,
    ConservedExonTerminusVariant,
    InframeInsertion,
    InframeDeletion,
    MissenseVariant,
    ProteinAlteringVariant,
    SpliceRegionVariant,
    IncompleteTerminalCodonVariant,
    StartRetainedVariant,
    StopRetainedVariant,
    SynonymousVariant,
    CodingSequenceVariant,
    #[strum(serialize = "mature_miRNA_variant")]
    MatureMirnaVariant,
    #[strum(serialize = "5_prime_UTR_variant")]
    FivePrimeUtrVariant,
    #[strum(serialize = "3_prime_UTR_variant")]
    ThreePrimeUtrVariant,
    NonCodingExonVariant,
    NonCodingTranscriptExonVariant,
    IntronVariant,
    #[strum(serialize = "NMD_transcript_variant")]
    NmdTranscriptVariant,
    NonCodingTranscriptVariant,
    NcTranscriptVariant,
    UpstreamGeneVariant,
    DownstreamGeneVariant,
    #[strum(serialize = "TFBS_ablation")]
    TfbsAblation,
    #[strum(serialize = "TFBS_amplification")]
    TfbsAmplification,
    #[strum(serialize = "TF_binding_site_variant")]
    TfBindingSiteVariant,
    RegulatoryRegionAblation,
    RegulatoryRegionAmplification,
    FeatureElongation,
    RegulatoryRegionVariant,
    FeatureTruncation,
    IntergenicVariant,
}

/// Consequences that lead to loss of function of the gene product.
pub const LOF_CONSEQUENCES: &[Consequence] = &[
    Consequence::TranscriptAblation,
    Consequence::SpliceDonorVariant,
    Consequence::SpliceAcceptorVariant,
    Consequence::StopGained,
    Consequence::FrameshiftVariant,
    Consequence::InitiatorCodonVariant,
    Consequence::StartLost,
    Consequence::ConservedExonTerminusVariant,
];

impl Consequence {
    /// Whether the consequence is a loss-of-function one.
    pub fn is_lof(&self) -> bool {
        LOF_CONSEQUENCES.contains(self)
    }
}

/// Whether the consequence term is a loss-of-function one.
pub fn is_lof_term(term: &str) -> bool {
    Consequence::from_str(term)
        .map(|csq| csq.is_lof())
        .unwrap_or(false)
}

/// Severity rank of a term, lower is more severe.  Unknown terms rank last.
fn rank(term: &str) -> usize {
    Consequence::from_str(term)
        .map(|csq| csq as usize)
        .unwrap_or(usize::MAX)
}

/// Return the most severe of the given terms, `None` for empty input.
///
/// On ties, the first occurrence wins.
pub fn most_severe<S: AsRef<str>>(terms: &[S]) -> Option<&str> {
    terms
        .iter()
        .map(|term| term.as_ref())
        .fold(None, |best, term| match best {
            Some(best) if rank(best) <= rank(term) => Some(best),
            _ => Some(term),
        })
}

/// Return the most severe term for each allele.
///
/// `per_allele` has one inner list of terms per alternate allele.  The result
/// has one entry per allele, `None` for alleles without any term.
pub fn most_severe_per_allele<S: AsRef<str>>(per_allele: &[Vec<S>]) -> Vec<Option<&str>> {
    per_allele
        .iter()
        .map(|terms| most_severe(terms.as_slice()))
        .collect()
}
