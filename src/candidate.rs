//! Candidates flowing through the post-inheritance filters.

use crate::variant::TrioGenotypes;

/// How a candidate passed the inheritance classification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// The variant alone explains the phenotype.
    SingleVariant,
    /// The variant is one member of a compound heterozygous pair.
    CompoundHet,
}

/// Inheritance mode labels, as used in the known-genes list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum InheritanceMode {
    Biallelic,
    Monoallelic,
    Hemizygous,
    #[serde(rename = "X-linked dominant")]
    #[strum(serialize = "X-linked dominant")]
    XLinkedDominant,
    #[serde(rename = "X-linked over-dominance")]
    #[strum(serialize = "X-linked over-dominance")]
    XLinkedOverDominance,
    Imprinted,
    Mosaic,
    Mitochondrial,
}

/// A variant in trio context together with its categories, live inheritance
/// modes, and matched genes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    pub genotypes: TrioGenotypes,
    pub categories: Vec<Category>,
    pub modes: Vec<InheritanceMode>,
    pub genes: Vec<String>,
}

impl Candidate {
    pub fn new(
        genotypes: TrioGenotypes,
        categories: Vec<Category>,
        modes: Vec<InheritanceMode>,
        genes: Vec<String>,
    ) -> Self {
        Self {
            genotypes,
            categories,
            modes,
            genes,
        }
    }

    pub fn is_cnv(&self) -> bool {
        self.genotypes.is_cnv()
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn has_gene(&self, gene: &str) -> bool {
        self.genes.iter().any(|g| g == gene)
    }
}
