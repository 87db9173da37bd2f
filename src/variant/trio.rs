//! Genotypes of a variant in the proband and, if sequenced, the parents.

use crate::common::{canonicalize, Genotype};

use super::Variant;

/// One variant site with the calls of child, mother, and father.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrioGenotypes {
    /// Chromosome of the site.
    pub chrom: String,
    /// Position of the site.
    pub pos: u64,
    /// Call in the proband.
    pub child: Variant,
    /// Call in the mother, absent for proband-only analysis.
    #[serde(default)]
    pub mother: Option<Variant>,
    /// Call in the father, absent for proband-only analysis.
    #[serde(default)]
    pub father: Option<Variant>,
}

impl TrioGenotypes {
    /// Construct from the child's call; chromosome and position are taken from it.
    pub fn new(child: Variant, mother: Option<Variant>, father: Option<Variant>) -> Self {
        Self {
            chrom: child.record().chrom.clone(),
            pos: child.record().pos,
            child,
            mother,
            father,
        }
    }

    /// Whether the site is a CNV.
    pub fn is_cnv(&self) -> bool {
        self.child.is_cnv()
    }

    /// Canonical chromosome name of the site.
    pub fn canonical_chrom(&self) -> String {
        canonicalize(&self.chrom)
    }

    /// Whether both trio calls describe the same allele at the same site.
    pub fn same_site(&self, other: &TrioGenotypes) -> bool {
        let (lhs, rhs) = (self.child.record(), other.child.record());
        canonicalize(&lhs.chrom) == canonicalize(&rhs.chrom)
            && lhs.pos == rhs.pos
            && lhs.reference == rhs.reference
            && lhs.alternative == rhs.alternative
    }

    /// Whether the child's allele is absent from both parents.
    ///
    /// CNVs use the caller's inheritance call.  For SNVs both parents must
    /// have been sequenced and be homozygous reference while the child
    /// carries the alternate allele.
    pub fn is_de_novo(&self) -> bool {
        match &self.child {
            Variant::Cnv(cnv) => cnv.is_de_novo(),
            Variant::Snv(snv) => {
                let (Some(mother), Some(father)) = (&self.mother, &self.father) else {
                    return false;
                };
                snv.record.genotype().is_variant()
                    && mother.record().genotype() == Genotype::HomRef
                    && father.record().genotype() == Genotype::HomRef
            }
        }
    }
}
