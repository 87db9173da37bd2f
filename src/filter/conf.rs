//! Configuration of the post-inheritance filters.

use serde::{Deserialize, Serialize};

/// Population-frequency INFO keys scanned by default.
pub const DEFAULT_POPULATIONS: &[&str] = &[
    "AFR_AF",
    "AMR_AF",
    "ASN_AF",
    "DDD_AF",
    "EAS_AF",
    "ESP_AF",
    "EUR_AF",
    "MAX_AF",
    "SAS_AF",
    "UK10K_cohort_AF",
];

/// Top-level configuration, fixed for the duration of a run.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(default)]
pub struct FilterConf {
    /// INFO keys holding population allele frequencies.
    pub populations: Vec<String>,
    /// Minor allele frequency ceilings.
    pub maf: MafConf,
    /// Population allele count thresholds.
    pub exac: ExacConf,
    /// CNV quality thresholds.
    pub cnv: CnvConf,
    /// Rule for evaluating compound heterozygous partners.
    pub compound_het_rule: CompoundHetRule,
}

impl Default for FilterConf {
    fn default() -> Self {
        Self {
            populations: DEFAULT_POPULATIONS.iter().map(|s| s.to_string()).collect(),
            maf: Default::default(),
            exac: Default::default(),
            cnv: Default::default(),
            compound_het_rule: Default::default(),
        }
    }
}

impl FilterConf {
    /// Load configuration from the JSON file at `path`, or use defaults.
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file = std::fs::File::open(path)
            .map_err(|e| anyhow::anyhow!("could not open config {}: {}", path, e))?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| anyhow::anyhow!("could not parse config {}: {}", path, e))
    }
}

/// Ceilings on the population allele frequency for non-biallelic modes.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
#[serde(default)]
pub struct MafConf {
    /// Ceiling when both parents were sequenced.
    pub with_parents: f64,
    /// Ceiling for proband-only analysis.
    pub without_parents: f64,
}

impl Default for MafConf {
    fn default() -> Self {
        Self {
            with_parents: 0.001,
            without_parents: 0.0001,
        }
    }
}

/// How comma-separated counts of multi-allelic sites are combined.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum CountAggregation {
    /// Take the largest count.
    #[default]
    Max,
    /// Add up all counts.
    Sum,
}

/// Thresholds on ExAC-style population allele counts.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
#[serde(default)]
pub struct ExacConf {
    /// Largest tolerated `AC_Het` for monoallelic modes.
    pub max_het: u32,
    /// Largest tolerated `AC_Hemi` for inherited hemizygous calls in males.
    pub max_hemi: u32,
    /// Largest tolerated `AC_Het + AC_Hemi` for X-linked dominant modes.
    pub max_x_linked_dominant: u32,
    /// Combination of multi-allelic counts.
    pub aggregation: CountAggregation,
}

impl Default for ExacConf {
    fn default() -> Self {
        Self {
            max_het: 4,
            max_hemi: 0,
            max_x_linked_dominant: 4,
            aggregation: CountAggregation::Max,
        }
    }
}

/// Quality thresholds for CNVs.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
#[serde(default)]
pub struct CnvConf {
    /// Smallest passing ratio of mean log2 ratio and its MAD.
    pub min_mad_ratio: f64,
    /// Whether the MAD ratio is taken as absolute value.
    pub mad_ratio_absolute: bool,
    /// Largest passing internal cohort frequency.
    pub max_internal_frequency: f64,
    /// Caller scores at or below this value fail.
    pub caller_score_threshold: f64,
    /// Largest passing forward-strand-only fraction.
    pub max_common_forwards: f64,
    /// Smallest passing number of overlapped exons.
    pub min_exons: u32,
    /// Largest number of distinct chromosomes with CNVs before all CNVs are
    /// considered noise.
    pub max_chroms: usize,
}

impl Default for CnvConf {
    fn default() -> Self {
        Self {
            min_mad_ratio: 5.0,
            mad_ratio_absolute: true,
            max_internal_frequency: 0.01,
            caller_score_threshold: 7.0,
            max_common_forwards: 0.8,
            min_exons: 1,
            max_chroms: 2,
        }
    }
}

/// Predicate deciding whether a compound heterozygous candidate has a
/// plausible partner in the same gene.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundHetRule {
    /// Match if any other compound het in the gene has a PolyPhen prediction.
    #[default]
    AnnotatedPartner,
    /// Fail if there are other compound hets in the gene but none of them
    /// forms a pair in which neither member is predicted benign.
    BenignPairExclusion,
}
