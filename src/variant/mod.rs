//! Code for representing annotated variants as seen by the filters.
//!
//! Both SNVs and CNVs share the annotated `Record`; CNV-only quality checks
//! live in `cnv`.

use indexmap::IndexMap;

use crate::common::{parse_numeric_list, Genotype};
use crate::err::InputError;

pub mod cnv;
pub mod consequence;
pub mod trio;

pub use cnv::Cnv;
pub use trio::TrioGenotypes;

/// Delimiter between per-gene/per-transcript values in INFO fields.
pub const MULTI_VALUE_DELIMITER: char = '|';

/// INFO key holding the HGNC gene symbols.
pub const KEY_GENE: &str = "HGNC";
/// INFO key holding the VEP consequences.
pub const KEY_CONSEQUENCE: &str = "CQ";
/// INFO key holding the PolyPhen predictions.
pub const KEY_POLYPHEN: &str = "PolyPhen";
/// FORMAT key holding the genotype.
pub const KEY_GENOTYPE: &str = "GT";

/// Gene symbol written by the annotation for non-HGNC genes.
const NO_SYMBOL: &str = ".";

/// An annotated VCF record for one sample.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    /// Chromosome name.
    pub chrom: String,
    /// 1-based position.
    pub pos: u64,
    /// Variant identifier, `.` if none.
    #[serde(default)]
    pub id: String,
    /// Reference allele.
    pub reference: String,
    /// Alternate allele(s).
    pub alternative: String,
    /// Variant quality.
    #[serde(default)]
    pub quality: Option<f32>,
    /// Filter status, e.g., `PASS`.
    #[serde(default)]
    pub filter: String,
    /// INFO fields; flags have an empty value.
    #[serde(default)]
    pub info: IndexMap<String, String>,
    /// FORMAT fields of the sample.
    #[serde(default)]
    pub format: IndexMap<String, String>,
}

impl Record {
    pub fn new(chrom: &str, pos: u64, reference: &str, alternative: &str) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            id: ".".to_string(),
            reference: reference.to_string(),
            alternative: alternative.to_string(),
            quality: None,
            filter: "PASS".to_string(),
            info: IndexMap::new(),
            format: IndexMap::new(),
        }
    }

    /// Replace the INFO fields by parsing a raw `KEY=VALUE;FLAG` string.
    pub fn with_info(mut self, raw: &str) -> Result<Self, InputError> {
        self.info = parse_info(raw)?;
        Ok(self)
    }

    /// Replace the FORMAT fields from `GT:DP`-style keys and values.
    pub fn with_format(mut self, keys: &str, values: &str) -> Result<Self, InputError> {
        let keys = keys.split(':').collect::<Vec<_>>();
        let values = values.split(':').collect::<Vec<_>>();
        if keys.len() != values.len() {
            return Err(InputError::FormatMismatch(keys.len(), values.len()));
        }
        self.format = keys
            .into_iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Ok(self)
    }

    /// Raw INFO value for `key`.
    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    /// Maximal numeric value of the comma-separated INFO value for `key`.
    pub fn info_number(&self, key: &str) -> Option<f64> {
        self.info_value(key).and_then(parse_numeric_list)
    }

    /// Parsed genotype of the sample; no-call if missing or malformed.
    pub fn genotype(&self) -> Genotype {
        self.format
            .get(KEY_GENOTYPE)
            .and_then(|gt| gt.parse().ok())
            .unwrap_or(Genotype::WithNoCall)
    }

    /// Gene symbols from the annotation, `None` if the record has none.
    ///
    /// Placeholder symbols for non-HGNC genes become empty strings so that
    /// the list stays aligned with the consequences.
    pub fn gene_from_annotation(&self) -> Option<Vec<String>> {
        self.split_info(KEY_GENE).map(|genes| {
            genes
                .into_iter()
                .map(|g| if g == NO_SYMBOL { String::new() } else { g })
                .collect()
        })
    }

    /// Consequences from the annotation, one per gene/transcript.
    pub fn consequence(&self) -> Option<Vec<String>> {
        self.split_info(KEY_CONSEQUENCE)
    }

    fn split_info(&self, key: &str) -> Option<Vec<String>> {
        self.info_value(key).map(|value| {
            value
                .split(MULTI_VALUE_DELIMITER)
                .map(|s| s.to_string())
                .collect()
        })
    }

    /// Consequences of the given gene, or all consequences for `None`.
    ///
    /// The empty symbol is a valid key and matches the non-HGNC entries.
    pub fn consequences_for_gene(&self, gene: Option<&str>) -> Vec<String> {
        let consequences = self.consequence().unwrap_or_default();
        let Some(gene) = gene else {
            return consequences;
        };
        let Some(genes) = self.gene_from_annotation() else {
            return Vec::new();
        };
        genes
            .iter()
            .zip(consequences)
            .filter(|(g, _)| g.as_str() == gene)
            .map(|(_, csq)| csq)
            .collect()
    }

    /// Whether any consequence (of `gene`, if given) is loss-of-function.
    pub fn is_loss_of_function(&self, gene: Option<&str>) -> bool {
        if self.consequence().is_none() {
            return false;
        }
        self.consequences_for_gene(gene)
            .iter()
            .any(|csq| consequence::is_lof_term(csq))
    }

    /// Most severe consequence over all genes.
    pub fn most_severe_consequence(&self) -> Option<String> {
        self.consequence()
            .and_then(|csqs| consequence::most_severe(csqs.as_slice()).map(|s| s.to_string()))
    }

    /// Maximal population frequency over the given INFO keys.
    ///
    /// Returns `None` if no key is present or none has a numeric value.
    pub fn max_population_frequency<S: AsRef<str>>(&self, populations: &[S]) -> Option<f64> {
        populations
            .iter()
            .filter_map(|key| self.info_number(key.as_ref()))
            .fold(None, |acc, value| match acc {
                Some(prev) if prev >= value => Some(prev),
                _ => Some(value),
            })
    }
}

/// Parse a raw VCF INFO column.
pub fn parse_info(raw: &str) -> Result<IndexMap<String, String>, InputError> {
    let mut result = IndexMap::new();
    if raw == "." || raw.is_empty() {
        return Ok(result);
    }
    for entry in raw.split(';').filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some(("", _)) => return Err(InputError::InvalidInfo(raw.to_string())),
            Some((key, value)) => result.insert(key.to_string(), value.to_string()),
            None => result.insert(entry.to_string(), String::new()),
        };
    }
    Ok(result)
}

/// Single-nucleotide or short indel variant.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snv {
    #[serde(flatten)]
    pub record: Record,
    /// Multi-nucleotide variant code if the call is part of an MNV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnv_code: Option<String>,
}

/// A variant of one sample, either SNV or CNV.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Variant {
    Snv(Snv),
    Cnv(Cnv),
}

impl Variant {
    /// Construct an SNV from its record.
    pub fn snv(record: Record) -> Self {
        Variant::Snv(Snv {
            record,
            mnv_code: None,
        })
    }

    /// Construct a CNV from its record.
    pub fn cnv(record: Record) -> Self {
        Variant::Cnv(Cnv { record })
    }

    pub fn record(&self) -> &Record {
        match self {
            Variant::Snv(snv) => &snv.record,
            Variant::Cnv(cnv) => &cnv.record,
        }
    }

    pub fn record_mut(&mut self) -> &mut Record {
        match self {
            Variant::Snv(snv) => &mut snv.record,
            Variant::Cnv(cnv) => &mut cnv.record,
        }
    }

    pub fn is_cnv(&self) -> bool {
        matches!(self, Variant::Cnv(_))
    }

    pub fn as_cnv_mut(&mut self) -> Option<&mut Cnv> {
        match self {
            Variant::Cnv(cnv) => Some(cnv),
            Variant::Snv(_) => None,
        }
    }

    /// MNV code, only ever set for SNVs.
    pub fn mnv_code(&self) -> Option<&str> {
        match self {
            Variant::Snv(snv) => snv.mnv_code.as_deref(),
            Variant::Cnv(_) => None,
        }
    }
}
