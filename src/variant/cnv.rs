//! Copy-number variants and their caller-specific quality checks.

use crate::filter::conf::CnvConf;

use super::Record;

/// INFO key of the mean log2 ratio over the CNV region.
pub const KEY_MEAN_LOG_RATIO: &str = "MEANLR2";
/// INFO key of the median absolute deviation of the log2 ratio.
pub const KEY_MAD_LOG_RATIO: &str = "MADL2R";
/// INFO key of the internal cohort frequency of the CNV region.
pub const KEY_INTERNAL_FREQUENCY: &str = "RC50INTERNALFREQ";
/// INFO key of the CNV caller's confidence score.
pub const KEY_CALLER_SCORE: &str = "CONVEXSCORE";
/// INFO key of the fraction of calls seen on the forward strand only.
pub const KEY_COMMON_FORWARDS: &str = "COMMONFORWARDS";
/// INFO key of the number of overlapped exons.
pub const KEY_NUMBER_EXONS: &str = "NUMBEREXONS";
/// INFO key the derived copy-number state is written to.
pub const KEY_COPY_NUMBER_STATE: &str = "CNS";
/// FORMAT key of the inheritance call for the CNV.
pub const KEY_INHERITANCE: &str = "inheritance";

/// Discrete copy-number state derived from the mean log2 ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CopyNumberState {
    /// Homozygous loss.
    #[strum(serialize = "0")]
    HomozygousLoss,
    /// Heterozygous loss.
    #[strum(serialize = "1")]
    HeterozygousLoss,
    /// Gain.
    #[strum(serialize = "3")]
    Gain,
}

impl CopyNumberState {
    /// Derive the state from the mean log2 ratio.
    pub fn from_log_ratio(mean_log_ratio: f64) -> Self {
        if mean_log_ratio >= 0.0 {
            CopyNumberState::Gain
        } else if mean_log_ratio > -2.0 {
            CopyNumberState::HeterozygousLoss
        } else {
            CopyNumberState::HomozygousLoss
        }
    }
}

/// The quality check that a CNV failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum QualityFailure {
    MadRatio,
    PopulationFrequency,
    CallerScore,
    CommonForwards,
    NoExons,
}

/// Copy-number variant.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cnv {
    #[serde(flatten)]
    pub record: Record,
}

impl Cnv {
    /// Whether the ratio of mean log2 ratio and its MAD is too low.
    ///
    /// A MAD of zero fails.  Missing values pass.
    pub fn fails_mad_ratio(&self, conf: &CnvConf) -> bool {
        let (Some(mean), Some(mad)) = (
            self.record.info_number(KEY_MEAN_LOG_RATIO),
            self.record.info_number(KEY_MAD_LOG_RATIO),
        ) else {
            return false;
        };
        if mad == 0.0 {
            return true;
        }
        let ratio = if conf.mad_ratio_absolute {
            (mean / mad).abs()
        } else {
            mean / mad
        };
        ratio < conf.min_mad_ratio
    }

    /// Whether the CNV region is too common in the internal cohort.
    pub fn fails_population_frequency(&self, conf: &CnvConf) -> bool {
        self.record
            .info_number(KEY_INTERNAL_FREQUENCY)
            .map(|freq| freq > conf.max_internal_frequency)
            .unwrap_or(false)
    }

    /// Whether the caller's confidence score is at or below the threshold.
    pub fn fails_caller_score(&self, conf: &CnvConf) -> bool {
        self.record
            .info_number(KEY_CALLER_SCORE)
            .map(|score| score <= conf.caller_score_threshold)
            .unwrap_or(false)
    }

    /// Whether the CNV is mostly seen on the forward strand only.
    pub fn fails_common_forwards(&self, conf: &CnvConf) -> bool {
        self.record
            .info_number(KEY_COMMON_FORWARDS)
            .map(|frac| frac > conf.max_common_forwards)
            .unwrap_or(false)
    }

    /// Whether the CNV overlaps too few exons.
    pub fn fails_no_exons(&self, conf: &CnvConf) -> bool {
        self.record
            .info_number(KEY_NUMBER_EXONS)
            .map(|exons| exons < conf.min_exons as f64)
            .unwrap_or(false)
    }

    /// Return the first failing quality check, if any.
    pub fn quality_failure(&self, conf: &CnvConf) -> Option<QualityFailure> {
        if self.fails_mad_ratio(conf) {
            Some(QualityFailure::MadRatio)
        } else if self.fails_population_frequency(conf) {
            Some(QualityFailure::PopulationFrequency)
        } else if self.fails_caller_score(conf) {
            Some(QualityFailure::CallerScore)
        } else if self.fails_common_forwards(conf) {
            Some(QualityFailure::CommonForwards)
        } else if self.fails_no_exons(conf) {
            Some(QualityFailure::NoExons)
        } else {
            None
        }
    }

    /// Copy-number state from the mean log2 ratio, `None` if it is missing.
    pub fn cns_state(&self) -> Option<CopyNumberState> {
        self.record
            .info_number(KEY_MEAN_LOG_RATIO)
            .map(CopyNumberState::from_log_ratio)
    }

    /// Write the copy-number state to the INFO fields.
    pub fn add_cns_state(&mut self) {
        if let Some(state) = self.cns_state() {
            self.record
                .info
                .insert(KEY_COPY_NUMBER_STATE.to_string(), state.to_string());
        }
    }

    /// Whether the CNV was called as de novo.
    pub fn is_de_novo(&self) -> bool {
        self.record
            .format
            .get(KEY_INHERITANCE)
            .map(|inheritance| inheritance == "deNovo")
            .unwrap_or(false)
    }
}
