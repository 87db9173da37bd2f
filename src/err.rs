//! Error types of the input layer.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PedError {
    #[error("PED line has {0} columns, expected at least 6: {1:?}")]
    TooFewColumns(usize, String),
    #[error("unknown sex code: {0:?}")]
    UnknownSex(String),
    #[error("unknown affected status: {0:?}, should be 1 = unaffected, 2 = affected")]
    UnknownAffected(String),
    #[error("{id} is listed as {sex}, which differs from that expected as {role}")]
    ParentSexMismatch {
        id: String,
        sex: String,
        role: &'static str,
    },
    #[error("no proband found in PED file")]
    NoProband,
    #[error("proband {0:?} not found in PED file")]
    UnknownProband(String),
    #[error("PED file lists {0} probands, select one explicitly")]
    AmbiguousProband(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid INFO entry in {0:?}")]
    InvalidInfo(String),
    #[error("FORMAT has {0} keys but sample has {1} values")]
    FormatMismatch(usize, usize),
}
