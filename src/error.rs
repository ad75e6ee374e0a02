/// Run-aborting failures. Anything not listed here is either recovered
/// per item (logged and skipped) or reported as `INTERNAL`.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("cannot read token file {path}: {reason}")]
    Credentials { path: String, reason: String },
    #[error("cannot load affiliation dataset from {source_ref}: {reason}")]
    Dataset { source_ref: String, reason: String },
    #[error("cannot load descriptor {source_ref}: {reason}")]
    Descriptor { source_ref: String, reason: String },
    #[error("cannot write report {path}: {reason}")]
    Output { path: String, reason: String },
    #[error("invalid input: {0}")]
    Input(String),
}

impl ReportError {
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Credentials { .. } => "CREDENTIALS",
            ReportError::Dataset { .. } => "DATASET",
            ReportError::Descriptor { .. } => "DESCRIPTOR",
            ReportError::Output { .. } => "OUTPUT",
            ReportError::Input(_) => "INPUT",
        }
    }
}

/// Machine code for an arbitrary error chain.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|e| e.downcast_ref::<ReportError>())
        .map(ReportError::code)
        .unwrap_or("INTERNAL")
}
