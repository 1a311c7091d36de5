use std::path::PathBuf;

/// Fatal errors that stop a run (or, in directory mode, one file's
/// contribution to it).
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error("input path not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("cannot detect input format of '{}' (expected .evtx or .jsonl, use --format to override)", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("directory '{}' contains none of the {profile} log files", path.display())]
    EmptyDirectory { path: PathBuf, profile: String },

    #[error("failed to open '{}': {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: Box<evtx::err::EvtxError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write output row: {0}")]
    Output(#[from] csv::Error),
}

/// Per-record errors. A record that fails to decode is reported and
/// skipped; the run continues.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed evtx record: {0}")]
    Evtx(#[from] Box<evtx::err::EvtxError>),

    #[error("malformed JSONL line: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record payload has no System block")]
    MissingSystem,

    #[error("record payload has no usable EventID")]
    MissingEventId,
}
