use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or reading a schedule source.
///
/// Per-row problems are not errors: backends log them at warn level and
/// keep going. `AmbiguousSource` and `NoSource` are the fatal
/// initialization class - no run can start without exactly one source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot read schedule source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed schedule source {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    #[error("Multiple cue sheets found in {dir}: {}. Remove or move all but one.", .candidates.join(", "))]
    AmbiguousSource { dir: String, candidates: Vec<String> },

    #[error("No schedule source found in {dir}. Provide a cue sheet or an explicit schedule path.")]
    NoSource { dir: String },

    #[error("Unknown source kind: {0} (expected table, keyvalue, timelist, or calendar)")]
    UnknownKind(String),

    #[error("Calendar source requires a configured identity")]
    MissingIdentity,
}

pub type Result<T> = std::result::Result<T, SourceError>;
