use std::path::PathBuf;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors that can occur while loading a dataset or generating instances.
///
/// File and parse failures carry the offending path so callers can report
/// which of the two input files (manifest or label table) was at fault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read an input file from disk.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON manifest did not match the expected schema.
    #[error("failed to parse manifest {path:?}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A line of the tab-separated label file could not be parsed.
    #[error("label file {path:?}, line {line}: {reason}")]
    LabelParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The label table has no `none` entry, so window outputs that fall
    /// below the majority threshold would have nothing to resolve to.
    #[error("label table has no 'none' entry; instance outputs cannot fall back")]
    MissingNoneLabel,

    /// A label name was looked up that does not exist in the label table.
    #[error("unknown label: {0:?}")]
    UnknownLabel(String),

    /// Overlap fraction outside the valid `[0, 1)` range.
    #[error("overlap must be in [0, 1), got {0}")]
    OverlapOutOfRange(f64),

    /// The overlap covers every frame of the window, leaving a zero stride.
    #[error("overlap {overlap} covers all {length} frames of the window")]
    DegenerateOverlap { overlap: f64, length: usize },

    /// Class weights were requested before any training instances exist.
    #[error("class weights require generated training instances")]
    NoTrainingInstances,
}
