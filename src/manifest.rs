use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Partition a video belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    Training,
    Validation,
    Testing,
}

impl Subset {
    pub fn as_str(&self) -> &str {
        match self {
            Subset::Training => "training",
            Subset::Validation => "validation",
            Subset::Testing => "testing",
        }
    }

    /// All subsets in the fixed iteration order used during instance
    /// generation (training, then validation, then testing).
    pub fn all() -> [Subset; 3] {
        [Subset::Training, Subset::Validation, Subset::Testing]
    }
}

/// A single annotated activity interval, with start/end given in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub label: String,
    /// `[start, end]` in seconds on the video's duration timeline.
    pub segment: [f64; 2],
}

impl Annotation {
    pub fn start(&self) -> f64 {
        self.segment[0]
    }

    pub fn end(&self) -> f64 {
        self.segment[1]
    }

    /// Length of the annotated interval in seconds.
    pub fn duration(&self) -> f64 {
        self.segment[1] - self.segment[0]
    }
}

/// One manifest entry describing a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoEntry {
    pub url: String,
    pub subset: Subset,
    pub resolution: String,
    /// Video duration in seconds.
    pub duration: f64,
    pub annotations: Vec<Annotation>,
    pub num_frames: usize,
}

/// The full JSON manifest: a mapping from video id to its entry.
///
/// Parsed into a `BTreeMap` so iteration (and therefore video construction)
/// is deterministic by video id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest(pub BTreeMap<String, VideoEntry>);

impl Manifest {
    /// Load and parse a manifest file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manifest = Self::from_str(&contents).map_err(|e| match e {
            Error::ManifestParse { source, .. } => Error::ManifestParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!("Loaded manifest with {} videos from {:?}", manifest.len(), path);
        Ok(manifest)
    }

    /// Parse a manifest from an in-memory JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::ManifestParse {
            path: "<string>".into(),
            source: e,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VideoEntry)> {
        self.0.iter()
    }
}
