use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// One line of the label file: a declared numeric index and a label name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    /// The integer index declared in the file. Not necessarily the entry's
    /// position in the table.
    pub index: usize,
    pub name: String,
}

/// The label vocabulary, in file order.
///
/// Uniqueness of names and declared indices is not enforced; the table keeps
/// whatever the file says.
#[derive(Debug, Clone)]
pub struct LabelTable {
    entries: Vec<LabelEntry>,
}

/// Resolve a label name to the output index stored on generated instances.
///
/// This is the only capability the windowing algorithm needs from the
/// dataset, so it is factored out as a trait seam.
pub trait LabelResolver {
    fn get_output_index(&self, label: &str) -> Result<usize>;
}

impl LabelTable {
    /// Load a tab-separated label file (`<index>\t<name>` per line).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table = Self::parse(&contents, path)?;
        info!("Loaded {} labels from {:?}", table.len(), path);
        Ok(table)
    }

    /// Parse label lines from an in-memory string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        Self::parse(contents, Path::new("<string>"))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split('\t');
            let index_str = parts.next().unwrap_or("");
            let name = parts.next().ok_or_else(|| Error::LabelParse {
                path: path.to_path_buf(),
                line: line_no + 1,
                reason: "expected <index>\\t<name>".to_string(),
            })?;
            let index: usize = index_str.parse().map_err(|e| Error::LabelParse {
                path: path.to_path_buf(),
                line: line_no + 1,
                reason: format!("invalid index {:?}: {}", index_str, e),
            })?;
            entries.push(LabelEntry {
                index,
                name: name.to_string(),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    /// Label names, in file order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Declared integer indices, in file order.
    pub fn declared_indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }

    /// Whether a label with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

impl LabelResolver for LabelTable {
    /// Position of the first entry with the given name.
    ///
    /// Note this is the entry's *position* in the table, not its declared
    /// numeric index. The two coincide only when the label file is sorted
    /// and contiguous from 0, which the shipped ActivityNet label file is.
    fn get_output_index(&self, label: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.name == label)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }
}
