use crate::manifest::Subset;
use crate::video::Video;

/// Video counts, total and per subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCounts {
    pub total: usize,
    pub training: usize,
    pub validation: usize,
    pub testing: usize,
}

/// Label vocabulary counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCounts {
    pub total: usize,
    /// The label table is a flat list, so every entry is a leaf.
    pub leaf_nodes: usize,
}

/// Descriptive summary of the dataset contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStats {
    pub videos: VideoCounts,
    pub labels: LabelCounts,
}

impl DatasetStats {
    /// Count videos by subset and record the label vocabulary size.
    pub fn collect(videos: &[Video], label_total: usize) -> Self {
        let count = |subset: Subset| videos.iter().filter(|v| v.subset == subset).count();
        Self {
            videos: VideoCounts {
                total: videos.len(),
                training: count(Subset::Training),
                validation: count(Subset::Validation),
                testing: count(Subset::Testing),
            },
            labels: LabelCounts {
                total: label_total,
                leaf_nodes: label_total,
            },
        }
    }
}
