mod class_weights;
mod stats;

pub use class_weights::compute_class_weights;
pub use stats::{DatasetStats, LabelCounts, VideoCounts};
