//! Loader for the ActivityNet video-activity-recognition dataset.
//!
//! Reads a JSON manifest and a tab-separated label file, then slices each
//! video's frame timeline into fixed-length, optionally-overlapping
//! training/validation/testing instances with per-frame activity labels.
//! Class weights for imbalanced-class training are derived from the
//! generated training instances.
//!
//! ```no_run
//! use activitynet_dataset::{InstanceParams, VideoDataset};
//!
//! # fn main() -> activitynet_dataset::Result<()> {
//! let mut dataset = VideoDataset::load("activity_net.v1-3.json", "labels.txt")?;
//! dataset.generate_instances(&InstanceParams::default().length(16).overlap(0.5))?;
//! let weights = dataset.compute_class_weights()?;
//! println!("{:?}", weights);
//! println!("{} training instances", dataset.instances_training().len());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod instance;
pub mod labels;
pub mod logging;
pub mod manifest;
pub mod video;

pub use analysis::{compute_class_weights, DatasetStats, LabelCounts, VideoCounts};
pub use dataset::{DatasetConfig, GenerateProgress, VideoDataset};
pub use error::{Error, Result};
pub use instance::{Instance, InstanceParams};
pub use labels::{LabelEntry, LabelResolver, LabelTable};
pub use manifest::{Annotation, Manifest, Subset, VideoEntry};
pub use video::Video;
