use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use tracing::{debug, info};

use crate::analysis::{self, DatasetStats};
use crate::error::{Error, Result};
use crate::instance::{Instance, InstanceParams};
use crate::labels::{LabelResolver, LabelTable};
use crate::manifest::{Manifest, Subset};
use crate::video::Video;

/// Optional knobs for locating stored video files on disk.
///
/// The windowing logic never touches the files; the resolved paths are only
/// carried on each [`Video`] for downstream frame loaders.
#[derive(Debug, Clone, Default)]
pub struct DatasetConfig {
    /// Directory holding the downloaded video files.
    pub stored_videos_path: Option<PathBuf>,
    /// File extension of the stored videos (default `mp4`).
    pub files_extension: Option<String>,
}

/// Progress events emitted during instance generation. Advisory only; the
/// generation itself is synchronous and sends on the calling thread.
#[derive(Debug, Clone)]
pub enum GenerateProgress {
    Progress { current: usize, total: usize },
    Complete { total: usize },
}

/// The ActivityNet dataset: label vocabulary, the full video collection,
/// and the per-subset instance lists produced by `generate_instances`.
pub struct VideoDataset {
    labels: LabelTable,
    videos: Vec<Video>,
    instances_training: Vec<Instance>,
    instances_validation: Vec<Instance>,
    instances_testing: Vec<Instance>,
    class_weights: Option<BTreeMap<usize, f64>>,
    generation_params: Option<InstanceParams>,
}

impl VideoDataset {
    /// Manifest revision this loader targets.
    pub const VERSION: &'static str = "v1.3_cleaned";

    /// Load a dataset from a JSON manifest and a tab-separated label file.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(manifest_path: P, labels_path: Q) -> Result<Self> {
        Self::load_with_config(manifest_path, labels_path, DatasetConfig::default())
    }

    /// Load a dataset, resolving stored-video paths per the config.
    pub fn load_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
        manifest_path: P,
        labels_path: Q,
        config: DatasetConfig,
    ) -> Result<Self> {
        let manifest = Manifest::load(manifest_path)?;
        let labels = LabelTable::load(labels_path)?;
        Self::new(manifest, labels, config)
    }

    /// Build a dataset from already-parsed inputs.
    ///
    /// Eagerly materializes one [`Video`] per manifest entry. Fails with
    /// [`Error::MissingNoneLabel`] if the label table has no `none` entry,
    /// since window outputs below the majority threshold resolve to it.
    pub fn new(manifest: Manifest, labels: LabelTable, config: DatasetConfig) -> Result<Self> {
        if !labels.contains("none") {
            return Err(Error::MissingNoneLabel);
        }

        let extension = config.files_extension.unwrap_or_else(|| "mp4".to_string());
        let videos: Vec<Video> = manifest
            .0
            .into_iter()
            .map(|(video_id, entry)| {
                let path = config
                    .stored_videos_path
                    .as_ref()
                    .map(|root| root.join(format!("{}.{}", video_id, extension)));
                Video::from_entry(&video_id, entry, path)
            })
            .collect();

        info!(
            "Dataset ready: {} videos, {} labels",
            videos.len(),
            labels.len()
        );

        Ok(Self {
            labels,
            videos,
            instances_training: Vec::new(),
            instances_validation: Vec::new(),
            instances_testing: Vec::new(),
            class_weights: None,
            generation_params: None,
        })
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// Label names, in file order.
    pub fn get_labels(&self) -> Vec<&str> {
        self.labels.names()
    }

    /// Declared label indices, in file order.
    pub fn get_labels_indx(&self) -> Vec<usize> {
        self.labels.declared_indices()
    }

    /// Videos belonging to the given subset.
    pub fn get_subset_videos(&self, subset: Subset) -> Vec<&Video> {
        self.videos.iter().filter(|v| v.subset == subset).collect()
    }

    /// Videos whose derived label matches the given name.
    pub fn get_videos_from_label(&self, label: &str) -> Vec<&Video> {
        self.videos
            .iter()
            .filter(|v| v.label() == Some(label))
            .collect()
    }

    /// Sum of all video durations, in seconds.
    pub fn get_total_duration(&self) -> f64 {
        self.videos.iter().map(|v| v.duration).sum()
    }

    /// Sum of annotated time across all videos, or across the videos of one
    /// activity. Overlapping segments within a video are counted twice.
    pub fn get_activity_duration(&self, activity: Option<&str>) -> f64 {
        match activity {
            Some(label) => self
                .get_videos_from_label(label)
                .iter()
                .map(|v| v.get_activity_duration())
                .sum(),
            None => self.videos.iter().map(|v| v.get_activity_duration()).sum(),
        }
    }

    /// Descriptive counts of videos (by subset) and labels.
    pub fn get_stats(&self) -> DatasetStats {
        DatasetStats::collect(&self.videos, self.labels.len())
    }

    pub fn instances_training(&self) -> &[Instance] {
        &self.instances_training
    }

    pub fn instances_validation(&self) -> &[Instance] {
        &self.instances_validation
    }

    pub fn instances_testing(&self) -> &[Instance] {
        &self.instances_testing
    }

    /// All generated instances: training, then validation, then testing.
    pub fn instances(&self) -> Vec<&Instance> {
        self.instances_training
            .iter()
            .chain(self.instances_validation.iter())
            .chain(self.instances_testing.iter())
            .collect()
    }

    /// Parameters of the most recent `generate_instances` call.
    pub fn generation_params(&self) -> Option<&InstanceParams> {
        self.generation_params.as_ref()
    }

    /// Slice every video into labeled instances, replacing all three subset
    /// lists.
    pub fn generate_instances(&mut self, params: &InstanceParams) -> Result<()> {
        self.generate_instances_with_progress(params, None)
    }

    /// Same as [`VideoDataset::generate_instances`], with advisory progress
    /// events sent every 100 videos and on completion.
    ///
    /// Parameters are validated before any state is touched, so a bad
    /// overlap leaves previously generated instances intact. Videos are
    /// processed grouped by subset, training first, then validation, then
    /// testing.
    pub fn generate_instances_with_progress(
        &mut self,
        params: &InstanceParams,
        progress_tx: Option<Sender<GenerateProgress>>,
    ) -> Result<()> {
        // Validate the stride before clearing anything
        params.stride()?;

        self.instances_training.clear();
        self.instances_validation.clear();
        self.instances_testing.clear();

        let total = self.videos.len();
        info!(
            "Generating instances for {} videos (length {}, overlap {})",
            total, params.length, params.overlap
        );

        let mut count = 0;
        for subset in Subset::all() {
            for video in self.videos.iter().filter(|v| v.subset == subset) {
                let mut generated = video.get_video_instances(params, &self.labels)?;
                match subset {
                    Subset::Training => self.instances_training.append(&mut generated),
                    Subset::Validation => self.instances_validation.append(&mut generated),
                    Subset::Testing => self.instances_testing.append(&mut generated),
                }

                count += 1;
                if count % 100 == 0 {
                    debug!("Processed {}/{} videos", count, total);
                    if let Some(ref tx) = progress_tx {
                        let _ = tx.send(GenerateProgress::Progress {
                            current: count,
                            total,
                        });
                    }
                }
            }
        }

        info!(
            "Generated {} training, {} validation, {} testing instances",
            self.instances_training.len(),
            self.instances_validation.len(),
            self.instances_testing.len()
        );
        if let Some(tx) = progress_tx {
            let _ = tx.send(GenerateProgress::Complete { total });
        }

        self.generation_params = Some(params.clone());
        Ok(())
    }

    /// Complement-of-frequency class weights over the training instances.
    ///
    /// Computed once and cached; later calls log the short-circuit and
    /// return the cached map, even after regeneration. Fails if no training
    /// instances have been generated yet.
    pub fn compute_class_weights(&mut self) -> Result<&BTreeMap<usize, f64>> {
        if self.class_weights.is_some() {
            info!("Class weights already computed");
        } else {
            if self.instances_training.is_empty() {
                return Err(Error::NoTrainingInstances);
            }
            let weights = analysis::compute_class_weights(&self.instances_training, &self.labels);
            info!(
                "Computed class weights for {} labels from {} training instances",
                weights.len(),
                self.instances_training.len()
            );
            self.class_weights = Some(weights);
        }
        Ok(self
            .class_weights
            .as_ref()
            .expect("class weights just computed"))
    }

    /// The cached class-weight map, if computed.
    pub fn class_weights(&self) -> Option<&BTreeMap<usize, f64>> {
        self.class_weights.as_ref()
    }
}

impl LabelResolver for VideoDataset {
    fn get_output_index(&self, label: &str) -> Result<usize> {
        self.labels.get_output_index(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Annotation, VideoEntry};

    fn test_entry(subset: Subset, num_frames: usize, annotations: Vec<Annotation>) -> VideoEntry {
        VideoEntry {
            url: String::new(),
            subset,
            resolution: "1280x720".to_string(),
            duration: num_frames as f64 / 10.0, // 10 fps
            annotations,
            num_frames,
        }
    }

    fn annotation(label: &str, start: f64, end: f64) -> Annotation {
        Annotation {
            label: label.to_string(),
            segment: [start, end],
        }
    }

    fn create_test_dataset() -> VideoDataset {
        // 10 videos: 6 training, 2 validation, 2 testing
        let mut map = std::collections::BTreeMap::new();
        for i in 0..6 {
            map.insert(
                format!("v_train_{}", i),
                test_entry(
                    Subset::Training,
                    100,
                    vec![annotation("Diving", 0.0, 10.0)],
                ),
            );
        }
        for i in 0..2 {
            map.insert(
                format!("v_val_{}", i),
                test_entry(
                    Subset::Validation,
                    100,
                    vec![annotation("Long jump", 2.0, 8.0)],
                ),
            );
        }
        for i in 0..2 {
            map.insert(
                format!("v_test_{}", i),
                test_entry(Subset::Testing, 100, vec![]),
            );
        }

        let labels =
            LabelTable::from_str("0\tnone\n1\tDiving\n2\tLong jump\n3\tSwimming\n4\tArchery\n")
                .unwrap();

        VideoDataset::new(Manifest(map), labels, DatasetConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_none_label_is_rejected() {
        let labels = LabelTable::from_str("0\tDiving\n").unwrap();
        let result = VideoDataset::new(
            Manifest(std::collections::BTreeMap::new()),
            labels,
            DatasetConfig::default(),
        );
        assert!(matches!(result, Err(Error::MissingNoneLabel)));
    }

    #[test]
    fn test_stats() {
        let dataset = create_test_dataset();
        let stats = dataset.get_stats();
        assert_eq!(stats.videos.total, 10);
        assert_eq!(stats.videos.training, 6);
        assert_eq!(stats.videos.validation, 2);
        assert_eq!(stats.videos.testing, 2);
        assert_eq!(stats.labels.total, 5);
        assert_eq!(stats.labels.leaf_nodes, 5);
        assert_eq!(dataset.num_classes(), 5);
    }

    #[test]
    fn test_subset_and_label_queries() {
        let dataset = create_test_dataset();
        assert_eq!(dataset.get_subset_videos(Subset::Training).len(), 6);
        assert_eq!(dataset.get_subset_videos(Subset::Validation).len(), 2);
        assert_eq!(dataset.get_videos_from_label("Diving").len(), 6);
        assert_eq!(dataset.get_videos_from_label("Swimming").len(), 0);
    }

    #[test]
    fn test_durations() {
        let dataset = create_test_dataset();
        // 10 videos of 10s each
        assert_eq!(dataset.get_total_duration(), 100.0);
        // 6 training videos with a 10s segment + 2 validation with 6s
        assert_eq!(dataset.get_activity_duration(None), 72.0);
        assert_eq!(dataset.get_activity_duration(Some("Long jump")), 12.0);
    }

    #[test]
    fn test_generate_populates_all_subsets() {
        let mut dataset = create_test_dataset();
        dataset
            .generate_instances(&InstanceParams::default())
            .unwrap();

        // length 16, stride 16, starts strictly below 100-16 = 84: 6 per video
        assert_eq!(dataset.instances_training().len(), 6 * 6);
        assert_eq!(dataset.instances_validation().len(), 2 * 6);
        assert_eq!(dataset.instances_testing().len(), 2 * 6);
        assert_eq!(dataset.instances().len(), 60);

        // Unlabeled testing videos keep unresolved outputs
        assert!(dataset
            .instances_testing()
            .iter()
            .all(|ins| ins.output.is_none()));
    }

    #[test]
    fn test_regenerate_replaces_instances() {
        let mut dataset = create_test_dataset();
        dataset
            .generate_instances(&InstanceParams::default().length(16))
            .unwrap();
        let first_count = dataset.instances().len();
        assert_eq!(first_count, 60);

        dataset
            .generate_instances(&InstanceParams::default().length(32))
            .unwrap();
        // length 32, stride 32, starts strictly below 68: 3 per video
        assert_eq!(dataset.instances().len(), 30);
        assert_eq!(dataset.generation_params().unwrap().length, 32);
    }

    #[test]
    fn test_generate_with_bad_overlap_keeps_previous_instances() {
        let mut dataset = create_test_dataset();
        dataset
            .generate_instances(&InstanceParams::default())
            .unwrap();

        let result = dataset.generate_instances(&InstanceParams::default().overlap(1.5));
        assert!(matches!(result, Err(Error::OverlapOutOfRange(_))));
        assert_eq!(dataset.instances().len(), 60);
    }

    #[test]
    fn test_progress_events() {
        let mut dataset = create_test_dataset();
        let (tx, rx) = std::sync::mpsc::channel();
        dataset
            .generate_instances_with_progress(&InstanceParams::default(), Some(tx))
            .unwrap();

        let events: Vec<GenerateProgress> = rx.iter().collect();
        // 10 videos: no 100-video checkpoint, just the completion event
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GenerateProgress::Complete { total: 10 }));
    }

    #[test]
    fn test_class_weights_require_training_instances() {
        let mut dataset = create_test_dataset();
        let result = dataset.compute_class_weights();
        assert!(matches!(result, Err(Error::NoTrainingInstances)));
    }

    #[test]
    fn test_class_weights_are_memoized() {
        let mut dataset = create_test_dataset();
        dataset
            .generate_instances(&InstanceParams::default())
            .unwrap();

        let first = dataset.compute_class_weights().unwrap().clone();
        // All 36 training instances resolve to Diving (declared index 1)
        assert_eq!(first[&1], 0.0);
        assert_eq!(first[&0], 1.0);
        assert_eq!(first[&3], 1.0);

        // Regeneration does not invalidate the memo
        dataset
            .generate_instances(&InstanceParams::default().length(32))
            .unwrap();
        let second = dataset.compute_class_weights().unwrap();
        assert_eq!(*second, first);
    }

    #[test]
    fn test_stored_video_paths() {
        let labels = LabelTable::from_str("0\tnone\n").unwrap();
        let mut map = std::collections::BTreeMap::new();
        map.insert(
            "v_abc".to_string(),
            test_entry(Subset::Training, 100, vec![]),
        );
        let config = DatasetConfig {
            stored_videos_path: Some(PathBuf::from("/data/videos")),
            files_extension: Some("mkv".to_string()),
        };
        let dataset = VideoDataset::new(Manifest(map), labels, config).unwrap();
        assert_eq!(
            dataset.videos()[0].path,
            Some(PathBuf::from("/data/videos/v_abc.mkv"))
        );
    }
}
