use std::path::PathBuf;

use crate::error::Result;
use crate::instance::{Instance, InstanceParams};
use crate::labels::LabelResolver;
use crate::manifest::{Annotation, Subset, VideoEntry};

/// A video from the dataset, immutable after construction.
///
/// Carries the manifest metadata plus a derived single label: the first
/// annotation's label, or `None` for videos without annotations.
#[derive(Debug, Clone)]
pub struct Video {
    pub video_id: String,
    pub url: String,
    pub subset: Subset,
    pub resolution: String,
    /// Duration in seconds.
    pub duration: f64,
    pub num_frames: usize,
    pub annotations: Vec<Annotation>,
    /// Where the stored video file lives, when a storage root is configured.
    pub path: Option<PathBuf>,
    label: Option<String>,
}

impl Video {
    /// Build a video from its manifest entry.
    pub fn from_entry(video_id: &str, entry: VideoEntry, path: Option<PathBuf>) -> Self {
        let label = entry.annotations.first().map(|a| a.label.clone());
        Self {
            video_id: video_id.to_string(),
            url: entry.url,
            subset: entry.subset,
            resolution: entry.resolution,
            duration: entry.duration,
            num_frames: entry.num_frames,
            annotations: entry.annotations,
            path,
            label,
        }
    }

    /// The video's single activity label (first annotation), if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Alias for [`Video::label`], matching the dataset's query vocabulary.
    pub fn get_activity(&self) -> Option<&str> {
        self.label()
    }

    /// Total annotated time: the sum of segment lengths. Segments may
    /// overlap, so this can exceed the video's own duration.
    pub fn get_activity_duration(&self) -> f64 {
        self.annotations.iter().map(|a| a.duration()).sum()
    }

    /// Per-frame activity mask: frame `i` is active iff its temporal
    /// position `i / num_frames * duration` falls strictly inside any
    /// annotation segment. Boundary ties are excluded on both sides.
    fn frame_activity_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.num_frames];
        for (i, active) in mask.iter_mut().enumerate() {
            let t = i as f64 / self.num_frames as f64 * self.duration;
            *active = self
                .annotations
                .iter()
                .any(|a| t > a.start() && t < a.end());
        }
        mask
    }

    /// Slice the video's frame timeline into fixed-length windows.
    ///
    /// Candidate start frames run `0, stride, 2*stride, ...` strictly below
    /// `num_frames - length`, so the last window always fits. For a labeled
    /// video, a window whose active-frame count reaches at least half the
    /// window length resolves to the label's output index, and to the
    /// `none` index otherwise; ties at exactly half count as present. An
    /// unlabeled video yields `output = None` for every window.
    pub fn get_video_instances<R: LabelResolver>(
        &self,
        params: &InstanceParams,
        resolver: &R,
    ) -> Result<Vec<Instance>> {
        let stride = params.stride()?;
        let length = params.length;
        let last_first_frame = self.num_frames.saturating_sub(length);

        let mask = self.frame_activity_mask();

        let mut instances = Vec::new();
        for start_frame in (0..last_first_frame).step_by(stride) {
            let output = match &self.label {
                Some(label) => {
                    let active = mask[start_frame..start_frame + length]
                        .iter()
                        .filter(|&&a| a)
                        .count();
                    // active >= length/2, with ties at exactly half counting
                    // as present
                    if 2 * active >= length {
                        Some(resolver.get_output_index(label)?)
                    } else {
                        Some(resolver.get_output_index("none")?)
                    }
                }
                None => None,
            };
            instances.push(Instance {
                video_id: self.video_id.clone(),
                start_frame,
                output,
            });
        }
        Ok(instances)
    }
}
