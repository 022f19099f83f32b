use crate::error::{Error, Result};

/// A fixed-length temporal window of a video, identified by
/// `(video_id, start_frame)`.
///
/// `output` is the positional index of the resolved class in the label
/// table, or `None` for windows of a video that has no label at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub video_id: String,
    pub start_frame: usize,
    pub output: Option<usize>,
}

/// Parameters for instance generation.
///
/// `size` is the spatial frame size handed to downstream frame loaders; the
/// windowing itself only uses `length` and `overlap`.
#[derive(Debug, Clone)]
pub struct InstanceParams {
    /// Frame spatial dimensions (height, width).
    pub size: (u32, u32),
    /// Temporal length of each instance, in frames.
    pub length: usize,
    /// Fractional overlap between consecutive windows, in `[0, 1)`.
    pub overlap: f64,
}

impl Default for InstanceParams {
    fn default() -> Self {
        Self {
            size: (128, 171),
            length: 16,
            overlap: 0.0,
        }
    }
}

impl InstanceParams {
    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Number of frames in the overlap between consecutive windows.
    pub fn overlap_frames(&self) -> usize {
        (self.overlap * self.length as f64) as usize
    }

    /// Distance in frames between consecutive window starts.
    ///
    /// Fails when `overlap` is outside `[0, 1)` or when the overlap covers
    /// the whole window (zero stride).
    pub fn stride(&self) -> Result<usize> {
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(Error::OverlapOutOfRange(self.overlap));
        }
        let overlap_frames = self.overlap_frames();
        if overlap_frames == self.length {
            return Err(Error::DegenerateOverlap {
                overlap: self.overlap,
                length: self.length,
            });
        }
        Ok(self.length - overlap_frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = InstanceParams::default();
        assert_eq!(params.size, (128, 171));
        assert_eq!(params.length, 16);
        assert_eq!(params.overlap, 0.0);
        assert_eq!(params.stride().unwrap(), 16);
    }

    #[test]
    fn test_stride_with_overlap() {
        // floor(0.5 * 16) = 8 overlapping frames, stride 8
        let params = InstanceParams::default().overlap(0.5);
        assert_eq!(params.overlap_frames(), 8);
        assert_eq!(params.stride().unwrap(), 8);

        // floor(0.3 * 16) = 4, stride 12
        let params = InstanceParams::default().overlap(0.3);
        assert_eq!(params.stride().unwrap(), 12);
    }

    #[test]
    fn test_overlap_out_of_range() {
        let result = InstanceParams::default().overlap(1.0).stride();
        assert!(matches!(result, Err(Error::OverlapOutOfRange(_))));

        let result = InstanceParams::default().overlap(-0.1).stride();
        assert!(matches!(result, Err(Error::OverlapOutOfRange(_))));
    }

    #[test]
    fn test_degenerate_overlap_is_rejected() {
        // Unreachable through the public overlap range, but the guard stays;
        // exercise it by bypassing the range check with length 0.
        let params = InstanceParams::default().length(0).overlap(0.0);
        assert!(matches!(
            params.stride(),
            Err(Error::DegenerateOverlap { length: 0, .. })
        ));
    }
}
