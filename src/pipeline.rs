// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pipeline orchestrator.
//!
//! Drives frame source -> pose detection -> normalization -> joint
//! selection for every frame of a run, accumulates the per-frame feature
//! vectors and hands them to the exporter. Single-threaded synchronous
//! loop in strict presentation order; each frame's normalization depends
//! only on that frame, but the vector list must preserve input order for
//! the table to be meaningful as a time series.

use std::path::Path;

use crate::detector::{PoseDetector, PoseEngine};
use crate::error::Result;
use crate::export::OutputTable;
use crate::normalize::{center_to_frame, relative_to_root};
use crate::select::{feature_vector, headers};
use crate::skeleton::JointSelection;
use crate::source::RawFrame;
use crate::warn;

/// Configuration for one collection run.
///
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use joint_collector::CollectConfig;
///
/// let config = CollectConfig::new()
///     .with_mirrored(true)
///     .with_multiplier(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Mirrored detection: flip the horizontal axis and swap left/right
    /// joint identities together.
    pub mirrored: bool,
    /// Uniform coordinate multiplier applied by the detector. 1.0 is a
    /// no-op.
    pub multiplier: f64,
    /// Skip frames whose root or selected joints are missing instead of
    /// aborting the run. Defaults to `false`: any missing joint aborts,
    /// matching the strict all-or-nothing sampling contract.
    pub skip_incomplete: bool,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            mirrored: false,
            multiplier: 1.0,
            skip_incomplete: false,
        }
    }
}

impl CollectConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable mirrored detection.
    #[must_use]
    pub const fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    /// Set the uniform coordinate multiplier.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Skip incomplete frames instead of aborting the run.
    #[must_use]
    pub const fn with_skip_incomplete(mut self, skip: bool) -> Self {
        self.skip_incomplete = skip;
        self
    }
}

/// Process every frame of a source into feature vectors.
///
/// Per frame: detect -> center to frame -> convert relative to root ->
/// flatten selected joints. Frames are processed strictly in source order
/// with no reordering; the returned vectors preserve that order.
///
/// # Errors
///
/// Frame decode errors always abort. By default a missing root or missing
/// selected joint aborts too; with
/// [`skip_incomplete`](CollectConfig::skip_incomplete) such frames are
/// dropped with a warning and processing continues.
pub fn collect_frames<E, I>(
    frames: I,
    engine: E,
    selection: &JointSelection,
    config: &CollectConfig,
) -> Result<Vec<Vec<f64>>>
where
    E: PoseEngine,
    I: IntoIterator<Item = Result<RawFrame>>,
{
    let mut detector = PoseDetector::new(engine)
        .with_mirrored(config.mirrored)
        .with_multiplier(config.multiplier);

    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (frame_idx, item) in frames.into_iter().enumerate() {
        let (image, _timestamp) = item?;

        let detected = detector.detect(&image)?;
        let centered = center_to_frame(&detected);
        let flattened = relative_to_root(&centered)
            .and_then(|relative| feature_vector(&relative, selection));

        match flattened {
            Ok(row) => rows.push(row),
            Err(e) if config.skip_incomplete && e.is_missing_data() => {
                warn!("Skipping frame {frame_idx}: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(rows)
}

/// Run the full pipeline and write the resulting table to `output`.
///
/// Convenience wrapper over [`collect_frames`] plus export. On failure no
/// output is guaranteed written; callers should treat a non-success return
/// as "no output produced" and surface the underlying cause.
///
/// # Errors
///
/// Propagates collection and serialization errors.
pub fn run<E, I, P>(
    frames: I,
    engine: E,
    selection: &JointSelection,
    config: &CollectConfig,
    output: P,
) -> Result<OutputTable>
where
    E: PoseEngine,
    I: IntoIterator<Item = Result<RawFrame>>,
    P: AsRef<Path>,
{
    let headers = headers(selection);
    let rows = collect_frames(frames, engine, selection, config)?;
    let table = OutputTable::from_rows(headers, &rows);
    table.write_csv(output)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectError;
    use crate::joints::{Joint, JointPosition};
    use crate::skeleton::SkeletonFrame;
    use image::DynamicImage;

    /// Engine yielding a scripted sequence of observations.
    struct ScriptedEngine {
        observations: Vec<Option<SkeletonFrame>>,
        next: usize,
    }

    impl ScriptedEngine {
        fn new(observations: Vec<Option<SkeletonFrame>>) -> Self {
            Self {
                observations,
                next: 0,
            }
        }
    }

    impl PoseEngine for ScriptedEngine {
        fn detect(&mut self, _image: &DynamicImage) -> Result<Option<SkeletonFrame>> {
            let observation = self.observations[self.next].clone();
            self.next += 1;
            Ok(observation)
        }
    }

    fn synthetic_frames(count: usize) -> Vec<Result<RawFrame>> {
        (0..count)
            .map(|i| Ok((DynamicImage::new_rgb8(2, 2), i as f64 / 30.0)))
            .collect()
    }

    fn standing_pose() -> SkeletonFrame {
        [
            (Joint::Root, JointPosition::new(0.5, 0.5)),
            (Joint::Nose, JointPosition::new(0.5, 0.3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_collect_preserves_frame_order() {
        let observations = vec![Some(standing_pose()); 3];
        let selection: JointSelection = [Joint::Root, Joint::Nose].into_iter().collect();
        let rows = collect_frames(
            synthetic_frames(3),
            ScriptedEngine::new(observations),
            &selection,
            &CollectConfig::new(),
        )
        .unwrap();

        assert_eq!(rows.len(), 3);
        for row in &rows {
            // Catalog order: nose before root. Root relative to itself is
            // the origin, nose keeps its offset.
            assert_eq!(row, &vec![0.0, -0.2, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_missing_root_aborts_by_default() {
        let observations = vec![Some(standing_pose()), None];
        let selection: JointSelection = [Joint::Root].into_iter().collect();
        let result = collect_frames(
            synthetic_frames(2),
            ScriptedEngine::new(observations),
            &selection,
            &CollectConfig::new(),
        );
        assert!(matches!(result, Err(CollectError::MissingRoot)));
    }

    #[test]
    fn test_skip_incomplete_drops_bad_frames() {
        let observations = vec![Some(standing_pose()), None, Some(standing_pose())];
        let selection: JointSelection = [Joint::Root].into_iter().collect();
        let rows = collect_frames(
            synthetic_frames(3),
            ScriptedEngine::new(observations),
            &selection,
            &CollectConfig::new().with_skip_incomplete(true),
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_selected_joint_aborts() {
        let observations = vec![Some(standing_pose())];
        let selection: JointSelection = [Joint::Root, Joint::LeftWrist].into_iter().collect();
        let result = collect_frames(
            synthetic_frames(1),
            ScriptedEngine::new(observations),
            &selection,
            &CollectConfig::new(),
        );
        assert!(matches!(
            result,
            Err(CollectError::MissingJoint(Joint::LeftWrist))
        ));
    }

    #[test]
    fn test_decode_error_aborts() {
        let frames = vec![
            Ok((DynamicImage::new_rgb8(2, 2), 0.0)),
            Err(CollectError::FrameDecode("bad frame".to_string())),
        ];
        let observations = vec![Some(standing_pose()), Some(standing_pose())];
        let selection: JointSelection = [Joint::Root].into_iter().collect();
        let result = collect_frames(
            frames,
            ScriptedEngine::new(observations),
            &selection,
            &CollectConfig::new(),
        );
        assert!(matches!(result, Err(CollectError::FrameDecode(_))));
    }

    #[test]
    fn test_empty_selection_collects_empty_rows() {
        let observations = vec![Some(standing_pose()); 2];
        let rows = collect_frames(
            synthetic_frames(2),
            ScriptedEngine::new(observations),
            &JointSelection::new(),
            &CollectConfig::new(),
        )
        .unwrap();
        assert_eq!(rows, vec![Vec::<f64>::new(), Vec::new()]);
    }

    #[test]
    fn test_config_builder() {
        let config = CollectConfig::new()
            .with_mirrored(true)
            .with_multiplier(0.8)
            .with_skip_incomplete(true);
        assert!(config.mirrored);
        assert!((config.multiplier - 0.8).abs() < f64::EPSILON);
        assert!(config.skip_incomplete);
    }
}
