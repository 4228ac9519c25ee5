// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose detection adapter.
//!
//! The detection engine itself is an external capability behind the
//! [`PoseEngine`] trait; this module only defines the contract and the
//! coordinate post-processing applied to its output (optional horizontal
//! mirroring and a uniform scale multiplier).

use image::DynamicImage;

use crate::error::Result;
use crate::joints::JointPosition;
use crate::skeleton::SkeletonFrame;

/// External pose detection capability.
///
/// Maps a single 2D image to an optional set of joint coordinates in
/// normalized `[0, 1]` image space. Must be invokable once per frame with no
/// required internal state carried between invocations. Returning `None`
/// means "no observation" (no person visible), not a failure.
pub trait PoseEngine {
    /// Detect body joints in one decoded frame.
    ///
    /// # Errors
    ///
    /// Returns an error only for engine failures; absence of a person is
    /// `Ok(None)`.
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<SkeletonFrame>>;
}

/// Per-frame detector wrapping a [`PoseEngine`] with coordinate
/// post-processing.
///
/// In mirrored mode the horizontal axis is flipped (`x' = 1 - x`) and every
/// paired joint's anatomical identity is swapped left/right together,
/// because the engine defines left/right from the subject's own perspective
/// and a horizontally flipped capture needs both flipped at once. The scale
/// multiplier is applied to both coordinates before the flip; the default of
/// 1.0 is a no-op, non-default values exist for scaling experiments.
#[derive(Debug)]
pub struct PoseDetector<E> {
    engine: E,
    mirrored: bool,
    multiplier: f64,
}

impl<E: PoseEngine> PoseDetector<E> {
    /// Create a detector with default post-processing (no mirror, 1.0
    /// multiplier).
    #[must_use]
    pub const fn new(engine: E) -> Self {
        Self {
            engine,
            mirrored: false,
            multiplier: 1.0,
        }
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

    /// Detect the skeleton in one frame.
    ///
    /// Returns an empty [`SkeletonFrame`] when the engine produces no
    /// observation; callers must treat that as "no joints visible" rather
    /// than a failure. Output keys are always a subset of the joint catalog.
    ///
    /// # Errors
    ///
    /// Propagates engine failures.
    pub fn detect(&mut self, image: &DynamicImage) -> Result<SkeletonFrame> {
        let Some(raw) = self.engine.detect(image)? else {
            return Ok(SkeletonFrame::new());
        };

        let mut result = SkeletonFrame::new();
        for (joint, position) in raw.iter() {
            let x = position.x * self.multiplier;
            let y = position.y * self.multiplier;
            if self.mirrored {
                result.insert(joint.mirrored(), JointPosition::new(1.0 - x, y));
            } else {
                result.insert(joint, JointPosition::new(x, y));
            }
        }

        Ok(result)
    }

    /// Consume the detector and return the wrapped engine.
    pub fn into_engine(self) -> E {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::Joint;

    /// Engine returning a fixed frame regardless of input.
    struct FixedEngine(Option<SkeletonFrame>);

    impl PoseEngine for FixedEngine {
        fn detect(&mut self, _image: &DynamicImage) -> Result<Option<SkeletonFrame>> {
            Ok(self.0.clone())
        }
    }

    fn blank_image() -> DynamicImage {
        DynamicImage::new_rgb8(2, 2)
    }

    #[test]
    fn test_no_observation_yields_empty_frame() {
        let mut detector = PoseDetector::new(FixedEngine(None));
        let frame = detector.detect(&blank_image()).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_passthrough_without_mirror() {
        let raw: SkeletonFrame = [(Joint::Nose, JointPosition::new(0.5, 0.3))]
            .into_iter()
            .collect();
        let mut detector = PoseDetector::new(FixedEngine(Some(raw)));
        let frame = detector.detect(&blank_image()).unwrap();
        assert_eq!(frame.get(Joint::Nose), Some(JointPosition::new(0.5, 0.3)));
    }

    #[test]
    fn test_mirror_flips_axis_and_identity() {
        // Raw left wrist at x=0.2 becomes right wrist at x=0.8;
        // no left wrist remains in the output.
        let raw: SkeletonFrame = [(Joint::LeftWrist, JointPosition::new(0.2, 0.4))]
            .into_iter()
            .collect();
        let mut detector = PoseDetector::new(FixedEngine(Some(raw))).with_mirrored(true);
        let frame = detector.detect(&blank_image()).unwrap();

        let wrist = frame.get(Joint::RightWrist).unwrap();
        assert!((wrist.x - 0.8).abs() < 1e-12);
        assert!((wrist.y - 0.4).abs() < 1e-12);
        assert!(!frame.contains(Joint::LeftWrist));
    }

    #[test]
    fn test_mirror_keeps_unpaired_identity() {
        let raw: SkeletonFrame = [(Joint::Root, JointPosition::new(0.25, 0.5))]
            .into_iter()
            .collect();
        let mut detector = PoseDetector::new(FixedEngine(Some(raw))).with_mirrored(true);
        let frame = detector.detect(&blank_image()).unwrap();

        let root = frame.root().unwrap();
        assert!((root.x - 0.75).abs() < 1e-12);
        assert!((root.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_twice_is_involution() {
        let raw: SkeletonFrame = [
            (Joint::LeftWrist, JointPosition::new(0.2, 0.4)),
            (Joint::RightKnee, JointPosition::new(0.7, 0.9)),
            (Joint::Nose, JointPosition::new(0.55, 0.1)),
        ]
        .into_iter()
        .collect();

        let mut first = PoseDetector::new(FixedEngine(Some(raw.clone()))).with_mirrored(true);
        let once = first.detect(&blank_image()).unwrap();
        let mut second = PoseDetector::new(FixedEngine(Some(once))).with_mirrored(true);
        let twice = second.detect(&blank_image()).unwrap();

        for (joint, position) in raw.iter() {
            let restored = twice.get(joint).unwrap();
            assert!((restored.x - position.x).abs() < 1e-12);
            assert!((restored.y - position.y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_multiplier_scales_both_coordinates() {
        let raw: SkeletonFrame = [(Joint::Nose, JointPosition::new(0.4, 0.6))]
            .into_iter()
            .collect();
        let mut detector = PoseDetector::new(FixedEngine(Some(raw))).with_multiplier(0.5);
        let frame = detector.detect(&blank_image()).unwrap();

        let nose = frame.get(Joint::Nose).unwrap();
        assert!((nose.x - 0.2).abs() < 1e-12);
        assert!((nose.y - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_applies_multiplier_before_flip() {
        let raw: SkeletonFrame = [(Joint::Nose, JointPosition::new(0.4, 0.6))]
            .into_iter()
            .collect();
        let mut detector = PoseDetector::new(FixedEngine(Some(raw)))
            .with_mirrored(true)
            .with_multiplier(0.5);
        let frame = detector.detect(&blank_image()).unwrap();

        let nose = frame.get(Joint::Nose).unwrap();
        assert!((nose.x - 0.8).abs() < 1e-12); // 1 - 0.4 * 0.5
        assert!((nose.y - 0.3).abs() < 1e-12);
    }
}
