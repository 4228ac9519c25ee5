// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton data model.
//!
//! Per-frame joint maps ([`SkeletonFrame`]), timestamped samples
//! ([`FrameSample`]) and the caller-supplied joint selection
//! ([`JointSelection`]). Frames are created per video frame, consumed to
//! produce one feature vector and discarded; no cross-frame state is kept.

use std::collections::{HashMap, HashSet};

use crate::joints::{Joint, JointPosition};

/// All joints detected in one video frame.
///
/// Keys are a subset of [`Joint::CATALOG`] because detection may omit
/// occluded or uncertain joints. Transforms that depend on the root joint
/// are undefined for frames where it is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonFrame {
    joints: HashMap<Joint, JointPosition>,
}

impl SkeletonFrame {
    /// Create an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a joint position.
    pub fn insert(&mut self, joint: Joint, position: JointPosition) {
        self.joints.insert(joint, position);
    }

    /// Get a joint's position, if detected.
    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<JointPosition> {
        self.joints.get(&joint).copied()
    }

    /// Get the root joint's position, if detected.
    #[must_use]
    pub fn root(&self) -> Option<JointPosition> {
        self.get(Joint::Root)
    }

    /// Check whether a joint was detected.
    #[must_use]
    pub fn contains(&self, joint: Joint) -> bool {
        self.joints.contains_key(&joint)
    }

    /// Number of detected joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Check if no joints were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Iterate over detected joints in unspecified order.
    ///
    /// Ordering-sensitive consumers must iterate [`Joint::CATALOG`] and
    /// look joints up instead.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, JointPosition)> + '_ {
        self.joints.iter().map(|(&j, &p)| (j, p))
    }
}

impl FromIterator<(Joint, JointPosition)> for SkeletonFrame {
    fn from_iter<I: IntoIterator<Item = (Joint, JointPosition)>>(iter: I) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}

/// A skeleton frame paired with its presentation timestamp in seconds.
///
/// Timestamps are monotonically non-decreasing across a video.
#[derive(Debug, Clone)]
pub struct FrameSample {
    /// Joints detected in this frame.
    pub frame: SkeletonFrame,
    /// Presentation timestamp in seconds.
    pub timestamp: f64,
}

impl FrameSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(frame: SkeletonFrame, timestamp: f64) -> Self {
        Self { frame, timestamp }
    }
}

/// The set of joints chosen by the caller before processing begins.
///
/// Fixed for the duration of one run. Determines which columns appear in
/// the output; column order follows [`Joint::CATALOG`], not insertion
/// order. An empty selection is accepted and produces a zero-column table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JointSelection {
    joints: HashSet<Joint>,
}

impl JointSelection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection containing every catalog joint.
    #[must_use]
    pub fn all() -> Self {
        Joint::CATALOG.into_iter().collect()
    }

    /// Check whether a joint is selected.
    #[must_use]
    pub fn contains(&self, joint: Joint) -> bool {
        self.joints.contains(&joint)
    }

    /// Number of selected joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Check if the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

impl FromIterator<Joint> for JointSelection {
    fn from_iter<I: IntoIterator<Item = Joint>>(iter: I) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}
