// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Body joint catalog.
//!
//! This module defines the fixed set of tracked body landmarks and their
//! canonical output order. All ordering-dependent code (header generation,
//! feature flattening) reads from [`Joint::CATALOG`], the single source of
//! truth for joint ordering.

use std::fmt;
use std::str::FromStr;

/// A named anatomical landmark tracked by the pose detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    /// Right eye.
    RightEye,
    /// Left eye.
    LeftEye,
    /// Right ear.
    RightEar,
    /// Left ear.
    LeftEar,
    /// Nose.
    Nose,
    /// Neck (base of the head).
    Neck,
    /// Root - the pelvis/center landmark used as the origin for relative positioning.
    Root,
    /// Right hip.
    RightHip,
    /// Right knee.
    RightKnee,
    /// Right ankle.
    RightAnkle,
    /// Left hip.
    LeftHip,
    /// Left knee.
    LeftKnee,
    /// Left ankle.
    LeftAnkle,
    /// Right shoulder.
    RightShoulder,
    /// Right elbow.
    RightElbow,
    /// Right wrist.
    RightWrist,
    /// Left shoulder.
    LeftShoulder,
    /// Left elbow.
    LeftElbow,
    /// Left wrist.
    LeftWrist,
}

impl Joint {
    /// Canonical ordered list of all tracked joints.
    ///
    /// This order determines column order in exported tables and element
    /// order in feature vectors, independent of selection insertion order.
    pub const CATALOG: [Self; 19] = [
        Self::RightEye,
        Self::LeftEye,
        Self::RightEar,
        Self::LeftEar,
        Self::Nose,
        Self::Neck,
        Self::Root,
        Self::RightHip,
        Self::RightKnee,
        Self::RightAnkle,
        Self::LeftHip,
        Self::LeftKnee,
        Self::LeftAnkle,
        Self::RightShoulder,
        Self::RightElbow,
        Self::RightWrist,
        Self::LeftShoulder,
        Self::LeftElbow,
        Self::LeftWrist,
    ];

    /// Returns the string representation used in column headers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RightEye => "right_eye",
            Self::LeftEye => "left_eye",
            Self::RightEar => "right_ear",
            Self::LeftEar => "left_ear",
            Self::Nose => "nose",
            Self::Neck => "neck",
            Self::Root => "root",
            Self::RightHip => "right_hip",
            Self::RightKnee => "right_knee",
            Self::RightAnkle => "right_ankle",
            Self::LeftHip => "left_hip",
            Self::LeftKnee => "left_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightShoulder => "right_shoulder",
            Self::RightElbow => "right_elbow",
            Self::RightWrist => "right_wrist",
            Self::LeftShoulder => "left_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::LeftWrist => "left_wrist",
        }
    }

    /// Returns the left/right counterpart for paired joints.
    ///
    /// Unpaired joints (nose, neck, root) keep their identity. Used by
    /// mirrored detection, where the detector's subject-perspective
    /// left/right must be swapped together with the horizontal axis.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::RightEye => Self::LeftEye,
            Self::LeftEye => Self::RightEye,
            Self::RightEar => Self::LeftEar,
            Self::LeftEar => Self::RightEar,
            Self::RightHip => Self::LeftHip,
            Self::LeftHip => Self::RightHip,
            Self::RightKnee => Self::LeftKnee,
            Self::LeftKnee => Self::RightKnee,
            Self::RightAnkle => Self::LeftAnkle,
            Self::LeftAnkle => Self::RightAnkle,
            Self::RightShoulder => Self::LeftShoulder,
            Self::LeftShoulder => Self::RightShoulder,
            Self::RightElbow => Self::LeftElbow,
            Self::LeftElbow => Self::RightElbow,
            Self::RightWrist => Self::LeftWrist,
            Self::LeftWrist => Self::RightWrist,
            Self::Nose | Self::Neck | Self::Root => self,
        }
    }

    /// Returns whether this joint has a left/right counterpart.
    #[must_use]
    pub const fn is_paired(self) -> bool {
        !matches!(self, Self::Nose | Self::Neck | Self::Root)
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Joint {
    type Err = JointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "right_eye" => Ok(Self::RightEye),
            "left_eye" => Ok(Self::LeftEye),
            "right_ear" => Ok(Self::RightEar),
            "left_ear" => Ok(Self::LeftEar),
            "nose" => Ok(Self::Nose),
            "neck" => Ok(Self::Neck),
            "root" => Ok(Self::Root),
            "right_hip" => Ok(Self::RightHip),
            "right_knee" => Ok(Self::RightKnee),
            "right_ankle" => Ok(Self::RightAnkle),
            "left_hip" => Ok(Self::LeftHip),
            "left_knee" => Ok(Self::LeftKnee),
            "left_ankle" => Ok(Self::LeftAnkle),
            "right_shoulder" => Ok(Self::RightShoulder),
            "right_elbow" => Ok(Self::RightElbow),
            "right_wrist" => Ok(Self::RightWrist),
            "left_shoulder" => Ok(Self::LeftShoulder),
            "left_elbow" => Ok(Self::LeftElbow),
            "left_wrist" => Ok(Self::LeftWrist),
            _ => Err(JointParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid joint name.
#[derive(Debug, Clone)]
pub struct JointParseError(String);

impl fmt::Display for JointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid joint '{}', expected a snake_case joint name such as 'root' or 'left_wrist'",
            self.0
        )
    }
}

impl std::error::Error for JointParseError {}

/// A position in normalized image space.
///
/// Coordinates are conventionally in `[0, 1]` relative to frame width and
/// height; origin and axis orientation are defined by the detection engine.
/// Value type with no identity beyond its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointPosition {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl JointPosition {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this position translated by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_joints() {
        assert_eq!(Joint::CATALOG.len(), 19);
        // Catalog entries are unique
        for (i, a) in Joint::CATALOG.iter().enumerate() {
            for b in &Joint::CATALOG[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_joint_from_str() {
        assert_eq!("root".parse::<Joint>().unwrap(), Joint::Root);
        assert_eq!("left_wrist".parse::<Joint>().unwrap(), Joint::LeftWrist);
        assert_eq!("RIGHT_KNEE".parse::<Joint>().unwrap(), Joint::RightKnee);
        assert!("pelvis".parse::<Joint>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for joint in Joint::CATALOG {
            assert_eq!(joint.to_string().parse::<Joint>().unwrap(), joint);
        }
    }

    #[test]
    fn test_mirrored_is_involution() {
        for joint in Joint::CATALOG {
            assert_eq!(joint.mirrored().mirrored(), joint);
        }
    }

    #[test]
    fn test_unpaired_joints_keep_identity() {
        assert_eq!(Joint::Nose.mirrored(), Joint::Nose);
        assert_eq!(Joint::Neck.mirrored(), Joint::Neck);
        assert_eq!(Joint::Root.mirrored(), Joint::Root);
        assert!(!Joint::Root.is_paired());
        assert!(Joint::LeftWrist.is_paired());
    }

    #[test]
    fn test_translated() {
        let p = JointPosition::new(0.3, 0.4).translated(0.2, 0.1);
        assert!((p.x - 0.5).abs() < f64::EPSILON);
        assert!((p.y - 0.5).abs() < f64::EPSILON);
    }
}
