// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the joint collection library.

use std::fmt;

use crate::joints::Joint;

/// Result type alias for joint collection operations.
pub type Result<T> = std::result::Result<T, CollectError>;

/// Main error type for the joint collection library.
#[derive(Debug)]
pub enum CollectError {
    /// The input container has no video track.
    NoVideoTrack,
    /// The input container cannot be opened or parsed.
    UnreadableContainer(String),
    /// An individual frame's pixel buffer cannot be materialized.
    /// Fatal for the whole run; frames are never skipped.
    FrameDecode(String),
    /// The root joint was absent during root-relative positioning.
    MissingRoot,
    /// A selected joint was absent from a frame's detections.
    MissingJoint(Joint),
    /// Pose engine failure.
    Engine(String),
    /// Table serialization error.
    Export(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
    /// Feature not enabled.
    FeatureNotEnabled(String),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVideoTrack => write!(f, "Video error: input contains no video track"),
            Self::UnreadableContainer(msg) => write!(f, "Video error: unreadable container: {msg}"),
            Self::FrameDecode(msg) => write!(f, "Frame decode error: {msg}"),
            Self::MissingRoot => write!(f, "Missing joint: root not detected in frame"),
            Self::MissingJoint(joint) => {
                write!(f, "Missing joint: selected joint '{joint}' not detected in frame")
            }
            Self::Engine(msg) => write!(f, "Pose engine error: {msg}"),
            Self::Export(msg) => write!(f, "Export error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::FeatureNotEnabled(msg) => write!(f, "Feature not enabled: {msg}"),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CollectError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl CollectError {
    /// Whether this error comes from a joint missing in a frame's
    /// detections, as opposed to an I/O or decode failure.
    ///
    /// The orchestrator may skip such frames when configured to.
    #[must_use]
    pub const fn is_missing_data(&self) -> bool {
        matches!(self, Self::MissingRoot | Self::MissingJoint(_))
    }
}
