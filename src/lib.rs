// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # Joint Collector
//!
//! Extracts a normalized per-frame skeleton time series from a video of a
//! person and exports selected joint coordinates as a CSV table.
//!
//! The pipeline decodes frames sequentially in presentation order, runs a
//! pose engine on each frame, normalizes the detected skeleton (frame
//! centering followed by a root-relative transform), flattens the selected
//! joints into a feature vector, and finally transposes the accumulated
//! vectors into named columns for export.
//!
//! ## Quick Start
//!
//! ```no_run
//! use joint_collector::{
//!     CollectConfig, Joint, JointSelection, PoseEngine, SkeletonFrame, VideoSource, pipeline,
//! };
//!
//! # struct MyEngine;
//! # impl PoseEngine for MyEngine {
//! #     fn detect(
//! #         &mut self,
//! #         _image: &image::DynamicImage,
//! #     ) -> joint_collector::Result<Option<SkeletonFrame>> {
//! #         Ok(None)
//! #     }
//! # }
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = VideoSource::open("walk.mp4")?;
//!     let selection: JointSelection = [Joint::Root, Joint::Nose, Joint::LeftWrist]
//!         .into_iter()
//!         .collect();
//!     let config = CollectConfig::new();
//!
//!     let engine = MyEngine; // any PoseEngine implementation
//!     let table = pipeline::run(source, engine, &selection, &config, "walk.csv")?;
//!     println!("Saved {} frames", table.num_rows());
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Collect all joints (needs the bundled ONNX engine)
//! joint-collector collect -s walk.mp4 -o walk.csv -m yolo11n-pose.onnx
//!
//! # Only specific joints, mirrored capture
//! joint-collector collect -s feed.mp4 -o out.csv -m yolo11n-pose.onnx \
//!     --joints root,nose,left_wrist --mirror
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`joints`] | [`Joint`] catalog with canonical ordering and [`JointPosition`] |
//! | [`skeleton`] | [`SkeletonFrame`], [`FrameSample`], [`JointSelection`] |
//! | [`source`] | [`VideoSource`] frame iterator over the primary video track |
//! | [`detector`] | [`PoseEngine`] contract and the mirroring/scaling [`PoseDetector`] |
//! | [`normalize`] | Frame centering and root-relative transforms |
//! | [`select`] | Feature flattening and column header generation |
//! | [`export`] | [`OutputTable`] transposition and CSV serialization |
//! | [`pipeline`] | [`CollectConfig`] and the per-frame orchestration loop |
//! | [`error`] | Error types ([`CollectError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `video` | Video file decoding via `video-rs`/FFmpeg (default) |
//! | `onnx` | Bundled YOLO-pose engine on ONNX Runtime |

// Modules
pub mod cli;
pub mod detector;
pub mod error;
pub mod export;
pub mod joints;
pub mod normalize;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod pipeline;
pub mod select;
pub mod skeleton;
pub mod source;

// Re-export main types for convenience
pub use detector::{PoseDetector, PoseEngine};
pub use error::{CollectError, Result};
pub use export::OutputTable;
pub use joints::{Joint, JointPosition};
pub use pipeline::CollectConfig;
pub use skeleton::{FrameSample, JointSelection, SkeletonFrame};
pub use source::{RawFrame, VideoSource};

#[cfg(feature = "onnx")]
pub use onnx::OnnxPoseEngine;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
