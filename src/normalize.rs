// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton normalization.
//!
//! Two independent pure functions over one frame's joint set: frame
//! centering and root-relative conversion. The pipeline always chains
//! centering into the root-relative transform, which puts the root at
//! `(0, 0)` in the final output. The centering step's translation is
//! invisible in that composed result (all non-root joints are re-derived
//! relative to the root), but both steps are still performed so that a
//! frame missing the root fails at the same stage as it always has.

use crate::error::{CollectError, Result};
use crate::joints::Joint;
use crate::skeleton::SkeletonFrame;

/// Translate all joints so the root lands at the frame center `(0.5, 0.5)`.
///
/// Requires the root joint; if it is absent the frame cannot be centered
/// and an empty frame is returned.
#[must_use]
pub fn center_to_frame(frame: &SkeletonFrame) -> SkeletonFrame {
    let Some(root) = frame.root() else {
        return SkeletonFrame::new();
    };

    let dx = 0.5 - root.x;
    let dy = 0.5 - root.y;

    frame
        .iter()
        .map(|(joint, position)| (joint, position.translated(dx, dy)))
        .collect()
}

/// Convert all joint positions to coordinates relative to the root.
///
/// Iterates the joint catalog in canonical order; catalog joints absent
/// from the frame are skipped, not defaulted to zero.
///
/// # Errors
///
/// Returns [`CollectError::MissingRoot`] if the root joint is absent. This
/// is stricter than [`center_to_frame`]; since the pipeline always chains
/// the two, the net behavior for a missing-root frame is this error.
pub fn relative_to_root(frame: &SkeletonFrame) -> Result<SkeletonFrame> {
    let root = frame.root().ok_or(CollectError::MissingRoot)?;

    let mut relative = SkeletonFrame::new();
    for joint in Joint::CATALOG {
        let Some(position) = frame.get(joint) else {
            continue;
        };
        relative.insert(joint, position.translated(-root.x, -root.y));
    }

    Ok(relative)
}
