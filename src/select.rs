// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Joint selection and feature flattening.
//!
//! Produces the per-frame flat feature vector and the matching column
//! headers. Both iterate [`Joint::CATALOG`] so element order and header
//! order always agree positionally, regardless of how the selection was
//! built.

use crate::error::{CollectError, Result};
use crate::joints::Joint;
use crate::skeleton::{JointSelection, SkeletonFrame};

/// Flatten one frame's selected joints into a feature vector.
///
/// Iterates the catalog in canonical order, skipping unselected joints and
/// appending `(x, y)` for selected ones. A successful result always has
/// length `2 * |selection|`.
///
/// # Errors
///
/// Returns [`CollectError::MissingJoint`] if a selected joint is absent
/// from the frame. There is no missing-value representation; a frame that
/// fails to resolve any requested joint is not a valid sample.
pub fn feature_vector(frame: &SkeletonFrame, selection: &JointSelection) -> Result<Vec<f64>> {
    let mut features = Vec::with_capacity(2 * selection.len());
    for joint in Joint::CATALOG {
        if !selection.contains(joint) {
            continue;
        }
        let position = frame.get(joint).ok_or(CollectError::MissingJoint(joint))?;
        features.push(position.x);
        features.push(position.y);
    }
    Ok(features)
}

/// Column headers for a selection: `"<joint>_x"`, `"<joint>_y"` in catalog
/// order.
///
/// Must be computed once per run; the exporter zips headers to columns
/// positionally against [`feature_vector`] output.
#[must_use]
pub fn headers(selection: &JointSelection) -> Vec<String> {
    let mut headers = Vec::with_capacity(2 * selection.len());
    for joint in Joint::CATALOG {
        if !selection.contains(joint) {
            continue;
        }
        headers.push(format!("{joint}_x"));
        headers.push(format!("{joint}_y"));
    }
    headers
}
