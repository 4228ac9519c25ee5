// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! ONNX Runtime pose engine.
//!
//! A [`PoseEngine`] implementation backed by a YOLO-pose style ONNX model,
//! so the CLI can run end to end without an external engine. The model
//! output layout is `[1, 56, anchors]` per candidate: 4 bbox values, 1
//! person confidence, then 17 COCO keypoints as `(x, y, confidence)`
//! triples. COCO has no neck or root landmark; they are synthesized as the
//! shoulder and hip midpoints.

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;

use crate::detector::PoseEngine;
use crate::error::{CollectError, Result};
use crate::joints::{Joint, JointPosition};
use crate::skeleton::SkeletonFrame;

/// COCO keypoint order produced by YOLO-pose models.
const COCO_KEYPOINTS: [Joint; 17] = [
    Joint::Nose,
    Joint::LeftEye,
    Joint::RightEye,
    Joint::LeftEar,
    Joint::RightEar,
    Joint::LeftShoulder,
    Joint::RightShoulder,
    Joint::LeftElbow,
    Joint::RightElbow,
    Joint::LeftWrist,
    Joint::RightWrist,
    Joint::LeftHip,
    Joint::RightHip,
    Joint::LeftKnee,
    Joint::RightKnee,
    Joint::LeftAnkle,
    Joint::RightAnkle,
];

const NUM_KEYPOINTS: usize = 17;
const KPT_DIM: usize = 3; // x, y, visibility/confidence
const PERSON_CONF_INDEX: usize = 4;
const KPT_START: usize = 5;

/// Pose engine running a YOLO-pose ONNX model.
pub struct OnnxPoseEngine {
    session: Session,
    input_name: String,
    output_name: String,
    input_size: (usize, usize),
    confidence: f32,
    keypoint_confidence: f32,
}

impl OnnxPoseEngine {
    /// Load a YOLO-pose ONNX model.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Engine`] if the model file is missing or the
    /// session cannot be created.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CollectError::Engine(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| CollectError::Engine(format!("Failed to create session builder: {e}")))?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(|e| CollectError::Engine(format!("Failed to set optimization level: {e}")))?
            .commit_from_file(path)
            .map_err(|e| CollectError::Engine(format!("Failed to load model: {e}")))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "images".to_string());
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "output0".to_string());

        Ok(Self {
            session,
            input_name,
            output_name,
            input_size: (640, 640),
            confidence: 0.25,
            keypoint_confidence: 0.25,
        })
    }

    /// Set the minimum person confidence for an observation.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the model input size (height, width).
    #[must_use]
    pub const fn with_input_size(mut self, height: usize, width: usize) -> Self {
        self.input_size = (height, width);
        self
    }

    /// Resize and normalize a frame into an NCHW f32 tensor.
    fn preprocess(&self, image: &DynamicImage) -> Array4<f32> {
        let (height, width) = self.input_size;
        // Plain resize without letterboxing keeps the mapping back to
        // normalized source coordinates a pure division.
        #[allow(clippy::cast_possible_truncation)]
        let resized = image
            .resize_exact(width as u32, height as u32, FilterType::Triangle)
            .to_rgb8();

        let mut tensor = Array4::<f32>::zeros((1, 3, height, width));
        for (x, y, pixel) in resized.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            tensor[[0, 0, y, x]] = f32::from(pixel[0]) / 255.0;
            tensor[[0, 1, y, x]] = f32::from(pixel[1]) / 255.0;
            tensor[[0, 2, y, x]] = f32::from(pixel[2]) / 255.0;
        }
        tensor
    }

    /// Run the session and return the raw output with its shape.
    fn run_inference(&mut self, input: &Array4<f32>) -> Result<(Vec<f32>, Vec<usize>)> {
        let input_contiguous = input.as_standard_layout();
        let input_tensor = TensorRef::from_array_view(&input_contiguous)
            .map_err(|e| CollectError::Engine(format!("Failed to create input tensor: {e}")))?;

        let inputs = ort::inputs![&self.input_name => input_tensor];
        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| CollectError::Engine(format!("Inference failed: {e}")))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| CollectError::Engine(format!("Output '{}' not found", self.output_name)))?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| CollectError::Engine(format!("Failed to extract output: {e}")))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let shape_vec: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        Ok((data.to_vec(), shape_vec))
    }

    /// Decode the best person candidate into a skeleton frame.
    fn decode(&self, data: &[f32], shape: &[usize]) -> Result<Option<SkeletonFrame>> {
        if shape.len() != 3 || shape[1] < KPT_START + NUM_KEYPOINTS * KPT_DIM {
            return Err(CollectError::Engine(format!(
                "Unexpected pose output shape {shape:?}"
            )));
        }
        let anchors = shape[2];
        let at = |feature: usize, anchor: usize| data[feature * anchors + anchor];

        // Highest-confidence person candidate; one person per frame.
        let mut best: Option<(usize, f32)> = None;
        for anchor in 0..anchors {
            let conf = at(PERSON_CONF_INDEX, anchor);
            if best.is_none_or(|(_, c)| conf > c) {
                best = Some((anchor, conf));
            }
        }
        let Some((anchor, conf)) = best else {
            return Ok(None);
        };
        if conf < self.confidence {
            return Ok(None);
        }

        let (height, width) = self.input_size;
        let mut keypoints = Vec::with_capacity(NUM_KEYPOINTS);
        for k in 0..NUM_KEYPOINTS {
            let x = at(KPT_START + k * KPT_DIM, anchor);
            let y = at(KPT_START + k * KPT_DIM + 1, anchor);
            let kpt_conf = at(KPT_START + k * KPT_DIM + 2, anchor);
            #[allow(clippy::cast_precision_loss)]
            let position = JointPosition::new(f64::from(x) / width as f64, f64::from(y) / height as f64);
            keypoints.push((position, kpt_conf));
        }

        Ok(Some(assemble_frame(&keypoints, self.keypoint_confidence)))
    }
}

impl PoseEngine for OnnxPoseEngine {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<SkeletonFrame>> {
        let input = self.preprocess(image);
        let (data, shape) = self.run_inference(&input)?;
        self.decode(&data, &shape)
    }
}

/// Build a skeleton frame from normalized COCO keypoints, keeping only
/// those above the confidence threshold and synthesizing neck and root.
fn assemble_frame(keypoints: &[(JointPosition, f32)], threshold: f32) -> SkeletonFrame {
    let mut frame = SkeletonFrame::new();
    for (joint, &(position, conf)) in COCO_KEYPOINTS.iter().zip(keypoints) {
        if conf >= threshold {
            frame.insert(*joint, position);
        }
    }

    if let (Some(l), Some(r)) = (frame.get(Joint::LeftShoulder), frame.get(Joint::RightShoulder)) {
        frame.insert(
            Joint::Neck,
            JointPosition::new((l.x + r.x) / 2.0, (l.y + r.y) / 2.0),
        );
    }
    if let (Some(l), Some(r)) = (frame.get(Joint::LeftHip), frame.get(Joint::RightHip)) {
        frame.insert(
            Joint::Root,
            JointPosition::new((l.x + r.x) / 2.0, (l.y + r.y) / 2.0),
        );
    }

    frame
}
