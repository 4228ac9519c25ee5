// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Video frame source.
//!
//! Decodes a video file into a lazy, finite, forward-only sequence of
//! `(frame, presentation timestamp)` pairs for the primary video track, in
//! presentation order. The pipeline is generic over any iterator with the
//! same item type, so synthetic frame sequences can be fed in tests.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{CollectError, Result};

/// One decoded frame with its presentation timestamp in seconds.
pub type RawFrame = (DynamicImage, f64);

/// Iterator over decoded video frames.
///
/// Forward-only and not restartable. The file is opened on construction and
/// released when the source is dropped, including on early fatal exit.
pub struct VideoSource {
    path: PathBuf,
    frame_idx: usize,
    #[cfg(feature = "video")]
    decoder: video_rs::decode::Decoder,
}

impl VideoSource {
    /// Open a video file for frame extraction.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::NoVideoTrack`] if the container holds no
    /// video stream, [`CollectError::UnreadableContainer`] if it cannot be
    /// opened or parsed, and [`CollectError::FeatureNotEnabled`] when
    /// compiled without the `video` feature.
    #[cfg(feature = "video")]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            if let Err(e) = video_rs::init() {
                eprintln!("Failed to initialize video-rs: {e}");
            }
        });

        let path = path.as_ref().to_path_buf();

        let decoder = match video_rs::decode::Decoder::new(path.as_path()) {
            Ok(d) => d,
            Err(video_rs::Error::BackendError(video_rs::ffmpeg::Error::StreamNotFound)) => {
                return Err(CollectError::NoVideoTrack);
            }
            Err(e) => return Err(CollectError::UnreadableContainer(e.to_string())),
        };

        Ok(Self {
            path,
            frame_idx: 0,
            decoder,
        })
    }

    #[cfg(not(feature = "video"))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let _ = path;
        Err(CollectError::FeatureNotEnabled(
            "Video decoding requires the 'video' feature".to_string(),
        ))
    }

    /// Path of the underlying video file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames decoded so far.
    #[must_use]
    pub const fn frames_decoded(&self) -> usize {
        self.frame_idx
    }

    /// Frame rate of the primary video track.
    #[cfg(feature = "video")]
    #[must_use]
    pub fn frame_rate(&self) -> f32 {
        self.decoder.frame_rate()
    }
}

impl Iterator for VideoSource {
    type Item = Result<RawFrame>;

    #[cfg(feature = "video")]
    fn next(&mut self) -> Option<Self::Item> {
        match self.decoder.decode() {
            Ok((ts, frame)) => {
                self.frame_idx += 1;
                match frame_to_image(&frame) {
                    Ok(img) => Some(Ok((img, ts.as_secs_f64()))),
                    Err(e) => Some(Err(e)),
                }
            }
            // End of stream terminates the iterator; it is not an error.
            Err(video_rs::Error::ReadExhausted | video_rs::Error::DecodeExhausted) => None,
            Err(e) => Some(Err(CollectError::FrameDecode(format!(
                "frame {} of {}: {e}",
                self.frame_idx,
                self.path.display()
            )))),
        }
    }

    #[cfg(not(feature = "video"))]
    fn next(&mut self) -> Option<Self::Item> {
        None
    }
}

/// Convert a `video_rs` frame (HWC u8 ndarray) to a `DynamicImage`.
#[cfg(feature = "video")]
fn frame_to_image(arr: &video_rs::Frame) -> Result<DynamicImage> {
    let shape = arr.shape();
    let height = u32::try_from(shape[0])
        .map_err(|_| CollectError::FrameDecode("Frame height exceeds u32::MAX".to_string()))?;
    let width = u32::try_from(shape[1])
        .map_err(|_| CollectError::FrameDecode("Frame width exceeds u32::MAX".to_string()))?;

    let mut rgb_data = Vec::with_capacity((height * width * 3) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            rgb_data.push(arr[[y, x, 0]]);
            rgb_data.push(arr[[y, x, 1]]);
            rgb_data.push(arr[[y, x, 2]]);
        }
    }

    let img_buffer = image::RgbImage::from_raw(width, height, rgb_data).ok_or_else(|| {
        CollectError::FrameDecode("Failed to create image from video frame".to_string())
    })?;

    Ok(DynamicImage::ImageRgb8(img_buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_fails() {
        let result = VideoSource::open("definitely/not/a/file.mp4");
        assert!(result.is_err());
    }

    #[cfg(feature = "video")]
    #[test]
    fn test_open_non_video_file_fails() {
        // A plain text file has no parsable video track.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_video.mp4");
        std::fs::write(&path, b"this is not a video container").unwrap();

        let result = VideoSource::open(&path);
        assert!(matches!(
            result,
            Err(CollectError::NoVideoTrack | CollectError::UnreadableContainer(_))
        ));
    }
}
