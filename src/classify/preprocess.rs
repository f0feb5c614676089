//! Image preprocessing for model input.
//!
//! The model consumes a fixed-size RGB tensor normalized to [0, 1] in NHWC
//! layout. Resize filter and normalization must reproduce the training
//! pipeline exactly; a mismatch does not fail, it silently degrades every
//! prediction.

use crate::constants::{PIXEL_SCALE, RGB_CHANNELS};
use crate::error::{Error, Result};
use image::{ImageFormat, ImageReader, imageops::FilterType};
use std::io::Cursor;

/// Resize filter matching the bicubic resampling used at training time.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// A decoded, resized, normalized image ready for inference.
#[derive(Debug, Clone)]
pub struct PreprocessedImage {
    /// Pixel data in NHWC order, each value in [0, 1].
    pub data: Vec<f32>,
    /// Tensor shape: `[1, size, size, 3]`.
    pub shape: [usize; 4],
}

/// Decode raw image bytes and prepare them for the model.
///
/// Accepts JPEG and PNG input only. The decoded image is converted to RGB,
/// resized to `input_size` x `input_size`, scaled to [0, 1] and given a
/// singleton batch axis.
pub fn preprocess(bytes: &[u8], input_size: u32) -> Result<PreprocessedImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(Error::Io)?;

    match reader.format() {
        Some(ImageFormat::Jpeg | ImageFormat::Png) => {}
        Some(other) => {
            return Err(Error::UnsupportedImageFormat {
                detail: format!("{other:?}"),
            });
        }
        None => {
            return Err(Error::UnsupportedImageFormat {
                detail: "unrecognized data".to_string(),
            });
        }
    }

    let decoded = reader
        .decode()
        .map_err(|e| Error::ImageDecode { source: e })?;

    let resized = decoded.resize_exact(input_size, input_size, RESIZE_FILTER);
    let rgb = resized.to_rgb8();

    let data: Vec<f32> = rgb
        .as_raw()
        .iter()
        .map(|&v| f32::from(v) / PIXEL_SCALE)
        .collect();

    let size = input_size as usize;
    Ok(PreprocessedImage {
        data,
        shape: [1, size, size, RGB_CHANNELS],
    })
}
