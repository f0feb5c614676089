//! Image classification against a fixed species label set.

mod labels;
mod model;
mod preprocess;

pub use labels::read_labels;
pub use model::SpeciesClassifier;
pub use preprocess::{PreprocessedImage, preprocess};

use crate::error::Result;

/// A single classification result.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Species name from the label list.
    pub species: String,
    /// Raw model score for the winning class.
    pub confidence: f32,
    /// Index of the winning class in the label list.
    pub index: usize,
}

/// Seam between the session controller and the inference backend.
///
/// The production implementation is [`SpeciesClassifier`]; tests substitute
/// a stub so the session flow can run without model artifacts.
pub trait ClassifyImage {
    /// Classify raw image bytes into one species label.
    fn classify(&mut self, bytes: &[u8]) -> Result<Prediction>;
}
