//! Pretrained species model wrapper around ort.

use crate::classify::preprocess::{PreprocessedImage, preprocess};
use crate::classify::{ClassifyImage, Prediction, labels::read_labels};
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;
use std::path::Path;
use tracing::{debug, info};

/// Classifier over a pretrained ONNX image model and its label list.
///
/// The label list is index-aligned with the model's output vector. The pair
/// is validated at load time with a warm-up pass, so a model/labels mismatch
/// fails startup instead of mislabeling every prediction.
pub struct SpeciesClassifier {
    session: Session,
    labels: Vec<String>,
    input_size: u32,
}

impl SpeciesClassifier {
    /// Build a classifier from model configuration.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let model_path = config.path.as_ref().ok_or_else(|| Error::ConfigValidation {
            message: "model.path is not set (edit the config file or set WILDWATCH_MODEL_PATH)"
                .to_string(),
        })?;
        let labels_path = config
            .labels
            .as_ref()
            .ok_or_else(|| Error::ConfigValidation {
                message:
                    "model.labels is not set (edit the config file or set WILDWATCH_LABELS_PATH)"
                        .to_string(),
            })?;

        if !model_path.exists() {
            return Err(Error::ModelFileNotFound {
                path: model_path.clone(),
            });
        }
        if !labels_path.exists() {
            return Err(Error::LabelsFileNotFound {
                path: labels_path.clone(),
            });
        }

        let labels = read_labels(labels_path)?;
        let mut session = build_session(model_path).map_err(|e| Error::ClassifierBuild {
            reason: e.to_string(),
        })?;

        // Warm-up pass on a zero tensor: verifies the model accepts the
        // configured input shape and that the output width matches the label
        // list before any user image is classified.
        let size = config.input_size as usize;
        let warmup = PreprocessedImage {
            data: vec![0.0; size * size * crate::constants::RGB_CHANNELS],
            shape: [1, size, size, crate::constants::RGB_CHANNELS],
        };
        let scores = forward(&mut session, warmup)?;
        if scores.len() != labels.len() {
            return Err(Error::LabelCountMismatch {
                labels: labels.len(),
                outputs: scores.len(),
            });
        }

        info!(
            model = %model_path.display(),
            species = labels.len(),
            input_size = config.input_size,
            "Loaded classification model"
        );

        Ok(Self {
            session,
            labels,
            input_size: config.input_size,
        })
    }

    /// The ordered species label list.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The square input resolution this classifier feeds the model.
    pub fn input_size(&self) -> u32 {
        self.input_size
    }
}

impl ClassifyImage for SpeciesClassifier {
    /// Run one forward pass and return the argmax label.
    ///
    /// Every input yields some label, even out-of-distribution images; no
    /// confidence threshold is applied.
    fn classify(&mut self, bytes: &[u8]) -> Result<Prediction> {
        let input = preprocess(bytes, self.input_size)?;
        let scores = forward(&mut self.session, input)?;

        if scores.len() != self.labels.len() {
            return Err(Error::LabelCountMismatch {
                labels: self.labels.len(),
                outputs: scores.len(),
            });
        }

        let index = argmax(&scores).ok_or_else(|| Error::Inference {
            reason: "model produced an empty score vector".to_string(),
        })?;

        let prediction = Prediction {
            species: self.labels[index].clone(),
            confidence: scores[index],
            index,
        };
        debug!(species = %prediction.species, confidence = prediction.confidence, "classified image");
        Ok(prediction)
    }
}

fn build_session(path: &Path) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .commit_from_file(path)
}

/// Run one inference pass, returning the flattened score vector.
fn forward(session: &mut Session, input: PreprocessedImage) -> Result<Vec<f32>> {
    let tensor =
        Tensor::from_array((input.shape, input.data)).map_err(|e| Error::Inference {
            reason: e.to_string(),
        })?;

    let outputs = session
        .run(ort::inputs![tensor])
        .map_err(|e| Error::Inference {
            reason: e.to_string(),
        })?;

    let (_, scores) = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| Error::Inference {
            reason: e.to_string(),
        })?;

    Ok(scores.to_vec())
}

/// Index of the highest score, ties broken by lowest index.
pub(crate) fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best_index = None;
    let mut best_score = f32::NEG_INFINITY;
    for (index, &score) in scores.iter().enumerate() {
        if best_index.is_none() || score > best_score {
            best_index = Some(index);
            best_score = score;
        }
    }
    best_index
}
