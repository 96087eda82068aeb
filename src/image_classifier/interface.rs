use crate::device_camera::interface::Frame;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub probability: f32,
}

impl Classification {
    pub fn new(label: &str, probability: f32) -> Self {
        Self {
            label: label.to_string(),
            probability,
        }
    }
}

/// One classifier output per frame, in the classifier's declared class order.
pub type Distribution = Vec<Classification>;

pub trait ImageClassifier {
    fn class_count(&self) -> usize;
    fn classify(&self, frame: &Frame) -> Result<Distribution, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait ImageClassifierLoader {
    fn load(
        &self,
        model_location: &str,
        metadata_location: &str,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>;
}
