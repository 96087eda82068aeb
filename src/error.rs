use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedbackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Classifier failed to load: {0}")]
    Load(String),

    #[error("Camera unavailable: {0}")]
    Device(String),

    #[error("Classification failed: {0}")]
    Classify(String),

    #[error("Classifier returned no classes")]
    EmptyDistribution,

    #[error("Classifier returned {actual} classes, expected {expected}")]
    ClassCountMismatch { expected: usize, actual: usize },
}

impl FeedbackError {
    /// Text shown to the operator when the session ends because of this error.
    pub fn to_status(&self) -> String {
        match self {
            FeedbackError::Config(message) => format!("Fix the configuration: {}", message),
            FeedbackError::Load(_) | FeedbackError::Device(_) => {
                "Could not start. Check permissions and the classifier source.".to_string()
            }
            FeedbackError::Classify(_)
            | FeedbackError::EmptyDistribution
            | FeedbackError::ClassCountMismatch { .. } => format!("Stopped: {}", self),
        }
    }
}
