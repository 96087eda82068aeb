#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

pub trait DeviceSpeech {
    /// Starts speaking without waiting for the utterance to finish.
    fn speak(&self, utterance: &Utterance) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Stops any utterance in progress before returning.
    fn cancel_all(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
