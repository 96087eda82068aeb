use crate::device_speech::interface::{DeviceSpeech, Utterance};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub struct DeviceSpeechConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceSpeechConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("speech").with_namespace("console"),
        }
    }
}

impl DeviceSpeech for DeviceSpeechConsole {
    fn speak(&self, utterance: &Utterance) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Saying \"{}\" (rate {}, pitch {}, volume {})",
            utterance.text, utterance.rate, utterance.pitch, utterance.volume
        ))
    }

    fn cancel_all(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Cancelling speech")
    }
}
