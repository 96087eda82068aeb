use super::main::ColorFeedback;
use crate::device_speech::interface::Utterance;
use crate::error::FeedbackError;
use crate::feedback::core::{Effect, Msg};
use crate::image_classifier::interface::Distribution;
use std::time::Instant;

impl ColorFeedback {
    pub(super) fn run_effect(&self, effect: Effect) {
        if !matches!(effect, Effect::NextFrame { .. }) {
            let _ = self.logger.info(&format!("Running effect: {:?}", effect));
        }

        match effect {
            Effect::SubscribeToControls => {
                let events = match self.device_display.lock() {
                    Ok(display) => display.events(),
                    Err(_) => {
                        let _ = self.logger.error("Display poisoned, controls unavailable");
                        return;
                    }
                };
                while let Ok(event) = events.recv() {
                    if self.event_sender.send(Msg::Control(event)).is_err() {
                        return;
                    }
                }
            }
            Effect::LoadClassifier {
                session,
                model_location,
                metadata_location,
            } => {
                let result = self
                    .image_classifier_loader
                    .load(&model_location, &metadata_location)
                    .map_err(|e| FeedbackError::Load(e.to_string()))
                    .and_then(|classifier| {
                        let class_count = classifier.class_count();
                        let mut current = self
                            .image_classifier
                            .lock()
                            .map_err(|_| FeedbackError::Load("classifier slot poisoned".to_string()))?;
                        *current = Some(classifier);
                        Ok(class_count)
                    });
                let _ = self
                    .event_sender
                    .send(Msg::ClassifierLoadDone { session, result });
            }
            Effect::StartCamera { session } => {
                let result = self
                    .device_camera
                    .start()
                    .map_err(|e| FeedbackError::Device(e.to_string()));
                let _ = self.event_sender.send(Msg::CameraStartDone { session, result });
            }
            Effect::NextFrame { session } => {
                std::thread::sleep(self.config.frame_interval);
                let result = self.capture_and_classify();
                let _ = self.event_sender.send(Msg::FrameClassified {
                    session,
                    at: Instant::now(),
                    result,
                });
            }
            Effect::EmitTone(tone) => {
                if let Err(e) = self
                    .device_tone
                    .emit(tone.frequency_hz, tone.duration, tone.gain)
                {
                    let _ = self.logger.error(&format!("Tone failed: {}", e));
                }
            }
            Effect::Announce { text } => {
                let utterance = Utterance {
                    text,
                    rate: self.config.voice.rate,
                    pitch: self.config.voice.pitch,
                    volume: self.config.voice.volume,
                };
                let spoken = self
                    .device_speech
                    .cancel_all()
                    .and_then(|_| self.device_speech.speak(&utterance));
                if let Err(e) = spoken {
                    let _ = self.logger.error(&format!("Speech failed: {}", e));
                }
            }
            Effect::CancelSpeech => {
                if let Err(e) = self.device_speech.cancel_all() {
                    let _ = self.logger.error(&format!("Speech cancel failed: {}", e));
                }
            }
            Effect::StopCamera => {
                if let Err(e) = self.device_camera.stop() {
                    let _ = self.logger.error(&format!("Camera stop failed: {}", e));
                }
            }
        }
    }

    fn capture_and_classify(&self) -> Result<Distribution, FeedbackError> {
        let frame = self
            .device_camera
            .capture_frame()
            .map_err(|e| FeedbackError::Device(e.to_string()))?;

        let classifier = self
            .image_classifier
            .lock()
            .map_err(|_| FeedbackError::Classify("classifier slot poisoned".to_string()))?
            .clone()
            .ok_or_else(|| FeedbackError::Classify("classifier is not loaded".to_string()))?;

        classifier
            .classify(&frame)
            .map_err(|e| FeedbackError::Classify(e.to_string()))
    }
}
