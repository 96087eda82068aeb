use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_speech::interface::DeviceSpeech;
use crate::device_tone::interface::DeviceTone;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader};
use crate::feedback::core::{init, transition, Effect, Msg, Session};
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct ColorFeedback {
    pub(super) config: Config,
    pub(super) logger: Arc<dyn Logger + Send + Sync>,
    pub(super) image_classifier_loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
    pub(super) image_classifier: Arc<Mutex<Option<Arc<dyn ImageClassifier + Send + Sync>>>>,
    pub(super) device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub(super) device_tone: Arc<dyn DeviceTone + Send + Sync>,
    pub(super) device_speech: Arc<dyn DeviceSpeech + Send + Sync>,
    pub(super) device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub(super) event_sender: Sender<Msg>,
    event_receiver: Arc<Mutex<Receiver<Msg>>>,
}

impl ColorFeedback {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier_loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_tone: Arc<dyn DeviceTone + Send + Sync>,
        device_speech: Arc<dyn DeviceSpeech + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("feedback"),
            image_classifier_loader,
            image_classifier: Arc::new(Mutex::new(None)),
            device_camera,
            device_tone,
            device_speech,
            device_display,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    /// Lets callers outside the loop inject messages, e.g. the initial start.
    pub fn sender(&self) -> Sender<Msg> {
        self.event_sender.clone()
    }

    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            if effect.is_blocking() {
                let self_clone = self.clone();
                std::thread::spawn(move || self_clone.run_effect(effect));
            } else {
                self.run_effect(effect);
            }
        }
    }

    /// Processes one message at a time until the session exits.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let event_receiver = self
            .event_receiver
            .lock()
            .map_err(|_| "event receiver poisoned")?;

        self.device_display
            .lock()
            .map_err(|_| "display poisoned")?
            .init()?;

        let (mut current_model, effects) = init();
        self.render(&current_model.view)?;
        self.execute_effects(effects);

        loop {
            let msg = event_receiver.recv()?;

            if let Some(err) = msg.error() {
                let _ = self.logger.error(&err.to_string());
            }

            let (new_model, effects) = transition(&self.config, current_model.clone(), msg.clone());

            let routine_frame = matches!(msg, Msg::FrameClassified { .. })
                && new_model.session == current_model.session
                && effects.iter().all(|e| matches!(e, Effect::NextFrame { .. }));
            if !routine_frame {
                let _ = self.logger.info(&format!(
                    "msg: {} -> session: {:?}, effects: {:?}",
                    msg.to_display_string(),
                    new_model.session,
                    effects
                ));
            }

            if new_model.view != current_model.view {
                self.render(&new_model.view)?;
            }

            current_model = new_model;
            self.execute_effects(effects);

            if current_model.session == Session::Exited {
                let _ = self.logger.info("Exited");
                return Ok(());
            }
        }
    }
}
