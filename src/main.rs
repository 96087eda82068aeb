use config::{Config, DisplayKind};
use device_camera::impl_fake::DeviceCameraFake;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::{ControlEvent, DeviceDisplay};
use device_speech::impl_console::DeviceSpeechConsole;
use device_tone::impl_console::DeviceToneConsole;
use feedback::core::Msg;
use feedback::main::ColorFeedback;
use image_classifier::impl_fake::{ImageClassifierFake, ImageClassifierLoaderFake};
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::sync::{Arc, Mutex};

mod config;
mod device_camera;
mod device_display;
mod device_speech;
mod device_tone;
mod error;
mod feedback;
mod image_classifier;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = Arc::new(DeviceCameraFake::new(logger.clone(), config.camera.clone()));

    let image_classifier = Arc::new(ImageClassifierFake::new(&["Red", "Blue", "Green", "Yellow"]));

    let image_classifier_loader =
        Arc::new(ImageClassifierLoaderFake::new(logger.clone(), image_classifier));

    let device_tone = Arc::new(DeviceToneConsole::new(logger.clone()));

    let device_speech = Arc::new(DeviceSpeechConsole::new(logger.clone()));

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match config.display {
        DisplayKind::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayKind::Gui => Arc::new(Mutex::new(DeviceDisplayGui::new())),
    };

    let color_feedback = ColorFeedback::new(
        config,
        logger,
        image_classifier_loader,
        device_camera,
        device_tone,
        device_speech,
        device_display,
    );

    color_feedback
        .sender()
        .send(Msg::Control(ControlEvent::Start))?;

    color_feedback.run()?;

    Ok(())
}
