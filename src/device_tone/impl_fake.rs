use crate::device_tone::interface::DeviceTone;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct EmittedTone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub gain: f32,
}

#[derive(Default)]
pub struct DeviceToneFake {
    emitted: Mutex<Vec<EmittedTone>>,
}

impl DeviceToneFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> Vec<EmittedTone> {
        self.emitted.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DeviceTone for DeviceToneFake {
    fn emit(
        &self,
        frequency_hz: f32,
        duration: Duration,
        gain: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.emitted
            .lock()
            .map_err(|_| "tone log poisoned")?
            .push(EmittedTone {
                frequency_hz,
                duration,
                gain,
            });
        Ok(())
    }
}
