use std::time::Duration;

/// Fire-and-forget tone output.
pub trait DeviceTone {
    fn emit(
        &self,
        frequency_hz: f32,
        duration: Duration,
        gain: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
