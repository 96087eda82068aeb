use crate::device_tone::interface::DeviceTone;
use crate::library::logger::interface::Logger;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Rings the terminal bell in place of a synthesized tone.
pub struct DeviceToneConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceToneConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("tone").with_namespace("console"),
        }
    }
}

impl DeviceTone for DeviceToneConsole {
    fn emit(
        &self,
        frequency_hz: f32,
        duration: Duration,
        gain: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Beep {}Hz for {}ms at gain {}",
            frequency_hz,
            duration.as_millis(),
            gain
        ))?;
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}
