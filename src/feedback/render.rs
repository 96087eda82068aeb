use super::core::View;
use super::main::ColorFeedback;

impl ColorFeedback {
    pub(super) fn render(&self, view: &View) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self
            .device_display
            .lock()
            .map_err(|_| "display poisoned")?;

        device_display.set_theme(view.theme)?;
        device_display.set_swatch(&view.swatch)?;
        device_display.set_top(&view.top_label, &view.top_confidence)?;
        device_display.set_rows(&view.rows)?;
        device_display.set_status(&view.status)?;
        device_display.set_controls(view.controls)?;
        device_display.flush()?;

        Ok(())
    }
}
