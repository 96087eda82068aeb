use crate::feedback::core::Controls;
use crate::feedback::dispatch::{Swatch, Theme};
use crate::feedback::projection::RowView;
use std::error::Error;
use std::sync::mpsc::Receiver;

/// Operator input coming from the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Start,
    Stop,
    Quit,
}

/// Presentation surface for the feedback loop.
///
/// Setters may buffer; nothing is guaranteed visible before `flush`.
pub trait DeviceDisplay: Send + Sync {
    /// Open the surface
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Select the page theme
    fn set_theme(&mut self, theme: Theme) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Fill the color swatch, or clear it for `Swatch::Transparent`
    fn set_swatch(&mut self, swatch: &Swatch) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Headline label and confidence text
    fn set_top(&mut self, label: &str, confidence: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace all probability rows, in display order
    fn set_rows(&mut self, rows: &[RowView]) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// One line of status text
    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Enable or disable the start and stop controls
    fn set_controls(&mut self, controls: Controls) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Make buffered changes visible
    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    /// Subscribe to operator controls. Each call returns a new receiver.
    fn events(&self) -> Receiver<ControlEvent>;
}
