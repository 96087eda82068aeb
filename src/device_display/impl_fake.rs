use crate::device_display::interface::{ControlEvent, DeviceDisplay};
use crate::feedback::core::Controls;
use crate::feedback::dispatch::{Swatch, Theme};
use crate::feedback::projection::RowView;
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplaySnapshot {
    pub theme: Theme,
    pub swatch: Swatch,
    pub top_label: String,
    pub top_confidence: String,
    pub rows: Vec<RowView>,
    pub status: String,
    pub controls: Option<Controls>,
    pub flushes: usize,
}

/// Records what was shown. Clones share state, so a test can keep a handle
/// while the loop owns another.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    snapshot: Arc<Mutex<DisplaySnapshot>>,
    subscribers: Arc<Mutex<Vec<Sender<ControlEvent>>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        self.snapshot.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Simulates the operator pressing a control.
    pub fn press(&self, event: ControlEvent) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(event).is_ok());
        }
    }

    fn update<F>(&self, apply: F) -> Result<(), Box<dyn Error + Send + Sync>>
    where
        F: FnOnce(&mut DisplaySnapshot),
    {
        let mut snapshot = self.snapshot.lock().map_err(|_| "snapshot poisoned")?;
        apply(&mut snapshot);
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|s| s.theme = theme)
    }

    fn set_swatch(&mut self, swatch: &Swatch) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|s| s.swatch = swatch.clone())
    }

    fn set_top(&mut self, label: &str, confidence: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|s| {
            s.top_label = label.to_string();
            s.top_confidence = confidence.to_string();
        })
    }

    fn set_rows(&mut self, rows: &[RowView]) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|s| s.rows = rows.to_vec())
    }

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|s| s.status = status.to_string())
    }

    fn set_controls(&mut self, controls: Controls) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|s| s.controls = Some(controls))
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|s| s.flushes += 1)
    }

    fn events(&self) -> Receiver<ControlEvent> {
        let (tx, rx) = channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}
