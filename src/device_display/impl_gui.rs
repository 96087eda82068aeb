use crate::device_display::interface::{ControlEvent, DeviceDisplay};
use crate::feedback::core::Controls;
use crate::feedback::dispatch::{Swatch, Theme};
use crate::feedback::projection::RowView;
use eframe::egui;
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

type Subscribers = Arc<Mutex<Vec<Sender<ControlEvent>>>>;

#[derive(Clone)]
struct Screen {
    theme: Theme,
    swatch: Swatch,
    top_label: String,
    top_confidence: String,
    rows: Vec<RowView>,
    status: String,
    controls: Controls,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            theme: Theme::Neutral,
            swatch: Swatch::Transparent,
            top_label: String::new(),
            top_confidence: String::new(),
            rows: vec![],
            status: String::new(),
            controls: Controls {
                start_enabled: true,
                stop_enabled: false,
            },
        }
    }
}

struct DisplayWindow {
    screen: Arc<Mutex<Screen>>,
    subscribers: Subscribers,
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = match self.screen.lock() {
            Ok(screen) => screen.clone(),
            Err(_) => return,
        };
        let mut pressed = None;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(theme_background(screen.theme))
                    .inner_margin(16.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let start = egui::Button::new("Start");
                    if ui.add_enabled(screen.controls.start_enabled, start).clicked() {
                        pressed = Some(ControlEvent::Start);
                    }
                    let stop = egui::Button::new("Stop");
                    if ui.add_enabled(screen.controls.stop_enabled, stop).clicked() {
                        pressed = Some(ControlEvent::Stop);
                    }
                });
                ui.label(screen.status.as_str());
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(56.0, 56.0), egui::Sense::hover());
                    if let Some(color) = swatch_color(&screen.swatch) {
                        ui.painter().rect_filled(rect, 8.0, color);
                    }
                    ui.painter().rect_stroke(
                        rect,
                        8.0,
                        egui::Stroke::new(1.0, egui::Color32::from_rgb(148, 163, 184)),
                    );

                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(screen.top_label.as_str())
                                .size(28.0)
                                .strong()
                                .color(egui::Color32::WHITE),
                        );
                        ui.label(screen.top_confidence.as_str());
                    });
                });
                ui.add_space(12.0);

                for row in &screen.rows {
                    let name = egui::RichText::new(row.label.as_str());
                    ui.label(if row.is_top { name.strong() } else { name });
                    ui.add(
                        egui::ProgressBar::new(row.percent.min(100) as f32 / 100.0)
                            .text(format!("{}%", row.percent)),
                    );
                }
            });

        if let Some(event) = pressed {
            broadcast(&self.subscribers, event);
        }

        ctx.request_repaint_after(Duration::from_millis(33));
    }
}

fn theme_background(theme: Theme) -> egui::Color32 {
    match theme {
        Theme::Neutral => egui::Color32::from_rgb(30, 41, 59),
        Theme::Red => egui::Color32::from_rgb(127, 29, 29),
        Theme::Blue => egui::Color32::from_rgb(30, 58, 138),
        Theme::Green => egui::Color32::from_rgb(20, 83, 45),
    }
}

fn swatch_color(swatch: &Swatch) -> Option<egui::Color32> {
    let hex = match swatch {
        Swatch::Transparent => return None,
        Swatch::Color(hex) => hex.trim_start_matches('#'),
    };
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(egui::Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn broadcast(subscribers: &Subscribers, event: ControlEvent) {
    if let Ok(mut subscribers) = subscribers.lock() {
        subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

/// Window with Start/Stop buttons. Closing the window sends `Quit`.
pub struct DeviceDisplayGui {
    screen: Arc<Mutex<Screen>>,
    pending: Screen,
    subscribers: Subscribers,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::default())),
            pending: Screen::default(),
            subscribers: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl Default for DeviceDisplayGui {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let screen = self.screen.clone();
        let subscribers = self.subscribers.clone();

        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([420.0, 520.0])
                    .with_resizable(true),
                ..Default::default()
            };

            let window = DisplayWindow {
                screen,
                subscribers: subscribers.clone(),
            };

            // Blocks this thread until the window is closed
            let _ = eframe::run_native(
                "Color Feedback",
                options,
                Box::new(|_cc| Box::new(window)),
            );

            broadcast(&subscribers, ControlEvent::Quit);
        });

        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.theme = theme;
        Ok(())
    }

    fn set_swatch(&mut self, swatch: &Swatch) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.swatch = swatch.clone();
        Ok(())
    }

    fn set_top(&mut self, label: &str, confidence: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.top_label = label.to_string();
        self.pending.top_confidence = confidence.to_string();
        Ok(())
    }

    fn set_rows(&mut self, rows: &[RowView]) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.rows = rows.to_vec();
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.status = status.to_string();
        Ok(())
    }

    fn set_controls(&mut self, controls: Controls) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.controls = controls;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut screen = self.screen.lock().map_err(|_| "screen poisoned")?;
        *screen = self.pending.clone();
        Ok(())
    }

    fn events(&self) -> Receiver<ControlEvent> {
        let (tx, rx) = channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_color_parses_hex() {
        assert_eq!(
            swatch_color(&Swatch::Color("#ef4444".to_string())),
            Some(egui::Color32::from_rgb(0xef, 0x44, 0x44))
        );
        assert_eq!(swatch_color(&Swatch::Color("#zz0000".to_string())), None);
        assert_eq!(swatch_color(&Swatch::Transparent), None);
    }

    #[test]
    fn test_flush_publishes_pending_screen() {
        let mut display = DeviceDisplayGui::new();

        display.set_status("Running").unwrap();
        assert_eq!(display.screen.lock().unwrap().status, "");

        display.flush().unwrap();
        assert_eq!(display.screen.lock().unwrap().status, "Running");
    }

    #[test]
    fn test_broadcast_reaches_every_subscriber() {
        let display = DeviceDisplayGui::new();
        let first = display.events();
        let second = display.events();

        broadcast(&display.subscribers, ControlEvent::Stop);

        assert_eq!(first.recv().unwrap(), ControlEvent::Stop);
        assert_eq!(second.recv().unwrap(), ControlEvent::Stop);
    }
}
