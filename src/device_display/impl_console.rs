use crate::device_display::interface::{ControlEvent, DeviceDisplay};
use crate::feedback::core::Controls;
use crate::feedback::dispatch::{Swatch, Theme};
use crate::feedback::projection::RowView;
use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver};

/// Prints a summary line whenever the headline changes; rows are printed
/// only when their layout changes. Reads `start`, `stop` and `quit` from stdin.
pub struct DeviceDisplayConsole {
    theme: Theme,
    swatch: Swatch,
    top: (String, String),
    rows: Vec<RowView>,
    status: String,
    controls: Option<Controls>,
    last_summary: String,
    last_row_labels: Vec<String>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            theme: Theme::Neutral,
            swatch: Swatch::Transparent,
            top: (String::new(), String::new()),
            rows: vec![],
            status: String::new(),
            controls: None,
            last_summary: String::new(),
            last_row_labels: vec![],
        }
    }

    fn summary(&self) -> String {
        let swatch = match &self.swatch {
            Swatch::Transparent => "none".to_string(),
            Swatch::Color(hex) => hex.clone(),
        };
        let controls = match self.controls {
            Some(Controls {
                start_enabled: true,
                ..
            }) => "[start]",
            Some(Controls {
                stop_enabled: true, ..
            }) => "[stop]",
            _ => "",
        };
        format!(
            "{:?} | {} {} | swatch {} | {} {}",
            self.theme, self.top.0, self.top.1, swatch, self.status, controls
        )
    }

    fn render_rows(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                let filled = (row.percent.min(100) / 5) as usize;
                format!(
                    "{} {:<12} {:>3}% {}{}",
                    if row.is_top { ">" } else { " " },
                    row.label,
                    row.percent,
                    "#".repeat(filled),
                    ".".repeat(20 - filled)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for DeviceDisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("Commands: start, stop, quit");
        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.theme = theme;
        Ok(())
    }

    fn set_swatch(&mut self, swatch: &Swatch) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.swatch = swatch.clone();
        Ok(())
    }

    fn set_top(&mut self, label: &str, confidence: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.top = (label.to_string(), confidence.to_string());
        Ok(())
    }

    fn set_rows(&mut self, rows: &[RowView]) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.rows = rows.to_vec();
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.status = status.to_string();
        Ok(())
    }

    fn set_controls(&mut self, controls: Controls) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.controls = Some(controls);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let row_labels: Vec<String> = self.rows.iter().map(|r| r.label.clone()).collect();
        let summary = self.summary();

        if summary != self.last_summary || row_labels != self.last_row_labels {
            println!("{}", summary);
            if !self.rows.is_empty() {
                println!("{}", self.render_rows());
            }
            self.last_summary = summary;
            self.last_row_labels = row_labels;
        }
        Ok(())
    }

    fn events(&self) -> Receiver<ControlEvent> {
        let (tx, rx) = channel();

        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let event = match line.as_deref().map(|l| l.trim().to_lowercase()) {
                    Ok(command) if command == "start" => ControlEvent::Start,
                    Ok(command) if command == "stop" => ControlEvent::Stop,
                    Ok(command) if command == "quit" || command == "exit" => ControlEvent::Quit,
                    Ok(_) => continue,
                    Err(_) => break,
                };
                if tx.send(event).is_err() || event == ControlEvent::Quit {
                    return;
                }
            }
            let _ = tx.send(ControlEvent::Quit);
        });

        rx
    }
}
