use super::decision::Decision;
use crate::config::Config;
use crate::library::cooldown;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Neutral,
    Red,
    Blue,
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Swatch {
    #[default]
    Transparent,
    /// CSS-style hex, e.g. `#ef4444`.
    Color(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub gain: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldowns {
    pub beep: Duration,
    pub voice: Duration,
}

/// Cross-frame suppression state for the beep and voice channels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelState {
    pub last_beep_at: Option<Instant>,
    pub last_spoken_label: Option<String>,
    pub last_spoken_at: Option<Instant>,
}

/// What one decision asks of each channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub theme: Theme,
    pub swatch: Swatch,
    pub beep: Option<Tone>,
    pub announce: Option<String>,
    pub channels: ChannelState,
}

pub fn theme_for_label(config: &Config, label: &str) -> Theme {
    config
        .theme_table
        .iter()
        .find(|entry| entry.label == label)
        .map(|entry| entry.theme)
        .unwrap_or_default()
}

pub fn swatch_for_label(config: &Config, label: &str) -> Swatch {
    config
        .color_table
        .iter()
        .find(|entry| entry.label.eq_ignore_ascii_case(label))
        .map(|entry| Swatch::Color(entry.hex.clone()))
        .unwrap_or_default()
}

pub fn dispatch(
    config: &Config,
    decision: &Decision,
    now: Instant,
    mut channels: ChannelState,
) -> Feedback {
    let label = match decision {
        Decision::Unsure => {
            // Re-arm voice: the next confident label is announced immediately.
            channels.last_spoken_label = None;
            return Feedback {
                theme: Theme::Neutral,
                swatch: Swatch::Transparent,
                beep: None,
                announce: None,
                channels,
            };
        }
        Decision::Confident { label, .. } => label,
    };

    let beep = if cooldown::allow(now, channels.last_beep_at, config.cooldowns.beep) {
        channels.last_beep_at = Some(now);
        Some(config.tone)
    } else {
        None
    };

    let label_changed = channels.last_spoken_label.as_deref() != Some(label.as_str());
    let announce = if label_changed
        || cooldown::allow(now, channels.last_spoken_at, config.cooldowns.voice)
    {
        channels.last_spoken_label = Some(label.clone());
        channels.last_spoken_at = Some(now);
        Some(label.clone())
    } else {
        None
    };

    Feedback {
        theme: theme_for_label(config, label),
        swatch: swatch_for_label(config, label),
        beep,
        announce,
        channels,
    }
}
