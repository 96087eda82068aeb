use crate::error::FeedbackError;
use crate::feedback::dispatch::{Cooldowns, Theme, Tone};
use std::time::Duration;

const PLACEHOLDER_MARKER: &str = "PASTE_YOUR";

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub label: String,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwatchConfig {
    pub label: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub flip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base location of the classifier, must end with a slash.
    pub classifier_source: String,
    pub threshold: f32,
    pub cooldowns: Cooldowns,
    pub tone: Tone,
    pub voice: VoiceConfig,
    pub camera: CameraConfig,
    /// Display refresh interval that paces the frame loop.
    pub frame_interval: Duration,
    pub theme_table: Vec<ThemeConfig>,
    pub color_table: Vec<SwatchConfig>,
    pub logger_timezone: chrono::FixedOffset,
    pub display: DisplayKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier_source: "https://teachablemachine.withgoogle.com/models/BcJk2MJwz/"
                .to_string(),
            threshold: 0.60,
            cooldowns: Cooldowns {
                beep: Duration::from_millis(1000),
                voice: Duration::from_millis(2500),
            },
            tone: Tone {
                frequency_hz: 880.0,
                duration: Duration::from_millis(120),
                gain: 0.05,
            },
            voice: VoiceConfig {
                rate: 1.0,
                pitch: 1.0,
                volume: 1.0,
            },
            camera: CameraConfig {
                width: 640,
                height: 480,
                flip: true,
            },
            frame_interval: Duration::from_millis(16),
            theme_table: vec![
                theme_entry("Red", Theme::Red),
                theme_entry("Blue", Theme::Blue),
                theme_entry("Green", Theme::Green),
            ],
            color_table: vec![
                swatch_entry("red", "#ef4444"),
                swatch_entry("blue", "#3b82f6"),
                swatch_entry("green", "#22c55e"),
                swatch_entry("yellow", "#eab308"),
                swatch_entry("orange", "#f97316"),
                swatch_entry("purple", "#a855f7"),
                swatch_entry("pink", "#ec4899"),
                swatch_entry("white", "#f8fafc"),
                swatch_entry("black", "#1e293b"),
            ],
            logger_timezone: *chrono::Local::now().offset(),
            display: DisplayKind::Console,
        }
    }
}

impl Config {
    /// Defaults overlaid with `COLOR_FEEDBACK_*` environment variables.
    pub fn from_env() -> Result<Self, FeedbackError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, FeedbackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(source) = lookup("COLOR_FEEDBACK_SOURCE") {
            config.classifier_source = source;
        }
        if let Some(threshold) = lookup("COLOR_FEEDBACK_THRESHOLD") {
            config.threshold = threshold.trim().parse().map_err(|_| {
                FeedbackError::Config(format!("invalid threshold {:?}", threshold))
            })?;
        }
        if let Some(ms) = lookup("COLOR_FEEDBACK_BEEP_COOLDOWN_MS") {
            config.cooldowns.beep = parse_millis("COLOR_FEEDBACK_BEEP_COOLDOWN_MS", &ms)?;
        }
        if let Some(ms) = lookup("COLOR_FEEDBACK_VOICE_COOLDOWN_MS") {
            config.cooldowns.voice = parse_millis("COLOR_FEEDBACK_VOICE_COOLDOWN_MS", &ms)?;
        }
        if let Some(display) = lookup("COLOR_FEEDBACK_DISPLAY") {
            config.display = match display.trim().to_lowercase().as_str() {
                "console" => DisplayKind::Console,
                "gui" => DisplayKind::Gui,
                other => {
                    return Err(FeedbackError::Config(format!("unknown display {:?}", other)))
                }
            };
        }

        Ok(config)
    }

    /// Checked before any resource is acquired.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        let source = self.classifier_source.trim();
        if source.is_empty() || source.contains(PLACEHOLDER_MARKER) {
            return Err(FeedbackError::Config(
                "classifier source is missing".to_string(),
            ));
        }
        if !source.ends_with('/') {
            return Err(FeedbackError::Config(
                "classifier source must end with /".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FeedbackError::Config(format!(
                "threshold {} is outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn model_location(&self) -> String {
        format!("{}model.json", self.classifier_source.trim())
    }

    pub fn metadata_location(&self) -> String {
        format!("{}metadata.json", self.classifier_source.trim())
    }
}

fn theme_entry(label: &str, theme: Theme) -> ThemeConfig {
    ThemeConfig {
        label: label.to_string(),
        theme,
    }
}

fn swatch_entry(label: &str, hex: &str) -> SwatchConfig {
    SwatchConfig {
        label: label.to_string(),
        hex: hex.to_string(),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, FeedbackError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| FeedbackError::Config(format!("invalid {} {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.threshold, 0.60);
        assert_eq!(config.cooldowns.beep, Duration::from_millis(1000));
        assert_eq!(config.cooldowns.voice, Duration::from_millis(2500));
        assert_eq!(config.theme_table.len(), 3);
        assert_eq!(config.color_table.len(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_locations_derive_from_source() {
        let config = Config {
            classifier_source: "https://example.test/models/abc/".to_string(),
            ..Config::default()
        };

        assert_eq!(
            config.model_location(),
            "https://example.test/models/abc/model.json"
        );
        assert_eq!(
            config.metadata_location(),
            "https://example.test/models/abc/metadata.json"
        );
    }

    #[test]
    fn test_placeholder_source_is_rejected() {
        let config = Config {
            classifier_source: "PASTE_YOUR_MODEL_URL/".to_string(),
            ..Config::default()
        };

        assert!(matches!(config.validate(), Err(FeedbackError::Config(_))));
    }

    #[test]
    fn test_source_without_trailing_slash_is_rejected() {
        let config = Config {
            classifier_source: "https://example.test/models/abc".to_string(),
            ..Config::default()
        };

        assert!(matches!(config.validate(), Err(FeedbackError::Config(_))));
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let config = Config {
            threshold: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            threshold: f32::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("COLOR_FEEDBACK_SOURCE", "https://example.test/m/"),
            ("COLOR_FEEDBACK_THRESHOLD", "0.75"),
            ("COLOR_FEEDBACK_BEEP_COOLDOWN_MS", "500"),
            ("COLOR_FEEDBACK_VOICE_COOLDOWN_MS", "4000"),
            ("COLOR_FEEDBACK_DISPLAY", "GUI"),
        ]))
        .unwrap();

        assert_eq!(config.classifier_source, "https://example.test/m/");
        assert_eq!(config.threshold, 0.75);
        assert_eq!(config.cooldowns.beep, Duration::from_millis(500));
        assert_eq!(config.cooldowns.voice, Duration::from_millis(4000));
        assert_eq!(config.display, DisplayKind::Gui);
    }

    #[test]
    fn test_lookup_rejects_malformed_values() {
        let result = Config::from_lookup(lookup_from(&[("COLOR_FEEDBACK_THRESHOLD", "high")]));
        assert!(matches!(result, Err(FeedbackError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[("COLOR_FEEDBACK_DISPLAY", "tv")]));
        assert!(matches!(result, Err(FeedbackError::Config(_))));
    }
}
