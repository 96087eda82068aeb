use super::decision::classify;
use super::dispatch::{dispatch, ChannelState, Swatch, Theme, Tone};
use super::projection::{placeholder_rows, project, top_text, RowView};
use crate::config::Config;
use crate::device_display::interface::ControlEvent;
use crate::error::FeedbackError;
use crate::image_classifier::interface::{Classification, Distribution};
use std::time::Instant;

pub const STATUS_OFF: &str = "Camera is off";
pub const STATUS_LOADING: &str = "Loading model…";
pub const STATUS_STARTING_CAMERA: &str = "Starting camera…";
pub const STATUS_RUNNING: &str = "Running. Show something Red, Blue, or Green.";
const NO_VALUE: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartStage {
    LoadingClassifier,
    StartingCamera { class_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Stopped,
    Starting {
        id: u64,
        stage: StartStage,
    },
    Running {
        id: u64,
        class_count: usize,
    },
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub theme: Theme,
    pub swatch: Swatch,
    pub rows: Vec<RowView>,
    pub top_label: String,
    pub top_confidence: String,
    pub status: String,
    pub controls: Controls,
}

impl View {
    pub fn stopped(status: &str) -> Self {
        Self {
            theme: Theme::Neutral,
            swatch: Swatch::Transparent,
            rows: vec![],
            top_label: NO_VALUE.to_string(),
            top_confidence: NO_VALUE.to_string(),
            status: status.to_string(),
            controls: Controls {
                start_enabled: true,
                stop_enabled: false,
            },
        }
    }

    fn busy(status: &str) -> Self {
        Self {
            controls: Controls {
                start_enabled: false,
                stop_enabled: true,
            },
            ..Self::stopped(status)
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::stopped(STATUS_OFF)
    }
}

/// The whole session context. Only `transition` produces new values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub session: Session,
    pub channels: ChannelState,
    pub view: View,
    pub last_session_id: u64,
}

impl Model {
    pub fn is_running(&self) -> bool {
        matches!(self.session, Session::Running { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Control(ControlEvent),
    ClassifierLoadDone {
        session: u64,
        result: Result<usize, FeedbackError>,
    },
    CameraStartDone {
        session: u64,
        result: Result<(), FeedbackError>,
    },
    FrameClassified {
        session: u64,
        at: Instant,
        result: Result<Distribution, FeedbackError>,
    },
}

impl Msg {
    pub fn error(&self) -> Option<&FeedbackError> {
        match self {
            Msg::ClassifierLoadDone {
                result: Err(err), ..
            }
            | Msg::CameraStartDone {
                result: Err(err), ..
            }
            | Msg::FrameClassified {
                result: Err(err), ..
            } => Some(err),
            _ => None,
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Msg::FrameClassified {
                session,
                result: Ok(distribution),
                ..
            } => format!(
                "FrameClassified {{ session: {}, classes: {:?} }}",
                session,
                distribution
                    .iter()
                    .map(|c| format!("{} {:.2}", c.label, c.probability))
                    .collect::<Vec<_>>()
            ),
            msg => format!("{:?}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToControls,
    LoadClassifier {
        session: u64,
        model_location: String,
        metadata_location: String,
    },
    StartCamera {
        session: u64,
    },
    /// Wait for the next display refresh, capture, classify.
    NextFrame {
        session: u64,
    },
    EmitTone(Tone),
    /// Cancel whatever is being said, then say `text`.
    Announce {
        text: String,
    },
    CancelSpeech,
    StopCamera,
}

impl Effect {
    /// Effects that wait on a collaborator run off the message loop.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Effect::SubscribeToControls
                | Effect::LoadClassifier { .. }
                | Effect::StartCamera { .. }
                | Effect::NextFrame { .. }
        )
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![Effect::SubscribeToControls])
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match (model.session, msg) {
        (Session::Exited, _) => (model, vec![]),

        (_, Msg::Control(ControlEvent::Quit)) => {
            let (mut stopped, effects) = stop(model, View::stopped(STATUS_OFF));
            stopped.session = Session::Exited;
            (stopped, effects)
        }

        (Session::Stopped, Msg::Control(ControlEvent::Start)) => start(config, model),

        (Session::Stopped, Msg::Control(ControlEvent::Stop)) => (model, vec![]),

        (_, Msg::Control(ControlEvent::Stop)) => stop(model, View::stopped(STATUS_OFF)),

        (_, Msg::Control(ControlEvent::Start)) => (model, vec![]),

        (
            Session::Starting {
                id,
                stage: StartStage::LoadingClassifier,
            },
            Msg::ClassifierLoadDone { session, result },
        ) if session == id => match result {
            Ok(0) => fail(
                model,
                FeedbackError::Load("classifier declares no classes".to_string()),
            ),
            Ok(class_count) => (
                Model {
                    session: Session::Starting {
                        id,
                        stage: StartStage::StartingCamera { class_count },
                    },
                    view: View::busy(STATUS_STARTING_CAMERA),
                    ..model
                },
                vec![Effect::StartCamera { session: id }],
            ),
            Err(err) => fail(model, err),
        },

        (
            Session::Starting {
                id,
                stage: StartStage::StartingCamera { class_count },
            },
            Msg::CameraStartDone { session, result },
        ) if session == id => match result {
            Ok(()) => (
                Model {
                    session: Session::Running { id, class_count },
                    channels: ChannelState::default(),
                    view: View {
                        rows: placeholder_rows(class_count),
                        ..View::busy(STATUS_RUNNING)
                    },
                    ..model
                },
                vec![Effect::NextFrame { session: id }],
            ),
            Err(err) => fail(model, err),
        },

        (
            Session::Running { id, class_count },
            Msg::FrameClassified {
                session,
                at,
                result,
            },
        ) if session == id => match result.and_then(|d| check_distribution(d, class_count)) {
            Ok(distribution) => on_frame(config, model, id, at, &distribution),
            Err(err) => fail(model, err),
        },

        // A camera that finished starting after its session was stopped.
        (Session::Stopped, Msg::CameraStartDone { result: Ok(()), .. }) => {
            (model, vec![Effect::StopCamera])
        }

        // Completions from an earlier session, or arriving out of stage.
        _ => (model, vec![]),
    }
}

fn start(config: &Config, model: Model) -> (Model, Vec<Effect>) {
    if let Err(err) = config.validate() {
        return (
            Model {
                view: View::stopped(&err.to_status()),
                ..model
            },
            vec![],
        );
    }

    let id = model.last_session_id + 1;
    (
        Model {
            session: Session::Starting {
                id,
                stage: StartStage::LoadingClassifier,
            },
            channels: ChannelState::default(),
            view: View::busy(STATUS_LOADING),
            last_session_id: id,
        },
        vec![Effect::LoadClassifier {
            session: id,
            model_location: config.model_location(),
            metadata_location: config.metadata_location(),
        }],
    )
}

fn stop(model: Model, view: View) -> (Model, Vec<Effect>) {
    (
        Model {
            session: Session::Stopped,
            channels: ChannelState::default(),
            view,
            ..model
        },
        vec![Effect::CancelSpeech, Effect::StopCamera],
    )
}

/// Any failure ends the session the same way an operator stop does.
fn fail(model: Model, err: FeedbackError) -> (Model, Vec<Effect>) {
    stop(model, View::stopped(&err.to_status()))
}

fn check_distribution(
    distribution: Distribution,
    class_count: usize,
) -> Result<Distribution, FeedbackError> {
    if distribution.is_empty() {
        return Err(FeedbackError::EmptyDistribution);
    }
    if distribution.len() != class_count {
        return Err(FeedbackError::ClassCountMismatch {
            expected: class_count,
            actual: distribution.len(),
        });
    }
    Ok(distribution)
}

fn on_frame(
    config: &Config,
    model: Model,
    id: u64,
    at: Instant,
    distribution: &[Classification],
) -> (Model, Vec<Effect>) {
    let decision = classify(distribution, config.threshold);
    let feedback = dispatch(config, &decision, at, model.channels.clone());
    let (top_label, top_confidence) = top_text(&decision);

    let mut effects = vec![];
    if let Some(tone) = feedback.beep {
        effects.push(Effect::EmitTone(tone));
    }
    if let Some(text) = feedback.announce {
        effects.push(Effect::Announce { text });
    }
    effects.push(Effect::NextFrame { session: id });

    (
        Model {
            channels: feedback.channels,
            view: View {
                theme: feedback.theme,
                swatch: feedback.swatch,
                rows: project(distribution, &decision),
                top_label,
                top_confidence,
                ..model.view
            },
            ..model
        },
        effects,
    )
}
