use crate::device_speech::interface::{DeviceSpeech, Utterance};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCall {
    Speak(String),
    CancelAll,
}

#[derive(Default)]
struct SpeechLog {
    calls: Vec<SpeechCall>,
    active: Option<String>,
}

/// Records calls; an utterance stays active until the next cancel.
#[derive(Default)]
pub struct DeviceSpeechFake {
    log: Mutex<SpeechLog>,
}

impl DeviceSpeechFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SpeechCall> {
        self.log.lock().map(|l| l.calls.clone()).unwrap_or_default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SpeechCall::Speak(text) => Some(text),
                SpeechCall::CancelAll => None,
            })
            .collect()
    }

    pub fn active(&self) -> Option<String> {
        self.log.lock().ok().and_then(|l| l.active.clone())
    }
}

impl DeviceSpeech for DeviceSpeechFake {
    fn speak(&self, utterance: &Utterance) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut log = self.log.lock().map_err(|_| "speech log poisoned")?;
        if log.active.is_some() {
            return Err("utterance queued behind an active one".into());
        }
        log.calls.push(SpeechCall::Speak(utterance.text.clone()));
        log.active = Some(utterance.text.clone());
        Ok(())
    }

    fn cancel_all(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut log = self.log.lock().map_err(|_| "speech log poisoned")?;
        log.calls.push(SpeechCall::CancelAll);
        log.active = None;
        Ok(())
    }
}
