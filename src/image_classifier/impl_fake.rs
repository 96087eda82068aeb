use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::{
    Classification, Distribution, ImageClassifier, ImageClassifierLoader,
};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution as _, Uniform};
#[cfg(test)]
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct Scene {
    dominant: Option<usize>,
    frames_left: u32,
}

/// Produces distributions that hold on one dominant class for a while, then
/// switch, sometimes to a scene where nothing dominates.
pub struct ImageClassifierFake {
    labels: Vec<String>,
    scene: Mutex<Scene>,
}

impl ImageClassifierFake {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            scene: Mutex::new(Scene {
                dominant: None,
                frames_left: 0,
            }),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn class_count(&self) -> usize {
        self.labels.len()
    }

    fn classify(&self, _frame: &Frame) -> Result<Distribution, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let mut scene = self
            .scene
            .lock()
            .map_err(|_| "fake classifier scene poisoned")?;

        if scene.frames_left == 0 {
            // One extra slot stands for "nothing in view".
            let pick = Uniform::new(0, self.labels.len() + 1)?.sample(&mut rng);
            scene.dominant = (pick < self.labels.len()).then_some(pick);
            scene.frames_left = Uniform::new(30, 180)?.sample(&mut rng);
        }
        scene.frames_left -= 1;

        let noise = Uniform::new(0.0f32, 1.0)?;
        let mut weights: Vec<f32> = self.labels.iter().map(|_| noise.sample(&mut rng)).collect();

        if let Some(dominant) = scene.dominant {
            let share = Uniform::new(0.55f32, 0.99)?.sample(&mut rng);
            let rest: f32 = weights
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != dominant)
                .map(|(_, w)| *w)
                .sum();
            for (i, weight) in weights.iter_mut().enumerate() {
                *weight = if i == dominant {
                    share
                } else if rest > 0.0 {
                    *weight / rest * (1.0 - share)
                } else {
                    0.0
                };
            }
        } else {
            let total: f32 = weights.iter().sum();
            if total > 0.0 {
                weights.iter_mut().for_each(|w| *w /= total);
            }
        }

        Ok(self
            .labels
            .iter()
            .zip(weights)
            .map(|(label, probability)| Classification::new(label, probability))
            .collect())
    }
}

/// Replays a fixed list of results, one per frame, and fails once exhausted.
#[cfg(test)]
pub struct ImageClassifierScripted {
    labels: Vec<String>,
    script: Mutex<VecDeque<Result<Vec<f32>, String>>>,
}

#[cfg(test)]
impl ImageClassifierScripted {
    pub fn new(labels: &[&str], script: Vec<Result<Vec<f32>, String>>) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            script: Mutex::new(script.into()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl ImageClassifier for ImageClassifierScripted {
    fn class_count(&self) -> usize {
        self.labels.len()
    }

    fn classify(&self, _frame: &Frame) -> Result<Distribution, Box<dyn std::error::Error + Send + Sync>> {
        let next = self
            .script
            .lock()
            .map_err(|_| "scripted classifier poisoned")?
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()))?;

        if next.len() != self.labels.len() {
            return Err(format!(
                "scripted {} probabilities for {} labels",
                next.len(),
                self.labels.len()
            )
            .into());
        }

        Ok(self
            .labels
            .iter()
            .zip(next)
            .map(|(label, probability)| Classification::new(label, probability))
            .collect())
    }
}

pub struct ImageClassifierLoaderFake {
    logger: Arc<dyn Logger + Send + Sync>,
    outcome: Result<Arc<dyn ImageClassifier + Send + Sync>, String>,
}

impl ImageClassifierLoaderFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            outcome: Ok(classifier),
        }
    }

    #[allow(dead_code)]
    pub fn failing(logger: Arc<dyn Logger + Send + Sync>, message: &str) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            outcome: Err(message.to_string()),
        }
    }
}

impl ImageClassifierLoader for ImageClassifierLoaderFake {
    fn load(
        &self,
        model_location: &str,
        metadata_location: &str,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Loading classifier from {} ({})",
            model_location, metadata_location
        ))?;

        match &self.outcome {
            Ok(classifier) => {
                self.logger.info(&format!(
                    "Classifier loaded with {} classes",
                    classifier.class_count()
                ))?;
                Ok(classifier.clone())
            }
            Err(message) => Err(message.clone().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0],
        }
    }

    #[test]
    fn test_fake_keeps_declared_order_and_count() {
        let classifier = ImageClassifierFake::new(&["Red", "Blue", "Green"]);

        for _ in 0..200 {
            let distribution = classifier.classify(&frame()).unwrap();
            let labels: Vec<&str> = distribution.iter().map(|c| c.label.as_str()).collect();
            assert_eq!(labels, vec!["Red", "Blue", "Green"]);
            assert!(distribution
                .iter()
                .all(|c| (0.0..=1.0).contains(&c.probability)));
        }
    }

    #[test]
    fn test_scripted_replays_then_fails() {
        let classifier = ImageClassifierScripted::new(
            &["A", "B"],
            vec![Ok(vec![0.9, 0.1]), Err("lost".to_string())],
        );

        let first = classifier.classify(&frame()).unwrap();
        assert_eq!(first[0], Classification::new("A", 0.9));

        let second = classifier.classify(&frame()).unwrap_err();
        assert_eq!(second.to_string(), "lost");

        let third = classifier.classify(&frame()).unwrap_err();
        assert_eq!(third.to_string(), "script exhausted");
        assert_eq!(classifier.remaining(), 0);
    }

    #[test]
    fn test_scripted_rejects_short_entries() {
        let classifier = ImageClassifierScripted::new(&["A", "B", "C"], vec![Ok(vec![0.9, 0.1])]);

        let err = classifier.classify(&frame()).unwrap_err();
        assert_eq!(err.to_string(), "scripted 2 probabilities for 3 labels");
    }
}
