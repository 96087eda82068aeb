use crate::image_classifier::interface::Classification;

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Unsure,
    Confident { label: String, probability: f32 },
}

impl Decision {
    pub fn label(&self) -> Option<&str> {
        match self {
            Decision::Unsure => None,
            Decision::Confident { label, .. } => Some(label),
        }
    }
}

/// Highest-probability entry; the first one wins a tie. NaN never beats a number.
pub fn top_entry(distribution: &[Classification]) -> Option<&Classification> {
    distribution.iter().fold(None, |best, candidate| match best {
        Some(best)
            if best.probability >= candidate.probability || candidate.probability.is_nan() =>
        {
            Some(best)
        }
        _ => Some(candidate),
    })
}

pub fn classify(distribution: &[Classification], threshold: f32) -> Decision {
    match top_entry(distribution) {
        Some(top) if top.probability >= threshold => Decision::Confident {
            label: top.label.clone(),
            probability: top.probability,
        },
        _ => Decision::Unsure,
    }
}
