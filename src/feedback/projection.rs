use super::decision::{top_entry, Decision};
use crate::image_classifier::interface::Classification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub label: String,
    pub percent: u32,
    pub is_top: bool,
}

/// One row per class in declared order; the highlighted row follows the
/// decision, or the raw top entry when unsure.
pub fn project(distribution: &[Classification], decision: &Decision) -> Vec<RowView> {
    let top_label = decision
        .label()
        .or_else(|| top_entry(distribution).map(|top| top.label.as_str()));

    distribution
        .iter()
        .map(|entry| RowView {
            label: entry.label.clone(),
            percent: to_percent(entry.probability),
            is_top: Some(entry.label.as_str()) == top_label,
        })
        .collect()
}

/// Rows shown between camera start and the first classified frame.
pub fn placeholder_rows(class_count: usize) -> Vec<RowView> {
    (1..=class_count)
        .map(|n| RowView {
            label: format!("Class {}", n),
            percent: 0,
            is_top: false,
        })
        .collect()
}

/// Headline label and confidence text.
pub fn top_text(decision: &Decision) -> (String, String) {
    match decision {
        Decision::Unsure => ("Not sure".to_string(), "Try again".to_string()),
        Decision::Confident { label, probability } => {
            (label.clone(), format!("{}%", to_percent(*probability)))
        }
    }
}

fn to_percent(probability: f32) -> u32 {
    (probability * 100.0).round() as u32
}
