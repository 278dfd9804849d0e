// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Question configuration data structures.
//!
//! This module defines the question file model: the background image,
//! the answerable choices with their marker-count policies, and the
//! drop-zone definitions shown for review.

use crate::models::shape::ShapeKind;
use serde::{Deserialize, Serialize};

/// How many markers of a choice may be placed on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPolicy {
    /// No ceiling; a fresh home spare is always offered.
    Unlimited,
    /// At most this many markers may be placed.
    Limited(u32),
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        DisplayPolicy::Limited(1)
    }
}

/// One answerable choice: a marker label plus its placement policy.
///
/// Choices are identified by their position in the question's choice
/// list; they are defined once at load and never change at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceDef {
    pub label: String,
    #[serde(default)]
    pub max_markers: DisplayPolicy,
    /// Previously saved placements in `"x1,y1;x2,y2;..."` form.
    #[serde(default)]
    pub answer: Option<String>,
}

/// A scored target region shown for review/feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropZoneDef {
    pub shape: ShapeKind,
    pub coords: String,
    /// Empty label means the zone is drawn without a visible label.
    #[serde(default, alias = "markertext")]
    pub label: String,
    /// Render the label as a clickable link rather than plain text.
    #[serde(default)]
    pub linked: bool,
}

/// Complete question definition as loaded from a question file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Path to the background image, relative to the question file.
    pub background: String,
    /// Override for the interactive image width; defaults to the
    /// decoded image width.
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    /// Review mode: markers cannot be moved, drop zones are shown.
    #[serde(default)]
    pub readonly: bool,
    pub choices: Vec<ChoiceDef>,
    #[serde(default)]
    pub dropzones: Vec<DropZoneDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_from_json() {
        let json = r#"{
            "background": "map.png",
            "readonly": false,
            "choices": [
                {"label": "Harbour", "max_markers": {"limited": 2}},
                {"label": "Lighthouse", "max_markers": "unlimited", "answer": "10,20"}
            ],
            "dropzones": [
                {"shape": "circle", "coords": "50,50;20", "label": "here"}
            ]
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.choices.len(), 2);
        assert_eq!(question.choices[0].max_markers, DisplayPolicy::Limited(2));
        assert_eq!(question.choices[1].max_markers, DisplayPolicy::Unlimited);
        assert_eq!(question.choices[1].answer.as_deref(), Some("10,20"));
        assert_eq!(question.dropzones[0].shape, ShapeKind::Circle);
        assert!(!question.dropzones[0].linked);
    }

    #[test]
    fn test_policy_defaults_to_single_marker() {
        let json = r#"{"background": "a.png", "choices": [{"label": "x"}]}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.choices[0].max_markers, DisplayPolicy::Limited(1));
    }
}
