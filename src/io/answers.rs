// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Answer sheet serialization and deserialization.
//!
//! This module handles exporting and importing the per-choice placement
//! fields in YAML and JSON formats.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One choice's saved placements in persisted field form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceAnswer {
    pub label: String,
    /// `"x1,y1;x2,y2;..."`, empty when nothing is placed.
    pub placements: String,
}

/// All answers for a question, in choice order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub answers: Vec<ChoiceAnswer>,
}

/// Export an answer sheet to YAML format.
pub fn export_yaml(sheet: &AnswerSheet, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(sheet)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export an answer sheet to JSON format.
pub fn export_json(sheet: &AnswerSheet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(sheet)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import an answer sheet from YAML format.
pub fn import_yaml(path: &Path) -> Result<AnswerSheet> {
    let yaml = std::fs::read_to_string(path)?;
    let sheet = serde_yaml::from_str(&yaml)?;
    Ok(sheet)
}

/// Import an answer sheet from JSON format.
pub fn import_json(path: &Path) -> Result<AnswerSheet> {
    let json = std::fs::read_to_string(path)?;
    let sheet = serde_json::from_str(&json)?;
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_sheet_json_roundtrip() {
        let sheet = AnswerSheet {
            answers: vec![
                ChoiceAnswer {
                    label: "Harbour".to_string(),
                    placements: "10,20;30,40".to_string(),
                },
                ChoiceAnswer {
                    label: "Lighthouse".to_string(),
                    placements: String::new(),
                },
            ],
        };
        let json = serde_json::to_string(&sheet).unwrap();
        let back: AnswerSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sheet);
    }
}
