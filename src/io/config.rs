// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Question file loading and validation.
//!
//! Question files are YAML or JSON, chosen by extension. A file that
//! parses but cannot support any interaction (no background image, no
//! choices) is rejected up front.

use crate::models::question::Question;
use anyhow::{bail, Result};
use std::path::Path;
use thiserror::Error;

/// A question configuration no session can be built from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("question has no background image path")]
    MissingBackground,
    #[error("question has no choices")]
    NoChoices,
}

/// Load and validate a question file.
pub fn load_question(path: &Path) -> Result<Question> {
    let text = std::fs::read_to_string(path)?;
    let extension = path.extension().and_then(|s| s.to_str());
    let question: Question = match extension {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("json") => serde_json::from_str(&text)?,
        _ => bail!("unsupported question file extension: {:?}", extension),
    };
    validate(&question)?;
    Ok(question)
}

/// Check that the question can support interaction at all.
pub fn validate(question: &Question) -> Result<(), ConfigError> {
    if question.background.is_empty() {
        return Err(ConfigError::MissingBackground);
    }
    if question.choices.is_empty() {
        return Err(ConfigError::NoChoices);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::ChoiceDef;

    fn minimal() -> Question {
        Question {
            background: "map.png".to_string(),
            width: None,
            height: None,
            readonly: false,
            choices: vec![ChoiceDef {
                label: "pin".to_string(),
                max_markers: Default::default(),
                answer: None,
            }],
            dropzones: Vec::new(),
        }
    }

    #[test]
    fn test_validate_accepts_minimal_question() {
        assert_eq!(validate(&minimal()), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_background() {
        let mut question = minimal();
        question.background.clear();
        assert_eq!(validate(&question), Err(ConfigError::MissingBackground));
    }

    #[test]
    fn test_validate_rejects_empty_choice_list() {
        let mut question = minimal();
        question.choices.clear();
        assert_eq!(validate(&question), Err(ConfigError::NoChoices));
    }
}
