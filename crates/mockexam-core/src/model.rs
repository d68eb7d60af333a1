//! The `Question` type shared by the parser, the built-in bank and the quiz loop.

use crate::codec::{AnswerSet, MAX_OPTIONS};
use crate::error::QuestionError;

/// A multiple-choice question with its answer key.
///
/// Immutable once built: every correct index is guaranteed to point at an
/// existing option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: String,
    text: String,
    options: Vec<String>,
    correct: AnswerSet,
    explanation: Option<String>,
}

impl Question {
    /// Build a question, checking that `correct` is non-empty and in range.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
        correct: AnswerSet,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let id = id.into();
        if options.is_empty() {
            return Err(QuestionError::NoOptions(id));
        }
        if options.len() > MAX_OPTIONS {
            return Err(QuestionError::TooManyOptions {
                id,
                option_count: options.len(),
            });
        }
        if correct.is_empty() {
            return Err(QuestionError::NoCorrectAnswer(id));
        }
        if let Some(index) = correct.iter().find(|&i| i >= options.len()) {
            return Err(QuestionError::IndexOutOfRange {
                id,
                index,
                option_count: options.len(),
            });
        }

        Ok(Self {
            id,
            text: text.into(),
            options,
            correct,
            explanation,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct(&self) -> &AnswerSet {
        &self.correct
    }

    /// The explanation, if present and not blank.
    pub fn explanation(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// `true` when more than one option is correct.
    pub fn is_multiple_choice(&self) -> bool {
        self.correct.len() > 1
    }

    /// Whether `answer` matches the key exactly (as a set).
    pub fn is_correct(&self, answer: &AnswerSet) -> bool {
        &self.correct == answer
    }
}
