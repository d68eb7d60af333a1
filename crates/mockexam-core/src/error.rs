//! Error types for answer parsing and test-definition loading.
//!
//! `InvalidAnswer` is a user-input error and always recoverable: the quiz loop
//! prints it and asks again. `FormatError` is fatal for the file being parsed.

use std::path::PathBuf;

use thiserror::Error;

/// Why a letter-coded answer could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidAnswer {
    /// The question has no options to choose from.
    #[error("no options available")]
    NoOptions,

    /// Nothing left after trimming and removing whitespace.
    #[error("empty")]
    Empty,

    /// A letter outside `A..` the option count.
    #[error("letter out of range: {0}")]
    OutOfRange(char),

    /// Only separators were supplied (e.g. `","`).
    #[error("no valid answer indicated")]
    NoValidAnswer,
}

/// Malformed content in a test-definition file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A non-blank, non-comment line without a `key:` prefix.
    #[error("invalid format at line {line} in {source_label}")]
    Syntax { line: usize, source_label: String },

    /// A block is missing its id, text, options or correct answer.
    #[error("incomplete block near line {line} in {source_label}")]
    IncompleteBlock { line: usize, source_label: String },

    /// The `correct:` field does not parse against the block's options.
    #[error("invalid correct answers for question {id}: {reason}")]
    InvalidCorrect { id: String, reason: InvalidAnswer },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// A `Question` that violates its construction invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question {0} has no options")]
    NoOptions(String),

    #[error("question {id} has {option_count} options, at most 26 are supported")]
    TooManyOptions { id: String, option_count: usize },

    #[error("question {0} has no correct answer")]
    NoCorrectAnswer(String),

    #[error("question {id}: correct index {index} is out of range for {option_count} options")]
    IndexOutOfRange {
        id: String,
        index: usize,
        option_count: usize,
    },
}

/// Failure to load questions from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl LoadError {
    /// Returns `true` if the file was read but its content is malformed.
    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::Format(_))
    }
}
