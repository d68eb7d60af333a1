//! mockexam-core — Answer codec, test-definition parser, and grading.
//!
//! This crate holds everything with real logic in mockexam: turning letter
//! input like `"A,C"` into option indexes, parsing test-definition files into
//! questions, and keeping score. The CLI crate only drives the interaction.

pub mod bank;
pub mod codec;
pub mod error;
pub mod model;
pub mod parser;
pub mod session;

pub use codec::{format_answer, parse_answer, AnswerSet};
pub use error::{FormatError, InvalidAnswer, LoadError, QuestionError};
pub use model::Question;
