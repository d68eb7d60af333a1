//! Running tally for one pass through a question set.

use std::time::{Duration, Instant};

use crate::codec::AnswerSet;
use crate::model::Question;

/// Outcome of grading a single answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    /// The answer key, for display on a miss.
    pub expected: AnswerSet,
}

/// Counters for a quiz in progress.
#[derive(Debug, Clone)]
pub struct Session {
    total: usize,
    correct: usize,
    wrong: usize,
    started: Instant,
}

impl Session {
    /// Start a session over `total` questions.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            correct: 0,
            wrong: 0,
            started: Instant::now(),
        }
    }

    /// Grade `answer` against `question` and update the counters.
    pub fn grade(&mut self, question: &Question, answer: &AnswerSet) -> Verdict {
        let correct = question.is_correct(answer);
        if correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
        tracing::debug!(id = question.id(), correct, "graded answer");
        Verdict {
            correct,
            expected: question.correct().clone(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn wrong(&self) -> usize {
        self.wrong
    }

    pub fn answered(&self) -> usize {
        self.correct + self.wrong
    }

    /// Percentage correct among the questions answered so far.
    pub fn running_percentage(&self) -> f64 {
        percentage(self.correct, self.answered())
    }

    /// Percentage correct over the whole question set.
    pub fn final_percentage(&self) -> f64 {
        percentage(self.correct, self.total)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

/// Format a duration as `mm:ss`, or `hh:mm:ss` from one hour up.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
