//! Test-definition file parser.
//!
//! A test file is a sequence of blank-line separated blocks of `key: value`
//! lines:
//!
//! ```text
//! # comment
//! id: Q1
//! text: What is 2+2?
//! option: A) 3
//! option: B) 4
//! correct: B
//! answer: Basic arithmetic.
//!
//! id: Q2
//! text: Pick primes.
//! options: 2 | 3 | 4 | 5
//! correct: A,B,D
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::codec::parse_answer;
use crate::error::{FormatError, LoadError};
use crate::model::Question;

/// Extension of test-definition files.
pub const TEST_FILE_EXTENSION: &str = "txt";

/// Fields collected for the block currently being read.
#[derive(Debug, Default)]
struct PendingBlock {
    id: Option<String>,
    text: Option<String>,
    options: Vec<String>,
    correct: Option<String>,
    explanation: Option<String>,
}

impl PendingBlock {
    fn has_content(&self) -> bool {
        self.id.is_some()
            || self.text.is_some()
            || !self.options.is_empty()
            || self.correct.is_some()
            || self.explanation.is_some()
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "id" => self.id = Some(value.to_string()),
            "text" => self.text = Some(value.to_string()),
            "option" => self.options.push(strip_option_prefix(value)),
            "options" => self.options.extend(
                value
                    .split('|')
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty())
                    .map(strip_option_prefix),
            ),
            "correct" => self.correct = Some(value.to_string()),
            "answer" => self.explanation = Some(value.to_string()),
            other => tracing::debug!(key = other, "ignoring unknown key"),
        }
    }

    /// Validate the block and turn it into a `Question`, leaving `self` empty.
    fn flush(&mut self, line: usize, source_label: &str) -> Result<Question, FormatError> {
        let block = std::mem::take(self);
        let (Some(id), Some(text), Some(correct_raw)) = (block.id, block.text, block.correct)
        else {
            return Err(incomplete(line, source_label));
        };
        if block.options.is_empty() {
            return Err(incomplete(line, source_label));
        }

        let correct = parse_answer(&correct_raw, block.options.len()).map_err(|reason| {
            FormatError::InvalidCorrect {
                id: id.clone(),
                reason,
            }
        })?;

        tracing::debug!(id = %id, options = block.options.len(), "parsed question block");
        Ok(Question::new(
            id,
            text,
            block.options,
            correct,
            block.explanation,
        )?)
    }
}

fn incomplete(line: usize, source_label: &str) -> FormatError {
    FormatError::IncompleteBlock {
        line,
        source_label: source_label.to_string(),
    }
}

/// Remove a leading `"B) "` or `"2) "` label from an option value.
fn strip_option_prefix(value: &str) -> String {
    let mut rest = value;

    let mut chars = rest.chars();
    if let (Some(letter), Some(')')) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            rest = chars.as_str().trim_start();
        }
    }

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(after) = rest[digits..].strip_prefix(')') {
            rest = after.trim_start();
        }
    }

    rest.trim().to_string()
}

/// Parse test-definition lines into questions, in block order.
///
/// `source_label` names the input in error messages (usually the file path).
/// Empty input is not an error and yields no questions.
pub fn parse_lines<I, S>(lines: I, source_label: &str) -> Result<Vec<Question>, FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut questions = Vec::new();
    let mut pending = PendingBlock::default();
    let mut line_number = 0;

    for line in lines {
        line_number += 1;
        let trimmed = line.as_ref().trim();

        if trimmed.is_empty() {
            if pending.has_content() {
                questions.push(pending.flush(line_number, source_label)?);
            }
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = match trimmed.split_once(':') {
            Some((key, value)) if !key.is_empty() => (key, value),
            _ => {
                return Err(FormatError::Syntax {
                    line: line_number,
                    source_label: source_label.to_string(),
                })
            }
        };

        pending.apply(&key.trim().to_ascii_lowercase(), value.trim());
    }

    if pending.has_content() {
        questions.push(pending.flush(line_number, source_label)?);
    }

    Ok(questions)
}

/// Parse a whole test-definition string.
pub fn parse_str(content: &str, source_label: &str) -> Result<Vec<Question>, FormatError> {
    parse_lines(content.lines(), source_label)
}

/// Read and parse a test-definition file.
pub fn parse_test_file(path: &Path) -> Result<Vec<Question>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let questions = parse_str(&content, &path.display().to_string())?;
    tracing::info!(path = %path.display(), count = questions.len(), "loaded test file");
    Ok(questions)
}

/// Path of the test called `name` inside `dir`.
pub fn test_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{TEST_FILE_EXTENSION}", name.trim()))
}

/// Load the test called `name` from `dir`.
///
/// A missing file is `Ok(None)`: the caller decides what to use instead.
pub fn load_named_test(dir: &Path, name: &str) -> Result<Option<Vec<Question>>, LoadError> {
    let path = test_path(dir, name);
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "test file not found");
        return Ok(None);
    }
    parse_test_file(&path).map(Some)
}

/// All test-definition files directly inside `dir`, sorted by path.
pub fn test_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == TEST_FILE_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Names of the tests available in `dir` (file stems, sorted).
pub fn list_tests(dir: &Path) -> Result<Vec<String>> {
    Ok(test_files(dir)?
        .iter()
        .filter_map(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect())
}

/// A warning from question-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a parsed question set for issues that do not stop it from loading.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for q in questions {
        if !seen_ids.insert(q.id()) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id().to_string()),
                message: format!("duplicate question ID: {}", q.id()),
            });
        }
    }

    // Check for blank prompts and options
    for q in questions {
        if q.text().trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id().to_string()),
                message: "question text is empty".into(),
            });
        }
        if let Some(pos) = q.options().iter().position(|o| o.trim().is_empty()) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id().to_string()),
                message: format!("option {} is empty", crate::codec::index_letter(pos)),
            });
        }
    }

    // Check for a file with no questions at all
    if questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "no questions defined".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AnswerSet;
    use crate::error::{InvalidAnswer, QuestionError};

    const TWO_BLOCKS: &str = "\
id: Q1
text: What is 2+2?
option: A) 3
option: B) 4
correct: B
answer: Basic arithmetic.

id: Q2
text: Pick primes.
options: 2 | 3 | 4 | 5
correct: A,B,D
";

    fn set(indexes: &[usize]) -> AnswerSet {
        indexes.iter().copied().collect()
    }

    #[test]
    fn parse_two_blocks() {
        let questions = parse_str(TWO_BLOCKS, "sample.txt").unwrap();
        assert_eq!(questions.len(), 2);

        let q1 = &questions[0];
        assert_eq!(q1.id(), "Q1");
        assert_eq!(q1.text(), "What is 2+2?");
        assert_eq!(q1.options(), ["3", "4"]);
        assert_eq!(q1.correct(), &set(&[1]));
        assert_eq!(q1.explanation(), Some("Basic arithmetic."));

        let q2 = &questions[1];
        assert_eq!(q2.id(), "Q2");
        assert_eq!(q2.options(), ["2", "3", "4", "5"]);
        assert_eq!(q2.correct(), &set(&[0, 1, 3]));
        assert!(q2.is_multiple_choice());
        assert_eq!(q2.explanation(), None);
    }

    #[test]
    fn empty_input_yields_no_questions() {
        assert!(parse_str("", "empty.txt").unwrap().is_empty());
        assert!(parse_str("\n\n   \n", "blank.txt").unwrap().is_empty());
        assert!(parse_str("# only a comment\n", "c.txt").unwrap().is_empty());
    }

    #[test]
    fn extra_blank_lines_do_not_create_questions() {
        let padded = format!("\n\n\n{}\n\n\n", TWO_BLOCKS.replace("\n\n", "\n\n\n   \n\n"));
        let questions = parse_str(&padded, "padded.txt").unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn missing_correct_is_incomplete() {
        let input = "id: Q1\ntext: t\noption: a\n\n";
        let err = parse_str(input, "t.txt").unwrap_err();
        assert_eq!(
            err,
            FormatError::IncompleteBlock {
                line: 4,
                source_label: "t.txt".into()
            }
        );
        assert!(err.to_string().contains("incomplete block"));
        assert!(err.to_string().contains("t.txt"));
    }

    #[test]
    fn missing_options_is_incomplete_at_end_of_input() {
        let err = parse_str("id: Q1\ntext: t\ncorrect: A", "t.txt").unwrap_err();
        assert_eq!(
            err,
            FormatError::IncompleteBlock {
                line: 3,
                source_label: "t.txt".into()
            }
        );
    }

    #[test]
    fn explanation_alone_is_an_incomplete_block() {
        let err = parse_str("answer: lonely\n", "t.txt").unwrap_err();
        assert!(matches!(err, FormatError::IncompleteBlock { .. }));
    }

    #[test]
    fn line_without_colon_reports_line_number() {
        let input = "id: Q1\ntext: t\nthis line is broken\n";
        let err = parse_str(input, "broken.txt").unwrap_err();
        assert_eq!(
            err,
            FormatError::Syntax {
                line: 3,
                source_label: "broken.txt".into()
            }
        );
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn leading_colon_is_a_syntax_error() {
        let err = parse_str(": value\n", "x.txt").unwrap_err();
        assert!(matches!(err, FormatError::Syntax { line: 1, .. }));
    }

    #[test]
    fn out_of_range_correct_names_the_question() {
        let input = "id: Q7\ntext: t\noptions: a | b\ncorrect: C\n";
        let err = parse_str(input, "t.txt").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidCorrect {
                id: "Q7".into(),
                reason: InvalidAnswer::OutOfRange('C')
            }
        );
        assert!(err.to_string().contains("Q7"));
        assert!(err.to_string().contains("letter out of range: C"));
    }

    #[test]
    fn too_many_options_is_rejected() {
        let options: Vec<String> = (0..27).map(|i| format!("o{i}")).collect();
        let input = format!("id: Big\ntext: t\noptions: {}\ncorrect: A\n", options.join(" | "));
        let err = parse_str(&input, "big.txt").unwrap_err();
        assert!(matches!(
            err,
            FormatError::Question(QuestionError::TooManyOptions { option_count: 27, .. })
        ));
    }

    #[test]
    fn keys_are_case_insensitive_and_last_wins() {
        let input = "ID: first\nId: Q1\nTEXT: old\nText: new\nOption: x\nCORRECT: B\ncorrect: a\n";
        let questions = parse_str(input, "t.txt").unwrap();
        assert_eq!(questions[0].id(), "Q1");
        assert_eq!(questions[0].text(), "new");
        assert_eq!(questions[0].correct(), &set(&[0]));
    }

    #[test]
    fn unknown_keys_and_comments_are_ignored() {
        let input = "# header\nid: Q1\ndifficulty: hard\ntext: t\n  # indented comment\noption: x\ncorrect: A\n";
        let questions = parse_str(input, "t.txt").unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options(), ["x"]);
    }

    #[test]
    fn value_keeps_text_after_first_colon() {
        let input = "id: Q1\ntext: Ratio 1:2?\noption: a: b\ncorrect: A\n";
        let questions = parse_str(input, "t.txt").unwrap();
        assert_eq!(questions[0].text(), "Ratio 1:2?");
        assert_eq!(questions[0].options(), ["a: b"]);
    }

    #[test]
    fn option_and_options_accumulate_in_order() {
        let input = "id: Q1\ntext: t\noption: A) first\noptions: B) second | | 3) third\noption: fourth\ncorrect: D\n";
        let questions = parse_str(input, "t.txt").unwrap();
        assert_eq!(
            questions[0].options(),
            ["first", "second", "third", "fourth"]
        );
    }

    #[test]
    fn strips_option_labels() {
        assert_eq!(strip_option_prefix("A) text"), "text");
        assert_eq!(strip_option_prefix("b)text"), "text");
        assert_eq!(strip_option_prefix("12) twelve"), "twelve");
        assert_eq!(strip_option_prefix("A) 1) both"), "both");
        assert_eq!(strip_option_prefix("plain"), "plain");
        assert_eq!(strip_option_prefix("AB) kept"), "AB) kept");
        assert_eq!(strip_option_prefix("(A) kept"), "(A) kept");
    }

    #[test]
    fn parse_lines_accepts_owned_strings() {
        let lines: Vec<String> = TWO_BLOCKS.lines().map(String::from).collect();
        assert_eq!(parse_lines(lines, "owned").unwrap().len(), 2);
    }

    #[test]
    fn validate_duplicate_ids() {
        let input = "id: Q1\ntext: a\noption: x\ncorrect: A\n\nid: Q1\ntext: b\noption: y\ncorrect: A\n";
        let questions = parse_str(input, "t.txt").unwrap();
        let warnings = validate_questions(&questions);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_empty_set() {
        let warnings = validate_questions(&[]);
        assert!(warnings.iter().any(|w| w.message.contains("no questions")));
    }

    #[test]
    fn load_named_test_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("spring.txt"), TWO_BLOCKS).unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let questions = load_named_test(dir.path(), "spring").unwrap().unwrap();
        assert_eq!(questions.len(), 2);

        assert!(load_named_test(dir.path(), "missing").unwrap().is_none());
        assert_eq!(list_tests(dir.path()).unwrap(), vec!["spring"]);
    }

    #[test]
    fn load_malformed_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.txt"), "no colon here\n").unwrap();

        let err = load_named_test(dir.path(), "bad").unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("bad.txt"));
    }

    #[test]
    fn test_files_rejects_non_directory() {
        assert!(test_files(Path::new("definitely/not/here")).is_err());
    }
}
