//! The `mockexam run` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use mockexam_core::bank::{builtin_questions, load_json_course, shuffle_questions};
use mockexam_core::parser;
use mockexam_core::Question;

use crate::config::load_config_from;
use crate::quiz::{run_quiz, QuizOptions};

pub fn execute(
    name: Option<String>,
    json: Option<PathBuf>,
    shuffle: bool,
    tests_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let tests_dir = tests_dir.unwrap_or(config.tests_dir);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut questions = load_questions(name.as_deref(), json.as_deref(), &tests_dir, &mut out)?;
    if shuffle || config.shuffle {
        shuffle_questions(&mut questions);
    }

    let options = QuizOptions {
        title: config.title,
        show_explanations: config.show_explanations,
    };
    let stdin = std::io::stdin();
    run_quiz(&questions, &options, &mut stdin.lock(), &mut out)?;

    Ok(())
}

/// Pick the question set for a run.
///
/// Any failure to load the requested test (missing file, empty file, format
/// error) falls back to the built-in questions.
fn load_questions<W: Write>(
    name: Option<&str>,
    json: Option<&Path>,
    tests_dir: &Path,
    out: &mut W,
) -> Result<Vec<Question>> {
    if let Some(path) = json {
        return match load_json_course(path) {
            Ok(questions) if !questions.is_empty() => {
                writeln!(
                    out,
                    "Loaded course '{}' ({} questions).",
                    path.display(),
                    questions.len()
                )?;
                Ok(questions)
            }
            Ok(_) => {
                writeln!(
                    out,
                    "No questions in course '{}'. Using built-in questions.",
                    path.display()
                )?;
                Ok(builtin_questions())
            }
            Err(e) => {
                tracing::warn!("falling back to built-in questions: {e:#}");
                writeln!(out, "Could not load course '{}': {e:#}", path.display())?;
                writeln!(out, "Using built-in questions.")?;
                Ok(builtin_questions())
            }
        };
    }

    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(builtin_questions());
    };

    match parser::load_named_test(tests_dir, name) {
        Ok(Some(questions)) if !questions.is_empty() => {
            writeln!(
                out,
                "Loaded test '{name}' ({} questions).",
                questions.len()
            )?;
            Ok(questions)
        }
        Ok(found) => {
            if found.is_none() {
                writeln!(
                    out,
                    "Test file not found: {}",
                    parser::test_path(tests_dir, name).display()
                )?;
            }
            writeln!(
                out,
                "No questions loaded from test '{name}'. Using built-in questions."
            )?;
            Ok(builtin_questions())
        }
        Err(e) => {
            tracing::warn!("falling back to built-in questions: {e}");
            writeln!(out, "Could not load test '{name}': {e}")?;
            writeln!(out, "Using built-in questions.")?;
            Ok(builtin_questions())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_QUESTION: &str = "id: X1\ntext: t\noptions: a | b\ncorrect: A\n";

    fn load(name: Option<&str>, json: Option<&Path>, dir: &Path) -> (Vec<Question>, String) {
        let mut out = Vec::new();
        let questions = load_questions(name, json, dir, &mut out).unwrap();
        (questions, String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_name_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let (questions, out) = load(None, None, dir.path());
        assert_eq!(questions.len(), 15);
        assert!(out.is_empty());

        let (questions, _) = load(Some("   "), None, dir.path());
        assert_eq!(questions.len(), 15);
    }

    #[test]
    fn named_test_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mine.txt"), ONE_QUESTION).unwrap();

        let (questions, out) = load(Some("mine"), None, dir.path());
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id(), "X1");
        assert!(out.contains("Loaded test 'mine' (1 questions)."));
    }

    #[test]
    fn missing_test_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let (questions, out) = load(Some("ghost"), None, dir.path());
        assert_eq!(questions.len(), 15);
        assert!(out.contains("Test file not found"));
        assert!(out.contains("Using built-in questions."));
    }

    #[test]
    fn empty_test_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.txt"), "# nothing yet\n").unwrap();
        let (questions, out) = load(Some("empty"), None, dir.path());
        assert_eq!(questions.len(), 15);
        assert!(!out.contains("not found"));
        assert!(out.contains("No questions loaded from test 'empty'"));
    }

    #[test]
    fn malformed_test_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.txt"), "id: Q1\ntext: t\n").unwrap();
        let (questions, out) = load(Some("bad"), None, dir.path());
        assert_eq!(questions.len(), 15);
        assert!(out.contains("incomplete block"));
    }

    #[test]
    fn json_course_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        std::fs::write(
            &path,
            r#"{"questions":[{"text":"t","options":["a","b"],"correct":["B"]}]}"#,
        )
        .unwrap();
        let (questions, out) = load(None, Some(&path), dir.path());
        assert_eq!(questions.len(), 1);
        assert!(out.contains("Loaded course"));
    }
}
