//! The `mockexam validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use mockexam_core::bank::load_json_course;
use mockexam_core::parser;
use mockexam_core::Question;

pub fn execute(path: PathBuf) -> Result<()> {
    let files = if path.is_dir() {
        parser::test_files(&path)?
    } else {
        anyhow::ensure!(path.exists(), "test file not found: {}", path.display());
        vec![path]
    };

    let mut total_warnings = 0;
    let mut failed = 0;

    for file in &files {
        match load(file) {
            Ok(questions) => {
                println!("Test: {} ({} questions)", file.display(), questions.len());

                let warnings = parser::validate_questions(&questions);
                for w in &warnings {
                    let prefix = w
                        .question_id
                        .as_ref()
                        .map(|id| format!("  [{id}]"))
                        .unwrap_or_else(|| "  ".to_string());
                    println!("{prefix} WARNING: {}", w.message);
                }
                total_warnings += warnings.len();
            }
            Err(e) => {
                println!("Test: {}", file.display());
                println!("   ERROR: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} test file(s) failed to parse");
    }

    if files.is_empty() {
        println!("No test files found.");
    } else if total_warnings == 0 {
        println!("All tests valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn load(path: &Path) -> Result<Vec<Question>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        load_json_course(path)
    } else {
        Ok(parser::parse_test_file(path)?)
    }
}
