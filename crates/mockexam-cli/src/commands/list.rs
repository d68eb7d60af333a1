//! The `mockexam list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mockexam_core::parser;

use crate::config::load_config_from;

pub fn execute(tests_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let tests_dir = tests_dir.unwrap_or(config.tests_dir);

    if !tests_dir.is_dir() {
        println!(
            "No tests directory at {}. Run `mockexam init` to create one.",
            tests_dir.display()
        );
        return Ok(());
    }

    let names = parser::list_tests(&tests_dir)?;
    if names.is_empty() {
        println!("No tests found in {}.", tests_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Test", "Questions", "Multiple-answer", "Status"]);

    for name in &names {
        let path = parser::test_path(&tests_dir, name);
        match parser::parse_test_file(&path) {
            Ok(questions) => {
                let multi = questions.iter().filter(|q| q.is_multiple_choice()).count();
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(questions.len()),
                    Cell::new(multi),
                    Cell::new("ok"),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(format!("error: {e}")),
                ]);
            }
        }
    }

    println!("{table}");
    Ok(())
}
