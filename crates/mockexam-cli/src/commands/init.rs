//! The `mockexam init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new(crate::config::DEFAULT_CONFIG_FILE).exists() {
        println!("mockexam.toml already exists, skipping.");
    } else {
        std::fs::write(crate::config::DEFAULT_CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created mockexam.toml");
    }

    std::fs::create_dir_all("tests")?;
    let example_path = std::path::Path::new("tests/example.txt");
    if example_path.exists() {
        println!("tests/example.txt already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TEST)?;
        println!("Created tests/example.txt");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions under tests/");
    println!("  2. Run: mockexam validate tests");
    println!("  3. Run: mockexam run example");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mockexam configuration

tests_dir = "tests"
shuffle = false
show_explanations = true
title = "Spring Certification Mock Exam"
"#;

const EXAMPLE_TEST: &str = r#"# Example test. Blocks are separated by blank lines.
# Keys: id, text, option / options, correct, answer (optional explanation).

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
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config: crate::config::MockexamConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.tests_dir, std::path::PathBuf::from("tests"));
    }

    #[test]
    fn example_test_parses() {
        let questions = mockexam_core::parser::parse_str(EXAMPLE_TEST, "example.txt").unwrap();
        assert_eq!(questions.len(), 2);
        assert!(mockexam_core::parser::validate_questions(&questions).is_empty());
    }
}
