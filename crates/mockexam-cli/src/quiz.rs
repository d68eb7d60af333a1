//! The interactive question loop.
//!
//! Generic over the input and output streams so it can be driven from tests.

use std::io::{BufRead, Write};

use anyhow::Result;

use mockexam_core::codec::{index_letter, parse_answer};
use mockexam_core::session::{format_elapsed, Session};
use mockexam_core::{AnswerSet, Question};

const SEPARATOR: &str = "----------------------------------------";

/// Presentation options for a run.
#[derive(Debug, Clone)]
pub struct QuizOptions {
    pub title: String,
    pub show_explanations: bool,
}

/// Ask every question in order and print the final result.
///
/// Invalid answers are reported and asked again. If input ends early the
/// quiz stops and the summary covers what was answered.
pub fn run_quiz<R: BufRead, W: Write>(
    questions: &[Question],
    options: &QuizOptions,
    input: &mut R,
    out: &mut W,
) -> Result<Session> {
    let mut session = Session::new(questions.len());

    print_banner(&options.title, out)?;

    for (i, question) in questions.iter().enumerate() {
        writeln!(
            out,
            "Question {}/{}  [{}]",
            i + 1,
            questions.len(),
            question.id()
        )?;
        print_question(question, out)?;

        let Some(answer) = read_answer(question.options().len(), input, out)? else {
            writeln!(out)?;
            writeln!(out, "Input closed, ending the quiz early.")?;
            tracing::warn!(answered = session.answered(), "input closed before the last question");
            break;
        };

        let verdict = session.grade(question, &answer);
        let explanation = question
            .explanation()
            .filter(|_| options.show_explanations)
            .map(|text| format!(" {text}"))
            .unwrap_or_default();
        if verdict.correct {
            writeln!(out, "✅ Correct!{explanation}")?;
        } else {
            writeln!(out, "❌ Wrong.{explanation}")?;
            writeln!(out, "   Correct answer: {}", verdict.expected)?;
        }

        writeln!(
            out,
            "   Progress: {} correct, {} wrong, {:.1}% correct",
            session.correct(),
            session.wrong(),
            session.running_percentage()
        )?;
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out)?;
    }

    print_summary(&session, out)?;
    Ok(session)
}

fn print_banner<W: Write>(title: &str, out: &mut W) -> Result<()> {
    writeln!(out, "=== {title} ===")?;
    writeln!(out, "Answer format:")?;
    writeln!(out, "  - single answer:     A")?;
    writeln!(out, "  - multiple answers:  A,C  or  AC")?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)?;
    Ok(())
}

fn print_question<W: Write>(question: &Question, out: &mut W) -> Result<()> {
    writeln!(out, "{}", question.text())?;
    for (i, option) in question.options().iter().enumerate() {
        writeln!(out, "  {}) {option}", index_letter(i))?;
    }
    if question.is_multiple_choice() {
        writeln!(out, "  [Multiple answers: enter e.g. A,C or AC]")?;
    } else {
        writeln!(out, "  [Single answer]")?;
    }
    write!(out, "Your answer: ")?;
    out.flush()?;
    Ok(())
}

/// Read lines until one parses. `None` means input ended.
fn read_answer<R: BufRead, W: Write>(
    option_count: usize,
    input: &mut R,
    out: &mut W,
) -> Result<Option<AnswerSet>> {
    loop {
        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD, which never parses as a letter.
        let line = String::from_utf8_lossy(&buf);
        match parse_answer(&line, option_count) {
            Ok(answer) => return Ok(Some(answer)),
            Err(e) => {
                write!(out, "Invalid answer ({e}). Try again (e.g. A or A,C): ")?;
                out.flush()?;
            }
        }
    }
}

fn print_summary<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    writeln!(out, "=== FINAL RESULT ===")?;
    writeln!(out, "Total questions: {}", session.total())?;
    writeln!(out, "Correct:         {}", session.correct())?;
    writeln!(out, "Wrong:           {}", session.wrong())?;
    writeln!(out, "Percentage:      {:.1}%", session.final_percentage())?;
    writeln!(out, "Time:            {}", format_elapsed(session.elapsed()))?;
    writeln!(out, "=========================")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use mockexam_core::parser::parse_str;

    const TEST: &str = "\
id: Q1
text: What is 2+2?
options: 3 | 4
correct: B
answer: Basic arithmetic.

id: Q2
text: Pick primes.
options: 2 | 3 | 4 | 5
correct: A,B,D
";

    fn options() -> QuizOptions {
        QuizOptions {
            title: "Test Exam".into(),
            show_explanations: true,
        }
    }

    fn play(input: &str, opts: &QuizOptions) -> (Session, String) {
        play_bytes(input.as_bytes(), opts)
    }

    fn play_bytes(input: &[u8], opts: &QuizOptions) -> (Session, String) {
        let questions = parse_str(TEST, "quiz-test").unwrap();
        let mut reader = Cursor::new(input.to_vec());
        let mut out = Vec::new();
        let session = run_quiz(&questions, opts, &mut reader, &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn all_correct() {
        let (session, out) = play("b\nDBA\n", &options());
        assert_eq!(session.correct(), 2);
        assert_eq!(session.wrong(), 0);
        assert!(out.contains("=== Test Exam ==="));
        assert!(out.contains("✅ Correct! Basic arithmetic."));
        assert!(out.contains("Percentage:      100.0%"));
    }

    #[test]
    fn wrong_answer_shows_key() {
        let (session, out) = play("A\nA,B\n", &options());
        assert_eq!(session.wrong(), 2);
        assert!(out.contains("❌ Wrong. Basic arithmetic."));
        assert!(out.contains("Correct answer: B"));
        assert!(out.contains("Correct answer: A,B,D"));
        assert!(out.contains("Progress: 0 correct, 2 wrong, 0.0% correct"));
    }

    #[test]
    fn invalid_input_is_asked_again() {
        let (session, out) = play("\nZ\nB\nABD\n", &options());
        assert_eq!(session.correct(), 2);
        assert!(out.contains("Invalid answer (empty)"));
        assert!(out.contains("Invalid answer (letter out of range: Z)"));
    }

    #[test]
    fn non_utf8_line_is_asked_again() {
        let (session, out) = play_bytes(b"\xff\xfe\n B\nABD\n", &options());
        assert_eq!(session.correct(), 2);
        assert_eq!(out.matches("Invalid answer").count(), 1);
        assert!(out.contains("Invalid answer (letter out of range: \u{FFFD})"));
        assert!(out.contains("✅ Correct! Basic arithmetic."));
    }

    #[test]
    fn end_of_input_stops_early() {
        let (session, out) = play("B\n", &options());
        assert_eq!(session.answered(), 1);
        assert!(out.contains("ending the quiz early"));
        assert!(out.contains("Total questions: 2"));
        assert!(out.contains("Percentage:      50.0%"));
    }

    #[test]
    fn hints_and_letters_are_printed() {
        let (_, out) = play("B\nABD\n", &options());
        assert!(out.contains("Question 1/2  [Q1]"));
        assert!(out.contains("  B) 4"));
        assert!(out.contains("  [Single answer]"));
        assert!(out.contains("  [Multiple answers: enter e.g. A,C or AC]"));
    }

    #[test]
    fn explanations_can_be_hidden() {
        let opts = QuizOptions {
            show_explanations: false,
            ..options()
        };
        let (_, out) = play("B\nABD\n", &opts);
        assert!(!out.contains("Basic arithmetic."));
    }
}
