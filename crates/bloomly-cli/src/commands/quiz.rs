//! The `bloomly quiz` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use bloomly_core::question::{Question, QuestionBank, WeightTable};
use bloomly_core::session::{QuizSession, SubmitOutcome};
use bloomly_report::render_summary;
use bloomly_store::FileStore;

pub async fn execute(data_dir: PathBuf, alpha: f64, answers: Vec<String>) -> Result<()> {
    let bank = QuestionBank::builtin();
    let weights = WeightTable::builtin();
    bank.validate().context("built-in question bank is invalid")?;
    weights.validate().context("built-in weight table is invalid")?;

    let store = FileStore::new(data_dir);
    let mut session = QuizSession::resume(store, bank, weights)
        .await
        .with_alpha(alpha);

    if session.step() > 0 {
        println!(
            "Resuming at question {} of {}.",
            session.step() + 1,
            session.bank().len()
        );
    }

    if answers.is_empty() {
        run_interactive(&mut session).await
    } else {
        run_scripted(&mut session, answers).await
    }
}

/// Answers supplied up front via repeated `--answer` flags.
async fn run_scripted(session: &mut QuizSession<FileStore>, answers: Vec<String>) -> Result<()> {
    let remaining = session.bank().len() - session.step();
    anyhow::ensure!(
        answers.len() <= remaining,
        "more answers than remaining questions ({} given, {} left)",
        answers.len(),
        remaining
    );

    for raw in answers {
        let question = session
            .current_question()
            .expect("answer count checked against remaining questions");
        let answer = resolve_answer(question, &raw);
        if let SubmitOutcome::Completed(stats) = session.submit_answer(answer).await {
            println!("Quiz complete.\n");
            println!("{}", render_summary(&stats));
            return Ok(());
        }
    }
    println!(
        "Progress saved. Next: question {} of {}.",
        session.step() + 1,
        session.bank().len()
    );
    Ok(())
}

/// One question at a time on the terminal.
async fn run_interactive(session: &mut QuizSession<FileStore>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(question) = session.current_question() else {
            return Ok(());
        };
        println!(
            "\n[{}/{}] {}",
            session.step() + 1,
            session.bank().len(),
            question.prompt
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        if question.options.len() <= 1 {
            println!("  (free answer)");
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            // stdin closed mid-quiz; progress is already persisted
            println!(
                "\nProgress saved. Next: question {} of {}.",
                session.step() + 1,
                session.bank().len()
            );
            return Ok(());
        };
        let raw = line?;
        if raw.trim().is_empty() {
            println!("Please answer (or press Ctrl-C to quit; progress is saved).");
            continue;
        }

        let answer = resolve_answer(question, &raw);
        if let SubmitOutcome::Completed(stats) = session.submit_answer(answer).await {
            println!("\nQuiz complete.\n");
            println!("{}", render_summary(&stats));
            return Ok(());
        }
    }
}

/// Map a 1-based option number to the option's text; anything else passes
/// through as a literal answer.
fn resolve_answer(question: &Question, raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        if n >= 1 {
            if let Some(option) = question.options.get(n - 1) {
                return option.clone();
            }
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn question_with(options: &[&str]) -> Question {
        Question {
            id: "q".to_string(),
            prompt: "?".to_string(),
            image: None,
            options: options.iter().map(|s| s.to_string()).collect(),
            effects: BTreeMap::new(),
        }
    }

    #[test]
    fn number_selects_option() {
        let q = question_with(&["Morning", "Evening"]);
        assert_eq!(resolve_answer(&q, "1"), "Morning");
        assert_eq!(resolve_answer(&q, " 2 "), "Evening");
    }

    #[test]
    fn out_of_range_number_is_literal() {
        let q = question_with(&["Morning", "Evening"]);
        assert_eq!(resolve_answer(&q, "0"), "0");
        assert_eq!(resolve_answer(&q, "3"), "3");
    }

    #[test]
    fn text_passes_through() {
        let q = question_with(&["Morning", "Evening"]);
        assert_eq!(resolve_answer(&q, "Evening"), "Evening");
        // Free-text questions take the raw value.
        let free = question_with(&[]);
        assert_eq!(resolve_answer(&free, "0.5"), "0.5");
    }
}
