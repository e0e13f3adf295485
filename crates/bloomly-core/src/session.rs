//! Quiz session aggregation: collect answers, score, blend, persist.
//!
//! The aggregation itself is a stateless function ([`finalize_pass`]);
//! [`QuizSession`] adds the step-by-step state machine and the persistence
//! side effects around it. Each write is awaited before the step advances
//! so a crash between steps leaves the stored answer sequence consistent
//! with the reported step index.

use crate::profile::Stats;
use crate::question::{QuestionBank, WeightTable};
use crate::scoring::compute_stats;
use crate::storage::{self, KeyValueStore};

/// Weight on freshly computed data when blending with a stored profile.
pub const SMOOTHING_ALPHA: f64 = 0.35;

/// Score a completed answer sequence and fold it into the stored profile.
///
/// Computes fresh stats, blends them with `previous` when one exists
/// (otherwise the fresh stats pass through unchanged), and stamps the
/// dominant trait on the result.
pub fn finalize_pass(
    answers: &[String],
    bank: &QuestionBank,
    weights: &WeightTable,
    previous: Option<&Stats>,
    alpha: f64,
) -> Stats {
    let computed = compute_stats(answers, bank.questions(), weights);
    let mut final_stats = match previous {
        Some(prev) => Stats::blend(&computed, prev, alpha),
        None => computed,
    };
    final_stats.dominant = Some(final_stats.dominant_trait());
    final_stats
}

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// More questions remain; `step` is the index of the next one.
    Next { step: usize },
    /// The pass is complete; the finalized profile has been persisted and
    /// the transient answer sequence cleared.
    Completed(Stats),
}

/// One quiz pass over a fixed question bank, one answer at a time.
pub struct QuizSession<S> {
    store: S,
    bank: QuestionBank,
    weights: WeightTable,
    alpha: f64,
    answers: Vec<String>,
}

impl<S: KeyValueStore> QuizSession<S> {
    /// Resume a session from whatever answer sequence is persisted.
    ///
    /// A partial sequence of length `k` resumes at step `k`. A sequence
    /// at least as long as the question bank is a leftover from a finished
    /// pass: it is discarded and the session starts at step 0. That reset
    /// is deliberate; completing a quiz should never trap the next launch
    /// at the results.
    pub async fn resume(store: S, bank: QuestionBank, weights: WeightTable) -> Self {
        let mut answers = storage::load_answers(&store).await;
        if !answers.is_empty() && answers.len() >= bank.len() {
            tracing::debug!(
                stored = answers.len(),
                "stored answer sequence covers a full pass, restarting"
            );
            storage::clear_answers(&store).await;
            answers.clear();
        }
        Self {
            store,
            bank,
            weights,
            alpha: SMOOTHING_ALPHA,
            answers,
        }
    }

    /// Override the smoothing factor (weight on new data).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Index of the question awaiting an answer.
    pub fn step(&self) -> usize {
        self.answers.len()
    }

    /// Answers collected so far in this pass.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// The question awaiting an answer, `None` once the bank is exhausted.
    pub fn current_question(&self) -> Option<&crate::question::Question> {
        self.bank.get(self.step())
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Record one answer and advance.
    ///
    /// The partial sequence is persisted before the step advances. On the
    /// final answer the pass is finalized against the stored profile, the
    /// result persisted, and the answer sequence cleared so the next pass
    /// starts clean.
    pub async fn submit_answer(&mut self, answer: impl Into<String>) -> SubmitOutcome {
        self.answers.push(answer.into());
        storage::save_answers(&self.store, &self.answers).await;

        if self.answers.len() < self.bank.len() {
            let step = self.answers.len();
            tracing::debug!(step, "answer recorded");
            return SubmitOutcome::Next { step };
        }

        let previous = storage::load_stats(&self.store).await;
        let final_stats = finalize_pass(
            &self.answers,
            &self.bank,
            &self.weights,
            previous.as_ref(),
            self.alpha,
        );
        storage::save_stats(&self.store, &final_stats).await;
        storage::clear_answers(&self.store).await;
        self.answers.clear();
        tracing::debug!(dominant = ?final_stats.dominant, "quiz pass completed");
        SubmitOutcome::Completed(final_stats)
    }
}
