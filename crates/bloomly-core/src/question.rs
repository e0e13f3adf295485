//! Quiz questions, the built-in question bank, and the trait weight table.
//!
//! A question contributes evidence in one of two ways, resolved per answer
//! at evaluation time: an explicit effect (fixed point deltas attached to a
//! specific option) or a scaled contribution (the answer normalized to
//! [-1, 1] and spread across the weight table). The same question may be
//! explicit for one option and scaled for another.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::profile::Trait;

/// Signed point deltas applied directly to the baseline score.
pub type EffectMap = BTreeMap<Trait, i32>;

/// One quiz item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, e.g. "q1".
    pub id: String,
    /// Display text; irrelevant to scoring.
    pub prompt: String,
    /// Opaque asset key for the question illustration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ordered selectable answers; empty means free-text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Explicit effects per option text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub effects: BTreeMap<String, EffectMap>,
}

/// How a particular answer to a question contributes evidence.
#[derive(Debug, Clone, PartialEq)]
pub enum Evidence<'a> {
    /// A non-empty explicit effect matched the answer text. Suppresses the
    /// weighted-scale contribution for this question.
    Explicit(&'a EffectMap),
    /// Normalized scalar in [-1, 1] to be spread across the weight table.
    Scaled(f64),
}

impl Question {
    /// Resolve the evidence this question yields for `answer`.
    pub fn evidence_for(&self, answer: &str) -> Evidence<'_> {
        if let Some(effect) = self.effects.get(answer) {
            if !effect.is_empty() {
                return Evidence::Explicit(effect);
            }
        }
        Evidence::Scaled(self.normalize(answer))
    }

    /// Map an answer to a scalar in [-1, 1].
    ///
    /// With an option list, the first option maps to +1 and the last to -1
    /// (earlier options are "higher"); an answer not in the list counts as
    /// the first option. Free-text answers parse as a float clamped to
    /// [-1, 1], or 0 when unparseable.
    fn normalize(&self, answer: &str) -> f64 {
        if self.options.len() > 1 {
            let idx = self
                .options
                .iter()
                .position(|o| o == answer)
                .unwrap_or(0);
            let max_idx = (self.options.len() - 1) as f64;
            ((max_idx - idx as f64) / max_idx) * 2.0 - 1.0
        } else {
            match answer.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v.clamp(-1.0, 1.0),
                _ => 0.0,
            }
        }
    }
}

/// The ordered, fixed list of questions for one quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Number of questions in a full pass.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Check that every explicit effect key names one of the question's
    /// options. The scoring engine does not enforce this at runtime; an
    /// unmapped answer simply yields no explicit effect.
    pub fn validate(&self) -> Result<(), BankError> {
        for q in &self.questions {
            for option in q.effects.keys() {
                if !q.options.iter().any(|o| o == option) {
                    return Err(BankError::UnknownEffectOption {
                        id: q.id.clone(),
                        option: option.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The eight fixed Bloomly questions.
    pub fn builtin() -> Self {
        Self::new(vec![
            question(
                "q1",
                "When do you feel most productive?",
                "sunflower.png",
                &["Morning", "Afternoon", "Evening", "Night"],
                &[
                    ("Morning", &[(Trait::Discipline, 10), (Trait::Energy, 5)]),
                    ("Afternoon", &[(Trait::Energy, 10)]),
                    ("Evening", &[(Trait::Creativity, 5), (Trait::Calmness, -5)]),
                    ("Night", &[(Trait::Creativity, 10), (Trait::Discipline, -5)]),
                ],
            ),
            question(
                "q2",
                "How many hours do you usually sleep?",
                "lavender.png",
                &["< 3", "4–6", "7–8", "9+"],
                &[
                    (
                        "< 3",
                        &[
                            (Trait::Energy, -15),
                            (Trait::Calmness, -20),
                            (Trait::Creativity, 5),
                        ],
                    ),
                    ("4–6", &[(Trait::Energy, -5), (Trait::Calmness, -5)]),
                    ("7–8", &[(Trait::Energy, 5), (Trait::Calmness, 5)]),
                    ("9+", &[(Trait::Calmness, 10), (Trait::Energy, -2)]),
                ],
            ),
            question(
                "q3",
                "How often do you go for a walk or exercise?",
                "china.png",
                &["Rarely", "A few times a week", "Daily"],
                &[
                    ("Rarely", &[(Trait::Energy, -10), (Trait::Calmness, 5)]),
                    (
                        "A few times a week",
                        &[(Trait::Energy, 5), (Trait::Discipline, 5)],
                    ),
                    (
                        "Daily",
                        &[
                            (Trait::Energy, 10),
                            (Trait::Discipline, 5),
                            (Trait::Calmness, 3),
                        ],
                    ),
                ],
            ),
            question(
                "q4",
                "Do you enjoy being outside?",
                "flower.png",
                &["Yes, I love it", "Sometimes", "Not really"],
                &[
                    (
                        "Yes, I love it",
                        &[(Trait::Calmness, 10), (Trait::Creativity, 5)],
                    ),
                    ("Sometimes", &[(Trait::Calmness, 3)]),
                    (
                        "Not really",
                        &[(Trait::Creativity, -2), (Trait::Discipline, 3)],
                    ),
                ],
            ),
            question(
                "q5",
                "What kind of activities do you enjoy most?",
                "orchid.png",
                &[
                    "Creative (art, writing, music)",
                    "Productive (studying, organizing)",
                    "Relaxing (gaming, reading, resting)",
                ],
                &[
                    (
                        "Creative (art, writing, music)",
                        &[(Trait::Creativity, 10)],
                    ),
                    (
                        "Productive (studying, organizing)",
                        &[(Trait::Discipline, 10), (Trait::Energy, 2)],
                    ),
                    (
                        "Relaxing (gaming, reading, resting)",
                        &[(Trait::Calmness, 8), (Trait::Creativity, 2)],
                    ),
                ],
            ),
            question(
                "q6",
                "How often do you start new projects or hobbies?",
                "vine.png",
                &["Rarely", "Sometimes", "Often"],
                &[
                    ("Rarely", &[(Trait::Discipline, 5)]),
                    (
                        "Sometimes",
                        &[(Trait::Discipline, 3), (Trait::Creativity, 3)],
                    ),
                    ("Often", &[(Trait::Creativity, 8), (Trait::Energy, -2)]),
                ],
            ),
            question(
                "q7",
                "Do you prefer spending time with others or alone?",
                "english-ivy.png",
                &["With others", "A mix", "Alone"],
                &[
                    ("With others", &[(Trait::Kindness, 10), (Trait::Energy, 5)]),
                    ("A mix", &[(Trait::Kindness, 5), (Trait::Calmness, 2)]),
                    ("Alone", &[(Trait::Kindness, -2), (Trait::Creativity, 3)]),
                ],
            ),
            question(
                "q8",
                "How do you usually motivate yourself?",
                "red-rose.png",
                &["Rewards and goals", "Inspiration or mood", "Others motivating me"],
                &[
                    ("Rewards and goals", &[(Trait::Discipline, 10)]),
                    ("Inspiration or mood", &[(Trait::Creativity, 8)]),
                    (
                        "Others motivating me",
                        &[(Trait::Kindness, 5), (Trait::Discipline, 2)],
                    ),
                ],
            ),
        ])
    }
}

fn question(
    id: &str,
    prompt: &str,
    image: &str,
    options: &[&str],
    effects: &[(&str, &[(Trait, i32)])],
) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        image: Some(image.to_string()),
        options: options.iter().map(|o| o.to_string()).collect(),
        effects: effects
            .iter()
            .map(|(option, deltas)| (option.to_string(), deltas.iter().copied().collect()))
            .collect(),
    }
}

/// Per-question trait weights for scaled contributions.
///
/// Consulted only when a question yields no explicit effect for the given
/// answer; a question with no entry contributes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightTable(BTreeMap<String, BTreeMap<Trait, f64>>);

impl WeightTable {
    pub fn new(weights: BTreeMap<String, BTreeMap<Trait, f64>>) -> Self {
        Self(weights)
    }

    pub fn weights_for(&self, question_id: &str) -> Option<&BTreeMap<Trait, f64>> {
        self.0.get(question_id)
    }

    /// Weights must be non-negative; direction comes from the normalized
    /// answer, not the weight.
    pub fn validate(&self) -> Result<(), BankError> {
        for (id, weights) in &self.0 {
            for (&t, &w) in weights {
                if w < 0.0 {
                    return Err(BankError::NegativeWeight {
                        id: id.clone(),
                        trait_name: t.name(),
                        weight: w,
                    });
                }
            }
        }
        Ok(())
    }

    /// The fixed weight table for the built-in bank.
    pub fn builtin() -> Self {
        let mut table = BTreeMap::new();
        let mut insert = |id: &str, weights: &[(Trait, f64)]| {
            table.insert(id.to_string(), weights.iter().copied().collect());
        };
        insert("q1", &[(Trait::Discipline, 0.7), (Trait::Energy, 0.3)]);
        insert("q2", &[(Trait::Energy, 0.8), (Trait::Calmness, 0.2)]);
        insert("q3", &[(Trait::Energy, 0.6), (Trait::Discipline, 0.4)]);
        insert("q4", &[(Trait::Calmness, 0.7), (Trait::Creativity, 0.3)]);
        insert("q5", &[(Trait::Creativity, 0.7), (Trait::Discipline, 0.3)]);
        insert("q6", &[(Trait::Creativity, 0.6), (Trait::Discipline, 0.4)]);
        insert("q7", &[(Trait::Kindness, 0.7), (Trait::Energy, 0.3)]);
        insert("q8", &[(Trait::Discipline, 0.6), (Trait::Creativity, 0.4)]);
        Self(table)
    }
}
