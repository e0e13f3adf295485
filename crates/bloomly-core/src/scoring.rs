//! The trait-scoring and confidence-estimation engine.
//!
//! `compute_stats` is a pure function: no I/O, no clock, bit-identical
//! output for identical input. Answers are index-aligned with the question
//! list and may cover only a prefix of it; blank answers contribute
//! nothing. Each answered question yields either an explicit effect (a
//! direct point delta) or a scaled contribution (a normalized signal spread
//! across the weight table), never both.

use crate::profile::{Stats, Trait, TraitMap};
use crate::question::{Evidence, Question, WeightTable};

/// Maximum shift of the baseline from averaged scaled contributions.
pub const DELTA_SCALE: f64 = 30.0;

/// Expected number of contributing questions per trait; drives the
/// coverage half of the confidence score.
pub const EXPECTED_COUNT_PER_TRAIT: u32 = 2;

/// Score an ordered answer sequence against a question list.
///
/// Every trait gets a score in [0, 100] (baseline 50 absent evidence), a
/// contribution count, and a confidence in [0, 100] combining coverage
/// (how many questions spoke to the trait) with consistency (how much the
/// scaled signals agreed).
pub fn compute_stats(answers: &[String], questions: &[Question], weights: &WeightTable) -> Stats {
    let mut explicit_sum = TraitMap::<i64>::default();
    let mut explicit_count = TraitMap::<u32>::default();
    let mut weighted_sum = TraitMap::<f64>::default();
    let mut total_weight = TraitMap::<f64>::default();
    let mut values: TraitMap<Vec<f64>> = TraitMap::default();

    for (answer, question) in answers.iter().zip(questions) {
        if answer.is_empty() {
            continue;
        }
        match question.evidence_for(answer) {
            Evidence::Explicit(effect) => {
                for (&t, &delta) in effect {
                    explicit_sum[t] += i64::from(delta);
                    explicit_count[t] += 1;
                }
            }
            Evidence::Scaled(normalized) => {
                let Some(question_weights) = weights.weights_for(&question.id) else {
                    continue;
                };
                for (&t, &w) in question_weights {
                    weighted_sum[t] += normalized * w;
                    total_weight[t] += w.abs();
                    values[t].push(normalized);
                }
            }
        }
    }

    let mut scores = TraitMap::<u8>::default();
    let mut confidences = TraitMap::<u8>::default();
    let mut counts = TraitMap::<u32>::default();

    for t in Trait::ALL {
        let delta = if total_weight[t] > 0.0 {
            weighted_sum[t] / total_weight[t] * DELTA_SCALE
        } else {
            0.0
        };
        let raw = 50.0 + delta + explicit_sum[t] as f64;
        scores[t] = raw.round().clamp(0.0, 100.0) as u8;

        let count = values[t].len() as u32 + explicit_count[t];
        counts[t] = count;

        let coverage = (f64::from(count) / f64::from(EXPECTED_COUNT_PER_TRAIT)).min(1.0);
        let consistency = if !values[t].is_empty() {
            // Scaled signals live in [-1, 1], so their population variance
            // tops out at exactly 1.
            1.0 - population_variance(&values[t]).min(1.0)
        } else if explicit_count[t] > 0 {
            0.9
        } else {
            0.5
        };
        confidences[t] =
            ((0.6 * coverage + 0.4 * consistency).clamp(0.0, 1.0) * 100.0).round() as u8;
    }

    Stats::from_parts(scores, confidences, counts)
}

fn population_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionBank;

    fn answers(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_answers_yield_baseline_profile() {
        let bank = QuestionBank::builtin();
        let stats = compute_stats(&[], bank.questions(), &WeightTable::builtin());
        let counts = stats.counts.unwrap();
        let confidences = stats.confidences.unwrap();
        for t in Trait::ALL {
            assert_eq!(stats.score(t), 50);
            assert_eq!(counts[t], 0);
            // 0.6 * 0 + 0.4 * 0.5 = 0.2
            assert_eq!(confidences[t], 20);
        }
        assert!(stats.dominant.is_none());
    }

    #[test]
    fn scores_stay_in_range_for_any_input() {
        let bank = QuestionBank::builtin();
        let weights = WeightTable::builtin();
        let sequences: &[Vec<String>] = &[
            answers(&["Morning"]),
            answers(&["< 3", "< 3", "Rarely", "Not really"]),
            answers(&["garbage", "", "???", "-99", "1e300", "NaN", "x", "y"]),
            answers(&[
                "Morning", "7–8", "Daily", "Yes, I love it",
                "Creative (art, writing, music)", "Often", "With others",
                "Rewards and goals",
            ]),
        ];
        for seq in sequences {
            let stats = compute_stats(seq, bank.questions(), &weights);
            let confidences = stats.confidences.unwrap();
            for t in Trait::ALL {
                assert!(stats.score(t) <= 100);
                assert!(confidences[t] <= 100);
            }
        }
    }

    #[test]
    fn deterministic_for_identical_input() {
        let bank = QuestionBank::builtin();
        let weights = WeightTable::builtin();
        let seq = answers(&["Night", "9+", "Rarely", "Sometimes", "unmapped"]);
        let a = compute_stats(&seq, bank.questions(), &weights);
        let b = compute_stats(&seq, bank.questions(), &weights);
        assert_eq!(a, b);
    }

    #[test]
    fn explicit_effect_suppresses_weighted_scale() {
        let bank = QuestionBank::builtin();
        // q1 has both an effects table and a weight-table entry. "Morning"
        // matches an explicit effect, so only the deltas apply.
        let stats = compute_stats(&answers(&["Morning"]), bank.questions(), &WeightTable::builtin());
        assert_eq!(stats.discipline, 60);
        assert_eq!(stats.energy, 55);
        let counts = stats.counts.unwrap();
        assert_eq!(counts[Trait::Discipline], 1);
        assert_eq!(counts[Trait::Energy], 1);
        assert_eq!(counts[Trait::Creativity], 0);
    }

    #[test]
    fn unmapped_option_takes_weighted_path() {
        let bank = QuestionBank::builtin();
        // No effect entry for this text, so q1 contributes via its weights
        // with the answer treated as the first option (+1): both q1 traits
        // move up by the full delta scale.
        let stats = compute_stats(&answers(&["Midnight"]), bank.questions(), &WeightTable::builtin());
        assert_eq!(stats.discipline, 80);
        assert_eq!(stats.energy, 80);
        let counts = stats.counts.unwrap();
        assert_eq!(counts[Trait::Discipline], 1);
        assert_eq!(counts[Trait::Energy], 1);
    }

    #[test]
    fn blank_answers_are_skipped() {
        let bank = QuestionBank::builtin();
        let weights = WeightTable::builtin();
        let with_blank = compute_stats(
            &answers(&["", "7–8"]),
            bank.questions(),
            &weights,
        );
        let counts = with_blank.counts.unwrap();
        assert_eq!(counts[Trait::Discipline], 0);
        assert_eq!(counts[Trait::Energy], 1);
        assert_eq!(counts[Trait::Calmness], 1);
    }

    #[test]
    fn single_scaled_answer_has_full_consistency() {
        let bank = QuestionBank::builtin();
        // One scaled value has zero variance: consistency 1. Coverage is
        // 1/2, so confidence = round((0.6*0.5 + 0.4*1.0) * 100) = 70.
        let stats = compute_stats(&answers(&["Midnight"]), bank.questions(), &WeightTable::builtin());
        let confidences = stats.confidences.unwrap();
        assert_eq!(confidences[Trait::Discipline], 70);
    }

    #[test]
    fn explicit_only_trait_uses_fixed_consistency() {
        let bank = QuestionBank::builtin();
        // q8 "Rewards and goals" is explicit for discipline only: count 1,
        // coverage 0.5, consistency 0.9 -> round((0.3 + 0.36) * 100) = 66.
        let seq = answers(&["", "", "", "", "", "", "", "Rewards and goals"]);
        let stats = compute_stats(&seq, bank.questions(), &WeightTable::builtin());
        let confidences = stats.confidences.unwrap();
        assert_eq!(stats.discipline, 60);
        assert_eq!(confidences[Trait::Discipline], 66);
        assert_eq!(confidences[Trait::Energy], 20);
    }

    #[test]
    fn disagreeing_scaled_signals_lower_confidence() {
        use std::collections::BTreeMap;
        use crate::question::Question;

        // Two option questions sharing one weighted trait, answered at
        // opposite ends: values +1 and -1, variance 1, consistency 0.
        let q = |id: &str| Question {
            id: id.into(),
            prompt: "p".into(),
            image: None,
            options: vec!["hi".into(), "lo".into()],
            effects: BTreeMap::new(),
        };
        let mut table = BTreeMap::new();
        table.insert("a".to_string(), BTreeMap::from([(Trait::Energy, 1.0)]));
        table.insert("b".to_string(), BTreeMap::from([(Trait::Energy, 1.0)]));
        let weights = WeightTable::new(table);

        let stats = compute_stats(&answers(&["hi", "lo"]), &[q("a"), q("b")], &weights);
        assert_eq!(stats.energy, 50);
        // Coverage 1.0, consistency 0: round(0.6 * 100) = 60.
        assert_eq!(stats.confidences.unwrap()[Trait::Energy], 60);
        assert_eq!(stats.counts.unwrap()[Trait::Energy], 2);
    }

    #[test]
    fn golden_full_pass() {
        let bank = QuestionBank::builtin();
        let seq = answers(&[
            "Morning",
            "7–8",
            "Daily",
            "Yes, I love it",
            "Creative (art, writing, music)",
            "Often",
            "With others",
            "Rewards and goals",
        ]);
        let stats = compute_stats(&seq, bank.questions(), &WeightTable::builtin());

        assert_eq!(stats.energy, 73);
        assert_eq!(stats.creativity, 73);
        assert_eq!(stats.calmness, 68);
        assert_eq!(stats.kindness, 60);
        assert_eq!(stats.discipline, 75);

        let counts = stats.counts.unwrap();
        assert_eq!(counts[Trait::Energy], 5);
        assert_eq!(counts[Trait::Creativity], 3);
        assert_eq!(counts[Trait::Calmness], 3);
        assert_eq!(counts[Trait::Kindness], 1);
        assert_eq!(counts[Trait::Discipline], 3);

        let confidences = stats.confidences.unwrap();
        assert_eq!(confidences[Trait::Energy], 96);
        assert_eq!(confidences[Trait::Creativity], 96);
        assert_eq!(confidences[Trait::Calmness], 96);
        assert_eq!(confidences[Trait::Kindness], 66);
        assert_eq!(confidences[Trait::Discipline], 96);

        assert_eq!(stats.dominant_trait(), Trait::Discipline);
    }

    #[test]
    fn longer_answer_list_than_questions_ignores_tail() {
        let bank = QuestionBank::builtin();
        let mut seq = answers(&["Morning"]);
        seq.extend(std::iter::repeat_with(|| "extra".to_string()).take(20));
        let stats = compute_stats(&seq, bank.questions(), &WeightTable::builtin());
        // zip stops at the question list; only eight entries can count.
        let total: u32 = Trait::ALL
            .iter()
            .map(|&t| stats.counts.unwrap()[t])
            .sum();
        assert!(total <= 16);
    }
}
