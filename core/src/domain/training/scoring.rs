use serde::{Deserialize, Serialize};

use crate::domain::training::entities::AnswerRecord;

/// How recorded answers turn into a 0–100 score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Each answer weighs its difficulty tier.
    #[default]
    DifficultyWeighted,
    /// Plain percentage of correct answers.
    Unweighted,
}

impl ScoringPolicy {
    fn weight(self, answer: &AnswerRecord) -> u64 {
        match self {
            Self::DifficultyWeighted => answer.difficulty.tier() as u64,
            Self::Unweighted => 1,
        }
    }
}

pub fn compute_score(answers: &[AnswerRecord], policy: ScoringPolicy) -> i32 {
    let (earned, total) = answers.iter().fold((0u64, 0u64), |(earned, total), answer| {
        let weight = policy.weight(answer);
        let earned = if answer.correct { earned + weight } else { earned };
        (earned, total + weight)
    });

    if total == 0 {
        return 0;
    }

    round_half_even(earned * 100, total) as i32
}

/// `numerator / denominator` rounded to the nearest integer, ties to even.
pub fn round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let twice = remainder * 2;

    if twice > denominator || (twice == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}
