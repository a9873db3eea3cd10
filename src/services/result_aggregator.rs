use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::domain::{Part, StageKey};
use crate::services::score_carrier::StageScores;

/// Totals above this are excellent.
const EXCELLENT_ABOVE: u32 = 15;
/// Totals above this pass.
const PASS_ABOVE: u32 = 10;

/// Upper bound of each stage's score.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageMaxima(BTreeMap<StageKey, u32>);

impl StageMaxima {
    /// Fixed maxima of the reading exam.
    pub fn reading_defaults() -> Self {
        [
            (StageKey::Part1, 5),
            (StageKey::Part2, 5),
            (StageKey::Part3, 12),
            (StageKey::LanguagePart1, 10),
            (StageKey::LanguagePart2, 10),
        ]
        .into_iter()
        .collect()
    }

    /// One point per scorable item of each part.
    pub fn derived_from<'a>(parts: impl IntoIterator<Item = (StageKey, &'a Part)>) -> Self {
        parts
            .into_iter()
            .map(|(stage, part)| (stage, part.item_count() as u32))
            .collect()
    }

    pub fn get(&self, stage: StageKey) -> u32 {
        self.0.get(&stage).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StageKey, u32)> + '_ {
        self.0.iter().map(|(stage, max)| (*stage, *max))
    }
}

impl FromIterator<(StageKey, u32)> for StageMaxima {
    fn from_iter<I: IntoIterator<Item = (StageKey, u32)>>(iter: I) -> Self {
        StageMaxima(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    Excellent,
    Pass,
    Fail,
}

impl FeedbackTier {
    /// First matching threshold wins, evaluated on the total score.
    pub fn for_total(total: u32) -> Self {
        if total > EXCELLENT_ABOVE {
            FeedbackTier::Excellent
        } else if total > PASS_ABOVE {
            FeedbackTier::Pass
        } else {
            FeedbackTier::Fail
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Excellent => "Fantastisch! Du hast eine hervorragende Punktzahl erreicht!",
            FeedbackTier::Pass => "Super! Du hast bestanden und kannst stolz auf dich sein!",
            FeedbackTier::Fail => "Leider nicht bestanden. Versuche es nochmal und gib nicht auf!",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageLine {
    pub stage: StageKey,
    pub score: u32,
    pub max: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultSummary {
    pub stages: Vec<StageLine>,
    pub total: u32,
    pub max_total: u32,
    pub percentage: f64,
    pub tier: FeedbackTier,
}

pub struct ResultAggregator;

impl ResultAggregator {
    /// Combines carried scores over the stages named in `maxima`.
    /// Stages without a carried score count as zero.
    pub fn summarize(scores: &StageScores, maxima: &StageMaxima) -> ResultSummary {
        let stages: Vec<StageLine> = maxima
            .iter()
            .map(|(stage, max)| StageLine {
                stage,
                score: scores.get(stage),
                max,
            })
            .collect();

        let total: u32 = stages.iter().map(|line| line.score).sum();
        let max_total: u32 = stages.iter().map(|line| line.max).sum();
        let percentage = if max_total == 0 {
            0.0
        } else {
            100.0 * f64::from(total) / f64::from(max_total)
        };

        ResultSummary {
            stages,
            total,
            max_total,
            percentage,
            tier: FeedbackTier::for_total(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::part::{OrderingBlock, OrderingItem};
    use crate::models::domain::LooseId;

    #[test]
    fn summarize_totals_and_tier() {
        let scores: StageScores = [
            (StageKey::Part1, 5),
            (StageKey::Part2, 3),
            (StageKey::Part3, 8),
            (StageKey::LanguagePart1, 2),
            (StageKey::LanguagePart2, 1),
        ]
        .into_iter()
        .collect();

        let summary = ResultAggregator::summarize(&scores, &StageMaxima::reading_defaults());

        assert_eq!(summary.total, 19);
        assert_eq!(summary.max_total, 42);
        assert!((summary.percentage - 45.238).abs() < 0.01);
        assert_eq!(summary.tier, FeedbackTier::Excellent);
        assert_eq!(summary.stages.len(), 5);
    }

    #[test]
    fn empty_scores_default_to_zero() {
        let summary =
            ResultAggregator::summarize(&StageScores::default(), &StageMaxima::reading_defaults());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.tier, FeedbackTier::Fail);
        assert!(summary.stages.iter().all(|line| line.score == 0));
    }

    #[test]
    fn tiers_use_strict_thresholds_on_total() {
        assert_eq!(FeedbackTier::for_total(16), FeedbackTier::Excellent);
        assert_eq!(FeedbackTier::for_total(15), FeedbackTier::Pass);
        assert_eq!(FeedbackTier::for_total(11), FeedbackTier::Pass);
        assert_eq!(FeedbackTier::for_total(10), FeedbackTier::Fail);
        assert_eq!(FeedbackTier::for_total(0), FeedbackTier::Fail);
    }

    #[test]
    fn scores_outside_maxima_are_ignored() {
        let scores: StageScores = [(StageKey::Part1, 4), (StageKey::ListeningPart1, 9)]
            .into_iter()
            .collect();

        let summary = ResultAggregator::summarize(&scores, &StageMaxima::reading_defaults());

        assert_eq!(summary.total, 4);
    }

    #[test]
    fn zero_maxima_give_zero_percentage() {
        let summary = ResultAggregator::summarize(&StageScores::default(), &StageMaxima::default());

        assert_eq!(summary.max_total, 0);
        assert_eq!(summary.percentage, 0.0);
    }

    #[test]
    fn derived_maxima_count_items() {
        let item = |id: &str| OrderingItem {
            id: LooseId::from(id),
            text: String::new(),
            answer: Some(LooseId::Number(1)),
            explanation: String::new(),
        };
        let part = Part::Ordering(vec![OrderingBlock {
            text: String::new(),
            options: Some(vec![item("a"), item("b"), item("c")]),
        }]);

        let maxima = StageMaxima::derived_from([(StageKey::LanguagePart2, &part)]);

        assert_eq!(maxima.get(StageKey::LanguagePart2), 3);
        assert_eq!(maxima.get(StageKey::Part1), 0);
    }

    #[test]
    fn summarize_is_repeatable() {
        let scores: StageScores = [(StageKey::Part3, 7)].into_iter().collect();
        let maxima = StageMaxima::reading_defaults();

        assert_eq!(
            ResultAggregator::summarize(&scores, &maxima),
            ResultAggregator::summarize(&scores, &maxima)
        );
    }
}
