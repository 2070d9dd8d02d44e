//! Percentage distribution and overall-label decision over classified headlines.

use std::fmt;

use marketpulse_core::TieBreakPolicy;

use crate::types::{SentimentLabel, SentimentResults};

/// Share of each label, in percent.
///
/// When built by [`compute_distribution`] the three shares sum to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// Number of classified headlines the shares were computed from.
    pub total: usize,
}

impl SentimentDistribution {
    #[must_use]
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }
}

/// Single verdict for a whole batch of headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallLabel {
    Positive,
    Negative,
    Neutral,
    /// Positive and negative shares are equal under
    /// [`TieBreakPolicy::PositiveNegative`].
    Mixed,
}

impl OverallLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for OverallLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SentimentLabel> for OverallLabel {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => Self::Positive,
            SentimentLabel::Negative => Self::Negative,
            SentimentLabel::Neutral => Self::Neutral,
        }
    }
}

/// Tally labels into percentages.
///
/// Returns `None` for empty results: there is no distribution to report,
/// which is different from a distribution of all zeros.
#[must_use]
pub fn compute_distribution(results: &SentimentResults) -> Option<SentimentDistribution> {
    if results.is_empty() {
        return None;
    }

    let (mut positive, mut negative, mut neutral) = (0_usize, 0_usize, 0_usize);
    for label in results.labels() {
        match label {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Negative => negative += 1,
            SentimentLabel::Neutral => neutral += 1,
        }
    }

    let total = results.len();
    #[allow(clippy::cast_precision_loss)]
    let pct = |count: usize| count as f64 * 100.0 / total as f64;

    Some(SentimentDistribution {
        positive: pct(positive),
        negative: pct(negative),
        neutral: pct(neutral),
        total,
    })
}

/// Collapse a distribution into one label under `policy`.
#[must_use]
pub fn derive_overall_label(
    distribution: &SentimentDistribution,
    policy: TieBreakPolicy,
) -> OverallLabel {
    match policy {
        TieBreakPolicy::ThreeWay => three_way(distribution),
        TieBreakPolicy::PositiveNegative => positive_negative(distribution),
    }
}

fn three_way(d: &SentimentDistribution) -> OverallLabel {
    if d.positive >= d.negative && d.positive >= d.neutral && d.positive > 0.0 {
        OverallLabel::Positive
    } else if d.negative > d.positive && d.negative > d.neutral {
        OverallLabel::Negative
    } else {
        OverallLabel::Neutral
    }
}

fn positive_negative(d: &SentimentDistribution) -> OverallLabel {
    if d.positive > d.negative {
        OverallLabel::Positive
    } else if d.negative > d.positive {
        OverallLabel::Negative
    } else {
        OverallLabel::Mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SentimentLabel::{Negative, Neutral, Positive};

    const EPS: f64 = 0.01;

    fn dist(positive: f64, negative: f64, neutral: f64) -> SentimentDistribution {
        SentimentDistribution {
            positive,
            negative,
            neutral,
            total: 0,
        }
    }

    fn results(labels: &[SentimentLabel]) -> SentimentResults {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| (format!("headline {i}"), *label))
            .collect()
    }

    #[test]
    fn empty_results_have_no_distribution() {
        assert_eq!(compute_distribution(&SentimentResults::new()), None);
    }

    #[test]
    fn five_headline_example() {
        let r = results(&[Positive, Positive, Negative, Neutral, Positive]);
        let d = compute_distribution(&r).unwrap();
        assert!((d.positive - 60.0).abs() < EPS, "{d:?}");
        assert!((d.negative - 20.0).abs() < EPS, "{d:?}");
        assert!((d.neutral - 20.0).abs() < EPS, "{d:?}");
        assert_eq!(d.total, 5);
        assert_eq!(derive_overall_label(&d, TieBreakPolicy::ThreeWay), OverallLabel::Positive);
        assert_eq!(
            derive_overall_label(&d, TieBreakPolicy::PositiveNegative),
            OverallLabel::Positive
        );
    }

    #[test]
    fn two_thirds_negative_example() {
        let r = results(&[Negative, Negative, Positive]);
        let d = compute_distribution(&r).unwrap();
        assert_eq!(format!("{:.2}", d.positive), "33.33");
        assert_eq!(format!("{:.2}", d.negative), "66.67");
        assert_eq!(format!("{:.2}", d.neutral), "0.00");
        assert_eq!(derive_overall_label(&d, TieBreakPolicy::ThreeWay), OverallLabel::Negative);
        assert_eq!(
            derive_overall_label(&d, TieBreakPolicy::PositiveNegative),
            OverallLabel::Negative
        );
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let cases: &[&[SentimentLabel]] = &[
            &[Positive],
            &[Neutral, Neutral, Neutral],
            &[Positive, Negative, Neutral],
            &[Positive, Negative, Neutral, Neutral, Negative, Positive, Positive],
            &[Negative, Neutral, Neutral, Neutral, Neutral, Neutral],
        ];
        for labels in cases {
            let d = compute_distribution(&results(labels)).unwrap();
            let sum = d.positive + d.negative + d.neutral;
            assert!((sum - 100.0).abs() < EPS, "sum {sum} for {labels:?}");
        }
    }

    #[test]
    fn absent_label_is_zero() {
        let d = compute_distribution(&results(&[Positive, Positive])).unwrap();
        assert!(d.negative.abs() < f64::EPSILON);
        assert!(d.neutral.abs() < f64::EPSILON);
        assert!((d.percentage(Positive) - 100.0).abs() < EPS);
    }

    #[test]
    fn duplicate_headlines_count_once() {
        let r: SentimentResults = [("same", Positive), ("same", Positive), ("other", Negative)]
            .into_iter()
            .collect();
        let d = compute_distribution(&r).unwrap();
        assert_eq!(d.total, 2);
        assert!((d.positive - 50.0).abs() < EPS);
    }

    #[test]
    fn three_way_positive_beats_lower_shares() {
        assert_eq!(
            derive_overall_label(&dist(50.0, 30.0, 20.0), TieBreakPolicy::ThreeWay),
            OverallLabel::Positive
        );
    }

    #[test]
    fn three_way_positive_wins_ties() {
        assert_eq!(
            derive_overall_label(&dist(50.0, 50.0, 0.0), TieBreakPolicy::ThreeWay),
            OverallLabel::Positive
        );
        assert_eq!(
            derive_overall_label(&dist(40.0, 20.0, 40.0), TieBreakPolicy::ThreeWay),
            OverallLabel::Positive
        );
    }

    #[test]
    fn three_way_negative_tied_with_neutral_is_neutral() {
        assert_eq!(
            derive_overall_label(&dist(0.0, 50.0, 50.0), TieBreakPolicy::ThreeWay),
            OverallLabel::Neutral
        );
    }

    #[test]
    fn three_way_neutral_dominates() {
        assert_eq!(
            derive_overall_label(&dist(20.0, 20.0, 60.0), TieBreakPolicy::ThreeWay),
            OverallLabel::Neutral
        );
        assert_eq!(
            derive_overall_label(&dist(0.0, 0.0, 100.0), TieBreakPolicy::ThreeWay),
            OverallLabel::Neutral
        );
    }

    #[test]
    fn positive_negative_equal_shares_are_mixed() {
        assert_eq!(
            derive_overall_label(&dist(50.0, 50.0, 0.0), TieBreakPolicy::PositiveNegative),
            OverallLabel::Mixed
        );
        assert_eq!(
            derive_overall_label(&dist(0.0, 0.0, 100.0), TieBreakPolicy::PositiveNegative),
            OverallLabel::Mixed
        );
    }

    #[test]
    fn positive_negative_ignores_neutral() {
        assert_eq!(
            derive_overall_label(&dist(10.0, 0.0, 90.0), TieBreakPolicy::PositiveNegative),
            OverallLabel::Positive
        );
        assert_eq!(
            derive_overall_label(&dist(10.0, 20.0, 70.0), TieBreakPolicy::PositiveNegative),
            OverallLabel::Negative
        );
    }

    #[test]
    fn decision_is_deterministic() {
        let d = dist(33.3, 33.3, 33.4);
        for policy in [TieBreakPolicy::ThreeWay, TieBreakPolicy::PositiveNegative] {
            let first = derive_overall_label(&d, policy);
            for _ in 0..10 {
                assert_eq!(derive_overall_label(&d, policy), first);
            }
        }
    }
}
