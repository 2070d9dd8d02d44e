use std::fmt;
use std::str::FromStr;

/// Rule used to collapse a sentiment distribution into one overall label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreakPolicy {
    /// Positive wins ties against both other labels; Negative must win
    /// outright; everything else is Neutral.
    #[default]
    ThreeWay,
    /// Only positive and negative shares are compared. Equal shares,
    /// including both zero, are Mixed.
    PositiveNegative,
}

impl TieBreakPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreeWay => "three_way",
            Self::PositiveNegative => "positive_negative",
        }
    }
}

impl fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieBreakPolicy {
    type Err = String;

    /// Accepts snake_case or kebab-case names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "three_way" => Ok(Self::ThreeWay),
            "positive_negative" => Ok(Self::PositiveNegative),
            other => Err(format!(
                "unknown tie-break policy '{other}' (expected three_way or positive_negative)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_and_kebab_case() {
        assert_eq!(
            "three_way".parse::<TieBreakPolicy>().unwrap(),
            TieBreakPolicy::ThreeWay
        );
        assert_eq!(
            "Positive-Negative".parse::<TieBreakPolicy>().unwrap(),
            TieBreakPolicy::PositiveNegative
        );
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = "majority".parse::<TieBreakPolicy>().unwrap_err();
        assert!(err.contains("majority"), "unexpected message: {err}");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for policy in [TieBreakPolicy::ThreeWay, TieBreakPolicy::PositiveNegative] {
            assert_eq!(policy.to_string().parse::<TieBreakPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn default_is_three_way() {
        assert_eq!(TieBreakPolicy::default(), TieBreakPolicy::ThreeWay);
    }
}
