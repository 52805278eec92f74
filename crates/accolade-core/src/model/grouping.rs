//! Boolean grouping of condition results

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boolean combinator used to fold per-condition results into a single
/// unlock decision.
///
/// Mixed grouping ("two ANDed conditions OR one more") is not expressible in
/// a single achievement; model that as nested sub-achievements instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Every condition must hold
    #[default]
    And,
    /// At least one condition must hold
    Or,
    /// An odd number of conditions must hold
    Xor,
}

impl Grouping {
    /// Fold seed: the identity element of the operator.
    ///
    /// Seeding with the identity keeps skipped conditions from contributing
    /// to the result: an all-skipped AND achievement stays unlocked, and XOR
    /// over exactly two satisfied conditions stays locked.
    pub fn identity(&self) -> bool {
        match self {
            Grouping::And => true,
            Grouping::Or | Grouping::Xor => false,
        }
    }

    /// One pairwise application of the operator.
    pub fn combine(&self, acc: bool, value: bool) -> bool {
        match self {
            Grouping::And => acc && value,
            Grouping::Or => acc || value,
            Grouping::Xor => acc ^ value,
        }
    }

    /// Left fold over condition results, seeded with [`Grouping::identity`].
    pub fn fold(&self, results: impl IntoIterator<Item = bool>) -> bool {
        results
            .into_iter()
            .fold(self.identity(), |acc, value| self.combine(acc, value))
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Grouping::And => "and",
            Grouping::Or => "or",
            Grouping::Xor => "xor",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Grouping {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(Grouping::And),
            "or" => Ok(Grouping::Or),
            "xor" => Ok(Grouping::Xor),
            other => Err(CoreError::InvalidGrouping(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grouping_is_and() {
        assert_eq!(Grouping::default(), Grouping::And);
    }

    #[test]
    fn test_and_fold() {
        assert!(Grouping::And.fold([true, true, true]));
        assert!(!Grouping::And.fold([true, false, true]));
        // Empty fold yields the seed: vacuously unlocked
        assert!(Grouping::And.fold([]));
    }

    #[test]
    fn test_or_fold() {
        assert!(Grouping::Or.fold([false, true, false]));
        assert!(!Grouping::Or.fold([false, false, false]));
        assert!(!Grouping::Or.fold([]));
    }

    #[test]
    fn test_xor_fold_even_count_stays_false() {
        // xor(true, true) folds to false from the false seed
        assert!(!Grouping::Xor.fold([true, true]));
        assert!(!Grouping::Xor.fold([true, true, false]));
        assert!(Grouping::Xor.fold([true, false, false]));
        assert!(Grouping::Xor.fold([true, true, true]));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("and".parse::<Grouping>().unwrap(), Grouping::And);
        assert_eq!("or".parse::<Grouping>().unwrap(), Grouping::Or);
        assert_eq!("xor".parse::<Grouping>().unwrap(), Grouping::Xor);
        assert!("nand".parse::<Grouping>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let parsed: Grouping = serde_json::from_str(r#""xor""#).unwrap();
        assert_eq!(parsed, Grouping::Xor);
        assert_eq!(serde_json::to_string(&Grouping::Or).unwrap(), r#""or""#);
    }
}
