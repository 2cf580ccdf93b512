//! Vigilance module - classification of a relation from its indicator scores

use std::fmt;

/// Vigilance category assigned to a recorded relation
///
/// The label is a pure function of the positive and negative peak scores
/// (see [`classify`]). Variants are declared in the order used by the
/// vigilance recap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vigilance {
    /// Three positive peaks, no negative peak
    PositivePure,

    /// One or two positive peaks, no negative peak
    Positive,

    /// Both polarities present, positive strictly dominant
    MixedPositive,

    /// Both polarities present, negative equal or dominant
    MixedTense,

    /// Three negative peaks, no positive peak
    NegativePure,

    /// One or two negative peaks, no positive peak
    Negative,

    /// No peak at all
    NoData,
}

impl Vigilance {
    /// Every label, in recap order
    pub const ALL: [Vigilance; 7] = [
        Vigilance::PositivePure,
        Vigilance::Positive,
        Vigilance::MixedPositive,
        Vigilance::MixedTense,
        Vigilance::NegativePure,
        Vigilance::Negative,
        Vigilance::NoData,
    ];

    /// Get the label as written in project files and spreadsheets
    pub fn as_str(&self) -> &'static str {
        match self {
            Vigilance::PositivePure => "Positif pur",
            Vigilance::Positive => "Positif",
            Vigilance::MixedPositive => "Mixte positif",
            Vigilance::MixedTense => "Mixte tendu",
            Vigilance::NegativePure => "Négatif pur",
            Vigilance::Negative => "Négatif",
            Vigilance::NoData => "Aucune donnée",
        }
    }

    /// Parse a label as written in project files
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s.trim())
    }

    /// Whether the label counts as a negative peak for cross detection
    pub fn is_negative_peak(&self) -> bool {
        matches!(
            self,
            Vigilance::NegativePure | Vigilance::Negative | Vigilance::MixedTense
        )
    }

    /// Whether the label counts as a positive peak for cross detection
    pub fn is_positive_peak(&self) -> bool {
        matches!(self, Vigilance::PositivePure | Vigilance::Positive)
    }
}

impl fmt::Display for Vigilance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Vigilance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid vigilance label: {}", s))
    }
}

/// Classify a relation from its positive and negative peak counts
///
/// Rules are evaluated in priority order, first match wins:
///
/// | positive | negative | label |
/// |---|---|---|
/// | 3 | 0 | `PositivePure` |
/// | 0 | 3 | `NegativePure` |
/// | 1..=2 | 0 | `Positive` |
/// | 0 | 1..=2 | `Negative` |
/// | >0, > negative | >0 | `MixedPositive` |
/// | >0, <= negative | >0 | `MixedTense` |
/// | anything else | | `NoData` |
///
/// # Examples
///
/// ```
/// use barometre_domain::{classify, Vigilance};
///
/// assert_eq!(classify(3, 0), Vigilance::PositivePure);
/// assert_eq!(classify(1, 2), Vigilance::MixedTense);
/// assert_eq!(classify(0, 0), Vigilance::NoData);
/// ```
pub fn classify(positive: u8, negative: u8) -> Vigilance {
    match (positive, negative) {
        (3, 0) => Vigilance::PositivePure,
        (0, 3) => Vigilance::NegativePure,
        (1 | 2, 0) => Vigilance::Positive,
        (0, 1 | 2) => Vigilance::Negative,
        (p, n) if p > 0 && n > 0 && p > n => Vigilance::MixedPositive,
        (p, n) if p > 0 && n > 0 => Vigilance::MixedTense,
        _ => Vigilance::NoData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The decision table as independent predicates, used to check disjointness
    fn matching_rules(p: u8, n: u8) -> Vec<Vigilance> {
        let rules: [(bool, Vigilance); 7] = [
            (p == 3 && n == 0, Vigilance::PositivePure),
            (p == 0 && n == 3, Vigilance::NegativePure),
            ((p == 1 || p == 2) && n == 0, Vigilance::Positive),
            (p == 0 && (n == 1 || n == 2), Vigilance::Negative),
            (p > 0 && n > 0 && p > n, Vigilance::MixedPositive),
            (p > 0 && n > 0 && p <= n, Vigilance::MixedTense),
            (p == 0 && n == 0, Vigilance::NoData),
        ];
        rules
            .into_iter()
            .filter(|(hit, _)| *hit)
            .map(|(_, label)| label)
            .collect()
    }

    #[test]
    fn test_reference_cases() {
        assert_eq!(classify(3, 0), Vigilance::PositivePure);
        assert_eq!(classify(0, 3), Vigilance::NegativePure);
        assert_eq!(classify(2, 0), Vigilance::Positive);
        assert_eq!(classify(1, 0), Vigilance::Positive);
        assert_eq!(classify(0, 1), Vigilance::Negative);
        assert_eq!(classify(0, 2), Vigilance::Negative);
        assert_eq!(classify(2, 1), Vigilance::MixedPositive);
        assert_eq!(classify(1, 2), Vigilance::MixedTense);
        assert_eq!(classify(1, 1), Vigilance::MixedTense);
        assert_eq!(classify(0, 0), Vigilance::NoData);
    }

    #[test]
    fn test_rules_disjoint_and_exhaustive() {
        for p in 0..=3u8 {
            for n in 0..=3u8 {
                let hits = matching_rules(p, n);
                assert_eq!(hits.len(), 1, "({}, {}) matched {:?}", p, n, hits);
                assert_eq!(hits[0], classify(p, n));
            }
        }
    }

    #[test]
    fn test_label_roundtrip() {
        for label in Vigilance::ALL {
            assert_eq!(Vigilance::parse(label.as_str()), Some(label));
            assert_eq!(label.to_string().parse::<Vigilance>(), Ok(label));
        }
        assert!(Vigilance::parse("Neutre").is_none());
    }

    #[test]
    fn test_peak_sets() {
        let negative: Vec<_> = Vigilance::ALL.into_iter().filter(|v| v.is_negative_peak()).collect();
        assert_eq!(
            negative,
            vec![Vigilance::MixedTense, Vigilance::NegativePure, Vigilance::Negative]
        );

        let positive: Vec<_> = Vigilance::ALL.into_iter().filter(|v| v.is_positive_peak()).collect();
        assert_eq!(positive, vec![Vigilance::PositivePure, Vigilance::Positive]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: labels with a single polarity never report the other one
        #[test]
        fn test_single_polarity(p in 0..=3u8, n in 0..=3u8) {
            let label = classify(p, n);
            if n == 0 && p > 0 {
                prop_assert!(label.is_positive_peak());
            }
            if p == 0 && n > 0 {
                prop_assert!(label.is_negative_peak());
                prop_assert!(label != Vigilance::MixedTense);
            }
        }

        /// Property: mixed labels only appear when both polarities are present
        #[test]
        fn test_mixed_requires_both(p in 0..=3u8, n in 0..=3u8) {
            let label = classify(p, n);
            if matches!(label, Vigilance::MixedPositive | Vigilance::MixedTense) {
                prop_assert!(p > 0 && n > 0);
            }
        }
    }
}
