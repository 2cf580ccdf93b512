//! Indicator module - the six peak flags recorded per relation

use std::fmt;

/// One of the six peak indicators (positive or negative along the P, I and C axes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// P+
    PPlus,
    /// P-
    PMinus,
    /// I+
    IPlus,
    /// I-
    IMinus,
    /// C+
    CPlus,
    /// C-
    CMinus,
}

impl Indicator {
    /// All indicators in column order
    pub const ALL: [Indicator; 6] = [
        Indicator::PPlus,
        Indicator::PMinus,
        Indicator::IPlus,
        Indicator::IMinus,
        Indicator::CPlus,
        Indicator::CMinus,
    ];

    /// Column label ("P+", "I-", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::PPlus => "P+",
            Indicator::PMinus => "P-",
            Indicator::IPlus => "I+",
            Indicator::IMinus => "I-",
            Indicator::CPlus => "C+",
            Indicator::CMinus => "C-",
        }
    }

    /// Whether the indicator counts toward the positive peak score
    pub fn is_positive(&self) -> bool {
        matches!(self, Indicator::PPlus | Indicator::IPlus | Indicator::CPlus)
    }

    /// Parse a label, case-insensitive ("p+" and "P+" both work)
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|i| i.as_str() == upper)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Indicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid indicator: {} (expected one of P+, P-, I+, I-, C+, C-)", s))
    }
}

/// The set of indicator flags attached to one observation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Indicators {
    flags: [bool; 6],
}

impl Indicators {
    /// No indicator set
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from a list of indicators that are present
    pub fn from_set<I: IntoIterator<Item = Indicator>>(present: I) -> Self {
        let mut indicators = Self::default();
        for indicator in present {
            indicators.set(indicator, true);
        }
        indicators
    }

    fn slot(indicator: Indicator) -> usize {
        match indicator {
            Indicator::PPlus => 0,
            Indicator::PMinus => 1,
            Indicator::IPlus => 2,
            Indicator::IMinus => 3,
            Indicator::CPlus => 4,
            Indicator::CMinus => 5,
        }
    }

    /// Whether an indicator is present
    pub fn get(&self, indicator: Indicator) -> bool {
        self.flags[Self::slot(indicator)]
    }

    /// Set or clear an indicator
    pub fn set(&mut self, indicator: Indicator, present: bool) {
        self.flags[Self::slot(indicator)] = present;
    }

    /// Builder-style variant of [`Indicators::set`]
    pub fn with(mut self, indicator: Indicator) -> Self {
        self.set(indicator, true);
        self
    }

    /// Present indicators, in column order
    pub fn present(&self) -> impl Iterator<Item = Indicator> + '_ {
        Indicator::ALL.into_iter().filter(|i| self.get(*i))
    }

    /// Whether no indicator is set
    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|f| *f)
    }

    /// Count of positive peaks (P+, I+, C+), in [0, 3]
    pub fn positive_score(&self) -> u8 {
        self.present().filter(Indicator::is_positive).count() as u8
    }

    /// Count of negative peaks (P-, I-, C-), in [0, 3]
    pub fn negative_score(&self) -> u8 {
        self.present().filter(|i| !i.is_positive()).count() as u8
    }

    /// Positive score minus negative score
    pub fn net_score(&self) -> i8 {
        self.positive_score() as i8 - self.negative_score() as i8
    }
}
