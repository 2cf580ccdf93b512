//! Relation module - directed, timestamped observations between two participants

use crate::indicator::Indicators;
use crate::vigilance::{classify, Vigilance};
use chrono::NaiveDate;
use std::fmt;

/// Date format used in project files and spreadsheets (`DD/MM/YYYY`)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Stable identifier of a stored relation
///
/// Assigned from a per-project sequence when the relation is stored. It is
/// never reused within a project and is not part of the project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationId(u64);

impl RelationId {
    /// Create a RelationId from a raw sequence number
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw sequence number
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RelationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid relation id '{}': {}", s, e))
    }
}

/// A recorded, classified observation from `sender` toward `receiver`
///
/// Scores and vigilance are derived from the indicators, which are fixed at
/// construction, so they cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Stable identifier
    pub id: RelationId,

    /// Participant expressing the relation
    pub sender: String,

    /// Participant the relation is directed at
    pub receiver: String,

    /// Observation date (absent only for imported rows without a date)
    pub date: Option<NaiveDate>,

    /// Start of the observation window, free text (e.g. "09:00")
    pub start_time: String,

    /// End of the observation window, free text
    pub end_time: String,

    /// Sender's service at the time the relation was saved
    pub service: String,

    indicators: Indicators,

    vigilance: Vigilance,

    /// Free-form comment
    pub comment: String,
}

impl Relation {
    /// Create a new relation, classifying it from its indicators
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RelationId,
        sender: String,
        receiver: String,
        date: Option<NaiveDate>,
        start_time: String,
        end_time: String,
        service: String,
        indicators: Indicators,
        comment: String,
    ) -> Self {
        Self {
            id,
            sender,
            receiver,
            date,
            start_time,
            end_time,
            service,
            vigilance: classify(indicators.positive_score(), indicators.negative_score()),
            indicators,
            comment,
        }
    }

    /// Indicator flags
    pub fn indicators(&self) -> Indicators {
        self.indicators
    }

    /// Vigilance label assigned at recording time
    pub fn vigilance(&self) -> Vigilance {
        self.vigilance
    }

    /// Positive peak score
    pub fn positive_score(&self) -> u8 {
        self.indicators.positive_score()
    }

    /// Negative peak score
    pub fn negative_score(&self) -> u8 {
        self.indicators.negative_score()
    }

    /// Net score (positive minus negative)
    pub fn net_score(&self) -> i8 {
        self.indicators.net_score()
    }

    /// Date rendered as `DD/MM/YYYY`, empty when absent
    pub fn date_text(&self) -> String {
        self.date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Whether this relation has the same identifying key as another observation
    pub fn same_key(
        &self,
        sender: &str,
        receiver: &str,
        date: Option<NaiveDate>,
        start_time: &str,
        end_time: &str,
    ) -> bool {
        self.sender == sender
            && self.receiver == receiver
            && self.date == date
            && self.start_time == start_time
            && self.end_time == end_time
    }

    /// Whether the participant is the sender or the receiver
    pub fn involves(&self, name: &str) -> bool {
        self.sender == name || self.receiver == name
    }
}

/// A relation as entered by the user, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDraft {
    /// Sender name
    pub sender: String,

    /// Receiver name
    pub receiver: String,

    /// Observation date
    pub date: NaiveDate,

    /// Start time text
    pub start_time: String,

    /// End time text
    pub end_time: String,

    /// Selected indicators
    pub indicators: Indicators,

    /// Comment
    pub comment: String,
}

impl RelationDraft {
    /// Create a draft with no time window, indicators or comment
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            date,
            start_time: String::new(),
            end_time: String::new(),
            indicators: Indicators::none(),
            comment: String::new(),
        }
    }

    /// Set the observation window
    pub fn window(mut self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        self.start_time = start_time.into();
        self.end_time = end_time.into();
        self
    }

    /// Set the indicators
    pub fn indicators(mut self, indicators: Indicators) -> Self {
        self.indicators = indicators;
        self
    }

    /// Set the comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Trim names and times in place
    pub(crate) fn normalize(&mut self) {
        self.sender = self.sender.trim().to_string();
        self.receiver = self.receiver.trim().to_string();
        self.start_time = self.start_time.trim().to_string();
        self.end_time = self.end_time.trim().to_string();
    }
}

/// Parse a `DD/MM/YYYY` date
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| format!("Invalid date '{}' (expected DD/MM/YYYY): {}", s, e))
}
