//! Relation draft validation
//!
//! Every problem found in a draft is reported, not only the first one, so the
//! caller can show one message per missing item.

use crate::relation::{Relation, RelationDraft, RelationId};
use crate::participant::Participant;
use std::fmt;

/// Reasons for rejecting a relation draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Start time left blank
    MissingStartTime,

    /// End time left blank
    MissingEndTime,

    /// No indicator selected
    NoIndicator,

    /// Same sender, receiver, date, start and end as a stored relation
    Duplicate {
        /// ID of the stored relation
        existing_id: RelationId,
    },

    /// Sender or receiver is not on the roster
    UnknownParticipant(String),

    /// Sender and receiver are the same person
    SelfRelation(String),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingStartTime => f.write_str("start time is missing"),
            RejectionReason::MissingEndTime => f.write_str("end time is missing"),
            RejectionReason::NoIndicator => f.write_str("no indicator selected"),
            RejectionReason::Duplicate { existing_id } => write!(
                f,
                "a relation with the same sender, receiver, date, start and end time already exists (#{})",
                existing_id
            ),
            RejectionReason::UnknownParticipant(name) => write!(f, "unknown participant '{}'", name),
            RejectionReason::SelfRelation(name) => {
                write!(f, "'{}' cannot be both sender and receiver", name)
            }
        }
    }
}

/// Validate a normalized draft against the roster and the stored relations
pub(crate) fn validate_draft(
    draft: &RelationDraft,
    participants: &[Participant],
    relations: &[Relation],
) -> Vec<RejectionReason> {
    let mut reasons = Vec::new();

    for name in [&draft.sender, &draft.receiver] {
        let reason = RejectionReason::UnknownParticipant(name.clone());
        if !participants.iter().any(|p| &p.name == name) && !reasons.contains(&reason) {
            reasons.push(reason);
        }
    }

    if draft.sender == draft.receiver {
        reasons.push(RejectionReason::SelfRelation(draft.sender.clone()));
    }

    if draft.start_time.is_empty() {
        reasons.push(RejectionReason::MissingStartTime);
    }

    if draft.end_time.is_empty() {
        reasons.push(RejectionReason::MissingEndTime);
    }

    if draft.indicators.is_empty() {
        reasons.push(RejectionReason::NoIndicator);
    }

    if let Some(existing) = relations.iter().find(|r| {
        r.same_key(
            &draft.sender,
            &draft.receiver,
            Some(draft.date),
            &draft.start_time,
            &draft.end_time,
        )
    }) {
        reasons.push(RejectionReason::Duplicate {
            existing_id: existing.id,
        });
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{Indicator, Indicators};
    use chrono::NaiveDate;

    fn roster() -> Vec<Participant> {
        vec![Participant::new("Alice", "RH"), Participant::new("Bob", "IT")]
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_valid_draft() {
        let draft = RelationDraft::new("Alice", "Bob", date())
            .window("09:00", "10:00")
            .indicators(Indicators::none().with(Indicator::PPlus));
        assert!(validate_draft(&draft, &roster(), &[]).is_empty());
    }

    #[test]
    fn test_one_reason_per_missing_item() {
        let draft = RelationDraft::new("Alice", "Bob", date());
        let reasons = validate_draft(&draft, &roster(), &[]);
        assert_eq!(
            reasons,
            vec![
                RejectionReason::MissingStartTime,
                RejectionReason::MissingEndTime,
                RejectionReason::NoIndicator,
            ]
        );
    }

    #[test]
    fn test_unknown_and_self() {
        let draft = RelationDraft::new("Zoe", "Zoe", date())
            .window("09:00", "10:00")
            .indicators(Indicators::none().with(Indicator::CMinus));
        let reasons = validate_draft(&draft, &roster(), &[]);
        assert!(reasons.contains(&RejectionReason::UnknownParticipant("Zoe".to_string())));
        assert!(reasons.contains(&RejectionReason::SelfRelation("Zoe".to_string())));
    }

    #[test]
    fn test_duplicate_detected() {
        let stored = Relation::new(
            RelationId::from_value(4),
            "Alice".to_string(),
            "Bob".to_string(),
            Some(date()),
            "09:00".to_string(),
            "10:00".to_string(),
            "RH".to_string(),
            Indicators::none().with(Indicator::IPlus),
            String::new(),
        );
        let draft = RelationDraft::new("Alice", "Bob", date())
            .window("09:00", "10:00")
            .indicators(Indicators::none().with(Indicator::PPlus));
        let reasons = validate_draft(&draft, &roster(), &[stored]);
        assert_eq!(
            reasons,
            vec![RejectionReason::Duplicate {
                existing_id: RelationId::from_value(4)
            }]
        );
    }
}
