//! Domain error types

use crate::validation::RejectionReason;
use thiserror::Error;

/// Errors returned by project commands
///
/// A command that returns an error leaves the project unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Participant name blank after trimming
    #[error("Participant name must not be empty")]
    EmptyName,

    /// Service blank after trimming
    #[error("Service must not be empty")]
    EmptyService,

    /// A participant with this name already exists
    #[error("Participant already exists: {0}")]
    DuplicateParticipant(String),

    /// No participant with this name
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    /// Declared headcount must be positive
    #[error("Declared total of persons must be greater than 0")]
    InvalidTotal,

    /// Declared headcount above [`MAX_DECLARED_TOTAL`](crate::project::MAX_DECLARED_TOTAL)
    #[error("Declared total of persons must not exceed {max} (got {total})")]
    TotalTooLarge {
        /// Requested total
        total: usize,
        /// Upper bound
        max: usize,
    },

    /// Two relations share the same identifying key
    #[error("Duplicate relation: {sender} -> {receiver} ({date} {start_time}-{end_time})")]
    DuplicateRelation {
        /// Sender name
        sender: String,
        /// Receiver name
        receiver: String,
        /// Date text
        date: String,
        /// Start time
        start_time: String,
        /// End time
        end_time: String,
    },

    /// Relation draft failed validation
    #[error("Relation rejected: {}", join_reasons(.0))]
    RelationRejected(Vec<RejectionReason>),
}

fn join_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
