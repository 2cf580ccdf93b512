//! Barometre Domain Layer
//!
//! Core model of a relational barometer: a roster of named participants, a
//! declared headcount, and the directed relations observed between them.
//! Every derived table (all pairs, vigilance recap, unidirectional view, cross
//! pairs, combined recap) is computed from a [`Project`] snapshot and never
//! stored.
//!
//! ## Key Concepts
//!
//! - **Participant**: a named person attached to a service
//! - **Relation**: one directed observation (sender -> receiver) over a time window
//! - **Indicators**: six binary flags (P+, P-, I+, I-, C+, C-) checked on a relation
//! - **Vigilance**: the qualitative label derived from the positive and negative scores
//! - **Declared total**: the headcount the barometer is computed over; missing
//!   persons are completed with anonymous names
//!
//! ## Architecture
//!
//! - No I/O, no serialization: the export crate owns file formats
//! - Mutation goes through [`Project`], which enforces roster and relation invariants
//! - Views borrow from the project they are built from

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod indicator;
pub mod participant;
pub mod project;
pub mod relation;
pub mod validation;
pub mod views;
pub mod vigilance;

// Re-exports for convenience
pub use error::DomainError;
pub use indicator::{Indicator, Indicators};
pub use participant::Participant;
pub use project::{Project, MAX_DECLARED_TOTAL};
pub use relation::{parse_date, Relation, RelationDraft, RelationId, DATE_FORMAT};
pub use validation::RejectionReason;
pub use views::ProjectViews;
pub use vigilance::{classify, Vigilance};
