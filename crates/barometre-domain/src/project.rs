//! Project module - the owned, mutable state of one editing session
//!
//! Every command takes `&mut self`, validates first and mutates last, so a
//! command that returns an error leaves the project exactly as it was.

use crate::error::DomainError;
use crate::participant::Participant;
use crate::relation::{Relation, RelationDraft, RelationId};
use crate::validation::validate_draft;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Largest accepted declared total of persons.
///
/// The all-pairs view has `n * (n - 1)` rows and must fit in one worksheet.
pub const MAX_DECLARED_TOTAL: usize = 1000;

/// Participants, recorded relations and the declared headcount
#[derive(Debug, Clone, Default)]
pub struct Project {
    participants: Vec<Participant>,
    relations: Vec<Relation>,
    declared_total: usize,
    last_relation_id: u64,
}

impl Project {
    /// Create an empty project
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a project from imported data
    ///
    /// Relation ids are reassigned in order. Fails without side effects if
    /// participant names are blank or repeated, or if two relations share the
    /// same identifying key.
    pub fn restore(
        participants: Vec<Participant>,
        relations: Vec<Relation>,
        declared_total: usize,
    ) -> Result<Self, DomainError> {
        check_total_bound(declared_total)?;

        let mut seen = HashSet::new();
        for participant in &participants {
            if participant.name.is_empty() {
                return Err(DomainError::EmptyName);
            }
            if !seen.insert(participant.name.as_str()) {
                return Err(DomainError::DuplicateParticipant(participant.name.clone()));
            }
        }

        let mut project = Self {
            participants,
            relations: Vec::with_capacity(relations.len()),
            declared_total,
            last_relation_id: 0,
        };

        for mut relation in relations {
            if project.relations.iter().any(|r| {
                r.same_key(
                    &relation.sender,
                    &relation.receiver,
                    relation.date,
                    &relation.start_time,
                    &relation.end_time,
                )
            }) {
                let date = relation.date_text();
                return Err(DomainError::DuplicateRelation {
                    sender: relation.sender,
                    receiver: relation.receiver,
                    date,
                    start_time: relation.start_time,
                    end_time: relation.end_time,
                });
            }
            relation.id = project.allocate_id();
            project.relations.push(relation);
        }

        debug!(
            participants = project.participants.len(),
            relations = project.relations.len(),
            declared_total,
            "Project restored"
        );
        Ok(project)
    }

    /// Replace the whole state with another project (import)
    pub fn replace_with(&mut self, other: Project) {
        *self = other;
        info!(
            participants = self.participants.len(),
            relations = self.relations.len(),
            "Project replaced"
        );
    }

    /// Clear everything (new project)
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Project reset");
    }

    /// Participants in roster order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Recorded relations in recording order
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Declared total of persons concerned by the analysis
    pub fn declared_total(&self) -> usize {
        self.declared_total
    }

    /// Number of named participants
    pub fn named_count(&self) -> usize {
        self.participants.len()
    }

    /// Find a participant by name
    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Find a relation by id
    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.iter().find(|r| r.id == id)
    }

    /// Distinct services, in order of first appearance on the roster
    pub fn services(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.participants
            .iter()
            .filter(|p| seen.insert(p.service.as_str()))
            .map(|p| p.service.clone())
            .collect()
    }

    /// Every ordered pair of distinct named participants, in roster order
    pub fn possible_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for sender in &self.participants {
            for receiver in &self.participants {
                if sender.name != receiver.name {
                    pairs.push((sender.name.as_str(), receiver.name.as_str()));
                }
            }
        }
        pairs
    }

    /// Add a participant to the end of the roster
    pub fn add_participant(&mut self, name: &str, service: &str) -> Result<(), DomainError> {
        let participant = Participant::new(name, service);
        if participant.name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if participant.service.is_empty() {
            return Err(DomainError::EmptyService);
        }
        if self.participant(&participant.name).is_some() {
            return Err(DomainError::DuplicateParticipant(participant.name));
        }

        info!(name = %participant.name, service = %participant.service, "Participant added");
        self.participants.push(participant);
        Ok(())
    }

    /// Rename a participant, cascading to every relation that references it
    ///
    /// Returns the number of relations updated.
    pub fn rename_participant(&mut self, old: &str, new: &str) -> Result<usize, DomainError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let index = self
            .participants
            .iter()
            .position(|p| p.name == old)
            .ok_or_else(|| DomainError::ParticipantNotFound(old.to_string()))?;
        if new == old {
            return Ok(0);
        }
        if self.participant(new).is_some() {
            return Err(DomainError::DuplicateParticipant(new.to_string()));
        }

        let mut updated = 0;
        for relation in &mut self.relations {
            let mut touched = false;
            if relation.sender == old {
                relation.sender = new.to_string();
                touched = true;
            }
            if relation.receiver == old {
                relation.receiver = new.to_string();
                touched = true;
            }
            if touched {
                updated += 1;
            }
        }
        self.participants[index].name = new.to_string();

        info!(old, new, relations = updated, "Participant renamed");
        Ok(updated)
    }

    /// Change a participant's service
    ///
    /// Stored relations keep the service their sender had when they were saved.
    pub fn change_service(&mut self, name: &str, service: &str) -> Result<(), DomainError> {
        let service = service.trim();
        if service.is_empty() {
            return Err(DomainError::EmptyService);
        }
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainError::ParticipantNotFound(name.to_string()))?;
        participant.service = service.to_string();

        info!(name, service, "Participant service changed");
        Ok(())
    }

    /// Delete a participant and every relation where it is sender or receiver
    ///
    /// Returns the number of relations removed.
    pub fn delete_participant(&mut self, name: &str) -> Result<usize, DomainError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| DomainError::ParticipantNotFound(name.to_string()))?;
        self.participants.remove(index);

        let before = self.relations.len();
        self.relations.retain(|r| !r.involves(name));
        let removed = before - self.relations.len();

        info!(name, relations = removed, "Participant deleted");
        Ok(removed)
    }

    /// Set the declared total of persons (between 1 and [`MAX_DECLARED_TOTAL`])
    pub fn set_declared_total(&mut self, total: usize) -> Result<(), DomainError> {
        if total == 0 {
            return Err(DomainError::InvalidTotal);
        }
        check_total_bound(total)?;
        if total < self.named_count() {
            warn!(
                total,
                named = self.named_count(),
                "Declared total is below the number of named participants"
            );
        }
        self.declared_total = total;
        info!(total, "Declared total set");
        Ok(())
    }

    /// Validate and append a relation, returning its id
    ///
    /// The stored service is the sender's current service. Every validation
    /// problem is reported in [`DomainError::RelationRejected`].
    pub fn record_relation(&mut self, mut draft: RelationDraft) -> Result<RelationId, DomainError> {
        draft.normalize();
        let reasons = validate_draft(&draft, &self.participants, &self.relations);
        if !reasons.is_empty() {
            debug!(sender = %draft.sender, receiver = %draft.receiver, count = reasons.len(), "Relation rejected");
            return Err(DomainError::RelationRejected(reasons));
        }

        let service = self
            .participant(&draft.sender)
            .map(|p| p.service.clone())
            .unwrap_or_default();
        let id = self.allocate_id();
        let relation = Relation::new(
            id,
            draft.sender,
            draft.receiver,
            Some(draft.date),
            draft.start_time,
            draft.end_time,
            service,
            draft.indicators,
            draft.comment,
        );

        info!(
            id = %id,
            sender = %relation.sender,
            receiver = %relation.receiver,
            vigilance = %relation.vigilance(),
            "Relation recorded"
        );
        self.relations.push(relation);
        Ok(id)
    }

    /// Delete relations by id, returning how many were removed
    ///
    /// Unknown ids are ignored.
    pub fn delete_relations(&mut self, ids: &[RelationId]) -> usize {
        let before = self.relations.len();
        self.relations.retain(|r| !ids.contains(&r.id));
        let removed = before - self.relations.len();
        info!(requested = ids.len(), removed, "Relations deleted");
        removed
    }

    fn allocate_id(&mut self) -> RelationId {
        self.last_relation_id += 1;
        RelationId::from_value(self.last_relation_id)
    }
}

fn check_total_bound(total: usize) -> Result<(), DomainError> {
    if total > MAX_DECLARED_TOTAL {
        return Err(DomainError::TotalTooLarge {
            total,
            max: MAX_DECLARED_TOTAL,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{Indicator, Indicators};
    use crate::validation::RejectionReason;
    use crate::vigilance::Vigilance;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn draft(sender: &str, receiver: &str, start: &str) -> RelationDraft {
        RelationDraft::new(sender, receiver, date())
            .window(start, "17:00")
            .indicators(Indicators::none().with(Indicator::PPlus))
    }

    fn three_person_project() -> Project {
        let mut project = Project::new();
        project.add_participant("Alice", "RH").unwrap();
        project.add_participant("Bob", "IT").unwrap();
        project.add_participant("Carol", "IT").unwrap();
        project
    }

    #[test]
    fn test_add_participant_rules() {
        let mut project = Project::new();
        project.add_participant(" Alice ", " RH ").unwrap();
        assert_eq!(project.participants()[0], Participant::new("Alice", "RH"));

        assert_eq!(project.add_participant("Alice", "IT"), Err(DomainError::DuplicateParticipant("Alice".into())));
        assert_eq!(project.add_participant("   ", "IT"), Err(DomainError::EmptyName));
        assert_eq!(project.add_participant("Bob", ""), Err(DomainError::EmptyService));
        assert_eq!(project.named_count(), 1);
    }

    #[test]
    fn test_services_distinct_in_roster_order() {
        let project = three_person_project();
        assert_eq!(project.services(), vec!["RH".to_string(), "IT".to_string()]);
    }

    #[test]
    fn test_record_relation_stores_sender_service_and_label() {
        let mut project = three_person_project();
        let id = project.record_relation(draft("Bob", "Alice", "09:00")).unwrap();

        let stored = project.relation(id).unwrap();
        assert_eq!(stored.service, "IT");
        assert_eq!(stored.vigilance(), Vigilance::Positive);
        assert_eq!(stored.date, Some(date()));
    }

    #[test]
    fn test_record_relation_rejects_duplicate() {
        let mut project = three_person_project();
        let first = project.record_relation(draft("Alice", "Bob", "09:00")).unwrap();

        let err = project.record_relation(draft("Alice", "Bob", " 09:00 ")).unwrap_err();
        assert_eq!(
            err,
            DomainError::RelationRejected(vec![RejectionReason::Duplicate { existing_id: first }])
        );
        assert_eq!(project.relations().len(), 1);

        // Same pair, another time window, is a new observation
        project.record_relation(draft("Alice", "Bob", "10:00")).unwrap();
        assert_eq!(project.relations().len(), 2);
    }

    #[test]
    fn test_rejected_relation_leaves_state_unchanged() {
        let mut project = three_person_project();
        let bad = RelationDraft::new("Alice", "Bob", date());
        assert!(project.record_relation(bad).is_err());
        assert!(project.relations().is_empty());

        // The failed attempt does not consume an id
        let id = project.record_relation(draft("Alice", "Bob", "09:00")).unwrap();
        assert_eq!(id, RelationId::from_value(1));
    }

    #[test]
    fn test_rename_cascades() {
        let mut project = three_person_project();
        project.record_relation(draft("Alice", "Bob", "09:00")).unwrap();
        project.record_relation(draft("Bob", "Alice", "09:00")).unwrap();
        project.record_relation(draft("Bob", "Carol", "09:00")).unwrap();
        let before: Vec<_> = project.relations().to_vec();

        let updated = project.rename_participant("Alice", "Alicia").unwrap();
        assert_eq!(updated, 2);
        assert!(project.participant("Alice").is_none());
        assert_eq!(project.participants()[0].name, "Alicia");

        for (old, new) in before.iter().zip(project.relations()) {
            let expected_sender = if old.sender == "Alice" { "Alicia" } else { old.sender.as_str() };
            let expected_receiver = if old.receiver == "Alice" { "Alicia" } else { old.receiver.as_str() };
            assert_eq!(new.sender, expected_sender);
            assert_eq!(new.receiver, expected_receiver);
            assert_eq!(new.id, old.id);
            assert_eq!(new.date, old.date);
            assert_eq!(new.start_time, old.start_time);
            assert_eq!(new.service, old.service);
            assert_eq!(new.indicators(), old.indicators());
            assert_eq!(new.vigilance(), old.vigilance());
            assert_eq!(new.comment, old.comment);
        }
    }

    #[test]
    fn test_rename_rejects_collision() {
        let mut project = three_person_project();
        assert_eq!(
            project.rename_participant("Alice", "Bob"),
            Err(DomainError::DuplicateParticipant("Bob".into()))
        );
        assert_eq!(
            project.rename_participant("Zoe", "Zed"),
            Err(DomainError::ParticipantNotFound("Zoe".into()))
        );
        assert_eq!(project.rename_participant("Alice", " "), Err(DomainError::EmptyName));
    }

    #[test]
    fn test_change_service_keeps_relation_service() {
        let mut project = three_person_project();
        let id = project.record_relation(draft("Alice", "Bob", "09:00")).unwrap();
        project.change_service("Alice", "Direction").unwrap();

        assert_eq!(project.participant("Alice").unwrap().service, "Direction");
        assert_eq!(project.relation(id).unwrap().service, "RH");
    }

    #[test]
    fn test_delete_participant_cascades() {
        let mut project = three_person_project();
        project.record_relation(draft("Alice", "Bob", "09:00")).unwrap();
        project.record_relation(draft("Carol", "Alice", "09:00")).unwrap();
        let kept = project.record_relation(draft("Bob", "Carol", "09:00")).unwrap();

        let removed = project.delete_participant("Alice").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(project.relations().len(), 1);
        assert_eq!(project.relations()[0].id, kept);
        assert!(project.delete_participant("Alice").is_err());
    }

    #[test]
    fn test_delete_relations_by_id() {
        let mut project = three_person_project();
        let a = project.record_relation(draft("Alice", "Bob", "09:00")).unwrap();
        let b = project.record_relation(draft("Bob", "Alice", "09:00")).unwrap();
        let c = project.record_relation(draft("Bob", "Carol", "09:00")).unwrap();

        let removed = project.delete_relations(&[a, c, RelationId::from_value(99)]);
        assert_eq!(removed, 2);
        assert_eq!(project.relations().len(), 1);
        assert_eq!(project.relations()[0].id, b);

        // Ids are never reused
        let d = project.record_relation(draft("Alice", "Carol", "09:00")).unwrap();
        assert!(d > c);
    }

    #[test]
    fn test_declared_total() {
        let mut project = three_person_project();
        assert_eq!(project.set_declared_total(0), Err(DomainError::InvalidTotal));
        assert_eq!(project.declared_total(), 0);
        project.set_declared_total(5).unwrap();
        assert_eq!(project.declared_total(), 5);
        // Below the named count is accepted with a warning
        project.set_declared_total(2).unwrap();
        assert_eq!(project.declared_total(), 2);
    }

    #[test]
    fn test_declared_total_upper_bound() {
        let mut project = three_person_project();
        project.set_declared_total(MAX_DECLARED_TOTAL).unwrap();

        assert_eq!(
            project.set_declared_total(usize::MAX),
            Err(DomainError::TotalTooLarge {
                total: usize::MAX,
                max: MAX_DECLARED_TOTAL,
            })
        );
        assert!(project.set_declared_total(MAX_DECLARED_TOTAL + 1).is_err());
        assert_eq!(project.declared_total(), MAX_DECLARED_TOTAL);
    }

    #[test]
    fn test_restore_rejects_oversized_total() {
        let participants = vec![Participant::new("Alice", "RH")];
        assert!(matches!(
            Project::restore(participants, vec![], MAX_DECLARED_TOTAL + 1),
            Err(DomainError::TotalTooLarge { .. })
        ));
    }

    #[test]
    fn test_possible_pairs() {
        let project = three_person_project();
        let pairs = project.possible_pairs();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], ("Alice", "Bob"));
        assert_eq!(pairs[1], ("Alice", "Carol"));
        assert_eq!(pairs[2], ("Bob", "Alice"));
    }

    #[test]
    fn test_restore_rejects_duplicates() {
        let participants = vec![Participant::new("Alice", "RH"), Participant::new("Alice", "IT")];
        assert_eq!(
            Project::restore(participants, vec![], 2).unwrap_err(),
            DomainError::DuplicateParticipant("Alice".into())
        );
    }

    #[test]
    fn test_restore_renumbers_relations() {
        let mut source = three_person_project();
        let a = source.record_relation(draft("Alice", "Bob", "09:00")).unwrap();
        source.record_relation(draft("Bob", "Alice", "09:00")).unwrap();
        source.delete_relations(&[a]);

        let restored = Project::restore(
            source.participants().to_vec(),
            source.relations().to_vec(),
            source.declared_total(),
        )
        .unwrap();
        assert_eq!(restored.relations()[0].id, RelationId::from_value(1));
        assert_eq!(restored.relations()[0].sender, "Bob");
    }

    #[test]
    fn test_reset_and_replace() {
        let mut project = three_person_project();
        project.set_declared_total(4).unwrap();
        let snapshot = project.clone();

        project.reset();
        assert!(project.participants().is_empty());
        assert_eq!(project.declared_total(), 0);

        project.replace_with(snapshot);
        assert_eq!(project.named_count(), 3);
        assert_eq!(project.declared_total(), 4);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::indicator::{Indicator, Indicators};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const NAMES: [&str; 4] = ["Ana", "Ben", "Chloe", "Dan"];

    fn populated(pairs: &[(usize, usize, u8)]) -> Project {
        let mut project = Project::new();
        for name in NAMES {
            project.add_participant(name, "S").unwrap();
        }
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for (k, (s, r, hour)) in pairs.iter().enumerate() {
            let bits = (k * 7 + s * 3 + r) % 64;
            let indicators = Indicators::from_set(
                Indicator::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(bit, _)| bits & (1 << bit) != 0)
                    .map(|(_, indicator)| indicator),
            )
            .with(Indicator::CPlus);
            let draft = RelationDraft::new(NAMES[*s], NAMES[*r], date)
                .window(format!("{:02}:00", hour), "23:00")
                .indicators(indicators);
            // Self-pairs and duplicates are rejected, which is fine here
            let _ = project.record_relation(draft);
        }
        project
    }

    proptest! {
        /// Property: deleting a participant removes exactly the relations that involve it
        #[test]
        fn test_delete_removes_exactly_involved(
            pairs in prop::collection::vec((0..4usize, 0..4usize, 0..12u8), 0..30),
            victim in 0..4usize,
        ) {
            let mut project = populated(&pairs);
            let name = NAMES[victim];
            let expected: Vec<_> = project.relations().iter().filter(|r| !r.involves(name)).cloned().collect();

            project.delete_participant(name).unwrap();
            prop_assert_eq!(project.relations(), expected.as_slice());
        }

        /// Property: renaming never changes the number of relations or their non-name fields
        #[test]
        fn test_rename_preserves_other_fields(
            pairs in prop::collection::vec((0..4usize, 0..4usize, 0..12u8), 0..30),
            target in 0..4usize,
        ) {
            let mut project = populated(&pairs);
            let before = project.relations().to_vec();
            project.rename_participant(NAMES[target], "Renamed").unwrap();

            prop_assert_eq!(before.len(), project.relations().len());
            for (old, new) in before.iter().zip(project.relations()) {
                prop_assert_eq!(old.id, new.id);
                prop_assert_eq!(old.vigilance(), new.vigilance());
                prop_assert_eq!(&old.start_time, &new.start_time);
                prop_assert!(!new.involves(NAMES[target]));
            }
        }
    }
}
