//! All-pairs completion (the "Relations" view)

use super::pair_lookup;
use crate::project::Project;
use crate::relation::Relation;

/// Prefix of the synthetic names completing the roster up to the declared total
pub const ANONYMOUS_PREFIX: &str = "Personne Anonyme";

/// Text written in place of unknown dates, times and services
pub const PLACEHOLDER_SENTINEL: &str = "RAS";

/// Vigilance text of an unrecorded pair
pub const NEUTRAL_LABEL: &str = "Neutre";

/// Comment attached to an unrecorded pair
pub const PLACEHOLDER_COMMENT: &str = "Relation non renseignée ou non applicable";

/// An ordered pair for which nothing was recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Sender name (possibly anonymous)
    pub sender: String,

    /// Receiver name (possibly anonymous)
    pub receiver: String,

    /// Sender's service when the sender is a named participant
    pub service: Option<String>,
}

impl Placeholder {
    /// Service text, falling back to the sentinel for anonymous senders
    pub fn service_text(&self) -> &str {
        self.service.as_deref().unwrap_or(PLACEHOLDER_SENTINEL)
    }
}

/// One row of the all-pairs view
#[derive(Debug, Clone, PartialEq)]
pub enum PairRow<'a> {
    /// The pair has a recorded relation, emitted verbatim
    Recorded(&'a Relation),

    /// The pair has no recorded relation; rendered as a neutral row
    Unrecorded(Placeholder),
}

impl PairRow<'_> {
    /// Sender name
    pub fn sender(&self) -> &str {
        match self {
            PairRow::Recorded(r) => &r.sender,
            PairRow::Unrecorded(p) => &p.sender,
        }
    }

    /// Receiver name
    pub fn receiver(&self) -> &str {
        match self {
            PairRow::Recorded(r) => &r.receiver,
            PairRow::Unrecorded(p) => &p.receiver,
        }
    }

    /// Whether this row stands for an unrecorded pair
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PairRow::Unrecorded(_))
    }
}

/// Named participants in roster order, followed by anonymous names up to the declared total
///
/// Anonymous names are only added when the declared total exceeds the named count.
pub fn full_name_list(project: &Project) -> Vec<String> {
    let mut names: Vec<String> = project.participants().iter().map(|p| p.name.clone()).collect();
    let missing = project.declared_total().saturating_sub(names.len());
    names.extend((1..=missing).map(|k| format!("{} {}", ANONYMOUS_PREFIX, k)));
    names
}

/// Every ordered pair (sender != receiver) of the full name list
///
/// Yields `N * (N - 1)` rows where `N` is the length of [`full_name_list`].
pub fn build_all_pairs_view(project: &Project) -> Vec<PairRow<'_>> {
    let names = full_name_list(project);
    let lookup = pair_lookup(project);
    let mut rows = Vec::with_capacity(names.len() * names.len().saturating_sub(1));

    for sender in &names {
        for receiver in &names {
            if sender == receiver {
                continue;
            }
            match lookup.get(&(sender.as_str(), receiver.as_str())) {
                Some(relation) => rows.push(PairRow::Recorded(*relation)),
                None => rows.push(PairRow::Unrecorded(Placeholder {
                    sender: sender.clone(),
                    receiver: receiver.clone(),
                    service: project.participant(sender).map(|p| p.service.clone()),
                })),
            }
        }
    }

    rows
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::indicator::{Indicator, Indicators};
    use crate::relation::RelationDraft;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        /// Property: N * (N - 1) rows, each ordered pair exactly once, each recorded pair verbatim
        #[test]
        fn test_all_pairs_shape(
            named in 0..6usize,
            extra in 0..4usize,
            recorded in prop::collection::vec((0..6usize, 0..6usize), 0..20),
        ) {
            let mut project = Project::new();
            for i in 0..named {
                project.add_participant(&format!("P{}", i), "S").unwrap();
            }
            if named + extra > 0 {
                project.set_declared_total(named + extra).unwrap();
            }
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            for (k, (s, r)) in recorded.iter().enumerate() {
                let draft = RelationDraft::new(format!("P{}", s), format!("P{}", r), date)
                    .window(format!("{}", k), "end")
                    .indicators(Indicators::none().with(Indicator::PPlus));
                let _ = project.record_relation(draft);
            }

            let n = full_name_list(&project).len();
            let rows = build_all_pairs_view(&project);
            prop_assert_eq!(rows.len(), n * n.saturating_sub(1));

            let pairs: HashSet<_> = rows.iter().map(|r| (r.sender().to_string(), r.receiver().to_string())).collect();
            prop_assert_eq!(pairs.len(), rows.len());

            let recorded_pairs: HashSet<_> = project
                .relations()
                .iter()
                .map(|r| (r.sender.clone(), r.receiver.clone()))
                .collect();
            let recorded_rows = rows.iter().filter(|r| !r.is_placeholder()).count();
            prop_assert_eq!(recorded_rows, recorded_pairs.len());
        }
    }
}
