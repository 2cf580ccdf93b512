//! Derived views over a project snapshot
//!
//! Views borrow from the [`Project`] they are built from and are recomputed on
//! demand; nothing here is stored back into the project.
//!
//! - [`all_pairs`]: every ordered pair of the full name list, recorded or not
//! - [`stats`]: vigilance recap with percentages over all possible pairs
//! - [`cross`]: reciprocal negative and positive pairs
//! - [`recap`]: unidirectional rows followed by both cross views

pub mod all_pairs;
pub mod cross;
pub mod recap;
pub mod stats;

pub use all_pairs::{build_all_pairs_view, full_name_list, PairRow, Placeholder};
pub use cross::{build_cross_views, CrossKind, CrossRow, CrossViews};
pub use recap::{build_recap, build_unidirectional_view, RecapOrigin, RecapRow};
pub use stats::{build_stats, StatCategory, StatRow, VigilanceStats};

use crate::project::Project;
use crate::relation::Relation;
use std::collections::HashMap;

/// Recorded relations indexed by (sender, receiver)
///
/// When a pair has several observations the most recently recorded one wins.
pub(crate) fn pair_lookup(project: &Project) -> HashMap<(&str, &str), &Relation> {
    let mut lookup = HashMap::with_capacity(project.relations().len());
    for relation in project.relations() {
        lookup.insert((relation.sender.as_str(), relation.receiver.as_str()), relation);
    }
    lookup
}

/// Every derived table of a project, computed from one snapshot
#[derive(Debug, Clone)]
pub struct ProjectViews<'a> {
    /// All ordered pairs, placeholders included
    pub all_pairs: Vec<PairRow<'a>>,

    /// Vigilance recap
    pub stats: VigilanceStats,

    /// Recorded relations with a vigilance other than "no data"
    pub unidirectional: Vec<&'a Relation>,

    /// Reciprocal negative and positive pairs
    pub cross: CrossViews<'a>,

    /// Unidirectional, then negative cross, then positive cross rows
    pub recap: Vec<RecapRow<'a>>,
}

impl<'a> ProjectViews<'a> {
    /// Build every view from the current state of `project`
    pub fn build(project: &'a Project) -> Self {
        let unidirectional = build_unidirectional_view(project);
        let cross = build_cross_views(project);
        let recap = build_recap(&unidirectional, &cross);

        Self {
            all_pairs: build_all_pairs_view(project),
            stats: build_stats(project),
            unidirectional,
            cross,
            recap,
        }
    }
}
