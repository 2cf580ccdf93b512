//! Unidirectional view and the combined recap

use super::cross::{CrossKind, CrossViews};
use crate::project::Project;
use crate::relation::Relation;
use crate::vigilance::Vigilance;

/// Which view a recap row comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecapOrigin {
    /// Recorded relation with a vigilance other than "no data"
    Unidirectional,

    /// Row of a negative cross pair
    NegativeCross,

    /// Row of a positive cross pair
    PositiveCross,
}

impl RecapOrigin {
    /// Label as written in the spreadsheet
    pub fn as_str(&self) -> &'static str {
        match self {
            RecapOrigin::Unidirectional => "Unidirectionnelle",
            RecapOrigin::NegativeCross => "Négative Croisée",
            RecapOrigin::PositiveCross => "Positive Croisée",
        }
    }
}

/// One row of the combined recap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecapRow<'a> {
    /// The recorded relation
    pub relation: &'a Relation,

    /// Source view
    pub origin: RecapOrigin,

    /// Cross sub-classification, `None` for unidirectional rows
    pub cross_kind: Option<CrossKind>,
}

/// Recorded relations whose vigilance is not "no data", in recording order
pub fn build_unidirectional_view(project: &Project) -> Vec<&Relation> {
    project
        .relations()
        .iter()
        .filter(|r| r.vigilance() != Vigilance::NoData)
        .collect()
}

/// Concatenate unidirectional, negative cross and positive cross rows, in that order
pub fn build_recap<'a>(unidirectional: &[&'a Relation], cross: &CrossViews<'a>) -> Vec<RecapRow<'a>> {
    let uni = unidirectional.iter().copied().map(|relation| RecapRow {
        relation,
        origin: RecapOrigin::Unidirectional,
        cross_kind: None,
    });
    let negative = cross.negative.iter().map(|row| RecapRow {
        relation: row.relation,
        origin: RecapOrigin::NegativeCross,
        cross_kind: Some(row.kind),
    });
    let positive = cross.positive.iter().map(|row| RecapRow {
        relation: row.relation,
        origin: RecapOrigin::PositiveCross,
        cross_kind: Some(row.kind),
    });

    uni.chain(negative).chain(positive).collect()
}
