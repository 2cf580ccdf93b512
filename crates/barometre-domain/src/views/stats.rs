//! Vigilance recap statistics

use crate::project::Project;
use crate::vigilance::Vigilance;
use std::collections::HashMap;

/// Row category of the vigilance recap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    /// Recorded relations carrying this label
    Label(Vigilance),

    /// Possible pairs with no recorded relation
    GlobalNeutral,

    /// All possible ordered pairs
    Total,
}

impl StatCategory {
    /// Row label as written in the spreadsheet
    pub fn as_str(&self) -> &'static str {
        match self {
            StatCategory::Label(v) => v.as_str(),
            StatCategory::GlobalNeutral => "Neutre (Global)",
            StatCategory::Total => "Total des combinaisons possibles",
        }
    }
}

/// One row of the vigilance recap
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    /// What the row counts
    pub category: StatCategory,

    /// Number of cases
    pub count: usize,

    /// Share of all possible pairs, as a fraction in [0, 1]
    pub percentage: f64,
}

/// Vigilance recap: seven label rows, the global neutral row and the total row
#[derive(Debug, Clone, PartialEq)]
pub struct VigilanceStats {
    /// Rows in display order
    pub rows: Vec<StatRow>,

    /// Declared total x (declared total - 1), or 0 below two persons
    pub total_possible: usize,

    /// Number of recorded relations
    pub recorded: usize,
}

impl VigilanceStats {
    /// Count for a category, 0 if absent
    pub fn count(&self, category: StatCategory) -> usize {
        self.rows
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.count)
            .unwrap_or(0)
    }
}

/// Total number of ordered pairs among `total` persons
pub fn total_possible_pairs(total: usize) -> usize {
    if total > 1 {
        total.saturating_mul(total - 1)
    } else {
        0
    }
}

fn share(count: usize, total_possible: usize) -> f64 {
    if total_possible > 0 {
        count as f64 / total_possible as f64
    } else {
        0.0
    }
}

/// Build the vigilance recap from recorded relations and the declared total
///
/// Only recorded relations are counted per label; every remaining possible
/// pair is counted as globally neutral. Percentages are 0 when no pair is
/// possible.
pub fn build_stats(project: &Project) -> VigilanceStats {
    let mut counts: HashMap<Vigilance, usize> = HashMap::new();
    for relation in project.relations() {
        *counts.entry(relation.vigilance()).or_insert(0) += 1;
    }

    let recorded = project.relations().len();
    let total_possible = total_possible_pairs(project.declared_total());
    let global_neutral = total_possible.saturating_sub(recorded);

    let mut rows: Vec<StatRow> = Vigilance::ALL
        .into_iter()
        .map(|label| {
            let count = counts.get(&label).copied().unwrap_or(0);
            StatRow {
                category: StatCategory::Label(label),
                count,
                percentage: share(count, total_possible),
            }
        })
        .collect();

    rows.push(StatRow {
        category: StatCategory::GlobalNeutral,
        count: global_neutral,
        percentage: share(global_neutral, total_possible),
    });
    rows.push(StatRow {
        category: StatCategory::Total,
        count: total_possible,
        percentage: if total_possible > 0 { 1.0 } else { 0.0 },
    });

    VigilanceStats {
        rows,
        total_possible,
        recorded,
    }
}
