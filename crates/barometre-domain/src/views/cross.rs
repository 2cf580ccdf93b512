//! Cross-relation detection
//!
//! A cross relation is an unordered pair of named participants whose two
//! directed relations are both recorded and share a polarity. Each qualifying
//! pair contributes two rows, A -> B then B -> A, where A is the participant
//! listed first on the roster.

use super::pair_lookup;
use crate::project::Project;
use crate::relation::Relation;
use crate::vigilance::Vigilance;
use std::fmt;

/// Sub-classification of a cross pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossKind {
    /// Both directions are negative-pure
    Conflict,

    /// Both directions negative, at least one not pure
    RelationalTension,

    /// Both directions are positive-pure
    PerfectHarmony,

    /// Both directions positive, at least one not pure
    RelationalHarmony,
}

impl CrossKind {
    /// Label as written in the spreadsheet
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossKind::Conflict => "Conflit",
            CrossKind::RelationalTension => "Tension relationnelle",
            CrossKind::PerfectHarmony => "Harmonie Parfaite",
            CrossKind::RelationalHarmony => "Harmonie Relationnelle",
        }
    }
}

impl fmt::Display for CrossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity a cross pair must share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Negative,
    Positive,
}

impl Polarity {
    fn admits(self, vigilance: Vigilance) -> bool {
        match self {
            Polarity::Negative => vigilance.is_negative_peak(),
            Polarity::Positive => vigilance.is_positive_peak(),
        }
    }

    fn kind(self, forward: Vigilance, backward: Vigilance) -> CrossKind {
        match self {
            Polarity::Negative if forward == Vigilance::NegativePure && backward == Vigilance::NegativePure => {
                CrossKind::Conflict
            }
            Polarity::Negative => CrossKind::RelationalTension,
            Polarity::Positive if forward == Vigilance::PositivePure && backward == Vigilance::PositivePure => {
                CrossKind::PerfectHarmony
            }
            Polarity::Positive => CrossKind::RelationalHarmony,
        }
    }
}

/// A directed relation belonging to a cross pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossRow<'a> {
    /// The recorded relation
    pub relation: &'a Relation,

    /// Sub-classification shared by both rows of the pair
    pub kind: CrossKind,
}

/// Negative and positive cross pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossViews<'a> {
    /// Pairs where both directions are negative-pure, negative or mixed-tense
    pub negative: Vec<CrossRow<'a>>,

    /// Pairs where both directions are positive-pure or positive
    pub positive: Vec<CrossRow<'a>>,
}

/// Detect negative and positive cross pairs among named participants
pub fn build_cross_views(project: &Project) -> CrossViews<'_> {
    let lookup = pair_lookup(project);
    let mut views = CrossViews::default();
    let participants = project.participants();

    for (i, first) in participants.iter().enumerate() {
        for second in &participants[i + 1..] {
            let (Some(forward), Some(backward)) = (
                lookup.get(&(first.name.as_str(), second.name.as_str())).copied(),
                lookup.get(&(second.name.as_str(), first.name.as_str())).copied(),
            ) else {
                continue;
            };

            for (polarity, rows) in [
                (Polarity::Negative, &mut views.negative),
                (Polarity::Positive, &mut views.positive),
            ] {
                if polarity.admits(forward.vigilance()) && polarity.admits(backward.vigilance()) {
                    let kind = polarity.kind(forward.vigilance(), backward.vigilance());
                    rows.push(CrossRow { relation: forward, kind });
                    rows.push(CrossRow { relation: backward, kind });
                }
            }
        }
    }

    tracing::debug!(
        negative = views.negative.len() / 2,
        positive = views.positive.len() / 2,
        "Cross pairs detected"
    );
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{Indicator, Indicators};
    use crate::relation::RelationDraft;
    use chrono::NaiveDate;

    const NEG_PURE: [Indicator; 3] = [Indicator::PMinus, Indicator::IMinus, Indicator::CMinus];
    const POS_PURE: [Indicator; 3] = [Indicator::PPlus, Indicator::IPlus, Indicator::CPlus];

    fn project(names: &[&str]) -> Project {
        let mut project = Project::new();
        for name in names {
            project.add_participant(name, "S").unwrap();
        }
        project
    }

    fn record(project: &mut Project, s: &str, r: &str, indicators: &[Indicator]) {
        let date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        project
            .record_relation(
                RelationDraft::new(s, r, date)
                    .window("09:00", "10:00")
                    .indicators(Indicators::from_set(indicators.iter().copied())),
            )
            .unwrap();
    }

    #[test]
    fn test_conflict_pair() {
        let mut p = project(&["A", "B", "C"]);
        record(&mut p, "A", "B", &NEG_PURE);
        record(&mut p, "B", "A", &NEG_PURE);

        let views = build_cross_views(&p);
        assert_eq!(views.negative.len(), 2);
        assert!(views.negative.iter().all(|row| row.kind == CrossKind::Conflict));
        assert_eq!(views.negative[0].relation.sender, "A");
        assert_eq!(views.negative[1].relation.sender, "B");
        assert!(views.positive.is_empty());
    }

    #[test]
    fn test_tension_with_mixed_tense() {
        let mut p = project(&["A", "B"]);
        record(&mut p, "A", "B", &NEG_PURE);
        // 1 positive, 1 negative -> mixed tense
        record(&mut p, "B", "A", &[Indicator::PPlus, Indicator::CMinus]);

        let views = build_cross_views(&p);
        assert_eq!(views.negative.len(), 2);
        assert!(views.negative.iter().all(|row| row.kind == CrossKind::RelationalTension));
    }

    #[test]
    fn test_harmony_kinds() {
        let mut p = project(&["A", "B", "C"]);
        record(&mut p, "A", "B", &POS_PURE);
        record(&mut p, "B", "A", &POS_PURE);
        record(&mut p, "A", "C", &POS_PURE);
        record(&mut p, "C", "A", &[Indicator::IPlus]);

        let views = build_cross_views(&p);
        assert!(views.negative.is_empty());
        assert_eq!(views.positive.len(), 4);
        assert_eq!(views.positive[0].kind, CrossKind::PerfectHarmony);
        assert_eq!(views.positive[1].kind, CrossKind::PerfectHarmony);
        assert_eq!(views.positive[2].kind, CrossKind::RelationalHarmony);
        assert_eq!(views.positive[3].relation.sender, "C");
    }

    #[test]
    fn test_mixed_polarity_and_one_way_excluded() {
        let mut p = project(&["A", "B", "C"]);
        record(&mut p, "A", "B", &POS_PURE);
        record(&mut p, "B", "A", &NEG_PURE);
        record(&mut p, "A", "C", &NEG_PURE);
        // Mixed positive is in neither set
        record(&mut p, "B", "C", &[Indicator::PPlus, Indicator::IPlus, Indicator::CMinus]);
        record(&mut p, "C", "B", &[Indicator::PPlus, Indicator::IPlus, Indicator::CMinus]);

        let views = build_cross_views(&p);
        assert!(views.negative.is_empty());
        assert!(views.positive.is_empty());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(CrossKind::Conflict.as_str(), "Conflit");
        assert_eq!(CrossKind::RelationalHarmony.to_string(), "Harmonie Relationnelle");
    }
}
