//! Spreadsheet export
//!
//! Six sheets, always in the same order, each with a bold header row and
//! columns sized to their longest cell.

use crate::error::ExportError;
use barometre_domain::views::all_pairs::{NEUTRAL_LABEL, PLACEHOLDER_COMMENT, PLACEHOLDER_SENTINEL};
use barometre_domain::views::{CrossRow, PairRow, Placeholder, ProjectViews, StatRow};
use barometre_domain::{Indicator, Project, Relation};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

/// Sheet names in workbook order
pub const SHEET_NAMES: [&str; 6] = [
    "Relations",
    "Récapitulatif Vigilance",
    "Relations Unidirectionnelles",
    "Relations Croisées Négatives",
    "Relations Croisées Positives",
    "Récap",
];

/// Columns shared by every relation sheet
pub const RELATION_COLUMNS: [&str; 17] = [
    "Émetteur",
    "Récepteur",
    "Date",
    "Début",
    "Fin",
    "Service",
    "P+",
    "P-",
    "I+",
    "I-",
    "C+",
    "C-",
    "Score Pic Positif",
    "Score Pic Négatif",
    "Score Net",
    "Vigilance",
    "Commentaire",
];

const CROSS_KIND_COLUMN: &str = "Type de Croisé";
const RECAP_KIND_COLUMN: &str = "Type de Récap";
const STATS_COLUMNS: [(&str, f64); 3] = [
    ("Type de relation", 40.0),
    ("Nombre de cas", 20.0),
    ("Pourcentage", 20.0),
];

/// Width cap of a relation-sheet column
fn width_cap(header: &str) -> f64 {
    match header {
        "Commentaire" => 100.0,
        "Date" | "Début" | "Fin" | "Service" | "Vigilance" | CROSS_KIND_COLUMN | RECAP_KIND_COLUMN => 25.0,
        _ => 15.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Percent(f64),
    Blank,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn display_len(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Number(n) => n.to_string().len(),
            Cell::Percent(p) => format!("{:.2}%", p * 100.0).len(),
            Cell::Blank => 0,
        }
    }
}

fn relation_cells(relation: &Relation) -> Vec<Cell> {
    let indicators = relation.indicators();
    let mut cells = vec![
        Cell::text(&relation.sender),
        Cell::text(&relation.receiver),
        Cell::text(relation.date_text()),
        Cell::text(&relation.start_time),
        Cell::text(&relation.end_time),
        Cell::text(&relation.service),
    ];
    cells.extend(
        Indicator::ALL
            .into_iter()
            .map(|i| Cell::Number(if indicators.get(i) { 1.0 } else { 0.0 })),
    );
    cells.extend([
        Cell::Number(f64::from(relation.positive_score())),
        Cell::Number(f64::from(relation.negative_score())),
        Cell::Number(f64::from(relation.net_score())),
        Cell::text(relation.vigilance().as_str()),
        Cell::text(&relation.comment),
    ]);
    cells
}

fn placeholder_cells(placeholder: &Placeholder) -> Vec<Cell> {
    let mut cells = vec![
        Cell::text(&placeholder.sender),
        Cell::text(&placeholder.receiver),
        Cell::text(PLACEHOLDER_SENTINEL),
        Cell::text(PLACEHOLDER_SENTINEL),
        Cell::text(PLACEHOLDER_SENTINEL),
        Cell::text(placeholder.service_text()),
    ];
    // Six flags then three scores, all zero
    cells.extend(std::iter::repeat(Cell::Number(0.0)).take(9));
    cells.extend([Cell::text(NEUTRAL_LABEL), Cell::text(PLACEHOLDER_COMMENT)]);
    cells
}

fn stat_cells(row: &StatRow) -> Vec<Cell> {
    vec![
        Cell::text(row.category.as_str()),
        Cell::Number(row.count as f64),
        Cell::Percent(row.percentage),
    ]
}

/// Fill one sheet: bold header, data rows, then column widths
fn write_table(
    sheet: &mut Worksheet,
    columns: &[(&str, f64)],
    rows: &[Vec<Cell>],
    header: &Format,
    percent: &Format,
) -> Result<(), ExportError> {
    for (col, (title, _)) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (index, cells) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) if !s.is_empty() => {
                    sheet.write_string(row, col, s)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(row, col, *n)?;
                }
                Cell::Percent(p) => {
                    sheet.write_number_with_format(row, col, *p, percent)?;
                }
                Cell::Text(_) | Cell::Blank => {}
            }
        }
    }

    for (col, (title, cap)) in columns.iter().enumerate() {
        let longest = rows
            .iter()
            .filter_map(|cells| cells.get(col))
            .map(Cell::display_len)
            .fold(title.chars().count(), usize::max);
        let width = ((longest + 2) as f64).min(*cap);
        sheet.set_column_width(col as u16, width)?;
    }

    Ok(())
}

fn cross_cells(rows: &[CrossRow<'_>]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| {
            let mut cells = relation_cells(row.relation);
            cells.push(Cell::text(row.kind.as_str()));
            cells
        })
        .collect()
}

fn relation_columns(extra: &[&'static str]) -> Vec<(&'static str, f64)> {
    RELATION_COLUMNS
        .iter()
        .chain(extra)
        .map(|title| (*title, width_cap(title)))
        .collect()
}

/// Build the workbook in memory
pub fn build_workbook(project: &Project) -> Result<Vec<u8>, ExportError> {
    let views = ProjectViews::build(project);
    let header = Format::new().set_bold();
    let percent = Format::new().set_num_format("0.00%");

    let all_pairs: Vec<Vec<Cell>> = views
        .all_pairs
        .iter()
        .map(|row| match row {
            PairRow::Recorded(relation) => relation_cells(relation),
            PairRow::Unrecorded(placeholder) => placeholder_cells(placeholder),
        })
        .collect();
    let stats: Vec<Vec<Cell>> = views.stats.rows.iter().map(stat_cells).collect();
    let unidirectional: Vec<Vec<Cell>> = views.unidirectional.iter().map(|r| relation_cells(r)).collect();
    let negative = cross_cells(&views.cross.negative);
    let positive = cross_cells(&views.cross.positive);
    let recap: Vec<Vec<Cell>> = views
        .recap
        .iter()
        .map(|row| {
            let mut cells = relation_cells(row.relation);
            cells.push(row.cross_kind.map_or(Cell::Blank, |k| Cell::text(k.as_str())));
            cells.push(Cell::text(row.origin.as_str()));
            cells
        })
        .collect();

    let relation_sheet = relation_columns(&[]);
    let cross_sheet = relation_columns(&[CROSS_KIND_COLUMN]);
    let recap_sheet = relation_columns(&[CROSS_KIND_COLUMN, RECAP_KIND_COLUMN]);

    let tables: [(&[(&str, f64)], &[Vec<Cell>]); 6] = [
        (&relation_sheet, &all_pairs),
        (&STATS_COLUMNS, &stats),
        (&relation_sheet, &unidirectional),
        (&cross_sheet, &negative),
        (&cross_sheet, &positive),
        (&recap_sheet, &recap),
    ];

    let mut workbook = Workbook::new();
    for (name, (columns, rows)) in SHEET_NAMES.iter().zip(tables) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        write_table(sheet, columns, rows, &header, &percent)?;
        debug!(sheet = name, rows = rows.len(), "Sheet written");
    }

    let bytes = workbook.save_to_buffer()?;
    info!(
        bytes = bytes.len(),
        pairs = views.all_pairs.len(),
        recap = views.recap.len(),
        "Workbook built"
    );
    Ok(bytes)
}

/// Build the workbook and write it to `path`
pub fn write_workbook(project: &Project, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let bytes = build_workbook(project)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}
