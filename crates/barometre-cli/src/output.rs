//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use barometre_domain::views::all_pairs::{NEUTRAL_LABEL, PLACEHOLDER_COMMENT, PLACEHOLDER_SENTINEL};
use barometre_domain::views::{CrossRow, PairRow, RecapRow, VigilanceStats};
use barometre_domain::{Participant, Relation, RelationId, Vigilance};
use colored::*;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const RELATION_HEADER: [&str; 11] = [
    "ID", "Sender", "Receiver", "Date", "Window", "Service", "Indicators", "+", "-", "Net", "Vigilance",
];

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the roster.
    pub fn participants(&self, participants: &[Participant]) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let rows: Vec<Value> = participants
                .iter()
                .map(|p| json!({ "name": p.name, "service": p.service }))
                .collect();
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        if participants.is_empty() {
            return Ok(self.colorize("No participants.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Name", "Service"]);
        for (index, participant) in participants.iter().enumerate() {
            builder.push_record([(index + 1).to_string(), participant.name.clone(), participant.service.clone()]);
        }
        Ok(self.render(builder))
    }

    /// Format recorded relations.
    pub fn relations(&self, relations: &[&Relation]) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let rows: Vec<Value> = relations.iter().map(|r| relation_json(r)).collect();
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        if relations.is_empty() {
            return Ok(self.colorize("No relations recorded.", "yellow"));
        }

        let mut builder = Builder::default();
        let mut header: Vec<&str> = RELATION_HEADER.to_vec();
        header.push("Comment");
        builder.push_record(header);
        for relation in relations {
            let mut record = self.relation_record(relation);
            record.push(relation.comment.clone());
            builder.push_record(record);
        }
        Ok(self.render(builder))
    }

    /// Format ordered pairs of named participants.
    pub fn pairs(&self, pairs: &[(&str, &str)]) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let rows: Vec<Value> = pairs
                .iter()
                .map(|(sender, receiver)| json!({ "sender": sender, "receiver": receiver }))
                .collect();
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        if pairs.is_empty() {
            return Ok(self.colorize("No pairs (add at least two participants).", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Sender", "Receiver"]);
        for (sender, receiver) in pairs {
            builder.push_record([*sender, *receiver]);
        }
        Ok(self.render(builder))
    }

    /// Format the all-pairs view.
    pub fn all_pairs(&self, rows: &[PairRow<'_>]) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let rows: Vec<Value> = rows
                .iter()
                .map(|row| match row {
                    PairRow::Recorded(relation) => relation_json(relation),
                    PairRow::Unrecorded(placeholder) => json!({
                        "sender": placeholder.sender,
                        "receiver": placeholder.receiver,
                        "date": PLACEHOLDER_SENTINEL,
                        "start": PLACEHOLDER_SENTINEL,
                        "end": PLACEHOLDER_SENTINEL,
                        "service": placeholder.service_text(),
                        "indicators": [],
                        "positive_score": 0,
                        "negative_score": 0,
                        "net_score": 0,
                        "vigilance": NEUTRAL_LABEL,
                        "comment": PLACEHOLDER_COMMENT,
                    }),
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        if rows.is_empty() {
            return Ok(self.colorize("No pairs (declare at least two persons).", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(RELATION_HEADER);
        for row in rows {
            match row {
                PairRow::Recorded(relation) => builder.push_record(self.relation_record(relation)),
                PairRow::Unrecorded(placeholder) => builder.push_record([
                    String::new(),
                    placeholder.sender.clone(),
                    placeholder.receiver.clone(),
                    PLACEHOLDER_SENTINEL.to_string(),
                    PLACEHOLDER_SENTINEL.to_string(),
                    placeholder.service_text().to_string(),
                    String::new(),
                    "0".to_string(),
                    "0".to_string(),
                    "0".to_string(),
                    self.colorize(NEUTRAL_LABEL, "dimmed"),
                ]),
            }
        }
        Ok(self.render(builder))
    }

    /// Format cross pairs.
    pub fn cross(&self, rows: &[CrossRow<'_>]) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let rows: Vec<Value> = rows
                .iter()
                .map(|row| {
                    let mut value = relation_json(row.relation);
                    value["cross_kind"] = json!(row.kind.as_str());
                    value
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        if rows.is_empty() {
            return Ok(self.colorize("No cross relations.", "yellow"));
        }

        let mut builder = Builder::default();
        let mut header: Vec<&str> = RELATION_HEADER.to_vec();
        header.push("Cross type");
        builder.push_record(header);
        for row in rows {
            let mut record = self.relation_record(row.relation);
            record.push(row.kind.as_str().to_string());
            builder.push_record(record);
        }
        Ok(self.render(builder))
    }

    /// Format the combined recap.
    pub fn recap(&self, rows: &[RecapRow<'_>]) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let rows: Vec<Value> = rows
                .iter()
                .map(|row| {
                    let mut value = relation_json(row.relation);
                    value["cross_kind"] = json!(row.cross_kind.map(|k| k.as_str()));
                    value["recap_kind"] = json!(row.origin.as_str());
                    value
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        if rows.is_empty() {
            return Ok(self.colorize("Nothing to recap.", "yellow"));
        }

        let mut builder = Builder::default();
        let mut header: Vec<&str> = RELATION_HEADER.to_vec();
        header.extend(["Cross type", "Recap type"]);
        builder.push_record(header);
        for row in rows {
            let mut record = self.relation_record(row.relation);
            record.push(row.cross_kind.map(|k| k.as_str().to_string()).unwrap_or_default());
            record.push(row.origin.as_str().to_string());
            builder.push_record(record);
        }
        Ok(self.render(builder))
    }

    /// Format the vigilance recap.
    pub fn stats(&self, stats: &VigilanceStats) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let rows: Vec<Value> = stats
                .rows
                .iter()
                .map(|row| {
                    json!({
                        "category": row.category.as_str(),
                        "count": row.count,
                        "percentage": row.percentage,
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&json!({
                "rows": rows,
                "recorded": stats.recorded,
                "total_possible": stats.total_possible,
            }))?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Type de relation", "Nombre de cas", "Pourcentage"]);
        for row in &stats.rows {
            builder.push_record([
                row.category.as_str().to_string(),
                row.count.to_string(),
                format!("{:.2}%", row.percentage * 100.0),
            ]);
        }
        Ok(self.render(builder))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the result of recording a relation.
    pub fn relation_recorded(&self, id: RelationId, vigilance: Vigilance) -> String {
        self.success(&format!("Relation #{} recorded ({})", id, vigilance))
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} relation(s)", operation, count))
    }

    fn relation_record(&self, relation: &Relation) -> Vec<String> {
        vec![
            format!("#{}", relation.id),
            relation.sender.clone(),
            relation.receiver.clone(),
            relation.date_text(),
            format!("{}-{}", relation.start_time, relation.end_time),
            relation.service.clone(),
            indicator_list(relation).join(" "),
            relation.positive_score().to_string(),
            relation.negative_score().to_string(),
            relation.net_score().to_string(),
            self.vigilance(relation.vigilance()),
        ]
    }

    /// Vigilance label, colored by polarity.
    fn vigilance(&self, vigilance: Vigilance) -> String {
        let color = match vigilance {
            Vigilance::PositivePure | Vigilance::Positive => "green",
            Vigilance::MixedPositive => "cyan",
            Vigilance::MixedTense => "magenta",
            Vigilance::NegativePure | Vigilance::Negative => "red",
            Vigilance::NoData => "dimmed",
        };
        self.colorize(vigilance.as_str(), color)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            "dimmed" => text.dimmed().to_string(),
            _ => text.to_string(),
        }
    }
}

fn indicator_list(relation: &Relation) -> Vec<&'static str> {
    relation.indicators().present().map(|i| i.as_str()).collect()
}

fn relation_json(relation: &Relation) -> Value {
    json!({
        "id": relation.id.value(),
        "sender": relation.sender,
        "receiver": relation.receiver,
        "date": relation.date_text(),
        "start": relation.start_time,
        "end": relation.end_time,
        "service": relation.service,
        "indicators": indicator_list(relation),
        "positive_score": relation.positive_score(),
        "negative_score": relation.negative_score(),
        "net_score": relation.net_score(),
        "vigilance": relation.vigilance().as_str(),
        "comment": relation.comment,
    })
}
