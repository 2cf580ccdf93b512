//! JSON project file
//!
//! Keys keep the French labels of the saved format so existing files load
//! unchanged. Reading is lenient about missing keys and strict about values
//! that cannot be interpreted: a file either loads completely or not at all.

use crate::error::ExportError;
use barometre_domain::{
    parse_date, Indicator, Indicators, Participant, Project, Relation, RelationId,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

/// Top-level document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    /// Roster in order
    pub participants: Vec<ParticipantRow>,

    /// Distinct services; written for compatibility, recomputed on load
    pub services: Vec<String>,

    /// Recorded relations in order
    #[serde(rename = "relations_saisies")]
    pub relations: Vec<RelationRow>,

    /// Declared headcount
    #[serde(rename = "nombre_total_personnes")]
    pub declared_total: usize,
}

/// One roster entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantRow {
    /// Participant name
    #[serde(rename = "nom")]
    pub name: String,

    /// Service
    pub service: String,
}

/// One recorded relation, in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationRow {
    /// Sender
    #[serde(rename = "Émetteur")]
    pub sender: String,

    /// Receiver
    #[serde(rename = "Récepteur")]
    pub receiver: String,

    /// `DD/MM/YYYY`, or empty
    #[serde(rename = "Date")]
    pub date: String,

    /// Start time
    #[serde(rename = "Début")]
    pub start_time: String,

    /// End time
    #[serde(rename = "Fin")]
    pub end_time: String,

    /// Sender's service when saved
    #[serde(rename = "Service")]
    pub service: String,

    /// P+ flag
    #[serde(rename = "P+", serialize_with = "write_flag", deserialize_with = "read_flag")]
    pub p_plus: bool,

    /// P- flag
    #[serde(rename = "P-", serialize_with = "write_flag", deserialize_with = "read_flag")]
    pub p_minus: bool,

    /// I+ flag
    #[serde(rename = "I+", serialize_with = "write_flag", deserialize_with = "read_flag")]
    pub i_plus: bool,

    /// I- flag
    #[serde(rename = "I-", serialize_with = "write_flag", deserialize_with = "read_flag")]
    pub i_minus: bool,

    /// C+ flag
    #[serde(rename = "C+", serialize_with = "write_flag", deserialize_with = "read_flag")]
    pub c_plus: bool,

    /// C- flag
    #[serde(rename = "C-", serialize_with = "write_flag", deserialize_with = "read_flag")]
    pub c_minus: bool,

    /// Stored positive score, checked against the flags on load
    #[serde(rename = "Score Pic Positif")]
    pub positive_score: Option<i64>,

    /// Stored negative score, checked against the flags on load
    #[serde(rename = "Score Pic Négatif")]
    pub negative_score: Option<i64>,

    /// Stored net score, checked against the flags on load
    #[serde(rename = "Score Net")]
    pub net_score: Option<i64>,

    /// Stored vigilance label, checked against the flags on load
    #[serde(rename = "Vigilance")]
    pub vigilance: Option<String>,

    /// Free-form comment
    #[serde(rename = "Commentaire")]
    pub comment: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Int(i64),
}

fn read_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(b) => Ok(b),
        FlagValue::Int(0) => Ok(false),
        FlagValue::Int(1) => Ok(true),
        FlagValue::Int(n) => Err(D::Error::custom(format!(
            "indicator flag must be 0 or 1, got {}",
            n
        ))),
    }
}

fn write_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

impl RelationRow {
    /// Indicator flags carried by the row
    pub fn indicators(&self) -> Indicators {
        let mut indicators = Indicators::none();
        for (indicator, present) in [
            (Indicator::PPlus, self.p_plus),
            (Indicator::PMinus, self.p_minus),
            (Indicator::IPlus, self.i_plus),
            (Indicator::IMinus, self.i_minus),
            (Indicator::CPlus, self.c_plus),
            (Indicator::CMinus, self.c_minus),
        ] {
            indicators.set(indicator, present);
        }
        indicators
    }

    fn into_relation(self, position: usize) -> Result<Relation, ExportError> {
        let date = match self.date.trim() {
            "" => None,
            text => Some(
                parse_date(text)
                    .map_err(|e| ExportError::InvalidData(format!("relation {}: {}", position + 1, e)))?,
            ),
        };

        let indicators = self.indicators();
        let relation = Relation::new(
            RelationId::from_value(0),
            self.sender.trim().to_string(),
            self.receiver.trim().to_string(),
            date,
            self.start_time,
            self.end_time,
            self.service,
            indicators,
            self.comment,
        );

        let stored_matches = self.positive_score.map_or(true, |s| s == i64::from(relation.positive_score()))
            && self.negative_score.map_or(true, |s| s == i64::from(relation.negative_score()))
            && self.net_score.map_or(true, |s| s == i64::from(relation.net_score()))
            && self
                .vigilance
                .as_deref()
                .map_or(true, |v| v == relation.vigilance().as_str());
        if !stored_matches {
            warn!(
                position = position + 1,
                sender = %relation.sender,
                receiver = %relation.receiver,
                vigilance = %relation.vigilance(),
                "Stored scores disagree with indicator flags, using recomputed values"
            );
        }

        Ok(relation)
    }
}

impl From<&Relation> for RelationRow {
    fn from(relation: &Relation) -> Self {
        let indicators = relation.indicators();
        Self {
            sender: relation.sender.clone(),
            receiver: relation.receiver.clone(),
            date: relation.date_text(),
            start_time: relation.start_time.clone(),
            end_time: relation.end_time.clone(),
            service: relation.service.clone(),
            p_plus: indicators.get(Indicator::PPlus),
            p_minus: indicators.get(Indicator::PMinus),
            i_plus: indicators.get(Indicator::IPlus),
            i_minus: indicators.get(Indicator::IMinus),
            c_plus: indicators.get(Indicator::CPlus),
            c_minus: indicators.get(Indicator::CMinus),
            positive_score: Some(i64::from(relation.positive_score())),
            negative_score: Some(i64::from(relation.negative_score())),
            net_score: Some(i64::from(relation.net_score())),
            vigilance: Some(relation.vigilance().as_str().to_string()),
            comment: relation.comment.clone(),
        }
    }
}

impl ProjectFile {
    /// Snapshot a project into its file representation
    pub fn from_project(project: &Project) -> Self {
        Self {
            participants: project
                .participants()
                .iter()
                .map(|p| ParticipantRow {
                    name: p.name.clone(),
                    service: p.service.clone(),
                })
                .collect(),
            services: project.services(),
            relations: project.relations().iter().map(RelationRow::from).collect(),
            declared_total: project.declared_total(),
        }
    }

    /// Rebuild a project, validating every row before anything is returned
    pub fn into_project(self) -> Result<Project, ExportError> {
        let participants = self
            .participants
            .into_iter()
            .map(|p| Participant::new(p.name, p.service))
            .collect();

        let relations = self
            .relations
            .into_iter()
            .enumerate()
            .map(|(position, row)| row.into_relation(position))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Project::restore(participants, relations, self.declared_total)?)
    }
}

/// Serialize a project as pretty-printed JSON (4-space indent, UTF-8 kept as is)
pub fn export_json(project: &Project) -> Result<String, ExportError> {
    let file = ProjectFile::from_project(project);

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    file.serialize(&mut serializer)?;

    debug!(bytes = buffer.len(), relations = file.relations.len(), "Project serialized");
    String::from_utf8(buffer).map_err(|e| ExportError::InvalidData(e.to_string()))
}

/// Parse a project file
///
/// Returns a fresh project; the caller decides whether to replace its current
/// state, so a failed import never touches it.
pub fn import_json(text: &str) -> Result<Project, ExportError> {
    let file: ProjectFile = serde_json::from_str(text)?;
    let project = file.into_project()?;
    debug!(
        participants = project.participants().len(),
        relations = project.relations().len(),
        "Project file parsed"
    );
    Ok(project)
}
