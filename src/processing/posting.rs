//! Internship postings and their requirement sets

use crate::error::{MatcherError, Result};
use crate::processing::profile::parse_year;
use crate::processing::requirements::{normalize_id, RequirementSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const RECORD: &str = "internship posting";

/// Keys owned by the matcher and the listing report; stale values on
/// incoming records are discarded.
const ANNOTATION_KEYS: [&str; 4] = ["matchScore", "matchTier", "canApply", "breakdown"];

/// A posting with its requirements resolved into explicit sets.
///
/// Fields the matcher does not interpret (`description`, `location`, ...) are
/// kept in `extra` so the annotated output reproduces the original record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostingRecord", rename_all = "camelCase")]
pub struct InternshipPosting {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(rename = "career")]
    accepted_careers: BTreeSet<String>,
    min_year: u32,
    required_soft_skills: RequirementSet,
    required_technical_skills: RequirementSet,
    required_languages: RequirementSet,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl InternshipPosting {
    pub fn new<I, S>(careers: I, min_year: u32) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted_careers: BTreeSet<String> = careers
            .into_iter()
            .filter_map(|c| normalize_id(c.as_ref()))
            .collect();
        if accepted_careers.is_empty() {
            return Err(MatcherError::invalid(
                RECORD,
                "career",
                "at least one accepted career is required",
            ));
        }

        Ok(Self {
            id: None,
            title: None,
            company: None,
            accepted_careers,
            min_year,
            required_soft_skills: RequirementSet::new(),
            required_technical_skills: RequirementSet::new(),
            required_languages: RequirementSet::new(),
            extra: Map::new(),
        })
    }

    /// Build a posting from a loosely-typed record, keeping the typed error.
    pub fn from_value(value: Value) -> Result<Self> {
        let record: PostingRecord = serde_json::from_value(value)?;
        Self::try_from(record)
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn requiring_soft_skills<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_soft_skills = RequirementSet::from_ids(ids);
        self
    }

    pub fn requiring_technical_skills<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_technical_skills = RequirementSet::from_ids(ids);
        self
    }

    pub fn requiring_languages<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_languages = RequirementSet::from_ids(ids);
        self
    }

    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// Display form of the id: strings unquoted, anything else as JSON.
    pub fn id_label(&self) -> Option<String> {
        self.id.as_ref().map(id_label)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn accepted_careers(&self) -> &BTreeSet<String> {
        &self.accepted_careers
    }

    pub fn accepts_career(&self, career: &str) -> bool {
        self.accepted_careers.contains(career)
    }

    pub fn min_year(&self) -> u32 {
        self.min_year
    }

    pub fn required_soft_skills(&self) -> &RequirementSet {
        &self.required_soft_skills
    }

    pub fn required_technical_skills(&self) -> &RequirementSet {
        &self.required_technical_skills
    }

    pub fn required_languages(&self) -> &RequirementSet {
        &self.required_languages
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

pub(crate) fn id_label(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A posting accepts either one career or a list of them.
fn career_list(value: Value) -> Result<Vec<String>> {
    let wrong_type = |found: &Value| {
        MatcherError::invalid(
            RECORD,
            "career",
            format!("expected a string or a list of strings, found {}", found),
        )
    };
    match value {
        Value::String(career) => Ok(vec![career]),
        Value::Array(careers) => careers
            .into_iter()
            .map(|career| match career {
                Value::String(career) => Ok(career),
                other => Err(wrong_type(&other)),
            })
            .collect(),
        other => Err(wrong_type(&other)),
    }
}

fn requirement_set(raw: Option<Value>, field: &'static str) -> Result<RequirementSet> {
    match raw {
        None | Some(Value::Null) => Ok(RequirementSet::new()),
        Some(value) => serde_json::from_value(value).map_err(|_| {
            MatcherError::invalid(RECORD, field, "expected a flag map or a list of identifiers")
        }),
    }
}

/// Loosely-typed shape of a stored posting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostingRecord {
    id: Option<Value>,
    title: Option<String>,
    company: Option<String>,
    career: Option<Value>,
    min_year: Option<Value>,
    required_soft_skills: Option<Value>,
    required_technical_skills: Option<Value>,
    required_languages: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<PostingRecord> for InternshipPosting {
    type Error = MatcherError;

    fn try_from(record: PostingRecord) -> Result<Self> {
        let careers = record
            .career
            .ok_or_else(|| MatcherError::missing(RECORD, "career"))
            .and_then(career_list)?;
        let min_year = record
            .min_year
            .ok_or_else(|| MatcherError::missing(RECORD, "minYear"))
            .and_then(|year| parse_year(&year, RECORD, "minYear"))?;

        let mut posting = InternshipPosting::new(careers, min_year)?;
        posting.id = record.id.filter(|id| !id.is_null());
        posting.title = record.title;
        posting.company = record.company;
        posting.required_soft_skills = requirement_set(record.required_soft_skills, "requiredSoftSkills")?;
        posting.required_technical_skills =
            requirement_set(record.required_technical_skills, "requiredTechnicalSkills")?;
        posting.required_languages = requirement_set(record.required_languages, "requiredLanguages")?;

        let mut extra = record.extra;
        extra.retain(|key, _| !ANNOTATION_KEYS.contains(&key.as_str()));
        posting.extra = extra;
        Ok(posting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_posting_from_stored_record() {
        let posting: InternshipPosting = serde_json::from_value(json!({
            "id": 1717171717,
            "title": "Frontend intern",
            "company": "Acme",
            "career": ["sistemas", "informatica"],
            "minYear": 3,
            "requiredTechnicalSkills": {"react": true, "nodejs": true, "php": false},
            "modality": "remoto"
        }))
        .unwrap();

        assert_eq!(posting.id_label().as_deref(), Some("1717171717"));
        assert!(posting.accepts_career("informatica"));
        assert_eq!(posting.min_year(), 3);
        assert_eq!(posting.required_technical_skills().len(), 2);
        assert!(posting.required_soft_skills().is_empty());
        assert!(posting.required_languages().is_empty());
        assert_eq!(posting.extra().get("modality"), Some(&json!("remoto")));
    }

    #[test]
    fn test_single_career_string() {
        let posting: InternshipPosting =
            serde_json::from_value(json!({"career": "quimica", "minYear": "5"})).unwrap();
        assert_eq!(posting.accepted_careers().len(), 1);
        assert_eq!(posting.min_year(), 5);
    }

    #[test]
    fn test_null_requirement_maps_are_empty() {
        let posting: InternshipPosting = serde_json::from_value(json!({
            "career": "quimica",
            "minYear": 1,
            "requiredSoftSkills": null
        }))
        .unwrap();
        assert!(posting.required_soft_skills().is_empty());
    }

    #[test]
    fn test_missing_scalars_fail_loudly() {
        let no_career = serde_json::from_value::<InternshipPosting>(json!({"minYear": 2})).unwrap_err();
        assert!(no_career.to_string().contains("career"));

        let no_year = serde_json::from_value::<InternshipPosting>(json!({"career": "civil"})).unwrap_err();
        assert!(no_year.to_string().contains("minYear"));

        let empty_set = serde_json::from_value::<InternshipPosting>(json!({"career": [], "minYear": 2}));
        assert!(empty_set.is_err());
    }

    #[test]
    fn test_from_value_keeps_typed_error() {
        let err = InternshipPosting::from_value(json!({"career": [" "], "minYear": 1})).unwrap_err();
        assert!(matches!(err, MatcherError::InvalidField { field: "career", .. }));
    }

    #[test]
    fn test_stale_annotations_are_dropped() {
        let posting: InternshipPosting = serde_json::from_value(json!({
            "career": "civil",
            "minYear": 1,
            "matchScore": 12,
            "matchTier": "Baja",
            "canApply": true,
            "breakdown": {"score": 12}
        }))
        .unwrap();
        assert!(posting.extra().is_empty());
    }

    #[test]
    fn test_wrongly_typed_fields_are_data_integrity_errors() {
        let year = InternshipPosting::from_value(json!({"career": "sistemas", "minYear": 3.0})).unwrap_err();
        assert!(year.is_data_integrity());
        assert!(matches!(year, MatcherError::InvalidField { field: "minYear", .. }));

        let boolean = InternshipPosting::from_value(json!({"career": "sistemas", "minYear": false})).unwrap_err();
        assert!(matches!(boolean, MatcherError::InvalidField { field: "minYear", .. }));

        let career = InternshipPosting::from_value(json!({"career": 5, "minYear": 2})).unwrap_err();
        assert!(career.is_data_integrity());
        assert!(matches!(career, MatcherError::InvalidField { field: "career", .. }));

        let mixed = InternshipPosting::from_value(json!({"career": ["civil", 7], "minYear": 2})).unwrap_err();
        assert!(matches!(mixed, MatcherError::InvalidField { field: "career", .. }));

        let requirements = InternshipPosting::from_value(json!({
            "career": "civil",
            "minYear": 2,
            "requiredLanguages": "ingles"
        }))
        .unwrap_err();
        assert!(matches!(
            requirements,
            MatcherError::InvalidField { field: "requiredLanguages", .. }
        ));
    }

    #[test]
    fn test_serialized_shape_keeps_record_fields() {
        let posting = InternshipPosting::new(["sistemas"], 3)
            .unwrap()
            .with_id("p-1")
            .requiring_technical_skills(["react"]);

        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(value["career"], json!(["sistemas"]));
        assert_eq!(value["minYear"], json!(3));
        assert_eq!(value["requiredTechnicalSkills"], json!({"react": true}));

        let back: InternshipPosting = serde_json::from_value(value).unwrap();
        assert_eq!(back, posting);
    }
}
