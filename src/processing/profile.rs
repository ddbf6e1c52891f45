//! Student profile snapshot consumed by the matcher

use crate::error::{MatcherError, Result};
use crate::processing::requirements::normalize_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const RECORD: &str = "student profile";

/// Skill or language identifier mapped to a proficiency label.
/// Only key presence matters for scoring.
pub type SkillMap = BTreeMap<String, String>;

/// Immutable snapshot of a student, built once at the boundary.
///
/// `career` and `current_year` are mandatory; deserialization fails with a
/// typed error when they are absent instead of letting the scorer guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord", rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    career: String,
    current_year: u32,
    soft_skills: SkillMap,
    technical_skills: SkillMap,
    languages: SkillMap,
}

impl StudentProfile {
    pub fn new(career: impl AsRef<str>, current_year: u32) -> Result<Self> {
        let career = normalize_id(career.as_ref()).ok_or_else(|| {
            MatcherError::invalid(RECORD, "career", "career identifier is empty")
        })?;
        if current_year == 0 {
            return Err(MatcherError::invalid(
                RECORD,
                "currentYear",
                "year of study must be at least 1",
            ));
        }

        Ok(Self {
            name: None,
            email: None,
            career,
            current_year,
            soft_skills: SkillMap::new(),
            technical_skills: SkillMap::new(),
            languages: SkillMap::new(),
        })
    }

    /// Build a profile from a loosely-typed record, keeping the typed error.
    pub fn from_value(value: Value) -> Result<Self> {
        let record: ProfileRecord = serde_json::from_value(value)?;
        Self::try_from(record)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_soft_skill(mut self, id: impl AsRef<str>, level: impl Into<String>) -> Self {
        insert_skill(&mut self.soft_skills, id.as_ref(), level.into());
        self
    }

    pub fn with_technical_skill(mut self, id: impl AsRef<str>, level: impl Into<String>) -> Self {
        insert_skill(&mut self.technical_skills, id.as_ref(), level.into());
        self
    }

    pub fn with_language(mut self, id: impl AsRef<str>, level: impl Into<String>) -> Self {
        insert_skill(&mut self.languages, id.as_ref(), level.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn career(&self) -> &str {
        &self.career
    }

    pub fn current_year(&self) -> u32 {
        self.current_year
    }

    pub fn soft_skills(&self) -> &SkillMap {
        &self.soft_skills
    }

    pub fn technical_skills(&self) -> &SkillMap {
        &self.technical_skills
    }

    pub fn languages(&self) -> &SkillMap {
        &self.languages
    }
}

fn insert_skill(map: &mut SkillMap, id: &str, level: String) {
    if let Some(id) = normalize_id(id) {
        map.insert(id, level);
    }
}

/// Year fields arrive as numbers or as numeric strings from form inputs.
pub(crate) fn parse_year(value: &Value, record: &'static str, field: &'static str) -> Result<u32> {
    let year = match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            MatcherError::invalid(record, field, format!("{} is not a non-negative whole number", n))
        })?,
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| MatcherError::invalid(record, field, format!("`{}` is not a whole number", s)))?,
        other => {
            return Err(MatcherError::invalid(
                record,
                field,
                format!("expected a number, found {}", other),
            ))
        }
    };
    u32::try_from(year)
        .map_err(|_| MatcherError::invalid(record, field, format!("{} is out of range", year)))
}

/// Loosely-typed shape of a stored student record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    name: Option<String>,
    email: Option<String>,
    career: Option<Value>,
    current_year: Option<Value>,
    soft_skills: Option<Value>,
    technical_skills: Option<Value>,
    languages: Option<Value>,
}

impl TryFrom<ProfileRecord> for StudentProfile {
    type Error = MatcherError;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let career = match record.career {
            Some(Value::String(career)) => career,
            Some(other) => {
                return Err(MatcherError::invalid(
                    RECORD,
                    "career",
                    format!("expected a string, found {}", other),
                ))
            }
            None => return Err(MatcherError::missing(RECORD, "career")),
        };
        let current_year = record
            .current_year
            .ok_or_else(|| MatcherError::missing(RECORD, "currentYear"))
            .and_then(|year| parse_year(&year, RECORD, "currentYear"))?;

        let mut profile = StudentProfile::new(career, current_year)?;
        profile.name = record.name;
        profile.email = record.email;
        profile.soft_skills = skill_map(record.soft_skills, "softSkills")?;
        profile.technical_skills = skill_map(record.technical_skills, "technicalSkills")?;
        profile.languages = skill_map(record.languages, "languages")?;
        Ok(profile)
    }
}

fn skill_map(raw: Option<Value>, field: &'static str) -> Result<SkillMap> {
    let entries = match raw {
        None | Some(Value::Null) => return Ok(SkillMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(MatcherError::invalid(
                RECORD,
                field,
                format!("expected a map of identifiers, found {}", other),
            ))
        }
    };

    let mut map = SkillMap::new();
    for (id, level) in entries {
        let level = match level {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        insert_skill(&mut map, &id, level);
    }
    Ok(map)
}
