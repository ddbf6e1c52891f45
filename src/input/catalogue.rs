//! Posting catalogues: typed postings plus the records that failed to build

use crate::error::{MatcherError, Result};
use crate::processing::posting::{id_label, InternshipPosting};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

/// A catalogue entry that could not be turned into a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPosting {
    /// Position in the source document.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostingCatalogue {
    pub postings: Vec<InternshipPosting>,
    pub skipped: Vec<SkippedPosting>,
}

impl PostingCatalogue {
    /// Build a catalogue from a JSON array, or from a document holding a
    /// `postings` array (the shape a TOML `[[postings]]` file produces).
    ///
    /// A document of the wrong shape is an error. Individual malformed
    /// postings are skipped so the rest of the listing still renders.
    pub fn from_document(document: Value) -> Result<Self> {
        let entries = match document {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("postings") {
                Some(Value::Array(entries)) => entries,
                Some(_) => {
                    return Err(MatcherError::InvalidInput(
                        "`postings` must be an array of posting records".to_string(),
                    ))
                }
                None => {
                    return Err(MatcherError::InvalidInput(
                        "posting catalogue has no `postings` array".to_string(),
                    ))
                }
            },
            _ => {
                return Err(MatcherError::InvalidInput(
                    "posting catalogue must be an array or contain a `postings` array".to_string(),
                ))
            }
        };

        let mut catalogue = PostingCatalogue::default();
        for (index, entry) in entries.into_iter().enumerate() {
            let id = entry.get("id").filter(|id| !id.is_null()).map(id_label);
            match InternshipPosting::from_value(entry) {
                Ok(posting) => catalogue.postings.push(posting),
                Err(e) => {
                    warn!("Skipping posting #{}: {}", index, e);
                    catalogue.skipped.push(SkippedPosting {
                        index,
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            "Loaded {} postings ({} skipped)",
            catalogue.postings.len(),
            catalogue.skipped.len()
        );
        Ok(catalogue)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_postings_are_skipped() {
        let document = json!([
            {"id": "ok-1", "career": "sistemas", "minYear": 2},
            {"id": "no-year", "career": "sistemas"},
            {"id": 7, "minYear": 2},
            {"id": "ok-2", "career": ["civil"], "minYear": "1"}
        ]);

        let catalogue = PostingCatalogue::from_document(document).unwrap();

        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.skipped.len(), 2);
        assert_eq!(catalogue.skipped[0].index, 1);
        assert_eq!(catalogue.skipped[0].id.as_deref(), Some("no-year"));
        assert!(catalogue.skipped[0].reason.contains("minYear"));
        assert_eq!(catalogue.skipped[1].id.as_deref(), Some("7"));
        assert!(catalogue.skipped[1].reason.contains("career"));
    }

    #[test]
    fn test_postings_key_is_accepted() {
        let document = json!({"postings": [{"career": "civil", "minYear": 1}]});
        let catalogue = PostingCatalogue::from_document(document).unwrap();
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_wrong_document_shape_is_an_error() {
        assert!(PostingCatalogue::from_document(json!("nope")).is_err());
        assert!(PostingCatalogue::from_document(json!({"items": []})).is_err());
        assert!(PostingCatalogue::from_document(json!({"postings": {}})).is_err());
    }

    #[test]
    fn test_empty_catalogue() {
        let catalogue = PostingCatalogue::from_document(json!([])).unwrap();
        assert!(catalogue.is_empty());
        assert!(catalogue.skipped.is_empty());
    }
}
