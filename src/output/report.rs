//! Listing report: annotated postings, eligibility and skipped records

use crate::input::catalogue::{PostingCatalogue, SkippedPosting};
use crate::processing::eligibility::can_apply;
use crate::processing::listing::ListingOptions;
use crate::processing::matcher::{annotate, evaluate, AnnotatedPosting, MatchBreakdown};
use crate::processing::profile::StudentProfile;
use crate::processing::tier::MatchTier;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything a listing view needs to render one student's recommendations.
#[derive(Debug, Clone, Serialize)]
pub struct ListingReport {
    pub student: StudentSummary,

    /// Postings left after the listing filter, in display order
    pub entries: Vec<ListingEntry>,

    /// Catalogue records that could not be scored
    pub skipped: Vec<SkippedPosting>,

    /// Tier counts over every scored posting, before filtering
    pub summary: TierSummary,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub career: String,
    pub current_year: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    #[serde(flatten)]
    pub posting: AnnotatedPosting,
    pub can_apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<MatchBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub perfecta: usize,
    pub alta: usize,
    pub media: usize,
    pub baja: usize,
    pub eligible: usize,
    pub scored: usize,
}

impl TierSummary {
    fn tally(postings: &[AnnotatedPosting]) -> Self {
        let mut summary = TierSummary::default();
        for posting in postings {
            match posting.match_tier {
                MatchTier::Perfecta => summary.perfecta += 1,
                MatchTier::Alta => summary.alta += 1,
                MatchTier::Media => summary.media += 1,
                MatchTier::Baja => summary.baja += 1,
            }
            if can_apply(posting.match_tier) {
                summary.eligible += 1;
            }
        }
        summary.scored = postings.len();
        summary
    }

    pub fn count(&self, tier: MatchTier) -> usize {
        match tier {
            MatchTier::Perfecta => self.perfecta,
            MatchTier::Alta => self.alta,
            MatchTier::Media => self.media,
            MatchTier::Baja => self.baja,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postings_file: Option<String>,
}

impl ListingReport {
    /// Score the catalogue for `student` and shape it for display.
    pub fn generate(
        student: &StudentProfile,
        catalogue: PostingCatalogue,
        options: &ListingOptions,
        detailed: bool,
    ) -> Self {
        let annotated = annotate(student, &catalogue.postings);
        let summary = TierSummary::tally(&annotated);

        let entries = options
            .apply(annotated)
            .into_iter()
            .map(|posting| ListingEntry {
                can_apply: can_apply(posting.match_tier),
                breakdown: detailed.then(|| evaluate(student, &posting.posting)),
                posting,
            })
            .collect();

        Self {
            student: StudentSummary {
                name: student.name().map(str::to_string),
                career: student.career().to_string(),
                current_year: student.current_year(),
            },
            entries,
            skipped: catalogue.skipped,
            summary,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                profile_file: None,
                postings_file: None,
            },
        }
    }

    pub fn with_sources(mut self, profile_file: impl Into<String>, postings_file: impl Into<String>) -> Self {
        self.metadata.profile_file = Some(profile_file.into());
        self.metadata.postings_file = Some(postings_file.into());
        self
    }
}

/// Title line for a posting: title, company, or id, whichever is present.
pub fn posting_heading(posting: &AnnotatedPosting) -> String {
    let inner = &posting.posting;
    match (inner.title(), inner.company()) {
        (Some(title), Some(company)) => format!("{} @ {}", title, company),
        (Some(title), None) => title.to_string(),
        (None, Some(company)) => company.to_string(),
        (None, None) => inner
            .id_label()
            .map(|id| format!("Posting {}", id))
            .unwrap_or_else(|| "Untitled posting".to_string()),
    }
}
