//! Opportunity matching: scores a student against internship postings

use crate::processing::posting::InternshipPosting;
use crate::processing::profile::{SkillMap, StudentProfile};
use crate::processing::requirements::RequirementSet;
use crate::processing::tier::MatchTier;
use serde::Serialize;

/// Points earned out of points available within one dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub points: u32,
    pub total: u32,
}

impl DimensionScore {
    fn check(passed: bool) -> Self {
        Self {
            points: u32::from(passed),
            total: 1,
        }
    }

    fn requirements(required: &RequirementSet, held: &SkillMap) -> Self {
        Self {
            points: required.satisfied_by(held) as u32,
            total: required.len() as u32,
        }
    }

    pub fn is_met(&self) -> bool {
        self.points == self.total
    }
}

/// Per-dimension result of matching one student against one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub career: DimensionScore,
    pub year: DimensionScore,
    pub soft_skills: DimensionScore,
    pub technical_skills: DimensionScore,
    pub languages: DimensionScore,
    pub missing_soft_skills: Vec<String>,
    pub missing_technical_skills: Vec<String>,
    pub missing_languages: Vec<String>,
    pub score: u8,
}

impl MatchBreakdown {
    fn dimensions(&self) -> [DimensionScore; 5] {
        [
            self.career,
            self.year,
            self.soft_skills,
            self.technical_skills,
            self.languages,
        ]
    }

    pub fn points(&self) -> u32 {
        self.dimensions().iter().map(|d| d.points).sum()
    }

    pub fn total(&self) -> u32 {
        self.dimensions().iter().map(|d| d.total).sum()
    }

    pub fn tier(&self) -> MatchTier {
        classify(self.score)
    }
}

/// A posting together with its match annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedPosting {
    #[serde(flatten)]
    pub posting: InternshipPosting,
    pub match_score: u8,
    pub match_tier: MatchTier,
}

/// Score every dimension of `posting` against `student`.
///
/// Career and year always contribute one point of denominator each, so the
/// total is never below 2. Requirement categories with no entries contribute
/// nothing to either side.
pub fn evaluate(student: &StudentProfile, posting: &InternshipPosting) -> MatchBreakdown {
    let career = DimensionScore::check(posting.accepts_career(student.career()));
    let year = DimensionScore::check(student.current_year() >= posting.min_year());
    let soft_skills =
        DimensionScore::requirements(posting.required_soft_skills(), student.soft_skills());
    let technical_skills = DimensionScore::requirements(
        posting.required_technical_skills(),
        student.technical_skills(),
    );
    let languages =
        DimensionScore::requirements(posting.required_languages(), student.languages());

    let mut breakdown = MatchBreakdown {
        career,
        year,
        soft_skills,
        technical_skills,
        languages,
        missing_soft_skills: posting.required_soft_skills().missing_from(student.soft_skills()),
        missing_technical_skills: posting
            .required_technical_skills()
            .missing_from(student.technical_skills()),
        missing_languages: posting.required_languages().missing_from(student.languages()),
        score: 0,
    };
    breakdown.score = percentage(breakdown.points(), breakdown.total());
    breakdown
}

/// Compatibility of `student` with `posting` as an integer percentage.
pub fn score(student: &StudentProfile, posting: &InternshipPosting) -> u8 {
    evaluate(student, posting).score
}

pub fn classify(score: u8) -> MatchTier {
    MatchTier::from_score(score)
}

/// Annotate each posting with its score and tier.
///
/// Output has the same length and order as `postings`; nothing is filtered.
pub fn annotate(student: &StudentProfile, postings: &[InternshipPosting]) -> Vec<AnnotatedPosting> {
    postings
        .iter()
        .map(|posting| {
            let match_score = score(student, posting);
            AnnotatedPosting {
                posting: posting.clone(),
                match_score,
                match_tier: classify(match_score),
            }
        })
        .collect()
}

/// `round(100 * points / total)`, ties rounded up.
fn percentage(points: u32, total: u32) -> u8 {
    debug_assert!(total >= 2 && points <= total);
    let points = u64::from(points);
    let total = u64::from(total);
    ((200 * points + total) / (2 * total)) as u8
}
