//! Listing view over annotated postings: tier filter, ordering and limit

use crate::processing::matcher::AnnotatedPosting;
use crate::processing::tier::MatchTier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingOptions {
    /// Hide postings below this tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_tier: Option<MatchTier>,
    /// Best matches first. Equal scores keep catalogue order.
    #[serde(default)]
    pub sort_by_score: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ListingOptions {
    pub fn apply(&self, mut postings: Vec<AnnotatedPosting>) -> Vec<AnnotatedPosting> {
        if let Some(minimum) = self.minimum_tier {
            postings.retain(|p| p.match_tier >= minimum);
        }
        if self.sort_by_score {
            postings.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        }
        if let Some(limit) = self.limit {
            postings.truncate(limit);
        }
        postings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::matcher::annotate;
    use crate::processing::posting::InternshipPosting;
    use crate::processing::profile::StudentProfile;

    fn annotated() -> Vec<AnnotatedPosting> {
        let student = StudentProfile::new("sistemas", 3)
            .unwrap()
            .with_technical_skill("react", "Básico");
        let postings = vec![
            InternshipPosting::new(["quimica"], 5).unwrap().with_id("a"),
            InternshipPosting::new(["sistemas"], 1).unwrap().with_id("b"),
            InternshipPosting::new(["sistemas"], 5).unwrap().with_id("c"),
            InternshipPosting::new(["sistemas"], 1)
                .unwrap()
                .with_id("d")
                .requiring_technical_skills(["react", "nodejs"]),
            InternshipPosting::new(["civil"], 1).unwrap().with_id("e"),
        ];
        annotate(&student, &postings)
    }

    fn ids(postings: &[AnnotatedPosting]) -> Vec<String> {
        postings.iter().filter_map(|p| p.posting.id_label()).collect()
    }

    #[test]
    fn test_default_options_keep_everything_in_order() {
        let listing = ListingOptions::default().apply(annotated());
        assert_eq!(ids(&listing), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_minimum_tier_is_inclusive() {
        let options = ListingOptions {
            minimum_tier: Some(MatchTier::Alta),
            ..Default::default()
        };
        // b = 100, d = 75; c and e are 50
        assert_eq!(ids(&options.apply(annotated())), vec!["b", "d"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_scores() {
        let options = ListingOptions {
            sort_by_score: true,
            ..Default::default()
        };
        assert_eq!(ids(&options.apply(annotated())), vec!["b", "d", "c", "e", "a"]);
    }

    #[test]
    fn test_limit_applies_after_sorting() {
        let options = ListingOptions {
            sort_by_score: true,
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&options.apply(annotated())), vec!["b", "d"]);
    }
}
