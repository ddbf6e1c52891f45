//! Matching core: typed records, scoring, tiers and the listing view

pub mod requirements;
pub mod profile;
pub mod posting;
pub mod tier;
pub mod matcher;
pub mod eligibility;
pub mod listing;
