//! Internship matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use processing::eligibility::can_apply;
pub use processing::matcher::{annotate, classify, evaluate, score, AnnotatedPosting, MatchBreakdown};
pub use processing::posting::InternshipPosting;
pub use processing::profile::StudentProfile;
pub use processing::tier::MatchTier;
