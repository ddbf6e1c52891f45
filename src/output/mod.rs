//! Output module for listing reports and multiple formats

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::ListingReport;
