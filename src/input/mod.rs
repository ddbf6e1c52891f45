//! Input processing module
//! Handles file detection, record reading and catalogue loading

pub mod file_detector;
pub mod record_reader;
pub mod catalogue;
pub mod manager;
