//! Input manager for loading profile and posting files

use crate::error::{MatcherError, Result};
use crate::input::catalogue::PostingCatalogue;
use crate::input::file_detector::FileType;
use crate::input::record_reader::{JsonReader, RecordReader, TomlReader};
use crate::processing::profile::StudentProfile;
use log::info;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, Value>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load the student snapshot. Any defect in it is fatal.
    pub async fn load_profile(&mut self, path: &Path) -> Result<StudentProfile> {
        let document = self.read_document(path).await?;
        let profile = StudentProfile::from_value(document)?;
        info!(
            "Loaded profile: career={}, year={}",
            profile.career(),
            profile.current_year()
        );
        Ok(profile)
    }

    pub async fn load_postings(&mut self, path: &Path) -> Result<PostingCatalogue> {
        let document = self.read_document(path).await?;
        let catalogue = PostingCatalogue::from_document(document)?;
        info!(
            "Loaded {} postings from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    pub async fn read_document(&mut self, path: &Path) -> Result<Value> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached records for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let document = match self.detect_file_type(path)? {
            FileType::Json => {
                info!("Reading JSON records: {}", path.display());
                JsonReader.read(path).await?
            }
            FileType::Toml => {
                info!("Reading TOML records: {}", path.display());
                TomlReader.read(path).await?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, document.clone());
        }

        Ok(document)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                MatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
