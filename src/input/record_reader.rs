//! Reading record documents from JSON and TOML files

use crate::error::Result;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Reads a file into a JSON value tree, whatever its on-disk format.
pub trait RecordReader {
    fn read(&self, path: &Path) -> impl std::future::Future<Output = Result<Value>> + Send;
}

pub struct JsonReader;

impl RecordReader for JsonReader {
    async fn read(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

pub struct TomlReader;

impl RecordReader for TomlReader {
    async fn read(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).await?;
        let table: toml::Table = toml::from_str(&content)?;
        Ok(serde_json::to_value(table)?)
    }
}
