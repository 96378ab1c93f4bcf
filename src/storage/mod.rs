// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analyzer::DocumentAnalysis;
use crate::models::CollectionOutput;
use crate::utils::error::StorageError;

pub const OUTPUT_FILENAME: &str = "challenge1b_output.json";
const DEBUG_DIR: &str = "debug";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves the ranked collection output as pretty JSON
    pub fn save_output(&self, output: &CollectionOutput) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(OUTPUT_FILENAME);
        write_json(&file_path, output)?;

        tracing::info!("Saved output to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the full analysis of one document under `debug/`
    pub fn save_analysis(&self, analysis: &DocumentAnalysis) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(DEBUG_DIR);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .map_err(StorageError::IoError)?;
        }

        let filename = format!("{}_analysis.json", analysis.metadata.filename);
        let file_path = target_dir.join(filename);
        write_json(&file_path, analysis)?;

        tracing::debug!("Saved analysis dump to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves any other serializable debug record under `debug/`
    pub fn save_debug_record<T: Serialize>(&self, name: &str, record: &T) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(DEBUG_DIR);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .map_err(StorageError::IoError)?;
        }

        let file_path = target_dir.join(format!("{}.json", name));
        write_json(&file_path, record)?;
        Ok(file_path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    fs::write(path, json)
        .map_err(StorageError::IoError)
}
