use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// CsvConnection owns the data directory and the file plumbing shared by
/// every repository: whole-file reads, atomic rewrites and appends.
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection rooted at `base_directory`
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Read every row of a CSV file. A missing file reads as empty; rows that
    /// fail to parse are logged and skipped.
    pub fn read_csv<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.file_path(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ::csv::Reader::from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut rows = Vec::new();
        for (index, result) in reader.deserialize::<T>().enumerate() {
            match result {
                Ok(row) => rows.push(row),
                Err(e) => {
                    warn!("Skipping malformed row {} in {}: {}", index + 1, path.display(), e);
                }
            }
        }
        Ok(rows)
    }

    /// Read every row of a CSV file, failing on the first row that does not
    /// parse. Used before rewriting a file so no row is silently dropped.
    pub fn read_csv_strict<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.file_path(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ::csv::Reader::from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut rows = Vec::new();
        for (index, result) in reader.deserialize::<T>().enumerate() {
            let row = result.with_context(|| format!("Malformed row {} in {}", index + 1, path.display()))?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Replace the whole file, writing to a temp file first and renaming it
    pub fn rewrite_csv<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<()> {
        let path = self.file_path(file_name);
        let temp_path = path.with_extension("csv.tmp");

        {
            let mut writer = ::csv::Writer::from_path(&temp_path)
                .with_context(|| format!("Failed to create {}", temp_path.display()))?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Rewrote {} with {} rows", path.display(), rows.len());
        Ok(())
    }

    /// Append a single row, writing the header when the file is new or empty
    pub fn append_csv<T: Serialize>(&self, file_name: &str, row: &T) -> Result<()> {
        let path = self.file_path(file_name);
        let needs_header = match fs::metadata(&path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {} for append", path.display()))?;

        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a YAML document, or `None` when the file does not exist yet
    pub fn read_yaml<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>> {
        let path = self.file_path(file_name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Write a YAML document atomically
    pub fn write_yaml<T: Serialize>(&self, file_name: &str, value: &T) -> Result<()> {
        let path = self.file_path(file_name);
        let temp_path = path.with_extension("yaml.tmp");
        let content = serde_yaml::to_string(value)?;
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
