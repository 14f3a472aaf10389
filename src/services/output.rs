use crate::models::FilterRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Paths of the two files produced for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub jsonl: PathBuf,
    pub json: PathBuf,
}

impl OutputPaths {
    pub fn for_user(out_dir: &Path, user_id: &str) -> Self {
        Self {
            jsonl: out_dir.join(format!("result_{}.jsonl", user_id)),
            json: out_dir.join(format!("result_{}.json", user_id)),
        }
    }
}

/// Writes batch results as line-delimited and pretty-printed JSON
#[derive(Debug, Clone)]
pub struct ResultWriter {
    out_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write both encodings and return their paths
    pub fn write(&self, user_id: &str, records: &[FilterRecord]) -> Result<OutputPaths, OutputError> {
        std::fs::create_dir_all(&self.out_dir).map_err(|source| OutputError::Io {
            path: self.out_dir.clone(),
            source,
        })?;

        let paths = OutputPaths::for_user(&self.out_dir, user_id);
        write_jsonl(&paths.jsonl, records)?;
        write_json(&paths.json, records)?;

        Ok(paths)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, OutputError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn write_jsonl(path: &Path, records: &[FilterRecord]) -> Result<(), OutputError> {
    let mut writer = create(path)?;
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n").map_err(|e| io_error(path, e))?;
    }
    writer.flush().map_err(|e| io_error(path, e))
}

pub fn write_json(path: &Path, records: &[FilterRecord]) -> Result<(), OutputError> {
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush().map_err(|e| io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product_id: &str) -> FilterRecord {
        FilterRecord {
            user_id: "U1".to_string(),
            user_type: Some("student".to_string()),
            product_id: product_id.to_string(),
            product_name: "Teapot 茶壶".to_string(),
            category: "kitchen".to_string(),
            price: 42.0,
            stock: 3,
            result: "recommendable".to_string(),
            reason: "fits".to_string(),
        }
    }

    #[test]
    fn test_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().join("out"));
        let records = vec![record("P1"), record("P2")];

        let paths = writer.write("U1", &records).unwrap();

        assert!(paths.jsonl.ends_with("result_U1.jsonl"));
        let jsonl = std::fs::read_to_string(&paths.jsonl).unwrap();
        assert_eq!(jsonl.lines().count(), 2);
        assert!(jsonl.contains("茶壶"));

        let json = std::fs::read_to_string(&paths.json).unwrap();
        let parsed: Vec<FilterRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records);
        assert!(json.contains("\n  {"));
    }
}
