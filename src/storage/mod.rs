// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::record::{TestCase, COLUMN_HEADERS};
use crate::extractors::DocumentFormat;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager rooted at the given output directory.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_dir: base_path,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Renders the extracted cases as a four-column spreadsheet (CSV) with
    /// the canonical header row. The output name carries a timestamp so
    /// successive runs over the same document never collide.
    pub fn save_cases(&self, stem: &str, cases: &[TestCase]) -> Result<PathBuf, StorageError> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_casos_prueba_{}.csv", stem, timestamp);
        let file_path = self.base_dir.join(filename);

        let mut writer = csv::Writer::from_path(&file_path)?;
        writer.write_record(COLUMN_HEADERS)?;
        for case in cases {
            writer.write_record(case.as_row())?;
        }
        writer.flush()?;

        tracing::info!("Saved {} case(s) to {}", cases.len(), file_path.display());

        Ok(file_path)
    }

    /// Writes a JSON side-file describing one extraction run.
    pub fn save_metadata(
        &self,
        stem: &str,
        source: &Path,
        format: DocumentFormat,
        cases: &[TestCase],
    ) -> Result<PathBuf, StorageError> {
        let filename = format!("{}_casos_prueba_meta.json", stem);
        let file_path = self.base_dir.join(filename);

        let metadata = serde_json::json!({
            "source_file": source.display().to_string(),
            "detected_format": format!("{:?}", format),
            "case_count": cases.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }

    /// Dumps the extracted cases as pretty JSON for debugging runs.
    pub fn save_debug_cases(&self, stem: &str, cases: &[TestCase]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_cases.json", stem));

        let dump = serde_json::to_string_pretty(cases)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, dump)?;

        Ok(file_path)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cases() -> Vec<TestCase> {
        vec![
            TestCase {
                name: "A".to_string(),
                sequence: "B".to_string(),
                supporting_data: "C".to_string(),
                expected_result: "D".to_string(),
            },
            TestCase {
                name: "Inicio de sesión".to_string(),
                sequence: "1. Abrir la aplicación".to_string(),
                supporting_data: "".to_string(),
                expected_result: "Se muestra la pantalla principal.".to_string(),
            },
        ]
    }

    #[test]
    fn test_save_cases_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let path = storage.save_cases("demo", &sample_cases()).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("demo_casos_prueba_"));

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Nombre,Secuencia,Datos requeridos / Datos Adicionales,Resultado Esperado"
        );
        assert_eq!(lines.next().unwrap(), "A,B,C,D");
        assert!(lines.next().unwrap().starts_with("Inicio de sesión,"));
    }

    #[test]
    fn test_save_metadata_records_run_summary() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let path = storage
            .save_metadata(
                "demo",
                Path::new("input/demo.txt"),
                DocumentFormat::Prose,
                &sample_cases(),
            )
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["case_count"], 2);
        assert_eq!(value["detected_format"], "Prose");
        assert!(value["extraction_timestamp"].is_string());
    }

    #[test]
    fn test_new_creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("salida").join("casos");
        let storage = StorageManager::new(&nested).unwrap();
        assert!(nested.is_dir());

        storage.save_cases("demo", &[]).unwrap();
    }
}
