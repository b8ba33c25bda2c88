// src/main.rs
mod extractors;
mod storage;
mod utils;

use std::path::{Path, PathBuf};

use clap::Parser;

use extractors::patterns::PatternTable;
use extractors::{detect_format, DocumentFormat, ExtractionEngine};
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the test-case document extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory scanned for .txt test-case documents
    #[arg(short, long, default_value = "./input")]
    input_dir: String,

    /// Output directory for the rendered spreadsheets
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Process a single document instead of scanning the input directory
    #[arg(short, long)]
    file: Option<String>,

    /// Debug mode - save raw and annotated copies of each document
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Initialize the extraction engine
    let engine = ExtractionEngine::new();

    // 5. Collect the documents to process
    let documents = match &args.file {
        Some(file) => vec![PathBuf::from(file)],
        None => discover_documents(Path::new(&args.input_dir))?,
    };

    if documents.is_empty() {
        tracing::warn!("No .txt documents found in {}", args.input_dir);
        return Ok(());
    }

    tracing::info!("Found {} document(s) to process", documents.len());

    // 6. Process each document independently
    let mut success_count = 0;
    let mut failure_count = 0;

    for document in &documents {
        tracing::info!("Processing document: {}", document.display());

        match process_document(document, &engine, &storage, args.debug) {
            Ok(count) if count > 0 => success_count += 1,
            Ok(_) => {
                tracing::warn!("No test cases extracted from {}", document.display());
                failure_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", document.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!(
        "Processing finished. Success: {}, Failures: {}",
        success_count,
        failure_count
    );

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "No test cases extracted from any of {} document(s)",
            failure_count
        )));
    }

    Ok(())
}

/// Lists the .txt files in the input directory, sorted for a deterministic
/// processing order.
fn discover_documents(input_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !input_dir.is_dir() {
        return Err(AppError::Config(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            documents.push(path);
        }
    }
    documents.sort();

    Ok(documents)
}

/// Runs one document through the engine and the renderer. Returns the number
/// of extracted cases; a read failure is the only hard error.
fn process_document(
    path: &Path,
    engine: &ExtractionEngine,
    storage: &StorageManager,
    debug: bool,
) -> Result<usize, AppError> {
    let content = std::fs::read_to_string(path)?;
    tracing::info!("Read document ({} bytes)", content.len());

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("documento");

    let format = detect_format(&content);
    let cases = engine.extract(&content);

    if debug {
        // Save the raw document for debugging
        let raw_path = storage.base_dir().join(format!("{}_raw.txt", stem));
        std::fs::write(&raw_path, &content)?;
        tracing::info!("Saved raw document copy to {}", raw_path.display());

        // Annotated copy showing where the prose heuristics matched
        if format == DocumentFormat::Prose {
            let annotated_path = storage.base_dir().join(format!("{}_annotated.html", stem));
            if let Err(e) =
                utils::annotate::create_annotated_html(&content, &annotated_path, &PatternTable::spanish())
            {
                tracing::warn!("Failed to create annotated copy: {}", e);
            }
        }

        match storage.save_debug_cases(stem, &cases) {
            Ok(dump) => tracing::info!("Saved extracted-case dump to {}", dump.display()),
            Err(e) => tracing::warn!("Failed to save extracted-case dump: {}", e),
        }
    }

    if cases.is_empty() {
        return Ok(0);
    }

    // Save the rendered spreadsheet
    match storage.save_cases(stem, &cases) {
        Ok(sheet) => tracing::info!("Saved spreadsheet to {}", sheet.display()),
        Err(e) => tracing::error!("Failed to save spreadsheet: {}", e),
    }

    // Save the run metadata
    match storage.save_metadata(stem, path, format, &cases) {
        Ok(meta) => tracing::info!("Saved metadata to {}", meta.display()),
        Err(e) => tracing::error!("Failed to save metadata: {}", e),
    }

    // Preview of the first extracted cases
    for (i, case) in cases.iter().take(3).enumerate() {
        tracing::debug!(
            "Case {}: name={:?} sequence={:?} result={:?}",
            i + 1,
            preview(&case.name),
            preview(&case.sequence),
            preview(&case.expected_result)
        );
    }

    Ok(cases.len())
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
