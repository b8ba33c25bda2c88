// src/extractors/engine.rs

use crate::extractors::delimited::{DelimitedParser, FIELD_DELIMITER};
use crate::extractors::patterns::PatternTable;
use crate::extractors::prose::ProseParser;
use crate::extractors::record::TestCase;

/// Keywords that, together with the field delimiter, identify a delimited
/// document from its first line alone.
const DETECTION_KEYWORDS: [&str; 2] = ["Nombre", "Secuencia"];

/// Parsing strategy chosen for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Delimited,
    Prose,
    Empty,
}

/// Inspects the first line of a document and picks the parsing strategy.
/// Pure function of the text; repeated calls always agree.
pub fn detect_format(content: &str) -> DocumentFormat {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return DocumentFormat::Empty;
    }

    let first_line = trimmed.lines().next().unwrap_or("");
    if first_line.contains(FIELD_DELIMITER)
        && DETECTION_KEYWORDS.iter().any(|kw| first_line.contains(kw))
    {
        DocumentFormat::Delimited
    } else {
        DocumentFormat::Prose
    }
}

/// Façade over format detection and the two parsers.
///
/// Recoverable failures degrade to omitted records or empty fields;
/// `extract` never fails on malformed content. Holds no mutable state, so
/// one engine can serve any number of documents.
pub struct ExtractionEngine {
    delimited: DelimitedParser,
    prose: ProseParser,
}

impl ExtractionEngine {
    /// Engine with the compiled-in Spanish pattern table.
    pub fn new() -> Self {
        Self::with_patterns(PatternTable::spanish())
    }

    /// Engine with a substitute pattern table.
    pub fn with_patterns(patterns: PatternTable) -> Self {
        Self {
            delimited: DelimitedParser::new(),
            prose: ProseParser::new(patterns),
        }
    }

    /// Extracts the ordered record sequence from one document.
    pub fn extract(&self, content: &str) -> Vec<TestCase> {
        let format = detect_format(content);
        tracing::info!("Detected document format: {:?}", format);

        let trimmed = content.trim();
        let result = match format {
            DocumentFormat::Empty => return Vec::new(),
            DocumentFormat::Delimited => {
                let lines: Vec<&str> = trimmed.lines().collect();
                self.delimited.parse(&lines)
            }
            DocumentFormat::Prose => self.prose.parse(trimmed),
        };

        match result {
            Ok(cases) => {
                tracing::info!("Extracted {} test case(s)", cases.len());
                cases
            }
            Err(e) => {
                tracing::warn!("Extraction yielded no records: {}", e);
                Vec::new()
            }
        }
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}
