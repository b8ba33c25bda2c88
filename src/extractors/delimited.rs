// src/extractors/delimited.rs

use crate::extractors::record::TestCase;
use crate::utils::error::ExtractError;

/// Field separator of the tabular input format.
pub const FIELD_DELIMITER: char = '\t';

/// Keywords recognized while scanning for the header anchor row.
pub const HEADER_KEYWORDS: [&str; 4] = ["Nombre", "Secuencia", "Datos", "Resultado"];

const FIELD_COUNT: usize = 4;

/// Parses tab-delimited documents with an explicit header row.
pub struct DelimitedParser;

impl DelimitedParser {
    pub fn new() -> Self {
        Self
    }

    /// Locates the header anchor, then maps every following non-empty row
    /// positionally onto the four record fields.
    pub fn parse(&self, lines: &[&str]) -> Result<Vec<TestCase>, ExtractError> {
        let header_idx = lines
            .iter()
            .position(|line| is_header_line(line))
            .ok_or_else(|| ExtractError::NoHeaderFound("no recognizable header row".to_string()))?;

        tracing::debug!("Header anchor at line {}: {:?}", header_idx, lines[header_idx]);

        let mut cases = Vec::new();
        for line in &lines[header_idx + 1..] {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut columns: Vec<&str> = line.split(FIELD_DELIMITER).collect();
            // Short rows degrade to empty fields, never to an index error;
            // columns beyond the four mapped fields are dropped.
            columns.resize(FIELD_COUNT, "");

            let case = TestCase {
                name: columns[0].trim().to_string(),
                sequence: columns[1].trim().to_string(),
                supporting_data: columns[2].trim().to_string(),
                expected_result: columns[3].trim().to_string(),
            };

            if case.has_content() {
                cases.push(case);
            } else {
                tracing::debug!("Dropping all-empty row: {:?}", line);
            }
        }

        tracing::debug!("Delimited parse produced {} case(s)", cases.len());
        Ok(cases)
    }
}

impl Default for DelimitedParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_header_line(line: &str) -> bool {
    line.contains(FIELD_DELIMITER) && HEADER_KEYWORDS.iter().any(|kw| line.contains(kw))
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Nombre\tSecuencia\tDatos requeridos / Datos Adicionales\tResultado Esperado";

    #[test]
    fn test_round_trip_single_row() {
        let lines = vec![HEADER, "A\tB\tC\tD"];
        let cases = DelimitedParser::new().parse(&lines).unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(
            cases[0],
            TestCase {
                name: "A".to_string(),
                sequence: "B".to_string(),
                supporting_data: "C".to_string(),
                expected_result: "D".to_string(),
            }
        );
    }

    #[test]
    fn test_short_rows_pad_with_empty_fields() {
        let lines = vec![HEADER, "A\tB"];
        let cases = DelimitedParser::new().parse(&lines).unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "A");
        assert_eq!(cases[0].sequence, "B");
        assert_eq!(cases[0].supporting_data, "");
        assert_eq!(cases[0].expected_result, "");
    }

    #[test]
    fn test_excess_columns_are_ignored() {
        let lines = vec![HEADER, "A\tB\tC\tD\tE\tF"];
        let cases = DelimitedParser::new().parse(&lines).unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].expected_result, "D");
    }

    #[test]
    fn test_all_empty_row_is_discarded() {
        let lines = vec![HEADER, "\t\t\t", "  \t \t\t  "];
        let cases = DelimitedParser::new().parse(&lines).unwrap();
        assert!(cases.is_empty());
    }

    #[test]
    fn test_values_are_trimmed() {
        let lines = vec![HEADER, "  A \t B\t C \t D  "];
        let cases = DelimitedParser::new().parse(&lines).unwrap();
        assert_eq!(cases[0].name, "A");
        assert_eq!(cases[0].expected_result, "D");
    }

    #[test]
    fn test_header_found_below_preamble() {
        let lines = vec!["Plan de pruebas - versión 2", "", HEADER, "A\tB\tC\tD"];
        let cases = DelimitedParser::new().parse(&lines).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "A");
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let lines = vec!["A\tB\tC\tD", "E\tF\tG\tH"];
        let result = DelimitedParser::new().parse(&lines);
        assert!(matches!(result, Err(ExtractError::NoHeaderFound(_))));
    }

    #[test]
    fn test_row_order_is_preserved() {
        let lines = vec![HEADER, "Z\t\t\t", "A\t\t\t", "M\t\t\t"];
        let cases = DelimitedParser::new().parse(&lines).unwrap();
        let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Z", "A", "M"]);
    }
}
