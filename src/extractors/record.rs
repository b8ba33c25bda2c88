// src/extractors/record.rs
use serde::Serialize;

/// Column headers of the rendered spreadsheet, in record-field order.
/// Column order is fixed by contract with the upstream authoring template;
/// header text is never used to reorder columns.
pub const COLUMN_HEADERS: [&str; 4] = [
    "Nombre",
    "Secuencia",
    "Datos requeridos / Datos Adicionales",
    "Resultado Esperado",
];

/// One normalized test case recovered from a source document.
/// Every field is best-effort text; a failed extraction leaves it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestCase {
    pub name: String,
    pub sequence: String,
    pub supporting_data: String,
    pub expected_result: String,
}

impl TestCase {
    /// A case with neither a name nor a sequence carries no usable content
    /// and is dropped instead of rendered as a blank row.
    pub fn has_content(&self) -> bool {
        !self.name.is_empty() || !self.sequence.is_empty()
    }

    /// Field values in rendering order, matching [`COLUMN_HEADERS`].
    pub fn as_row(&self) -> [&str; 4] {
        [
            &self.name,
            &self.sequence,
            &self.supporting_data,
            &self.expected_result,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_content() {
        let empty = TestCase::default();
        assert!(!empty.has_content());

        let named = TestCase {
            name: "Inicio de sesión".to_string(),
            ..Default::default()
        };
        assert!(named.has_content());

        let steps_only = TestCase {
            sequence: "1. Abrir la aplicación".to_string(),
            ..Default::default()
        };
        assert!(steps_only.has_content());

        let extras_only = TestCase {
            supporting_data: "Usuario suscrito".to_string(),
            expected_result: "Se muestra la pantalla.".to_string(),
            ..Default::default()
        };
        assert!(!extras_only.has_content());
    }

    #[test]
    fn test_row_matches_header_order() {
        let case = TestCase {
            name: "A".to_string(),
            sequence: "B".to_string(),
            supporting_data: "C".to_string(),
            expected_result: "D".to_string(),
        };
        assert_eq!(case.as_row(), ["A", "B", "C", "D"]);
        assert_eq!(case.as_row().len(), COLUMN_HEADERS.len());
    }
}
