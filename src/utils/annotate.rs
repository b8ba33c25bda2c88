// src/utils/annotate.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::extractors::patterns::PatternTable;
use crate::utils::error::AppError;

/// Writes an HTML copy of a prose document with every pattern hit wrapped in
/// a highlight span, for checking the heuristic rules against a real file.
pub fn create_annotated_html(
    text: &str,
    path: &Path,
    patterns: &PatternTable,
) -> Result<(), AppError> {
    let mut highlights: Vec<(usize, usize, &str)> = Vec::new();

    for m in patterns.case_boundary.find_iter(text) {
        highlights.push((m.start(), m.end(), "boundary"));
    }
    for m in patterns.step_marker.find_iter(text) {
        highlights.push((m.start(), m.end(), "step"));
    }
    for re in &patterns.supporting_data {
        for m in re.find_iter(text) {
            highlights.push((m.start(), m.end(), "data"));
        }
    }
    for re in &patterns.expected_result {
        for m in re.find_iter(text) {
            highlights.push((m.start(), m.end(), "result"));
        }
    }

    save_annotated(text, path, &mut highlights)
}

fn save_annotated(
    text: &str,
    path: &Path,
    highlights: &mut Vec<(usize, usize, &str)>,
) -> Result<(), AppError> {
    highlights.sort_by_key(|h| h.0);

    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");

    // CSS for highlight colors
    html.push_str("body { white-space: pre-wrap; font-family: monospace; }\n");
    html.push_str(".hl-boundary { background-color: #FFFF00; }\n");
    html.push_str(".hl-step { background-color: #90EE90; }\n");
    html.push_str(".hl-data { background-color: #ADD8E6; }\n");
    html.push_str(".hl-result { background-color: #FFA500; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    for &(start, end, kind) in highlights.iter() {
        if start < last_pos {
            continue; // overlaps an earlier highlight
        }

        html.push_str(&escape(&text[last_pos..start]));
        html.push_str(&format!(
            "<span class=\"hl-{}\" title=\"Position: {}-{}, Type: {}\">",
            kind, start, end, kind
        ));
        html.push_str(&escape(&text[start..end]));
        html.push_str("</span>");

        last_pos = end;
    }

    // Add any remaining content
    html.push_str(&escape(&text[last_pos..]));
    html.push_str("\n</body>\n</html>");

    let mut file = File::create(path)?;
    file.write_all(html.as_bytes())?;

    tracing::info!("Saved annotated document to {}", path.display());
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotated_html_wraps_pattern_hits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotated.html");
        let text = "1 Funcional Acceso 1. Abrir la aplicación Se muestra el <resultado>.";

        create_annotated_html(text, &path, &PatternTable::spanish()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("class=\"hl-boundary\""));
        assert!(html.contains("class=\"hl-step\""));
        assert!(html.contains("class=\"hl-result\""));
        assert!(html.contains("&lt;resultado&gt;"), "markup must be escaped");
    }

    #[test]
    fn test_document_without_hits_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.html");

        create_annotated_html("texto sin patrones", &path, &PatternTable::spanish()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("texto sin patrones"));
        assert!(!html.contains("<span"));
    }
}
