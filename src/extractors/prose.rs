// src/extractors/prose.rs

// --- Imports ---
use crate::extractors::patterns::{first_match, PatternTable, NAME_FALLBACK_TOKENS};
use crate::extractors::record::TestCase;
use crate::utils::error::ExtractError;

/// Heuristic parser for free-text documents where each case is a block of
/// prose introduced by a numbered marker line. Field recovery is lexical
/// pattern matching, not a grammar; extraction is best-effort and a field
/// that fails to match stays empty.
pub struct ProseParser {
    patterns: PatternTable,
}

impl ProseParser {
    pub fn new(patterns: PatternTable) -> Self {
        Self { patterns }
    }

    /// Splits the document at case boundaries and extracts the four record
    /// fields from each segment independently, in document order.
    pub fn parse(&self, content: &str) -> Result<Vec<TestCase>, ExtractError> {
        let boundaries: Vec<usize> = self
            .patterns
            .case_boundary
            .find_iter(content)
            .map(|m| m.start())
            .collect();

        if boundaries.is_empty() {
            return Err(ExtractError::NoBoundariesFound(
                "no case-start marker lines in document".to_string(),
            ));
        }

        tracing::debug!("Found {} case boundaries", boundaries.len());
        if boundaries[0] > 0 {
            tracing::debug!(
                "Skipping {} bytes of preamble before the first case boundary",
                boundaries[0]
            );
        }

        let mut cases = Vec::new();
        for (i, &start) in boundaries.iter().enumerate() {
            let end = boundaries.get(i + 1).copied().unwrap_or(content.len());
            let segment = content[start..end].trim();
            if segment.is_empty() {
                continue;
            }

            // One malformed case must never abort the batch: a segment that
            // yields no usable fields is skipped with a diagnostic.
            match self.parse_segment(segment) {
                Some(case) => cases.push(case),
                None => tracing::warn!(
                    "Segment {} yielded no usable fields, skipping: {:?}",
                    i + 1,
                    preview(segment)
                ),
            }
        }

        Ok(cases)
    }

    /// Extracts one candidate record from a segment. Each field is
    /// independently optional; `None` means the segment failed the
    /// minimum-content invariant.
    fn parse_segment(&self, segment: &str) -> Option<TestCase> {
        let case = TestCase {
            name: self.extract_name(segment),
            sequence: self.extract_sequence(segment),
            supporting_data: first_match(segment, &self.patterns.supporting_data)
                .unwrap_or_default(),
            expected_result: first_match(segment, &self.patterns.expected_result)
                .unwrap_or_default(),
        };

        case.has_content().then_some(case)
    }

    /// The text before the first "1." step marker, or the leading tokens of
    /// the segment when no step marker exists.
    fn extract_name(&self, segment: &str) -> String {
        if let Some(caps) = self.patterns.name_prefix.captures(segment) {
            return caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
        }

        let words: Vec<&str> = segment.split_whitespace().collect();
        if words.len() > NAME_FALLBACK_TOKENS {
            words[..NAME_FALLBACK_TOKENS].join(" ")
        } else {
            segment.to_string()
        }
    }

    /// Concatenates every numbered step window. A window runs from one step
    /// marker to the next (or the segment end) and is cut short at the first
    /// stop anchor after the marker. When no anchor appears, trailing prose
    /// bleeds into the capture; that is accepted best-effort behavior.
    fn extract_sequence(&self, segment: &str) -> String {
        let markers: Vec<(usize, usize)> = self
            .patterns
            .step_marker
            .find_iter(segment)
            .map(|m| (m.start(), m.end()))
            .collect();

        let mut steps = Vec::new();
        for (i, &(start, marker_end)) in markers.iter().enumerate() {
            let window_end = markers
                .get(i + 1)
                .map(|&(next_start, _)| next_start)
                .unwrap_or(segment.len());
            let window = &segment[start..window_end];

            // Search for a stop anchor in the step body, past the marker itself.
            let body = marker_end - start;
            let cut = self
                .patterns
                .step_stop
                .find(&window[body..])
                .map(|m| body + m.start())
                .unwrap_or(window.len());

            let step = window[..cut].trim();
            if !step.is_empty() {
                steps.push(step);
            }
        }

        steps.join(" ")
    }
}

fn preview(segment: &str) -> String {
    segment.chars().take(60).collect()
}
