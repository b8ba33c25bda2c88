// src/extractors/patterns.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Compiled-in Spanish rules ---

/// Start of a line opening a new prose case ("<number> Funcional ...").
const CASE_BOUNDARY: &str = r"(?m)^\d+\s+Funcional";

/// Leading segment text up to (not including) the first "1." step marker.
const NAME_PREFIX: &str = r"^(.*?)\s*1\.";

/// One numbered procedural step.
const STEP_MARKER: &str = r"\d+\.";

/// Sentence starters that conventionally open precondition or result prose
/// and therefore terminate a step capture. Case-sensitive.
const STEP_STOP: &str = r"Usuario|Se\s|Los\s|La\s|El\s|—";

/// Precondition rules, highest priority first.
const SUPPORTING_DATA_RULES: [&str; 3] = [
    r"(?i)Usuario\s+(?:no\s+)?suscrito(?:\s+activo)?(?:\s+autenticado)?",
    r"(?i)Artículo\s+[^.]*",
    r"—", // Look & Feel cases carry no structured precondition
];

/// Expected-outcome rules, highest priority first. Each capture runs to the
/// next period or the end of the segment.
const EXPECTED_RESULT_RULES: [&str; 5] = [
    r"(?i)Se\s+(?:muestra|abre|muestran|inicia|permite|activa|visualiza|redirige|determina)[^.]*\.?",
    r"(?i)Los\s+íconos[^.]*\.?",
    r"(?i)La\s+(?:aplicación|redistribución)[^.]*\.?",
    r"(?i)El\s+(?:ícono|CTA|efecto|comportamiento|estatus|clic)[^.]*\.?",
    r"(?i)Imagen\s+destacada[^.]*\.?",
];

/// Token count for the name fallback when a segment has no step marker.
pub const NAME_FALLBACK_TOKENS: usize = 10;

static SPANISH_TABLE: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::from_rules(
        CASE_BOUNDARY,
        NAME_PREFIX,
        STEP_MARKER,
        STEP_STOP,
        &SUPPORTING_DATA_RULES,
        &EXPECTED_RESULT_RULES,
    )
    .expect("Failed to compile built-in Spanish pattern table")
});

// --- Pattern table ---

/// Immutable set of compiled extraction rules driving the prose parser.
/// The parser is a pure function of `(segment, PatternTable)`; tests can
/// inject substitute tables through [`PatternTable::from_rules`].
#[derive(Debug, Clone)]
pub struct PatternTable {
    pub case_boundary: Regex,
    pub name_prefix: Regex,
    pub step_marker: Regex,
    pub step_stop: Regex,
    pub supporting_data: Vec<Regex>,
    pub expected_result: Vec<Regex>,
}

impl PatternTable {
    /// The compiled-in Spanish rule set.
    pub fn spanish() -> Self {
        SPANISH_TABLE.clone()
    }

    /// Builds a table from raw rule strings. Any rule that fails to compile
    /// is rejected as [`ExtractError::Pattern`].
    pub fn from_rules(
        case_boundary: &str,
        name_prefix: &str,
        step_marker: &str,
        step_stop: &str,
        supporting_data: &[&str],
        expected_result: &[&str],
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            case_boundary: compile(case_boundary)?,
            name_prefix: compile(name_prefix)?,
            step_marker: compile(step_marker)?,
            step_stop: compile(step_stop)?,
            supporting_data: supporting_data
                .iter()
                .map(|rule| compile(rule))
                .collect::<Result<_, _>>()?,
            expected_result: expected_result
                .iter()
                .map(|rule| compile(rule))
                .collect::<Result<_, _>>()?,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex, ExtractError> {
    Regex::new(pattern).map_err(|e| ExtractError::Pattern(format!("'{}': {}", pattern, e)))
}

/// Evaluates an ordered rule list and returns the trimmed text of the first
/// rule that matches anywhere in `text`. Later rules are not consulted once
/// an earlier one has matched.
pub fn first_match(text: &str, rules: &[Regex]) -> Option<String> {
    rules
        .iter()
        .find_map(|re| re.find(text).map(|m| m.as_str().trim().to_string()))
}
