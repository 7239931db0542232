//! Diagnostic presentation for the command line.
//!
//! This module provides:
//! - Conversion of parse errors and checker diagnostics into one printable form
//! - "Did you mean" suggestions with fuzzy name matching
//! - Pretty output with source snippets, or JSON output for tooling

use colored::*;
use serde::Serialize;
use tc_ast::Span;
use tc_parse::ParseError;
use tc_typeck::Diagnostic as TypeDiagnostic;

/// A single printable error.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub span: Option<Span>,
    pub source_file: String,
    pub suggestion: Option<String>,
    pub code: Option<String>,
}

/// Names in scope that suggestions are drawn from.
#[derive(Debug, Clone, Default)]
pub struct KnownNames {
    pub functions: Vec<String>,
    pub types: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, source_file: String) -> Self {
        Self {
            message,
            span: None,
            source_file,
            suggestion: None,
            code: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_code(mut self, code: String) -> Self {
        self.code = Some(code);
        self
    }

    /// Convert a ParseError to a Diagnostic.
    pub fn from_parse_error(error: &ParseError, source_file: String) -> Self {
        Self::error(format!("Parse Error: {error}"), source_file)
            .with_span(error.span())
            .with_code("P001".to_string())
    }

    /// Convert a checker diagnostic, attaching a suggestion when a close name exists.
    pub fn from_type_diagnostic(
        diagnostic: &TypeDiagnostic,
        source_file: String,
        known: &KnownNames,
    ) -> Self {
        let suggestion = match diagnostic {
            TypeDiagnostic::UnknownFunction { name, .. } => {
                suggest_similar_name(name, &known.functions)
                    .map(|similar| format!("a function named `{similar}` is declared"))
            }
            TypeDiagnostic::UnknownType { tag, .. } => suggest_similar_name(tag, &known.types)
                .map(|similar| format!("did you mean the type `{similar}`?")),
            TypeDiagnostic::TypeMismatch { .. } | TypeDiagnostic::PropertyMismatch { .. } => None,
        };

        let diag = Self::error(diagnostic.to_string(), source_file)
            .with_span(diagnostic.span())
            .with_code(diagnostic.code().to_string());

        match suggestion {
            Some(s) => diag.with_suggestion(s),
            None => diag,
        }
    }
}

/// Configuration for diagnostic output.
#[derive(Debug, Clone)]
pub struct DiagnosticConfig {
    /// Enable colored output.
    pub use_colors: bool,
    /// Output as JSON.
    pub json_output: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            use_colors: std::env::var("NO_COLOR").is_err(),
            json_output: false,
        }
    }
}

/// Compute Levenshtein distance between two strings for fuzzy matching.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, c1) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, c2) in b.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest a similar name from available names using fuzzy matching.
///
/// Returns the most similar name within edit distance of 2, or None.
pub fn suggest_similar_name(typo: &str, available: &[String]) -> Option<String> {
    available
        .iter()
        .filter(|name| levenshtein_distance(typo, name) <= 2)
        .min_by_key(|name| levenshtein_distance(typo, name))
        .cloned()
}

/// Print diagnostics with pretty formatting to stderr, or as JSON to stdout.
pub fn print_diagnostics(diagnostics: &[Diagnostic], source: &str, config: &DiagnosticConfig) {
    if config.json_output {
        print_diagnostics_json(diagnostics);
        return;
    }

    for diag in diagnostics {
        print_diagnostic(diag, source, config);
    }

    if !diagnostics.is_empty() {
        let summary = format!("{} error(s)", diagnostics.len());
        if config.use_colors {
            eprintln!("{}", summary.bold());
        } else {
            eprintln!("{summary}");
        }
    }
}

/// Print a single diagnostic with pretty formatting.
pub fn print_diagnostic(diagnostic: &Diagnostic, source: &str, config: &DiagnosticConfig) {
    let header = match &diagnostic.code {
        Some(code) => format!("✗ [{code}] {}", diagnostic.message),
        None => format!("✗ {}", diagnostic.message),
    };
    if config.use_colors {
        eprintln!("{}", header.red().bold());
    } else {
        eprintln!("{header}");
    }

    if let Some(span) = diagnostic.span {
        print_source_snippet(source, &diagnostic.source_file, span, config);
    }

    if let Some(suggestion) = &diagnostic.suggestion {
        let help_msg = format!("help: {suggestion}");
        if config.use_colors {
            eprintln!("{}", help_msg.green());
        } else {
            eprintln!("{help_msg}");
        }
    }

    eprintln!();
}

fn print_diagnostics_json(diagnostics: &[Diagnostic]) {
    let json = serde_json::to_string_pretty(diagnostics)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize diagnostics: {e}\"}}"));
    println!("{json}");
}

/// Print a source snippet with location marker.
fn print_source_snippet(source: &str, file_path: &str, span: Span, config: &DiagnosticConfig) {
    let (line_num, col_num, line_text) = extract_line_info(source, span);

    let location = format!("  ┌─ {file_path}:{line_num}:{col_num}");
    if config.use_colors {
        eprintln!("{}", location.blue());
    } else {
        eprintln!("{location}");
    }
    eprintln!("  │");

    let line_num_str = format!("{line_num:>3}");
    if config.use_colors {
        eprintln!("{} │ {line_text}", line_num_str.blue());
    } else {
        eprintln!("{line_num_str} │ {line_text}");
    }

    let line_len = line_text.chars().count();
    let span_len = (span.end.saturating_sub(span.start) as usize)
        .clamp(1, (line_len + 1).saturating_sub(col_num).max(1));
    let carets = "^".repeat(span_len);
    let padding = " ".repeat(col_num - 1);
    if config.use_colors {
        eprintln!("    │ {padding}{}", carets.red().bold());
    } else {
        eprintln!("    │ {padding}{carets}");
    }
}

/// Extract line number, column number, and line text for a given span.
pub fn extract_line_info(source: &str, span: Span) -> (usize, usize, String) {
    let start_offset = span.start as usize;

    let mut line_num = 1;
    let mut col_num = 1;
    let mut line_start_offset = 0;

    for (offset, ch) in source.char_indices() {
        if offset >= start_offset {
            break;
        }
        if ch == '\n' {
            line_num += 1;
            col_num = 1;
            line_start_offset = offset + 1;
        } else {
            col_num += 1;
        }
    }

    let line_end_offset = source[line_start_offset..]
        .find('\n')
        .map(|pos| line_start_offset + pos)
        .unwrap_or(source.len());

    let line_text = source[line_start_offset..line_end_offset].to_string();

    (line_num, col_num, line_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance_identical() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_distance_edits() {
        assert_eq!(levenshtein_distance("hello", "helo"), 1);
        assert_eq!(levenshtein_distance("nam", "name"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("héllo", "hello"), 1);
    }

    #[test]
    fn test_suggest_similar_name() {
        let available = vec!["present".to_string(), "plot".to_string()];
        assert_eq!(
            suggest_similar_name("presnt", &available),
            Some("present".to_string())
        );
        assert_eq!(suggest_similar_name("missing", &available), None);
    }

    #[test]
    fn test_from_type_diagnostic_suggests_function() {
        let diag = TypeDiagnostic::UnknownFunction {
            name: "scal".to_string(),
            span: Span::new(4, 8),
        };
        let known = KnownNames {
            functions: vec!["scale".to_string()],
            types: vec![],
        };
        let converted = Diagnostic::from_type_diagnostic(&diag, "a.tc".to_string(), &known);
        assert_eq!(converted.message, r#"Function "scal" does not exist"#);
        assert_eq!(converted.code.as_deref(), Some("TC001"));
        assert_eq!(converted.span, Some(Span::new(4, 8)));
        assert!(converted.suggestion.unwrap().contains("`scale`"));
    }

    #[test]
    fn test_from_type_diagnostic_suggests_type() {
        let diag = TypeDiagnostic::UnknownType {
            tag: "numbr".to_string(),
            param: "a".to_string(),
            span: Span::default(),
        };
        let known = KnownNames {
            functions: vec![],
            types: vec!["number".to_string(), "Person".to_string()],
        };
        let converted = Diagnostic::from_type_diagnostic(&diag, "a.tc".to_string(), &known);
        assert!(converted.suggestion.unwrap().contains("`number`"));
    }

    #[test]
    fn test_from_parse_error() {
        let error = ParseError::Invalid {
            message: "unterminated function body".into(),
            span: Span::new(5, 6),
        };
        let diag = Diagnostic::from_parse_error(&error, "a.tc".to_string());
        assert_eq!(diag.code.as_deref(), Some("P001"));
        assert!(diag.message.starts_with("Parse Error:"));
        assert_eq!(diag.span, Some(Span::new(5, 6)));
    }

    #[test]
    fn test_extract_line_info() {
        let source = "fn(1);\nfunction fn(a: number) {}\n";
        let (line, col, text) = extract_line_info(source, Span::new(16, 17));
        assert_eq!(line, 2);
        assert_eq!(col, 10);
        assert_eq!(text, "function fn(a: number) {}");
    }
}
