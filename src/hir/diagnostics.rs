//! Diagnostics: structured errors, warnings, and hints.
//!
//! Diagnostics are always attached to a parse result and never thrown. The
//! collector is a passive accumulator: insertion order is preserved and
//! nothing is deduplicated.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::base::Position;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Hint,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        }
    }
}

/// A diagnostic message with a 1-based location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Line (1-indexed).
    pub line: u32,
    /// Column (1-indexed).
    pub column: u32,
    pub message: String,
    /// Diagnostic code (e.g., "X001").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<SmolStr>,
}

impl Diagnostic {
    fn new(severity: Severity, position: Position, message: impl Into<String>) -> Self {
        Self {
            severity,
            line: position.line.max(1),
            column: position.column.max(1),
            message: message.into(),
            code: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, position, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, position, message)
    }

    /// Create a new hint diagnostic.
    pub fn hint(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Hint, position, message)
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(SmolStr::new(code));
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.severity.as_str())?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **X001-X099**: Errors (structure, lexing)
/// - **X101-X199**: Warnings and hints (tolerated but suspicious input)
pub mod codes {
    // ========================================================================
    // ERRORS (X001-X099)
    // ========================================================================

    /// `{` without a matching `}`.
    pub const UNTERMINATED_BLOCK: &str = "X001";
    /// `}` without a matching `{`.
    pub const UNMATCHED_BRACE: &str = "X002";
    /// String literal missing its closing quote.
    pub const UNTERMINATED_STRING: &str = "X003";
    /// Character the lexer does not recognise.
    pub const UNEXPECTED_CHARACTER: &str = "X004";

    // ========================================================================
    // WARNINGS AND HINTS (X101-X199)
    // ========================================================================

    /// No object keyword; function scheme assumed.
    pub const MISSING_KEYWORD: &str = "X101";
    /// Section not part of the scheme's vocabulary.
    pub const UNKNOWN_SECTION: &str = "X102";
    /// Scheme override string not recognised.
    pub const UNKNOWN_SCHEME_OVERRIDE: &str = "X103";
    /// Line inside a declaration block that is not a declaration.
    pub const UNRECOGNIZED_DECLARATION: &str = "X104";
    /// Later declaration replaces an earlier one with the same name.
    pub const DUPLICATE_DECLARATION: &str = "X105";
    /// `enum` input declared without values.
    pub const ENUM_WITHOUT_VALUES: &str = "X106";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during lexing and block parsing.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn unterminated_block(&mut self, open: Position) {
        self.add(
            Diagnostic::error(open, "unterminated block: missing closing '}'")
                .with_code(codes::UNTERMINATED_BLOCK),
        );
    }

    pub fn unmatched_brace(&mut self, at: Position) {
        self.add(
            Diagnostic::error(at, "unmatched '}' with no open block")
                .with_code(codes::UNMATCHED_BRACE),
        );
    }

    pub fn unterminated_string(&mut self, at: Position) {
        self.add(
            Diagnostic::error(at, "unterminated string literal")
                .with_code(codes::UNTERMINATED_STRING),
        );
    }

    pub fn unexpected_character(&mut self, at: Position, text: &str) {
        self.add(
            Diagnostic::error(at, format!("unexpected character '{}'", text))
                .with_code(codes::UNEXPECTED_CHARACTER),
        );
    }

    pub fn missing_keyword(&mut self, at: Position) {
        self.add(
            Diagnostic::hint(at, "no object keyword found; assuming function")
                .with_code(codes::MISSING_KEYWORD),
        );
    }

    pub fn unknown_section(&mut self, at: Position, name: &str, scheme: &str) {
        self.add(
            Diagnostic::hint(at, format!("unknown section '{}' for {}", name, scheme))
                .with_code(codes::UNKNOWN_SECTION),
        );
    }

    pub fn unknown_scheme_override(&mut self, name: &str) {
        self.add(
            Diagnostic::warning(
                Position::start(),
                format!("unknown scheme '{}'; detecting from content", name),
            )
            .with_code(codes::UNKNOWN_SCHEME_OVERRIDE),
        );
    }

    pub fn unrecognized_declaration(&mut self, at: Position, block: &str) {
        self.add(
            Diagnostic::hint(at, format!("unrecognized declaration in '{}' block", block))
                .with_code(codes::UNRECOGNIZED_DECLARATION),
        );
    }

    pub fn duplicate_declaration(&mut self, at: Position, name: &str) {
        self.add(
            Diagnostic::hint(
                at,
                format!("'{}' is declared again; the later declaration wins", name),
            )
            .with_code(codes::DUPLICATE_DECLARATION),
        );
    }

    pub fn enum_without_values(&mut self, at: Position, name: &str) {
        self.add(
            Diagnostic::warning(at, format!("enum '{}' has no values", name))
                .with_code(codes::ENUM_WITHOUT_VALUES),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Consume the collector, returning diagnostics in insertion order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
