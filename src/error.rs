use thiserror::Error;

/// The header's column labels cannot be mapped to canonical fields, or a
/// data line's token count disagrees with the schema length. Always fatal
/// to the current parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown header label '{label}' at column {column}")]
    UnknownLabel { label: String, column: usize },

    #[error("line {line}: expected {expected} delimited fields, found {found}")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Structural violations: a malformed group header, content where a group
/// header was required, or input that ends mid-structure. Always fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: group header '{text}' is missing its sub-type parenthesis")]
    MalformedGroupHeader { line: usize, text: String },

    #[error("line {line}: expected a scheme-type group header, found '{text}'")]
    ExpectedGroupHeader { line: usize, text: String },

    #[error("unexpected end of input at line {line} while {reading}")]
    UnexpectedEof { line: usize, reading: &'static str },
}

/// Top-level error for one parse. Either kind aborts the parse; no partial
/// hierarchy is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
