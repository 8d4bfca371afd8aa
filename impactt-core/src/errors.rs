use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing parameter: {0}")]
    MissingParameter(String),
    #[error("empty placeholder at byte {0}")]
    EmptyPlaceholder(usize),
    #[error("unterminated placeholder starting at byte {0}")]
    UnterminatedPlaceholder(usize),
    #[error("unmatched '}}' at byte {0} (escape a literal brace as '}}}}')")]
    UnmatchedBrace(usize),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("table has no rows")]
    Empty,
    #[error("line {line}: {token:?} is not a number")]
    BadNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("no column named {0:?}")]
    NoSuchColumn(String),
}
