use thiserror::Error;

/// Reason an expression could not be compiled.
///
/// The `Display` output is the message shown to the user in place of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CompilationError {
    #[error("Unsupported syntax or invalid input")]
    InvalidSyntax,
    #[error("Unsupported syntax or invalid input,\n parenthesis aren't supported")]
    ParenthesesUnsupported,
}

impl CompilationError {
    /// Classifies a rejection by looking at the text as the user typed it.
    pub fn rejected(original: &str) -> Self {
        if original.contains(['(', ')']) {
            CompilationError::ParenthesesUnsupported
        } else {
            CompilationError::InvalidSyntax
        }
    }
}
