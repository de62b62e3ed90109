pub mod ast;
pub mod cache;
pub mod config;
pub mod error;
pub mod expression;
pub mod sampling;

pub use ast::Function;
pub use cache::ExpressionCache;
pub use config::{Plot, PlotConfig};
pub use error::CompilationError;
pub use expression::{compile, CompiledExpression, ExpressionCompiler};
pub use sampling::{PlotRange, Sample, Samples};

/// Compiles `expression` and evaluates it once at `x`.
pub fn evaluate_expression(expression: &str, x: f64) -> Result<f64, CompilationError> {
    Ok(compile(expression)?.evaluate(x))
}
