use crate::ast::{self, Compiler, Function, Parser, Program, Term};
use crate::error::CompilationError;
use log::debug;
use std::sync::Arc;

/// Validates and compiles `text` into an evaluator and its display form.
///
/// Whitespace is ignored and `X` is accepted for `x`. On success the result owns
/// everything it needs, so it can outlive `text` and be shared between threads.
pub fn compile(text: &str) -> Result<CompiledExpression, CompilationError> {
    let normalized = ast::normalize(text);
    let terms = Parser::parse_expression(&normalized).map_err(|e| {
        debug!("Rejected expression: {}", e);
        CompilationError::rejected(text)
    })?;

    let program = Compiler::compile(&terms);
    let display = ast::display_string(&terms);
    let evaluation_form = ast::evaluation_form(&terms);
    debug!("Compiled expression of {} terms", terms.len());

    Ok(CompiledExpression {
        inner: Arc::new(Inner {
            terms,
            display,
            evaluation_form,
        }),
        program,
    })
}

#[derive(Debug, PartialEq)]
struct Inner {
    terms: Vec<Term>,
    display: String,
    evaluation_form: String,
}

/// A successfully compiled expression. Cloning is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    inner: Arc<Inner>,
    program: Program,
}

impl CompiledExpression {
    /// Evaluates the expression at `x`. Undefined points return NaN.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.program.execute(x)
    }

    /// Detached evaluator closure.
    pub fn function(&self) -> Function {
        let program = self.program.clone();
        Arc::new(move |x| program.execute(x))
    }

    /// Grouped-term rendering, e.g. `{{x}^{-3}}`.
    pub fn display_string(&self) -> &str {
        &self.inner.display
    }

    /// Normalized text with negative numerals grouped, e.g. `x^(-3)`.
    pub fn evaluation_form(&self) -> &str {
        &self.inner.evaluation_form
    }

    pub fn terms(&self) -> &[Term] {
        &self.inner.terms
    }
}

/// Compilation outcome for one input string. Build a new one to re-parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionCompiler {
    outcome: Result<CompiledExpression, CompilationError>,
}

impl ExpressionCompiler {
    pub fn new(text: &str) -> Self {
        Self {
            outcome: compile(text),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn function(&self) -> Option<Function> {
        self.outcome.as_ref().ok().map(CompiledExpression::function)
    }

    pub fn display_string(&self) -> Option<&str> {
        self.outcome
            .as_ref()
            .ok()
            .map(CompiledExpression::display_string)
    }

    pub fn error_message(&self) -> Option<String> {
        self.outcome.as_ref().err().map(ToString::to_string)
    }

    /// Plot title: `$f\ (x)={display}$` when valid, the error message otherwise.
    pub fn title(&self) -> String {
        match &self.outcome {
            Ok(compiled) => format!("$f\\ (x)={}$", compiled.display_string()),
            Err(e) => e.to_string(),
        }
    }

    pub fn result(&self) -> Result<&CompiledExpression, CompilationError> {
        self.outcome.as_ref().map_err(|e| *e)
    }

    pub fn into_result(self) -> Result<CompiledExpression, CompilationError> {
        self.outcome
    }
}
