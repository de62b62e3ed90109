use crate::error::CompilationError;
use crate::expression::{compile, CompiledExpression, ExpressionCompiler};
use crate::sampling::{PlotRange, Samples};

/// What to plot and how densely.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub expression: String,
    pub range: PlotRange,
    /// Number of intervals; `intervals + 1` points are evaluated.
    pub intervals: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            expression: "x^2".to_string(),
            range: PlotRange::default(),
            intervals: 200,
        }
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub title: String,
    /// `None` when the expression did not compile.
    pub samples: Option<Samples>,
}

impl PlotConfig {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Self::default()
        }
    }

    pub fn with_range(self, range: PlotRange) -> Self {
        Self { range, ..self }
    }

    pub fn with_intervals(self, intervals: usize) -> Self {
        Self { intervals, ..self }
    }

    pub fn compile(&self) -> Result<CompiledExpression, CompilationError> {
        compile(&self.expression)
    }

    pub fn render(&self) -> Plot {
        let reader = ExpressionCompiler::new(&self.expression);
        let samples = reader
            .result()
            .ok()
            .map(|compiled| self.range.sample(compiled, self.intervals));
        Plot {
            title: reader.title(),
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plot() {
        let plot = PlotConfig::default().render();
        assert_eq!(plot.title, "$f\\ (x)={{x}^{2}}$");
        assert_eq!(plot.samples.map(|s| s.len()), Some(201));
    }

    #[test]
    fn test_invalid_plot_has_no_samples() {
        let plot = PlotConfig::new("x*(x)").render();
        assert_eq!(
            plot.title,
            "Unsupported syntax or invalid input,\n parenthesis aren't supported"
        );
        assert!(plot.samples.is_none());
    }

    #[test]
    fn test_builder() {
        let config = PlotConfig::new("1/x")
            .with_range(PlotRange::new(-2.0, 2.0))
            .with_intervals(4);
        assert!(config.compile().is_ok());
        let samples = config.render().samples.unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples.defined().count(), 4);
    }
}
