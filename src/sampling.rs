use crate::expression::CompiledExpression;
use log::debug;
use rayon::prelude::*;

/// Closed interval of x values to plot. Both bounds are finite and `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRange {
    lower: f64,
    upper: f64,
}

impl Default for PlotRange {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
        }
    }
}

// Next value above `v`: one unit when that is representable, otherwise the
// smallest relative step that still moves.
fn step_up(v: f64) -> f64 {
    let next = v + 1.0;
    if next > v {
        next
    } else {
        v + v.abs() * f64::EPSILON
    }
}

fn step_down(v: f64) -> f64 {
    let next = v - 1.0;
    if next < v {
        next
    } else {
        v - v.abs() * f64::EPSILON
    }
}

impl PlotRange {
    /// Builds a range, pushing `upper` above `lower` if the bounds are out of order.
    /// A non-finite bound gives the default range.
    pub fn new(lower: f64, upper: f64) -> Self {
        if !lower.is_finite() || !upper.is_finite() {
            Self::default()
        } else if lower >= upper {
            Self::above(lower)
        } else {
            Self { lower, upper }
        }
    }

    // Range starting at `lower`, or ending there when nothing finite lies above it.
    fn above(lower: f64) -> Self {
        let upper = step_up(lower);
        if upper.is_finite() {
            Self { lower, upper }
        } else {
            Self {
                lower: step_down(lower),
                upper: lower,
            }
        }
    }

    fn below(upper: f64) -> Self {
        let lower = step_down(upper);
        if lower.is_finite() {
            Self { lower, upper }
        } else {
            Self {
                lower: upper,
                upper: step_up(upper),
            }
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Moves the lower bound. If it reaches the upper bound, the upper bound follows.
    /// Non-finite values are ignored.
    pub fn with_lower(self, lower: f64) -> Self {
        if !lower.is_finite() {
            self
        } else if lower >= self.upper {
            Self::above(lower)
        } else {
            Self { lower, ..self }
        }
    }

    /// Moves the upper bound. If it reaches the lower bound, the lower bound follows.
    /// Non-finite values are ignored.
    pub fn with_upper(self, upper: f64) -> Self {
        if !upper.is_finite() {
            self
        } else if upper <= self.lower {
            Self::below(upper)
        } else {
            Self { upper, ..self }
        }
    }

    /// x coordinate of sample `i` out of `intervals`, evenly spaced and hitting both bounds.
    fn x_at(&self, i: usize, intervals: usize) -> f64 {
        let n = intervals as f64;
        let i = i as f64;
        ((n - i) * self.lower + i * self.upper) / n
    }

    /// Evaluates `expression` at `intervals + 1` evenly spaced points, in parallel.
    /// With zero intervals the single sample sits at the lower bound.
    pub fn sample(&self, expression: &CompiledExpression, intervals: usize) -> Samples {
        debug!(
            "Sampling {} over [{}, {}] with {} intervals",
            expression.evaluation_form(),
            self.lower,
            self.upper,
            intervals
        );
        if intervals == 0 {
            return Samples(vec![Sample::at(expression, self.lower)]);
        }

        let samples = (0..=intervals)
            .into_par_iter()
            .map(|i| Sample::at(expression, self.x_at(i, intervals)))
            .collect();
        Samples(samples)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    /// NaN where the expression is undefined.
    pub y: f64,
}

impl Sample {
    fn at(expression: &CompiledExpression, x: f64) -> Self {
        Self {
            x,
            y: expression.evaluate(x),
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.y.is_nan()
    }
}

/// Samples in increasing x order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples(Vec<Sample>);

impl Samples {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.0.iter()
    }

    /// Samples with a defined y value.
    pub fn defined(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.0.iter().filter(|s| s.is_defined())
    }

    pub fn into_vec(self) -> Vec<Sample> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Samples {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::compile;

    #[test]
    fn test_range_ordering() {
        let range = PlotRange::new(3.0, 1.0);
        assert_eq!((range.lower(), range.upper()), (3.0, 4.0));

        let range = PlotRange::new(-1.0, 1.0).with_lower(2.0);
        assert_eq!((range.lower(), range.upper()), (2.0, 3.0));

        let range = PlotRange::new(-1.0, 1.0).with_upper(-5.0);
        assert_eq!((range.lower(), range.upper()), (-6.0, -5.0));

        let range = PlotRange::default().with_upper(10.0);
        assert_eq!((range.lower(), range.upper()), (-1.0, 10.0));
    }

    #[test]
    fn test_non_finite_bounds() {
        assert_eq!(PlotRange::new(f64::NAN, 1.0), PlotRange::default());
        assert_eq!(PlotRange::new(0.0, f64::INFINITY), PlotRange::default());

        let range = PlotRange::new(0.0, 5.0);
        assert_eq!(range.with_lower(f64::NAN), range);
        assert_eq!(range.with_upper(f64::NEG_INFINITY), range);
    }

    #[test]
    fn test_ordering_survives_large_magnitudes() {
        let range = PlotRange::default().with_lower(1e17);
        assert_eq!(range.lower(), 1e17);
        assert!(range.lower() < range.upper());

        let range = PlotRange::default().with_upper(-1e17);
        assert_eq!(range.upper(), -1e17);
        assert!(range.lower() < range.upper());

        let range = PlotRange::new(f64::MAX, 0.0);
        assert!(range.lower() < range.upper());
        assert!(range.upper().is_finite());

        let range = PlotRange::new(0.0, 1.0).with_upper(f64::MIN);
        assert!(range.lower() < range.upper());
        assert!(range.lower().is_finite());
    }

    #[test]
    fn test_sample_hits_both_bounds() {
        let expression = compile("x^2").unwrap();
        let samples = PlotRange::default().sample(&expression, 200);
        assert_eq!(samples.len(), 201);

        let first = samples.iter().next().unwrap();
        let last = samples.iter().last().unwrap();
        assert_eq!((first.x, first.y), (-1.0, 1.0));
        assert_eq!((last.x, last.y), (1.0, 1.0));
        assert!(samples.iter().zip(samples.iter().skip(1)).all(|(a, b)| a.x < b.x));
    }

    #[test]
    fn test_undefined_points_are_kept_but_filterable() {
        let expression = compile("1/x").unwrap();
        let samples = PlotRange::new(-1.0, 1.0).sample(&expression, 4);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples.defined().count(), 4);
        assert!(!samples.into_vec()[2].is_defined());
    }

    #[test]
    fn test_zero_intervals() {
        let expression = compile("x+1").unwrap();
        let samples = PlotRange::new(2.0, 5.0).sample(&expression, 0);
        assert_eq!(samples.into_vec(), vec![Sample { x: 2.0, y: 3.0 }]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let expression = compile("x^3-2*x").unwrap();
        let range = PlotRange::new(-3.0, 7.0);
        let samples = range.sample(&expression, 1000);
        for (i, sample) in (&samples).into_iter().enumerate() {
            let x = range.x_at(i, 1000);
            assert_eq!(sample.x, x);
            assert_eq!(sample.y, expression.evaluate(x));
        }
    }
}
