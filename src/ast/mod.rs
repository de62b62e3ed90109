use std::fmt;

mod compiler;
mod parser;

pub use compiler::*;
pub use parser::{normalize, FunctionParser as Parser};

/// Name of the single free variable, after case folding.
pub const VARIABLE: &str = "x";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Applies the operator. Undefined results come back as NaN instead of an error,
    /// so a plot can simply skip the point.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    f64::NAN
                } else {
                    left / right
                }
            }
            Operator::Power => power(left, right),
        }
    }

    /// Binding strength: `^` over `*` `/` over `+` `-`.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 3,
        }
    }

    /// Only `^` groups to the right: 2^3^2 is 2^(3^2).
    pub fn is_right_associative(&self) -> bool {
        matches!(self, Operator::Power)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
        }
    }
}

// Complex intermediates are not modelled: a negative base with a fractional
// exponent is undefined, as are 0^-n and finite operands overflowing.
fn power(base: f64, exponent: f64) -> f64 {
    if base == 0.0 && exponent < 0.0 {
        return f64::NAN;
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return f64::NAN;
    }
    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        f64::NAN
    } else {
        result
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "^" => Ok(Operator::Power),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Variable,
    /// A numeral, signed or not. `literal` is the normalized source text.
    Number { value: f64, literal: String },
}

impl Operand {
    pub fn is_negative_number(&self) -> bool {
        matches!(self, Operand::Number { literal, .. } if literal.starts_with('-'))
    }

    /// Source text as shown to the user.
    pub fn literal(&self) -> &str {
        match self {
            Operand::Variable => VARIABLE,
            Operand::Number { literal, .. } => literal,
        }
    }
}

/// One operand together with the operator written before it.
/// The first term of an expression has no operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub operator: Option<Operator>,
    pub operand: Operand,
}

/// Renders terms in grouped-term notation: `x^-3` becomes `{{x}^{-3}}`.
pub fn display_string(terms: &[Term]) -> String {
    let mut out = String::from("{");
    for term in terms {
        if let Some(operator) = term.operator {
            out.push_str(operator.symbol());
        }
        out.push('{');
        out.push_str(term.operand.literal());
        out.push('}');
    }
    out.push('}');
    out
}

/// Renders terms with negative numerals grouped, e.g. `x^(-3)`.
pub fn evaluation_form(terms: &[Term]) -> String {
    let mut out = String::new();
    for term in terms {
        if let Some(operator) = term.operator {
            out.push_str(operator.symbol());
        }
        if term.operand.is_negative_number() {
            out.push('(');
            out.push_str(term.operand.literal());
            out.push(')');
        } else {
            out.push_str(term.operand.literal());
        }
    }
    out
}
