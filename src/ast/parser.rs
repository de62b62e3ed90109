use crate::ast::{Operand, Operator, Term};
use log::debug;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./expression.pest"]
pub struct FunctionParser;

/// Strips all whitespace and folds letters to lower case.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FunctionParser {
    /// Parses an already normalized expression into its terms, in source order.
    /// Anything short of a full match is an error.
    pub fn parse_expression(input: &str) -> Result<Vec<Term>, String> {
        debug!("Parsing expression of {} bytes", input.len());
        let expression = FunctionParser::parse(Rule::expression, input)
            .map_err(|e| format!("Parse error: {}", e))?
            .next()
            .ok_or_else(|| "Failed to parse expression".to_string())?;

        let mut terms = Vec::new();
        let mut pending = None;
        for pair in expression.into_inner() {
            match pair.as_rule() {
                Rule::add | Rule::subtract | Rule::multiply | Rule::divide | Rule::power => {
                    pending = Some(Operator::try_from(pair.as_str())?);
                }
                Rule::variable | Rule::number => terms.push(Term {
                    operator: pending.take(),
                    operand: Self::build_operand(pair)?,
                }),
                Rule::EOI => {}
                _ => return Err(format!("Unexpected rule: {:?}", pair.as_rule())),
            }
        }

        if terms.is_empty() {
            return Err("Empty expression".to_string());
        }
        debug!("Parsed {} terms", terms.len());
        Ok(terms)
    }

    fn build_operand(pair: Pair<Rule>) -> Result<Operand, String> {
        match pair.as_rule() {
            Rule::variable => Ok(Operand::Variable),
            Rule::number => {
                let literal = pair.as_str().to_string();
                let value = literal
                    .parse::<f64>()
                    .map_err(|e| format!("Invalid number '{}': {}", literal, e))?;
                Ok(Operand::Number { value, literal })
            }
            _ => Err(format!("Unexpected operand: {:?}", pair.as_rule())),
        }
    }
}
