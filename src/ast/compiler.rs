use crate::ast::{Operand, Operator, Term};
use log::trace;
use std::sync::Arc;

/// Instructions of the postfix program an expression is lowered to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    Push(f64),
    LoadVariable,
    Apply(Operator),
}

/// Callable form of a compiled expression, shareable across threads.
pub type Function = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

pub struct Compiler;

impl Compiler {
    /// Lowers a flat term sequence to postfix with the shunting-yard algorithm.
    /// Runs in a single loop, so input length is bounded by memory only.
    pub fn compile(terms: &[Term]) -> Program {
        let mut instructions = Vec::with_capacity(terms.len() * 2);
        let mut pending: Vec<Operator> = Vec::new();

        for term in terms {
            if let Some(operator) = term.operator {
                while let Some(&top) = pending.last() {
                    let binds_tighter = top.precedence() > operator.precedence()
                        || (top.precedence() == operator.precedence()
                            && !operator.is_right_associative());
                    if !binds_tighter {
                        break;
                    }
                    pending.pop();
                    instructions.push(Instruction::Apply(top));
                }
                pending.push(operator);
            }
            instructions.push(match &term.operand {
                Operand::Variable => Instruction::LoadVariable,
                Operand::Number { value, .. } => Instruction::Push(*value),
            });
        }
        while let Some(operator) = pending.pop() {
            instructions.push(Instruction::Apply(operator));
        }

        trace!("Compiled program of {} instructions", instructions.len());
        let max_depth = Self::depth(&instructions);
        Program {
            instructions: instructions.into(),
            max_depth,
        }
    }

    // Largest stack size reached while running the program.
    fn depth(instructions: &[Instruction]) -> usize {
        let (mut current, mut max) = (0usize, 0usize);
        for instruction in instructions {
            match instruction {
                Instruction::Push(_) | Instruction::LoadVariable => {
                    current += 1;
                    max = max.max(current);
                }
                Instruction::Apply(_) => current = current.saturating_sub(1),
            }
        }
        max
    }
}

/// Immutable postfix program. Every run gets its own stack, so one program can be
/// executed from any number of threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    instructions: Arc<[Instruction]>,
    max_depth: usize,
}

impl Program {
    /// Runs the program with `x` bound to the variable. Never panics: a malformed
    /// program yields NaN, like any other undefined result.
    pub fn execute(&self, x: f64) -> f64 {
        let mut stack: Vec<f64> = Vec::with_capacity(self.max_depth);
        for instruction in self.instructions.iter() {
            match instruction {
                Instruction::Push(value) => stack.push(*value),
                Instruction::LoadVariable => stack.push(x),
                Instruction::Apply(operator) => {
                    let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                        return f64::NAN;
                    };
                    stack.push(operator.apply(left, right));
                }
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(result), true) => result,
            _ => f64::NAN,
        }
    }

    #[cfg(test)]
    fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}
