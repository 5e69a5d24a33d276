//! Instruction dispatch loop.

use std::rc::Rc;

use bake_value::{
    evaluate_binary, invalid_jump, stack_overflow, stack_underflow, BinaryOp, EvalError,
    EvalResult, Value,
};
use tracing::trace;

use super::function::{make_function, CallContext};
use super::{Instruction, Program};
use crate::environment::Environment;

/// Mutable state of one running code sequence.
pub(super) struct Activation<'a> {
    pub(super) program: &'a Rc<Program>,
    pub(super) env: &'a mut Environment,
    pub(super) stack: &'a mut Vec<Value>,
    pub(super) calls: &'a Rc<CallContext>,
}

impl Activation<'_> {
    fn push(&mut self, value: Value) -> Result<(), EvalError> {
        let limit = self.calls.config.max_stack_depth;
        if self.stack.len() >= limit {
            return Err(stack_overflow(limit));
        }
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self, instruction: Instruction) -> EvalResult {
        self.stack
            .pop()
            .ok_or_else(|| stack_underflow(instruction))
    }

    fn peek(&self, instruction: Instruction) -> Result<&Value, EvalError> {
        self.stack
            .last()
            .ok_or_else(|| stack_underflow(instruction))
    }

    /// Pop the top `count` values, oldest first.
    fn pop_n(&mut self, count: usize, instruction: Instruction) -> Result<Vec<Value>, EvalError> {
        let len = self.stack.len();
        match len.checked_sub(count) {
            Some(start) => Ok(self.stack.split_off(start)),
            None => Err(stack_underflow(instruction)),
        }
    }

    fn binary(&mut self, op: BinaryOp, instruction: Instruction) -> Result<(), EvalError> {
        let right = self.pop(instruction)?;
        let left = self.pop(instruction)?;
        let result = evaluate_binary(&left, &right, op)?;
        self.push(result)
    }
}

fn jump_target(code: &[Instruction], target: usize) -> Result<usize, EvalError> {
    if target <= code.len() {
        Ok(target)
    } else {
        Err(invalid_jump(target))
    }
}

/// Run `code` to a `Return` (`Some(value)`) or off its end (`None`).
pub(super) fn run(
    code: &[Instruction],
    act: &mut Activation<'_>,
) -> Result<Option<Value>, EvalError> {
    let program = act.program;
    let mut pc = 0;

    while let Some(&instruction) = code.get(pc) {
        trace!(pc, ?instruction, stack = act.stack.len(), "dispatch");
        pc += 1;

        match instruction {
            // Constants
            Instruction::LoadStr(index) => act.push(Value::string(program.string(index)?))?,
            Instruction::LoadInt(index) => {
                act.push(Value::bigint(program.integer(index)?.clone()))?;
            }
            Instruction::LoadFloat(index) => act.push(Value::Float(program.float(index)?))?,
            Instruction::LoadLiteralInt(n) => act.push(Value::int(n))?,
            Instruction::LoadNil => act.push(Value::Nil)?,
            Instruction::LoadTrue => act.push(Value::TRUE)?,
            Instruction::LoadFalse => act.push(Value::FALSE)?,

            // Stack
            Instruction::Pop => {
                act.pop(instruction)?;
            }
            Instruction::Dup => {
                let top = act.peek(instruction)?.clone();
                act.push(top)?;
            }

            // Arithmetic
            Instruction::Add => act.binary(BinaryOp::Add, instruction)?,
            Instruction::Subtract => act.binary(BinaryOp::Subtract, instruction)?,
            Instruction::Multiply => act.binary(BinaryOp::Multiply, instruction)?,
            Instruction::Divide => act.binary(BinaryOp::Divide, instruction)?,
            Instruction::Modulo => act.binary(BinaryOp::Modulo, instruction)?,
            Instruction::InPlaceAdd => act.binary(BinaryOp::InPlaceAdd, instruction)?,
            Instruction::InPlaceSubtract => act.binary(BinaryOp::InPlaceSubtract, instruction)?,
            Instruction::Negate => {
                let operand = act.pop(instruction)?;
                act.push(operand.negate()?)?;
            }

            // Comparison and logic
            Instruction::Equal => act.binary(BinaryOp::Equal, instruction)?,
            Instruction::NotEqual => act.binary(BinaryOp::NotEqual, instruction)?,
            Instruction::Less => act.binary(BinaryOp::Less, instruction)?,
            Instruction::LessEqual => act.binary(BinaryOp::LessEqual, instruction)?,
            Instruction::Greater => act.binary(BinaryOp::Greater, instruction)?,
            Instruction::GreaterEqual => act.binary(BinaryOp::GreaterEqual, instruction)?,
            Instruction::Not => {
                let operand = act.pop(instruction)?;
                act.push(operand.logical_not())?;
            }

            // Names
            Instruction::LoadName(index) => {
                let value = act.env.get(program.string(index)?)?;
                act.push(value)?;
            }
            Instruction::StoreName(index) => {
                let value = act.pop(instruction)?;
                act.env.set(program.string(index)?, value)?;
            }
            Instruction::DeclareName(index) => {
                let value = act.pop(instruction)?;
                act.env.declare(program.string(index)?, value);
            }

            // Scopes
            Instruction::EnterScope => act.env.enter_scope(),
            Instruction::LeaveScope => act.env.leave_scope()?,

            // Containers
            Instruction::BuildList(count) => {
                let items = act.pop_n(count, instruction)?;
                act.push(Value::list(items))?;
            }
            Instruction::BuildSet(count) => {
                let items = act.pop_n(count, instruction)?;
                act.push(Value::set(items))?;
            }
            Instruction::BuildDict(count) => {
                let flat = count
                    .checked_mul(2)
                    .ok_or_else(|| stack_underflow(instruction))?;
                let mut items = act.pop_n(flat, instruction)?.into_iter();
                let mut pairs = Vec::with_capacity(count);
                while let (Some(key), Some(value)) = (items.next(), items.next()) {
                    pairs.push((key, value));
                }
                act.push(Value::dict(pairs))?;
            }
            Instruction::Subscript => {
                let key = act.pop(instruction)?;
                let receiver = act.pop(instruction)?;
                act.push(receiver.subscript(&key)?)?;
            }
            Instruction::StoreSubscript => {
                let value = act.pop(instruction)?;
                let key = act.pop(instruction)?;
                let receiver = act.pop(instruction)?;
                receiver.set_item(&key, value)?;
            }

            // Calls
            Instruction::Call(argc) => {
                let args = act.pop_n(argc, instruction)?;
                let callee = act.pop(instruction)?;
                act.push(callee.call(&args)?)?;
            }
            Instruction::MakeFunction(index) => {
                let func = make_function(program, index, act.env.current_scope(), act.calls)?;
                act.push(func)?;
            }
            Instruction::Return => return act.pop(instruction).map(Some),

            // Control
            Instruction::Jump(target) => pc = jump_target(code, target)?,
            Instruction::JumpIfFalse(target) => {
                if !act.pop(instruction)?.truth() {
                    pc = jump_target(code, target)?;
                }
            }
            Instruction::JumpIfTrue(target) => {
                if act.pop(instruction)?.truth() {
                    pc = jump_target(code, target)?;
                }
            }
            Instruction::JumpIfFalseOrPop(target) => {
                if act.peek(instruction)?.truth() {
                    act.pop(instruction)?;
                } else {
                    pc = jump_target(code, target)?;
                }
            }
            Instruction::JumpIfTrueOrPop(target) => {
                if act.peek(instruction)?.truth() {
                    pc = jump_target(code, target)?;
                } else {
                    act.pop(instruction)?;
                }
            }
        }
    }

    Ok(None)
}
