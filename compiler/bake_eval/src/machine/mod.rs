//! The stack machine.
//!
//! A [`Machine`] executes a [`Program`] against an operand stack and an
//! [`Environment`]. Every opcode pops its operands, calls into the value
//! protocol or the environment, and pushes at most one result. Failures
//! propagate out of [`Machine::execute`] unchanged; the machine never catches
//! them.
//!
//! ```text
//! let program = Program::new(vec![
//!     Instruction::LoadInt(0),
//!     Instruction::LoadInt(1),
//!     Instruction::Add,
//! ])
//! .with_integers([BigInt::from(2), BigInt::from(40)]);
//!
//! let mut machine = Machine::new(program);
//! machine.execute()?;
//! assert_eq!(machine.stack_top().map(Value::repr), Some("42".into()));
//! ```

mod builder;
mod exec;
mod function;
mod instruction;
mod program;

use std::rc::Rc;

use bake_value::{EvalResult, Value};
use tracing::debug;

pub use builder::MachineBuilder;
pub use instruction::Instruction;
pub use program::{FunctionProto, Program};

use crate::config::MachineConfig;
use crate::environment::Environment;
use crate::print_handler::SharedPrintHandler;
use exec::{run, Activation};
use function::CallContext;

pub struct Machine {
    program: Rc<Program>,
    env: Environment,
    /// Top-level operand stack; compiled calls run on their own stacks.
    stack: Vec<Value>,
    calls: Rc<CallContext>,
    print_handler: SharedPrintHandler,
}

impl Machine {
    /// A machine with default limits, stdout output and the prelude loaded.
    pub fn new(program: Program) -> Self {
        MachineBuilder::new(program).build()
    }

    pub fn builder(program: Program) -> MachineBuilder {
        MachineBuilder::new(program)
    }

    /// Run the top-level code.
    ///
    /// Returns the operand of a top-level `Return`, or `Nil` when execution
    /// runs off the end. In the latter case the operand stack is left as is
    /// for inspection.
    #[tracing::instrument(level = "debug", skip_all, fields(instructions = self.program.code.len()))]
    pub fn execute(&mut self) -> EvalResult {
        let program = Rc::clone(&self.program);
        let mut activation = Activation {
            program: &program,
            env: &mut self.env,
            stack: &mut self.stack,
            calls: &self.calls,
        };
        let result = run(&program.code, &mut activation)?;
        debug!(stack = self.stack.len(), returned = result.is_some(), "finished");
        Ok(result.unwrap_or(Value::Nil))
    }

    pub fn stack_top(&self) -> Option<&Value> {
        self.stack.last()
    }

    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> MachineConfig {
        self.calls.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Compiled function calls currently in progress.
    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }
}
