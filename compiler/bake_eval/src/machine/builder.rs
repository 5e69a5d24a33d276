//! `MachineBuilder` for creating machines with various configurations.

use std::rc::Rc;

use tracing::debug;

use super::function::CallContext;
use super::{Machine, Program};
use crate::builtins::register_prelude;
use crate::config::MachineConfig;
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Machine`].
///
/// Defaults: [`MachineConfig::default`], stdout output, a fresh root
/// environment, prelude registered.
pub struct MachineBuilder {
    program: Rc<Program>,
    config: MachineConfig,
    print_handler: Option<SharedPrintHandler>,
    env: Option<Environment>,
    prelude: bool,
}

impl MachineBuilder {
    pub fn new(program: Program) -> Self {
        Self::with_shared_program(Rc::new(program))
    }

    /// Start from a program already shared with other machines.
    pub fn with_shared_program(program: Rc<Program>) -> Self {
        MachineBuilder {
            program,
            config: MachineConfig::default(),
            print_handler: None,
            env: None,
            prelude: true,
        }
    }

    #[must_use]
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where `print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Run against a pre-populated environment instead of a fresh one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Skip declaring the builtins into the environment.
    #[must_use]
    pub fn without_prelude(mut self) -> Self {
        self.prelude = false;
        self
    }

    pub fn build(self) -> Machine {
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let mut env = self.env.unwrap_or_default();
        if self.prelude {
            register_prelude(&mut env, print_handler.clone());
        }
        debug!(
            instructions = self.program.code.len(),
            functions = self.program.functions.len(),
            prelude = self.prelude,
            "machine built"
        );
        Machine {
            program: self.program,
            env,
            stack: Vec::new(),
            calls: Rc::new(CallContext::new(self.config)),
            print_handler,
        }
    }
}
