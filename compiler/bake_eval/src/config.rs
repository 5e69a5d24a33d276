//! Machine limits.

/// Default operand-stack capacity.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 65_536;

/// Default nesting limit for compiled function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1_024;

/// Runtime limits enforced by the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Values the operand stack of one activation may hold.
    pub max_stack_depth: usize,
    /// Nested calls of compiled functions.
    pub max_call_depth: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
