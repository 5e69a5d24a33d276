//! Bake Eval - stack machine for the bake runtime.
//!
//! This crate runs instruction streams produced by an external front end.
//!
//! # Architecture
//!
//! - `Environment`: lexical scope chain of `Scope` frames
//! - `Program` / `Instruction`: the loaded instruction stream and its constant pools
//! - `Machine`: operand stack plus dispatch loop; compiled functions are
//!   ordinary `Func` values closing over their defining scope
//! - `register_prelude`: `nil`, `true`, `false`, `print` and the conversions
//! - `PrintHandlerImpl`: where `print` writes
//!
//! # Re-exports
//!
//! Value types and error constructors are re-exported from `bake_value`.

mod builtins;
mod config;
mod environment;
mod machine;
mod print_handler;

pub use bake_value::{
    arity_mismatch, call_depth_exceeded, constant_out_of_range, invalid_jump, scope_underflow,
    stack_overflow, stack_underflow, type_mismatch, undefined_name, EvalError, EvalErrorKind,
    EvalResult, Kind, Value,
};

pub use builtins::{
    function_val_float, function_val_int, function_val_len, function_val_repr, function_val_str,
    register_prelude,
};
pub use config::{MachineConfig, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_STACK_DEPTH};
pub use environment::{Environment, LocalScope, Scope};
pub use machine::{FunctionProto, Instruction, Machine, MachineBuilder, Program};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=bake_eval=debug` for calls and scopes or `RUST_LOG=bake_eval=trace`
/// for every dispatched instruction.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
