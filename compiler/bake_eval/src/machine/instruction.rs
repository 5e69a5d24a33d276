//! Instruction set.
//!
//! Operands are inline. Pool operands (`LoadStr`, `LoadInt`, `LoadFloat`,
//! name opcodes, `MakeFunction`) are indices into the [`Program`] tables;
//! jump operands are absolute instruction indices, where `code.len()` means
//! "stop".
//!
//! Stack effect of each opcode, top of stack rightmost:
//!
//! | opcode                      | pops                    | pushes   |
//! |-----------------------------|-------------------------|----------|
//! | loads, `MakeFunction`       | -                       | 1        |
//! | `Pop`                       | 1                       | -        |
//! | `Dup`                       | -                       | 1        |
//! | binary operators            | `left right`            | 1        |
//! | `Negate`, `Not`             | 1                       | 1        |
//! | `LoadName`                  | -                       | 1        |
//! | `StoreName`, `DeclareName`  | `value`                 | -        |
//! | `BuildList(n)`/`BuildSet(n)`| `n` items               | 1        |
//! | `BuildDict(n)`              | `n` key/value pairs     | 1        |
//! | `Subscript`                 | `receiver key`          | 1        |
//! | `StoreSubscript`            | `receiver key value`    | -        |
//! | `Call(n)`                   | `callee` + `n` args     | 1        |
//! | `Return`                    | `value`                 | -        |
//! | `JumpIfFalse`/`JumpIfTrue`  | `cond`                  | -        |
//! | `JumpIf*OrPop`              | `cond` if not jumping   | -        |
//!
//! [`Program`]: super::Program

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    // Constants
    LoadStr(usize),
    LoadInt(usize),
    LoadFloat(usize),
    /// Immediate integer, no pool lookup.
    LoadLiteralInt(i64),
    LoadNil,
    LoadTrue,
    LoadFalse,

    // Stack
    Pop,
    Dup,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    InPlaceAdd,
    InPlaceSubtract,
    Negate,

    // Comparison and logic
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,

    // Names (string pool index)
    LoadName(usize),
    /// Assign to the nearest enclosing declaration.
    StoreName(usize),
    /// Bind in the current scope.
    DeclareName(usize),

    // Scopes
    EnterScope,
    LeaveScope,

    // Containers
    BuildList(usize),
    BuildSet(usize),
    BuildDict(usize),
    Subscript,
    StoreSubscript,

    // Calls
    Call(usize),
    MakeFunction(usize),
    Return,

    // Control
    Jump(usize),
    JumpIfFalse(usize),
    JumpIfTrue(usize),
    /// `&&`: jump keeping a falsy condition, else pop it.
    JumpIfFalseOrPop(usize),
    /// `||`: jump keeping a truthy condition, else pop it.
    JumpIfTrueOrPop(usize),
}
