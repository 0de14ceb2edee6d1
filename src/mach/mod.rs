/*!
## Machine Module

This Rust module executes ALPHA programs by token replay: the whole source
is tokenized once into a flat buffer and the grammar is walked directly over
it, moving a program counter instead of building a syntax tree.

*/

/// Index of a token in the program buffer.
pub type Address = usize;

mod program;
mod runtime;
mod sub;
mod var;

pub use program::Program;
pub use runtime::Console;
pub use runtime::Runtime;
pub use sub::Subs;
pub use var::Var;
