/*!
# Language Module

This Rust module provides lexical analysis of the ALPHA language.

*/

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use token::Literal;
pub use token::Operator;
pub use token::Token;
pub use token::Word;

/// Source line for a lexical diagnostic. `None` when no position is known.
pub type LineNumber = Option<usize>;
