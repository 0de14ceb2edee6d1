use super::Address;
use crate::lang::{lex, Error, Token};

/// ## The token buffer
///
/// The entire program as one flat token sequence, materialized once at load
/// time and read-only afterwards. The buffer always ends with exactly one
/// `Eof` token, and `token()` clamps its index there, so a cursor can never
/// run off the end.
pub struct Program {
    tokens: Vec<Token>,
    errors: Vec<Error>,
}

impl Program {
    pub fn load(source: &str) -> Program {
        let (tokens, errors) = lex(source);
        Program { tokens, errors }
    }

    /// Lexical diagnostics gathered while loading. A program that produced
    /// any is not runnable; the front-end reports them and stops.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn token(&self, pc: Address) -> &Token {
        &self.tokens[pc.min(self.tokens.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}
