//! # ALPHA
//!
//! An interpreter for the ALPHA teaching language.
//!
//! ALPHA is a small imperative language: every value is a signed integer,
//! every variable is global, and programs are a flat sequence of statements
//! separated by newlines. Run a program with `alpha hello.a`.
//!
//! ```text
//! { greet the user a few times }
//! program hello :
//!
//! sub greet :
//!     print "hello, world"
//!     return
//! endsub
//!
//! for i := 1 to 3 :
//!     call greet
//! endfor
//! end
//! ```
//!
//! There is no compilation step and no syntax tree. The source is tokenized
//! once into a flat buffer and executed by walking the grammar directly over
//! those tokens; loops re-read their body tokens on every iteration.
//! The [`lang`] module turns characters into tokens and the [`mach`] module
//! executes them.

pub mod lang;
pub mod mach;
pub mod term;
