//! Scanner front end for a tree-walking Lox interpreter.
//!
//! [`lexer::scan`] turns source text into tokens, sending every problem it
//! finds to a [`diagnostics::Reporter`] and carrying on.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod token;

pub use diagnostics::{Diagnostic, Diagnostics, Reporter};
pub use lexer::scan;
pub use token::{Kind, Literal, Token};
