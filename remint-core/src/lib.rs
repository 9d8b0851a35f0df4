//! # remint-core
//!
//! Engine for rewriting plain text according to inline directives.
//!
//! A directive is a parenthesized instruction embedded in the text, e.g.
//! `(hex)`, `(bin)`, `(up)`, `(low)`, `(cap)` or `(up, 3)`. Directives act on
//! the words that precede them and are consumed in the process; anything
//! inside parentheses that does not match the directive grammar passes
//! through untouched.
//!
//! Processing runs as a fixed sequence of stages, each taking the previous
//! stage's output:
//!
//!     1. Base tokenization + directive execution. The [lexer] scans the raw
//!        text with a logos lexer and feeds the [belt] executor, a bounded
//!        token buffer that applies directives to buffered words and flushes
//!        to a string accumulator under capacity pressure.
//!     2. Article correction ([articles]). `a`/`an` agreement against the
//!        following word, line by line.
//!     3. Quote repositioning ([quotes]). Opening quotes attach to the
//!        following content, closing quotes to the preceding content.
//!
//! The composition of all three is [`transform`], which is stateless: callers
//! that need to process inputs larger than memory drive it repeatedly through
//! the [chunk] coordinator, which reads bounded windows and carries a small
//! word overlap between them so that directives near a window boundary still
//! see the words they refer to.

pub mod articles;
pub mod belt;
pub mod chunk;
pub mod error;
pub mod lexer;
pub mod pipeline;
pub mod quotes;
pub mod rules;
pub mod token;

pub use chunk::{process_file, ChunkOptions};
pub use error::ProcessError;
pub use pipeline::transform;
pub use token::{Directive, DirectiveKind, Token, TokenKind, TokenOrigin};
