//! Token belt and command executor.
//!
//! The belt is a bounded buffer of tokens with an output string accumulator
//! behind it. Tokens are pushed in source order; when the belt is full the
//! oldest half is drained through the spacing rule and the newer half stays
//! buffered, so directives always have a window of recent words to act on.
//!
//! Capacity is `4 ×` the configured overlap width. The margin guarantees a
//! directive referencing up to `overlap_words` preceding words is never cut
//! off by a mid-command flush.

use std::collections::VecDeque;
use std::mem;
use std::ops::Range;

use crate::rules;
use crate::token::{Directive, DirectiveKind, Token, TokenKind, TokenOrigin};

/// The engine output: the provisional string plus the byte ranges of words
/// whose value was produced by an `(up …)` directive. The article pass uses
/// the ranges to carry word provenance across the token/string boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub text: String,
    pub uppercased: Vec<Range<usize>>,
}

/// Bounded token buffer plus the incremental flush state.
pub struct Engine {
    belt: VecDeque<Token>,
    capacity: usize,
    out: String,
    uppercased: Vec<Range<usize>>,
}

impl Engine {
    /// `overlap_words` is the configured overlap width; the belt holds four
    /// times that many tokens.
    pub fn new(overlap_words: usize) -> Self {
        let capacity = (overlap_words * 4).max(4);
        Self {
            belt: VecDeque::with_capacity(capacity),
            capacity,
            out: String::new(),
            uppercased: Vec::new(),
        }
    }

    /// Append a token. A full belt drains its oldest half first.
    pub fn push(&mut self, token: Token) {
        if self.belt.len() == self.capacity {
            let drained: Vec<Token> = self.belt.drain(..self.capacity / 2).collect();
            for t in drained {
                self.emit(t);
            }
        }
        self.belt.push_back(token);
    }

    /// Execute a directive against the buffered words.
    ///
    /// The space that separated the directive from the word before it is
    /// dropped, so `"FF (hex)"` comes out as exactly `"255"`. Any space the
    /// source carries after the directive is tokenized normally and restores
    /// the separation.
    pub fn execute(&mut self, directive: Directive) {
        if matches!(self.belt.back(), Some(t) if t.kind == TokenKind::Space) {
            self.belt.pop_back();
        }
        match directive.kind {
            DirectiveKind::Hex => self.convert_last_word(16),
            DirectiveKind::Bin => self.convert_last_word(2),
            DirectiveKind::Up | DirectiveKind::Low | DirectiveKind::Cap => {
                let count = directive.count.unwrap_or(1);
                // Backward scan collects the most recent `count` words; the
                // reversed index list then applies the transform in
                // left-to-right source order.
                let mut targets: Vec<usize> = self
                    .belt
                    .iter()
                    .enumerate()
                    .rev()
                    .filter(|(_, t)| t.is_word())
                    .take(count)
                    .map(|(i, _)| i)
                    .collect();
                targets.reverse();
                for idx in targets {
                    let word = &mut self.belt[idx];
                    word.value = match directive.kind {
                        DirectiveKind::Up => rules::upper(&word.value),
                        DirectiveKind::Low => rules::lower(&word.value),
                        DirectiveKind::Cap => rules::capitalize(&word.value),
                        _ => unreachable!(),
                    };
                    if directive.kind == DirectiveKind::Up {
                        word.origin = TokenOrigin::Uppercased;
                    }
                }
            }
        }
    }

    fn convert_last_word(&mut self, radix: u32) {
        if let Some(word) = self.belt.iter_mut().rev().find(|t| t.is_word()) {
            if let Some(decimal) = rules::to_decimal(&word.value, radix) {
                word.value = decimal;
            }
        }
    }

    /// Drain everything left in the belt and hand back the accumulated
    /// output.
    pub fn finish(mut self) -> Emitted {
        while let Some(token) = self.belt.pop_front() {
            self.emit(token);
        }
        Emitted {
            text: mem::take(&mut self.out),
            uppercased: mem::take(&mut self.uppercased),
        }
    }

    /// Spacing rule. Words and spaces get a single separating space unless
    /// the output already ends in whitespace (or is empty); punctuation
    /// strips one trailing space and attaches directly; newlines are written
    /// verbatim.
    fn emit(&mut self, token: Token) {
        match token.kind {
            TokenKind::Word => {
                if needs_separator(&self.out) {
                    self.out.push(' ');
                }
                let start = self.out.len();
                self.out.push_str(&token.value);
                if token.origin == TokenOrigin::Uppercased {
                    self.uppercased.push(start..self.out.len());
                }
            }
            TokenKind::Space => {
                if needs_separator(&self.out) {
                    self.out.push(' ');
                }
            }
            TokenKind::Punctuation => {
                if self.out.ends_with(' ') {
                    self.out.pop();
                }
                self.out.push_str(&token.value);
            }
            TokenKind::Newline => self.out.push('\n'),
        }
    }
}

fn needs_separator(out: &str) -> bool {
    match out.chars().last() {
        None => false,
        Some(c) => !c.is_whitespace(),
    }
}
