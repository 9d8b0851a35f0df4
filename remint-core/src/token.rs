//! Token and directive types shared across the lexer, executor, and passes.
//!
//! Directive recognition is a pure function over a source suffix
//! ([`scan_paren`]), kept independent of the lexer's control flow so the
//! grammar can be tested on its own.

use serde::Serialize;

/// How many characters past an opening `(` the lexer will look for the
/// closing `)` before giving up and treating the `(` as literal text.
///
/// The bound covers the longest valid directive (`(cap, NNNNNN)`) with room
/// to spare, and is deliberately generous enough that a terminated-but-invalid
/// span of similar size is recognized as such and preserved verbatim rather
/// than re-scanned from the middle.
pub const DIRECTIVE_LOOKAHEAD: usize = 16;

/// The four structural token kinds buffered by the belt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Word,
    Punctuation,
    Space,
    Newline,
}

/// Provenance of a word's current value.
///
/// A word rewritten by an `(up …)` directive is tagged [`Uppercased`]; the
/// article corrector needs this to tell an up-cased one-letter article
/// (render as `AN`) apart from a literally capitalized one (render as `An`).
/// Tracking provenance as an attribute, instead of encoding it into the value
/// string, keeps the correction free of string-matching special cases.
///
/// [`Uppercased`]: TokenOrigin::Uppercased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenOrigin {
    Literal,
    Uppercased,
}

/// One lexical unit. Created by the lexer, mutated in place by directive
/// execution, destroyed when flushed to the output accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub origin: TokenOrigin,
}

impl Token {
    pub fn word(value: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Word,
            value: value.into(),
            origin: TokenOrigin::Literal,
        }
    }

    pub fn punctuation(c: char) -> Self {
        Self {
            kind: TokenKind::Punctuation,
            value: c.to_string(),
            origin: TokenOrigin::Literal,
        }
    }

    pub fn space() -> Self {
        Self {
            kind: TokenKind::Space,
            value: String::new(),
            origin: TokenOrigin::Literal,
        }
    }

    pub fn newline() -> Self {
        Self {
            kind: TokenKind::Newline,
            value: String::new(),
            origin: TokenOrigin::Literal,
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Directive names understood by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirectiveKind {
    /// Reinterpret the preceding word as base-16, rewrite as base-10.
    Hex,
    /// Reinterpret the preceding word as base-2, rewrite as base-10.
    Bin,
    /// Uppercase the preceding word(s).
    Up,
    /// Lowercase the preceding word(s).
    Low,
    /// Capitalize the preceding word(s).
    Cap,
}

/// A parsed directive. Exists only while the executor handles one closing
/// paren.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Word count for the case directives. `hex`/`bin` never carry one.
    pub count: Option<usize>,
}

impl Directive {
    /// Parse the text between the parens. Returns `None` for anything that
    /// is not a syntactically valid directive: unknown name, a count on
    /// `hex`/`bin`, or a count that is not a positive integer.
    pub fn parse(inner: &str) -> Option<Directive> {
        let mut parts = inner.splitn(2, ',');
        let name = parts.next()?.trim();
        let kind = match name {
            "hex" => DirectiveKind::Hex,
            "bin" => DirectiveKind::Bin,
            "up" => DirectiveKind::Up,
            "low" => DirectiveKind::Low,
            "cap" => DirectiveKind::Cap,
            _ => return None,
        };
        let count = match parts.next() {
            None => None,
            Some(raw) => {
                if matches!(kind, DirectiveKind::Hex | DirectiveKind::Bin) {
                    return None;
                }
                let n: usize = raw.trim().parse().ok()?;
                if n == 0 {
                    return None;
                }
                Some(n)
            }
        };
        Some(Directive { kind, count })
    }
}

/// Outcome of scanning a source suffix that starts at an opening `(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenScan {
    /// A valid directive and the bytes it spans, parens included.
    Directive(Directive, usize),
    /// A terminated span that is not a valid directive; the whole span
    /// (parens included) is carried through as literal text.
    Verbatim(usize),
    /// No closing paren within [`DIRECTIVE_LOOKAHEAD`] characters, or a
    /// newline intervened. Only the `(` itself is literal.
    Unterminated,
}

/// Scan `rest`, which must begin with `(`, for a directive span.
pub fn scan_paren(rest: &str) -> ParenScan {
    debug_assert!(rest.starts_with('('));
    let mut seen = 0;
    for (idx, c) in rest.char_indices().skip(1) {
        match c {
            ')' => {
                let consumed = idx + 1;
                return match Directive::parse(&rest[1..idx]) {
                    Some(directive) => ParenScan::Directive(directive, consumed),
                    None => ParenScan::Verbatim(consumed),
                };
            }
            '\n' => return ParenScan::Unterminated,
            _ => {
                seen += 1;
                if seen >= DIRECTIVE_LOOKAHEAD {
                    return ParenScan::Unterminated;
                }
            }
        }
    }
    ParenScan::Unterminated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_names() {
        assert_eq!(
            Directive::parse("hex"),
            Some(Directive {
                kind: DirectiveKind::Hex,
                count: None
            })
        );
        assert_eq!(
            Directive::parse("cap"),
            Some(Directive {
                kind: DirectiveKind::Cap,
                count: None
            })
        );
    }

    #[test]
    fn parses_counted_case_directives() {
        assert_eq!(
            Directive::parse("up, 3"),
            Some(Directive {
                kind: DirectiveKind::Up,
                count: Some(3)
            })
        );
        assert_eq!(
            Directive::parse("low,12"),
            Some(Directive {
                kind: DirectiveKind::Low,
                count: Some(12)
            })
        );
    }

    #[test]
    fn rejects_counts_on_radix_directives() {
        assert_eq!(Directive::parse("hex, 2"), None);
        assert_eq!(Directive::parse("bin,1"), None);
    }

    #[test]
    fn rejects_bad_names_and_counts() {
        assert_eq!(Directive::parse("upper"), None);
        assert_eq!(Directive::parse("up. 2"), None);
        assert_eq!(Directive::parse("up, 0"), None);
        assert_eq!(Directive::parse("up, two"), None);
        assert_eq!(Directive::parse(""), None);
    }

    #[test]
    fn scan_finds_valid_directive() {
        match scan_paren("(up, 3) rest") {
            ParenScan::Directive(d, consumed) => {
                assert_eq!(d.kind, DirectiveKind::Up);
                assert_eq!(d.count, Some(3));
                assert_eq!(consumed, "(up, 3)".len());
            }
            other => panic!("unexpected scan outcome: {:?}", other),
        }
    }

    #[test]
    fn scan_preserves_invalid_terminated_span() {
        assert_eq!(scan_paren("(up. 2) x"), ParenScan::Verbatim("(up. 2)".len()));
        assert_eq!(scan_paren("()"), ParenScan::Verbatim(2));
    }

    #[test]
    fn scan_gives_up_past_the_lookahead_bound() {
        let long = format!("({}hex)", "x".repeat(DIRECTIVE_LOOKAHEAD));
        assert_eq!(scan_paren(&long), ParenScan::Unterminated);
        assert_eq!(scan_paren("(hex"), ParenScan::Unterminated);
    }

    #[test]
    fn scan_stops_at_newlines() {
        assert_eq!(scan_paren("(up\n)"), ParenScan::Unterminated);
    }

    #[test]
    fn scan_covers_nested_invalid_spans() {
        // The whole outer span is consumed verbatim; the valid-looking inner
        // directive never fires.
        let rest = "(up. 2 b(up, 2))eautiful";
        assert_eq!(
            scan_paren(rest),
            ParenScan::Verbatim("(up. 2 b(up, 2)".len())
        );
    }
}
