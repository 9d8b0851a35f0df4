//! Base tokenization and the character-level directive scanner.
//!
//! Raw text is tokenized with logos into coarse lexical classes, then a
//! driver walks the spanned token list and feeds a [`TokenSink`] (normally
//! the belt executor). Word fragments accumulate in a buffer until a
//! separator flushes them, which is what lets a literal `(` or a preserved
//! invalid span glue onto the surrounding characters exactly as they
//! appeared in the source.
//!
//! The lexer has no failure mode: anything that does not parse as a
//! directive degrades to literal text.

use logos::Logos;
use serde::Serialize;
use std::mem;
use std::ops::Range;

use crate::belt::Engine;
use crate::token::{scan_paren, Directive, ParenScan, Token, TokenOrigin};

/// Coarse lexical classes produced by the logos pass.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[token("(")]
    OpenParen,

    #[regex(r"[,.!?;:]")]
    Punct,

    // Carriage returns fold into ordinary spacing so CRLF input degrades to
    // LF output instead of leaking \r into words.
    #[regex(r"[ \t\r]+")]
    Space,

    #[token("\n")]
    Newline,

    // Catch-all for everything that is not a separator or directive opener.
    #[regex(r"[^ \t\r\n,.!?;:(]+")]
    Text,
}

/// Receiver for the lexer's output stream.
pub trait TokenSink {
    fn token(&mut self, token: Token);
    fn directive(&mut self, directive: Directive);
}

impl TokenSink for Engine {
    fn token(&mut self, token: Token) {
        self.push(token);
    }

    fn directive(&mut self, directive: Directive) {
        self.execute(directive);
    }
}

/// Walk the source and feed tokens and directives into `sink`.
pub fn feed<S: TokenSink>(source: &str, sink: &mut S) {
    feed_tagged(source, sink, &[]);
}

/// Like [`feed`], but a word overlapping one of the `tagged` byte ranges of
/// `source` reaches the sink with uppercase provenance already set. The
/// chunk coordinator uses this to restore provenance recorded for the
/// carried overlap before re-feeding it.
pub fn feed_tagged<S: TokenSink>(source: &str, sink: &mut S, tagged: &[Range<usize>]) {
    let mut word = String::new();
    let mut word_start = 0;
    let mut lexer = RawToken::lexer(source);
    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        match raw {
            Ok(RawToken::OpenParen) => match scan_paren(&source[span.start..]) {
                ParenScan::Directive(directive, consumed) => {
                    flush_word(&mut word, word_start, tagged, sink);
                    sink.directive(directive);
                    lexer.bump(consumed - 1);
                }
                ParenScan::Verbatim(consumed) => {
                    if word.is_empty() {
                        word_start = span.start;
                    }
                    word.push_str(&source[span.start..span.start + consumed]);
                    lexer.bump(consumed - 1);
                }
                ParenScan::Unterminated => {
                    if word.is_empty() {
                        word_start = span.start;
                    }
                    word.push('(');
                }
            },
            Ok(RawToken::Punct) => {
                flush_word(&mut word, word_start, tagged, sink);
                // The class is single-char; chars() is never empty here.
                for c in source[span].chars() {
                    sink.token(Token::punctuation(c));
                }
            }
            Ok(RawToken::Space) => {
                flush_word(&mut word, word_start, tagged, sink);
                sink.token(Token::space());
            }
            Ok(RawToken::Newline) => {
                flush_word(&mut word, word_start, tagged, sink);
                sink.token(Token::newline());
            }
            Ok(RawToken::Text) | Err(()) => {
                if word.is_empty() {
                    word_start = span.start;
                }
                word.push_str(&source[span]);
            }
        }
    }
    flush_word(&mut word, word_start, tagged, sink);
}

fn flush_word<S: TokenSink>(word: &mut String, start: usize, tagged: &[Range<usize>], sink: &mut S) {
    if word.is_empty() {
        return;
    }
    let end = start + word.len();
    let mut token = Token::word(mem::take(word));
    if tagged.iter().any(|r| r.start < end && start < r.end) {
        token.origin = TokenOrigin::Uppercased;
    }
    sink.token(token);
}

/// One entry of the inspection stream produced by [`scan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LexEntry {
    Token(Token),
    Directive(Directive),
}

/// Lex the source into a flat entry list without executing anything.
/// This is the CLI's `--dump-tokens` surface.
pub fn scan(source: &str) -> Vec<LexEntry> {
    struct Collector(Vec<LexEntry>);
    impl TokenSink for Collector {
        fn token(&mut self, token: Token) {
            self.0.push(LexEntry::Token(token));
        }
        fn directive(&mut self, directive: Directive) {
            self.0.push(LexEntry::Directive(directive));
        }
    }
    let mut collector = Collector(Vec::new());
    feed(source, &mut collector);
    collector.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{DirectiveKind, TokenKind};

    fn entries(source: &str) -> Vec<LexEntry> {
        scan(source)
    }

    fn words(source: &str) -> Vec<String> {
        entries(source)
            .into_iter()
            .filter_map(|e| match e {
                LexEntry::Token(t) if t.kind == TokenKind::Word => Some(t.value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn splits_words_spaces_and_punctuation() {
        let got = entries("Hi, there");
        assert_eq!(
            got,
            vec![
                LexEntry::Token(Token::word("Hi")),
                LexEntry::Token(Token::punctuation(',')),
                LexEntry::Token(Token::space()),
                LexEntry::Token(Token::word("there")),
            ]
        );
    }

    #[test]
    fn newlines_are_structural() {
        let got = entries("a\nb");
        assert_eq!(
            got,
            vec![
                LexEntry::Token(Token::word("a")),
                LexEntry::Token(Token::newline()),
                LexEntry::Token(Token::word("b")),
            ]
        );
    }

    #[test]
    fn recognizes_directives_and_flushes_the_pending_word() {
        let got = entries("word(up, 2)");
        assert_eq!(
            got,
            vec![
                LexEntry::Token(Token::word("word")),
                LexEntry::Directive(Directive {
                    kind: DirectiveKind::Up,
                    count: Some(2)
                }),
            ]
        );
    }

    #[test]
    fn unterminated_paren_is_a_word_character() {
        assert_eq!(words("a (borrowed phrase"), vec!["a", "(borrowed", "phrase"]);
    }

    #[test]
    fn invalid_terminated_span_is_preserved_whole() {
        // The span glues onto the following text; its inner valid-looking
        // directive is part of the verbatim run and never fires.
        let got = entries("(up. 2 b(up, 2))eautiful");
        assert_eq!(
            got,
            vec![LexEntry::Token(Token::word("(up. 2 b(up, 2))eautiful"))]
        );
    }

    #[test]
    fn tagged_ranges_restore_word_provenance() {
        struct Sink(Vec<Token>);
        impl TokenSink for Sink {
            fn token(&mut self, token: Token) {
                self.0.push(token);
            }
            fn directive(&mut self, _: Directive) {}
        }
        let mut sink = Sink(Vec::new());
        feed_tagged("AN apple", &mut sink, &[0..2]);
        assert_eq!(sink.0[0].value, "AN");
        assert_eq!(sink.0[0].origin, TokenOrigin::Uppercased);
        assert_eq!(sink.0[2].origin, TokenOrigin::Literal);
    }

    #[test]
    fn crlf_folds_to_spacing_plus_newline() {
        let got = entries("a\r\nb");
        assert_eq!(
            got,
            vec![
                LexEntry::Token(Token::word("a")),
                LexEntry::Token(Token::space()),
                LexEntry::Token(Token::newline()),
                LexEntry::Token(Token::word("b")),
            ]
        );
    }

    #[test]
    fn directive_mid_text_resumes_after_span() {
        let got = entries("x (cap) y");
        assert_eq!(
            got,
            vec![
                LexEntry::Token(Token::word("x")),
                LexEntry::Token(Token::space()),
                LexEntry::Directive(Directive {
                    kind: DirectiveKind::Cap,
                    count: None
                }),
                LexEntry::Token(Token::space()),
                LexEntry::Token(Token::word("y")),
            ]
        );
    }
}
