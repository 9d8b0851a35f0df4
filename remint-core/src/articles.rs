//! Article correction pass.
//!
//! Second pass over the engine's emitted string. Each `a`/`an` (matched
//! case-insensitively) is checked against the first letter of the following
//! word on the same line: vowels and `h` take the `an` form, everything else
//! the `a` form. The original casing pattern is preserved; the UPPERCASE
//! pattern for a one-letter article is known only through the provenance
//! ranges recorded by the executor.

use std::ops::Range;

/// Correct articles line by line, preserving newline structure exactly.
/// `uppercased` are byte ranges (into `text`) of words the `(up …)`
/// directive produced; the second return value is the same set of ranges
/// remapped into the corrected string, so provenance survives this pass.
pub fn correct(text: &str, uppercased: &[Range<usize>]) -> (String, Vec<Range<usize>>) {
    let mut out = String::with_capacity(text.len());
    let mut remapped = Vec::with_capacity(uppercased.len());
    let mut base = 0;
    let mut first = true;
    for line in text.split('\n') {
        if !first {
            out.push('\n');
        }
        first = false;
        correct_line(line, base, uppercased, &mut out, &mut remapped);
        base += line.len() + 1;
    }
    (out, remapped)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CasePattern {
    Lower,
    Capitalized,
    Upper,
}

fn correct_line(
    line: &str,
    base: usize,
    uppercased: &[Range<usize>],
    out: &mut String,
    remapped: &mut Vec<Range<usize>>,
) {
    let words = word_spans(line);
    let mut cursor = 0;
    for (i, &(start, word)) in words.iter().enumerate() {
        out.push_str(&line[cursor..start]);
        cursor = start + word.len();
        let out_start = out.len();
        let replacement = corrected_article(word, base + start, words.get(i + 1), uppercased);
        match replacement {
            Some(r) => out.push_str(r),
            None => out.push_str(word),
        }
        // Engine word values always begin at a word start, so matching on
        // the start byte is exact. A replaced article was a bare word; its
        // remapped range covers the replacement.
        if let Some(range) = uppercased.iter().find(|r| r.start == base + start) {
            let len = match replacement {
                Some(r) => r.len(),
                None => range.end - range.start,
            };
            remapped.push(out_start..out_start + len);
        }
    }
    out.push_str(&line[cursor..]);
}

/// The replacement for an article, or `None` when the word is not an article
/// or needs no change.
fn corrected_article(
    word: &str,
    abs_start: usize,
    next: Option<&(usize, &str)>,
    uppercased: &[Range<usize>],
) -> Option<&'static str> {
    if !word.eq_ignore_ascii_case("a") && !word.eq_ignore_ascii_case("an") {
        return None;
    }
    let &(_, next_word) = next?;
    let stripped = next_word.trim_end_matches(|c: char| c.is_ascii_punctuation());
    let first = stripped.chars().next()?;
    let wants_an = matches!(
        first.to_ascii_lowercase(),
        'a' | 'e' | 'i' | 'o' | 'u' | 'h'
    );
    let pattern = case_pattern(word, uppercased.iter().any(|r| r.start == abs_start));
    Some(match (wants_an, pattern) {
        (true, CasePattern::Lower) => "an",
        (true, CasePattern::Capitalized) => "An",
        (true, CasePattern::Upper) => "AN",
        (false, CasePattern::Lower) => "a",
        (false, CasePattern::Capitalized) => "A",
        (false, CasePattern::Upper) => "A",
    })
}

fn case_pattern(word: &str, from_up_directive: bool) -> CasePattern {
    if from_up_directive {
        return CasePattern::Upper;
    }
    let mut chars = word.chars();
    let first_upper = chars.next().is_some_and(|c| c.is_uppercase());
    if !first_upper {
        return CasePattern::Lower;
    }
    // "AN" is recognizably all-caps on its own; a lone "A" without the
    // directive tag reads as ordinary capitalization.
    if word.len() > 1 && word.chars().all(|c| c.is_uppercase()) {
        CasePattern::Upper
    } else {
        CasePattern::Capitalized
    }
}

/// Byte offsets and slices of the space-separated words in a line.
fn word_spans(line: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        if c == ' ' {
            if let Some(s) = start.take() {
                spans.push((s, &line[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, &line[s..]));
    }
    spans
}
