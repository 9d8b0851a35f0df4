//! Quote repositioning pass.
//!
//! Third pass over the whole string. Single and double quotes alternate
//! independently between opening and closing; an opening quote attaches to
//! the content after it, a closing quote to the content before it. The two
//! kinds never cross-match, and a dangling unmatched quote is simply left
//! where it is.

use std::ops::Range;

/// Alternation state for one quote kind. Explicit, rather than a parity
/// counter, so the odd/even contract is visible in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    NextIsOpening,
    NextIsClosing,
}

impl Side {
    fn toggle(&mut self) {
        *self = match self {
            Side::NextIsOpening => Side::NextIsClosing,
            Side::NextIsClosing => Side::NextIsOpening,
        };
    }
}

/// Reattach quotes to their content: drop one space after an opening quote
/// and one space before a closing quote.
pub fn reposition(text: &str) -> String {
    reposition_tracked(text, &[]).0
}

/// [`reposition`] plus range bookkeeping: `ranges` are word byte ranges into
/// `text` (sorted, non-overlapping, never covering a space) and come back
/// remapped into the output, so provenance survives the dropped spaces.
pub fn reposition_tracked(text: &str, ranges: &[Range<usize>]) -> (String, Vec<Range<usize>>) {
    let mut out = String::with_capacity(text.len());
    let mut remapped = Vec::with_capacity(ranges.len());
    let mut pending = ranges.iter();
    let mut current = pending.next();
    let mut start_out = 0;
    let mut single = Side::NextIsOpening;
    let mut double = Side::NextIsOpening;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let landed = match c {
            '\'' | '"' => {
                let side = if c == '\'' { &mut single } else { &mut double };
                let landed;
                match side {
                    Side::NextIsOpening => {
                        landed = out.len();
                        out.push(c);
                        if matches!(chars.peek(), Some(&(_, ' '))) {
                            chars.next();
                        }
                    }
                    Side::NextIsClosing => {
                        if out.ends_with(' ') {
                            out.pop();
                        }
                        landed = out.len();
                        out.push(c);
                    }
                }
                side.toggle();
                landed
            }
            _ => {
                let landed = out.len();
                out.push(c);
                landed
            }
        };
        if let Some(range) = current {
            if range.start == i {
                start_out = landed;
            }
            if range.end == i + c.len_utf8() {
                remapped.push(start_out..out.len());
                current = pending.next();
            }
        }
    }
    (out, remapped)
}
