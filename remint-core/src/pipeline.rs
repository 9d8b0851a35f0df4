//! The transformation pipeline.
//!
//! Chains the stages in their fixed order: tokenization + directive
//! execution into the belt, then article correction, then quote
//! repositioning. The composition is stateless; the chunk coordinator calls
//! it once per merged window.

use std::ops::Range;

use crate::articles;
use crate::belt::{Emitted, Engine};
use crate::lexer;
use crate::quotes;

/// Run the full pipeline over `source`.
///
/// `overlap_words` sizes the belt (capacity is four times the overlap
/// width); it is the same value the chunk coordinator uses for its carried
/// context, which is what guarantees a directive reaching back up to that
/// many words is never truncated by a belt flush.
pub fn transform(source: &str, overlap_words: usize) -> String {
    transform_tagged(source, overlap_words, &[]).text
}

/// [`transform`] plus provenance plumbing: `tagged` seeds uppercase
/// provenance for byte ranges of `source`, and the returned ranges locate
/// the uppercase-provenance words in the output. The chunk coordinator uses
/// both ends to carry provenance across window boundaries.
pub fn transform_tagged(source: &str, overlap_words: usize, tagged: &[Range<usize>]) -> Emitted {
    let mut engine = Engine::new(overlap_words);
    lexer::feed_tagged(source, &mut engine, tagged);
    let emitted = engine.finish();
    let (corrected, ranges) = articles::correct(&emitted.text, &emitted.uppercased);
    let (text, uppercased) = quotes::reposition_tracked(&corrected, &ranges);
    Emitted { text, uppercased }
}
