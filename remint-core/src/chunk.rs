//! Chunk/overlap coordinator.
//!
//! Drives the stateless [`transform`] call over inputs larger than one read
//! window, keeping total live memory proportional to the window size rather
//! than the input size. The protocol per window:
//!
//!     1. Seek to the current offset and read up to `window_bytes` bytes.
//!     2. Trim the window to whole UTF-8 characters; a split code point is
//!        deferred to the next window, never shown to the pipeline.
//!     3. Trim again if the window would end inside a possible directive
//!        span, so `(`...`)` is never cut in half at a boundary.
//!     4. Prepend the pending context (the trailing words carried from the
//!        previous window) and transform the merged text in one call.
//!     5. The reprocessed context reappears as a prefix of the output with a
//!        stable word count; split it off and write it. A directive that
//!        reached back across the boundary lands there, exactly once.
//!     6. Withhold the trailing `overlap_words` words as the new pending
//!        context, together with the uppercase-provenance ranges that fall
//!        inside it, write the rest, advance the offset by the bytes
//!        consumed.
//!
//! When the source fits in a single window the loop and its bookkeeping are
//! skipped entirely.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::Path;

use crate::error::ProcessError;
use crate::pipeline::{transform, transform_tagged};
use crate::token::DIRECTIVE_LOOKAHEAD;

/// Coordinator settings, validated by the configuration layer before they
/// get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Bytes per read window.
    pub window_bytes: usize,
    /// Trailing words carried between windows.
    pub overlap_words: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            window_bytes: 4096,
            overlap_words: 12,
        }
    }
}

/// Transform `input` into `output` in bounded memory. Missing parent
/// directories for the output are created. Only fatal I/O and encoding
/// errors surface; all text-level anomalies are resolved inside the
/// pipeline.
pub fn process_file(input: &Path, output: &Path, options: ChunkOptions) -> Result<(), ProcessError> {
    let mut reader = File::open(input).map_err(ProcessError::io("open", input, None))?;
    let total = reader
        .metadata()
        .map_err(ProcessError::io("inspect", input, None))?
        .len();

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(ProcessError::io("create directory for", output, None))?;
        }
    }
    let mut writer = File::create(output).map_err(ProcessError::io("create", output, None))?;

    // Shortcut: one window covers the whole input.
    if total <= options.window_bytes as u64 {
        let mut bytes = Vec::with_capacity(total as usize);
        reader
            .read_to_end(&mut bytes)
            .map_err(ProcessError::io("read", input, Some(0)))?;
        let text = std::str::from_utf8(&bytes).map_err(|e| ProcessError::InvalidUtf8 {
            path: input.to_path_buf(),
            offset: e.valid_up_to() as u64,
        })?;
        let out = transform(text, options.overlap_words);
        writer
            .write_all(out.as_bytes())
            .map_err(ProcessError::io("write", output, None))?;
        return Ok(());
    }

    let mut pending = String::new();
    // Uppercase-provenance ranges into `pending`, restored on re-feed so an
    // up-cased article carried across the boundary keeps its casing pattern.
    let mut pending_tags: Vec<Range<usize>> = Vec::new();
    let mut offset: u64 = 0;
    let mut buf = vec![0u8; options.window_bytes];
    while offset < total {
        reader
            .seek(SeekFrom::Start(offset))
            .map_err(ProcessError::io("seek", input, Some(offset)))?;
        let n = read_window(&mut reader, &mut buf).map_err(ProcessError::io("read", input, Some(offset)))?;
        if n == 0 {
            break;
        }
        let reached_end = offset + n as u64 >= total;
        let (decoded, utf8_consumed) = decode_window(&buf[..n], reached_end, input, offset)?;
        let mut window = decoded;
        let mut consumed = utf8_consumed;
        if offset + (consumed as u64) < total {
            if let Some(cut) = open_paren_cut(window) {
                window = &window[..cut];
                consumed = cut;
            }
        }

        let merged = format!("{}{}", pending, window);
        // `pending` is a prefix of `merged`, so its tag ranges apply as-is.
        let emitted = transform_tagged(&merged, options.overlap_words, &pending_tags);
        let out = emitted.text;

        let carried = word_count(&pending);
        let (reprocessed, remainder) = split_leading_words(&out, carried);
        writer
            .write_all(reprocessed.as_bytes())
            .map_err(ProcessError::io("write", output, None))?;

        let (body, tail) = split_trailing_words(remainder, options.overlap_words);
        writer
            .write_all(body.as_bytes())
            .map_err(ProcessError::io("write", output, None))?;
        let tail_offset = reprocessed.len() + body.len();
        pending_tags = emitted
            .uppercased
            .iter()
            .filter(|r| r.start >= tail_offset)
            .map(|r| r.start - tail_offset..r.end - tail_offset)
            .collect();
        pending = tail.to_string();
        offset += consumed as u64;
    }

    // The final pending context is already transformed; it is the true tail.
    writer
        .write_all(pending.as_bytes())
        .map_err(ProcessError::io("write", output, None))?;
    Ok(())
}

/// Fill `buf` as far as the reader allows; short only at end of input.
fn read_window(reader: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Decode a window, trimming an incomplete trailing code point for the next
/// window to pick up. Broken bytes anywhere else are fatal.
fn decode_window<'a>(
    bytes: &'a [u8],
    reached_end: bool,
    path: &Path,
    offset: u64,
) -> Result<(&'a str, usize), ProcessError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text, bytes.len())),
        Err(e) => {
            let valid = e.valid_up_to();
            if e.error_len().is_some() || reached_end || valid == 0 {
                return Err(ProcessError::InvalidUtf8 {
                    path: path.to_path_buf(),
                    offset: offset + valid as u64,
                });
            }
            let head = std::str::from_utf8(&bytes[..valid]).map_err(|_| ProcessError::InvalidUtf8 {
                path: path.to_path_buf(),
                offset,
            })?;
            Ok((head, valid))
        }
    }
}

/// Where to cut a window that ends inside a possible directive span: at the
/// last `(` that has no `)` or newline after it and sits within lookahead
/// distance of the end. `None` when the window ends cleanly.
fn open_paren_cut(window: &str) -> Option<usize> {
    let idx = window.rfind('(')?;
    let tail = &window[idx..];
    if idx == 0 || tail.len() > DIRECTIVE_LOOKAHEAD + 4 || tail.contains(')') || tail.contains('\n') {
        return None;
    }
    Some(idx)
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split after the first `count` whitespace-delimited words; the second half
/// starts at the next word's first byte.
fn split_leading_words(text: &str, count: usize) -> (&str, &str) {
    if count == 0 {
        return ("", text);
    }
    let mut words = 0;
    let mut prev_ws = true;
    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        if !ws && prev_ws {
            words += 1;
            if words == count + 1 {
                return (&text[..i], &text[i..]);
            }
        }
        prev_ws = ws;
    }
    (text, "")
}

/// Split off the last `count` words; the second half starts at the first of
/// them, the first half keeps the separating whitespace.
fn split_trailing_words(text: &str, count: usize) -> (&str, &str) {
    let mut starts = Vec::new();
    let mut prev_ws = true;
    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        if !ws && prev_ws {
            starts.push(i);
        }
        prev_ws = ws;
    }
    if starts.len() <= count {
        return ("", text);
    }
    let idx = starts[starts.len() - count];
    (&text[..idx], &text[idx..])
}
