//! Pure word transforms invoked by directive execution.
//!
//! All functions are total: anything that cannot be transformed comes back
//! unchanged (or as `None` for the radix conversion, which the caller treats
//! as "leave the word alone").

/// Uppercase the whole word.
pub fn upper(word: &str) -> String {
    word.to_uppercase()
}

/// Lowercase the whole word.
pub fn lower(word: &str) -> String {
    word.to_lowercase()
}

/// Uppercase the first character, lowercase the rest. No-op on empty input.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.extend(chars.as_str().to_lowercase().chars());
            out
        }
    }
}

/// Parse `word` as a signed integer in `radix` and render it in base 10.
/// `None` when the word is not a number in that base.
pub fn to_decimal(word: &str, radix: u32) -> Option<String> {
    i64::from_str_radix(word, radix).ok().map(|v| v.to_string())
}
