//! Hierarchy-aware key parsing and formatting.
//!
//! Top-level tasks:  `1`, `2`, `3`, ...
//! Subtasks:         `1a`, `1b`, ..., `1z`, `1aa`, `1ab`, ... (bijective base-26)
//!
//! Keys are the only external representation of a tree coordinate and must
//! stay stable across versions.

use std::sync::LazyLock;

use regex::Regex;

/// Full-match grammar for keys: decimal top index (1-based, no leading
/// zero), optional lowercase letter suffix for the subtask index.
static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-9][0-9]*)([a-z]*)$").unwrap());

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid key: '{0}' (expected e.g. 1, 2a, 3ab)")]
    InvalidKey(String),
}

/// A parsed key: 0-based top-level index plus optional 0-based subtask index.
/// `sub` of `None` designates the top-level task itself.
pub type Coordinate = (usize, Option<usize>);

/// 0-based index → bijective base-26 letter suffix.
///
/// 0 → `a`, 25 → `z`, 26 → `aa`, 27 → `ab`. Digits run 1..=26 rather than
/// 0..=25, which is what lets the length grow without ambiguity.
pub fn encode_suffix(n: usize) -> String {
    let mut digits: Vec<char> = Vec::new();
    let mut n = n + 1;
    while n > 0 {
        n -= 1;
        digits.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    digits.iter().rev().collect()
}

/// Bijective base-26 letter suffix → 0-based index. Inverse of
/// [`encode_suffix`]; callers must pass a non-empty `a`-`z` string.
/// Returns `None` when the suffix does not fit in a `usize` (the grammar
/// places no length limit on what a user can type).
pub fn decode_suffix(s: &str) -> Option<usize> {
    let mut result: usize = 0;
    for b in s.bytes() {
        result = result
            .checked_mul(26)?
            .checked_add((b - b'a' + 1) as usize)?;
    }
    Some(result - 1)
}

/// Parse a key string into a [`Coordinate`], both indices 0-based.
///
/// `"1"` → `(0, None)`, `"2a"` → `(1, Some(0))`, `"1aa"` → `(0, Some(26))`.
pub fn parse_key(key: &str) -> Result<Coordinate, KeyError> {
    let caps = KEY_RE
        .captures(key)
        .ok_or_else(|| KeyError::InvalidKey(key.to_string()))?;
    let top: usize = caps[1]
        .parse::<usize>()
        .map_err(|_| KeyError::InvalidKey(key.to_string()))?
        - 1;
    let letters = &caps[2];
    let sub = if letters.is_empty() {
        None
    } else {
        // Overflow is unrepresentable, not out of range: reject as invalid
        Some(decode_suffix(letters).ok_or_else(|| KeyError::InvalidKey(key.to_string()))?)
    };
    Ok((top, sub))
}

/// Format 0-based indices back into a key string. Inverse of [`parse_key`].
pub fn format_key(top: usize, sub: Option<usize>) -> String {
    let mut s = (top + 1).to_string();
    if let Some(si) = sub {
        s.push_str(&encode_suffix(si));
    }
    s
}
