//! Per-cell cleaning pipeline.
//!
//! Cleaning runs in a fixed order: malformed-UTF-8 repair, whitespace trim,
//! whitespace normalization, embedded line-end substitution. Each step is
//! optional; when no step is enabled the cleaner returns the input bytes
//! borrowed and untouched.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// What to do with bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Utf8Repair {
    /// Replace each invalid sequence with a single byte.
    Replace(u8),
    /// Drop invalid sequences entirely.
    Remove,
}

/// Whitespace normalization variant.
///
/// Both variants collapse each whitespace run to a single character. A run
/// containing a line end becomes `\n` in the default variant, or a plain
/// space when embedded newlines are disallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhitespaceMode {
    KeepNewlines,
    NoNewlines,
}

/// Cleaning features for a selection session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Repair policy for malformed UTF-8, if any.
    pub malformed_utf8: Option<Utf8Repair>,
    /// Skip leading/trailing whitespace trimming.
    pub no_trim: bool,
    /// Collapse internal whitespace runs.
    pub whitespace: Option<WhitespaceMode>,
    /// Replacement character for embedded line ends in quoted cells.
    pub embedded_lineend: Option<u8>,
}

impl CleanOptions {
    /// True when at least one cleaning step would run.
    ///
    /// Trimming is on by default, so a default `CleanOptions` is not a no-op;
    /// only `no_trim` with every other feature unset bypasses cleaning.
    #[must_use]
    pub fn any_clean(&self) -> bool {
        self.malformed_utf8.is_some()
            || !self.no_trim
            || self.whitespace.is_some()
            || self.embedded_lineend.is_some()
    }
}

/// Applies the configured cleaning steps to one cell at a time.
#[derive(Debug, Clone)]
pub struct CellCleaner {
    opts: CleanOptions,
    any_clean: bool,
}

impl CellCleaner {
    #[must_use]
    pub fn new(opts: CleanOptions) -> Self {
        let any_clean = opts.any_clean();
        Self { opts, any_clean }
    }

    /// True when cleaning is a guaranteed no-op.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.any_clean
    }

    /// Clean one cell. `quoted` gates the embedded line-end step, since only
    /// a quoted cell can legally carry a line end.
    ///
    /// Returns the input borrowed whenever no step changed it.
    #[must_use]
    pub fn clean<'a>(&self, raw: &'a [u8], quoted: bool) -> Cow<'a, [u8]> {
        if !self.any_clean {
            return Cow::Borrowed(raw);
        }
        let mut cell: Cow<'a, [u8]> = Cow::Borrowed(raw);
        if let Some(repair) = self.opts.malformed_utf8 {
            if let Some(repaired) = repair_utf8(&cell, repair) {
                cell = Cow::Owned(repaired);
            }
        }
        if !self.opts.no_trim {
            cell = trim(cell);
        }
        if let Some(mode) = self.opts.whitespace {
            if let Some(normalized) = normalize_whitespace(&cell, mode) {
                cell = Cow::Owned(normalized);
            }
        }
        if let Some(replacement) = self.opts.embedded_lineend {
            if quoted {
                if let Some(replaced) = replace_line_ends(&cell, replacement) {
                    cell = Cow::Owned(replaced);
                }
                // the trim step was skipped earlier, so trim now
                if self.opts.no_trim {
                    cell = trim(cell);
                }
            }
        }
        cell
    }
}

fn trim(cell: Cow<'_, [u8]>) -> Cow<'_, [u8]> {
    match cell {
        Cow::Borrowed(bytes) => Cow::Borrowed(bytes.trim_ascii()),
        Cow::Owned(mut bytes) => {
            let trimmed = bytes.trim_ascii();
            let start = trimmed.as_ptr() as usize - bytes.as_ptr() as usize;
            let len = trimmed.len();
            bytes.drain(..start);
            bytes.truncate(len);
            Cow::Owned(bytes)
        }
    }
}

/// Replace every invalid UTF-8 sequence per the repair policy. Returns
/// `None` when the input is already valid.
fn repair_utf8(bytes: &[u8], repair: Utf8Repair) -> Option<Vec<u8>> {
    if std::str::from_utf8(bytes).is_ok() {
        return None;
    }
    let mut out = Vec::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(tail) => {
                out.extend_from_slice(tail.as_bytes());
                break;
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                out.extend_from_slice(valid);
                if let Utf8Repair::Replace(byte) = repair {
                    out.push(byte);
                }
                let skip = err.error_len().unwrap_or(invalid.len());
                rest = &invalid[skip..];
            }
        }
    }
    Some(out)
}

/// Collapse each whitespace run to a single space, or a single `\n` when the
/// run contains a line end and newlines are kept. Returns `None` when the
/// input is already normalized.
fn normalize_whitespace(bytes: &[u8], mode: WhitespaceMode) -> Option<Vec<u8>> {
    let keep_newlines = mode == WhitespaceMode::KeepNewlines;
    let mut needs_rewrite = false;
    let mut prev_was_space = false;
    for &b in bytes {
        let ws = b.is_ascii_whitespace();
        if ws {
            let canonical = b == b' ' || (keep_newlines && b == b'\n');
            if prev_was_space || !canonical {
                needs_rewrite = true;
                break;
            }
        }
        prev_was_space = ws;
    }
    if !needs_rewrite {
        return None;
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let mut has_line_end = false;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            if bytes[i] == b'\n' || bytes[i] == b'\r' {
                has_line_end = true;
            }
            i += 1;
        }
        out.push(if has_line_end && keep_newlines {
            b'\n'
        } else {
            b' '
        });
    }
    Some(out)
}

/// Replace each `\r\n`, `\r`, or `\n` with a single replacement byte.
/// Returns `None` when the input has no line ends.
fn replace_line_ends(bytes: &[u8], replacement: u8) -> Option<Vec<u8>> {
    if memchr::memchr2(b'\r', b'\n', bytes).is_none() {
        return None;
    }
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                out.push(replacement);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
            }
            b'\n' => {
                out.push(replacement);
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    Some(out)
}
