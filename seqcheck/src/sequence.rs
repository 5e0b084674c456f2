// ============================================================================
// This code is part of Rusty-PBBS.
// ----------------------------------------------------------------------------
// MIT License
// 
// Copyright (c) 2023-present Javad Abdi, Mark C. Jeffrey
// 
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
// 
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
// 
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
// ============================================================================


//! Checks that the first line of a result file reads `0 1 2 ... N`, with N
//! taken from the line's own last token.
//!
//! Only the first `N + 1` tokens are inspected. Anything after them is
//! counted in [`Checked::ignored`] but never parsed.

use std::{fmt, path::{Path, PathBuf}};
use log::{debug, trace, warn};

use crate::common::error::VerifyError;
use crate::common::io::{parse_token, read_first_line, split_tokens, Value};

/// Outcome of a successful scan over a token line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checked {
    /// declared last value + 1, i.e. the number of tokens checked
    pub total: u64,
    /// tokens past `total` that were never looked at
    pub ignored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: PathBuf,
    pub checked: Checked,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "for file {}, everything is correct!", self.path.display())
    }
}

/// A negative last value declares an empty range. One above `i64::MAX`
/// saturates.
#[inline(always)]
fn declared_total(last: Value) -> u64 {
    match last {
        Value::Int(v) if v < 0 => 0,
        Value::Int(v) => v as u64 + 1,
        Value::Above => u64::MAX,
        Value::Below => 0,
    }
}

#[inline(always)]
fn is_index(value: Value, index: usize) -> bool {
    match value {
        Value::Int(v) => usize::try_from(v).ok() == Some(index),
        Value::Above | Value::Below => false,
    }
}

/// Runs the sequence check over an already split line.
///
/// The last token fixes `total`; then tokens `0..total` are compared with
/// their index in order and the first failure wins. A `total` larger than
/// the line fails with [`VerifyError::IndexOutOfRange`] at the first missing
/// index, but only after every present token passed.
pub fn check_tokens(tokens: &[&str]) -> Result<Checked, VerifyError> {
    let len = tokens.len();
    let Some(last) = tokens.last() else {
        return Err(VerifyError::IndexOutOfRange { index: 0, len });
    };
    let total = declared_total(parse_token(len - 1, last)?);
    debug!("declared total {total}, line has {len} tokens");

    let take = usize::try_from(total).unwrap_or(usize::MAX);
    for (index, token) in tokens.iter().enumerate().take(take) {
        let value = parse_token(index, token)?;
        trace!("index {index}: {token}");
        if !is_index(value, index) {
            return Err(VerifyError::Mismatch {
                index,
                actual: token.to_string(),
                expected: index,
            });
        }
    }

    if total > len as u64 {
        return Err(VerifyError::IndexOutOfRange { index: len, len });
    }

    let ignored = len - total as usize;
    if ignored > 0 {
        warn!("{ignored} trailing tokens were not checked");
    }
    Ok(Checked { total, ignored })
}

/// Verifies the result file at `fname`.
pub fn verify_file<P: AsRef<Path>>(fname: P) -> Result<Report, VerifyError> {
    let path = fname.as_ref();
    let missing = || VerifyError::MissingData { path: path.to_path_buf() };

    let line = read_first_line(path)?.ok_or_else(missing)?;
    let tokens = split_tokens(&line);
    if tokens.is_empty() { return Err(missing()); }

    let checked = check_tokens(&tokens)?;
    Ok(Report { path: path.to_path_buf(), checked })
}
