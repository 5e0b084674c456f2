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


use std::{fs, io::prelude::*, io::BufReader, num::IntErrorKind, path::Path};

use super::error::VerifyError;

/// Reads the first line of `fname` without its line terminator.
/// Returns `None` if the file is empty. Nothing past the first `\n` is read.
pub fn read_first_line<P: AsRef<Path>>(fname: P) -> Result<Option<String>, VerifyError> {
    let path = fname.as_ref();
    let f = fs::File::open(path).map_err(|source| VerifyError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut line = String::new();
    let n = BufReader::new(f)
        .read_line(&mut line)
        .map_err(|source| VerifyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if n == 0 { return Ok(None); }

    if line.ends_with('\n') { line.pop(); }
    if line.ends_with('\r') { line.pop(); }
    Ok(Some(line))
}

#[inline(always)]
pub fn split_tokens(line: &str) -> Vec<&str> {
    line.split_ascii_whitespace().collect()
}

/// A token that reads as a base-10 integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    /// numeric, but above `i64::MAX`
    Above,
    /// numeric, but below `i64::MIN`
    Below,
}

/// Parses the token at `index`, keeping the offending text on failure.
/// Integers outside the `i64` range are still integers.
pub fn parse_token(index: usize, token: &str) -> Result<Value, VerifyError> {
    match token.parse::<i64>() {
        Ok(v) => Ok(Value::Int(v)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(Value::Above),
            IntErrorKind::NegOverflow => Ok(Value::Below),
            _ => Err(VerifyError::Parse {
                index,
                token: token.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f
    }

    #[test]
    fn first_line_only() {
        let f = file_with(b"0 1 2\n3 4 5\n");
        assert_eq!(read_first_line(f.path()).unwrap().as_deref(), Some("0 1 2"));
    }

    #[test]
    fn crlf_is_stripped() {
        let f = file_with(b"0 1\r\n");
        assert_eq!(read_first_line(f.path()).unwrap().as_deref(), Some("0 1"));
    }

    #[test]
    fn no_trailing_newline() {
        let f = file_with(b"0 1 2");
        assert_eq!(read_first_line(f.path()).unwrap().as_deref(), Some("0 1 2"));
    }

    #[test]
    fn empty_file() {
        let f = file_with(b"");
        assert!(read_first_line(f.path()).unwrap().is_none());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let r = read_first_line(dir.path().join("nope.txt"));
        assert!(matches!(r, Err(VerifyError::Open { .. })));
    }

    #[test]
    fn invalid_utf8() {
        let f = file_with(&[0x30, 0x20, 0xff, 0xfe, b'\n']);
        assert!(matches!(read_first_line(f.path()), Err(VerifyError::Read { .. })));
    }

    #[test]
    fn split_drops_empty_tokens() {
        assert_eq!(split_tokens("  0\t1   2 \x0c3  "), vec!["0", "1", "2", "3"]);
        assert!(split_tokens("   ").is_empty());
    }

    #[test]
    fn parse_signs_and_garbage() {
        assert_eq!(parse_token(0, "+7").unwrap(), Value::Int(7));
        assert_eq!(parse_token(0, "-3").unwrap(), Value::Int(-3));
        assert_eq!(parse_token(0, "007").unwrap(), Value::Int(7));
        match parse_token(4, "1.5") {
            Err(VerifyError::Parse { index, token }) => {
                assert_eq!(index, 4);
                assert_eq!(token, "1.5");
            }
            r => panic!("unexpected {r:?}"),
        }
        assert!(matches!(parse_token(0, "12a"), Err(VerifyError::Parse { .. })));
        assert!(matches!(parse_token(0, "-"), Err(VerifyError::Parse { .. })));
    }

    #[test]
    fn parse_out_of_range() {
        assert_eq!(parse_token(0, "9223372036854775807").unwrap(), Value::Int(i64::MAX));
        assert_eq!(parse_token(0, "99999999999999999999").unwrap(), Value::Above);
        assert_eq!(parse_token(0, "+99999999999999999999").unwrap(), Value::Above);
        assert_eq!(parse_token(0, "-99999999999999999999").unwrap(), Value::Below);
    }
}
