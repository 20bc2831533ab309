//! GLSL source to string literal conversion.
//!
//! Every line is trimmed, loses its `//` comment (if any) and, when anything
//! is left, is appended to a double-quoted literal followed by an escaped
//! newline. The comment scan is naive: a `//` inside a quoted string counts
//! as a comment too. `\` and `"` are escaped so the literal stays well-formed.
//!
//! The whole literal is built in memory and only written once the input has
//! been read completely, so a failed read leaves the sink untouched.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const COMMENT: &str = "//";

#[derive(Error, Debug)]
pub enum StringifyError {
    #[error("failed to open shader file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read shader file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write string literal")]
    Write(#[source] io::Error),
}

/// Split on `\n`, `\r\n` and a lone `\r`.
///
/// A `\r\n` pair yields an extra empty piece, which [`strip_line`] drops
/// like any other blank line.
pub fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    source.split(['\n', '\r'])
}

/// Apply the per-line rules. Returns `None` if the line is dropped.
pub fn strip_line(line: &str) -> Option<Cow<'_, str>> {
    let line = line.trim();
    let line = match line.find(COMMENT) {
        Some(at) => &line[..at],
        None => line,
    };
    if line.is_empty() {
        return None;
    }

    if !line.contains(['\t', '\\', '"']) {
        return Some(Cow::Borrowed(line));
    }
    let mut escaped = String::with_capacity(line.len() + 4);
    for c in line.chars() {
        match c {
            '\t' => escaped.push(' '),
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            c => escaped.push(c),
        }
    }
    Some(Cow::Owned(escaped))
}

/// Literal builder.
///
/// Starts with the opening quote, [`Stringifier::finish`] appends the
/// closing `";` and a trailing newline.
pub struct Stringifier {
    literal: String,
    segments: usize,
    skipped: usize,
}

impl Default for Stringifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Stringifier {
    pub fn new() -> Self {
        Self {
            literal: String::from("\""),
            segments: 0,
            skipped: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        match strip_line(line) {
            Some(text) => {
                self.literal.push_str(&text);
                self.literal.push_str("\\n");
                self.segments += 1;
            }
            None => self.skipped += 1,
        }
    }

    /// Number of lines kept so far
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn finish(mut self) -> String {
        self.literal.push_str("\";\n");
        log::debug!(
            "Kept {} lines, skipped {} blank or comment-only pieces",
            self.segments,
            self.skipped
        );
        self.literal
    }
}

pub fn stringify_str(source: &str) -> String {
    let mut out = Stringifier::new();
    for line in source_lines(source) {
        out.push_line(line);
    }
    out.finish()
}

/// Stringify everything `reader` yields. `path` names the input in errors.
pub fn stringify_reader<R: Read, W: Write>(
    path: &Path,
    mut reader: R,
    mut sink: W,
) -> Result<W, StringifyError> {
    let read_err = |source: io::Error| StringifyError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(read_err)?;
    let source = String::from_utf8(bytes)
        .map_err(|e| read_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let literal = stringify_str(&source);
    sink.write_all(literal.as_bytes())
        .and_then(|_| sink.flush())
        .map_err(StringifyError::Write)?;
    Ok(sink)
}

/// Stringify the file at `path`. Nothing is written unless it is read in full.
pub fn stringify_file<W: Write>(path: &Path, sink: W) -> Result<W, StringifyError> {
    let file = File::open(path).map_err(|source| StringifyError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Stringifying {}", path.display());
    stringify_reader(path, file, sink)
}
