//! Shader Dev Tools - Common Logic
//!
//! Shared by the command line tools of this workspace.

pub mod stringify;

pub use stringify::{
    source_lines, strip_line, stringify_file, stringify_reader, stringify_str, StringifyError, Stringifier,
};
