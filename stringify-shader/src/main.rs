//! Shader Dev Tools - Shader Stringifier
//!
//! Turns a GL shader into a single-line string literal on stdout:
//! whitespace trimmed, end-of-line comments and empty lines removed,
//! tabs replaced by spaces.

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stringify-shader",
    version,
    about = "Compress a GL shader into a string literal"
)]
struct Args {
    /// Shader source file
    shader: PathBuf,
}

fn main() -> Result<()> {
    // stdout carries the literal, keep stderr quiet unless asked
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let stdout = io::stdout().lock();
    shader_common::stringify_file(&args.shader, BufWriter::new(stdout))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["stringify-shader", "basic.frag"]).unwrap();
        assert_eq!(args.shader, PathBuf::from("basic.frag"));
    }

    #[test]
    fn test_exactly_one_shader() {
        assert!(Args::try_parse_from(["stringify-shader"]).is_err());
        assert!(Args::try_parse_from(["stringify-shader", "a.vert", "b.frag"]).is_err());
    }
}
