#![allow(dead_code)]

use postgen::exec::CommandLine;

pub use postgen_test_utils::{init_tracing, with_timeout};

/// `sh -c <script>` as a command line.
pub fn sh(script: &str) -> CommandLine {
    CommandLine::from_tokens(["sh", "-c", script]).unwrap()
}

pub const YELLOW: &str = "\u{1b}[33m";
pub const RED: &str = "\u{1b}[31m";
pub const GREEN: &str = "\u{1b}[32m";
pub const BLUE: &str = "\u{1b}[34m";
