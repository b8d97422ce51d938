// src/exec/drain.rs

//! Reading a child's output stream line by line.
//!
//! A drain reads until end of stream and hands every line to a
//! [`LineHandler`]. A handler returning an error stops the drain; the error
//! is what the process handle reports for the step.

use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::console::Console;
use crate::errors::ExecError;

/// Receives each decoded output line (without its line terminator).
pub trait LineHandler: Send + 'static {
    fn handle_line(&mut self, line: &str) -> Result<(), ExecError>;
}

impl<F> LineHandler for F
where
    F: FnMut(&str) -> Result<(), ExecError> + Send + 'static,
{
    fn handle_line(&mut self, line: &str) -> Result<(), ExecError> {
        self(line)
    }
}

/// Category of an output line, by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Warning,
    Error,
    Normal,
}

/// Case-insensitive prefix test on the raw line.
pub fn classify(line: &str) -> LineClass {
    if has_prefix_ignore_case(line, "WARNING") {
        LineClass::Warning
    } else if has_prefix_ignore_case(line, "ERROR") {
        LineClass::Error
    } else {
        LineClass::Normal
    }
}

fn has_prefix_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Default handler: echo every line to the console, yellow for warnings,
/// red for errors. An error line also fails the drain.
#[derive(Debug, Clone)]
pub struct ClassifyingEcho {
    console: Console,
}

impl ClassifyingEcho {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl LineHandler for ClassifyingEcho {
    fn handle_line(&mut self, line: &str) -> Result<(), ExecError> {
        match classify(line) {
            LineClass::Warning => self.console.warning(line),
            LineClass::Error => {
                self.console.error(line);
                return Err(ExecError::ErrorOutput {
                    line: line.to_string(),
                });
            }
            LineClass::Normal => self.console.plain(line),
        }
        Ok(())
    }
}

/// Swallows every line. Still reads the stream so the child never blocks on
/// a full pipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl LineHandler for Discard {
    fn handle_line(&mut self, _line: &str) -> Result<(), ExecError> {
        Ok(())
    }
}

/// Records lines in memory, never fails.
#[derive(Debug, Clone, Default)]
pub struct CollectLines {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CollectLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LineHandler for CollectLines {
    fn handle_line(&mut self, line: &str) -> Result<(), ExecError> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
        Ok(())
    }
}

/// Drain `reader` until end of stream, returning the number of lines read.
pub async fn drain<R>(reader: R, mut handler: Box<dyn LineHandler>) -> Result<usize, ExecError>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(ExecError::Drain)?;
        if n == 0 {
            break;
        }
        count += 1;
        handler.handle_line(&decode_line(&buf))?;
    }

    Ok(count)
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_a_case_insensitive_prefix_test() {
        assert_eq!(classify("WARNING: deprecated"), LineClass::Warning);
        assert_eq!(classify("warning something"), LineClass::Warning);
        assert_eq!(classify("Error: disk full"), LineClass::Error);
        assert_eq!(classify("errors were found"), LineClass::Error);
        assert_eq!(classify("an ERROR occurred"), LineClass::Normal);
        assert_eq!(classify("  ERROR indented"), LineClass::Normal);
        assert_eq!(classify("warn"), LineClass::Normal);
        assert_eq!(classify(""), LineClass::Normal);
        assert_eq!(classify("é"), LineClass::Normal);
    }

    #[tokio::test]
    async fn drain_strips_terminators_and_keeps_order() {
        let input: &[u8] = b"first\nsecond\r\nthird";
        let collect = CollectLines::new();
        let n = drain(input, Box::new(collect.clone())).await.unwrap();
        assert_eq!(n, 3);
        assert_eq!(collect.lines(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let input: &[u8] = b"ok \xff\n";
        let collect = CollectLines::new();
        drain(input, Box::new(collect.clone())).await.unwrap();
        assert_eq!(collect.lines(), vec!["ok \u{fffd}"]);
    }

    #[tokio::test]
    async fn error_line_stops_the_drain_and_is_printed_red() {
        let (console, out) = Console::capture();
        let input: &[u8] = b"building\nWARNING: slow disk\nERROR: disk full\nnever seen\n";

        let err = drain(input, Box::new(ClassifyingEcho::new(console)))
            .await
            .unwrap_err();

        match err {
            ExecError::ErrorOutput { line } => assert_eq!(line, "ERROR: disk full"),
            other => panic!("expected ErrorOutput, got {other:?}"),
        }

        let lines = out.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "building");
        assert!(lines[1].starts_with("\u{1b}[33m") && lines[1].contains("WARNING: slow disk"));
        assert!(lines[2].starts_with("\u{1b}[31m") && lines[2].contains("ERROR: disk full"));
        assert!(!out.contains("never seen"));
    }

    #[tokio::test]
    async fn closures_can_be_handlers() {
        let mut seen = 0usize;
        let counter = move |_: &str| {
            seen += 1;
            if seen > 1 {
                Err(ExecError::ErrorOutput { line: "too many".into() })
            } else {
                Ok(())
            }
        };
        let input: &[u8] = b"a\nb\n";
        assert!(drain(input, Box::new(counter)).await.is_err());
    }
}
