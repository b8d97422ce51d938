// src/console.rs

//! Styled, human-readable console output.
//!
//! Everything the user is meant to read (step banners, echoed process output,
//! success/failure notices) goes through a [`Console`]. Diagnostics go through
//! `tracing` on stderr instead, so the two never mix.
//!
//! Every styled message carries its own colour reset, so a message can never
//! bleed its colour into the next line.

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use owo_colors::OwoColorize;

/// Visual category of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Step banners (blue).
    Info,
    /// Successful command (green).
    Success,
    /// Warning lines and failure notices (yellow).
    Warning,
    /// Error lines (red).
    Error,
    /// Printed verbatim.
    Plain,
}

impl Style {
    fn paint(self, msg: &str) -> String {
        match self {
            Style::Info => msg.blue().to_string(),
            Style::Success => msg.green().to_string(),
            Style::Warning => msg.yellow().to_string(),
            Style::Error => msg.red().to_string(),
            Style::Plain => msg.to_string(),
        }
    }
}

/// Destination for console lines.
pub trait ConsoleSink: Send + Sync {
    fn write_line(&self, line: &str);
}

struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout is not worth aborting a bootstrap over.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

/// In-memory sink that records every line written to it.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturedOutput {
    /// Snapshot of all lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// True if any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl ConsoleSink for CapturedOutput {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}

/// Cheaply clonable handle to a console sink.
#[derive(Clone)]
pub struct Console {
    sink: Arc<dyn ConsoleSink>,
    color: bool,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").field("color", &self.color).finish()
    }
}

impl Console {
    /// Console writing to stdout.
    ///
    /// Colour is used only when stdout is a terminal, `NO_COLOR` is unset and
    /// `no_color` is false.
    pub fn stdout(no_color: bool) -> Self {
        let color =
            !no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self {
            sink: Arc::new(StdoutSink),
            color,
        }
    }

    /// Console writing to an arbitrary sink.
    pub fn with_sink(sink: Arc<dyn ConsoleSink>, color: bool) -> Self {
        Self { sink, color }
    }

    /// Console that records its output, with colour forced on.
    pub fn capture() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        let console = Self::with_sink(Arc::new(captured.clone()), true);
        (console, captured)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn print(&self, style: Style, msg: &str) {
        if self.color {
            self.sink.write_line(&style.paint(msg));
        } else {
            self.sink.write_line(msg);
        }
    }

    pub fn plain(&self, msg: &str) {
        self.print(Style::Plain, msg);
    }

    pub fn info(&self, msg: &str) {
        self.print(Style::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.print(Style::Success, msg);
    }

    pub fn warning(&self, msg: &str) {
        self.print(Style::Warning, msg);
    }

    pub fn error(&self, msg: &str) {
        self.print(Style::Error, msg);
    }
}
