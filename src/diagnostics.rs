use crate::error::LexingError;
use std::fmt;
use std::io::{self, Write};

/// A single problem found in the source, with the position it was found at.
#[derive(Debug, PartialEq, Clone)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub error: LexingError,
}

impl Diagnostic {
    pub fn new(line: usize, column: usize, error: LexingError) -> Self {
        Self {
            line,
            column,
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.error)
    }
}

/// Receives diagnostics from the scanner. The scanner only ever calls `report`;
/// whether a run failed is decided by the caller through `had_error`.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);

    fn had_error(&self) -> bool;
}

/// Collects every diagnostic of a pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter()
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported.push(diagnostic);
    }

    fn had_error(&self) -> bool {
        !self.reported.is_empty()
    }
}

/// Writes each diagnostic as soon as it arrives and remembers that one was seen
/// until `reset` is called.
pub struct StderrReporter<W: Write = io::Stderr> {
    out: W,
    count: usize,
}

impl StderrReporter {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl<W: Write> StderrReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out, count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for StderrReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        // Nowhere left to send the failure if stderr itself is gone.
        let _ = writeln!(self.out, "{}", diagnostic);
        self.count += 1;
    }

    fn had_error(&self) -> bool {
        self.count > 0
    }
}
