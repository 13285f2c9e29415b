//! Line-oriented emission sink.
//!
//! Every emitter writes complete logical lines through a [`Writer`]. The
//! writer owns the indentation level; nested scopes are opened with
//! [`Writer::indent`], whose guard restores the level when dropped, so an
//! early `?` return can never leave the output mis-indented.

use crate::error::CodegenError;
use std::ops::{Deref, DerefMut};

/// Default spaces per indentation level.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// Accumulates generated source one line at a time.
#[derive(Debug)]
pub struct Writer {
    output: String,
    depth: usize,
    indent_size: usize,
}

impl Writer {
    /// Creates an empty writer with the default indentation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent_size(DEFAULT_INDENT_SIZE)
    }

    /// Creates an empty writer with `indent_size` spaces per level.
    #[must_use]
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self {
            output: String::new(),
            depth: 0,
            indent_size,
        }
    }

    /// Returns the current indentation depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Writes one line at the current depth. Empty lines carry no padding.
    pub fn line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            let width = self.depth * self.indent_size;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    /// Writes several lines in order at the current depth.
    pub fn write_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.line("");
    }

    /// Opens one indentation level until the returned guard is dropped.
    pub fn indent(&mut self) -> Indent<'_> {
        self.depth += 1;
        Indent { writer: self }
    }

    /// Writes `open`, runs `body` one level deeper, then writes `close`.
    ///
    /// # Errors
    /// Propagates the body's error; the indentation level is restored and
    /// `close` is not written.
    pub fn block<F>(
        &mut self,
        open: impl AsRef<str>,
        close: impl AsRef<str>,
        body: F,
    ) -> Result<(), CodegenError>
    where
        F: FnOnce(&mut Writer) -> Result<(), CodegenError>,
    {
        self.line(open);
        {
            let mut inner = self.indent();
            body(&mut inner)?;
        }
        self.line(close);
        Ok(())
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consumes the writer and returns the generated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scope guard for one indentation level.
#[derive(Debug)]
pub struct Indent<'w> {
    writer: &'w mut Writer,
}

impl Deref for Indent<'_> {
    type Target = Writer;

    fn deref(&self) -> &Writer {
        self.writer
    }
}

impl DerefMut for Indent<'_> {
    fn deref_mut(&mut self) -> &mut Writer {
        self.writer
    }
}

impl Drop for Indent<'_> {
    fn drop(&mut self) {
        self.writer.depth -= 1;
    }
}
