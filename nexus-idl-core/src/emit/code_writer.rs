//! Indentation-tracking writer shared by the emission targets.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Writes lines of code, prefixing each with the current indentation.
///
/// Indentation is held in an `Rc<Cell<_>>` so an [`IndentGuard`] can be alive while the
/// writer is borrowed mutably.
pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
}

impl<W: fmt::Write> CodeWriter<W> {
    pub fn new(writer: W, indent_string: impl Into<String>) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string: indent_string.into(),
        }
    }

    pub fn with_indent_spaces(writer: W, spaces: usize) -> Self {
        Self::new(writer, " ".repeat(spaces))
    }

    pub fn with_tabs(writer: W) -> Self {
        Self::new(writer, "\t")
    }

    /// Writes one line. Blank lines are written without indentation.
    pub fn writeln(&mut self, text: impl AsRef<str>) -> fmt::Result {
        let text = text.as_ref();
        if !text.trim().is_empty() {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(&self.indent_string)?;
            }
            self.writer.write_str(text)?;
        }
        self.writer.write_char('\n')
    }

    pub fn writelns<I, S>(&mut self, lines: I) -> fmt::Result
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.writeln(line)?;
        }
        Ok(())
    }

    pub fn blank_line(&mut self) -> fmt::Result {
        self.writer.write_char('\n')
    }

    /// Indentation increases while the returned guard is alive.
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// Writes `header {`, the indented body, then `}` followed by `closing`.
    pub fn block_with<F>(&mut self, header: &str, closing: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(format!("{header} {{"))?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln(format!("}}{closing}"))
    }

    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.block_with(header, "", body)
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level.get()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        self.indent_level.set(self.indent_level.get().saturating_sub(1));
    }
}
