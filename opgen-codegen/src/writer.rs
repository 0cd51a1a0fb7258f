//! Indentation-aware source writer.

/// Accumulates generated source one line at a time.
///
/// Indentation is an explicit level counter; every emitted line is prefixed
/// with `level` copies of the indent unit. Blank lines carry no indentation.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    output: String,
    level: usize,
    unit: &'static str,
}

impl CodeWriter {
    /// Creates a writer indenting with four spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_unit("    ")
    }

    /// Creates a writer with a custom indent unit.
    #[must_use]
    pub fn with_unit(unit: &'static str) -> Self {
        Self {
            output: String::new(),
            level: 0,
            unit,
        }
    }

    /// Emits one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.output.push_str(self.unit);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Emits an empty line.
    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Emits a doc comment line (`///`), without trailing whitespace.
    pub fn doc(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.line("///");
        } else {
            self.line(format!("/// {text}"));
        }
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation level, stopping at zero.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Emits a line and indents the following ones.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent();
    }

    /// Dedents and emits a closing line.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.dedent();
        self.line(text);
    }

    /// Current indentation level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the accumulated source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consumes the writer, returning the accumulated source.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = CodeWriter::new();
        w.open("impl Graph {");
        w.open("pub fn f() {");
        w.line("g();");
        w.close("}");
        w.close("}");

        assert_eq!(w.finish(), "impl Graph {\n    pub fn f() {\n        g();\n    }\n}\n");
    }

    #[test]
    fn test_blank_lines_have_no_indent() {
        let mut w = CodeWriter::with_unit("\t");
        w.indent();
        w.line("");
        w.blank();
        w.line("x");

        assert_eq!(w.as_str(), "\n\n\tx\n");
    }

    #[test]
    fn test_doc_lines() {
        let mut w = CodeWriter::new();
        w.indent();
        w.doc("Summary.");
        w.doc("");

        assert_eq!(w.finish(), "    /// Summary.\n    ///\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut w = CodeWriter::new();
        w.dedent();
        assert_eq!(w.level(), 0);
        w.close("}");
        assert_eq!(w.finish(), "}\n");
    }
}
