/// Append-only line buffer with indentation.
#[derive(Debug, Default, Clone)]
pub(crate) struct CodeWriter {
    lines: Vec<String>,
    indent: usize,
}

impl CodeWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if line.is_empty() {
            self.lines.push(String::new());
            return;
        }

        let mut s = String::new();
        for _ in 0..self.indent {
            s.push_str("    ");
        }
        s.push_str(line);
        self.lines.push(s);
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Push `{` and indent.
    pub(crate) fn open(&mut self) {
        self.push_line("{");
        self.indent();
    }

    /// Dedent and push `}` followed by `suffix`.
    pub(crate) fn close(&mut self, suffix: &str) {
        self.dedent();
        self.push_line(format!("}}{suffix}"));
    }

    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Append another writer's lines at the current indentation.
    pub(crate) fn append(&mut self, other: CodeWriter) {
        for line in other.lines {
            self.push_line(line);
        }
    }

    pub(crate) fn into_string(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
