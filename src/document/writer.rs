// src/document/writer.rs
//! Indented markup output.

use quick_xml::escape::escape;

const INDENT: &str = "  ";

/// Line-oriented writer: one tag or leaf per line, two spaces per level.
#[derive(Debug, Default)]
pub struct MarkupWriter {
    out: String,
    depth: usize,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, content: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(content);
    }

    pub fn open(&mut self, name: &str) {
        self.line(&format!("<{}>", name));
        self.depth += 1;
    }

    pub fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", name));
    }

    /// Write `<name>text</name>` with the text escaped.
    pub fn leaf(&mut self, name: &str, text: &str) {
        self.line(&format!("<{0}>{1}</{0}>", name, escape(text)));
    }

    pub fn finish(self) -> String {
        self.out
    }
}
