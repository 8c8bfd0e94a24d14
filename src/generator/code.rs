//! Indentation-aware line writer for generated PHP

/// Accumulates PHP source lines at a tracked indentation depth (4 spaces per level)
#[derive(Debug, Default)]
pub struct PhpWriter {
    output: String,
    indent: usize,
}

impl PhpWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `indent` levels, for fragments spliced into a class body
    pub fn at(indent: usize) -> Self {
        PhpWriter {
            output: String::new(),
            indent,
        }
    }

    /// Write one line at the current depth
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str("    ");
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Write `text` and indent what follows (`try {`)
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.indent += 1;
        self
    }

    /// Outdent, then write `text` (`}`)
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line(text)
    }

    /// Outdent, write `text`, indent again (`} catch (Exception $e) {`)
    pub fn reopen(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.close(text);
        self.indent += 1;
        self
    }

    /// PSR-style method: signature, brace on its own line, body, closing brace
    pub fn method(&mut self, doc: &str, signature: &str, body: impl FnOnce(&mut PhpWriter)) -> &mut Self {
        self.doc(doc);
        self.line(signature);
        self.open("{");
        body(self);
        self.close("}")
    }

    /// `/** ... */` doc comment
    pub fn doc(&mut self, text: &str) -> &mut Self {
        self.line("/**");
        self.line(format!(" * {text}"));
        self.line(" */")
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// PHP single-quoted string literal
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_layout() {
        let mut w = PhpWriter::at(1);
        w.method("Display the resource.", "public function show()", |w| {
            w.open("try {");
            w.line("return 1;");
            w.reopen("} catch (Exception $e) {");
            w.line("return 0;");
            w.close("}");
        });
        assert_eq!(
            w.finish(),
            "    /**\n     * Display the resource.\n     */\n    public function show()\n    {\n        try {\n            return 1;\n        } catch (Exception $e) {\n            return 0;\n        }\n    }\n"
        );
    }

    #[test]
    fn test_blank_lines_have_no_trailing_spaces() {
        let mut w = PhpWriter::at(2);
        w.line("");
        w.blank();
        assert_eq!(w.finish(), "\n\n");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("title"), "'title'");
        assert_eq!(quote("it's"), "'it\\'s'");
        assert_eq!(quote("App\\Models"), "'App\\\\Models'");
    }
}
