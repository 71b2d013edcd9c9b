use indexmap::IndexSet;

/// Tracks state while emitting one file: indentation and collected imports.
#[derive(Debug, Clone)]
pub struct EmitContext {
    /// Current indentation level
    indent_level: usize,
    /// Characters per indent (e.g., 4 spaces)
    indent_width: usize,
    /// Whether to use tabs
    use_tabs: bool,
    /// Fully qualified imports (deduped, insertion-ordered)
    imports: IndexSet<String>,
}

/// Indentation style configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl EmitContext {
    pub fn new(style: IndentStyle) -> Self {
        let (use_tabs, indent_width) = match style {
            IndentStyle::Spaces(n) => (false, n),
            IndentStyle::Tabs => (true, 1),
        };
        Self {
            indent_level: 0,
            indent_width,
            use_tabs,
            imports: IndexSet::new(),
        }
    }

    /// Get the current indentation string.
    pub fn indent(&self) -> String {
        let unit = if self.use_tabs { "\t" } else { " " };
        unit.repeat(self.indent_level * self.indent_width)
    }

    /// Indentation one level deeper than the current one.
    pub fn inner_indent(&self) -> String {
        let unit = if self.use_tabs { "\t" } else { " " };
        unit.repeat((self.indent_level + 1) * self.indent_width)
    }

    pub fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Record an import such as `java.util.List` (deduped).
    pub fn add_import(&mut self, path: impl Into<String>) {
        self.imports.insert(path.into());
    }

    pub fn imports(&self) -> &IndexSet<String> {
        &self.imports
    }

    /// Drain the collected imports, sorted for stable output.
    pub fn take_imports(&mut self) -> Vec<String> {
        let mut imports: Vec<String> = std::mem::take(&mut self.imports).into_iter().collect();
        imports.sort();
        imports
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }
}
