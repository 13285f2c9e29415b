//! Generator configuration.

use crate::writer::DEFAULT_INDENT_SIZE;

/// Derives applied to every generated type unless overridden.
pub const DEFAULT_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq", "Eq"];

/// Crate path the generated `use` line imports the runtime from.
pub const DEFAULT_RUNTIME_CRATE: &str = "tinyber_core";

/// Options controlling generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    derives: Vec<String>,
    doc_comments: bool,
    runtime_crate: String,
    indent_size: usize,
}

impl GeneratorOptions {
    /// Creates options with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the derive list.
    #[must_use]
    pub fn with_derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derives = derives.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one derive to the list.
    #[must_use]
    pub fn with_derive(mut self, derive: impl Into<String>) -> Self {
        let derive = derive.into();
        if !self.derives.contains(&derive) {
            self.derives.push(derive);
        }
        self
    }

    /// Enables or disables `///` comments carrying each declared form.
    #[must_use]
    pub fn with_doc_comments(mut self, enabled: bool) -> Self {
        self.doc_comments = enabled;
        self
    }

    /// Sets the crate path the runtime prelude is imported from, e.g.
    /// `tinyber::core` when depending on the facade crate.
    #[must_use]
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Returns the derive list.
    #[must_use]
    pub fn derives(&self) -> &[String] {
        &self.derives
    }

    /// Returns true if declared forms are emitted as doc comments.
    #[must_use]
    pub const fn doc_comments(&self) -> bool {
        self.doc_comments
    }

    /// Returns the runtime crate path.
    #[must_use]
    pub fn runtime_crate(&self) -> &str {
        &self.runtime_crate
    }

    /// Returns the indentation width.
    #[must_use]
    pub const fn indent_size(&self) -> usize {
        self.indent_size
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            derives: DEFAULT_DERIVES.iter().map(|d| (*d).to_string()).collect(),
            doc_comments: true,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            indent_size: DEFAULT_INDENT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GeneratorOptions::default();
        assert_eq!(options.derives(), ["Debug", "Clone", "PartialEq", "Eq"]);
        assert!(options.doc_comments());
        assert_eq!(options.runtime_crate(), "tinyber_core");
        assert_eq!(options.indent_size(), 4);
    }

    #[test]
    fn test_builder() {
        let options = GeneratorOptions::new()
            .with_derive("Hash")
            .with_derive("Hash")
            .with_doc_comments(false)
            .with_runtime_crate("tinyber::core")
            .with_indent_size(2);
        assert_eq!(options.derives().len(), 5);
        assert!(!options.doc_comments());
        assert_eq!(options.runtime_crate(), "tinyber::core");
        assert_eq!(options.indent_size(), 2);
    }

    #[test]
    fn test_replace_derives() {
        let options = GeneratorOptions::new().with_derives(["Debug"]);
        assert_eq!(options.derives(), ["Debug"]);
    }
}
