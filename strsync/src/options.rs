//! Options for [`crate::sync::synchronize_with`].

/// Default indentation unit of generated whitespace.
pub const DEFAULT_INDENT: &str = "    ";

/// Behavior options for translation synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// One indentation level of generated whitespace.
    pub indent: String,
    /// Omit master entries marked `translatable="false"` instead of marking them NEW.
    pub skip_untranslatable: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            skip_untranslatable: false,
        }
    }
}

impl SyncOptions {
    /// Creates default sync options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Uses `width` spaces as the indentation unit.
    pub fn with_indent_width(self, width: usize) -> Self {
        self.with_indent(" ".repeat(width))
    }

    /// Enables/disables skipping of non-translatable master entries.
    pub fn with_skip_untranslatable(mut self, skip: bool) -> Self {
        self.skip_untranslatable = skip;
        self
    }
}
