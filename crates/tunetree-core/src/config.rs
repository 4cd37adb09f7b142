//! Parse configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default label of the synthetic root.
pub const DEFAULT_ROOT_LABEL: &str = "Music Collection";

/// Default number of columns per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Configuration for parsing tree text.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ParseConfig {
    /// Columns per nesting level in the listing (3 filler + 1 branch).
    #[builder(default = "DEFAULT_INDENT_WIDTH")]
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Display name of the synthetic root.
    #[builder(default = "DEFAULT_ROOT_LABEL.to_string()")]
    #[serde(default = "default_root_label")]
    pub root_label: String,

    /// Drop the `N directories, M files` report instead of treating it as
    /// a top-level entry.
    #[builder(default)]
    #[serde(default)]
    pub skip_summary: bool,
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

fn default_root_label() -> String {
    DEFAULT_ROOT_LABEL.to_string()
}

impl ParseConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.indent_width == Some(0) {
            return Err("Indent width must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ParseConfig {
    /// Create a new parse config builder.
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder::default()
    }

    /// Create a config with a custom indent width.
    ///
    /// A width of 0 is clamped to 1.
    pub fn with_indent_width(indent_width: usize) -> Self {
        Self {
            indent_width: indent_width.max(1),
            ..Self::default()
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            skip_summary: false,
        }
    }
}
