//! Runtime configuration.

/// Default number of list elements shown before eliding.
pub const LIST_PREVIEW: usize = 10;

/// Default number of dictionary entries shown before eliding.
pub const DICT_PREVIEW: usize = 5;

/// Default nesting depth at which collections collapse to `[...]`.
pub const MAX_FORMAT_DEPTH: usize = 3;

/// Limits applied when formatting values for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    /// List elements shown before `...`.
    pub list_preview: usize,
    /// Dictionary entries shown before `...`.
    pub dict_preview: usize,
    /// Collections nested this deep are elided.
    pub max_depth: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            list_preview: LIST_PREVIEW,
            dict_preview: DICT_PREVIEW,
            max_depth: MAX_FORMAT_DEPTH,
        }
    }
}

impl FormatOptions {
    /// No truncation at any depth.
    pub fn unlimited() -> Self {
        Self {
            list_preview: usize::MAX,
            dict_preview: usize::MAX,
            max_depth: usize::MAX,
        }
    }
}

/// Settings for a [`Runtime`](crate::Runtime).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub format: FormatOptions,
    /// Install the tracing subscriber when the runtime is created.
    pub init_tracing: bool,
}

impl RuntimeConfig {
    #[must_use]
    pub fn with_list_preview(mut self, count: usize) -> Self {
        self.format.list_preview = count;
        self
    }

    #[must_use]
    pub fn with_dict_preview(mut self, count: usize) -> Self {
        self.format.dict_preview = count;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.format.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.init_tracing = enabled;
        self
    }
}
