//! Buffer configuration.

use crate::style::{Stage, Style};
use crate::terminal::{env_flag, NO_COLOR};

/// Default window height of a new buffer.
pub const DEFAULT_MAX_WINDOW: usize = 15;

/// Configuration for a [`Buffer`](crate::Buffer) or [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    /// Maximum number of physical rows the live window may occupy.
    pub max_window: usize,
    /// Token written (followed by a space) before every scrolling row.
    pub prefix: String,
    /// Style for scrolling rows.
    pub printer_style: Style,
    /// Style for stage summary rows.
    pub stage_style: Style,
    /// Whether every print blocks until it is drawn.
    pub synchronous: bool,
    /// Whether style escapes may be written at all.
    pub color: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            max_window: DEFAULT_MAX_WINDOW,
            prefix: String::new(),
            printer_style: Style::PLAIN,
            stage_style: Style::PLAIN,
            synchronous: false,
            color: !env_flag(NO_COLOR),
        }
    }
}

impl BufferConfig {
    /// Default configuration with the given window height.
    pub fn new(max_window: usize) -> Self {
        Self {
            max_window,
            ..Self::default()
        }
    }

    /// Set the row prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the scrolling row style.
    #[must_use]
    pub const fn with_printer_style(mut self, style: Style) -> Self {
        self.printer_style = style;
        self
    }

    /// Set the stage summary style.
    #[must_use]
    pub const fn with_stage_style(mut self, style: Style) -> Self {
        self.stage_style = style;
        self
    }

    /// Make every print block until drawn.
    #[must_use]
    pub const fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    /// Allow or forbid style escapes.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The style used for rows of the given stage.
    pub const fn style_for(&self, stage: Stage) -> &Style {
        match stage {
            Stage::Printer => &self.printer_style,
            Stage::Finalizer => &self.stage_style,
        }
    }
}
