//! Style: the color-attributed line writer.
//!
//! A styled row is written as:
//!
//! ```text
//! [enter escapes] [prefix + " "] chunk [leave escape] LF
//! ```
//!
//! A plain style (no colors, no modifiers) writes no escapes at all, so
//! piped output stays clean.

use crate::terminal::OutputBuffer;
use bitflags::bitflags;
use crossterm::{
    queue,
    style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use stagebuf::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

impl Modifiers {
    const ATTRIBUTES: [(Self, Attribute); 8] = [
        (Self::BOLD, Attribute::Bold),
        (Self::DIM, Attribute::Dim),
        (Self::ITALIC, Attribute::Italic),
        (Self::UNDERLINE, Attribute::Underlined),
        (Self::BLINK, Attribute::SlowBlink),
        (Self::REVERSED, Attribute::Reverse),
        (Self::HIDDEN, Attribute::Hidden),
        (Self::STRIKETHROUGH, Attribute::CrossedOut),
    ];

    /// The crossterm attributes this set enables, in SGR order.
    pub fn attributes(self) -> impl Iterator<Item = Attribute> {
        Self::ATTRIBUTES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, attr)| attr)
    }
}

/// Which style a row is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Scrolling rows inside the live window.
    Printer,
    /// The summary line written when a stage finishes.
    Finalizer,
}

/// Styling attributes for a class of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// The unstyled style.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        modifiers: Modifiers::empty(),
    };

    /// A style with just a foreground color.
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Set the background color.
    #[must_use]
    pub const fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Whether writing with this style emits any escapes.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }

    /// Write one row: enter escapes, optional prefix, text, leave escape, LF.
    ///
    /// With `colored == false` the escapes are skipped and only the text
    /// is written.
    pub fn write_line(&self, out: &mut OutputBuffer, prefix: &str, text: &str, colored: bool) {
        let styled = colored && !self.is_plain();
        if styled {
            self.enter(out);
        }
        if !prefix.is_empty() {
            out.write_str(prefix);
            out.write_str(" ");
        }
        out.write_str(text);
        if styled {
            let _ = queue!(out, SetAttribute(Attribute::Reset));
        }
        out.newline();
    }

    fn enter(&self, out: &mut OutputBuffer) {
        for attr in self.modifiers.attributes() {
            let _ = queue!(out, SetAttribute(attr));
        }
        if let Some(fg) = self.fg {
            let _ = queue!(out, SetForegroundColor(fg));
        }
        if let Some(bg) = self.bg {
            let _ = queue!(out, SetBackgroundColor(bg));
        }
    }
}
