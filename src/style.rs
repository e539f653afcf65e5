//! Text styling for entry-line spans.
//!
//! A [`Style`] is what a color tag renders to in the text buffer: an
//! optional foreground, an optional background, and a small set of
//! [`TextAttributes`]. `None` colors mean "use the widget default" so the
//! host theme shows through unstyled text.

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD          = 0x01;
        /// Dim/decreased intensity.
        const DIM           = 0x02;
        /// Italic.
        const ITALIC        = 0x04;
        /// Underlined text.
        const UNDERLINE     = 0x08;
        /// Swapped foreground/background.
        const INVERSE       = 0x10;
        /// Strikethrough text.
        const STRIKETHROUGH = 0x20;
    }
}

/// Complete span style: colors plus attributes.
///
/// Styles are immutable and cheap to copy. [`Style::merge`] layers another
/// style on top; the overlay's colors win where set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    /// Foreground color (None = widget default).
    pub fg: Option<Rgba>,
    /// Background color (None = widget default).
    pub bg: Option<Rgba>,
    /// Text rendering attributes.
    pub attributes: TextAttributes,
}

impl Style {
    /// Empty style with no colors or attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    /// Create a style with only foreground color.
    #[must_use]
    pub const fn fg(color: Rgba) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a style with only background color.
    #[must_use]
    pub const fn bg(color: Rgba) -> Self {
        Self {
            fg: None,
            bg: Some(color),
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a bold style.
    #[must_use]
    pub const fn bold() -> Self {
        Self {
            fg: None,
            bg: None,
            attributes: TextAttributes::BOLD,
        }
    }

    /// Builder-style foreground setter.
    #[must_use]
    pub const fn with_fg(mut self, color: Rgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Builder-style background setter.
    #[must_use]
    pub const fn with_bg(mut self, color: Rgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Builder-style bold setter.
    #[must_use]
    pub fn with_bold(mut self) -> Self {
        self.attributes |= TextAttributes::BOLD;
        self
    }

    /// Merge another style over this one. The overlay's colors win where
    /// set; attributes are OR-combined.
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            fg: overlay.fg.or(self.fg),
            bg: overlay.bg.or(self.bg),
            attributes: self.attributes | overlay.attributes,
        }
    }

    /// True if the style has no visible effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_none_is_empty() {
        assert!(Style::NONE.is_empty());
        assert!(!Style::bold().is_empty());
        assert!(!Style::fg(Rgba::RED).is_empty());
    }

    #[test]
    fn test_merge_overlay_colors_win() {
        let base = Style::fg(Rgba::RED).with_bg(Rgba::BLACK);
        let overlay = Style::fg(Rgba::WHITE);
        let merged = base.merge(overlay);
        assert_eq!(merged.fg, Some(Rgba::WHITE));
        assert_eq!(merged.bg, Some(Rgba::BLACK));
    }

    #[test]
    fn test_merge_attributes_accumulate() {
        let merged = Style::bold().merge(Style {
            attributes: TextAttributes::UNDERLINE,
            ..Style::NONE
        });
        assert!(merged.attributes.contains(TextAttributes::BOLD));
        assert!(merged.attributes.contains(TextAttributes::UNDERLINE));
    }
}
