//! Color tags, the tag palette, and the round-robin tag cycle.
//!
//! Every item in the entry line carries a [`Tag`]: either an index into the
//! active [`Palette`] or the reserved `Wrong` sentinel for specifiers that
//! failed resolution. Tags are assigned from a [`ColorCycle`], a restartable
//! round-robin over the palette; the cycle never emits `Wrong`.
//!
//! Resetting the cycle and reassigning in document order is deterministic:
//! the same token sequence always produces the same tag sequence.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::Style;

/// Color tag carried by an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Reserved sentinel for items that failed resolution.
    Wrong,
    /// Index into the active palette.
    Color(u8),
}

impl Tag {
    /// True for the `Wrong` sentinel.
    #[must_use]
    pub fn is_wrong(&self) -> bool {
        matches!(self, Self::Wrong)
    }

    /// Palette index, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Wrong => None,
            Self::Color(i) => Some(usize::from(*i)),
        }
    }
}

/// One palette entry: a display name and its color.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteEntry {
    pub name: String,
    pub color: Rgba,
}

/// Ordered set of tag colors.
///
/// The default palette is the classic eight-color table of the original
/// selection widget. Custom palettes hold 1 to 256 entries.
#[derive(Clone, Debug)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    wrong: Style,
}

const CLASSIC: [(&str, &str); 8] = [
    ("blue", "#0000ff"),
    ("red", "#ff0000"),
    ("purple", "#a020f0"),
    ("sienna", "#a0522d"),
    ("grey", "#708090"),
    ("green", "#00ff00"),
    ("turquoise", "#40e0d0"),
    ("gold", "#ffd700"),
];

impl Palette {
    /// The classic eight-color palette.
    #[must_use]
    pub fn classic() -> Self {
        Self::from_hex_table(&CLASSIC).expect("classic palette table is well formed")
    }

    /// Build a palette from entries.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyPalette);
        }
        if entries.len() > 256 {
            return Err(Error::PaletteTooLarge(entries.len()));
        }
        Ok(Self {
            entries,
            wrong: Style::fg(Rgba::WHITE).with_bg(Rgba::RED),
        })
    }

    /// Build a palette from `(name, hex)` pairs.
    pub fn from_hex_table(table: &[(&str, &str)]) -> Result<Self> {
        let entries = table
            .iter()
            .map(|(name, hex)| {
                Rgba::from_hex(hex)
                    .map(|color| PaletteEntry {
                        name: (*name).to_string(),
                        color,
                    })
                    .ok_or_else(|| Error::InvalidColor((*hex).to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A palette is never empty; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color for a tag. `None` for `Wrong`.
    #[must_use]
    pub fn color_for(&self, tag: Tag) -> Option<Rgba> {
        let idx = tag.index()?;
        self.entries.get(idx).map(|e| e.color)
    }

    /// Display name for a tag.
    #[must_use]
    pub fn name_for(&self, tag: Tag) -> &str {
        match tag.index().and_then(|i| self.entries.get(i)) {
            Some(entry) => &entry.name,
            None => "wrong",
        }
    }

    /// Span style for a tag: colored foreground for palette tags,
    /// white-on-red for `Wrong`.
    #[must_use]
    pub fn style_for(&self, tag: Tag) -> Style {
        match self.color_for(tag) {
            Some(color) => Style::fg(color),
            None => self.wrong,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// Restartable round-robin over a palette.
///
/// An explicit index rather than an iterator, so a reset is a plain
/// assignment and the emitted sequence is trivially predictable.
#[derive(Clone, Copy, Debug)]
pub struct ColorCycle {
    len: usize,
    next: usize,
}

impl ColorCycle {
    /// Cycle over `len` palette entries.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len, next: 0 }
    }

    /// Emit the next tag, wrapping around the palette.
    pub fn next_tag(&mut self) -> Tag {
        let tag = Tag::Color(self.next as u8);
        self.next = (self.next + 1) % self.len.max(1);
        tag
    }

    /// Restart from the first palette entry.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
