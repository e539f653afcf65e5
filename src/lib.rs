//! `specline` - selection-entry synchronization for molecular viewers.
//!
//! A molecular visualization host shows a one-line text entry in which the
//! user types space-separated object specifiers (`#1:42.A@CA ...`). This
//! crate owns the hard part of that widget: the bidirectional mapping
//! between the free-form, incrementally edited text and the host's live,
//! externally mutable selection, kept consistent under keystrokes, external
//! selection changes, and model loads - without losing the cursor, without
//! feedback loops, and with deterministic color-tag assignment.
//!
//! The host side (rendering, specifier evaluation, camera control) is
//! reached through the [`Host`] trait; an in-memory reference model for
//! tests and embedding experiments lives in [`model`].
//!
//! # Examples
//!
//! ```
//! use specline::model::Model;
//! use specline::{Mode, Options, SelectionPanel};
//!
//! let mut model = Model::builder()
//!     .molecule(1)
//!     .chain('A')
//!     .residue(42, "ALA")
//!     .atom("CA")
//!     .atom("CB")
//!     .build();
//!
//! let mut panel = SelectionPanel::open(&mut model, Options::new(Mode::Atoms));
//! panel.engine_mut().set_text("#1:42.A@CA nonsense");
//! panel.engine_mut().itemize();
//!
//! let items = panel.engine().items();
//! assert!(items[0].is_valid());
//! assert!(!items[1].is_valid());
//! panel.close();
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow palette::ColorCycle etc
#![allow(clippy::missing_errors_doc)] // Fallible surface is tiny and obvious
#![allow(clippy::missing_panics_doc)] // Builder contracts documented inline
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::must_use_candidate)] // Applied where it matters
#![allow(clippy::return_self_not_must_use)] // Builder chains read fine either way
#![allow(clippy::cast_possible_truncation)] // Palette indices are bounded by construction

pub mod color;
pub mod diag;
pub mod engine;
pub mod entry;
pub mod error;
pub mod host;
pub mod input;
pub mod model;
pub mod object;
pub mod palette;
pub mod panel;
pub mod saturation;
pub mod style;

// Re-export core types at crate root
pub use color::Rgba;
pub use diag::{LogLevel, set_log_callback};
pub use engine::{Engine, Item, Options};
pub use entry::{EntryBuffer, TagSpan};
pub use error::{Error, Result};
pub use host::{FocusTarget, Host};
pub use input::{KeyCode, KeyEvent, KeyModifiers};
pub use object::{Mode, ObjectKind, ObjectRef};
pub use palette::{ColorCycle, Palette, Tag};
pub use panel::SelectionPanel;
pub use saturation::ColorSnapshot;
pub use style::{Style, TextAttributes};
