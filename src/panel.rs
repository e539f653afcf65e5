//! The selection panel: composition root and lifecycle owner.
//!
//! [`SelectionPanel::open`] hands back an owned handle - there is no
//! module-level singleton. The panel wires the engine to the host's
//! lifecycle events (keys, selection changes, model loads, focus) and
//! brackets everything with the desaturation override: colors are
//! flattened on open and restored on [`close`](SelectionPanel::close), or
//! from `Drop` if the panel goes away without one.
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
//!     .build();
//!
//! let mut panel = SelectionPanel::open(&mut model, Options::new(Mode::Residues));
//! panel.engine_mut().set_text(":42");
//! panel.engine_mut().itemize();
//! assert_eq!(panel.engine().object_count(), 1);
//! panel.close();
//! ```

use crate::engine::{Engine, Options};
use crate::host::Host;
use crate::input::KeyEvent;
use crate::saturation::ColorSnapshot;

/// Owned handle to an open selection panel.
pub struct SelectionPanel<H: Host> {
    engine: Engine<H>,
    snapshot: ColorSnapshot,
    open: bool,
}

impl<H: Host> SelectionPanel<H> {
    /// Open a panel over a host: desaturate the scene, then echo any
    /// pre-existing selection into the entry line.
    pub fn open(host: H, options: Options) -> Self {
        let mut panel = Self {
            engine: Engine::new(host, options),
            snapshot: ColorSnapshot::new(),
            open: true,
        };
        panel.desaturate();
        panel.engine.on_selection_changed();
        panel
    }

    /// The engine.
    pub fn engine(&self) -> &Engine<H> {
        &self.engine
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut Engine<H> {
        &mut self.engine
    }

    /// Key-release entry point. Returns whether a reconciliation ran.
    pub fn on_key(&mut self, event: KeyEvent) -> bool {
        self.engine.on_key(event)
    }

    /// Selection-changed entry point (latched against the engine's own
    /// writes).
    pub fn on_selection_changed(&mut self) {
        self.engine.notify_selection_changed();
    }

    /// Deferred latch release; call once the host's notification queue
    /// has drained.
    pub fn settle(&mut self) {
        self.engine.settle();
    }

    /// Models were opened: extend the desaturation override over the new
    /// molecules and revalidate the entry text against them.
    pub fn on_models_opened(&mut self) {
        self.desaturate();
        self.engine.itemize();
    }

    /// The entry gained focus: re-flatten, then put the tag colors back
    /// on whatever is depicted.
    pub fn on_focus_in(&mut self) {
        if self.engine.options().respond_to_focus {
            self.desaturate();
            self.engine.redepict();
        }
    }

    /// The entry lost focus.
    pub fn on_focus_out(&mut self) {
        if self.engine.options().respond_to_focus {
            self.snapshot.restore(self.engine.host_mut());
        }
    }

    /// Close the panel: undo all depiction and restore every recorded
    /// color. Consumes the handle.
    pub fn close(mut self) {
        self.teardown();
    }

    fn desaturate(&mut self) {
        let neutral = self.engine.options().neutral;
        let dim = self.engine.options().dim_background;
        let depicted = self.engine.depicted().to_vec();
        self.snapshot
            .desaturate(self.engine.host_mut(), neutral, &depicted, dim);
    }

    fn teardown(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.engine.undo_depict();
        self.snapshot.restore(self.engine.host_mut());
    }
}

impl<H: Host> Drop for SelectionPanel<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
