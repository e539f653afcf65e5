//! Depiction and its undo.
//!
//! Depicting an item means expanding its resolved object to atoms, adding
//! those atoms to the host's live selection (under the self-selecting
//! latch), recording them in the depicted set, and painting them with the
//! item's tag color. Undo reverses exactly what was recorded and nothing
//! else.

use crate::host::{FocusTarget, Host};
use crate::object::ObjectRef;

use super::Engine;

impl<H: Host> Engine<H> {
    /// Depict every current item: select and color its atoms.
    pub fn depict_items(&mut self) {
        let all: Vec<usize> = (0..self.items.len()).collect();
        self.depict_indices(&all, true);
    }

    /// Re-apply tag colors to every item's atoms without touching the
    /// selection.
    pub fn redepict(&mut self) {
        let all: Vec<usize> = (0..self.items.len()).collect();
        self.depict_indices(&all, false);
    }

    /// Depict the given items. With `select` false only the coloring side
    /// runs - used when echoing objects that are already externally
    /// selected, so no redundant selection write (and no notification)
    /// happens.
    pub(crate) fn depict_indices(&mut self, indices: &[usize], select: bool) {
        let mut touched = false;
        for &idx in indices {
            let Some(object) = self.items[idx].object else {
                continue;
            };
            let Some(color) = self.opts.palette.color_for(self.items[idx].tag) else {
                continue;
            };
            let atoms = self.host.expand_atoms(object);
            if atoms.is_empty() {
                continue;
            }

            if select {
                self.latch.arm();
                self.host.select(&atoms);
                self.latch.schedule_release();
            }
            for atom in atoms {
                if !self.depicted.contains(&atom) {
                    self.depicted.push(atom);
                }
                self.host.set_color(atom, color);
            }
            touched = true;
        }

        if touched {
            self.focus_follow();
        }
    }

    /// Undo everything currently depicted: neutral colors, removal from
    /// the live selection (latched), empty depicted set.
    pub fn undo_depict(&mut self) {
        if self.depicted.is_empty() {
            return;
        }
        let atoms = std::mem::take(&mut self.depicted);
        for &atom in &atoms {
            self.host.set_color(atom, self.opts.neutral);
        }
        self.latch.arm();
        self.host.deselect(&atoms);
        self.latch.schedule_release();
    }

    /// Undo the given items only: their atoms leave the depicted set, get
    /// the neutral shade, and are deselected.
    pub(crate) fn undo_depict_indices(&mut self, indices: &[usize]) {
        let mut atoms: Vec<ObjectRef> = Vec::new();
        for &idx in indices {
            let Some(object) = self.items[idx].object else {
                continue;
            };
            for atom in self.host.expand_atoms(object) {
                if !atoms.contains(&atom) {
                    atoms.push(atom);
                }
            }
        }
        if atoms.is_empty() {
            return;
        }

        self.depicted.retain(|a| !atoms.contains(a));
        for &atom in &atoms {
            self.host.set_color(atom, self.opts.neutral);
        }
        self.latch.arm();
        self.host.deselect(&atoms);
        self.latch.schedule_release();
    }

    fn focus_follow(&mut self) {
        if !self.opts.focus_follows_depiction {
            return;
        }
        let target = if self.host.current_selection(self.opts.mode).is_empty() {
            FocusTarget::Everything
        } else {
            FocusTarget::Selection
        };
        self.host.focus(target);
    }
}
