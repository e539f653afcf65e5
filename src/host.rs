//! The host collaborator contract.
//!
//! Everything the engine needs from the surrounding viewer application is
//! behind this one trait: specifier resolution and synthesis, the live
//! selection store, the color service, structure enumeration, and camera
//! focus. The engine drives a [`Host`] and nothing else, so any viewer
//! (or the in-memory [`Model`](crate::model::Model)) can sit behind it.
//!
//! Hosts raise their "selection changed" notification for every selection
//! mutation, including ones made by the engine itself; the adapter routes
//! those into
//! [`Engine::notify_selection_changed`](crate::Engine::notify_selection_changed),
//! which breaks the feedback cycle.

use crate::color::Rgba;
use crate::object::{Mode, ObjectRef};

/// What the viewer camera should frame after a depiction change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    /// Frame the current selection.
    Selection,
    /// Frame everything that is open.
    Everything,
}

/// Contract between the engine and the surrounding viewer.
///
/// Resolution and synthesis must not fail loudly: malformed, ambiguous, and
/// unmatched specifiers all come back as `None`.
pub trait Host {
    /// Resolve a specifier to exactly one object of the mode's kind.
    /// Zero matches, multiple matches, and syntax errors all yield `None`.
    fn resolve(&self, spec: &str, mode: Mode) -> Option<ObjectRef>;

    /// Inverse of [`resolve`](Host::resolve): the canonical specifier for
    /// an object. `None` for kinds with no textual form (bonds); callers
    /// skip the text echo for those.
    fn specifier(&self, object: ObjectRef) -> Option<String>;

    /// The atomic sub-objects an object expands to for coloring and
    /// selection. An atom expands to itself.
    fn expand_atoms(&self, object: ObjectRef) -> Vec<ObjectRef>;

    /// Current live selection, projected to the mode's granularity, in a
    /// deterministic order.
    fn current_selection(&self, mode: Mode) -> Vec<ObjectRef>;

    /// Add objects to the live selection.
    fn select(&mut self, objects: &[ObjectRef]);

    /// Remove objects from the live selection.
    fn deselect(&mut self, objects: &[ObjectRef]);

    /// Empty the live selection.
    fn clear_selection(&mut self);

    /// Current display color of an object.
    fn color_of(&self, object: ObjectRef) -> Rgba;

    /// Set the display color of an object.
    fn set_color(&mut self, object: ObjectRef, color: Rgba);

    /// All open molecules.
    fn molecules(&self) -> Vec<ObjectRef>;

    /// The residues of a molecule. Empty for non-molecule handles.
    fn residues_of(&self, molecule: ObjectRef) -> Vec<ObjectRef>;

    /// Viewer background color.
    fn background(&self) -> Rgba {
        Rgba::BLACK
    }

    /// Override the viewer background color.
    fn set_background(&mut self, _color: Rgba) {}

    /// Move the viewer camera. Hosts without camera control ignore this.
    fn focus(&mut self, _target: FocusTarget) {}
}

impl<H: Host + ?Sized> Host for &mut H {
    fn resolve(&self, spec: &str, mode: Mode) -> Option<ObjectRef> {
        (**self).resolve(spec, mode)
    }

    fn specifier(&self, object: ObjectRef) -> Option<String> {
        (**self).specifier(object)
    }

    fn expand_atoms(&self, object: ObjectRef) -> Vec<ObjectRef> {
        (**self).expand_atoms(object)
    }

    fn current_selection(&self, mode: Mode) -> Vec<ObjectRef> {
        (**self).current_selection(mode)
    }

    fn select(&mut self, objects: &[ObjectRef]) {
        (**self).select(objects);
    }

    fn deselect(&mut self, objects: &[ObjectRef]) {
        (**self).deselect(objects);
    }

    fn clear_selection(&mut self) {
        (**self).clear_selection();
    }

    fn color_of(&self, object: ObjectRef) -> Rgba {
        (**self).color_of(object)
    }

    fn set_color(&mut self, object: ObjectRef, color: Rgba) {
        (**self).set_color(object, color);
    }

    fn molecules(&self) -> Vec<ObjectRef> {
        (**self).molecules()
    }

    fn residues_of(&self, molecule: ObjectRef) -> Vec<ObjectRef> {
        (**self).residues_of(molecule)
    }

    fn background(&self) -> Rgba {
        (**self).background()
    }

    fn set_background(&mut self, color: Rgba) {
        (**self).set_background(color);
    }

    fn focus(&mut self, target: FocusTarget) {
        (**self).focus(target);
    }
}
