//! Reconciliation with external selection changes.
//!
//! The host raises its "selection changed" notification for every
//! selection mutation, including the engine's own. Incoming notifications
//! pass through the self-selecting latch; the survivors are diffed against
//! the last known selection: fully deselected objects lose their items
//! (text removed by whole-token search, since stored offsets are stale
//! after edits), the remaining items get freshly cycled tags, and newly
//! selected objects are echoed into the document tail and depicted
//! color-only.

use std::collections::HashSet;

use crate::diag::{LogLevel, diag};
use crate::host::Host;
use crate::object::ObjectRef;

use super::{Engine, Item};

impl<H: Host> Engine<H> {
    /// External notification entry point. Swallows notifications caused
    /// by the engine's own latched selection writes.
    pub fn notify_selection_changed(&mut self) {
        if self.latch.swallow() {
            diag!(LogLevel::Debug, "suppressed self-initiated selection change");
            return;
        }
        self.on_selection_changed();
    }

    /// Reconcile with the host's current selection.
    ///
    /// Idempotent: reconciling twice against the same selection changes
    /// nothing the second time.
    pub fn on_selection_changed(&mut self) {
        let current = self.host.current_selection(self.opts.mode);
        let current_set: HashSet<ObjectRef> = current.iter().copied().collect();

        let doomed: Vec<ObjectRef> = self
            .index
            .objects()
            .iter()
            .copied()
            .filter(|object| !current_set.contains(object))
            .collect();
        if !doomed.is_empty() {
            self.remove_objects(&doomed);
        }

        self.rebuild_tags();

        // survivors may wear new tags now; re-sync their 3D colors
        // without touching the selection
        self.redepict();

        let last: HashSet<ObjectRef> = self.last_selection.iter().copied().collect();
        let added: Vec<ObjectRef> = current
            .iter()
            .copied()
            .filter(|object| !last.contains(object) && !self.index.contains(*object))
            .collect();
        for object in added {
            self.echo_object(object);
        }

        self.last_selection = current;
    }

    /// Drop every item of the given objects: undo their depiction, delete
    /// their text (token plus trailing separator, located by whole-token
    /// search), and forget their index entries.
    fn remove_objects(&mut self, doomed: &[ObjectRef]) {
        let doomed_set: HashSet<ObjectRef> = doomed.iter().copied().collect();
        let indices: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.object.is_some_and(|o| doomed_set.contains(&o)))
            .map(|(idx, _)| idx)
            .collect();

        self.undo_depict_indices(&indices);

        for &idx in &indices {
            let text = self.items[idx].text.clone();
            let span = self.items[idx].text.chars().count() + self.items[idx].sep.chars().count();
            if let Some(start) = self.entry.search_token(&text, 0) {
                let end = (start + span).min(self.entry.len_chars());
                self.entry.remove(start..end);
            }
        }

        self.items
            .retain(|item| !item.object.is_some_and(|o| doomed_set.contains(&o)));
        for &object in doomed {
            self.index.remove(object);
        }
    }

    /// Append an item for an externally selected object: synthesized
    /// specifier plus one separator at the document tail, next cycled tag,
    /// color-only depiction (the object is already selected).
    fn echo_object(&mut self, object: ObjectRef) {
        let Some(text) = self.host.specifier(object) else {
            diag!(
                LogLevel::Debug,
                "{:?} has no specifier form; text echo skipped",
                object.kind()
            );
            return;
        };

        if self.items.is_empty() {
            // whatever is left in the document is whitespace; keep it as
            // the prefix so text still equals prefix + items
            self.prefix = self.entry.content();
        } else if let Some(last) = self.items.last_mut() {
            if last.sep.is_empty() {
                last.sep.push(' ');
                self.entry.append(" ");
            }
        }

        let start = self.entry.len_chars();
        let idx = self.register(Item::echoed(object, text, " "));
        let token_len = self.items[idx].text.chars().count();
        let source = self.items[idx].to_string();
        self.entry.append(&source);

        let tag = self.items[idx].tag;
        let style = self.opts.palette.style_for(tag);
        self.entry.add_span(start..start + token_len, tag, style);

        self.depict_indices(&[idx], false);
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Engine, Options};
    use crate::host::Host;
    use crate::model::Model;
    use crate::object::Mode;
    use crate::palette::Tag;

    fn model() -> Model {
        Model::builder()
            .molecule(1)
            .chain('A')
            .residue(42, "ALA")
            .atom("CA")
            .residue(43, "GLY")
            .atom("CA")
            .residue(44, "SER")
            .atom("CA")
            .build()
    }

    #[test]
    fn test_external_removal_deletes_items_and_recycles_tags() {
        let mut model = model();
        let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));
        engine.set_text(":42 :43");
        engine.itemize();
        engine.settle();

        let r42 = engine.host().resolve(":42", Mode::Residues).unwrap();
        let atoms = engine.host().expand_atoms(r42);
        engine.host_mut().deselect(&atoms);
        engine.notify_selection_changed();

        assert_eq!(engine.text(), ":43");
        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.items()[0].tag(), Tag::Color(0));
        assert!(!engine.tracks(r42));
    }

    #[test]
    fn test_external_addition_echoes_at_tail() {
        let mut model = model();
        let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));
        engine.set_text(":42");
        engine.itemize();
        engine.settle();

        let r44 = engine.host().resolve(":44", Mode::Residues).unwrap();
        let atoms = engine.host().expand_atoms(r44);
        engine.host_mut().select(&atoms);
        engine.notify_selection_changed();

        assert_eq!(engine.text(), ":42 #1:44.A ");
        assert!(engine.tracks(r44));
        assert_eq!(engine.tag_of(r44), Some(Tag::Color(1)));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut model = model();
        let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));
        engine.set_text(":42 :43");
        engine.itemize();
        engine.settle();

        engine.notify_selection_changed();
        let text = engine.text();
        let tags: Vec<Tag> = engine.items().iter().map(super::Item::tag).collect();

        engine.notify_selection_changed();
        assert_eq!(engine.text(), text);
        let tags_after: Vec<Tag> = engine.items().iter().map(super::Item::tag).collect();
        assert_eq!(tags, tags_after);
    }
}
