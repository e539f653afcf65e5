//! The text-to-selection synchronization engine.
//!
//! [`Engine`] owns the entry-line document, the ordered item list, the
//! object index (duplicate specifiers of one object share a tag), the
//! color cycle, and the three reconciliation paths:
//!
//! - keystroke -> [`itemize`](Engine::itemize): re-parse the document,
//!   revalidate every token, repaint, depict;
//! - external change -> [`notify_selection_changed`][notify]: diff
//!   against the last known selection, drop deselected items, echo new
//!   objects into the text;
//! - teardown -> [`clear_items`](Engine::clear_items) /
//!   [`undo_depict`](Engine::undo_depict).
//!
//! [notify]: Engine::notify_selection_changed
//!
//! Both live paths funnel through the same tag-assignment and depiction
//! primitives, which is what keeps text and 3D view consistent no matter
//! which side moved first.
//!
//! # Examples
//!
//! ```
//! use specline::model::Model;
//! use specline::{Engine, Mode, Options, Tag};
//!
//! let mut model = Model::builder()
//!     .molecule(1)
//!     .chain('A')
//!     .residue(42, "ALA")
//!     .atom("CA")
//!     .residue(43, "GLY")
//!     .atom("CA")
//!     .build();
//!
//! let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));
//! engine.set_text(":42 :42 :43");
//! engine.itemize();
//!
//! // Duplicate specifiers of one residue share the first tag.
//! let items = engine.items();
//! assert_eq!(items[0].tag(), Tag::Color(0));
//! assert_eq!(items[1].tag(), Tag::Color(0));
//! assert_eq!(items[2].tag(), Tag::Color(1));
//! assert_eq!(engine.object_count(), 2);
//! ```

mod depict;
mod guard;
mod item;
mod split;
mod sync;

pub use guard::SelectLatch;
pub use item::Item;
pub use split::{SplitSpecs, split_specs};

use std::collections::HashMap;

use crate::color::Rgba;
use crate::entry::EntryBuffer;
use crate::host::Host;
use crate::input::{KeyCode, KeyEvent};
use crate::object::{Mode, ObjectRef};
use crate::palette::{ColorCycle, Palette, Tag};

/// Engine and panel configuration.
#[derive(Clone, Debug)]
pub struct Options {
    /// Granularity specifiers resolve at.
    pub mode: Mode,
    /// Tag colors, cycled in document order.
    pub palette: Palette,
    /// Shade undone and desaturated objects are painted with.
    pub neutral: Rgba,
    /// Override the viewer background with the neutral shade while the
    /// panel is open.
    pub dim_background: bool,
    /// Ask the host to re-frame the camera after depiction changes.
    pub focus_follows_depiction: bool,
    /// Desaturate on focus-in and restore on focus-out.
    pub respond_to_focus: bool,
}

impl Options {
    /// Defaults for a mode: classic palette, half-transparent white
    /// neutral, background dimming and focus follow on, focus
    /// responsiveness off.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            palette: Palette::classic(),
            neutral: Rgba::WHITE.with_alpha(0.5),
            dim_background: true,
            focus_follows_depiction: true,
            respond_to_focus: false,
        }
    }

    /// Builder-style palette setter.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Builder-style neutral shade setter.
    #[must_use]
    pub fn with_neutral(mut self, neutral: Rgba) -> Self {
        self.neutral = neutral;
        self
    }

    /// Builder-style background dimming setter.
    #[must_use]
    pub fn with_dim_background(mut self, dim: bool) -> Self {
        self.dim_background = dim;
        self
    }

    /// Builder-style focus follow setter.
    #[must_use]
    pub fn with_focus_follows_depiction(mut self, follow: bool) -> Self {
        self.focus_follows_depiction = follow;
        self
    }

    /// Builder-style focus responsiveness setter.
    #[must_use]
    pub fn with_respond_to_focus(mut self, respond: bool) -> Self {
        self.respond_to_focus = respond;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(Mode::Atoms)
    }
}

type ItemHook = Box<dyn FnMut(&[Item])>;

#[derive(Debug)]
struct Group {
    tag: Tag,
    members: Vec<usize>,
}

/// Insertion-ordered map from resolved object to its item group.
#[derive(Debug, Default)]
struct ObjectIndex {
    order: Vec<ObjectRef>,
    groups: HashMap<ObjectRef, Group>,
}

impl ObjectIndex {
    fn clear(&mut self) {
        self.order.clear();
        self.groups.clear();
    }

    fn contains(&self, object: ObjectRef) -> bool {
        self.groups.contains_key(&object)
    }

    fn tag_of(&self, object: ObjectRef) -> Option<Tag> {
        self.groups.get(&object).map(|g| g.tag)
    }

    fn insert_first(&mut self, object: ObjectRef, tag: Tag, idx: usize) {
        self.order.push(object);
        self.groups.insert(
            object,
            Group {
                tag,
                members: vec![idx],
            },
        );
    }

    fn push_member(&mut self, object: ObjectRef, idx: usize) {
        if let Some(group) = self.groups.get_mut(&object) {
            group.members.push(idx);
        }
    }

    fn remove(&mut self, object: ObjectRef) {
        self.order.retain(|o| *o != object);
        self.groups.remove(&object);
    }

    fn members(&self, object: ObjectRef) -> &[usize] {
        self.groups.get(&object).map_or(&[], |g| g.members.as_slice())
    }

    fn objects(&self) -> &[ObjectRef] {
        &self.order
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// The synchronization engine. Owns the host handle, the document, and
/// every piece of reconciliation state.
pub struct Engine<H: Host> {
    host: H,
    entry: EntryBuffer,
    opts: Options,
    prefix: String,
    items: Vec<Item>,
    index: ObjectIndex,
    cycle: ColorCycle,
    latch: SelectLatch,
    depicted: Vec<ObjectRef>,
    last_selection: Vec<ObjectRef>,
    item_hooks: Vec<ItemHook>,
    clear_hooks: Vec<ItemHook>,
}

impl<H: Host> Engine<H> {
    /// Create an engine over a host.
    pub fn new(host: H, opts: Options) -> Self {
        let cycle = ColorCycle::new(opts.palette.len());
        Self {
            host,
            entry: EntryBuffer::new(),
            opts,
            prefix: String::new(),
            items: Vec::new(),
            index: ObjectIndex::default(),
            cycle,
            latch: SelectLatch::new(),
            depicted: Vec::new(),
            last_selection: Vec::new(),
            item_hooks: Vec::new(),
            clear_hooks: Vec::new(),
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The entry-line document.
    pub fn entry(&self) -> &EntryBuffer {
        &self.entry
    }

    /// Engine options.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Granularity mode.
    pub fn mode(&self) -> Mode {
        self.opts.mode
    }

    /// Current items in document order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Document text.
    pub fn text(&self) -> String {
        self.entry.content()
    }

    /// Tracked objects in first-appearance order.
    pub fn objects(&self) -> &[ObjectRef] {
        self.index.objects()
    }

    /// Number of distinct tracked objects.
    pub fn object_count(&self) -> usize {
        self.index.len()
    }

    /// Is this object currently tracked by an item group?
    pub fn tracks(&self, object: ObjectRef) -> bool {
        self.index.contains(object)
    }

    /// Tag shared by an object's item group.
    pub fn tag_of(&self, object: ObjectRef) -> Option<Tag> {
        self.index.tag_of(object)
    }

    /// Items resolved to an object, in document order.
    pub fn items_of(&self, object: ObjectRef) -> Vec<&Item> {
        self.index
            .members(object)
            .iter()
            .map(|&idx| &self.items[idx])
            .collect()
    }

    /// Atoms currently painted by this engine.
    pub fn depicted(&self) -> &[ObjectRef] {
        &self.depicted
    }

    /// Selection snapshot from the last reconciliation.
    pub fn last_selection(&self) -> &[ObjectRef] {
        &self.last_selection
    }

    /// True while the engine suppresses selection notifications.
    pub fn is_latched(&self) -> bool {
        self.latch.is_armed()
    }

    /// Deferred latch release point; call after the host's notification
    /// queue has drained (e.g. from a short timer).
    pub fn settle(&mut self) {
        self.latch.settle();
    }

    /// Register a hook fired with all items after each itemize pass.
    pub fn add_item_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&[Item]) + 'static,
    {
        self.item_hooks.push(Box::new(hook));
    }

    /// Register a hook fired with the outgoing items before each
    /// destructive clear.
    pub fn add_clear_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&[Item]) + 'static,
    {
        self.clear_hooks.push(Box::new(hook));
    }

    /// Replace the document text (cursor moves to the end). Call
    /// [`itemize`](Self::itemize) to reconcile.
    pub fn set_text(&mut self, text: &str) {
        self.entry.set_text(text);
        self.entry.set_cursor(self.entry.len_chars());
    }

    /// Feed one key release. Editing keys change the document at the
    /// cursor and trigger a full re-itemization; special keys are
    /// filtered out. Returns whether a reconciliation ran.
    pub fn on_key(&mut self, event: KeyEvent) -> bool {
        if !event.edits_entry() {
            return false;
        }
        match event.code {
            KeyCode::Char(c) => self.entry.insert_char(c),
            KeyCode::Backspace => self.entry.backspace(),
            KeyCode::Delete => self.entry.delete_forward(),
            _ => return false,
        }
        self.itemize();
        true
    }

    /// Re-derive all state from the document text.
    ///
    /// Destructively clears items and depiction, splits the text into
    /// `(token, separator)` pairs, validates each token, assigns tags
    /// (duplicates of one object share the first tag), repaints the
    /// document, restores the cursor, fires item hooks, and depicts. On
    /// empty or blank text the pass stops after the clear.
    pub fn itemize(&mut self) {
        let text = self.entry.content();
        let cursor = self.entry.cursor();

        self.clear_items();

        let split = split_specs(&text);
        if split.pairs.is_empty() {
            self.refresh_last_selection();
            return;
        }

        self.prefix = split.prefix;
        for (token, sep) in split.pairs {
            let mut item = Item::parse(token, sep);
            item.validate(&self.host, self.opts.mode);
            self.register(item);
        }

        self.repaint();
        self.entry.set_cursor(cursor);
        self.fire_item_hooks();

        let all: Vec<usize> = (0..self.items.len()).collect();
        self.depict_indices(&all, true);
        self.refresh_last_selection();
    }

    /// Drop all items and their depiction. Fires clear hooks first, then
    /// undoes depiction, empties the index, and restarts the color cycle.
    pub fn clear_items(&mut self) {
        self.fire_clear_hooks();
        self.undo_depict();
        self.items.clear();
        self.index.clear();
        self.cycle.reset();
        self.prefix.clear();
    }

    /// Reassign tags to all items in document order from a freshly reset
    /// cycle and repaint the spans. Items sharing an object keep sharing
    /// one tag; invalid items keep `Wrong`.
    pub fn rebuild_tags(&mut self) {
        self.cycle.reset();
        self.index.clear();
        for idx in 0..self.items.len() {
            match self.items[idx].object {
                Some(object) => match self.index.tag_of(object) {
                    Some(tag) => {
                        self.items[idx].tag = tag;
                        self.index.push_member(object, idx);
                    }
                    None => {
                        let tag = self.cycle.next_tag();
                        self.items[idx].tag = tag;
                        self.index.insert_first(object, tag, idx);
                    }
                },
                None => self.items[idx].tag = Tag::Wrong,
            }
        }
        self.repaint_spans();
    }

    fn register(&mut self, mut item: Item) -> usize {
        let idx = self.items.len();
        match item.object {
            Some(object) => match self.index.tag_of(object) {
                Some(tag) => {
                    item.tag = tag;
                    self.index.push_member(object, idx);
                }
                None => {
                    let tag = self.cycle.next_tag();
                    item.tag = tag;
                    self.index.insert_first(object, tag, idx);
                }
            },
            None => item.tag = Tag::Wrong,
        }
        self.items.push(item);
        idx
    }

    /// Rewrite the document from the items and repaint all spans.
    fn repaint(&mut self) {
        let mut doc = self.prefix.clone();
        for item in &self.items {
            doc.push_str(&item.text);
            doc.push_str(&item.sep);
        }
        self.entry.set_text(&doc);
        self.repaint_spans();
    }

    /// Repaint spans over the existing text with two advancing marks, so
    /// placement is anchored and a duplicate token earlier in the
    /// document can never steal a later item's span.
    fn repaint_spans(&mut self) {
        self.entry.clear_spans();
        let mut mark = self.prefix.chars().count();
        for item in &self.items {
            let end = mark + item.text.chars().count();
            let style = self.opts.palette.style_for(item.tag);
            self.entry.add_span(mark..end, item.tag, style);
            mark = end + item.sep.chars().count();
        }
    }

    fn fire_item_hooks(&mut self) {
        for hook in &mut self.item_hooks {
            hook(&self.items);
        }
    }

    fn fire_clear_hooks(&mut self) {
        for hook in &mut self.clear_hooks {
            hook(&self.items);
        }
    }

    fn refresh_last_selection(&mut self) {
        self.last_selection = self.host.current_selection(self.opts.mode);
    }
}
