//! One parsed-and-resolved unit of entry text.

use std::fmt;

use crate::host::Host;
use crate::object::{Mode, ObjectRef};
use crate::palette::Tag;

/// One token of the entry line and its resolution outcome.
///
/// An item is created either by parsing a typed token (resolution may
/// fail) or by echoing an externally selected object into the text
/// (always valid, text synthesized from the object). Validity is the
/// presence of a resolved object: ambiguous matches, zero matches, and
/// malformed syntax all collapse into "invalid", never into an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub(crate) text: String,
    pub(crate) sep: String,
    pub(crate) tag: Tag,
    pub(crate) object: Option<ObjectRef>,
}

impl Item {
    /// Item from a typed token, not yet resolved.
    pub(crate) fn parse(text: impl Into<String>, sep: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sep: sep.into(),
            tag: Tag::Wrong,
            object: None,
        }
    }

    /// Item echoed from an externally selected object. The text comes from
    /// the host's specifier synthesis, so the item is valid by
    /// construction.
    pub(crate) fn echoed(object: ObjectRef, text: String, sep: impl Into<String>) -> Self {
        Self {
            text,
            sep: sep.into(),
            tag: Tag::Wrong,
            object: Some(object),
        }
    }

    /// Resolve the token against the host, unless an object is already
    /// attached.
    pub(crate) fn validate<H: Host>(&mut self, host: &H, mode: Mode) {
        if self.object.is_none() {
            self.object = host.resolve(&self.text, mode);
        }
    }

    /// The token text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The whitespace separator following the token (empty for the last
    /// token).
    #[must_use]
    pub fn sep(&self) -> &str {
        &self.sep
    }

    /// The color tag assigned to this item.
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The resolved object, if resolution succeeded.
    #[must_use]
    pub fn object(&self) -> Option<ObjectRef> {
        self.object
    }

    /// True when the token resolved to exactly one object.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.object.is_some()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.text, self.sep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{AtomId, ObjectRef};

    #[test]
    fn test_parsed_item_starts_invalid() {
        let item = Item::parse("xyz", " ");
        assert!(!item.is_valid());
        assert_eq!(item.tag(), Tag::Wrong);
        assert_eq!(item.object(), None);
    }

    #[test]
    fn test_echoed_item_is_valid() {
        let obj = ObjectRef::Atom(AtomId(7));
        let item = Item::echoed(obj, "#1:42.A@CA".to_string(), " ");
        assert!(item.is_valid());
        assert_eq!(item.object(), Some(obj));
        assert_eq!(item.text(), "#1:42.A@CA");
    }

    #[test]
    fn test_display_reassembles_source() {
        let item = Item::parse("tok", "  ");
        assert_eq!(item.to_string(), "tok  ");
    }
}
