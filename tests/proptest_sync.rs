//! Property-based tests for the reconciliation invariants.
//!
//! Uses proptest to verify the invariants that must hold across all valid
//! inputs: document round-tripping, deterministic tag assignment, and the
//! shared-tag rule for duplicate specifiers.

use proptest::prelude::*;
use specline::model::Model;
use specline::{Engine, Mode, Options, Tag};

// ============================================================================
// Strategies
// ============================================================================

/// Tokens as a user might type them: specifier-ish characters, no
/// whitespace. Most will not resolve, which is irrelevant to the
/// round-trip property.
fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9:#@.]{1,8}"
}

/// Whitespace separator runs.
fn separator() -> impl Strategy<Value = String> {
    "[ \t]{1,3}"
}

/// A whole document: optional leading whitespace, then tokens with
/// separators; the last token may have no trailing separator.
fn document() -> impl Strategy<Value = String> {
    (
        prop::option::of(separator()),
        prop::collection::vec((token(), separator()), 0..8),
        prop::option::of(token()),
    )
        .prop_map(|(prefix, pairs, tail)| {
            let mut text = prefix.unwrap_or_default();
            for (token, sep) in pairs {
                text.push_str(&token);
                text.push_str(&sep);
            }
            if let Some(tail) = tail {
                text.push_str(&tail);
            }
            text
        })
}

/// Token sequences over a small set of resolvable residues.
fn residue_tokens() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..6, 1..12)
}

fn residue_scene() -> Model {
    let mut builder = Model::builder().molecule(1).chain('A');
    for pos in 1..=6 {
        builder = builder.residue(pos, "GLY").atom("CA");
    }
    builder.build()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Itemize never changes the document: the text rebuilt from items
    /// (plus any leading whitespace) is exactly the input.
    #[test]
    fn itemize_round_trips_document(text in document()) {
        let mut model = Model::new();
        let mut engine = Engine::new(&mut model, Options::new(Mode::Atoms));
        engine.set_text(&text);
        engine.itemize();

        prop_assert_eq!(engine.text(), text.clone());

        let token_count = text.split_whitespace().count();
        prop_assert_eq!(engine.items().len(), token_count);
    }

    /// Distinct objects draw palette colors in document order of first
    /// appearance, regardless of duplicates in between.
    #[test]
    fn tags_are_deterministic_in_document_order(picks in residue_tokens()) {
        let mut model = residue_scene();
        let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));

        let tokens: Vec<String> = picks.iter().map(|p| format!(":{}", p + 1)).collect();
        engine.set_text(&tokens.join(" "));
        engine.itemize();

        let mut expected_order: Vec<&String> = Vec::new();
        for token in &tokens {
            if !expected_order.contains(&token) {
                expected_order.push(token);
            }
        }

        for (item, token) in engine.items().iter().zip(&tokens) {
            let first_seen = expected_order.iter().position(|t| *t == token).unwrap();
            prop_assert_eq!(item.tag(), Tag::Color(first_seen as u8));
        }
    }

    /// Two tokens resolving to the same object always share a tag, and it
    /// is the first token's tag.
    #[test]
    fn duplicate_tokens_share_their_first_tag(picks in residue_tokens()) {
        let mut model = residue_scene();
        let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));

        let tokens: Vec<String> = picks.iter().map(|p| format!(":{}", p + 1)).collect();
        engine.set_text(&tokens.join(" "));
        engine.itemize();

        let items = engine.items();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                if a.object() == b.object() {
                    prop_assert_eq!(a.tag(), b.tag());
                }
            }
        }
        prop_assert_eq!(engine.object_count(), {
            let mut unique = tokens.clone();
            unique.sort();
            unique.dedup();
            unique.len()
        });
    }
}
