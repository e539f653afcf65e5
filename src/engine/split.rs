//! Whitespace-run token splitting.
//!
//! The document is alternating runs of non-whitespace (tokens) and
//! whitespace (separators). Splitting keeps both halves so the document
//! text is always reconstructible as `prefix + Σ(token + separator)`; a
//! trailing token with nothing after it pairs with an empty separator.

/// Result of splitting a document into specifier tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitSpecs {
    /// Leading whitespace before the first token (usually empty).
    pub prefix: String,
    /// `(token, separator)` pairs in document order.
    pub pairs: Vec<(String, String)>,
}

impl SplitSpecs {
    /// Reassemble the exact document text.
    #[must_use]
    pub fn reconstruct(&self) -> String {
        let mut out = self.prefix.clone();
        for (token, sep) in &self.pairs {
            out.push_str(token);
            out.push_str(sep);
        }
        out
    }
}

/// Split text into a leading whitespace prefix and `(token, separator)`
/// pairs.
#[must_use]
pub fn split_specs(text: &str) -> SplitSpecs {
    let mut out = SplitSpecs::default();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if !c.is_whitespace() {
            break;
        }
        out.prefix.push(c);
        chars.next();
    }

    while chars.peek().is_some() {
        let mut token = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            token.push(c);
            chars.next();
        }
        let mut sep = String::new();
        while let Some(&c) = chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            sep.push(c);
            chars.next();
        }
        out.pairs.push((token, sep));
    }

    out
}
