//! Specifier address grammar.
//!
//! Specifiers follow the classic `#MOL:RES.CHAIN@ATOM` address form, every
//! component optional but ordered:
//!
//! - `#1` - molecule 1
//! - `#1:42.A` - residue 42 of chain A in molecule 1
//! - `#1:42.A@CA` - atom CA of that residue
//! - `#1:.A` - chain A of molecule 1
//! - `:42`, `@CA`, `#1@CA` - partial addresses, matched against everything
//!
//! Parsing is strict: trailing garbage, empty components, and unknown
//! punctuation all yield `None` (never an error).

/// A parsed specifier address. `None` components match anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    pub molecule: Option<u32>,
    pub residue: Option<u32>,
    pub chain: Option<char>,
    pub atom: Option<String>,
}

/// Parse a specifier into an address. Malformed text yields `None`.
#[must_use]
pub fn parse(text: &str) -> Option<Address> {
    let mut addr = Address::default();
    let mut rest = text;

    if let Some(r) = rest.strip_prefix('#') {
        let (digits, r) = take_digits(r);
        if digits.is_empty() {
            return None;
        }
        addr.molecule = digits.parse().ok();
        addr.molecule?;
        rest = r;
    }

    if let Some(r) = rest.strip_prefix(':') {
        let (digits, r) = take_digits(r);
        if digits.is_empty() {
            if !r.starts_with('.') {
                return None;
            }
        } else {
            addr.residue = digits.parse().ok();
            addr.residue?;
        }
        rest = r;

        if let Some(r) = rest.strip_prefix('.') {
            let mut chars = r.chars();
            let c = chars.next()?;
            if !c.is_ascii_alphanumeric() {
                return None;
            }
            addr.chain = Some(c.to_ascii_uppercase());
            rest = chars.as_str();
        }
    }

    if let Some(r) = rest.strip_prefix('@') {
        if r.is_empty() || !r.chars().all(is_atom_name_char) {
            return None;
        }
        addr.atom = Some(r.to_ascii_uppercase());
        rest = "";
    }

    if !rest.is_empty() || addr == Address::default() {
        return None;
    }
    Some(addr)
}

fn is_atom_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\'' || c == '*'
}

fn take_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Canonical specifier for a molecule.
#[must_use]
pub fn molecule_spec(molecule: u32) -> String {
    format!("#{molecule}")
}

/// Canonical specifier for a chain.
#[must_use]
pub fn chain_spec(molecule: u32, chain: char) -> String {
    format!("#{molecule}:.{chain}")
}

/// Canonical specifier for a residue.
#[must_use]
pub fn residue_spec(molecule: u32, pos: u32, chain: char) -> String {
    format!("#{molecule}:{pos}.{chain}")
}

/// Canonical specifier for an atom.
#[must_use]
pub fn atom_spec(molecule: u32, pos: u32, chain: char, name: &str) -> String {
    format!("#{molecule}:{pos}.{chain}@{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        let addr = parse("#1:42.A@CA").unwrap();
        assert_eq!(addr.molecule, Some(1));
        assert_eq!(addr.residue, Some(42));
        assert_eq!(addr.chain, Some('A'));
        assert_eq!(addr.atom.as_deref(), Some("CA"));
    }

    #[test]
    fn test_partial_addresses() {
        assert_eq!(parse("#2").unwrap().molecule, Some(2));
        assert_eq!(parse(":42").unwrap().residue, Some(42));
        assert_eq!(parse("@ca").unwrap().atom.as_deref(), Some("CA"));

        let chain_only = parse(":.b").unwrap();
        assert_eq!(chain_only.chain, Some('B'));
        assert_eq!(chain_only.residue, None);

        let mol_atom = parse("#1@CB").unwrap();
        assert_eq!(mol_atom.molecule, Some(1));
        assert_eq!(mol_atom.atom.as_deref(), Some("CB"));
    }

    #[test]
    fn test_primed_atom_names() {
        assert_eq!(parse("@O5'").unwrap().atom.as_deref(), Some("O5'"));
        assert_eq!(parse("@C1*").unwrap().atom.as_deref(), Some("C1*"));
    }

    #[test]
    fn test_malformed_addresses() {
        for bad in [
            "", "#", ":", ".", "@", "#x", ":x", ":42.", "#1:", "#1.A", "xyz", "#1 :42", "@C A",
            ":42.AB", "#1:42.A@",
        ] {
            assert_eq!(parse(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_synthesis_round_trips() {
        let addr = parse(&atom_spec(1, 42, 'A', "CA")).unwrap();
        assert_eq!(addr.atom.as_deref(), Some("CA"));

        let addr = parse(&residue_spec(3, 7, 'B')).unwrap();
        assert_eq!(addr.residue, Some(7));
        assert_eq!(addr.chain, Some('B'));

        let addr = parse(&chain_spec(1, 'A')).unwrap();
        assert_eq!(addr.chain, Some('A'));
        assert_eq!(addr.residue, None);

        assert_eq!(parse(&molecule_spec(9)).unwrap().molecule, Some(9));
    }
}
