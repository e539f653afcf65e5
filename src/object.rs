//! Domain object handles and granularity modes.
//!
//! Host objects are addressed by lightweight copyable handles. The kind is
//! a closed enumeration; specifier synthesis and sub-object expansion
//! branch on it with explicit `match`, never on runtime type inspection.

/// Handle to an atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub u32);

/// Handle to a bond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondId(pub u32);

/// Handle to a residue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueId(pub u32);

/// Handle to a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(pub u32);

/// Handle to a molecule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoleculeId(pub u32);

/// A reference to one host object of any kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    Atom(AtomId),
    Bond(BondId),
    Residue(ResidueId),
    Chain(ChainId),
    Molecule(MoleculeId),
}

impl ObjectRef {
    /// The kind of object this handle points at.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Atom(_) => ObjectKind::Atom,
            Self::Bond(_) => ObjectKind::Bond,
            Self::Residue(_) => ObjectKind::Residue,
            Self::Chain(_) => ObjectKind::Chain,
            Self::Molecule(_) => ObjectKind::Molecule,
        }
    }
}

/// Closed set of object kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Atom,
    Bond,
    Residue,
    Chain,
    Molecule,
}

/// Granularity a panel works at: every resolved specifier and every
/// selection query is projected to this kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Atoms,
    Bonds,
    Residues,
    Chains,
    Molecules,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Self; 5] = [
        Self::Atoms,
        Self::Bonds,
        Self::Residues,
        Self::Chains,
        Self::Molecules,
    ];

    /// The object kind this mode selects.
    #[must_use]
    pub fn kind(self) -> ObjectKind {
        match self {
            Self::Atoms => ObjectKind::Atom,
            Self::Bonds => ObjectKind::Bond,
            Self::Residues => ObjectKind::Residue,
            Self::Chains => ObjectKind::Chain,
            Self::Molecules => ObjectKind::Molecule,
        }
    }

    /// Lowercase display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Atoms => "atoms",
            Self::Bonds => "bonds",
            Self::Residues => "residues",
            Self::Chains => "chains",
            Self::Molecules => "molecules",
        }
    }
}
