//! In-memory reference host.
//!
//! [`Model`] is a small molecular scene - molecules, chains, residues,
//! atoms, bonds - with an atom-granularity selection set, a color table,
//! and a background. It implements [`Host`] completely, which makes it the
//! standard backend for tests, benches, and embedding experiments; a real
//! viewer adapter implements the same trait against its own scene graph.
//!
//! Selection mutations count notifications (one per effective change), so
//! feedback-loop behavior is observable from tests.
//!
//! # Examples
//!
//! ```
//! use specline::model::Model;
//! use specline::{Host, Mode};
//!
//! let model = Model::builder()
//!     .molecule(1)
//!     .chain('A')
//!     .residue(42, "ALA")
//!     .atom("CA")
//!     .atom("CB")
//!     .build();
//!
//! let residue = model.resolve(":42", Mode::Residues).unwrap();
//! assert_eq!(model.specifier(residue).as_deref(), Some("#1:42.A"));
//! assert_eq!(model.expand_atoms(residue).len(), 2);
//! ```

pub mod spec;

use std::collections::{BTreeSet, HashMap};

use crate::color::Rgba;
use crate::host::{FocusTarget, Host};
use crate::object::{AtomId, BondId, ChainId, Mode, MoleculeId, ObjectRef, ResidueId};

use self::spec::Address;

#[derive(Debug)]
struct MoleculeData {
    display_id: u32,
}

#[derive(Debug)]
struct ChainData {
    molecule: usize,
    id: char,
}

#[derive(Debug)]
struct ResidueData {
    chain: usize,
    pos: u32,
    name: String,
}

#[derive(Debug)]
struct AtomData {
    residue: usize,
    name: String,
}

/// An in-memory molecular scene implementing [`Host`].
#[derive(Debug)]
pub struct Model {
    molecules: Vec<MoleculeData>,
    chains: Vec<ChainData>,
    residues: Vec<ResidueData>,
    atoms: Vec<AtomData>,
    bonds: Vec<(AtomId, AtomId)>,
    selected: BTreeSet<AtomId>,
    colors: HashMap<ObjectRef, Rgba>,
    default_color: Rgba,
    background: Rgba,
    notifications: u32,
    focus_events: Vec<FocusTarget>,
}

impl Model {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            molecules: Vec::new(),
            chains: Vec::new(),
            residues: Vec::new(),
            atoms: Vec::new(),
            bonds: Vec::new(),
            selected: BTreeSet::new(),
            colors: HashMap::new(),
            default_color: Rgba::WHITE,
            background: Rgba::BLACK,
            notifications: 0,
            focus_events: Vec::new(),
        }
    }

    /// Start building a scene.
    #[must_use]
    pub fn builder() -> ModelBuilder {
        ModelBuilder { model: Self::new() }
    }

    /// Add a molecule; subsequent chains attach to it.
    pub fn push_molecule(&mut self, display_id: u32) -> ObjectRef {
        self.molecules.push(MoleculeData { display_id });
        ObjectRef::Molecule(MoleculeId(self.molecules.len() as u32 - 1))
    }

    /// Add a chain to the last molecule.
    pub fn push_chain(&mut self, id: char) -> ObjectRef {
        assert!(!self.molecules.is_empty(), "push_chain requires a molecule");
        self.chains.push(ChainData {
            molecule: self.molecules.len() - 1,
            id: id.to_ascii_uppercase(),
        });
        ObjectRef::Chain(ChainId(self.chains.len() as u32 - 1))
    }

    /// Add a residue to the last chain.
    pub fn push_residue(&mut self, pos: u32, name: &str) -> ObjectRef {
        assert!(!self.chains.is_empty(), "push_residue requires a chain");
        self.residues.push(ResidueData {
            chain: self.chains.len() - 1,
            pos,
            name: name.to_string(),
        });
        ObjectRef::Residue(ResidueId(self.residues.len() as u32 - 1))
    }

    /// Add an atom to the last residue.
    pub fn push_atom(&mut self, name: &str) -> ObjectRef {
        assert!(!self.residues.is_empty(), "push_atom requires a residue");
        self.atoms.push(AtomData {
            residue: self.residues.len() - 1,
            name: name.to_ascii_uppercase(),
        });
        ObjectRef::Atom(AtomId(self.atoms.len() as u32 - 1))
    }

    /// Add a bond between two atoms (by insertion index).
    pub fn push_bond(&mut self, a: AtomId, b: AtomId) -> ObjectRef {
        assert!(
            (a.0 as usize) < self.atoms.len() && (b.0 as usize) < self.atoms.len(),
            "push_bond endpoints must exist"
        );
        self.bonds.push((a, b));
        ObjectRef::Bond(BondId(self.bonds.len() as u32 - 1))
    }

    /// All atoms, in insertion order.
    #[must_use]
    pub fn atom_refs(&self) -> Vec<ObjectRef> {
        (0..self.atoms.len())
            .map(|i| ObjectRef::Atom(AtomId(i as u32)))
            .collect()
    }

    /// All residues, in insertion order.
    #[must_use]
    pub fn residue_refs(&self) -> Vec<ObjectRef> {
        (0..self.residues.len())
            .map(|i| ObjectRef::Residue(ResidueId(i as u32)))
            .collect()
    }

    /// All bonds, in insertion order.
    #[must_use]
    pub fn bond_refs(&self) -> Vec<ObjectRef> {
        (0..self.bonds.len())
            .map(|i| ObjectRef::Bond(BondId(i as u32)))
            .collect()
    }

    /// Selected atoms in ascending id order.
    #[must_use]
    pub fn selected_atoms(&self) -> Vec<AtomId> {
        self.selected.iter().copied().collect()
    }

    /// Number of effective selection changes so far.
    #[must_use]
    pub fn notifications(&self) -> u32 {
        self.notifications
    }

    /// Focus requests received, in order.
    #[must_use]
    pub fn focus_events(&self) -> &[FocusTarget] {
        &self.focus_events
    }

    fn atom_context(&self, atom: usize) -> (&MoleculeData, &ChainData, &ResidueData, &AtomData) {
        let data = &self.atoms[atom];
        let residue = &self.residues[data.residue];
        let chain = &self.chains[residue.chain];
        let molecule = &self.molecules[chain.molecule];
        (molecule, chain, residue, data)
    }

    fn matched_atoms(&self, addr: &Address) -> Vec<AtomId> {
        (0..self.atoms.len())
            .filter(|&i| {
                let (molecule, chain, residue, atom) = self.atom_context(i);
                addr.molecule.is_none_or(|m| m == molecule.display_id)
                    && addr.residue.is_none_or(|p| p == residue.pos)
                    && addr.chain.is_none_or(|c| c == chain.id)
                    && addr.atom.as_deref().is_none_or(|n| n == atom.name)
            })
            .map(|i| AtomId(i as u32))
            .collect()
    }

    fn project(&self, atoms: &[AtomId], mode: Mode) -> Vec<ObjectRef> {
        match mode {
            Mode::Atoms => atoms.iter().map(|&a| ObjectRef::Atom(a)).collect(),
            Mode::Bonds => {
                let set: BTreeSet<AtomId> = atoms.iter().copied().collect();
                self.bonds
                    .iter()
                    .enumerate()
                    .filter(|(_, (a, b))| set.contains(a) && set.contains(b))
                    .map(|(i, _)| ObjectRef::Bond(BondId(i as u32)))
                    .collect()
            }
            Mode::Residues => {
                let set: BTreeSet<usize> = atoms
                    .iter()
                    .map(|a| self.atoms[a.0 as usize].residue)
                    .collect();
                set.into_iter()
                    .map(|i| ObjectRef::Residue(ResidueId(i as u32)))
                    .collect()
            }
            Mode::Chains => {
                let set: BTreeSet<usize> = atoms
                    .iter()
                    .map(|a| self.residues[self.atoms[a.0 as usize].residue].chain)
                    .collect();
                set.into_iter()
                    .map(|i| ObjectRef::Chain(ChainId(i as u32)))
                    .collect()
            }
            Mode::Molecules => {
                let set: BTreeSet<usize> = atoms
                    .iter()
                    .map(|a| {
                        let residue = self.atoms[a.0 as usize].residue;
                        self.chains[self.residues[residue].chain].molecule
                    })
                    .collect();
                set.into_iter()
                    .map(|i| ObjectRef::Molecule(MoleculeId(i as u32)))
                    .collect()
            }
        }
    }

    fn atoms_to_ids(&self, objects: &[ObjectRef]) -> Vec<AtomId> {
        let mut out = Vec::new();
        for &object in objects {
            for atom in self.expand_atoms(object) {
                if let ObjectRef::Atom(id) = atom {
                    if !out.contains(&id) {
                        out.push(id);
                    }
                }
            }
        }
        out
    }

    /// The name a residue was built with.
    #[must_use]
    pub fn residue_name(&self, residue: ObjectRef) -> Option<&str> {
        match residue {
            ObjectRef::Residue(ResidueId(i)) => {
                self.residues.get(i as usize).map(|r| r.name.as_str())
            }
            _ => None,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Model {
    fn resolve(&self, spec_text: &str, mode: Mode) -> Option<ObjectRef> {
        let addr = spec::parse(spec_text)?;
        let atoms = self.matched_atoms(&addr);
        let projected = self.project(&atoms, mode);
        match projected.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    fn specifier(&self, object: ObjectRef) -> Option<String> {
        match object {
            ObjectRef::Atom(AtomId(i)) => {
                if i as usize >= self.atoms.len() {
                    return None;
                }
                let (molecule, chain, residue, atom) = self.atom_context(i as usize);
                Some(spec::atom_spec(
                    molecule.display_id,
                    residue.pos,
                    chain.id,
                    &atom.name,
                ))
            }
            ObjectRef::Residue(ResidueId(i)) => {
                let residue = self.residues.get(i as usize)?;
                let chain = &self.chains[residue.chain];
                let molecule = &self.molecules[chain.molecule];
                Some(spec::residue_spec(molecule.display_id, residue.pos, chain.id))
            }
            ObjectRef::Chain(ChainId(i)) => {
                let chain = self.chains.get(i as usize)?;
                let molecule = &self.molecules[chain.molecule];
                Some(spec::chain_spec(molecule.display_id, chain.id))
            }
            ObjectRef::Molecule(MoleculeId(i)) => {
                let molecule = self.molecules.get(i as usize)?;
                Some(spec::molecule_spec(molecule.display_id))
            }
            ObjectRef::Bond(_) => None,
        }
    }

    fn expand_atoms(&self, object: ObjectRef) -> Vec<ObjectRef> {
        match object {
            ObjectRef::Atom(id) => {
                if (id.0 as usize) < self.atoms.len() {
                    vec![ObjectRef::Atom(id)]
                } else {
                    Vec::new()
                }
            }
            ObjectRef::Bond(BondId(i)) => self
                .bonds
                .get(i as usize)
                .map(|&(a, b)| vec![ObjectRef::Atom(a), ObjectRef::Atom(b)])
                .unwrap_or_default(),
            ObjectRef::Residue(ResidueId(i)) => (0..self.atoms.len())
                .filter(|&a| self.atoms[a].residue == i as usize)
                .map(|a| ObjectRef::Atom(AtomId(a as u32)))
                .collect(),
            ObjectRef::Chain(ChainId(i)) => (0..self.atoms.len())
                .filter(|&a| self.residues[self.atoms[a].residue].chain == i as usize)
                .map(|a| ObjectRef::Atom(AtomId(a as u32)))
                .collect(),
            ObjectRef::Molecule(MoleculeId(i)) => (0..self.atoms.len())
                .filter(|&a| {
                    let residue = self.atoms[a].residue;
                    self.chains[self.residues[residue].chain].molecule == i as usize
                })
                .map(|a| ObjectRef::Atom(AtomId(a as u32)))
                .collect(),
        }
    }

    fn current_selection(&self, mode: Mode) -> Vec<ObjectRef> {
        let atoms: Vec<AtomId> = self.selected.iter().copied().collect();
        self.project(&atoms, mode)
    }

    fn select(&mut self, objects: &[ObjectRef]) {
        let mut changed = false;
        for id in self.atoms_to_ids(objects) {
            changed |= self.selected.insert(id);
        }
        if changed {
            self.notifications += 1;
        }
    }

    fn deselect(&mut self, objects: &[ObjectRef]) {
        let mut changed = false;
        for id in self.atoms_to_ids(objects) {
            changed |= self.selected.remove(&id);
        }
        if changed {
            self.notifications += 1;
        }
    }

    fn clear_selection(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.notifications += 1;
        }
    }

    fn color_of(&self, object: ObjectRef) -> Rgba {
        self.colors
            .get(&object)
            .copied()
            .unwrap_or(self.default_color)
    }

    fn set_color(&mut self, object: ObjectRef, color: Rgba) {
        self.colors.insert(object, color);
    }

    fn molecules(&self) -> Vec<ObjectRef> {
        (0..self.molecules.len())
            .map(|i| ObjectRef::Molecule(MoleculeId(i as u32)))
            .collect()
    }

    fn residues_of(&self, molecule: ObjectRef) -> Vec<ObjectRef> {
        let ObjectRef::Molecule(MoleculeId(m)) = molecule else {
            return Vec::new();
        };
        (0..self.residues.len())
            .filter(|&i| self.chains[self.residues[i].chain].molecule == m as usize)
            .map(|i| ObjectRef::Residue(ResidueId(i as u32)))
            .collect()
    }

    fn background(&self) -> Rgba {
        self.background
    }

    fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    fn focus(&mut self, target: FocusTarget) {
        self.focus_events.push(target);
    }
}

/// Fluent builder for [`Model`] scenes.
///
/// Objects attach to the most recently added parent: `chain` to the last
/// `molecule`, `residue` to the last `chain`, `atom` to the last
/// `residue`.
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    /// Add a molecule.
    #[must_use]
    pub fn molecule(mut self, display_id: u32) -> Self {
        self.model.push_molecule(display_id);
        self
    }

    /// Add a chain to the last molecule.
    #[must_use]
    pub fn chain(mut self, id: char) -> Self {
        self.model.push_chain(id);
        self
    }

    /// Add a residue to the last chain.
    #[must_use]
    pub fn residue(mut self, pos: u32, name: &str) -> Self {
        self.model.push_residue(pos, name);
        self
    }

    /// Add an atom to the last residue.
    #[must_use]
    pub fn atom(mut self, name: &str) -> Self {
        self.model.push_atom(name);
        self
    }

    /// Add a bond between two atoms by insertion index.
    #[must_use]
    pub fn bond(mut self, a: u32, b: u32) -> Self {
        self.model.push_bond(AtomId(a), AtomId(b));
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Model {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Model {
        Model::builder()
            .molecule(1)
            .chain('A')
            .residue(42, "ALA")
            .atom("CA")
            .atom("CB")
            .residue(43, "GLY")
            .atom("CA")
            .chain('B')
            .residue(42, "SER")
            .atom("CA")
            .bond(0, 1)
            .build()
    }

    #[test]
    fn test_resolve_unique_match() {
        let model = scene();
        let atom = model.resolve("#1:42.A@CB", Mode::Atoms).unwrap();
        assert_eq!(atom, ObjectRef::Atom(AtomId(1)));

        let residue = model.resolve(":43", Mode::Residues).unwrap();
        assert_eq!(residue, ObjectRef::Residue(ResidueId(1)));

        let chain = model.resolve(":.B", Mode::Chains).unwrap();
        assert_eq!(chain, ObjectRef::Chain(ChainId(1)));
    }

    #[test]
    fn test_resolve_rejects_ambiguous_and_empty() {
        let model = scene();
        // residue 42 exists in chains A and B
        assert_eq!(model.resolve(":42", Mode::Residues), None);
        // three atoms named CA
        assert_eq!(model.resolve("@CA", Mode::Atoms), None);
        // no residue 99
        assert_eq!(model.resolve(":99", Mode::Residues), None);
        // malformed
        assert_eq!(model.resolve("not-a-spec", Mode::Atoms), None);
    }

    #[test]
    fn test_resolve_bond_needs_both_endpoints() {
        let model = scene();
        let bond = model.resolve(":42.A", Mode::Bonds).unwrap();
        assert_eq!(bond, ObjectRef::Bond(BondId(0)));
        // residue 43 has no bonded pair
        assert_eq!(model.resolve(":43", Mode::Bonds), None);
    }

    #[test]
    fn test_specifier_synthesis() {
        let model = scene();
        assert_eq!(
            model.specifier(ObjectRef::Atom(AtomId(0))).as_deref(),
            Some("#1:42.A@CA")
        );
        assert_eq!(
            model.specifier(ObjectRef::Residue(ResidueId(2))).as_deref(),
            Some("#1:42.B")
        );
        assert_eq!(
            model.specifier(ObjectRef::Chain(ChainId(0))).as_deref(),
            Some("#1:.A")
        );
        assert_eq!(
            model
                .specifier(ObjectRef::Molecule(MoleculeId(0)))
                .as_deref(),
            Some("#1")
        );
        assert_eq!(model.specifier(ObjectRef::Bond(BondId(0))), None);
    }

    #[test]
    fn test_expansion() {
        let model = scene();
        assert_eq!(model.expand_atoms(ObjectRef::Residue(ResidueId(0))).len(), 2);
        assert_eq!(model.expand_atoms(ObjectRef::Bond(BondId(0))).len(), 2);
        assert_eq!(model.expand_atoms(ObjectRef::Chain(ChainId(1))).len(), 1);
        assert_eq!(
            model.expand_atoms(ObjectRef::Molecule(MoleculeId(0))).len(),
            4
        );
    }

    #[test]
    fn test_selection_projection_and_notifications() {
        let mut model = scene();
        assert_eq!(model.notifications(), 0);

        model.select(&[ObjectRef::Residue(ResidueId(0))]);
        assert_eq!(model.notifications(), 1);
        assert_eq!(model.selected_atoms(), vec![AtomId(0), AtomId(1)]);
        assert_eq!(
            model.current_selection(Mode::Residues),
            vec![ObjectRef::Residue(ResidueId(0))]
        );
        assert_eq!(
            model.current_selection(Mode::Bonds),
            vec![ObjectRef::Bond(BondId(0))]
        );

        // re-selecting the same atoms is not an effective change
        model.select(&[ObjectRef::Residue(ResidueId(0))]);
        assert_eq!(model.notifications(), 1);

        model.deselect(&[ObjectRef::Residue(ResidueId(0))]);
        assert_eq!(model.notifications(), 2);
        assert!(model.selected_atoms().is_empty());
    }

    #[test]
    fn test_residues_of() {
        let model = scene();
        assert_eq!(
            model.residues_of(ObjectRef::Molecule(MoleculeId(0))).len(),
            3
        );
        assert!(model.residues_of(ObjectRef::Atom(AtomId(0))).is_empty());
    }
}
