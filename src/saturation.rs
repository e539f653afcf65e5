//! Background desaturation: the reversible color override that brackets a
//! panel's lifetime.
//!
//! While the panel is open, everything that is not actively depicted gets
//! flattened to one neutral shade so the color-tagged selection stands
//! out. [`ColorSnapshot`] records original colors before flattening and
//! puts every recorded color back on restore.
//!
//! A molecule is covered at most once per snapshot: repeated passes (focus
//! regained, new models loaded) only touch molecules not yet covered, and
//! a depicted atom is never recorded nor recolored, so its tag color
//! survives the pass.

use std::collections::HashSet;

use crate::color::Rgba;
use crate::diag::{LogLevel, diag};
use crate::host::Host;
use crate::object::ObjectRef;

/// Recorded original colors of covered molecules and their parts.
#[derive(Debug, Default)]
pub struct ColorSnapshot {
    background: Option<Rgba>,
    colors: Vec<(ObjectRef, Rgba)>,
    covered: HashSet<ObjectRef>,
}

impl ColorSnapshot {
    /// Empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.background.is_none()
    }

    /// Number of molecules covered so far.
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }

    /// Record and flatten every uncovered molecule: the molecule itself,
    /// its residues, and its atoms all go to `neutral`. Atoms in
    /// `depicted` keep their current color and are not recorded. With
    /// `dim_background` the viewer background is recorded and overridden
    /// once per snapshot.
    pub fn desaturate<H: Host>(
        &mut self,
        host: &mut H,
        neutral: Rgba,
        depicted: &[ObjectRef],
        dim_background: bool,
    ) {
        if dim_background && self.background.is_none() {
            self.background = Some(host.background());
            host.set_background(neutral);
        }

        let mut newly_covered = 0usize;
        for molecule in host.molecules() {
            if self.covered.contains(&molecule) {
                continue;
            }

            self.colors.push((molecule, host.color_of(molecule)));
            host.set_color(molecule, neutral);

            for residue in host.residues_of(molecule) {
                self.colors.push((residue, host.color_of(residue)));
                host.set_color(residue, neutral);
            }

            for atom in host.expand_atoms(molecule) {
                if depicted.contains(&atom) {
                    continue;
                }
                self.colors.push((atom, host.color_of(atom)));
                host.set_color(atom, neutral);
            }

            self.covered.insert(molecule);
            newly_covered += 1;
        }

        if newly_covered > 0 {
            diag!(
                LogLevel::Debug,
                "desaturated {newly_covered} molecule(s), {} recorded color(s)",
                self.colors.len()
            );
        }
    }

    /// Put every recorded color (and the background) back and empty the
    /// snapshot. Safe to call repeatedly; later calls are no-ops until
    /// the next desaturation pass.
    pub fn restore<H: Host>(&mut self, host: &mut H) {
        if let Some(background) = self.background.take() {
            host.set_background(background);
        }
        for (object, color) in self.colors.drain(..) {
            host.set_color(object, color);
        }
        self.covered.clear();
    }
}
