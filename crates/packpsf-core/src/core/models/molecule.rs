use super::atom::Atom;
use super::ids::AtomIndex;
use super::shifts::ShiftTable;
use super::topology::{Angle, Bond, Dihedral};
use std::fmt;

pub const DEFAULT_RESIDUE_NAME: &str = "MOL";

/// A single molecular species with its complete connectivity.
///
/// Molecules are produced by [`ConnectivityBuilder::build`](super::builder::ConnectivityBuilder::build)
/// and are immutable afterwards. Every relation is stored in final indices, where each
/// Drude particle directly follows its parent atom.
#[derive(Debug, Clone)]
pub struct Molecule {
    pub(super) atoms: Vec<Atom>,
    pub(super) residue_name: String,
    pub(super) bonds: Vec<Bond>,
    pub(super) drude_bonds: Vec<Bond>,
    pub(super) angles: Vec<Angle>,
    pub(super) dihedrals: Vec<Dihedral>,
    pub(super) shifts: ShiftTable,
}

impl Molecule {
    /// Atoms in file order, without their Drude satellites.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Atoms in final order: each polarized atom is immediately followed by its satellite.
    pub fn final_atoms(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.atoms
            .iter()
            .flat_map(|atom| std::iter::once(atom).chain(atom.drude()))
    }

    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Parent-satellite bonds, in ascending parent order.
    pub fn drude_bonds(&self) -> &[Bond] {
        &self.drude_bonds
    }

    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    pub fn dihedrals(&self) -> &[Dihedral] {
        &self.dihedrals
    }

    pub fn shifts(&self) -> &ShiftTable {
        &self.shifts
    }

    /// Number of atoms read from the coordinate file.
    pub fn atoms_number(&self) -> usize {
        self.atoms.len()
    }

    /// Number of slots in the final atom sequence, Drude particles included.
    pub fn atoms_number_with_drude(&self) -> usize {
        self.atoms.iter().map(Atom::slot_count).sum()
    }

    pub fn drude_count(&self) -> usize {
        self.shifts.drude_count()
    }

    pub fn final_index(&self, index: AtomIndex) -> usize {
        self.shifts.final_index(index)
    }

    /// Bonds in the order the PSF bond section lists them: covalent bonds first,
    /// then the Drude bonds.
    pub fn psf_bonds(&self) -> impl Iterator<Item = &Bond> + '_ {
        self.bonds.iter().chain(self.drude_bonds.iter())
    }

    pub fn psf_bonds_number(&self) -> usize {
        self.bonds.len() + self.drude_bonds.len()
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} atoms ({} Drude), {} bonds, {} angles, {} dihedrals",
            self.residue_name,
            self.atoms_number(),
            self.drude_count(),
            self.psf_bonds_number(),
            self.angles.len(),
            self.dihedrals.len()
        )
    }
}
