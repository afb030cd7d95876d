use super::atom::{Atom, AtomParameters};
use super::ids::AtomIndex;
use super::molecule::{DEFAULT_RESIDUE_NAME, Molecule};
use super::shifts::ShiftTable;
use super::topology::{Angle, Bond, Dihedral, TopologyError};
use crate::core::topology::derive::{determine_angles, determine_dihedrals};
use crate::core::topology::detector::{determine_bonds, determine_bonds_parallel};
use crate::core::topology::drude::{self, DrudeParams};
use std::collections::HashSet;
use tracing::debug;

/// First construction stage of a [`Molecule`]: per-atom parameters and Drude insertion.
///
/// Connectivity cannot be expressed at this stage. Indices read from connectivity tables
/// only become meaningful once every Drude particle is in place, so the translator is
/// reachable only after [`into_connectivity`](Self::into_connectivity).
#[derive(Debug, Clone)]
pub struct MoleculeBuilder {
    atoms: Vec<Atom>,
    residue_name: String,
    shifts: ShiftTable,
    drude_bonds: Vec<Bond>,
}

impl MoleculeBuilder {
    pub fn new(atoms: Vec<Atom>) -> Self {
        let shifts = ShiftTable::new(atoms.len());
        Self {
            atoms,
            residue_name: DEFAULT_RESIDUE_NAME.to_string(),
            shifts,
            drude_bonds: Vec::new(),
        }
    }

    pub fn residue_name(&mut self, name: &str) -> &mut Self {
        self.residue_name = name.to_string();
        self
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_number(&self) -> usize {
        self.atoms.len()
    }

    /// Applies a parameter-file line to the atom at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::IndexOutOfRange`] if the molecule has no such atom.
    pub fn apply_parameters(
        &mut self,
        index: AtomIndex,
        parameters: &AtomParameters,
    ) -> Result<&mut Self, TopologyError> {
        let atom_count = self.atoms.len();
        let atom = self
            .atoms
            .get_mut(index.0)
            .ok_or(TopologyError::IndexOutOfRange {
                index: index.0,
                atom_count,
            })?;
        atom.apply_parameters(parameters);
        Ok(self)
    }

    /// Splits a Drude particle off the atom at `index`.
    ///
    /// The parent keeps its position in the sequence and the satellite takes the slot
    /// right after it, pushing every later atom one slot further.
    ///
    /// # Arguments
    ///
    /// * `index` - Original position of the parent atom.
    /// * `polarizability` - Atomic polarizability that determines the Drude charge.
    /// * `params` - Spring constant and mass of the satellite.
    ///
    /// # Return
    ///
    /// The final index of the new Drude particle.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError`] if the polarizability is invalid, the atom does not
    /// exist, or `index` is not strictly greater than every previously polarized atom.
    pub fn add_drude_atom(
        &mut self,
        index: AtomIndex,
        polarizability: f64,
        params: &DrudeParams,
    ) -> Result<usize, TopologyError> {
        let charge = drude::drude_charge(polarizability, params)?;
        self.shifts.promote(index)?;

        drude::attach_drude(&mut self.atoms[index.0], charge, params);

        let parent = self.shifts.final_index(index);
        self.drude_bonds.push(Bond::new(parent, parent + 1));
        Ok(parent + 1)
    }

    /// Closes the Drude stage and opens the connectivity stage.
    pub fn into_connectivity(self) -> ConnectivityBuilder {
        ConnectivityBuilder {
            atoms: self.atoms,
            residue_name: self.residue_name,
            shifts: self.shifts,
            drude_bonds: self.drude_bonds,
            bonds: None,
            angles: None,
            dihedrals: None,
        }
    }
}

/// Second construction stage of a [`Molecule`]: bonds, angles and dihedrals.
///
/// Explicitly supplied relations always win. Whatever is left unset when
/// [`build`](Self::build) runs is derived from the relation below it.
#[derive(Debug, Clone)]
pub struct ConnectivityBuilder {
    atoms: Vec<Atom>,
    residue_name: String,
    shifts: ShiftTable,
    drude_bonds: Vec<Bond>,
    bonds: Option<Vec<Bond>>,
    angles: Option<Vec<Angle>>,
    dihedrals: Option<Vec<Dihedral>>,
}

impl ConnectivityBuilder {
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_number(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms_number_with_drude(&self) -> usize {
        self.atoms.len() + self.shifts.drude_count()
    }

    pub fn shifts(&self) -> &ShiftTable {
        &self.shifts
    }

    /// Translates a 1-based index from a connectivity table into a final index.
    ///
    /// # Errors
    ///
    /// See [`ShiftTable::translate`].
    pub fn translate(&self, raw: &str) -> Result<usize, TopologyError> {
        self.shifts.translate(raw)
    }

    /// Translates a row of 1-based indices into final indices.
    pub fn translate_all<const N: usize>(
        &self,
        raw: &[String; N],
    ) -> Result<[usize; N], TopologyError> {
        let mut out = [0usize; N];
        for (slot, text) in out.iter_mut().zip(raw) {
            *slot = self.translate(text)?;
        }
        Ok(out)
    }

    /// Sets the bond list from final-index pairs. Repeated bonds, in either
    /// orientation, are kept once.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError`] for self-bonds and indices past the final atom sequence.
    pub fn set_bonds<I>(&mut self, bonds: I) -> Result<&mut Self, TopologyError>
    where
        I: IntoIterator<Item = Bond>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for bond in bonds {
            self.check_indices(&bond.atoms)?;
            let [a, b] = bond.atoms;
            if a == b {
                return Err(TopologyError::SelfBond(a));
            }
            if seen.insert(bond.key()) {
                unique.push(bond);
            }
        }
        self.bonds = Some(unique);
        Ok(self)
    }

    /// Sets the angle list from final-index triples, bypassing derivation.
    pub fn set_angles(&mut self, angles: Vec<Angle>) -> Result<&mut Self, TopologyError> {
        for angle in &angles {
            self.check_indices(&angle.atoms)?;
        }
        self.angles = Some(angles);
        Ok(self)
    }

    /// Sets the dihedral list from final-index quadruples, bypassing derivation.
    pub fn set_dihedrals(&mut self, dihedrals: Vec<Dihedral>) -> Result<&mut Self, TopologyError> {
        for dihedral in &dihedrals {
            self.check_indices(&dihedral.atoms)?;
        }
        self.dihedrals = Some(dihedrals);
        Ok(self)
    }

    /// Infers bonds from interatomic distances.
    pub fn detect_bonds(&mut self, threshold: f64) -> &mut Self {
        self.bonds = Some(determine_bonds(&self.atoms, &self.shifts, threshold));
        self
    }

    /// Same as [`detect_bonds`](Self::detect_bonds), scanning atom pairs on the rayon pool.
    pub fn detect_bonds_parallel(&mut self, threshold: f64) -> &mut Self {
        self.bonds = Some(determine_bonds_parallel(
            &self.atoms,
            &self.shifts,
            threshold,
        ));
        self
    }

    /// Derives any missing relation and freezes the molecule.
    ///
    /// Angles are derived only from bonds and dihedrals only from angles; a missing
    /// prerequisite leaves the dependent relation empty.
    pub fn build(self) -> Molecule {
        let angles = self
            .angles
            .or_else(|| determine_angles(self.bonds.as_deref()));
        let dihedrals = self.dihedrals.or_else(|| {
            determine_dihedrals(angles.as_deref(), self.bonds.as_deref().unwrap_or(&[]))
        });

        let molecule = Molecule {
            atoms: self.atoms,
            residue_name: self.residue_name,
            bonds: self.bonds.unwrap_or_default(),
            drude_bonds: self.drude_bonds,
            angles: angles.unwrap_or_default(),
            dihedrals: dihedrals.unwrap_or_default(),
            shifts: self.shifts,
        };
        debug!(
            residue = molecule.residue_name(),
            atoms = molecule.atoms_number(),
            drudes = molecule.drude_count(),
            bonds = molecule.bonds().len(),
            angles = molecule.angles().len(),
            dihedrals = molecule.dihedrals().len(),
            "Molecule topology complete"
        );
        molecule
    }

    fn check_indices(&self, indices: &[usize]) -> Result<(), TopologyError> {
        let atom_count = self.atoms_number_with_drude();
        match indices.iter().find(|&&i| i >= atom_count) {
            Some(&index) => Err(TopologyError::IndexOutOfRange { index, atom_count }),
            None => Ok(()),
        }
    }
}
