use super::molecule::Molecule;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEGMENT_ID: &str = "IL";

/// One placed copy of a species inside the simulation box.
#[derive(Debug, Clone, Copy)]
pub struct MoleculeInstance<'a> {
    pub molecule: &'a Molecule,
    /// 1-based residue number, restarting at 1 for every species.
    pub residue_id: usize,
    /// Number of final atom slots preceding this instance in the whole system.
    pub base: usize,
}

/// The complete packed box: every species in manifest order with its instance count.
///
/// The system only aggregates. It never mutates its molecules and does not check
/// them against each other or against the coordinate stream.
#[derive(Debug, Clone)]
pub struct System {
    molecules: Vec<(Molecule, usize)>,
    coordinates_path: Option<PathBuf>,
    segment_id: String,
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl System {
    pub fn new() -> Self {
        Self {
            molecules: Vec::new(),
            coordinates_path: None,
            segment_id: DEFAULT_SEGMENT_ID.to_string(),
        }
    }

    pub fn with_segment_id(mut self, segment_id: &str) -> Self {
        self.segment_id = segment_id.to_string();
        self
    }

    pub fn with_coordinates_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.coordinates_path = Some(path.into());
        self
    }

    pub fn add_molecule(&mut self, molecule: Molecule, count: usize) -> &mut Self {
        self.molecules.push((molecule, count));
        self
    }

    pub fn molecules(&self) -> &[(Molecule, usize)] {
        &self.molecules
    }

    /// The packed coordinate stream written by Packmol, if the manifest named one.
    pub fn coordinates_path(&self) -> Option<&Path> {
        self.coordinates_path.as_deref()
    }

    pub fn segment_id(&self) -> &str {
        &self.segment_id
    }

    /// Total number of atoms in the box, Drude particles excluded.
    pub fn atoms_number(&self) -> usize {
        self.sum_over(Molecule::atoms_number)
    }

    /// Total number of atom slots in the box, Drude particles included.
    pub fn atoms_number_with_drude(&self) -> usize {
        self.sum_over(Molecule::atoms_number_with_drude)
    }

    /// Bond count as written to the PSF, Drude bonds included.
    pub fn bonds_number(&self) -> usize {
        self.sum_over(Molecule::psf_bonds_number)
    }

    pub fn angles_number(&self) -> usize {
        self.sum_over(|m| m.angles().len())
    }

    pub fn dihedrals_number(&self) -> usize {
        self.sum_over(|m| m.dihedrals().len())
    }

    /// Every placed molecule, in the order its atoms appear in the coordinate stream.
    pub fn instances(&self) -> impl Iterator<Item = MoleculeInstance<'_>> + '_ {
        self.molecules
            .iter()
            .flat_map(|(molecule, count)| (1..=*count).map(move |residue_id| (molecule, residue_id)))
            .scan(0usize, |base, (molecule, residue_id)| {
                let instance = MoleculeInstance {
                    molecule,
                    residue_id,
                    base: *base,
                };
                *base += molecule.atoms_number_with_drude();
                Some(instance)
            })
    }

    fn sum_over<F>(&self, per_molecule: F) -> usize
    where
        F: Fn(&Molecule) -> usize,
    {
        self.molecules
            .iter()
            .map(|(molecule, count)| per_molecule(molecule) * count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::models::coordinates::Coordinates;
    use crate::core::models::ids::AtomIndex;
    use crate::core::topology::drude::DrudeParams;

    fn species(name: &str, symbols: &[&str], drude_at: Option<usize>) -> Molecule {
        let atoms = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| Atom::new(s, Coordinates::new(i as f64, 0.0, 0.0)))
            .collect();
        let mut builder = MoleculeBuilder::new(atoms);
        builder.residue_name(name);
        if let Some(index) = drude_at {
            builder
                .add_drude_atom(AtomIndex(index), 1.0, &DrudeParams::default())
                .unwrap();
        }
        let mut connectivity = builder.into_connectivity();
        connectivity.detect_bonds(1.1);
        connectivity.build()
    }

    fn mixture() -> System {
        let mut system = System::new().with_coordinates_path("/tmp/box.xyz");
        system
            .add_molecule(species("CAT", &["N", "C", "C"], Some(0)), 2)
            .add_molecule(species("AN", &["Cl"], None), 3);
        system
    }

    #[test]
    fn new_system_is_empty_with_default_segment() {
        let system = System::new();
        assert_eq!(system.segment_id(), "IL");
        assert_eq!(system.atoms_number(), 0);
        assert_eq!(system.instances().count(), 0);
        assert!(system.coordinates_path().is_none());
    }

    #[test]
    fn atom_counts_aggregate_over_instances() {
        let system = mixture();
        assert_eq!(system.atoms_number(), 3 * 2 + 3);
        assert_eq!(system.atoms_number_with_drude(), 4 * 2 + 3);
        assert_eq!(system.coordinates_path(), Some(Path::new("/tmp/box.xyz")));
    }

    #[test]
    fn relation_counts_include_drude_bonds() {
        let system = mixture();
        assert_eq!(system.bonds_number(), 3 * 2);
        assert_eq!(system.angles_number(), 2);
        assert_eq!(system.dihedrals_number(), 0);
    }

    #[test]
    fn instances_restart_residue_ids_and_accumulate_bases() {
        let system = mixture();
        let records: Vec<(&str, usize, usize)> = system
            .instances()
            .map(|i| (i.molecule.residue_name(), i.residue_id, i.base))
            .collect();

        assert_eq!(
            records,
            vec![
                ("CAT", 1, 0),
                ("CAT", 2, 4),
                ("AN", 1, 8),
                ("AN", 2, 9),
                ("AN", 3, 10),
            ]
        );
    }

    #[test]
    fn segment_id_can_be_overridden() {
        assert_eq!(System::new().with_segment_id("W").segment_id(), "W");
    }

    #[test]
    fn zero_count_species_contribute_nothing() {
        let mut system = System::new();
        system.add_molecule(species("X", &["C"], None), 0);
        assert_eq!(system.atoms_number(), 0);
        assert_eq!(system.instances().count(), 0);
    }
}
