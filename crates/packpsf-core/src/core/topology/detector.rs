use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomIndex;
use crate::core::models::shifts::ShiftTable;
use crate::core::models::topology::Bond;
use rayon::prelude::*;

/// Default bonding cutoff, in the units of the coordinate file.
pub const DEFAULT_BOND_THRESHOLD: f64 = 1.70;

/// Infers bonds from interatomic distances.
///
/// Every unordered pair is tested exactly once and bonded when its distance is at most
/// `threshold`. Bonds are emitted in ascending `(i, j)` order with `i < j`, translated
/// to final indices through `shifts`.
pub fn determine_bonds(atoms: &[Atom], shifts: &ShiftTable, threshold: f64) -> Vec<Bond> {
    (0..atoms.len())
        .flat_map(|i| bonds_from(atoms, shifts, threshold, i))
        .collect()
}

/// Parallel variant of [`determine_bonds`]; the output is identical, order included.
pub fn determine_bonds_parallel(
    atoms: &[Atom],
    shifts: &ShiftTable,
    threshold: f64,
) -> Vec<Bond> {
    (0..atoms.len())
        .into_par_iter()
        .flat_map_iter(|i| bonds_from(atoms, shifts, threshold, i))
        .collect()
}

fn bonds_from<'a>(
    atoms: &'a [Atom],
    shifts: &'a ShiftTable,
    threshold: f64,
    i: usize,
) -> impl Iterator<Item = Bond> + 'a {
    let origin = &atoms[i].coordinates;
    atoms[i + 1..]
        .iter()
        .enumerate()
        .filter(move |(_, neighbour)| origin.distance(&neighbour.coordinates) <= threshold)
        .map(move |(offset, _)| {
            let j = i + 1 + offset;
            Bond::new(
                shifts.final_index(AtomIndex(i)),
                shifts.final_index(AtomIndex(j)),
            )
        })
}
