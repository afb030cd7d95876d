use crate::core::models::topology::{Angle, Bond, Dihedral};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Undirected neighbour lists over final indices, ordered for deterministic traversal.
struct Adjacency(BTreeMap<usize, BTreeSet<usize>>);

impl Adjacency {
    fn from_bonds(bonds: &[Bond]) -> Self {
        let mut map: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for &Bond { atoms: [a, b] } in bonds {
            if a == b {
                continue;
            }
            map.entry(a).or_default().insert(b);
            map.entry(b).or_default().insert(a);
        }
        Self(map)
    }

    fn neighbours(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.0.get(&atom).into_iter().flatten().copied()
    }
}

/// Derives every bond angle from a bond list.
///
/// Each vertex `b` is visited in ascending order and every pair of its neighbours
/// `a < c` produces `(a, b, c)`. Returns `None` when `bonds` is unset.
pub fn determine_angles(bonds: Option<&[Bond]>) -> Option<Vec<Angle>> {
    let adjacency = Adjacency::from_bonds(bonds?);

    let angles = adjacency
        .0
        .iter()
        .flat_map(|(&vertex, neighbours)| {
            neighbours.iter().enumerate().flat_map(move |(k, &first)| {
                neighbours
                    .iter()
                    .skip(k + 1)
                    .map(move |&last| Angle::new(first, vertex, last))
            })
        })
        .collect();
    Some(angles)
}

/// Derives proper dihedrals by extending each angle with one more bond at either end.
///
/// A path and its reverse describe the same torsion, so only the first orientation
/// encountered is kept. Returns `None` when `angles` is unset.
pub fn determine_dihedrals(angles: Option<&[Angle]>, bonds: &[Bond]) -> Option<Vec<Dihedral>> {
    let angles = angles?;
    let adjacency = Adjacency::from_bonds(bonds);
    let mut seen = HashSet::new();
    let mut dihedrals = Vec::new();

    for &Angle { atoms: [a, b, c] } in angles {
        let forward = adjacency
            .neighbours(c)
            .filter(|&d| d != a && d != b)
            .map(|d| Dihedral::new(a, b, c, d));
        let backward = adjacency
            .neighbours(a)
            .filter(|&d| d != b && d != c)
            .map(|d| Dihedral::new(d, a, b, c));

        for dihedral in forward.chain(backward) {
            if seen.insert(dihedral.canonical()) {
                dihedrals.push(dihedral);
            }
        }
    }
    Some(dihedrals)
}
