use thiserror::Error;

/// Errors raised while assembling a molecule's topology.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TopologyError {
    #[error(
        "Drude particles must be added in ascending atom order: atom {index} requested after atom {last}"
    )]
    DrudeOutOfOrder { index: usize, last: usize },

    #[error("Atom index {index} is out of range for a molecule with {atom_count} atoms")]
    IndexOutOfRange { index: usize, atom_count: usize },

    #[error("Atom indices are 1-based; found index 0")]
    ZeroIndex,

    #[error("Invalid atom index '{0}'")]
    InvalidIndex(String),

    #[error("Invalid polarizability {0}: must be finite and non-negative")]
    InvalidPolarizability(f64),

    #[error("Atom {0} cannot be bonded to itself")]
    SelfBond(usize),
}

/// A covalent bond between two atoms, stored as final (Drude-inclusive) indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atoms: [usize; 2],
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize) -> Self {
        Self {
            atoms: [atom1, atom2],
        }
    }

    /// Orientation-independent key, used to reject duplicate bonds.
    pub fn key(&self) -> (usize, usize) {
        let [a, b] = self.atoms;
        (a.min(b), a.max(b))
    }
}

/// A bond angle `a-b-c` with `b` as the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Angle {
    pub atoms: [usize; 3],
}

impl Angle {
    pub fn new(first: usize, vertex: usize, last: usize) -> Self {
        Self {
            atoms: [first, vertex, last],
        }
    }
}

/// A proper dihedral along the bonded path `a-b-c-d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dihedral {
    pub atoms: [usize; 4],
}

impl Dihedral {
    pub fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self {
            atoms: [a, b, c, d],
        }
    }

    pub fn reversed(&self) -> Self {
        let [a, b, c, d] = self.atoms;
        Self::new(d, c, b, a)
    }

    /// The lexicographically smaller of the two traversal directions.
    pub fn canonical(&self) -> [usize; 4] {
        self.atoms.min(self.reversed().atoms)
    }
}
