use super::ids::AtomIndex;
use super::topology::TopologyError;

/// Maps original atom positions to their final, Drude-inclusive indices.
///
/// Every Drude particle is placed directly after its parent, so each atom is pushed
/// one slot further for every polarized atom that precedes it:
/// `final_index(i) = i + shift(i)`, where `shift(i)` counts promoted atoms with an
/// original index strictly below `i`. A promoted atom's satellite sits at
/// `final_index(i) + 1`.
///
/// Promoted indices are kept sorted, so lookups are a binary search and a table with
/// no promotions resolves every index to itself without searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftTable {
    atom_count: usize,
    promoted: Vec<usize>,
}

impl ShiftTable {
    pub fn new(atom_count: usize) -> Self {
        Self {
            atom_count,
            promoted: Vec::new(),
        }
    }

    /// Number of atoms in the molecule before Drude insertion.
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// Number of Drude particles inserted so far.
    pub fn drude_count(&self) -> usize {
        self.promoted.len()
    }

    /// `true` when no atom has been promoted and every index maps to itself.
    pub fn is_identity(&self) -> bool {
        self.promoted.is_empty()
    }

    /// Number of Drude particles inserted before the atom at `index`.
    pub fn shift(&self, index: AtomIndex) -> usize {
        if self.is_identity() {
            return 0;
        }
        self.promoted.partition_point(|&p| p < index.0)
    }

    pub fn final_index(&self, index: AtomIndex) -> usize {
        index.0 + self.shift(index)
    }

    /// Converts a 1-based index read from a connectivity table into a final index.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError`] if the text is not an unsigned integer, is zero, or
    /// points past the last atom of the molecule.
    pub fn translate(&self, raw: &str) -> Result<usize, TopologyError> {
        let one_based: usize = raw
            .trim()
            .parse()
            .map_err(|_| TopologyError::InvalidIndex(raw.to_string()))?;
        if one_based == 0 {
            return Err(TopologyError::ZeroIndex);
        }
        if one_based > self.atom_count {
            return Err(TopologyError::IndexOutOfRange {
                index: one_based,
                atom_count: self.atom_count,
            });
        }
        Ok(self.final_index(AtomIndex(one_based - 1)))
    }

    /// Records a Drude insertion after the atom at `index`.
    ///
    /// Promotions must arrive in strictly ascending order; anything else would leave
    /// already-issued final indices stale.
    pub(crate) fn promote(&mut self, index: AtomIndex) -> Result<(), TopologyError> {
        if index.0 >= self.atom_count {
            return Err(TopologyError::IndexOutOfRange {
                index: index.0,
                atom_count: self.atom_count,
            });
        }
        if let Some(&last) = self.promoted.last() {
            if index.0 <= last {
                return Err(TopologyError::DrudeOutOfOrder {
                    index: index.0,
                    last,
                });
            }
        }
        self.promoted.push(index.0);
        Ok(())
    }
}
