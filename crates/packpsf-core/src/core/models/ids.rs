/// Position of an atom in its molecule's atom list, counted before any Drude insertion.
///
/// Final (Drude-inclusive) indices are plain `usize` values obtained through
/// [`ShiftTable::final_index`](super::shifts::ShiftTable::final_index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AtomIndex(pub usize);
