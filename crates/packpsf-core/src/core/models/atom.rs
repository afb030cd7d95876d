use super::coordinates::Coordinates;
use std::fmt;

/// Per-atom force-field values read from a species parameter file.
///
/// The optional columns are only present on lines describing polarizable atoms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtomParameters {
    /// Engine label written to the output files (e.g. "OW", "HT").
    pub label: String,
    /// Partial charge in elementary charge units.
    pub charge: f64,
    /// Mass in atomic mass units.
    pub mass: f64,
    /// Thole screening factor, when the line carries one.
    pub thole: Option<f64>,
    /// Atomic polarizability; its presence marks the atom as a Drude candidate.
    pub polarizability: Option<f64>,
}

/// An atom of a species, as it appears in the topology.
///
/// Equality is structural over symbol, coordinates, charge, mass and label. It is
/// never used to locate an atom; atoms are identified by their position in the owning
/// molecule.
#[derive(Debug, Clone)]
pub struct Atom {
    /// Element symbol as read from the coordinate file.
    pub symbol: String,
    /// Position in the species' coordinate file.
    pub coordinates: Coordinates,
    /// Partial charge in elementary charge units.
    pub charge: f64,
    /// Mass in atomic mass units.
    pub mass: f64,
    /// Label used by MD engines for this atom type. Defaults to the symbol.
    pub label: String,
    /// Polarizability written to the PSF atom record.
    pub polarizability: f64,
    /// Thole factor written to the PSF atom record.
    pub thole: f64,
    drude: Option<Box<Atom>>,
}

impl Atom {
    /// Creates an atom with zero charge and mass whose label equals its symbol.
    pub fn new(symbol: &str, coordinates: Coordinates) -> Self {
        Self {
            symbol: symbol.to_string(),
            coordinates,
            charge: 0.0,
            mass: 0.0,
            label: symbol.to_string(),
            polarizability: 0.0,
            thole: 0.0,
            drude: None,
        }
    }

    /// Overwrites label, charge, mass and the optional polarization columns.
    pub fn apply_parameters(&mut self, parameters: &AtomParameters) {
        self.label = parameters.label.clone();
        self.charge = parameters.charge;
        self.mass = parameters.mass;
        self.thole = parameters.thole.unwrap_or(0.0);
        self.polarizability = parameters.polarizability.unwrap_or(0.0);
    }

    /// The Drude satellite owned by this atom, if it has been polarized.
    pub fn drude(&self) -> Option<&Atom> {
        self.drude.as_deref()
    }

    pub fn has_drude(&self) -> bool {
        self.drude.is_some()
    }

    /// Number of slots this atom occupies in the final atom sequence.
    pub fn slot_count(&self) -> usize {
        if self.has_drude() { 2 } else { 1 }
    }

    pub(crate) fn attach_drude(&mut self, drude: Atom) {
        self.drude = Some(Box::new(drude));
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.coordinates == other.coordinates
            && self.charge == other.charge
            && self.mass == other.mass
            && self.label == other.label
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) {} charge: {}, mass: {}",
            self.label, self.symbol, self.coordinates, self.charge, self.mass
        )
    }
}
