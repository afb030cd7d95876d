use crate::core::models::atom::Atom;
use crate::core::models::topology::TopologyError;

/// Empirical factor relating a Drude particle's charge to the atomic polarizability
/// and the harmonic constant of the parent-satellite spring.
pub const DRUDE_CHARGE_FACTOR: f64 = -0.0548768646057431;

pub const DEFAULT_DRUDE_BOND_CONST: f64 = 1000.0;
pub const DEFAULT_DRUDE_MASS: f64 = 0.4;

/// Prefix of every Drude satellite label.
const DRUDE_LABEL_PREFIX: char = 'D';
/// Number of parent label characters kept in the satellite label.
const DRUDE_LABEL_PARENT_CHARS: usize = 2;

/// Spring constant and mass used when splitting a Drude particle off its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrudeParams {
    /// Harmonic constant of the parent-Drude bond.
    pub bond_const: f64,
    /// Mass transferred from the parent to the Drude particle.
    pub mass: f64,
}

impl Default for DrudeParams {
    fn default() -> Self {
        Self {
            bond_const: DEFAULT_DRUDE_BOND_CONST,
            mass: DEFAULT_DRUDE_MASS,
        }
    }
}

/// Charge carried by a Drude particle for the given polarizability.
///
/// # Errors
///
/// Returns [`TopologyError::InvalidPolarizability`] for negative or non-finite input.
pub fn drude_charge(polarizability: f64, params: &DrudeParams) -> Result<f64, TopologyError> {
    if !polarizability.is_finite() || polarizability < 0.0 {
        return Err(TopologyError::InvalidPolarizability(polarizability));
    }
    Ok(DRUDE_CHARGE_FACTOR * (polarizability * params.bond_const).sqrt())
}

/// Label of the Drude particle attached to an atom labelled `parent_label`.
pub fn drude_label(parent_label: &str) -> String {
    std::iter::once(DRUDE_LABEL_PREFIX)
        .chain(parent_label.chars().take(DRUDE_LABEL_PARENT_CHARS))
        .collect()
}

/// Splits a Drude particle carrying `charge` off `parent`.
///
/// The satellite shares the parent's symbol and position. Charge and mass are
/// conserved: whatever the satellite carries is subtracted from the parent.
pub(crate) fn attach_drude(parent: &mut Atom, charge: f64, params: &DrudeParams) {
    let mut drude = Atom::new(&parent.symbol, parent.coordinates);
    drude.charge = charge;
    drude.mass = params.mass;
    drude.label = drude_label(&parent.label);

    parent.mass -= params.mass;
    parent.charge -= charge;
    parent.attach_drude(drude);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::coordinates::Coordinates;

    fn oxygen() -> Atom {
        let mut atom = Atom::new("O", Coordinates::new(0.5, 1.5, -2.0));
        atom.label = "OD30C".to_string();
        atom.charge = -0.5;
        atom.mass = 15.9994;
        atom
    }

    #[test]
    fn drude_charge_follows_empirical_relation() {
        let params = DrudeParams::default();
        let charge = drude_charge(1.0, &params).unwrap();
        assert!((charge - DRUDE_CHARGE_FACTOR * 1000.0f64.sqrt()).abs() < 1e-12);
        assert!(charge < 0.0);
    }

    #[test]
    fn zero_polarizability_yields_neutral_drude() {
        assert_eq!(drude_charge(0.0, &DrudeParams::default()), Ok(0.0));
    }

    #[test]
    fn invalid_polarizability_is_rejected() {
        let params = DrudeParams::default();
        assert_eq!(
            drude_charge(-0.1, &params),
            Err(TopologyError::InvalidPolarizability(-0.1))
        );
        assert!(drude_charge(f64::NAN, &params).is_err());
        assert!(drude_charge(f64::INFINITY, &params).is_err());
    }

    #[test]
    fn drude_label_keeps_first_two_parent_characters() {
        assert_eq!(drude_label("OD30C"), "DOD");
        assert_eq!(drude_label("C"), "DC");
        assert_eq!(drude_label(""), "D");
    }

    #[test]
    fn attach_drude_conserves_charge_and_mass() {
        let params = DrudeParams::default();
        let mut atom = oxygen();
        let (charge_before, mass_before) = (atom.charge, atom.mass);
        let charge = drude_charge(0.9, &params).unwrap();

        attach_drude(&mut atom, charge, &params);

        let drude = atom.drude().expect("drude attached");
        assert!((atom.charge + drude.charge - charge_before).abs() < 1e-12);
        assert!((atom.mass + drude.mass - mass_before).abs() < 1e-12);
        assert_eq!(drude.mass, DEFAULT_DRUDE_MASS);
    }

    #[test]
    fn attach_drude_copies_symbol_and_position() {
        let params = DrudeParams {
            bond_const: 500.0,
            mass: 0.2,
        };
        let mut atom = oxygen();
        attach_drude(&mut atom, -1.0, &params);

        let drude = atom.drude().unwrap();
        assert_eq!(drude.symbol, "O");
        assert_eq!(drude.coordinates, Coordinates::new(0.5, 1.5, -2.0));
        assert_eq!(drude.label, "DOD");
        assert_eq!(drude.mass, 0.2);
        assert!(!drude.has_drude());
    }
}
