//! # Core Models Module
//!
//! Data structures representing a packed molecular system.
//!
//! ## Key Components
//!
//! - [`coordinates`] - Immutable Cartesian positions
//! - [`atom`] - Atoms with charge, mass, label and an optional Drude satellite
//! - [`ids`] - Typed atom positions within a molecule
//! - [`shifts`] - Mapping from original atom positions to final, Drude-inclusive indices
//! - [`topology`] - Bond, angle and dihedral records and topology errors
//! - [`builder`] - Staged construction of immutable molecules
//! - [`molecule`] - A single species with its derived connectivity
//! - [`system`] - The ordered collection of species and their instance counts
//!
//! ## Usage
//!
//! ```ignore
//! use packpsf::core::models::{atom::Atom, builder::MoleculeBuilder, coordinates::Coordinates};
//!
//! let atoms = vec![
//!     Atom::new("H", Coordinates::new(0.0, 0.0, 0.0)),
//!     Atom::new("O", Coordinates::new(0.0, 0.0, 0.95)),
//! ];
//! let mut connectivity = MoleculeBuilder::new(atoms).into_connectivity();
//! connectivity.detect_bonds(1.5);
//! let molecule = connectivity.build();
//! ```

pub mod atom;
pub mod builder;
pub mod coordinates;
pub mod ids;
pub mod molecule;
pub mod shifts;
pub mod system;
pub mod topology;
