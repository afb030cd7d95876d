//! # Topology Module
//!
//! Connectivity derivation for a single species.
//!
//! ## Overview
//!
//! Bonds either come from an explicit table (handled by the I/O layer and translated
//! through the molecule's [`ShiftTable`](crate::core::models::shifts::ShiftTable)) or
//! are inferred from interatomic distances. Angles and dihedrals are then derived from
//! the bond graph. Drude particles are inserted before any connectivity is recorded, so
//! every relation is expressed in final, Drude-inclusive indices.
//!
//! ## Key Components
//!
//! - [`detector`] - Distance-threshold bond inference over all atom pairs
//! - [`derive`] - Angle and dihedral enumeration from the bond graph
//! - [`drude`] - Drude satellite construction and its physical constants

pub mod derive;
pub mod detector;
pub mod drude;
