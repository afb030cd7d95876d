//! # Core Module
//!
//! Fundamental building blocks for turning per-species coordinate and parameter files
//! into a molecular topology.
//!
//! - **Molecular Representation** ([`models`]) - Coordinates, atoms, molecules, the
//!   index shift table and the aggregated system
//! - **Connectivity** ([`topology`]) - Bond detection, angle/dihedral derivation and
//!   Drude particle insertion
//! - **File I/O** ([`io`]) - Packmol manifests, XYZ/Tinker coordinates, parameter and
//!   connectivity tables, and the PSF/PDB writers

pub mod io;
pub mod models;
pub mod topology;
