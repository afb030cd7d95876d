//! # packpsf Core Library
//!
//! Builds fully connected molecular topologies for systems packed with Packmol and
//! serializes them as PSF structure files and PDB coordinate files, optionally with
//! Drude polarizable particles attached to selected atoms.
//!
//! ## Architecture
//!
//! The library follows a three-layer design:
//!
//! - **[`core`]: The Foundation.** Data models (`Atom`, `Molecule`, `System`), the
//!   topology engine (geometric bond detection, angle and dihedral derivation, Drude
//!   insertion with index remapping), and file readers/writers.
//!
//! - **[`engine`]: Run Settings.** Validated build configuration, progress reporting and
//!   the error type shared by the workflows.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that turn a Packmol
//!   manifest into a `System` and export it to disk.

pub mod core;
pub mod engine;
pub mod workflows;
