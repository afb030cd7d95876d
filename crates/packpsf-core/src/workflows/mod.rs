//! # Workflows Module
//!
//! Top-level entry points that turn a Packmol input into output files.
//!
//! - **Build Workflow** ([`build`]) - Reads the Packmol input and every species' coordinate,
//!   parameter and connectivity files, returning the packed [`System`](crate::core::models::system::System).
//! - **Export Workflow** ([`export`]) - Writes a built system as PSF topology and PDB coordinates.

pub mod build;
pub mod export;
