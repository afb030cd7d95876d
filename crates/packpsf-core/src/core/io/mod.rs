//! Provides input/output functionality for the packing and topology file formats.
//!
//! Readers cover the Packmol input, the per-species coordinate, parameter and Tinker
//! connectivity files. Writers emit the packed system as PSF topology and PDB
//! coordinates. Readers share the [`traits::InputFile`] interface and
//! [`error::ParseError`]; writers share [`traits::SystemWriter`].

pub mod conn;
pub mod dat;
pub mod error;
pub(crate) mod lines;
pub mod packmol;
pub mod pdb;
pub mod psf;
pub mod traits;
pub mod xyz;
