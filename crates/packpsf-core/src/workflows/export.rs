use crate::core::io::error::WriteError;
use crate::core::io::pdb::PdbFile;
use crate::core::io::psf::PsfFile;
use crate::core::io::traits::SystemWriter;
use crate::core::models::system::System;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument};

/// Writes the system topology as a PSF file.
///
/// # Errors
///
/// Returns [`EngineError::Write`] if the file cannot be written.
#[instrument(skip_all, name = "psf_export")]
pub fn write_psf(
    system: &System,
    path: &Path,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    PsfFile::write_to_path(system, path)
        .map_err(|e| EngineError::write(path)(WriteError::Io(e)))?;
    info!(
        atoms = system.atoms_number_with_drude(),
        "PSF file successfully written to {}",
        path.display()
    );
    reporter.report(Progress::FileWritten {
        path: path.to_path_buf(),
    });
    Ok(())
}

/// Writes PDB coordinates for the system, taking positions from the packed coordinate
/// stream named in the Packmol input.
///
/// # Errors
///
/// Returns [`EngineError::MissingCoordinates`] when the system has no coordinate
/// stream, and [`EngineError::Write`] when the stream disagrees with the topology or the
/// file cannot be written. No output file is created on error.
#[instrument(skip_all, name = "pdb_export")]
pub fn write_pdb(
    system: &System,
    path: &Path,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    let Some(stream) = system.coordinates_path() else {
        return Err(EngineError::MissingCoordinates(path.to_path_buf()));
    };
    info!("Reading packed coordinates from {}", stream.display());

    PdbFile::write_to_path(system, path).map_err(EngineError::write(path))?;
    info!(
        atoms = system.atoms_number_with_drude(),
        "PDB file successfully written to {}",
        path.display()
    );
    reporter.report(Progress::FileWritten {
        path: path.to_path_buf(),
    });
    Ok(())
}
