use crate::core::io::conn::{ConnFile, IndexRecord};
use crate::core::io::dat::{DatFile, DatOptions};
use crate::core::io::packmol::PackmolManifest;
use crate::core::io::traits::InputFile;
use crate::core::io::xyz::CoordinateFormat;
use crate::core::models::builder::ConnectivityBuilder;
use crate::core::models::builder::MoleculeBuilder;
use crate::core::models::ids::AtomIndex;
use crate::core::models::molecule::Molecule;
use crate::core::models::system::System;
use crate::core::models::topology::{Angle, Bond, Dihedral};
use crate::engine::config::BuildConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const DAT_EXTENSION: &str = "dat";
const CONN_EXTENSION: &str = "conn";

/// Reads a Packmol input and builds the topology of every species it places.
///
/// # Arguments
///
/// * `manifest_path` - Path to the Packmol input file.
/// * `config` - Coordinate layout, Drude and bond detection settings.
/// * `reporter` - Receives phase and per-species progress events.
///
/// # Return
///
/// The packed system, with species in manifest order.
///
/// # Errors
///
/// Returns [`EngineError`] naming the offending file when any input cannot be read or
/// describes an inconsistent topology.
#[instrument(skip_all, name = "build_workflow")]
pub fn run(
    manifest_path: &Path,
    config: &BuildConfig,
    reporter: &ProgressReporter,
) -> Result<System, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Reading Packmol input",
    });
    let manifest = PackmolManifest::load(manifest_path).map_err(EngineError::read(manifest_path))?;
    info!(
        structures = manifest.structures.len(),
        "Loaded Packmol input from {}",
        manifest_path.display()
    );
    reporter.report(Progress::PhaseFinish);

    let mut system = System::new().with_segment_id(&config.segment_id);
    match manifest.output {
        Some(output) => system = system.with_coordinates_path(output),
        None => {
            let message = format!(
                "{} names no output file; PDB coordinates will be unavailable",
                manifest_path.display()
            );
            warn!("{}", message);
            reporter.report(Progress::Message(message));
        }
    }

    reporter.report(Progress::PhaseStart {
        name: "Building species topologies",
    });
    reporter.report(Progress::SpeciesStart {
        total: manifest.structures.len() as u64,
    });
    for entry in &manifest.structures {
        let molecule = build_species(&entry.path, config)?;
        reporter.report(Progress::SpeciesLoaded {
            residue_name: molecule.residue_name().to_string(),
            atoms: molecule.atoms_number(),
            drudes: molecule.drude_count(),
        });
        system.add_molecule(molecule, entry.count);
    }
    reporter.report(Progress::SpeciesFinish);
    reporter.report(Progress::PhaseFinish);

    info!(
        species = system.molecules().len(),
        atoms = system.atoms_number(),
        atoms_with_drude = system.atoms_number_with_drude(),
        bonds = system.bonds_number(),
        angles = system.angles_number(),
        dihedrals = system.dihedrals_number(),
        "System topology complete"
    );
    Ok(system)
}

/// Builds one species from its coordinate file and the sibling `.dat` (and, in Tinker
/// mode, `.conn`) file sharing its stem.
///
/// # Errors
///
/// Returns [`EngineError`] if a file is missing or malformed, or if a connectivity
/// index does not fit the molecule.
pub fn build_species(xyz_path: &Path, config: &BuildConfig) -> Result<Molecule, EngineError> {
    let table = config
        .coordinate_format
        .read_from_path(xyz_path)
        .map_err(EngineError::read(xyz_path))?;
    if table.is_inconsistent() {
        warn!(
            declared = table.declared,
            read = table.atoms.len(),
            "Difference between declared and read atom count in {}",
            xyz_path.display()
        );
    }
    let atoms = table.into_atoms();
    let atom_count = atoms.len();

    let dat_path = xyz_path.with_extension(DAT_EXTENSION);
    let options = DatOptions {
        atom_count,
        read_bonds: config.coordinate_format == CoordinateFormat::Xyz,
    };
    let dat = DatFile::read_from_path(&dat_path, &options).map_err(EngineError::read(&dat_path))?;

    let mut builder = MoleculeBuilder::new(atoms);
    builder.residue_name(&dat.residue_name);
    for (index, parameters) in dat.parameters.iter().enumerate() {
        // Line 1 holds the residue name.
        let line = Some(index + 2);
        builder
            .apply_parameters(AtomIndex(index), parameters)
            .map_err(EngineError::topology(&dat_path, line))?;
        if let (true, Some(polarizability)) = (config.include_drude, parameters.polarizability) {
            builder
                .add_drude_atom(AtomIndex(index), polarizability, &config.drude)
                .map_err(EngineError::topology(&dat_path, line))?;
        }
    }

    let mut connectivity = builder.into_connectivity();
    match config.coordinate_format {
        CoordinateFormat::Xyz => match &dat.bonds {
            Some(records) => {
                debug!(bonds = records.len(), "Using explicit bonds from {}", dat_path.display());
                import_bonds(&mut connectivity, records, &dat_path)?;
            }
            None if config.parallel_detection => {
                connectivity.detect_bonds_parallel(config.bond_threshold);
            }
            None => {
                connectivity.detect_bonds(config.bond_threshold);
            }
        },
        CoordinateFormat::Tinker if atom_count > 1 => {
            let conn_path = xyz_path.with_extension(CONN_EXTENSION);
            let conn = ConnFile::read_from_path(&conn_path, &atom_count)
                .map_err(EngineError::read(&conn_path))?;

            import_bonds(&mut connectivity, &conn.bonds, &conn_path)?;
            if let Some(records) = &conn.angles {
                let angles = translate(&connectivity, records, &conn_path)?
                    .into_iter()
                    .map(|[a, b, c]| Angle::new(a, b, c))
                    .collect();
                connectivity
                    .set_angles(angles)
                    .map_err(EngineError::topology(&conn_path, None))?;
            }
            if let Some(records) = &conn.dihedrals {
                let dihedrals = translate(&connectivity, records, &conn_path)?
                    .into_iter()
                    .map(|[a, b, c, d]| Dihedral::new(a, b, c, d))
                    .collect();
                connectivity
                    .set_dihedrals(dihedrals)
                    .map_err(EngineError::topology(&conn_path, None))?;
            }
        }
        CoordinateFormat::Tinker => {}
    }

    Ok(connectivity.build())
}

fn import_bonds(
    connectivity: &mut ConnectivityBuilder,
    records: &[IndexRecord<2>],
    path: &Path,
) -> Result<(), EngineError> {
    let pairs = translate(connectivity, records, path)?;
    connectivity
        .set_bonds(pairs.into_iter().map(|[a, b]| Bond::new(a, b)))
        .map_err(EngineError::topology(path, None))?;
    Ok(())
}

fn translate<const N: usize>(
    connectivity: &ConnectivityBuilder,
    records: &[IndexRecord<N>],
    path: &Path,
) -> Result<Vec<[usize; N]>, EngineError> {
    records
        .iter()
        .map(|record| {
            connectivity
                .translate_all(&record.indices)
                .map_err(EngineError::topology(path, Some(record.line)))
        })
        .collect()
}
