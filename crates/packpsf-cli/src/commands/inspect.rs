use crate::cli::InspectArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use packpsf::core::models::system::System;
use packpsf::engine::progress::ProgressReporter;
use packpsf::workflows::build;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let config = build_config(&args.topology, None, None)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Inspecting species listed in {:?}", &config.manifest_path);
    let system = build::run(&config.manifest_path, &config.core_config, &reporter)?;
    print!("{}", render_summary(&system));
    Ok(())
}

/// One row per species with its copy count and per-copy topology sizes, followed by
/// totals for the packed system.
fn render_summary(system: &System) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:>7} {:>7} {:>7} {:>7} {:>7} {:>9}",
        "RESIDUE", "COPIES", "ATOMS", "DRUDES", "BONDS", "ANGLES", "DIHEDRALS"
    );
    for (molecule, count) in system.molecules() {
        let _ = writeln!(
            out,
            "{:<8} {:>7} {:>7} {:>7} {:>7} {:>7} {:>9}",
            molecule.residue_name(),
            count,
            molecule.atoms_number(),
            molecule.drude_count(),
            molecule.psf_bonds_number(),
            molecule.angles().len(),
            molecule.dihedrals().len()
        );
    }
    let _ = writeln!(
        out,
        "Total: {} atoms ({} with Drude particles), {} bonds, {} angles, {} dihedrals",
        system.atoms_number(),
        system.atoms_number_with_drude(),
        system.bonds_number(),
        system.angles_number(),
        system.dihedrals_number()
    );
    out
}
