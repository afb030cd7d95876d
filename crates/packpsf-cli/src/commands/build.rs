use crate::cli::BuildArgs;
use crate::config::{AppConfig, build_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use packpsf::engine::progress::ProgressReporter;
use packpsf::workflows::{build, export};
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args.topology, args.psf.as_deref(), args.pdb.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    execute(&config, &reporter)
}

fn execute(config: &AppConfig, reporter: &ProgressReporter) -> Result<()> {
    info!("Building system from {:?}", &config.manifest_path);
    let system = build::run(&config.manifest_path, &config.core_config, reporter)?;
    println!(
        "Built {} species with {} atoms in total.",
        system.molecules().len(),
        system.atoms_number_with_drude()
    );

    if config.psf_path.is_none() && config.pdb_path.is_none() {
        warn!("No --psf or --pdb output requested; nothing was written.");
        println!("Warning: no output file requested. Use --psf and/or --pdb.");
        return Ok(());
    }

    if let Some(path) = &config.psf_path {
        export::write_psf(&system, path, reporter)?;
    }
    if let Some(path) = &config.pdb_path {
        export::write_pdb(&system, path, reporter)?;
    }
    Ok(())
}
