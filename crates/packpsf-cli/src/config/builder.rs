use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::TopologyArgs;
use crate::error::Result;
use packpsf::core::io::xyz::CoordinateFormat;
use packpsf::engine::config::BuildConfigBuilder;
use packpsf::engine::error::EngineError;
use std::path::Path;
use tracing::debug;

/// Merges built-in defaults, the optional config file, `-S` overrides and explicit
/// flags, in increasing order of precedence.
pub fn build_config(
    args: &TopologyArgs,
    psf: Option<&Path>,
    pdb: Option<&Path>,
) -> Result<AppConfig> {
    let mut file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    file_config.apply_set_values(&args.set_values)?;
    debug!("Configuration after --set overrides: {:?}", file_config);

    let topology = file_config.topology.unwrap_or_default();
    let drude = file_config.drude.unwrap_or_default();
    let output = file_config.output.unwrap_or_default();

    let mut builder = BuildConfigBuilder::new();

    if args.tinker {
        builder = builder.coordinate_format(CoordinateFormat::Tinker);
    } else if let Some(format) = topology.format {
        builder = builder.coordinate_format(format);
    }
    if let Some(threshold) = args.bond_threshold.or(topology.bond_threshold) {
        builder = builder.bond_threshold(threshold);
    }
    if args.parallel {
        builder = builder.parallel_detection(true);
    } else if let Some(parallel) = topology.parallel_detection {
        builder = builder.parallel_detection(parallel);
    }

    if args.drude {
        builder = builder.include_drude(true);
    } else if let Some(enabled) = drude.enabled {
        builder = builder.include_drude(enabled);
    }
    if let Some(bond_const) = drude.bond_const {
        builder = builder.drude_bond_const(bond_const);
    }
    if let Some(mass) = drude.mass {
        builder = builder.drude_mass(mass);
    }

    if let Some(segment_id) = args.segment_id.clone().or(output.segment_id) {
        builder = builder.segment_id(segment_id);
    }

    let core_config = builder.build().map_err(EngineError::from)?;

    Ok(AppConfig {
        manifest_path: args.manifest.clone(),
        psf_path: psf.map(Path::to_path_buf).or(output.psf),
        pdb_path: pdb.map(Path::to_path_buf).or(output.pdb),
        core_config,
    })
}
