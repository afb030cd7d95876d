use packpsf::engine::config::BuildConfig;
use std::path::PathBuf;

/// Fully merged settings for one CLI invocation.
#[derive(Debug)]
pub struct AppConfig {
    pub manifest_path: PathBuf,
    pub psf_path: Option<PathBuf>,
    pub pdb_path: Option<PathBuf>,
    pub core_config: BuildConfig,
}
