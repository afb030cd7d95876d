use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "packpsf - Build PSF topologies and PDB coordinates for Packmol-packed systems, with optional Drude polarizable particles.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of worker threads used when bond detection runs in parallel
    /// (see --parallel). Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the packed system and write PSF and/or PDB files.
    Build(BuildArgs),
    /// Build every species topology and print a summary without writing files.
    Inspect(InspectArgs),
}

/// Options shared by every command that builds species topologies.
#[derive(Args, Debug, Clone)]
pub struct TopologyArgs {
    /// Path to the Packmol input file.
    #[arg(required = true, value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read species coordinates in Tinker XYZ layout with `.conn` connectivity files.
    #[arg(short = 't', long)]
    pub tinker: bool,

    /// Split Drude particles off polarizable atoms.
    #[arg(long)]
    pub drude: bool,

    /// Scan atom pairs for geometric bonds on the worker thread pool.
    #[arg(short = 'p', long)]
    pub parallel: bool,

    /// Override the distance cutoff for geometric bond detection.
    #[arg(short = 'b', long, value_name = "FLOAT")]
    pub bond_threshold: Option<f64>,

    /// Override the segment name written to every atom record.
    #[arg(short = 's', long = "segment", value_name = "NAME")]
    pub segment_id: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S drude.mass=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub topology: TopologyArgs,

    /// Output PSF file.
    #[arg(long, value_name = "PATH")]
    pub psf: Option<PathBuf>,

    /// Output PDB file. Coordinates are taken from the Packmol output file.
    #[arg(long, value_name = "PATH")]
    pub pdb: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub topology: TopologyArgs,
}
