use crate::error::{CliError, Result};
use packpsf::core::io::xyz::CoordinateFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileTopologyConfig {
    pub format: Option<CoordinateFormat>,
    pub bond_threshold: Option<f64>,
    pub parallel_detection: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDrudeConfig {
    pub enabled: Option<bool>,
    pub bond_const: Option<f64>,
    pub mass: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub segment_id: Option<String>,
    pub psf: Option<PathBuf>,
    pub pdb: Option<PathBuf>,
}

/// Partial settings as written in a TOML configuration file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub topology: Option<FileTopologyConfig>,
    pub drude: Option<FileDrudeConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let config_error = |source: anyhow::Error| CliError::ConfigFile {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.into()))?;
        toml::from_str(&content).map_err(|e| config_error(e.into()))
    }

    /// Applies `KEY=VALUE` overrides on top of the values read from the file.
    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::InvalidSetting {
                    key: kv_pair.clone(),
                    reason: "expected KEY=VALUE".to_string(),
                });
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "topology.format" => {
                    self.topology_mut().format = Some(parse_format(value)?);
                }
                "topology.bond-threshold" => {
                    self.topology_mut().bond_threshold = Some(parse_value(key, value)?);
                }
                "topology.parallel-detection" => {
                    self.topology_mut().parallel_detection = Some(parse_value(key, value)?);
                }
                "drude.enabled" => {
                    self.drude_mut().enabled = Some(parse_value(key, value)?);
                }
                "drude.bond-const" => {
                    self.drude_mut().bond_const = Some(parse_value(key, value)?);
                }
                "drude.mass" => {
                    self.drude_mut().mass = Some(parse_value(key, value)?);
                }
                "output.segment-id" => {
                    self.output_mut().segment_id = Some(value.to_string());
                }
                "output.psf" => {
                    self.output_mut().psf = Some(PathBuf::from(value));
                }
                "output.pdb" => {
                    self.output_mut().pdb = Some(PathBuf::from(value));
                }
                _ => {
                    return Err(CliError::InvalidSetting {
                        key: key.to_string(),
                        reason: "unsupported configuration key".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn topology_mut(&mut self) -> &mut FileTopologyConfig {
        self.topology.get_or_insert_with(Default::default)
    }

    fn drude_mut(&mut self) -> &mut FileDrudeConfig {
        self.drude.get_or_insert_with(Default::default)
    }

    fn output_mut(&mut self) -> &mut FileOutputConfig {
        self.output.get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| CliError::InvalidSetting {
        key: key.to_string(),
        reason: format!("'{}' is not a valid {}", value, std::any::type_name::<T>()),
    })
}

fn parse_format(value: &str) -> Result<CoordinateFormat> {
    match value.to_ascii_lowercase().as_str() {
        "xyz" => Ok(CoordinateFormat::Xyz),
        "tinker" => Ok(CoordinateFormat::Tinker),
        _ => Err(CliError::InvalidSetting {
            key: "topology.format".to_string(),
            reason: format!("unknown coordinate format '{}', expected 'xyz' or 'tinker'", value),
        }),
    }
}
