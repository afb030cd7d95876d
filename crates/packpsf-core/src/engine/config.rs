use crate::core::io::xyz::CoordinateFormat;
use crate::core::models::system::DEFAULT_SEGMENT_ID;
use crate::core::topology::detector::DEFAULT_BOND_THRESHOLD;
use crate::core::topology::drude::DrudeParams;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Settings for turning a Packmol input into a packed [`System`](crate::core::models::system::System).
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Layout of the per-species coordinate files. Tinker mode takes connectivity from
    /// the sibling `.conn` files instead of the parameter file or geometry.
    pub coordinate_format: CoordinateFormat,
    /// Split Drude particles off atoms whose parameter line carries a polarizability.
    pub include_drude: bool,
    /// Distance cutoff for geometric bond detection.
    pub bond_threshold: f64,
    pub drude: DrudeParams,
    /// Segment name written to every output atom record.
    pub segment_id: String,
    /// Scan atom pairs on the rayon thread pool during bond detection.
    pub parallel_detection: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            coordinate_format: CoordinateFormat::default(),
            include_drude: false,
            bond_threshold: DEFAULT_BOND_THRESHOLD,
            drude: DrudeParams::default(),
            segment_id: DEFAULT_SEGMENT_ID.to_string(),
            parallel_detection: false,
        }
    }
}

#[derive(Default)]
pub struct BuildConfigBuilder {
    coordinate_format: Option<CoordinateFormat>,
    include_drude: Option<bool>,
    bond_threshold: Option<f64>,
    drude_bond_const: Option<f64>,
    drude_mass: Option<f64>,
    segment_id: Option<String>,
    parallel_detection: Option<bool>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinate_format(mut self, format: CoordinateFormat) -> Self {
        self.coordinate_format = Some(format);
        self
    }
    pub fn include_drude(mut self, include: bool) -> Self {
        self.include_drude = Some(include);
        self
    }
    pub fn bond_threshold(mut self, threshold: f64) -> Self {
        self.bond_threshold = Some(threshold);
        self
    }
    pub fn drude_bond_const(mut self, bond_const: f64) -> Self {
        self.drude_bond_const = Some(bond_const);
        self
    }
    pub fn drude_mass(mut self, mass: f64) -> Self {
        self.drude_mass = Some(mass);
        self
    }
    pub fn segment_id(mut self, segment_id: impl Into<String>) -> Self {
        self.segment_id = Some(segment_id.into());
        self
    }
    pub fn parallel_detection(mut self, parallel: bool) -> Self {
        self.parallel_detection = Some(parallel);
        self
    }

    /// Fills unset values with defaults and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a non-positive bond threshold or
    /// Drude bond constant, a negative Drude mass, or an empty segment name.
    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        let defaults = BuildConfig::default();

        let bond_threshold = self.bond_threshold.unwrap_or(defaults.bond_threshold);
        if !(bond_threshold.is_finite() && bond_threshold > 0.0) {
            return Err(ConfigError::invalid(
                "bond_threshold",
                format!("{bond_threshold} is not a positive distance"),
            ));
        }

        let drude = DrudeParams {
            bond_const: self.drude_bond_const.unwrap_or(defaults.drude.bond_const),
            mass: self.drude_mass.unwrap_or(defaults.drude.mass),
        };
        if !(drude.bond_const.is_finite() && drude.bond_const > 0.0) {
            return Err(ConfigError::invalid(
                "drude_bond_const",
                format!("{} must be positive", drude.bond_const),
            ));
        }
        if !(drude.mass.is_finite() && drude.mass >= 0.0) {
            return Err(ConfigError::invalid(
                "drude_mass",
                format!("{} must not be negative", drude.mass),
            ));
        }

        let segment_id = self.segment_id.unwrap_or(defaults.segment_id);
        if segment_id.trim().is_empty() {
            return Err(ConfigError::invalid("segment_id", "must not be empty"));
        }

        Ok(BuildConfig {
            coordinate_format: self
                .coordinate_format
                .unwrap_or(defaults.coordinate_format),
            include_drude: self.include_drude.unwrap_or(defaults.include_drude),
            bond_threshold,
            drude,
            segment_id,
            parallel_detection: self
                .parallel_detection
                .unwrap_or(defaults.parallel_detection),
        })
    }
}
