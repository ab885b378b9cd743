//! Effect configuration, merged once at startup from the host's options

use crate::error::{BackspaceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Key under which the host options carry the effect's settings
pub const CONFIG_NAMESPACE: &str = "hyperBackspace";

/// Tuning for the particle physics and spawn velocities.
///
/// Every key is optional in the source document; missing keys keep their
/// default and unknown keys are ignored. Once built the value is never
/// mutated: it is copied into the simulation and the deletion detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
    /// Enables `debug`-level tracing for the effect
    pub debug: bool,
    /// Added to vertical velocity once per tick (px/ms per tick)
    pub gravity: f32,
    pub horizontal_max_velocity: f32,
    pub vertical_max_velocity: f32,
    pub angular_max_velocity: f32,
    /// Lifetime of a particle, in ticks
    pub particle_time_to_live: i32,
    /// Accepted for compatibility with existing host configs; the physics step does not read it
    pub vertical_drag_coefficient: f32,
    pub horizontal_drag_coefficient: f32,
    pub bounce_drag_coefficient: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            debug: false,
            gravity: 0.01,
            horizontal_max_velocity: 0.3,
            vertical_max_velocity: 0.2,
            angular_max_velocity: 0.02,
            particle_time_to_live: 1000,
            vertical_drag_coefficient: 0.2,
            horizontal_drag_coefficient: 0.8,
            bounce_drag_coefficient: 0.6,
        }
    }
}

#[derive(Serialize)]
struct Namespaced<'a> {
    #[serde(rename = "hyperBackspace")]
    section: &'a EffectConfig,
}

impl EffectConfig {
    /// Parse a TOML document and merge its `[hyperBackspace]` table over the defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let document: toml::Table = toml::from_str(source)?;
        let config = match document.get(CONFIG_NAMESPACE) {
            None => Self::default(),
            Some(toml::Value::Table(section)) => {
                toml::Value::Table(section.clone()).try_into::<Self>()?
            }
            Some(_) => {
                return Err(BackspaceError::InvalidConfigSection(
                    CONFIG_NAMESPACE.to_string(),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Merge the `hyperBackspace` member of a host options object over the defaults
    pub fn from_json_value(options: &serde_json::Value) -> Result<Self> {
        let config = match options.get(CONFIG_NAMESPACE) {
            None | Some(serde_json::Value::Null) => Self::default(),
            Some(section @ serde_json::Value::Object(_)) => {
                serde_json::from_value::<Self>(section.clone())?
            }
            Some(_) => {
                return Err(BackspaceError::InvalidConfigSection(
                    CONFIG_NAMESPACE.to_string(),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let options: serde_json::Value = serde_json::from_str(source)?;
        Self::from_json_value(&options)
    }

    /// Load from a `.toml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            other => Err(BackspaceError::UnsupportedConfigFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Serialize as a TOML document with the namespace table
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&Namespaced { section: self })?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("gravity", self.gravity),
            ("horizontalMaxVelocity", self.horizontal_max_velocity),
            ("verticalMaxVelocity", self.vertical_max_velocity),
            ("angularMaxVelocity", self.angular_max_velocity),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(out_of_range(field, f32::MIN as f64, f32::MAX as f64, value as f64));
            }
        }

        let coefficients = [
            ("verticalDragCoefficient", self.vertical_drag_coefficient),
            ("horizontalDragCoefficient", self.horizontal_drag_coefficient),
            ("bounceDragCoefficient", self.bounce_drag_coefficient),
        ];
        for (field, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(out_of_range(field, 0.0, f32::MAX as f64, value as f64));
            }
        }

        if self.particle_time_to_live < 1 {
            return Err(out_of_range(
                "particleTimeToLive",
                1.0,
                i32::MAX as f64,
                self.particle_time_to_live as f64,
            ));
        }
        Ok(())
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> BackspaceError {
    BackspaceError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}
