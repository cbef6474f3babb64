//! Mechanism configuration
//!
//! The fixed geometric constants of the physical pantograph: the two
//! segment lengths of each arm and the spacing between the motor shafts.
//! Encode and decode must use identical constants for angles to
//! round-trip.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometric constants of the pantograph mechanism, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechanismConfig {
    /// Length of the left arm segment pivoting at the motor.
    pub left_close_arm: f64,
    /// Length of the left arm segment reaching the pen tip.
    pub left_far_arm: f64,
    /// Length of the right arm segment pivoting at the motor.
    pub right_close_arm: f64,
    /// Length of the right arm segment reaching the pen tip.
    pub right_far_arm: f64,
    /// Distance between the two motor shafts.
    pub motor_space: f64,
}

impl Default for MechanismConfig {
    fn default() -> Self {
        // Reference device dimensions
        Self {
            left_close_arm: 11.0,
            left_far_arm: 11.0,
            right_close_arm: 11.0,
            right_far_arm: 11.0,
            motor_space: 2.5,
        }
    }
}

impl MechanismConfig {
    /// Load a configuration from a TOML file.
    ///
    /// Missing fields fall back to the reference device dimensions.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: MechanismConfig =
            toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every length is positive.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("left_close_arm", self.left_close_arm),
            ("left_far_arm", self.left_far_arm),
            ("right_close_arm", self.right_close_arm),
            ("right_far_arm", self.right_far_arm),
            ("motor_space", self.motor_space),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive length, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_device() {
        let config = MechanismConfig::default();
        assert_eq!(config.left_close_arm, 11.0);
        assert_eq!(config.right_far_arm, 11.0);
        assert_eq!(config.motor_space, 2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_toml() {
        let config: MechanismConfig = toml::from_str("motor_space = 3.0").unwrap();
        assert_eq!(config.motor_space, 3.0);
        assert_eq!(config.left_close_arm, 11.0);
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let config = MechanismConfig {
            left_far_arm: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
