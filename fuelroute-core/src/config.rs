//! Planner configuration.

use thiserror::Error;

/// Vehicle and search parameters for a planning request.
///
/// # Examples
/// ```
/// use fuelroute_core::PlannerConfig;
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.max_range_miles, 500.0);
/// assert_eq!(config.mpg, 10.0);
/// assert_eq!(config.search_radius_miles, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Maximum distance the vehicle covers on a full tank, in miles.
    pub max_range_miles: f64,
    /// Fuel economy in miles per gallon.
    pub mpg: f64,
    /// Stations farther than this from the route are ignored, in miles.
    pub search_radius_miles: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_range_miles: 500.0,
            mpg: 10.0,
            search_radius_miles: 20.0,
        }
    }
}

/// Errors returned by [`PlannerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The vehicle range was zero, negative, or non-finite.
    #[error("max range must be a positive finite mileage, got {value}")]
    InvalidRange {
        /// The rejected value.
        value: f64,
    },
    /// The fuel economy was zero, negative, or non-finite.
    #[error("mpg must be positive and finite, got {value}")]
    InvalidMpg {
        /// The rejected value.
        value: f64,
    },
    /// The search radius was zero, negative, or non-finite.
    #[error("search radius must be a positive finite mileage, got {value}")]
    InvalidSearchRadius {
        /// The rejected value.
        value: f64,
    },
}

impl PlannerConfig {
    /// Checks that every parameter is positive and finite.
    ///
    /// # Errors
    /// Returns the first offending parameter as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive_finite(self.max_range_miles) {
            return Err(ConfigError::InvalidRange {
                value: self.max_range_miles,
            });
        }
        if !positive_finite(self.mpg) {
            return Err(ConfigError::InvalidMpg { value: self.mpg });
        }
        if !positive_finite(self.search_radius_miles) {
            return Err(ConfigError::InvalidSearchRadius {
                value: self.search_radius_miles,
            });
        }
        Ok(())
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_configuration_is_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-500.0)]
    #[case(f64::NAN)]
    fn rejects_invalid_range(#[case] value: f64) {
        let config = PlannerConfig {
            max_range_miles: value,
            ..PlannerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[rstest]
    fn rejects_zero_mpg() {
        let config = PlannerConfig {
            mpg: 0.0,
            ..PlannerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMpg { .. })));
    }

    #[rstest]
    fn rejects_negative_search_radius() {
        let config = PlannerConfig {
            search_radius_miles: -1.0,
            ..PlannerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSearchRadius { .. })
        ));
    }
}
