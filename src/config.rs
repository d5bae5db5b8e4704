use crate::error::ProcessError;
use crate::global_variables::{BASE_GREEN_TIME, MAX_GREEN_TIME, MAX_LANES, YELLOW_TIME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable signal timing bounds, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalConfig {
    pub base_green_time: u32,
    pub max_green_time: u32,
    pub yellow_time: u32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            base_green_time: BASE_GREEN_TIME,
            max_green_time: MAX_GREEN_TIME,
            yellow_time: YELLOW_TIME,
        }
    }
}

impl SignalConfig {
    /// Loads a config from a JSON file. Missing fields fall back to the defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ProcessError> {
        let raw = fs::read_to_string(path)?;
        let config: SignalConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.base_green_time == 0 {
            return Err(ProcessError::InvalidConfig(
                "baseGreenTime must be positive".to_string(),
            ));
        }
        if self.base_green_time > self.max_green_time {
            return Err(ProcessError::InvalidConfig(format!(
                "baseGreenTime ({}) exceeds maxGreenTime ({})",
                self.base_green_time, self.max_green_time
            )));
        }
        // Longest possible cycle: every lane at the ceiling plus its yellow.
        let longest_cycle = self
            .max_green_time
            .checked_add(self.yellow_time)
            .and_then(|active| active.checked_mul(MAX_LANES as u32));
        if longest_cycle.is_none() {
            return Err(ProcessError::InvalidConfig(format!(
                "maxGreenTime ({}) plus yellowTime ({}) over {} lanes overflows the cycle time",
                self.max_green_time, self.yellow_time, MAX_LANES
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_constants() {
        let config = SignalConfig::default();
        assert_eq!(config.base_green_time, 20);
        assert_eq!(config.max_green_time, 60);
        assert_eq!(config.yellow_time, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = SignalConfig {
            base_green_time: 70,
            ..SignalConfig::default()
        };
        assert!(matches!(config.validate(), Err(ProcessError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_base_green() {
        let config = SignalConfig {
            base_green_time: 0,
            ..SignalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_cycle_that_cannot_fit() {
        let config = SignalConfig {
            base_green_time: 20,
            max_green_time: 3_000_000_000,
            yellow_time: 3,
        };
        assert!(matches!(config.validate(), Err(ProcessError::InvalidConfig(_))));

        let config = SignalConfig {
            yellow_time: u32::MAX,
            ..SignalConfig::default()
        };
        assert!(config.validate().is_err());

        let largest_fitting = SignalConfig {
            base_green_time: 20,
            max_green_time: u32::MAX / 8 - 3,
            yellow_time: 3,
        };
        assert!(largest_fitting.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "signal_config_{}_{}.json",
            std::process::id(),
            "partial"
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"maxGreenTime": 90}}"#).unwrap();
        drop(file);

        let config = SignalConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.max_green_time, 90);
        assert_eq!(config.base_green_time, 20);
        assert_eq!(config.yellow_time, 3);
    }
}
