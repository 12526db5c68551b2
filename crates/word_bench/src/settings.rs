//! Benchmark settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("batches ({batches}) cannot exceed rounds ({rounds})")]
    TooManyBatches { batches: u32, rounds: u32 },
}

/// Micro-benchmark parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    /// Timed set+get iterations per path
    pub rounds: u32,
    /// Payload bytes; anything past 64 is truncated on the Word path
    pub size: u32,
    /// Untimed iterations before measuring
    pub warmup: u32,
    /// Number of timing windows the rounds are split into
    pub batches: u32,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            rounds: 1_000_000,
            size: 64,
            warmup: 10_000,
            batches: 100,
        }
    }
}

impl BenchSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rounds == 0 {
            return Err(SettingsError::Zero { field: "rounds" });
        }
        if self.batches == 0 {
            return Err(SettingsError::Zero { field: "batches" });
        }
        if self.batches > self.rounds {
            return Err(SettingsError::TooManyBatches {
                batches: self.batches,
                rounds: self.rounds,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = BenchSettings::default();
        assert_eq!(settings.size, 64);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: BenchSettings = serde_json::from_str(r#"{"rounds": 500}"#).unwrap();
        assert_eq!(settings.rounds, 500);
        assert_eq!(settings.warmup, 10_000);
        assert_eq!(settings.batches, 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = BenchSettings { rounds: 0, ..Default::default() };
        assert!(matches!(zero.validate(), Err(SettingsError::Zero { field: "rounds" })));

        let crowded = BenchSettings { rounds: 10, batches: 20, ..Default::default() };
        assert!(matches!(
            crowded.validate(),
            Err(SettingsError::TooManyBatches { batches: 20, rounds: 10 })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BenchSettings::load(Path::new("/no/such/bench.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
