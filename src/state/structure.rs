//! Blind structure value types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stakes for a single level of the tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlindLevel {
    pub small_blind: u64,
    pub big_blind: u64,
    #[serde(default)]
    pub ante: u64,
}

impl BlindLevel {
    /// Create a blind level without an ante
    pub const fn new(small_blind: u64, big_blind: u64) -> Self {
        Self {
            small_blind,
            big_blind,
            ante: 0,
        }
    }

    /// Create a blind level with an ante
    pub const fn with_ante(small_blind: u64, big_blind: u64, ante: u64) -> Self {
        Self {
            small_blind,
            big_blind,
            ante,
        }
    }

    /// Check `big_blind >= small_blind > 0`
    pub fn is_valid(&self) -> bool {
        self.small_blind > 0 && self.big_blind >= self.small_blind
    }
}

/// When and for how long the tournament breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakConfig {
    pub enabled: bool,
    /// Number of levels played between breaks
    pub frequency: u32,
    /// Break length in seconds
    pub duration: u32,
}

impl BreakConfig {
    pub const fn new(frequency: u32, duration: u32) -> Self {
        Self {
            enabled: true,
            frequency,
            duration,
        }
    }

    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            frequency: 4,
            duration: 600,
        }
    }
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self::new(4, 600)
    }
}

/// Rejected structure payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("structure must contain at least one blind level")]
    NoLevels,
    #[error("level {level}: small blind {small_blind} and big blind {big_blind} must satisfy big >= small > 0")]
    InvalidBlinds {
        level: usize,
        small_blind: u64,
        big_blind: u64,
    },
    #[error("level duration must be greater than zero")]
    ZeroLevelDuration,
    #[error("break frequency must be at least 1")]
    ZeroBreakFrequency,
    #[error("break duration must be greater than zero")]
    ZeroBreakDuration,
}

/// Validate an ordered list of blind levels
pub fn validate_levels(levels: &[BlindLevel]) -> Result<(), StructureError> {
    if levels.is_empty() {
        return Err(StructureError::NoLevels);
    }
    match levels.iter().position(|level| !level.is_valid()) {
        Some(index) => Err(StructureError::InvalidBlinds {
            level: index + 1,
            small_blind: levels[index].small_blind,
            big_blind: levels[index].big_blind,
        }),
        None => Ok(()),
    }
}

/// Validate break settings
pub fn validate_break_config(config: &BreakConfig) -> Result<(), StructureError> {
    if config.frequency == 0 {
        return Err(StructureError::ZeroBreakFrequency);
    }
    if config.duration == 0 {
        return Err(StructureError::ZeroBreakDuration);
    }
    Ok(())
}

/// Validate a level duration in seconds
pub fn validate_level_duration(duration: u32) -> Result<(), StructureError> {
    if duration == 0 {
        Err(StructureError::ZeroLevelDuration)
    } else {
        Ok(())
    }
}

/// A complete tournament structure, as loaded into the clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentStructure {
    pub blind_levels: Vec<BlindLevel>,
    pub break_config: BreakConfig,
    /// Seconds per level
    pub level_duration: u32,
}

impl TournamentStructure {
    /// Standard deep-stack structure: 15 minute levels, a 10 minute break every 4 levels
    pub fn standard() -> Self {
        Self {
            blind_levels: vec![
                BlindLevel::new(25, 50),
                BlindLevel::new(50, 100),
                BlindLevel::new(75, 150),
                BlindLevel::new(100, 200),
                BlindLevel::with_ante(100, 200, 25),
                BlindLevel::with_ante(150, 300, 25),
                BlindLevel::with_ante(200, 400, 50),
                BlindLevel::with_ante(250, 500, 50),
                BlindLevel::with_ante(300, 600, 75),
                BlindLevel::with_ante(400, 800, 100),
                BlindLevel::with_ante(500, 1000, 100),
                BlindLevel::with_ante(600, 1200, 200),
                BlindLevel::with_ante(800, 1600, 200),
                BlindLevel::with_ante(1000, 2000, 300),
                BlindLevel::with_ante(2000, 4000, 500),
            ],
            break_config: BreakConfig::default(),
            level_duration: 15 * 60,
        }
    }

    /// Check every field a clock relies on
    pub fn validate(&self) -> Result<(), StructureError> {
        validate_levels(&self.blind_levels)?;
        validate_level_duration(self.level_duration)?;
        validate_break_config(&self.break_config)
    }
}

impl Default for TournamentStructure {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_structure_is_valid() {
        let structure = TournamentStructure::standard();
        assert_eq!(structure.blind_levels.len(), 15);
        assert_eq!(structure.validate(), Ok(()));
    }

    #[test]
    fn rejects_big_blind_below_small_blind() {
        let levels = vec![BlindLevel::new(25, 50), BlindLevel::new(100, 50)];
        assert_eq!(
            validate_levels(&levels),
            Err(StructureError::InvalidBlinds {
                level: 2,
                small_blind: 100,
                big_blind: 50,
            })
        );
    }

    #[test]
    fn rejects_zero_small_blind_and_empty_list() {
        assert!(validate_levels(&[BlindLevel::new(0, 0)]).is_err());
        assert_eq!(validate_levels(&[]), Err(StructureError::NoLevels));
    }

    #[test]
    fn rejects_degenerate_durations() {
        let mut structure = TournamentStructure::standard();
        structure.level_duration = 0;
        assert_eq!(structure.validate(), Err(StructureError::ZeroLevelDuration));

        let mut structure = TournamentStructure::standard();
        structure.break_config.frequency = 0;
        assert_eq!(structure.validate(), Err(StructureError::ZeroBreakFrequency));
    }

    #[test]
    fn deserializes_camel_case_with_default_ante() {
        let json = r#"{
            "blindLevels": [{"smallBlind": 10, "bigBlind": 20}],
            "breakConfig": {"enabled": false, "frequency": 3, "duration": 300},
            "levelDuration": 600
        }"#;
        let structure: TournamentStructure = serde_json::from_str(json).unwrap();
        assert_eq!(structure.blind_levels, vec![BlindLevel::new(10, 20)]);
        assert!(!structure.break_config.enabled);
        assert_eq!(structure.level_duration, 600);
    }
}
