//! Match Ruleset
//!
//! Mode, limits and global multipliers. Settings can be loaded from JSON;
//! missing fields take their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a match is won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum MatchMode {
    /// Last combatant with stocks wins
    #[default]
    Stock = 0,
    /// Match ends when the clock runs out
    Time = 1,
    /// Single stock, knocked out when damage reaches the stamina amount
    Stamina = 2,
}

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// JSON could not be parsed
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field is out of range
    #[error("invalid setting `{field}`: {reason}")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },
}

/// Ruleset for a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Win condition
    pub mode: MatchMode,
    /// Time-mode limit (seconds)
    pub time_limit: f32,
    /// Starting stocks (Stock and Time modes)
    pub stock_count: u32,
    /// Stamina-mode hit points
    pub stamina_amount: f32,
    /// Items toggle (no items are simulated)
    pub items_enabled: bool,
    /// Global damage multiplier
    pub damage_multiplier: f32,
    /// Global knockback multiplier
    pub knockback_multiplier: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            mode: MatchMode::Stock,
            time_limit: 180.0,
            stock_count: 3,
            stamina_amount: 100.0,
            items_enabled: true,
            damage_multiplier: 1.0,
            knockback_multiplier: 1.0,
        }
    }
}

impl MatchSettings {
    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: MatchSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.stock_count == 0 {
            return Err(SettingsError::OutOfRange {
                field: "stock_count",
                reason: "must be at least 1",
            });
        }
        if !(self.time_limit.is_finite() && self.time_limit > 0.0) {
            return Err(SettingsError::OutOfRange {
                field: "time_limit",
                reason: "must be a positive number of seconds",
            });
        }
        if !(self.stamina_amount.is_finite() && self.stamina_amount > 0.0) {
            return Err(SettingsError::OutOfRange {
                field: "stamina_amount",
                reason: "must be positive",
            });
        }
        if !(self.damage_multiplier.is_finite() && self.damage_multiplier >= 0.0) {
            return Err(SettingsError::OutOfRange {
                field: "damage_multiplier",
                reason: "must be non-negative",
            });
        }
        if !(self.knockback_multiplier.is_finite() && self.knockback_multiplier >= 0.0) {
            return Err(SettingsError::OutOfRange {
                field: "knockback_multiplier",
                reason: "must be non-negative",
            });
        }
        Ok(())
    }

    /// Stocks each combatant starts with under this ruleset.
    pub fn starting_stocks(&self) -> u32 {
        match self.mode {
            MatchMode::Stamina => 1,
            MatchMode::Stock | MatchMode::Time => self.stock_count,
        }
    }

    /// Stamina hit points, only in stamina mode.
    pub fn stamina(&self) -> Option<f32> {
        (self.mode == MatchMode::Stamina).then_some(self.stamina_amount)
    }
}
