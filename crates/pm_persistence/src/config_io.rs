use std::path::Path;

use bevy::log::info;
use pm_world::GameConfig;

use crate::map_io::{read_ron, AssetIoError};

/// Default location of the optional config file.
pub const CONFIG_PATH: &str = "assets/config.ron";

/// Load the game config, falling back to defaults when the file is absent.
/// A file that exists but does not parse or validate is an error.
pub fn load_config(path: &Path) -> Result<GameConfig, AssetIoError> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(GameConfig::default());
    }

    let config: GameConfig = read_ron(path)?;
    validate(&config).map_err(|reason| AssetIoError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(config)
}

fn validate(config: &GameConfig) -> Result<(), String> {
    // Also rejects NaN.
    if !(config.tick_rate_hz > 0.0 && config.tick_rate_hz.is_finite()) {
        return Err(format!("tick_rate_hz must be positive, got {}", config.tick_rate_hz));
    }
    if !(config.player_speed > 0.0 && config.player_speed.is_finite()) {
        return Err(format!("player_speed must be positive, got {}", config.player_speed));
    }
    Ok(())
}
