pub mod config_io;
pub mod map_io;

pub use config_io::{load_config, CONFIG_PATH};
pub use map_io::{load_map_asset, AssetIoError, RonMapDir};
