use std::fs;
use std::path::{Path, PathBuf};

use pm_tilemap::{MapAsset, MapId, MapLoadError, MapSource, TileMap};

/// Failure reading a RON asset from disk.
#[derive(Debug)]
pub enum AssetIoError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    /// The file parsed but holds values the game cannot run with.
    Invalid { path: PathBuf, reason: String },
}

impl AssetIoError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}

impl std::fmt::Display for AssetIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
            Self::Parse { path, source } => write!(f, "{}:{}", path.display(), source),
            Self::Invalid { path, reason } => write!(f, "{}: {}", path.display(), reason),
        }
    }
}

impl std::error::Error for AssetIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read and parse one RON file.
pub(crate) fn read_ron<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AssetIoError> {
    let contents = fs::read_to_string(path).map_err(|source| AssetIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| AssetIoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a map asset from a RON file.
pub fn load_map_asset(path: &Path) -> Result<MapAsset, AssetIoError> {
    read_ron(path)
}

/// Map ids are plain file names; anything that could leave the maps
/// directory is refused.
fn is_plain_file_name(id: &MapId) -> bool {
    let name = id.as_str();
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

/// Map assets stored as RON files in one directory, one file per map id.
#[derive(Debug, Clone)]
pub struct RonMapDir {
    dir: PathBuf,
}

impl RonMapDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the full path for a map file.
    pub fn map_path(&self, id: &MapId) -> PathBuf {
        self.dir.join(id.as_str())
    }
}

impl MapSource for RonMapDir {
    fn load(&self, id: &MapId) -> Result<TileMap, MapLoadError> {
        if !is_plain_file_name(id) {
            return Err(MapLoadError::Invalid {
                map: id.clone(),
                reason: "map ids must be plain file names".to_string(),
            });
        }

        let path = self.map_path(id);
        if !path.is_file() {
            return Err(MapLoadError::NotFound(id.clone()));
        }

        let asset = load_map_asset(&path).map_err(|err| MapLoadError::Backend {
            map: id.clone(),
            source: Box::new(err),
        })?;
        asset.into_map(id.clone())
    }
}
