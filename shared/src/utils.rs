use std::fs;
use std::path::Path;

use bevy_log::info;
use serde::de::DeserializeOwned;

/// Reads a ron file into `T`, or returns `T::default()` when the file does not exist.
///
/// A file that exists but cannot be read or parsed is an error.
pub fn load_ron_or_default<T>(path: &Path) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        info!("{} not found, using defaults", path.display());
        return Ok(T::default());
    }

    let contents: String = fs::read_to_string(path)?;
    let value: T = ron::de::from_str(&contents)?;

    info!("Loaded {}", path.display());

    Ok(value)
}
