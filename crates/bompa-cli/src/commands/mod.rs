pub mod check;
pub mod defaults;
pub mod run;

use std::path::Path;

use bompa_core::GameConfig;

/// Load the config at `path`, or the built-in defaults when no path is given.
fn load_config(path: Option<&Path>) -> Result<GameConfig, String> {
    match path {
        Some(path) => GameConfig::from_path(path).map_err(|e| e.to_string()),
        None => Ok(GameConfig::default()),
    }
}
