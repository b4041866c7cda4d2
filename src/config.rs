use crate::error::{Result, VisibilityError};
use crate::types::config::AppConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "gh-visibility.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".gh-visibility/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/gh-visibility/config.toml";

/// Loads global, project and local layers (in that order, later wins).
/// `explicit` replaces the project file and must exist.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<AppConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<AppConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(VisibilityError::ConfigParse(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            merge_file_if_exists(&mut merged, path)?;
        }
        None => merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?,
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: AppConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| VisibilityError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| VisibilityError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
