use crate::error::{Result, VisibilityError};
use crate::types::preset::Preset;
use std::path::Path;
use tracing::debug;

/// Presets compiled into the binary, served when the configured directory
/// does not exist.
const BUILTIN_PRESETS: &[(&str, &str)] = &[
    ("indie-hacker", include_str!("../presets/indie-hacker.json")),
    ("open-source-maintainer", include_str!("../presets/open-source-maintainer.json")),
];

/// Reads `<dir>/<id>.json`, or the built-in preset of that id when `dir`
/// does not exist. The requested id always wins over the id inside the
/// document.
pub fn load_preset(dir: &Path, id: &str) -> Result<Preset> {
    let path = dir.join(format!("{id}.json"));
    let not_found = || VisibilityError::PresetNotFound {
        id: id.to_string(),
        path: path.display().to_string(),
    };
    if !is_plain_id(id) {
        return Err(not_found());
    }
    if !dir.is_dir() {
        let (_, content) = BUILTIN_PRESETS
            .iter()
            .find(|(builtin, _)| *builtin == id)
            .ok_or_else(not_found)?;
        debug!(preset = id, "loaded built-in preset");
        return preset_from_value(id, serde_json::from_str(content)?);
    }
    if !path.is_file() {
        return Err(not_found());
    }

    let content = std::fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    debug!(preset = id, path = %path.display(), "loaded preset");
    preset_from_value(id, value)
}

/// Builds a preset from an inline JSON document, e.g. one posted to the
/// HTTP service.
pub fn preset_from_value(id: &str, value: serde_json::Value) -> Result<Preset> {
    let mut preset: Preset =
        serde_json::from_value(value).map_err(|err| VisibilityError::InvalidPreset {
            id: id.to_string(),
            reason: err.to_string(),
        })?;
    if preset.id != id {
        preset.id = id.to_string();
    }
    preset.validate()?;
    Ok(preset)
}

/// Sorted preset ids found in `dir`. A missing directory lists the
/// built-in presets.
pub fn list_presets(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(BUILTIN_PRESETS.iter().map(|(id, _)| id.to_string()).collect());
    }

    let mut ids = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            ids.push(stem.to_string());
        }
    }
    ids.sort();
    Ok(ids)
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != ".."
}
