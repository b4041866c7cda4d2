use crate::error::VisibilityError;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_API_ROOT: &str = "https://api.github.com";
pub const DEFAULT_PRESET: &str = "indie-hacker";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_HISTORY_FILE: &str = ".local/share/gh-visibility/scans.db";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub presets: PresetsConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_root")]
    pub api_root: String,
    #[serde(default)]
    pub community_profile: bool,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            community_profile: false,
        }
    }
}

fn default_api_root() -> String {
    DEFAULT_API_ROOT.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresetsConfig {
    #[serde(default = "default_presets_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_preset")]
    pub default: String,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            dir: default_presets_dir(),
            default: default_preset(),
        }
    }
}

fn default_presets_dir() -> PathBuf {
    PathBuf::from("presets")
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl HistoryConfig {
    /// Configured path, else `$HOME/.local/share/gh-visibility/scans.db`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .map(|home| home.join(DEFAULT_HISTORY_FILE))
        })
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_base: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    400
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), VisibilityError> {
        if self.github.api_root.trim().is_empty() {
            return Err(VisibilityError::ConfigParse(
                "github.api_root cannot be empty".to_string(),
            ));
        }
        if self.presets.default.trim().is_empty() {
            return Err(VisibilityError::ConfigParse(
                "presets.default cannot be empty".to_string(),
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(VisibilityError::ConfigParse(
                "llm.max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(VisibilityError::ConfigParse(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
