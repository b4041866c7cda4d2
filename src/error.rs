use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisibilityError {
    #[error("no GitHub token provided; set GITHUB_TOKEN or pass --token")]
    MissingToken,

    #[error("preset not found: {id} (looked for {path})")]
    PresetNotFound { id: String, path: String },

    #[error("invalid preset {id}: {reason}")]
    InvalidPreset { id: String, reason: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("GitHub API returned {status} for {url}")]
    Api { status: u16, url: String },

    #[error("llm request failed: {0}")]
    Llm(String),

    #[error("http error: {0}")]
    Http(#[from] ureq::Error),

    #[error("history store error: {0}")]
    History(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VisibilityError>;
