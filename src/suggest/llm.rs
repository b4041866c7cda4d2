//! Optional LLM pass that adds advisory notes on top of the rule-based
//! suggestions. Any failure here degrades to "no extra suggestions".

use crate::error::{Result, VisibilityError};
use crate::outcome::Outcome;
use crate::types::config::LlmConfig;
use crate::types::report::Suggestion;
use crate::types::repo::RepoSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const API_KEY_ENV: &str = "FRONTIER_LLM_API_KEY";
pub const API_KEY_ENV_ALT: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV: &str = "FRONTIER_LLM_API_BASE";
pub const API_BASE_ENV_ALT: &str = "OPENAI_API_BASE";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const MAX_CONTEXT_SUGGESTIONS: usize = 5;
const MAX_LLM_SUGGESTIONS: usize = 5;
const MIN_LINE_CHARS: usize = 10;
const DESCRIPTION_PROMPT_CHARS: usize = 200;

/// Anything that can turn a single user prompt into completion text.
pub trait CompletionClient {
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI-compatible `/chat/completions` client over a blocking ureq agent.
pub struct ChatCompletionClient {
    agent: ureq::Agent,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ChatCompletionClient {
    pub fn from_config(config: &LlmConfig, explicit_key: Option<&str>) -> Result<Self> {
        let lookup = |name: &str| std::env::var(name).ok();
        let api_key = resolve_api_key(explicit_key, lookup).ok_or_else(|| {
            VisibilityError::Llm(format!(
                "no API key; set {API_KEY_ENV} or {API_KEY_ENV_ALT}"
            ))
        })?;
        let base = resolve_api_base(config.api_base.as_deref(), lookup);

        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .new_agent();

        Ok(Self {
            agent,
            url: format!("{base}/chat/completions"),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

impl CompletionClient for ChatCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .agent
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)
            .map_err(|err| VisibilityError::Llm(err.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(VisibilityError::Llm(format!(
                "completion endpoint returned {status}"
            )));
        }

        let parsed: ChatResponse = response
            .into_body()
            .read_json()
            .map_err(|err| VisibilityError::Llm(err.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| VisibilityError::Llm("response had no choices".to_string()))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Explicit key first, then the two environment variables. Blank values
/// count as missing.
pub fn resolve_api_key<F>(explicit: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()))
        .or_else(|| lookup(API_KEY_ENV_ALT).filter(|key| !key.trim().is_empty()))
        .map(|key| key.trim().to_string())
}

pub fn resolve_api_base<F>(configured: Option<&str>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .map(str::to_string)
        .filter(|base| !base.is_empty())
        .or_else(|| lookup(API_BASE_ENV).filter(|base| !base.is_empty()))
        .or_else(|| lookup(API_BASE_ENV_ALT).filter(|base| !base.is_empty()))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub fn build_prompt(repo: &RepoSummary, current: &[Suggestion], preset_name: &str) -> String {
    let name = if repo.name.is_empty() {
        repo.full_name.as_str()
    } else {
        repo.name.as_str()
    };
    let description: String = repo
        .description
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(DESCRIPTION_PROMPT_CHARS)
        .collect();
    let topics = format!("[{}]", repo.topics.join(", "));
    let current_text = if current.is_empty() {
        "None.".to_string()
    } else {
        current
            .iter()
            .take(MAX_CONTEXT_SUGGESTIONS)
            .map(|suggestion| suggestion.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are helping improve a GitHub repository's presentation. Repo: \"{name}\". \
Description: \"{description}\". Topics: {topics}. Preset: {preset_name}.\n\n\
Current suggestions from the tool:\n{current_text}\n\n\
In 1-3 short bullet points, suggest concrete improvements (e.g. a better repo description \
in under 160 chars, or a README section to add). Be brief. Do not repeat the existing \
suggestions. Each line should be one suggestion."
    )
}

pub fn parse_completion(content: &str) -> Vec<Suggestion> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_bullet)
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .take(MAX_LLM_SUGGESTIONS)
        .map(Suggestion::llm)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    match line.strip_prefix('-').or_else(|| line.strip_prefix('*')) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// Asks the model for extra notes on one repository. Never fails: errors
/// come back as a degraded, empty list.
pub fn augment(
    client: &dyn CompletionClient,
    repo: &RepoSummary,
    current: &[Suggestion],
    preset_name: &str,
) -> Outcome<Vec<Suggestion>> {
    let prompt = build_prompt(repo, current, preset_name);
    let context = format!("llm suggestions for {}", repo.full_name);
    let result = client
        .complete(&prompt)
        .map(|content| parse_completion(&content));
    Outcome::fail_open(&context, result, Vec::new())
}
