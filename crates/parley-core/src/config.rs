//! Construction-time configuration for contexts and sessions.
//!
//! Both structs deserialize from JSON with every field optional, so a config
//! file only has to name what it overrides.

use crate::errors::{ChatError, Result};
use serde::Deserialize;
use serde_json as json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MAX_TURNS: usize = 10;
pub const DEFAULT_MODEL: &str = "text-davinci-003";
pub const DEFAULT_MAX_QUESTION_LEN: usize = 2048;
pub const DEFAULT_MAX_TEXT_LEN: usize = 4097;
pub const DEFAULT_MAX_ANSWER_LEN: usize = 2048;

/// What to do when `ContextConfig::history` cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreloadPolicy {
    /// Start with an empty history and log a warning.
    #[default]
    Ignore,
    /// Fail `ChatContext::from_config`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Ceiling on stored exchanges (question + answer pairs). Must be > 0.
    pub max_turns: usize,
    /// Evict the oldest turns instead of rejecting once the ceiling is hit.
    pub maintain_turns: bool,
    /// History file to preload.
    pub history: Option<PathBuf>,
    pub preload: PreloadPolicy,
    /// `None` keeps the built-in background sentence.
    pub background: Option<String>,
    /// `None` keeps the built-in greeting preset.
    pub preset: Option<String>,
    pub ai_role: Option<String>,
    pub human_role: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            maintain_turns: false,
            history: None,
            preload: PreloadPolicy::Ignore,
            background: None,
            preset: None,
            ai_role: None,
            human_role: None,
        }
    }
}

impl ContextConfig {
    pub fn with_max_turns(mut self, n: usize) -> Self {
        self.max_turns = n;
        self
    }

    pub fn with_maintain_turns(mut self, maintain: bool) -> Self {
        self.maintain_turns = maintain;
        self
    }

    pub fn with_history<P: Into<PathBuf>>(mut self, path: P, policy: PreloadPolicy) -> Self {
        self.history = Some(path.into());
        self.preload = policy;
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let buf = fs::read(path)?;
        Ok(json::from_slice(&buf)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            return Err(ChatError::Config("max_turns must be greater than 0".into()));
        }
        for (field, name) in [("ai_role", &self.ai_role), ("human_role", &self.human_role)] {
            if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(ChatError::Config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Limits and identity for one completion session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: String,
    /// Forwarded to the provider as the end-user identifier.
    pub user_id: String,
    /// Byte cap on a question (after the trailing period is added).
    pub max_question_len: usize,
    /// Overall prompt + answer budget of the model.
    pub max_text_len: usize,
    /// Reserved for the answer; also sent as `max_tokens`.
    pub max_answer_len: usize,
    /// Deadline handed to the provider for each call.
    pub timeout: Option<Duration>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            user_id: String::new(),
            max_question_len: DEFAULT_MAX_QUESTION_LEN,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            max_answer_len: DEFAULT_MAX_ANSWER_LEN,
            timeout: None,
        }
    }
}

impl ChatConfig {
    pub fn new<S: Into<String>>(user_id: S) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let buf = fs::read(path)?;
        Ok(json::from_slice(&buf)?)
    }

    /// Bytes left for the rendered prompt once the answer is reserved.
    #[inline]
    pub fn prompt_budget(&self) -> usize {
        self.max_text_len.saturating_sub(self.max_answer_len)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_question_len == 0 {
            return Err(ChatError::Config(
                "max_question_len must be greater than 0".into(),
            ));
        }
        if self.max_answer_len >= self.max_text_len {
            return Err(ChatError::Config(format!(
                "max_answer_len ({}) must be below max_text_len ({})",
                self.max_answer_len, self.max_text_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ContextConfig =
            json::from_str(r#"{"max_turns": 3, "preload": "strict"}"#).unwrap();
        assert_eq!(cfg.max_turns, 3);
        assert_eq!(cfg.preload, PreloadPolicy::Strict);
        assert!(!cfg.maintain_turns);
        assert!(cfg.history.is_none());

        let chat: ChatConfig = json::from_str(r#"{"user_id": "user1"}"#).unwrap();
        assert_eq!(chat.model, DEFAULT_MODEL);
        assert_eq!(chat.prompt_budget(), 2049);
    }

    #[test]
    fn zero_max_turns_is_rejected() {
        let err = ContextConfig::default().with_max_turns(0).validate();
        assert!(matches!(err, Err(ChatError::Config(_))));
    }

    #[test]
    fn blank_role_name_is_rejected() {
        let cfg = ContextConfig {
            human_role: Some("  ".into()),
            ..ContextConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn answer_budget_must_fit_inside_text_budget() {
        let cfg = ChatConfig {
            max_text_len: 100,
            max_answer_len: 100,
            ..ChatConfig::new("u")
        };
        assert!(matches!(cfg.validate(), Err(ChatError::Config(_))));
        assert!(ChatConfig::new("u").validate().is_ok());
    }

    #[test]
    fn reads_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        fs::write(&path, r#"{"maintain_turns": true, "ai_role": "Bot"}"#).unwrap();

        let cfg = ContextConfig::from_json_file(&path).unwrap();
        assert!(cfg.maintain_turns);
        assert_eq!(cfg.ai_role.as_deref(), Some("Bot"));

        let chat_path = dir.path().join("chat.json");
        fs::write(&chat_path, r#"{"user_id": "user1", "max_question_len": 512}"#).unwrap();
        let chat = ChatConfig::from_json_file(&chat_path).unwrap();
        assert_eq!(chat.user_id, "user1");
        assert_eq!(chat.max_question_len, 512);
        assert_eq!(chat.max_text_len, DEFAULT_MAX_TEXT_LEN);
        assert!(chat.timeout.is_none());
    }
}
