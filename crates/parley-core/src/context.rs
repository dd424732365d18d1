//! Rolling conversation window: background, preset, role names and the turn list.

use crate::config::{ContextConfig, DEFAULT_MAX_TURNS, PreloadPolicy};
use crate::errors::{ChatError, Result};
use crate::store;
use once_cell::sync::Lazy;
use parley_abi::{RoleId, Turn};
use std::path::Path;

pub const DEFAULT_AI_ROLE: &str = "AI";
pub const DEFAULT_HUMAN_ROLE: &str = "Human";

const DEFAULT_CHARACTER: &[&str] = &[
    "helpful", "creative", "clever", "friendly", "lovely", "talkative",
];

pub static DEFAULT_BACKGROUND: Lazy<String> = Lazy::new(|| {
    format!(
        "The following is a conversation with AI assistant. The assistant is {}.",
        DEFAULT_CHARACTER.join(", ")
    )
});

pub static DEFAULT_PRESET: Lazy<String> = Lazy::new(|| {
    format!(
        "\n{DEFAULT_HUMAN_ROLE}: 你好，让我们开始愉快的谈话！\n{DEFAULT_AI_ROLE}: 我是 AI assistant ，请问你有什么问题？"
    )
});

#[inline]
fn line_prefix(name: &str) -> String {
    format!("\n{name}: ")
}

#[derive(Debug, Clone)]
pub struct ChatContext {
    background: String,
    preset: String,
    ai_role: String,
    human_role: String,
    /// `"\n<Human>: "`, prepended to the new question.
    restart_seq: String,
    /// `"\n<AI>: "`, cues the model to answer.
    start_seq: String,
    turns: Vec<Turn>,
    max_turns: usize,
    maintain_turns: bool,
    dirty: bool,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatContext {
    pub fn new() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.clone(),
            preset: DEFAULT_PRESET.clone(),
            ai_role: DEFAULT_AI_ROLE.to_string(),
            human_role: DEFAULT_HUMAN_ROLE.to_string(),
            restart_seq: line_prefix(DEFAULT_HUMAN_ROLE),
            start_seq: line_prefix(DEFAULT_AI_ROLE),
            turns: Vec::new(),
            max_turns: DEFAULT_MAX_TURNS,
            maintain_turns: false,
            dirty: false,
        }
    }

    /// Build a context from `config`, validating it first.
    ///
    /// A history preload that fails is swallowed under `PreloadPolicy::Ignore`
    /// (empty history, warning logged) and returned under `Strict`.
    pub fn from_config(config: ContextConfig) -> Result<Self> {
        config.validate()?;

        let mut ctx = Self::new();
        ctx.max_turns = config.max_turns;
        ctx.maintain_turns = config.maintain_turns;
        if let Some(bg) = config.background {
            ctx.background = bg;
        }
        if let Some(preset) = config.preset {
            ctx.preset = preset;
        }
        if let Some(name) = config.ai_role {
            ctx.set_ai_role(name);
        }
        if let Some(name) = config.human_role {
            ctx.set_human_role(name);
        }

        if let Some(path) = config.history.as_deref() {
            match (ctx.load(path), config.preload) {
                (Ok(()), _) => {}
                (Err(e), PreloadPolicy::Ignore) => {
                    tracing::warn!(path = %path.display(), error = %e, "history preload failed; starting empty");
                }
                (Err(e), PreloadPolicy::Strict) => return Err(e),
            }
        }
        Ok(ctx)
    }

    // ---- history ----

    /// All stored turns (oldest → newest).
    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Push the human question then the AI answer.
    pub fn append_exchange<Q: Into<String>, A: Into<String>>(&mut self, question: Q, answer: A) {
        self.turns.push(Turn::human(question));
        self.turns.push(Turn::ai(answer));
        self.dirty = true;
        tracing::debug!(turns = self.turns.len(), "exchange appended");
    }

    /// Drop the single oldest turn. Returns false (and changes nothing) when empty.
    pub fn evict_oldest(&mut self) -> bool {
        if self.turns.is_empty() {
            return false;
        }
        self.turns.remove(0);
        self.dirty = true;
        tracing::debug!(turns = self.turns.len(), "evicted oldest turn");
        true
    }

    /// Remove all history.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.dirty = true;
    }

    /// Write history to `path`. The dirty flag is cleared only if the write lands.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        store::save_turns(path, &self.turns)?;
        self.dirty = false;
        tracing::debug!(path = %path.display(), turns = self.turns.len(), "history saved");
        Ok(())
    }

    /// Replace history with the contents of `path`. On error nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let turns = store::load_turns(path)?;
        self.turns = turns;
        self.dirty = true;
        tracing::debug!(path = %path.display(), turns = self.turns.len(), "history loaded");
        Ok(())
    }

    // ---- counters ----

    /// Number of stored turns. Always equal to `history_size()`.
    #[inline]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn history_size(&self) -> usize {
        self.turns.len()
    }

    /// Stored exchanges, counting a half-evicted pair as one.
    #[inline]
    pub fn exchange_count(&self) -> usize {
        self.turns.len().div_ceil(2)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ---- roles ----

    pub fn set_human_role<S: Into<String>>(&mut self, name: S) {
        self.human_role = name.into();
        self.restart_seq = line_prefix(&self.human_role);
    }

    pub fn set_ai_role<S: Into<String>>(&mut self, name: S) {
        self.ai_role = name.into();
        self.start_seq = line_prefix(&self.ai_role);
    }

    #[inline]
    pub fn human_role(&self) -> &str {
        &self.human_role
    }

    #[inline]
    pub fn ai_role(&self) -> &str {
        &self.ai_role
    }

    /// Current display name for `role`.
    pub fn role_name(&self, role: RoleId) -> &str {
        match role {
            RoleId::Human => &self.human_role,
            RoleId::Ai => &self.ai_role,
        }
    }

    #[inline]
    pub fn restart_sequence(&self) -> &str {
        &self.restart_seq
    }

    #[inline]
    pub fn start_sequence(&self) -> &str {
        &self.start_seq
    }

    /// `"<AI>:"` and `"<Human>:"`, so the model stops before writing the next label.
    pub fn stop_sequences(&self) -> Vec<String> {
        vec![format!("{}:", self.ai_role), format!("{}:", self.human_role)]
    }

    // ---- plain settings ----

    /// Ceiling on stored exchanges. Zero is rejected, as in `ContextConfig::validate`.
    pub fn set_max_turns(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(ChatError::Config("max_turns must be greater than 0".into()));
        }
        self.max_turns = n;
        Ok(())
    }

    #[inline]
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn set_maintain_turns(&mut self, maintain: bool) {
        self.maintain_turns = maintain;
    }

    #[inline]
    pub fn maintain_turns(&self) -> bool {
        self.maintain_turns
    }

    pub fn set_background<S: Into<String>>(&mut self, text: S) {
        self.background = text.into();
    }

    #[inline]
    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn set_preset<S: Into<String>>(&mut self, text: S) {
        self.preset = text.into();
    }

    #[inline]
    pub fn preset(&self) -> &str {
        &self.preset
    }
}
