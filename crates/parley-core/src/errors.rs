use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("question is {len} bytes, limit is {max}")]
    QuestionTooLong { len: usize, max: usize },

    #[error("conversation reached {max} exchanges and eviction is disabled")]
    TooManyTurns { max: usize },

    #[error("prompt is {len} bytes, budget is {budget}")]
    PromptTooLong { len: usize, budget: usize },

    /// Whatever the completion provider returned, untouched.
    #[error(transparent)]
    Provider(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unsupported history schema {0}")]
    Schema(u32),

    #[error("invalid config: {0}")]
    Config(String),
}

impl ChatError {
    /// True for failures raised while saving or loading history.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            ChatError::Io(_) | ChatError::Serde(_) | ChatError::Schema(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
