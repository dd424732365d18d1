//! Prompt assembly and answer cleanup.

mod answer;
mod prompt;

pub use answer::format_answer;
pub use prompt::render_prompt;

/// Finished prompt plus the stop sentinels the provider should enforce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPrompt {
    pub text: String,
    pub stop_sequences: Vec<String>,
}

impl FormattedPrompt {
    /// Prompt size in bytes, the unit the length guards use.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
