use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling knobs forwarded verbatim to the completion API.
/// Providers should pass these through; there is no local sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    /// Number of completions requested; only the first is used.
    pub n: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 1.0,
            n: 1,
            frequency_penalty: 0.0,
            presence_penalty: 0.5,
        }
    }
}

/// One completion call, fully rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    /// Token budget reserved for the answer.
    pub max_tokens: usize,
    pub sampling: SamplingParams,
    /// Caller-supplied end-user identifier.
    pub user: String,
    /// Textual stop sentinels; the model halts before emitting any of these.
    pub stop: Vec<String>,
    /// Deadline for the whole call. `None` means the provider's own default.
    #[serde(default)]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<String>,
}

impl CompletionResponse {
    pub fn single<S: Into<String>>(text: S) -> Self {
        Self {
            choices: vec![text.into()],
        }
    }

    /// Text of the first choice, if the provider returned any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(String::as_str)
    }
}
