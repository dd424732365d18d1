use super::ChatSession;
use crate::config::ChatConfig;
use crate::errors::{ChatError, Result};
use crate::format::{FormattedPrompt, render_prompt};
use parley_abi::{CompletionProvider, CompletionRequest, SamplingParams};

/// Everything `process` decided before calling the provider.
pub(super) struct Plan {
    /// Question with the trailing period.
    pub question: String,
    /// Drop the oldest turn once the provider succeeds.
    pub evict: bool,
    pub prompt: FormattedPrompt,
}

impl Plan {
    pub(super) fn request(&self, config: &ChatConfig) -> CompletionRequest {
        CompletionRequest {
            model: config.model.clone(),
            prompt: self.prompt.text.clone(),
            max_tokens: config.max_answer_len,
            sampling: SamplingParams::default(),
            user: config.user_id.clone(),
            stop: self.prompt.stop_sequences.clone(),
            timeout: config.timeout,
        }
    }
}

impl<P: CompletionProvider> ChatSession<P> {
    /// Validate, apply the turn ceiling (on paper) and render.
    pub(super) fn plan(&self, question: &str) -> Result<Plan> {
        let question = format!("{question}.");
        if question.len() > self.config.max_question_len {
            return Err(ChatError::QuestionTooLong {
                len: question.len(),
                max: self.config.max_question_len,
            });
        }

        let ctx = &self.context;
        let mut evict = false;
        if ctx.exchange_count() >= ctx.max_turns() {
            if !ctx.maintain_turns() {
                return Err(ChatError::TooManyTurns {
                    max: ctx.max_turns(),
                });
            }
            evict = true;
            tracing::debug!(evict, max_turns = ctx.max_turns(), "turn ceiling reached");
        }

        let kept = &ctx.turns()[usize::from(evict)..];
        let prompt = render_prompt(ctx, kept, &question);
        let budget = self.config.prompt_budget();
        if prompt.len() > budget {
            return Err(ChatError::PromptTooLong {
                len: prompt.len(),
                budget,
            });
        }

        Ok(Plan {
            question,
            evict,
            prompt,
        })
    }
}
