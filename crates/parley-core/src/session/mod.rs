//! Completion driver: one blocking provider call per question, around a `ChatContext`.

use crate::config::ChatConfig;
use crate::context::ChatContext;
use crate::errors::{ChatError, Result};
use crate::format::format_answer;
use parley_abi::CompletionProvider;

// Child modules can reach the private fields below.
mod plan;

/// Session = {completion provider} + {limits/identity} + {rolling context}.
///
/// History only changes after the provider answers; any error leaves the
/// context exactly as it was before `process` was called.
pub struct ChatSession<P: CompletionProvider> {
    provider: P,
    config: ChatConfig,
    context: ChatContext,
}

impl<P: CompletionProvider> ChatSession<P> {
    /// Default limits and a fresh default context.
    pub fn new<S: Into<String>>(provider: P, user_id: S) -> Self {
        Self {
            provider,
            config: ChatConfig::new(user_id),
            context: ChatContext::new(),
        }
    }

    pub fn with_config(provider: P, config: ChatConfig, context: ChatContext) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            context,
        })
    }

    #[inline]
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    #[inline]
    pub fn context(&self) -> &ChatContext {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut ChatContext {
        &mut self.context
    }

    /// Swap in another context (e.g. a different conversation), returning the old one.
    pub fn replace_context(&mut self, context: ChatContext) -> ChatContext {
        std::mem::replace(&mut self.context, context)
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Ask `question` with the full conversation as context and record the exchange.
    pub fn process(&mut self, question: &str) -> Result<String> {
        let plan = self.plan(question)?;
        let request = plan.request(&self.config);

        let response = self
            .provider
            .complete(&request)
            .map_err(ChatError::Provider)?;
        let raw = response
            .first_text()
            .ok_or_else(|| ChatError::Provider(anyhow::anyhow!("provider returned no choices")))?;
        let answer = format_answer(raw);

        if plan.evict {
            self.context.evict_oldest();
        }
        self.context.append_exchange(plan.question, answer.clone());
        Ok(answer)
    }

    /// The prompt the next `process(question)` would send. No side effects.
    pub fn render_prompt(&self, question: &str) -> Result<String> {
        Ok(self.plan(question)?.prompt.text)
    }
}
