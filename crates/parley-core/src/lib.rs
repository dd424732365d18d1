//! parley-core
//!
//! Conversation context for prompt-style completion APIs.
//! - Keeps the rolling list of turns and the turn ceiling (`context`).
//! - Renders the whole dialog into one prompt with stop sequences (`format`).
//! - Drives a single blocking completion call per question (`session`).
//! - Saves/loads history as JSON with atomic replace (`store`).
//!
//! The transport lives behind `parley_abi::CompletionProvider`.

pub mod config;
pub mod context;
pub mod errors;
pub mod format;
pub mod session;
pub mod store;

pub use config::{ChatConfig, ContextConfig, PreloadPolicy};
pub use context::ChatContext;
pub use errors::{ChatError, Result};
pub use format::{FormattedPrompt, format_answer, render_prompt};
pub use session::ChatSession;

pub use parley_abi::{
    CompletionProvider, CompletionRequest, CompletionResponse, RoleId, SamplingParams, Turn,
};
