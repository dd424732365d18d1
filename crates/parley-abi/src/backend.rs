use serde::{Deserialize, Serialize};

use crate::sampling::{CompletionRequest, CompletionResponse};

/// Which side of the conversation a turn belongs to.
///
/// Turns store this identifier, not a name. The display name is looked up on
/// the owning context when the prompt is rendered, so renaming a role also
/// renames every turn already in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleId {
    Human,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: RoleId,
    pub text: String,
}

impl Turn {
    #[inline]
    pub fn human<S: Into<String>>(s: S) -> Self {
        Self {
            role: RoleId::Human,
            text: s.into(),
        }
    }
    #[inline]
    pub fn ai<S: Into<String>>(s: S) -> Self {
        Self {
            role: RoleId::Ai,
            text: s.into(),
        }
    }
}

/// Backend-agnostic interface for remote completion APIs.
///
/// Implementations own transport, auth and timeouts; `request.timeout` is the
/// caller's deadline for the whole call.
pub trait CompletionProvider {
    fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse>;
}

impl<P: CompletionProvider + ?Sized> CompletionProvider for &P {
    fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        (**self).complete(request)
    }
}

impl<P: CompletionProvider + ?Sized> CompletionProvider for Box<P> {
    fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        (**self).complete(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serializes_role_by_id() {
        let json = serde_json::to_string(&Turn::ai("hello")).unwrap();
        assert_eq!(json, r#"{"role":"Ai","text":"hello"}"#);

        let back: Turn = serde_json::from_str(r#"{"role":"Human","text":"hi"}"#).unwrap();
        assert_eq!(back, Turn::human("hi"));
    }
}
