// @awa-component: CHAT-Relay
//
//! Chat relay — turns one user message into one inference call.
//!
//! Stateless: every call builds a fresh conversation from the configured
//! persona and the submitted message. Nothing is retained between calls.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::chat::{ChatMessage, ChatRequest, Conversation};
use crate::inference::{InferenceBackend, InferenceError, InferenceRequest};
use crate::persona::Persona;

/// Errors surfaced by [`ChatRelay::reply`].
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Message must not be empty")]
    EmptyMessage,

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Relays chat messages to an injected inference backend.
pub struct ChatRelay {
    backend: Arc<dyn InferenceBackend>,
    model: String,
    persona: Option<Persona>,
}

impl ChatRelay {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        model: impl Into<String>,
        persona: Option<Persona>,
    ) -> Self {
        Self {
            backend,
            model: model.into(),
            persona,
        }
    }

    /// Persona prelude (if any) followed by the message as the single user turn.
    pub fn build_conversation(&self, message: &str) -> Conversation {
        let mut conversation = Conversation::new();
        if let Some(persona) = &self.persona {
            conversation.extend(persona.prelude());
        }
        conversation.push(ChatMessage::user(message));
        conversation
    }

    /// Generate a reply to `request`.
    ///
    /// Blank messages are rejected before the backend is called. Inference
    /// failures are logged and returned without retry.
    pub async fn reply(&self, request: &ChatRequest) -> Result<String, RelayError> {
        if request.is_blank() {
            return Err(RelayError::EmptyMessage);
        }

        let inference = InferenceRequest::new(self.build_conversation(&request.message));
        debug!(
            backend = self.backend.name(),
            model = %self.model,
            messages = inference.messages.len(),
            "dispatching chat turn"
        );

        match self.backend.run(&self.model, &inference).await {
            Ok(out) => Ok(out.response),
            Err(e) => {
                error!(backend = self.backend.name(), model = %self.model, "inference failed: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::chat::Role;
    use crate::inference::InferenceResponse;

    /// Backend that records the last request and replies with a fixed outcome.
    struct Scripted {
        reply: Option<String>,
        seen: Mutex<Vec<(String, InferenceRequest)>>,
    }

    impl Scripted {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl InferenceBackend for Scripted {
        async fn run(
            &self,
            model: &str,
            request: &InferenceRequest,
        ) -> Result<InferenceResponse, InferenceError> {
            self.seen
                .lock()
                .unwrap()
                .push((model.to_string(), request.clone()));
            match &self.reply {
                Some(r) => Ok(InferenceResponse {
                    response: r.clone(),
                }),
                None => Err(InferenceError::Rejected("boom".into())),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn plain_conversation_is_single_user_turn() {
        let relay = ChatRelay::new(Scripted::ok("x"), "m", None);
        let conv = relay.build_conversation("hello");
        assert_eq!(conv.messages(), &[ChatMessage::user("hello")]);
    }

    #[test]
    fn persona_conversation_order() {
        let relay = ChatRelay::new(Scripted::ok("x"), "m", Some(Persona::joshua()));
        let conv = relay.build_conversation("hello");
        let roles: Vec<Role> = conv.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::Assistant, Role::User]);
        assert_eq!(conv.messages()[0], Persona::joshua().prelude()[0]);
        assert_eq!(conv.messages()[1], Persona::joshua().prelude()[1]);
    }

    #[test]
    fn user_turn_is_verbatim() {
        let relay = ChatRelay::new(Scripted::ok("x"), "m", Some(Persona::new("p", None)));
        let message = "  spaced  \n and <b>tagged</b> ";
        let conv = relay.build_conversation(message);
        let last = conv.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, message);
    }

    #[tokio::test]
    async fn reply_returns_backend_text_and_sends_non_streaming() {
        let backend = Scripted::ok("hi there");
        let relay = ChatRelay::new(backend.clone(), "@cf/test-model", None);

        let out = relay.reply(&ChatRequest::new("hello")).await.unwrap();
        assert_eq!(out, "hi there");

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "@cf/test-model");
        assert!(!seen[0].1.stream);
        assert_eq!(seen[0].1.messages.last(), Some(&ChatMessage::user("hello")));
    }

    #[tokio::test]
    async fn reply_propagates_inference_failure_once() {
        let backend = Scripted::failing();
        let relay = ChatRelay::new(backend.clone(), "m", None);

        let err = relay.reply(&ChatRequest::new("hello")).await.unwrap_err();
        assert!(matches!(err, RelayError::Inference(_)));
        assert_eq!(backend.seen.lock().unwrap().len(), 1, "no retry expected");
    }

    #[tokio::test]
    async fn blank_message_never_reaches_backend() {
        let backend = Scripted::ok("x");
        let relay = ChatRelay::new(backend.clone(), "m", None);

        let err = relay.reply(&ChatRequest::new("   ")).await.unwrap_err();
        assert!(matches!(err, RelayError::EmptyMessage));
        assert!(backend.seen.lock().unwrap().is_empty());
    }
}
