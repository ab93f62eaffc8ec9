// src/core/session.rs — Interactive chat session
//
// A session owns its transcript. Every submit appends exactly one user turn
// and one assistant turn, so the transcript is paired whenever control is
// back with the caller.

use super::formatter;
use super::types::{GenerationParams, Transcript, Turn};
use crate::infra::errors::SheetChatError;
use crate::provider::GenerationClient;

pub struct ChatSession {
    id: String,
    instruction: String,
    params: GenerationParams,
    transcript: Transcript,
}

impl ChatSession {
    /// Open a session with an empty transcript.
    pub fn start(instruction: impl Into<String>, params: GenerationParams) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(session = %id, "Chat session started");
        Self {
            id,
            instruction: instruction.into(),
            params,
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Send one user message and record the reply.
    ///
    /// On failure the error's display text is stored as the assistant turn
    /// and the error is returned, so the transcript stays paired either way.
    pub async fn submit(
        &mut self,
        client: &dyn GenerationClient,
        input: &str,
    ) -> Result<String, SheetChatError> {
        self.transcript.push(Turn::user(input));

        let request =
            formatter::chat_request(self.transcript.turns(), &self.instruction, self.params);

        match client.generate(&request).await {
            Ok(reply) => {
                self.transcript.push(Turn::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                tracing::warn!(session = %self.id, "Generation failed: {}", e);
                self.transcript.push(Turn::assistant(e.to_string()));
                Err(e)
            }
        }
    }

    /// Close the session and hand back its transcript.
    pub fn end(self) -> Transcript {
        tracing::debug!(
            session = %self.id,
            exchanges = self.transcript.exchanges(),
            "Chat session ended"
        );
        self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GenerationRequest, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with canned answers and remembers every request it saw.
    struct ScriptedClient {
        replies: Mutex<Vec<Result<String, SheetChatError>>>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, SheetChatError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, SheetChatError> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok("default".into()))
        }
    }

    #[tokio::test]
    async fn test_submit_appends_pair() {
        let client = ScriptedClient::new(vec![Ok("ok".into())]);
        let mut session = ChatSession::start("sys", GenerationParams::default());
        assert!(session.transcript().is_empty());

        let reply = session.submit(&client, "test").await.unwrap();
        assert_eq!(reply, "ok");
        assert_eq!(
            session.transcript().turns(),
            &[Turn::user("test"), Turn::assistant("ok")]
        );
    }

    #[tokio::test]
    async fn test_request_carries_full_history_and_instruction() {
        let client = ScriptedClient::new(vec![Ok("a1".into()), Ok("a2".into())]);
        let mut session = ChatSession::start("be brief", GenerationParams::default());
        session.submit(&client, "q1").await.unwrap();
        session.submit(&client, "q2").await.unwrap();

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].history, vec![Turn::user("q1")]);
        assert_eq!(
            seen[1].history,
            vec![Turn::user("q1"), Turn::assistant("a1"), Turn::user("q2")]
        );
        assert!(seen.iter().all(|r| r.system_instruction == "be brief"));
    }

    #[tokio::test]
    async fn test_error_text_becomes_assistant_turn() {
        let client = ScriptedClient::new(vec![Err(SheetChatError::Transport {
            model: "scripted".into(),
            detail: "connection refused".into(),
        })]);
        let mut session = ChatSession::start("sys", GenerationParams::default());

        let err = session.submit(&client, "hello").await.unwrap_err();
        assert!(err.is_generation_failure());

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, err.to_string());
        assert!(!session.transcript().awaiting_reply());
    }

    #[tokio::test]
    async fn test_end_returns_transcript() {
        let client = ScriptedClient::new(vec![Ok("ok".into())]);
        let mut session = ChatSession::start("sys", GenerationParams::default());
        session.submit(&client, "test").await.unwrap();
        let transcript = session.end();
        assert_eq!(transcript.exchanges(), 1);
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = ChatSession::start("", GenerationParams::default());
        let b = ChatSession::start("", GenerationParams::default());
        assert_ne!(a.id(), b.id());
    }
}
