//! The conversation state manager: log, in-flight gate and submit lifecycle.

use std::sync::Arc;

use tokio::task::JoinHandle;

use super::conversation::Conversation;
use super::prompt::{NETWORK_ERROR_REPLY, SYSTEM_PROMPT};
use super::transport::{RelayTransport, TransportError};

/// Outcome of a submission attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// The message was appended and a relay request is now in flight.
    Sent,
    /// Empty or whitespace-only input; the log is unchanged.
    EmptyInput,
    /// A request is already in flight; the submission was rejected.
    Busy,
}

/// One chat session: the log, the transport and the in-flight gate.
///
/// At most one relay request is outstanding at a time, enforced by the gate
/// rather than by cancellation: a request that has been issued always runs to
/// completion and settles into the log when [`ChatSession::resolve`] is
/// awaited.
pub struct ChatSession<T: RelayTransport + 'static> {
    conversation: Conversation,
    transport: Arc<T>,
    system_prompt: &'static str,
    pending: Option<JoinHandle<Result<String, TransportError>>>,
}

impl<T: RelayTransport + 'static> ChatSession<T> {
    /// Create a session with a greeting-seeded log.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            conversation: Conversation::new(),
            transport: Arc::new(transport),
            system_prompt: SYSTEM_PROMPT,
            pending: None,
        }
    }

    /// Read access to the conversation log.
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Whether a relay request is currently outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit user input.
    ///
    /// Trims the input; whitespace-only input is a no-op. While a request is
    /// in flight further submissions are rejected. Otherwise the user message
    /// is appended and exactly one relay request is issued carrying the
    /// entire updated log plus the fixed system instruction. Identical
    /// consecutive submissions are each sent independently.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::EmptyInput;
        }
        if self.pending.is_some() {
            return SubmitOutcome::Busy;
        }

        self.conversation.push_user(text);

        let transport = Arc::clone(&self.transport);
        let messages = self.conversation.messages().to_vec();
        let system_prompt = self.system_prompt;
        self.pending = Some(tokio::spawn(async move {
            transport.send(&messages, system_prompt).await
        }));

        SubmitOutcome::Sent
    }

    /// Await the outstanding request and settle it into the log.
    ///
    /// On success the reply is appended as an assistant message; on any
    /// failure the fixed network-error message is appended instead, keeping
    /// the chat metaphor. The in-flight gate is cleared in every case and no
    /// retry is attempted. A call with nothing in flight does nothing.
    pub async fn resolve(&mut self) {
        let Some(handle) = self.pending.take() else {
            return;
        };

        match handle.await {
            Ok(Ok(reply)) => self.conversation.push_assistant(reply),
            Ok(Err(err)) => {
                tracing::warn!("relay request failed: {err}");
                self.conversation.push_assistant(NETWORK_ERROR_REPLY);
            }
            Err(err) => {
                tracing::warn!("relay task failed: {err}");
                self.conversation.push_assistant(NETWORK_ERROR_REPLY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::chat::message::{Message, Role};
    use crate::chat::prompt::GREETING;

    /// Transport that answers immediately and records what it was sent.
    struct CannedRelay {
        reply: &'static str,
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<(Vec<Message>, String)>>>,
    }

    #[async_trait]
    impl RelayTransport for CannedRelay {
        async fn send(
            &self,
            messages: &[Message],
            system_prompt: &str,
        ) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((messages.to_vec(), system_prompt.to_string()));
            }
            Ok(self.reply.to_string())
        }
    }

    /// Transport that holds the request open until released.
    struct BlockedRelay {
        release: Arc<Notify>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RelayTransport for BlockedRelay {
        async fn send(
            &self,
            _messages: &[Message],
            _system_prompt: &str,
        ) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok("late reply".to_string())
        }
    }

    /// Transport that always fails with a status error.
    struct FailingRelay;

    #[async_trait]
    impl RelayTransport for FailingRelay {
        async fn send(
            &self,
            _messages: &[Message],
            _system_prompt: &str,
        ) -> Result<String, TransportError> {
            Err(TransportError::Status(503))
        }
    }

    fn canned(reply: &'static str) -> (CannedRelay, Arc<AtomicUsize>, Arc<Mutex<Vec<(Vec<Message>, String)>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let relay = CannedRelay {
            reply,
            calls: Arc::clone(&calls),
            seen: Arc::clone(&seen),
        };
        (relay, calls, seen)
    }

    #[tokio::test]
    async fn test_session_starts_with_greeting() {
        let (relay, _, _) = canned("ok");
        let session = ChatSession::new(relay);
        assert_eq!(session.conversation().len(), 1);
        assert!(session
            .conversation()
            .last()
            .is_some_and(|m| m.role == Role::Assistant && m.content == GREETING));
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_blank_input_is_a_noop() {
        let (relay, calls, _) = canned("ok");
        let mut session = ChatSession::new(relay);

        assert_eq!(session.submit("   "), SubmitOutcome::EmptyInput);
        assert_eq!(session.submit(""), SubmitOutcome::EmptyInput);
        assert_eq!(session.conversation().len(), 1);
        assert!(!session.is_in_flight());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_round_trip_appends_user_then_assistant() {
        let (relay, calls, seen) = canned("MOSES is the statutory reporting system.");
        let mut session = ChatSession::new(relay);

        assert_eq!(session.submit("What is MOSES reporting?"), SubmitOutcome::Sent);
        assert!(session.is_in_flight());
        session.resolve().await;

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "What is MOSES reporting?");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, "MOSES is the statutory reporting system.");
        assert!(!session.is_in_flight());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The request carried the entire updated log and the fixed instruction.
        let requests = seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(requests.len(), 1);
        let (sent_messages, sent_prompt) = &requests[0];
        assert_eq!(sent_messages.len(), 2);
        assert_eq!(sent_messages[0].content, GREETING);
        assert_eq!(sent_messages[1].content, "What is MOSES reporting?");
        assert_eq!(sent_prompt, SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn test_submission_rejected_while_in_flight() {
        let release = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let relay = BlockedRelay {
            release: Arc::clone(&release),
            calls: Arc::clone(&calls),
        };
        let mut session = ChatSession::new(relay);

        assert_eq!(session.submit("first"), SubmitOutcome::Sent);
        assert_eq!(session.submit("second"), SubmitOutcome::Busy);
        assert!(session.is_in_flight());

        release.notify_one();
        session.resolve().await;

        // Only the first submission reached the transport.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.conversation().len(), 3);
        assert!(session
            .conversation()
            .last()
            .is_some_and(|m| m.content == "late reply"));
    }

    #[tokio::test]
    async fn test_failure_becomes_conversational_message() {
        let mut session = ChatSession::new(FailingRelay);

        assert_eq!(session.submit("hello?"), SubmitOutcome::Sent);
        session.resolve().await;

        assert!(session
            .conversation()
            .last()
            .is_some_and(|m| m.role == Role::Assistant && m.content == NETWORK_ERROR_REPLY));
        assert!(!session.is_in_flight());

        // Input is re-enabled after the failure settles.
        assert_eq!(session.submit("still there?"), SubmitOutcome::Sent);
        session.resolve().await;
        assert_eq!(session.conversation().len(), 5);
    }

    #[tokio::test]
    async fn test_identical_submissions_are_each_sent() {
        let (relay, calls, _) = canned("yes");
        let mut session = ChatSession::new(relay);

        assert_eq!(session.submit("ping"), SubmitOutcome::Sent);
        session.resolve().await;
        assert_eq!(session.submit("ping"), SubmitOutcome::Sent);
        session.resolve().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.conversation().len(), 5);
    }
}
