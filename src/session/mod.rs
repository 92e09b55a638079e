//! Debate session state machine
//!
//! A [`DebateSession`] owns the transcript, the input box text and the
//! pending call. It is either idle or awaiting exactly one reply:
//!
//! 1. [`DebateSession::submit`] appends the user's message and hands back a
//!    [`Submission`] carrying the outbound payload and a [`Ticket`]
//! 2. The caller sends the payload however it likes
//! 3. [`DebateSession::resolve`] appends the reply (or the fallback text)
//!
//! Tickets are tagged with the transcript they were issued for, so a reply
//! arriving after "new debate" is dropped instead of leaking into the fresh
//! transcript.

mod client;
mod view;

pub use client::{ClientError, DebateClient, HttpDebateClient};
pub use view::{time_label, view, Entry, View, PLACEHOLDER, THINKING};

use uuid::Uuid;

use crate::conversation::{DebateReply, DebateRequest, Message, Transcript};

/// Shown in place of a reply when the call fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Awaiting,
}

/// Identifies one in-flight call and the transcript it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    session: Uuid,
    turn: usize,
}

impl Ticket {
    pub fn session(&self) -> Uuid {
        self.session
    }
}

/// A call the caller must now make
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: DebateRequest,
}

/// What [`DebateSession::resolve`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Replied,
    Failed,
    /// The ticket no longer matches the pending call; nothing changed
    Stale,
}

#[derive(Debug, Default)]
pub struct DebateSession {
    transcript: Transcript,
    input: String,
    pending: Option<Ticket>,
}

impl DebateSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.is_pending() {
            Phase::Awaiting
        } else {
            Phase::Idle
        }
    }

    // The input box is disabled while a reply is pending.

    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.is_pending() {
            self.input = text.into();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_pending() {
            self.input.push(c);
        }
    }

    pub fn insert_newline(&mut self) {
        self.push_char('\n');
    }

    pub fn backspace(&mut self) {
        if !self.is_pending() {
            self.input.pop();
        }
    }

    /// Idle -> Awaiting. Returns `None` when the input is blank or a call
    /// is already pending.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.is_pending() || self.input.trim().is_empty() {
            return None;
        }

        let request = DebateRequest {
            user_input: self.input.clone(),
            recent_history: self.transcript.recent_history(),
        };

        self.transcript.push(Message::user(self.input.clone()));

        let ticket = Ticket {
            session: self.transcript.id,
            turn: self.transcript.len(),
        };
        self.pending = Some(ticket);

        tracing::debug!(
            session = %ticket.session,
            history = request.recent_history.len(),
            "submitting argument"
        );

        Some(Submission { ticket, request })
    }

    /// Awaiting -> Idle. Failures of any kind append [`FALLBACK_REPLY`].
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<DebateReply, ClientError>,
    ) -> Resolution {
        if self.pending != Some(ticket) {
            tracing::debug!(session = %ticket.session, "dropping reply for a previous debate");
            return Resolution::Stale;
        }

        let resolution = match outcome {
            Ok(reply) => {
                self.transcript.push(Message::bot(reply.assistant_response));
                Resolution::Replied
            }
            Err(e) => {
                tracing::error!(error = %e, "debate request failed");
                self.transcript.push(Message::bot(FALLBACK_REPLY));
                Resolution::Failed
            }
        };

        self.pending = None;
        self.input.clear();
        resolution
    }

    /// Start over from any state. An in-flight call is not cancelled, but
    /// its reply will resolve as [`Resolution::Stale`].
    pub fn new_debate(&mut self) {
        self.transcript = Transcript::new();
        self.input.clear();
        self.pending = None;
    }
}

/// Submit, await the client, resolve. Returns `None` if nothing was
/// submitted.
pub async fn exchange<C>(session: &mut DebateSession, client: &C) -> Option<Resolution>
where
    C: DebateClient + ?Sized,
{
    let submission = session.submit()?;
    let outcome = client.send(&submission.request).await;
    Some(session.resolve(submission.ticket, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies from a script and records every request it sees
    struct ScriptedClient {
        replies: Mutex<Vec<Result<String, String>>>,
        seen: Mutex<Vec<DebateRequest>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<&str, &str>>) -> Self {
            Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .rev()
                        .map(|r| r.map(String::from).map_err(String::from))
                        .collect(),
                ),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<DebateRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DebateClient for ScriptedClient {
        async fn send(&self, request: &DebateRequest) -> Result<DebateReply, ClientError> {
            self.seen.lock().unwrap().push(request.clone());
            match self.replies.lock().unwrap().pop().expect("script exhausted") {
                Ok(text) => Ok(DebateReply {
                    assistant_response: text,
                }),
                Err(e) => Err(ClientError::MalformedReply(e)),
            }
        }
    }

    fn contents(session: &DebateSession) -> Vec<(Role, String)> {
        session
            .transcript()
            .messages()
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_first_and_second_turn_payloads() {
        let client = ScriptedClient::new(vec![Ok("I disagree"), Ok("Gladly")]);
        let mut session = DebateSession::new();

        session.set_input("A is true");
        assert_eq!(exchange(&mut session, &client).await, Some(Resolution::Replied));
        assert_eq!(
            contents(&session),
            vec![
                (Role::User, "A is true".to_string()),
                (Role::Bot, "I disagree".to_string()),
            ]
        );

        session.set_input("Prove it");
        exchange(&mut session, &client).await;

        let seen = client.seen();
        assert_eq!(
            seen[0],
            DebateRequest {
                user_input: "A is true".into(),
                recent_history: vec![],
            }
        );
        assert_eq!(
            seen[1],
            DebateRequest {
                user_input: "Prove it".into(),
                recent_history: vec!["A is true".into(), "I disagree".into()],
            }
        );
    }

    #[tokio::test]
    async fn test_transcript_alternates_and_history_accumulates() {
        let client = ScriptedClient::new(vec![Ok("r1"), Ok("r2"), Ok("r3"), Ok("r4")]);
        let mut session = DebateSession::new();

        for n in 1..=4 {
            session.set_input(format!("arg{}", n));
            exchange(&mut session, &client).await;
            assert_eq!(session.transcript().len(), 2 * n);
        }

        for (i, message) in session.transcript().messages().iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Bot };
            assert_eq!(message.role, expected);
            assert!(message.timestamp.is_some());
        }

        let seen = client.seen();
        assert_eq!(
            seen[3].recent_history,
            vec!["arg1", "r1", "arg2", "r2", "arg3", "r3"]
        );
        assert!(!seen[3].recent_history.contains(&"arg4".to_string()));
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let client = ScriptedClient::new(vec![]);
        let mut session = DebateSession::new();

        for blank in ["", "   ", "\n\t \n"] {
            session.set_input(blank);
            assert!(exchange(&mut session, &client).await.is_none());
        }

        assert!(session.transcript().is_empty());
        assert!(client.seen().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failure_appends_fallback() {
        let client = ScriptedClient::new(vec![Err("connection refused")]);
        let mut session = DebateSession::new();

        session.set_input("A is true");
        assert_eq!(exchange(&mut session, &client).await, Some(Resolution::Failed));

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Bot);
        assert_eq!(messages[1].content, FALLBACK_REPLY);
        assert!(!session.is_pending());
        assert_eq!(session.input(), "");
    }

    #[test]
    fn test_input_is_kept_verbatim_and_cleared_on_resolve() {
        let mut session = DebateSession::new();
        session.set_input("  line one");
        session.insert_newline();
        session.push_char('x');

        let submission = session.submit().unwrap();
        assert_eq!(submission.request.user_input, "  line one\nx");
        assert_eq!(session.input(), "  line one\nx");
        assert_eq!(session.phase(), Phase::Awaiting);

        session.resolve(
            submission.ticket,
            Ok(DebateReply {
                assistant_response: "ok".into(),
            }),
        );
        assert_eq!(session.input(), "");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_pending_blocks_editing_and_resubmission() {
        let mut session = DebateSession::new();
        session.set_input("first");
        let _submission = session.submit().unwrap();

        session.push_char('!');
        session.backspace();
        session.set_input("second");
        assert_eq!(session.input(), "first");

        assert!(session.submit().is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_new_debate_resets_in_any_state() {
        let mut session = DebateSession::new();
        session.set_input("A is true");
        let submission = session.submit().unwrap();
        let old_id = session.transcript().id;

        session.new_debate();

        assert!(session.transcript().is_empty());
        assert_eq!(session.input(), "");
        assert!(!session.is_pending());
        assert_ne!(session.transcript().id, old_id);
        assert_eq!(submission.ticket.session(), old_id);
    }

    #[test]
    fn test_reply_after_new_debate_is_dropped() {
        let mut session = DebateSession::new();
        session.set_input("A is true");
        let stale = session.submit().unwrap();

        session.new_debate();
        session.set_input("Fresh start");

        let resolution = session.resolve(
            stale.ticket,
            Ok(DebateReply {
                assistant_response: "late reply".into(),
            }),
        );

        assert_eq!(resolution, Resolution::Stale);
        assert!(session.transcript().is_empty());
        assert_eq!(session.input(), "Fresh start");
    }

    #[test]
    fn test_stale_reply_does_not_resolve_the_current_call() {
        let mut session = DebateSession::new();
        session.set_input("old");
        let stale = session.submit().unwrap();

        session.new_debate();
        session.set_input("new");
        let current = session.submit().unwrap();

        let dropped = session.resolve(stale.ticket, Err(ClientError::MalformedReply("x".into())));
        assert_eq!(dropped, Resolution::Stale);
        assert!(session.is_pending());

        let resolved = session.resolve(
            current.ticket,
            Ok(DebateReply {
                assistant_response: "answer".into(),
            }),
        );
        assert_eq!(resolved, Resolution::Replied);
        assert_eq!(
            contents(&session),
            vec![
                (Role::User, "new".to_string()),
                (Role::Bot, "answer".to_string()),
            ]
        );
    }
}
