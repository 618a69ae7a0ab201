//! Conversation controller state machine.
//!
//! The controller owns the transcript and session identity for one
//! client and sequences every backend interaction: bootstrap (register,
//! then hydrate), submission (at most one in flight), and reset. It is
//! driven from a single task -- the CLI event loop -- and observed only
//! through [`ConversationSnapshot`]; network calls suspend without
//! blocking that task.
//!
//! Submissions run as spawned tasks tagged with the session id they were
//! issued under. Their completions come back as [`ControllerEvent`]s and
//! must be fed to [`ConversationController::apply`]; completions that
//! outlive their session (a reset happened meanwhile) are discarded.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use newshound_types::chat::{ChatReply, Turn};
use newshound_types::error::GatewayError;
use newshound_types::session::SessionId;

use crate::gateway::ChatGateway;
use crate::session::{SessionIdentity, SessionStore};

use super::transcript::Transcript;

/// Maximum submitted message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Banner message when bootstrap fails.
const BOOTSTRAP_FAILED: &str = "Failed to initialize chat session.";

/// Banner message when reset fails.
const RESET_FAILED: &str = "Failed to reset chat session. Please try again.";

/// Lifecycle phase of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has happened yet.
    Uninitialized,
    /// Bootstrap or reset is running.
    Initializing,
    /// Idle and accepting submissions.
    Ready,
    /// One submission is in flight.
    Submitting,
    /// A failure occurred; submissions are blocked until a reset succeeds.
    Errored,
}

/// Synchronous outcome of a submit attempt.
///
/// Rejections are no-ops, not errors: the transcript and phase are left
/// untouched and no gateway call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDisposition {
    /// Accepted; the user turn is appended and a gateway call is in flight.
    Dispatched,
    /// Rejected: nothing left after trimming.
    EmptyInput,
    /// Rejected: over [`MAX_MESSAGE_CHARS`].
    OverLength { chars: usize },
    /// Rejected: a previous submission is still in flight.
    RequestInFlight,
    /// Rejected: the conversation is errored; reset first.
    Faulted,
    /// Rejected: bootstrap has not completed.
    NotReady,
}

/// Completion events delivered back to the controller's driving task.
#[derive(Debug)]
pub enum ControllerEvent {
    /// A spawned submission resolved.
    SubmitResolved {
        /// Session the request was issued under. Stale completions are
        /// discarded when this no longer matches the current session.
        issued_for: SessionId,
        outcome: Result<ChatReply, GatewayError>,
    },
}

/// Point-in-time view of controller state for rendering.
#[derive(Debug, Clone)]
pub struct ConversationSnapshot {
    pub phase: Phase,
    pub turns: Vec<Turn>,
    pub pending: bool,
    pub error: Option<String>,
    pub banner_visible: bool,
    pub session_prefix: Option<String>,
}

/// Orchestrates one conversation against the backend.
///
/// Generic over [`ChatGateway`] and [`SessionStore`] to maintain clean
/// architecture (newshound-core never depends on newshound-infra).
pub struct ConversationController<G, S>
where
    G: ChatGateway + 'static,
    S: SessionStore,
{
    gateway: Arc<G>,
    identity: SessionIdentity<S>,
    transcript: Transcript,
    phase: Phase,
    session: Option<SessionId>,
    last_error: Option<String>,
    banner_dismissed: bool,
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl<G, S> ConversationController<G, S>
where
    G: ChatGateway + 'static,
    S: SessionStore,
{
    /// Create a controller and the event receiver its driving task must
    /// poll. Completions of spawned submissions arrive on the receiver
    /// and are applied with [`apply`](Self::apply).
    pub fn new(
        gateway: Arc<G>,
        identity: SessionIdentity<S>,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                gateway,
                identity,
                transcript: Transcript::new(),
                phase: Phase::Uninitialized,
                session: None,
                last_error: None,
                banner_dismissed: false,
                events_tx,
            },
            events_rx,
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Point-in-time view for rendering.
    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            phase: self.phase,
            turns: self.transcript.turns().to_vec(),
            pending: self.phase == Phase::Submitting,
            error: self.last_error.clone(),
            banner_visible: self.last_error.is_some() && !self.banner_dismissed,
            session_prefix: self.session.as_ref().map(|id| id.prefix().to_string()),
        }
    }

    /// Run the bootstrap sequence: obtain an id, register it with the
    /// backend, then hydrate history. Registration completes before the
    /// history fetch, since the backend may lazily create session state
    /// on registration.
    ///
    /// Hydration is all-or-nothing: any failure lands in [`Phase::Errored`]
    /// with an empty transcript, never a partial conversation.
    pub async fn bootstrap(&mut self) {
        self.phase = Phase::Initializing;
        self.last_error = None;
        self.banner_dismissed = false;

        let id = match self.identity.obtain_or_create().await {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "session identity unavailable");
                self.fail_bootstrap();
                return;
            }
        };
        self.session = Some(id.clone());

        if let Err(err) = self.gateway.register_session(&id).await {
            warn!(%err, session = %id, "session registration failed");
            self.fail_bootstrap();
            return;
        }

        let history = match self.gateway.fetch_history(&id).await {
            Ok(history) => history,
            Err(err) => {
                warn!(%err, session = %id, "history fetch failed");
                self.fail_bootstrap();
                return;
            }
        };

        self.transcript
            .replace_all(history.into_iter().map(Turn::from_history).collect());
        self.phase = Phase::Ready;
        info!(session = %id, turns = self.transcript.len(), "conversation ready");
    }

    fn fail_bootstrap(&mut self) {
        self.transcript.replace_all(Vec::new());
        self.last_error = Some(BOOTSTRAP_FAILED.to_string());
        self.banner_dismissed = false;
        self.phase = Phase::Errored;
    }

    /// Attempt to submit user text.
    ///
    /// Guards are checked synchronously and reported as a disposition.
    /// On [`SubmitDisposition::Dispatched`] the user turn is already
    /// appended (optimistically -- it stays in the log even if the
    /// request fails) and a gateway call is running in a spawned task
    /// tagged with the current session id.
    pub fn submit(&mut self, text: &str) -> SubmitDisposition {
        match self.phase {
            Phase::Submitting => return SubmitDisposition::RequestInFlight,
            Phase::Errored => return SubmitDisposition::Faulted,
            Phase::Uninitialized | Phase::Initializing => return SubmitDisposition::NotReady,
            Phase::Ready => {}
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitDisposition::EmptyInput;
        }
        let chars = trimmed.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return SubmitDisposition::OverLength { chars };
        }

        let Some(id) = self.session.clone() else {
            return SubmitDisposition::NotReady;
        };

        self.transcript.append(Turn::user(trimmed));
        self.phase = Phase::Submitting;

        let gateway = Arc::clone(&self.gateway);
        let events = self.events_tx.clone();
        let message = trimmed.to_string();
        tokio::spawn(async move {
            let outcome = gateway.submit_turn(&id, &message).await;
            let _ = events.send(ControllerEvent::SubmitResolved {
                issued_for: id,
                outcome,
            });
        });

        SubmitDisposition::Dispatched
    }

    /// Apply a completion event produced by a spawned submission.
    ///
    /// Stale completions -- issued under a different session, or arriving
    /// when the controller is no longer `Submitting` -- are dropped
    /// without touching the transcript.
    pub fn apply(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::SubmitResolved {
                issued_for,
                outcome,
            } => {
                if self.phase != Phase::Submitting || self.session.as_ref() != Some(&issued_for) {
                    debug!(session = %issued_for, "discarding stale submission result");
                    return;
                }

                match outcome {
                    Ok(reply) => {
                        self.transcript
                            .append(Turn::assistant(reply.response, reply.relevant_articles));
                        self.phase = Phase::Ready;
                    }
                    Err(err) => {
                        let message = err.to_string();
                        warn!(error = %message, "submission failed");
                        self.transcript.append(Turn::failure(&message));
                        self.last_error = Some(message);
                        self.banner_dismissed = false;
                        self.phase = Phase::Errored;
                    }
                }
            }
        }
    }

    /// Tear down and rebuild the conversation under a fresh session id.
    ///
    /// Clearing backend history for the old id is best-effort (a failure
    /// is logged and reset proceeds). Minting the new id and registering
    /// it must both succeed, or the controller lands in `Errored`. A
    /// reset during `Submitting` is permitted; it does not abort the
    /// outstanding request, whose completion will be discarded as stale.
    pub async fn reset(&mut self) {
        self.phase = Phase::Initializing;

        if let Some(old) = self.session.clone() {
            if let Err(err) = self.gateway.clear_history(&old).await {
                warn!(%err, session = %old, "history clear failed during reset");
            }
        }

        let id = match self.identity.reset().await {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "identity reset failed");
                self.fail_reset();
                return;
            }
        };

        self.transcript.replace_all(Vec::new());
        self.session = Some(id.clone());
        self.last_error = None;
        self.banner_dismissed = false;

        if let Err(err) = self.gateway.register_session(&id).await {
            warn!(%err, session = %id, "session registration failed during reset");
            self.fail_reset();
            return;
        }

        self.phase = Phase::Ready;
        info!(session = %id, "conversation reset");
    }

    fn fail_reset(&mut self) {
        self.last_error = Some(RESET_FAILED.to_string());
        self.banner_dismissed = false;
        self.phase = Phase::Errored;
    }

    /// Hide the error banner text. Display-only: the phase stays
    /// `Errored` and submissions remain blocked until a reset succeeds.
    pub fn dismiss_banner(&mut self) {
        self.banner_dismissed = true;
    }
}
