//! Per-user session state.
//!
//! Each user has one flag: whether a response to the question is pending.
//! Sessions are keyed by [`UserId`] in a sharded concurrent map, so distinct
//! users never contend; within one user the check-and-clear in
//! [`SessionStore::begin_response`] happens under the entry's write guard.

use dashmap::DashMap;
use serde::Serialize;

use crate::error::QuizError;
use crate::model::UserId;

/// Where a user is in the question/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// One user's conversational state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    awaiting_response: bool,
}

impl Session {
    pub fn state(&self) -> SessionState {
        if self.awaiting_response {
            SessionState::AwaitingResponse
        } else {
            SessionState::Idle
        }
    }
}

/// All sessions known to the process.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; users never seen before are `Idle`.
    pub fn state(&self, user: UserId) -> SessionState {
        self.sessions
            .get(&user)
            .map(|s| s.state())
            .unwrap_or_default()
    }

    /// Move to `AwaitingResponse` from any state. Returns the previous state.
    pub fn request_question(&self, user: UserId) -> SessionState {
        let mut session = self.sessions.entry(user).or_default();
        let previous = session.state();
        session.awaiting_response = true;
        previous
    }

    /// Consume the pending question, moving back to `Idle`.
    ///
    /// Fails with [`QuizError::NotAwaitingResponse`] if nothing was pending,
    /// so at most one response is accepted per question.
    pub fn begin_response(&self, user: UserId) -> Result<(), QuizError> {
        match self.sessions.get_mut(&user) {
            Some(mut session) if session.awaiting_response => {
                session.awaiting_response = false;
                Ok(())
            }
            _ => Err(QuizError::NotAwaitingResponse { user }),
        }
    }

    /// Forget the user entirely, as when their chat context ends.
    pub fn end(&self, user: UserId) {
        self.sessions.remove(&user);
    }

    /// Number of users with a session record.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
