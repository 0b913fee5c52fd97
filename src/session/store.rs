//! Session storage and management.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

use super::{SessionId, SessionState, VariableStore};
use crate::error::UssdError;
use crate::node::NodePath;
use crate::Result;

/// A USSD session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier.
    pub id: SessionId,
    /// Current traversal state.
    pub state: SessionState,
    /// Position in the template tree, persisted while awaiting input.
    pub cursor: Option<NodePath>,
    /// Variables collected during the session.
    pub variables: VariableStore,
    /// Time when session was created.
    pub created_at: Instant,
    /// Time of last activity.
    pub last_activity: Instant,
}

impl Session {
    /// Create a new session with the given ID.
    pub fn new(id: SessionId) -> Self {
        let now = Instant::now();
        Self {
            id,
            state: SessionState::New,
            cursor: None,
            variables: VariableStore::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Get the idle duration since last activity.
    pub fn idle_duration(&self) -> std::time::Duration {
        self.last_activity.elapsed()
    }
}

/// Thread-safe storage for sessions.
///
/// Mutation happens through closures run under the write lock, so a
/// session is never touched by two traversals at once: the store boundary
/// serializes writers (see [`SessionStore::with_session`]).
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionStore {
    /// Create a new empty session store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Run a closure over the session with the given ID, creating the
    /// session first if it does not exist yet.
    ///
    /// The closure runs under the write lock, which is what guarantees
    /// at-most-one-active-traversal per session id.
    pub fn with_session<F, R>(&self, id: &SessionId, f: F) -> Result<R>
    where
        F: FnOnce(&mut Session) -> Result<R>,
    {
        let mut sessions = self.sessions.write().map_err(|_| UssdError::LockPoisoned)?;
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone()));
        f(session)
    }

    /// Get a clone of the session with the given ID.
    pub fn get(&self, id: &SessionId) -> Result<Option<Session>> {
        let sessions = self.sessions.read().map_err(|_| UssdError::LockPoisoned)?;
        Ok(sessions.get(id).cloned())
    }

    /// Check if a session exists.
    pub fn contains(&self, id: &SessionId) -> Result<bool> {
        let sessions = self.sessions.read().map_err(|_| UssdError::LockPoisoned)?;
        Ok(sessions.contains_key(id))
    }

    /// Update an existing session using a closure.
    ///
    /// Returns an error if the session doesn't exist.
    pub fn update<F>(&self, id: &SessionId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.write().map_err(|_| UssdError::LockPoisoned)?;

        let session = sessions
            .get_mut(id)
            .ok_or_else(|| UssdError::SessionNotFound(id.to_string()))?;

        f(session);
        Ok(())
    }

    /// Remove a session from the store.
    ///
    /// Returns the removed session, or None if it didn't exist.
    pub fn remove(&self, id: &SessionId) -> Result<Option<Session>> {
        let mut sessions = self.sessions.write().map_err(|_| UssdError::LockPoisoned)?;
        Ok(sessions.remove(id))
    }

    /// Get the number of sessions in the store.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// List all session IDs.
    pub fn list_ids(&self) -> Result<Vec<SessionId>> {
        let sessions = self.sessions.read().map_err(|_| UssdError::LockPoisoned)?;
        Ok(sessions.keys().cloned().collect())
    }

    /// Remove all sessions matching a predicate.
    ///
    /// Returns the number of sessions removed.
    pub fn remove_matching<F>(&self, predicate: F) -> Result<usize>
    where
        F: Fn(&Session) -> bool,
    {
        let mut sessions = self.sessions.write().map_err(|_| UssdError::LockPoisoned)?;

        let before = sessions.len();
        sessions.retain(|_, session| !predicate(session));
        Ok(before - sessions.len())
    }

    /// Remove terminated sessions and sessions idle longer than `max_idle`.
    ///
    /// USSD gateways drop subscribers after a short inactivity window, so
    /// an abandoned session never sees another request.
    pub fn purge(&self, max_idle: std::time::Duration) -> Result<usize> {
        self.remove_matching(|s| s.state.is_terminal() || s.idle_duration() > max_idle)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
