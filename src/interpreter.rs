//! Session controller: drives one request's traversal of a menu tree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::UssdError;
use crate::node::{Node, NodePath};
use crate::session::{Session, SessionId, SessionState, SessionStore};
use crate::tags::{Advance, TagOutcome, TagRegistry};
use crate::Result;

/// Default bound on dispatches per request, to break redirect cycles.
pub const DEFAULT_STEP_LIMIT: usize = 255;

/// Outbound payload for one USSD request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Text to present to the subscriber.
    pub text: String,
    /// `true` when the session reached a terminal tag.
    pub session_ended: bool,
}

impl Reply {
    /// A final reply; the session is over.
    pub fn ended(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            session_ended: true,
        }
    }

    /// A prompt; the session is suspended awaiting input.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            session_ended: false,
        }
    }
}

/// Drives menu-tree traversals across the requests of USSD sessions.
///
/// One interpreter serves many sessions; per-session serialization is the
/// store's job ([`SessionStore::with_session`]).
pub struct Interpreter {
    registry: TagRegistry,
    store: Arc<SessionStore>,
    step_limit: usize,
}

impl Interpreter {
    /// Create an interpreter with the built-in tag family.
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self::with_registry(store, TagRegistry::with_defaults())
    }

    /// Create an interpreter with a custom tag registry.
    pub fn with_registry(store: Arc<SessionStore>, registry: TagRegistry) -> Self {
        Self {
            registry,
            store,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Create an interpreter configured from a [`Config`].
    pub fn from_config(store: Arc<SessionStore>, config: &Config) -> Self {
        Self::new(store).step_limit(config.engine.step_limit)
    }

    /// Override the per-request step limit.
    pub fn step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    /// Get the session store this interpreter drives.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Handle one inbound request for a session.
    ///
    /// `input` is the subscriber's reply when the session was suspended
    /// awaiting input; `None` on the opening request. Returns the outbound
    /// [`Reply`], or an error for malformed templates and ended sessions.
    /// The whole traversal runs inside the store's per-session writer
    /// closure, so concurrent requests for one session id serialize.
    pub fn handle_request(
        &self,
        session_id: &SessionId,
        tree: &Node,
        input: Option<&str>,
    ) -> Result<Reply> {
        self.store
            .with_session(session_id, |session| self.drive(session, tree, input))
    }

    /// Run one traversal: resume or start, then dispatch until the tree
    /// suspends or terminates.
    fn drive(&self, session: &mut Session, tree: &Node, input: Option<&str>) -> Result<Reply> {
        if !session.state.can_accept_request() {
            return Err(UssdError::SessionEnded(session.id.to_string()));
        }
        session.touch();

        let (mut cursor, mut outcome) = match session.state {
            SessionState::New => {
                session.state.transition_to(SessionState::Traversing)?;
                let cursor = NodePath::root();
                let node = resolve(tree, &cursor)?;
                debug!(session = %session.id, tag = node.tag(), "starting traversal");
                let outcome = self.registry.dispatch(node, &mut session.variables)?;
                (cursor, outcome)
            }
            SessionState::AwaitingInput => {
                session.state.transition_to(SessionState::Traversing)?;
                // A session never suspends without a cursor; root is the
                // harmless recovery if the store handed us one anyway
                let cursor = session.cursor.take().unwrap_or_default();
                let node = resolve(tree, &cursor)?;
                let outcome = match input {
                    Some(reply) => {
                        session.variables.record_input(reply);
                        debug!(session = %session.id, tag = node.tag(), "resuming with input");
                        self.registry.resume(node, &mut session.variables, reply)?
                    }
                    // Nothing to feed; re-issue the prompt
                    None => self.registry.dispatch(node, &mut session.variables)?,
                };
                (cursor, outcome)
            }
            SessionState::Traversing => {
                // A request died mid-walk; pick up where the cursor points
                let cursor = session.cursor.take().unwrap_or_default();
                let node = resolve(tree, &cursor)?;
                let outcome = self.registry.dispatch(node, &mut session.variables)?;
                (cursor, outcome)
            }
            // Gated by can_accept_request above
            SessionState::Terminated => {
                return Err(UssdError::SessionEnded(session.id.to_string()))
            }
        };

        let mut steps = 1usize;
        loop {
            match outcome {
                TagOutcome::Terminate { message, code } => {
                    session.state.transition_to(SessionState::Terminated)?;
                    session.cursor = None;
                    info!(session = %session.id, code, "session terminated");
                    return Ok(Reply::ended(message));
                }
                TagOutcome::AwaitInput { prompt } => {
                    session.state.transition_to(SessionState::AwaitingInput)?;
                    session.cursor = Some(cursor);
                    debug!(session = %session.id, "suspended awaiting input");
                    return Ok(Reply::prompt(prompt));
                }
                TagOutcome::Continue(advance) => {
                    if steps >= self.step_limit {
                        return Err(UssdError::StepLimitExceeded {
                            limit: self.step_limit,
                        });
                    }
                    steps += 1;
                    cursor = self.advance(tree, &cursor, advance)?;
                    let node = resolve(tree, &cursor)?;
                    debug!(session = %session.id, tag = node.tag(), cursor = %cursor, "dispatching tag");
                    outcome = self.registry.dispatch(node, &mut session.variables)?;
                }
            }
        }
    }

    /// Turn an [`Advance`] into the next cursor position.
    fn advance(&self, tree: &Node, cursor: &NodePath, advance: Advance) -> Result<NodePath> {
        match advance {
            Advance::Next => next_in_flow(tree, cursor).ok_or(UssdError::TemplateExhausted),
            Advance::Descend => {
                let node = resolve(tree, cursor)?;
                if node.has_children() {
                    Ok(cursor.child(0))
                } else {
                    next_in_flow(tree, cursor).ok_or(UssdError::TemplateExhausted)
                }
            }
            Advance::Child(index) => {
                let node = resolve(tree, cursor)?;
                if index < node.children().len() {
                    Ok(cursor.child(index))
                } else {
                    Err(UssdError::InvalidCursor {
                        path: cursor.child(index),
                    })
                }
            }
            Advance::Goto(name) => tree
                .find_by_id(&name)
                .ok_or(UssdError::UnknownScreen { name }),
        }
    }
}

fn resolve<'a>(tree: &'a Node, cursor: &NodePath) -> Result<&'a Node> {
    tree.resolve(cursor).ok_or_else(|| UssdError::InvalidCursor {
        path: cursor.clone(),
    })
}

/// The next node in document order, never entering the current subtree.
///
/// Children of a `menu` are alternative branches, not a sequence:
/// exhausting one branch ascends past the menu instead of falling into a
/// sibling option.
fn next_in_flow(tree: &Node, path: &NodePath) -> Option<NodePath> {
    let mut path = path.clone();
    loop {
        let parent = path.parent()?;
        let index = path.last()?;
        let parent_node = tree.resolve(&parent)?;
        if parent_node.tag() != "menu" && index + 1 < parent_node.children().len() {
            return Some(parent.child(index + 1));
        }
        path = parent;
    }
}
