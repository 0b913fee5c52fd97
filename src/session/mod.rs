//! Session management module.
//!
//! This module provides types and utilities for managing USSD sessions,
//! including session identification, the traversal state machine,
//! session-scoped variables, and storage.

mod id;
mod state;
mod store;
mod variables;

pub use id::SessionId;
pub use state::SessionState;
pub use store::{Session, SessionStore};
pub use variables::VariableStore;
