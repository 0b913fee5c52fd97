//! # ussd-engine
//!
//! Session-driven USSD menu interpreter with tag-based dispatch.
//!
//! This crate walks a parsed menu template (a tree of typed [`Node`]s
//! produced by an external markup parser) and produces the textual
//! prompts of a USSD dialog. Terminal tags end a session through an
//! explicit [`TagOutcome::Terminate`](tags::TagOutcome) value rather than
//! an error, so intended termination and template faults stay apart by
//! type.
//!
//! ## Features
//!
//! - **Tag dispatch**: one handler per tag name, resolved through a
//!   registry populated at startup
//! - **Session state machine**: suspend on input prompts, resume on the
//!   next inbound request, reject requests after termination
//! - **Per-session serialization**: a whole traversal runs inside the
//!   store's single-writer closure
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use ussd_engine::{Interpreter, Node, SessionId, SessionStore};
//!
//! fn main() -> ussd_engine::Result<()> {
//!     // Initialize logging
//!     ussd_engine::logging::try_init().ok();
//!
//!     // Template: <response text="Thank you."/>
//!     let tree = Node::new("response").attr("text", "Thank you.");
//!
//!     let store = Arc::new(SessionStore::new());
//!     let engine = Interpreter::new(store);
//!
//!     let reply = engine.handle_request(&SessionId::from("demo"), &tree, None)?;
//!     assert_eq!(reply.text, "Thank you.");
//!     assert!(reply.session_ended);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod node;
pub mod session;
pub mod tags;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, UssdError};
pub use interpreter::{Interpreter, Reply};
pub use node::{Node, NodePath};
pub use session::{Session, SessionId, SessionState, SessionStore, VariableStore};
pub use tags::{Advance, TagHandler, TagOutcome, TagRegistry};
