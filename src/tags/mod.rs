//! Tag handlers and dispatch.
//!
//! Each tag name in a menu template is bound to exactly one [`TagHandler`].
//! A handler never raises to end a session: it returns
//! [`TagOutcome::Terminate`], and the interpreter turns that into the final
//! reply. The error channel is reserved for malformed templates.

mod input;
mod menu;
mod option;
mod redirect;
mod registry;
mod response;
mod screen;
mod variable;

pub use input::InputTag;
pub use menu::MenuTag;
pub use option::OptionTag;
pub use redirect::RedirectTag;
pub use registry::TagRegistry;
pub use response::ResponseTag;
pub use screen::ScreenTag;
pub use variable::VariableTag;

use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Where the cursor moves after a handler continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next node in document order, skipping this node's subtree.
    Next,
    /// The first child of the current node (or document order if none).
    Descend,
    /// A specific child of the current node, chosen by the subscriber.
    Child(usize),
    /// The node carrying the given `id` attribute, anywhere in the tree.
    Goto(String),
}

/// Result of handling one tag.
///
/// The explicit replacement for termination-by-exception: `Terminate` is a
/// regular value, distinguishable from real errors by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// Keep walking; the cursor moves as described.
    Continue(Advance),
    /// Suspend the session and send `prompt` to the subscriber.
    AwaitInput {
        /// Text to present while waiting.
        prompt: String,
    },
    /// End the session with a final message.
    Terminate {
        /// Final text sent to the subscriber.
        message: String,
        /// Termination code; `0` is a normal end.
        code: i32,
    },
}

/// Behavior bound to one tag name.
///
/// Handlers are stateless: everything they need arrives as the node being
/// visited and the session's variable store. They must not mutate the
/// node tree.
pub trait TagHandler: Send + Sync {
    /// Handle a visit to a node carrying this handler's tag.
    fn handle(&self, node: &Node, variables: &mut VariableStore) -> Result<TagOutcome>;

    /// Feed subscriber input to a tag that previously suspended.
    ///
    /// The default rejects input; only tags that return
    /// [`TagOutcome::AwaitInput`] from [`handle`](Self::handle) override
    /// this.
    fn resume(
        &self,
        node: &Node,
        variables: &mut VariableStore,
        input: &str,
    ) -> Result<TagOutcome> {
        let _ = (variables, input);
        Err(crate::error::UssdError::UnexpectedInput {
            tag: node.tag().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoInputTag;

    impl TagHandler for NoInputTag {
        fn handle(&self, _node: &Node, _variables: &mut VariableStore) -> Result<TagOutcome> {
            Ok(TagOutcome::Continue(Advance::Next))
        }
    }

    #[test]
    fn test_default_resume_rejects_input() {
        let node = Node::new("noop");
        let mut vars = VariableStore::new();

        let err = NoInputTag.resume(&node, &mut vars, "1").unwrap_err();
        match err {
            crate::UssdError::UnexpectedInput { tag } => assert_eq!(tag, "noop"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
