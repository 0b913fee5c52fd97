//! The `response` tag: terminate the session with a final message.

use super::{TagHandler, TagOutcome};
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Terminal tag. Ends the session with the literal `text` attribute and a
/// code of `0`; the variable store is never consulted.
pub struct ResponseTag;

impl TagHandler for ResponseTag {
    fn handle(&self, node: &Node, _variables: &mut VariableStore) -> Result<TagOutcome> {
        let text = node.require_attribute("text")?;
        Ok(TagOutcome::Terminate {
            message: text.to_string(),
            code: 0,
        })
    }
}
