//! The `redirect` tag: jump to a named screen.

use super::{Advance, TagHandler, TagOutcome};
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Continues at the node whose `id` attribute matches this tag's `to`
/// attribute. Resolution happens in the interpreter, which owns the tree.
pub struct RedirectTag;

impl TagHandler for RedirectTag {
    fn handle(&self, node: &Node, _variables: &mut VariableStore) -> Result<TagOutcome> {
        let target = node.require_attribute("to")?;
        Ok(TagOutcome::Continue(Advance::Goto(target.to_string())))
    }
}
