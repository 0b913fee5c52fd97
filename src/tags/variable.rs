//! The `variable` tag: assign a session variable and keep walking.

use super::{Advance, TagHandler, TagOutcome};
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Writes `name` = `value` into the session's variable store.
pub struct VariableTag;

impl TagHandler for VariableTag {
    fn handle(&self, node: &Node, variables: &mut VariableStore) -> Result<TagOutcome> {
        let name = node.require_attribute("name")?;
        let value = node.require_attribute("value")?;
        variables.set(name, value);
        Ok(TagOutcome::Continue(Advance::Next))
    }
}
