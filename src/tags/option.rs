//! The `option` tag: one branch under a `menu`.

use super::{Advance, TagHandler, TagOutcome};
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Reached only through a menu selection. Jumps to a named screen when a
/// `goto` attribute is present, otherwise continues into its children.
pub struct OptionTag;

impl TagHandler for OptionTag {
    fn handle(&self, node: &Node, _variables: &mut VariableStore) -> Result<TagOutcome> {
        if let Some(target) = node.attribute("goto") {
            return Ok(TagOutcome::Continue(Advance::Goto(target.to_string())));
        }
        Ok(TagOutcome::Continue(Advance::Descend))
    }
}
