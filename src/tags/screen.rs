//! The `screen` tag: a sequence container.

use super::{Advance, TagHandler, TagOutcome};
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Groups a sequence of steps, typically as the template root or a
/// redirect target (via an `id` attribute). Continues into its children.
pub struct ScreenTag;

impl TagHandler for ScreenTag {
    fn handle(&self, _node: &Node, _variables: &mut VariableStore) -> Result<TagOutcome> {
        Ok(TagOutcome::Continue(Advance::Descend))
    }
}
