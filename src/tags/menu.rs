//! The `menu` tag: present numbered options and branch on the choice.

use super::{Advance, TagHandler, TagOutcome};
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Renders its `option` children as a numbered list (with an optional
/// `text` header) and suspends. On resume, a valid 1-based pick continues
/// into the chosen option; anything else re-prompts.
pub struct MenuTag;

impl MenuTag {
    /// Child indices of the menu's `option` children, in order.
    fn option_indices(node: &Node) -> Vec<usize> {
        node.children()
            .iter()
            .enumerate()
            .filter(|(_, child)| child.tag() == "option")
            .map(|(index, _)| index)
            .collect()
    }

    /// Build the prompt text shown to the subscriber.
    fn render_prompt(node: &Node) -> Result<String> {
        let mut lines = Vec::new();
        if let Some(header) = node.attribute("text") {
            lines.push(header.to_string());
        }
        for (position, index) in Self::option_indices(node).iter().enumerate() {
            let option = &node.children()[*index];
            let label = option.require_attribute("text")?;
            lines.push(format!("{}. {}", position + 1, label));
        }
        Ok(lines.join("\n"))
    }
}

impl TagHandler for MenuTag {
    fn handle(&self, node: &Node, _variables: &mut VariableStore) -> Result<TagOutcome> {
        Ok(TagOutcome::AwaitInput {
            prompt: Self::render_prompt(node)?,
        })
    }

    fn resume(
        &self,
        node: &Node,
        variables: &mut VariableStore,
        input: &str,
    ) -> Result<TagOutcome> {
        let options = Self::option_indices(node);
        let picked = input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| options.get(n).copied());

        match picked {
            Some(child_index) => Ok(TagOutcome::Continue(Advance::Child(child_index))),
            // A wrong pick is subscriber behavior, not a template defect
            None => self.handle(node, variables),
        }
    }
}
