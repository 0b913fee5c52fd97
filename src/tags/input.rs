//! The `input` tag: collect free-form text from the subscriber.

use super::{Advance, TagHandler, TagOutcome};
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Prompts with its `text` attribute and stores the trimmed reply under
/// the variable named by `name`. An empty reply re-prompts.
pub struct InputTag;

impl TagHandler for InputTag {
    fn handle(&self, node: &Node, _variables: &mut VariableStore) -> Result<TagOutcome> {
        // name is validated up front so a broken template fails at the
        // prompt, not one request later
        node.require_attribute("name")?;
        let text = node.require_attribute("text")?;
        Ok(TagOutcome::AwaitInput {
            prompt: text.to_string(),
        })
    }

    fn resume(
        &self,
        node: &Node,
        variables: &mut VariableStore,
        input: &str,
    ) -> Result<TagOutcome> {
        let name = node.require_attribute("name")?;
        let reply = input.trim();
        if reply.is_empty() {
            return self.handle(node, variables);
        }
        variables.set(name, reply);
        Ok(TagOutcome::Continue(Advance::Next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UssdError;

    fn node() -> Node {
        Node::new("input").attr("text", "Enter your name:").attr("name", "name")
    }

    #[test]
    fn test_handle_prompts() {
        let mut vars = VariableStore::new();
        let outcome = InputTag.handle(&node(), &mut vars).unwrap();
        assert_eq!(
            outcome,
            TagOutcome::AwaitInput {
                prompt: "Enter your name:".to_string()
            }
        );
    }

    #[test]
    fn test_handle_missing_name() {
        let node = Node::new("input").attr("text", "Enter your name:");
        let mut vars = VariableStore::new();

        let err = InputTag.handle(&node, &mut vars).unwrap_err();
        assert!(matches!(
            err,
            UssdError::MissingAttribute { ref attribute, .. } if attribute == "name"
        ));
    }

    #[test]
    fn test_resume_stores_trimmed_reply() {
        let mut vars = VariableStore::new();
        let outcome = InputTag.resume(&node(), &mut vars, "  Amina  ").unwrap();
        assert_eq!(outcome, TagOutcome::Continue(Advance::Next));
        assert_eq!(vars.get("name"), Some("Amina"));
    }

    #[test]
    fn test_resume_empty_reply_reprompts() {
        let mut vars = VariableStore::new();
        let outcome = InputTag.resume(&node(), &mut vars, "   ").unwrap();
        assert_eq!(
            outcome,
            TagOutcome::AwaitInput {
                prompt: "Enter your name:".to_string()
            }
        );
        assert!(vars.is_empty());
    }
}
