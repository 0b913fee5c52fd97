//! Tag-name dispatch.

use std::collections::HashMap;

use super::{
    InputTag, MenuTag, OptionTag, RedirectTag, ResponseTag, ScreenTag, TagHandler, TagOutcome,
    VariableTag,
};
use crate::error::UssdError;
use crate::node::Node;
use crate::session::VariableStore;
use crate::Result;

/// Registry mapping tag names to their handlers.
///
/// Populated once at startup. Lookup is by exact tag name; there is no
/// fallback handler, so a template using an unregistered tag fails with
/// [`UssdError::UnknownTag`].
pub struct TagRegistry {
    handlers: HashMap<String, Box<dyn TagHandler>>,
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in tag family registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("response", Box::new(ResponseTag));
        registry.register("screen", Box::new(ScreenTag));
        registry.register("menu", Box::new(MenuTag));
        registry.register("option", Box::new(OptionTag));
        registry.register("input", Box::new(InputTag));
        registry.register("variable", Box::new(VariableTag));
        registry.register("redirect", Box::new(RedirectTag));
        registry
    }

    /// Register a handler for a tag name, replacing any existing one.
    pub fn register(&mut self, tag: impl Into<String>, handler: Box<dyn TagHandler>) {
        self.handlers.insert(tag.into(), handler);
    }

    /// Check whether a tag name has a handler.
    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Registered tag names.
    pub fn tag_names(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    fn get(&self, tag: &str) -> Result<&dyn TagHandler> {
        self.handlers
            .get(tag)
            .map(|h| h.as_ref())
            .ok_or_else(|| UssdError::UnknownTag {
                tag: tag.to_string(),
            })
    }

    /// Resolve the node's tag to its handler and invoke it.
    pub fn dispatch(&self, node: &Node, variables: &mut VariableStore) -> Result<TagOutcome> {
        self.get(node.tag())?.handle(node, variables)
    }

    /// Resolve the node's tag to its handler and feed it subscriber input.
    pub fn resume(
        &self,
        node: &Node,
        variables: &mut VariableStore,
        input: &str,
    ) -> Result<TagOutcome> {
        self.get(node.tag())?.resume(node, variables, input)
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
