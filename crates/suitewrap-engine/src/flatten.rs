//! Flattens a nested wrapper chain into descriptors in hook order.

use std::sync::Arc;

use crate::hooks::HookDescriptor;
use crate::wrapper::WrapperElement;

/// Depth-first, left-to-right flattening of a wrapper chain.
///
/// The resulting order is the order in which before hooks fire; after
/// hooks fire in the reverse of it.
pub fn flatten(wrappers: &[WrapperElement]) -> Vec<Arc<HookDescriptor>> {
    let mut descriptors = Vec::new();
    flatten_into(wrappers, &mut descriptors);
    descriptors
}

fn flatten_into(wrappers: &[WrapperElement], out: &mut Vec<Arc<HookDescriptor>>) {
    for wrapper in wrappers {
        match wrapper {
            WrapperElement::Node(node) => flatten_into(node.wrappers(), out),
            WrapperElement::Descriptor(descriptor) => out.push(descriptor.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::Hooks;
    use crate::plugin::{FnPlugin, PluginArgs};
    use crate::registry::PluginRegistry;
    use crate::wrapper::WrapperNode;

    fn labels(wrappers: &[WrapperElement]) -> Vec<String> {
        flatten(wrappers)
            .iter()
            .map(|d| d.description.clone())
            .collect()
    }

    #[test]
    fn test_empty_chain() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_nested_nodes_flatten_depth_first() {
        let root = WrapperNode::root(std::sync::Arc::new(PluginRegistry::new()));
        let with_a = FnPlugin::new("withA", |node, _| Ok(node.extend("a", Some(Hooks::new()))?.into()));
        let with_b = FnPlugin::new("withB", |node, _| Ok(node.extend("b", Some(Hooks::new()))?.into()));

        let node = root
            .extend("first", Some(Hooks::new()))
            .unwrap()
            .use_plugin(&with_a, PluginArgs::new())
            .unwrap()
            .use_plugin(&with_b, PluginArgs::new())
            .unwrap()
            .extend("last", Some(Hooks::new()))
            .unwrap();

        assert_eq!(labels(node.wrappers()), vec!["first", "a", "b", "last"]);
    }

    #[test]
    fn test_shared_sub_node_appears_per_reference() {
        let root = WrapperNode::root(std::sync::Arc::new(PluginRegistry::new()));
        let shared = std::sync::Arc::new(root.extend("shared", Some(Hooks::new())).unwrap());
        let chain = vec![
            WrapperElement::Node(shared.clone()),
            WrapperElement::Node(shared),
        ];
        assert_eq!(labels(&chain), vec!["shared", "shared"]);
    }
}
