//! Live tree → VNode.
//!
//! Bootstraps the first patch against content that already exists in the
//! backend (server-rendered markup, a previous engine's output). Every node
//! of the returned tree carries its handle, so patching it against an
//! equivalent description reuses the existing objects.

use std::rc::Rc;

use crate::engine::selector::compose_selector;
use crate::renderer::AttributeApi;
use crate::types::{AttrValue, Attrs};
use crate::vnode::{VNode, VNodeData, vnode};

/// Describe the live subtree rooted at `node`.
///
/// Elements get a `tag#id.class` selector and every other attribute as a
/// string entry in `attrs`. Text and comment nodes keep their content. Any
/// other node kind becomes an empty-selector node.
pub fn to_vnode<B: AttributeApi>(backend: &B, node: &B::Node) -> VNode<B> {
    if backend.is_element(node) {
        let id = backend.get_attribute(node, "id");
        let class = backend.get_attribute(node, "class");
        let sel = compose_selector(&backend.tag_name(node), id.as_deref(), class.as_deref());

        let attrs: Attrs = backend
            .attributes(node)
            .into_iter()
            .filter(|(name, _)| name != "id" && name != "class")
            .map(|(name, value)| (name, AttrValue::Str(value)))
            .collect();

        let mut children = Vec::new();
        let mut cursor = backend.first_child(node);
        while let Some(child) = cursor {
            children.push(to_vnode(backend, &child));
            cursor = backend.next_sibling(&child);
        }

        let data = VNodeData {
            attrs,
            ..Default::default()
        };
        vnode(
            Some(sel),
            Some(Rc::new(data)),
            Some(Rc::new(children)),
            None,
            Some(node.clone()),
        )
    } else if backend.is_text(node) {
        let text = backend.text_content(node).unwrap_or_default();
        vnode(None, None, None, Some(text), Some(node.clone()))
    } else if backend.is_comment(node) {
        let text = backend.text_content(node).unwrap_or_default();
        vnode(
            Some("!".into()),
            Some(Rc::new(VNodeData::default())),
            Some(Rc::new(Vec::new())),
            Some(text),
            Some(node.clone()),
        )
    } else {
        vnode(
            Some(String::new()),
            Some(Rc::new(VNodeData::default())),
            Some(Rc::new(Vec::new())),
            None,
            Some(node.clone()),
        )
    }
}
