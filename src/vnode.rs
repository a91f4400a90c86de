//! VNode Model - the description of one render-tree node.
//!
//! A [`VNode`] is a plain value: selector, data bag, children or text, key,
//! and the handle of the live backend object once the engine has mounted it.
//! Callers build a fresh tree every pass; the engine fills in handles on that
//! new tree and the previous tree is consumed.
//!
//! # Identity
//!
//! [`same_node`] is the only identity oracle. It compares key and selector and
//! nothing else, so it decides reuse versus replacement for a whole subtree
//! without looking inside it.
//!
//! [`VNode::ptr_eq`] is the referential fast path: two nodes sharing the same
//! data and children allocations describe the identical tree and can be
//! skipped entirely.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::hooks::Hooks;
use crate::renderer::Backend;
use crate::types::{Attrs, Classes, Dataset, Key, On, Props, VNodeStyle};

/// Shared, ordered child list.
///
/// Sharing makes list identity observable: the engine skips the keyed differ
/// when old and new point at the same list.
pub type Children<B> = Rc<Vec<VNode<B>>>;

// =============================================================================
// VNodeData
// =============================================================================

/// Attribute and configuration bag of a node.
///
/// The engine itself reads only `key`, `ns` and `hook`; every other field
/// belongs to a module.
pub struct VNodeData<B: Backend> {
    pub key: Option<Key>,
    /// Markup namespace for element creation.
    pub ns: Option<String>,
    pub hook: Hooks<B>,
    pub attrs: Attrs,
    pub props: Props,
    pub class: Classes,
    pub style: VNodeStyle,
    pub dataset: Dataset,
    pub on: On<B>,
    /// Payloads for third-party modules, by name.
    pub extensions: HashMap<String, Rc<dyn Any>>,
}

impl<B: Backend> VNodeData<B> {
    /// Borrow a typed extension payload.
    pub fn extension<T: Any>(&self, name: &str) -> Option<&T> {
        self.extensions.get(name)?.downcast_ref::<T>()
    }

    /// Clone out a typed extension payload.
    pub fn extension_rc<T: Any>(&self, name: &str) -> Option<Rc<T>> {
        self.extensions.get(name)?.clone().downcast::<T>().ok()
    }
}

impl<B: Backend> Default for VNodeData<B> {
    fn default() -> Self {
        Self {
            key: None,
            ns: None,
            hook: Hooks::default(),
            attrs: Attrs::new(),
            props: Props::new(),
            class: Classes::new(),
            style: VNodeStyle::default(),
            dataset: Dataset::new(),
            on: On::<B>::new(),
            extensions: HashMap::new(),
        }
    }
}

impl<B: Backend> Clone for VNodeData<B> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            ns: self.ns.clone(),
            hook: self.hook.clone(),
            attrs: self.attrs.clone(),
            props: self.props.clone(),
            class: self.class.clone(),
            style: self.style.clone(),
            dataset: self.dataset.clone(),
            on: self.on.clone(),
            extensions: self.extensions.clone(),
        }
    }
}

impl<B: Backend> fmt::Debug for VNodeData<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<&String> = self.on.keys().collect();
        events.sort();
        let mut extensions: Vec<&String> = self.extensions.keys().collect();
        extensions.sort();
        f.debug_struct("VNodeData")
            .field("key", &self.key)
            .field("ns", &self.ns)
            .field("hook", &self.hook)
            .field("attrs", &self.attrs)
            .field("props", &self.props)
            .field("class", &self.class)
            .field("style", &self.style)
            .field("dataset", &self.dataset)
            .field("on", &events)
            .field("extensions", &extensions)
            .finish()
    }
}

// =============================================================================
// VNode
// =============================================================================

/// One node of a render-tree description.
pub struct VNode<B: Backend> {
    /// `tag#id.class` for elements, `"!"` for comments, `None` for text.
    pub sel: Option<String>,
    pub data: Option<Rc<VNodeData<B>>>,
    pub children: Option<Children<B>>,
    pub text: Option<String>,
    pub key: Option<Key>,
    /// Written by the engine only.
    pub(crate) elm: Option<B::Node>,
}

/// Construct a node; `key` is taken from `data.key`.
///
/// No structural validation happens here: keeping `children` and `text`
/// exclusive is up to the caller.
pub fn vnode<B: Backend>(
    sel: Option<String>,
    data: Option<Rc<VNodeData<B>>>,
    children: Option<Children<B>>,
    text: Option<String>,
    elm: Option<B::Node>,
) -> VNode<B> {
    let key = data.as_ref().and_then(|d| d.key.clone());
    VNode {
        sel,
        data,
        children,
        text,
        key,
        elm,
    }
}

/// Shallow identity: same key and same selector.
pub fn same_node<B: Backend>(a: &VNode<B>, b: &VNode<B>) -> bool {
    a.key == b.key && a.sel == b.sel
}

impl<B: Backend> VNode<B> {
    /// Live backend object, once mounted.
    pub fn elm(&self) -> Option<&B::Node> {
        self.elm.as_ref()
    }

    /// Live backend object, or [`Error::Unmounted`].
    pub(crate) fn handle(&self) -> Result<&B::Node> {
        self.elm.as_ref().ok_or_else(|| Error::Unmounted {
            sel: self.sel.clone().unwrap_or_default(),
        })
    }

    /// Lifecycle hooks, if the node has data.
    pub fn hooks(&self) -> Option<&Hooks<B>> {
        self.data.as_deref().map(|data| &data.hook)
    }

    /// Children as a slice (empty when unset).
    pub fn child_nodes(&self) -> &[VNode<B>] {
        self.children.as_deref().map_or(&[], Vec::as_slice)
    }

    pub fn is_text(&self) -> bool {
        self.sel.is_none()
    }

    pub fn is_comment(&self) -> bool {
        self.sel.as_deref() == Some("!")
    }

    /// True when both nodes describe the identical tree: same selector, key
    /// and text, and the very same data and children allocations.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        let data_eq = match (&self.data, &other.data) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        let children_eq = match (&self.children, &other.children) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        data_eq && children_eq && same_node(self, other) && self.text == other.text
    }
}

impl<B: Backend> Clone for VNode<B> {
    fn clone(&self) -> Self {
        Self {
            sel: self.sel.clone(),
            data: self.data.clone(),
            children: self.children.clone(),
            text: self.text.clone(),
            key: self.key.clone(),
            elm: self.elm.clone(),
        }
    }
}

impl<B: Backend> fmt::Debug for VNode<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNode")
            .field("sel", &self.sel)
            .field("key", &self.key)
            .field("text", &self.text)
            .field("children", &self.children)
            .field("elm", &self.elm)
            .finish_non_exhaustive()
    }
}
