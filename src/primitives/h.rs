//! h - terse VNode tree construction.
//!
//! # Example
//!
//! ```ignore
//! use spark_vdom::{h, text};
//!
//! let list = h("ul#todo.compact")
//!     .attr("role", "list")
//!     .children(items.iter().map(|item| {
//!         h("li")
//!             .key(item.id)
//!             .class("done", item.done)
//!             .on("click", move |_| toggle(item.id))
//!             .text(&item.title)
//!     }))
//!     .build();
//! ```
//!
//! # SVG
//!
//! A root selector of `svg`, `svg.x` or `svg#x` puts the SVG namespace on the
//! root and on every descendant that has data, except below `foreignObject`.

use std::any::Any;
use std::rc::Rc;

use crate::hooks::RemoveHook;
use crate::pipeline::RemoveDone;
use crate::renderer::Backend;
use crate::types::{AttrValue, Key};
use crate::vnode::{VNode, VNodeData, vnode};

/// Namespace applied to `svg` subtrees.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Start building an element node.
pub fn h<B: Backend>(sel: impl Into<String>) -> VNodeBuilder<B> {
    VNodeBuilder {
        sel: sel.into(),
        data: VNodeData::default(),
        children: None,
        text: None,
    }
}

/// A text leaf.
pub fn text<B: Backend>(content: impl Into<String>) -> VNode<B> {
    vnode(None, None, None, Some(content.into()), None)
}

/// A comment leaf.
pub fn comment<B: Backend>(content: impl Into<String>) -> VNode<B> {
    vnode(
        Some("!".into()),
        Some(Rc::new(VNodeData::default())),
        None,
        Some(content.into()),
        None,
    )
}

impl<B: Backend> From<&str> for VNode<B> {
    fn from(value: &str) -> Self {
        text(value)
    }
}

impl<B: Backend> From<String> for VNode<B> {
    fn from(value: String) -> Self {
        text(value)
    }
}

impl<B: Backend> From<VNodeBuilder<B>> for VNode<B> {
    fn from(builder: VNodeBuilder<B>) -> Self {
        builder.build()
    }
}

/// Builder returned by [`h`].
pub struct VNodeBuilder<B: Backend> {
    sel: String,
    data: VNodeData<B>,
    children: Option<Vec<VNode<B>>>,
    text: Option<String>,
}

impl<B: Backend> VNodeBuilder<B> {
    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.data.key = Some(key.into());
        self
    }

    pub fn ns(mut self, namespace: impl Into<String>) -> Self {
        self.data.ns = Some(namespace.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.data.attrs.insert(name.into(), value.into());
        self
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.data.props.insert(name.into(), value.into());
        self
    }

    pub fn class(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.data.class.insert(name.into(), enabled);
        self
    }

    pub fn style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.style.props.insert(name.into(), value.into());
        self
    }

    pub fn delayed_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.style.delayed.insert(name.into(), value.into());
        self
    }

    pub fn remove_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.style.remove.insert(name.into(), value.into());
        self
    }

    pub fn destroy_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.style.destroy.insert(name.into(), value.into());
        self
    }

    /// `data-*` entry; `key` is camelCase (`userId` → `data-user-id`).
    pub fn data_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.dataset.insert(key.into(), value.into());
        self
    }

    pub fn on(mut self, event: impl Into<String>, handler: impl Fn(&B::Event) + 'static) -> Self {
        self.data.on.insert(event.into(), Rc::new(handler));
        self
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    pub fn hook_init(mut self, hook: impl Fn(&mut VNode<B>) + 'static) -> Self {
        self.data.hook.init = Some(Rc::new(hook));
        self
    }

    pub fn hook_create(mut self, hook: impl Fn(&VNode<B>, &VNode<B>) + 'static) -> Self {
        self.data.hook.create = Some(Rc::new(hook));
        self
    }

    pub fn hook_insert(mut self, hook: impl Fn(&VNode<B>) + 'static) -> Self {
        self.data.hook.insert = Some(Rc::new(hook));
        self
    }

    pub fn hook_prepatch(mut self, hook: impl Fn(&VNode<B>, &mut VNode<B>) + 'static) -> Self {
        self.data.hook.prepatch = Some(Rc::new(hook));
        self
    }

    pub fn hook_update(mut self, hook: impl Fn(&VNode<B>, &VNode<B>) + 'static) -> Self {
        self.data.hook.update = Some(Rc::new(hook));
        self
    }

    pub fn hook_postpatch(mut self, hook: impl Fn(&VNode<B>, &VNode<B>) + 'static) -> Self {
        self.data.hook.postpatch = Some(Rc::new(hook));
        self
    }

    pub fn hook_destroy(mut self, hook: impl Fn(&VNode<B>) + 'static) -> Self {
        self.data.hook.destroy = Some(Rc::new(hook));
        self
    }

    /// The hook receives the last share of the removal; it must call
    /// [`RemoveDone::done`] for the node to be detached.
    pub fn hook_remove(mut self, hook: impl Fn(&VNode<B>, RemoveDone<B>) + 'static) -> Self {
        let hook: RemoveHook<B> = Rc::new(hook);
        self.data.hook.remove = Some(hook);
        self
    }

    /// Payload for a third-party module.
    pub fn extension<T: Any>(mut self, name: impl Into<String>, value: T) -> Self {
        self.data.extensions.insert(name.into(), Rc::new(value));
        self
    }

    // =========================================================================
    // Contents
    // =========================================================================

    pub fn child(mut self, child: impl Into<VNode<B>>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode<B>>,
    {
        self.children
            .get_or_insert_with(Vec::new)
            .extend(children.into_iter().map(Into::into));
        self
    }

    /// Text content. Takes precedence over children when both are set.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.text = Some(content.into());
        self
    }

    pub fn build(self) -> VNode<B> {
        let Self {
            sel,
            mut data,
            mut children,
            text,
        } = self;
        if is_svg(&sel) {
            add_ns(&mut data, children.as_mut(), &sel);
        }
        vnode(Some(sel), Some(Rc::new(data)), children.map(Rc::new), text, None)
    }
}

fn is_svg(sel: &str) -> bool {
    sel.starts_with("svg") && matches!(sel.as_bytes().get(3), None | Some(b'.') | Some(b'#'))
}

fn add_ns<B: Backend>(data: &mut VNodeData<B>, children: Option<&mut Vec<VNode<B>>>, sel: &str) {
    data.ns = Some(SVG_NAMESPACE.to_string());
    if sel == "foreignObject" {
        return;
    }
    let Some(children) = children else {
        return;
    };
    for child in children.iter_mut() {
        let VNode {
            sel, data, children, ..
        } = child;
        // Text leaves carry no data
        if let Some(data) = data {
            add_ns(
                Rc::make_mut(data),
                children.as_mut().map(Rc::make_mut),
                sel.as_deref().unwrap_or_default(),
            );
        }
    }
}
