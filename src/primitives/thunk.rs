//! Thunks - memoized subtrees.
//!
//! A thunk defers rendering to mount time and, on later passes, skips the
//! whole subtree when its render function and arguments are unchanged. It is
//! plain lifecycle hooks: `init` renders, `prepatch` either reuses the old
//! rendered node (same data and children allocations, so the engine's
//! referential fast path skips it) or renders again.

use std::rc::Rc;

use crate::renderer::Backend;
use crate::types::Key;
use crate::vnode::{VNode, VNodeData, vnode};

/// Extension slot holding the render function and its arguments.
pub const THUNK_EXTENSION: &str = "thunk";

struct Thunk<B: Backend, A> {
    render: fn(&A) -> VNode<B>,
    args: A,
}

/// A subtree rendered by `render(&args)` and memoized on `args`.
///
/// `sel` must match the selector of the node `render` returns.
pub fn thunk<B, A>(sel: impl Into<String>, key: impl Into<Key>, render: fn(&A) -> VNode<B>, args: A) -> VNode<B>
where
    B: Backend + 'static,
    A: PartialEq + 'static,
{
    let mut data = VNodeData {
        key: Some(key.into()),
        ..Default::default()
    };
    data.extensions
        .insert(THUNK_EXTENSION.into(), Rc::new(Thunk { render, args }));
    data.hook.init = Some(Rc::new(init::<B, A>));
    data.hook.prepatch = Some(Rc::new(prepatch::<B, A>));
    vnode(Some(sel.into()), Some(Rc::new(data)), None, None, None)
}

fn payload_of<B, A>(node: &VNode<B>) -> Option<Rc<Thunk<B, A>>>
where
    B: Backend + 'static,
    A: 'static,
{
    node.data.as_deref()?.extension_rc::<Thunk<B, A>>(THUNK_EXTENSION)
}

fn init<B, A>(node: &mut VNode<B>)
where
    B: Backend + 'static,
    A: PartialEq + 'static,
{
    if let Some(payload) = payload_of::<B, A>(node) {
        let rendered = (payload.render)(&payload.args);
        copy_to_thunk(rendered, payload, node);
    }
}

fn prepatch<B, A>(old: &VNode<B>, node: &mut VNode<B>)
where
    B: Backend + 'static,
    A: PartialEq + 'static,
{
    let Some(current) = payload_of::<B, A>(node) else {
        return;
    };
    let unchanged = payload_of::<B, A>(old).is_some_and(|previous| {
        std::ptr::fn_addr_eq(previous.render, current.render) && previous.args == current.args
    });

    if unchanged {
        node.data = old.data.clone();
        node.children = old.children.clone();
        node.text = old.text.clone();
    } else {
        let rendered = (current.render)(&current.args);
        copy_to_thunk(rendered, current, node);
    }
}

/// Move the rendered node's contents into the thunk node, keeping the thunk
/// payload reachable for the next comparison.
fn copy_to_thunk<B, A>(rendered: VNode<B>, payload: Rc<Thunk<B, A>>, node: &mut VNode<B>)
where
    B: Backend + 'static,
    A: 'static,
{
    let mut data = rendered.data.map(Rc::unwrap_or_clone).unwrap_or_default();
    data.extensions.insert(THUNK_EXTENSION.into(), payload);
    node.data = Some(Rc::new(data));
    node.children = rendered.children;
    node.text = rendered.text;
}
