//! Per-node lifecycle hooks.
//!
//! Hooks are supplied by the caller on a node's [`VNodeData`](crate::VNodeData)
//! and control that node's own mount/update/removal behavior, independently of
//! the registered modules. Each phase is an optional field; there is no
//! string-keyed dispatch.
//!
//! | hook        | fires                                                       |
//! |-------------|-------------------------------------------------------------|
//! | `init`      | before the node is mounted; may replace its data            |
//! | `create`    | after its element and children exist                        |
//! | `insert`    | after the whole patched tree is attached                    |
//! | `prepatch`  | before the node is patched; may rewrite the new node        |
//! | `update`    | after module `update` hooks                                 |
//! | `postpatch` | after the node and its children are patched                 |
//! | `destroy`   | when the node or an ancestor is removed                     |
//! | `remove`    | when the node itself is removed; owns the final completion  |

use std::fmt;
use std::rc::Rc;

use crate::pipeline::RemoveDone;
use crate::renderer::Backend;
use crate::vnode::VNode;

/// `init(vnode)`.
pub type InitHook<B> = Rc<dyn Fn(&mut VNode<B>)>;

/// `create(empty, vnode)`.
pub type CreateHook<B> = Rc<dyn Fn(&VNode<B>, &VNode<B>)>;

/// `insert(vnode)`.
pub type InsertHook<B> = Rc<dyn Fn(&VNode<B>)>;

/// `prepatch(old, new)`.
pub type PrepatchHook<B> = Rc<dyn Fn(&VNode<B>, &mut VNode<B>)>;

/// `update(old, new)` and `postpatch(old, new)`.
pub type UpdateHook<B> = Rc<dyn Fn(&VNode<B>, &VNode<B>)>;

/// `destroy(vnode)`.
pub type DestroyHook<B> = Rc<dyn Fn(&VNode<B>)>;

/// `remove(vnode, done)`.
pub type RemoveHook<B> = Rc<dyn Fn(&VNode<B>, RemoveDone<B>)>;

/// Lifecycle hooks of one node.
pub struct Hooks<B: Backend> {
    pub init: Option<InitHook<B>>,
    pub create: Option<CreateHook<B>>,
    pub insert: Option<InsertHook<B>>,
    pub prepatch: Option<PrepatchHook<B>>,
    pub update: Option<UpdateHook<B>>,
    pub postpatch: Option<UpdateHook<B>>,
    pub destroy: Option<DestroyHook<B>>,
    pub remove: Option<RemoveHook<B>>,
}

impl<B: Backend> Default for Hooks<B> {
    fn default() -> Self {
        Self {
            init: None,
            create: None,
            insert: None,
            prepatch: None,
            update: None,
            postpatch: None,
            destroy: None,
            remove: None,
        }
    }
}

impl<B: Backend> Clone for Hooks<B> {
    fn clone(&self) -> Self {
        Self {
            init: self.init.clone(),
            create: self.create.clone(),
            insert: self.insert.clone(),
            prepatch: self.prepatch.clone(),
            update: self.update.clone(),
            postpatch: self.postpatch.clone(),
            destroy: self.destroy.clone(),
            remove: self.remove.clone(),
        }
    }
}

impl<B: Backend> fmt::Debug for Hooks<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set: Vec<&str> = [
            ("init", self.init.is_some()),
            ("create", self.create.is_some()),
            ("insert", self.insert.is_some()),
            ("prepatch", self.prepatch.is_some()),
            ("update", self.update.is_some()),
            ("postpatch", self.postpatch.is_some()),
            ("destroy", self.destroy.is_some()),
            ("remove", self.remove.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect();
        f.debug_tuple("Hooks").field(&set).finish()
    }
}
