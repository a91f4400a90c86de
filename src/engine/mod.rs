//! Reconciliation Engine - mount, patch and destroy over whole trees.
//!
//! [`Engine`] owns the backend handle, the immutable module pipeline and the
//! canonical empty node. A pass looks like this:
//!
//! ```text
//! pre hooks
//!   same_node(old, new) ── yes ──> patch_vnode(old, new) ──> update_children (keyed differ)
//!                       └─ no ───> create_elm(new), insert after old, remove_vnodes(old)
//! insert hooks (queued during mounting, flushed once the tree is attached)
//! post hooks
//! ```
//!
//! # Example
//!
//! ```ignore
//! let engine = Engine::new(backend.clone(), vec![
//!     Box::new(ClassModule),
//!     Box::new(AttributesModule),
//! ]);
//!
//! let tree = engine.patch_element(&host, h("ul").children(items()).build())?;
//! // ...next pass
//! let tree = engine.patch(tree, h("ul").children(items()).build())?;
//! ```

mod config;
mod create;
mod diff;
mod patch;
mod remove;
pub(crate) mod selector;


use std::rc::Rc;

use crate::error::Result;
use crate::hooks::InsertHook;
use crate::pipeline::{Module, ModuleSet, Phases};
use crate::renderer::Backend;
use crate::vnode::{VNode, VNodeData, same_node, vnode};

pub use config::Config;

/// Nodes whose `insert` hook runs once the whole tree is attached.
pub(crate) type InsertQueue<B> = Vec<(InsertHook<B>, VNode<B>)>;

/// The reconciliation engine.
pub struct Engine<B: Backend> {
    backend: Rc<B>,
    modules: ModuleSet<B>,
    config: Config,
    /// Canonical "old" node handed to `create` hooks.
    empty: VNode<B>,
}

impl<B: Backend> Engine<B> {
    /// Build an engine with the default [`Config`].
    pub fn new(backend: Rc<B>, modules: Vec<Box<dyn Module<B>>>) -> Self {
        Self::with_config(backend, modules, Config::default())
    }

    pub fn with_config(backend: Rc<B>, modules: Vec<Box<dyn Module<B>>>, config: Config) -> Self {
        let empty = vnode(
            Some(String::new()),
            Some(Rc::new(VNodeData::default())),
            Some(Rc::new(Vec::new())),
            None,
            None,
        );
        Self {
            backend,
            modules: ModuleSet::new(modules),
            config,
            empty,
        }
    }

    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    pub fn modules(&self) -> &ModuleSet<B> {
        &self.modules
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reconcile `old` (the tree returned by the previous pass) with `new`.
    ///
    /// Returns `new` with every handle filled in; keep it as the next `old`.
    /// When the roots are not [`same_node`], `new` is mounted next to `old`'s
    /// native object and `old` is removed. A root without a parent is mounted
    /// but left unattached.
    pub fn patch(&self, old: VNode<B>, mut new: VNode<B>) -> Result<VNode<B>> {
        let span = tracing::debug_span!("patch", sel = ?new.sel);
        let _enter = span.enter();

        let mut queue = InsertQueue::new();

        for module in self.modules.for_phase(Phases::PRE) {
            module.pre(&self.backend)?;
        }

        if same_node(&old, &new) {
            self.patch_vnode(&old, &mut new, &mut queue)?;
        } else {
            let elm = old.handle()?;
            let parent = self.backend.parent_node(elm);
            tracing::trace!(old = ?old.sel, new = ?new.sel, "replacing root");

            let created = self.create_elm(&mut new, &mut queue)?;
            if let Some(parent) = parent {
                let next = self.backend.next_sibling(elm);
                self.backend.insert_before(&parent, &created, next.as_ref())?;
                self.remove_vnodes(&parent, [&old])?;
            }
        }

        tracing::trace!(count = queue.len(), "flushing insert hooks");
        for (insert, vnode) in &queue {
            insert(vnode);
        }

        for module in self.modules.for_phase(Phases::POST) {
            module.post(&self.backend)?;
        }

        Ok(new)
    }

    /// Reconcile a raw native element with `new`.
    ///
    /// The element is wrapped in a childless node whose selector is rebuilt
    /// from its tag, id and classes, so identity comparison behaves as it
    /// would against an engine-built tree.
    pub fn patch_element(&self, root: &B::Node, new: VNode<B>) -> Result<VNode<B>> {
        let old = self.empty_node_at(root);
        self.patch(old, new)
    }

    fn empty_node_at(&self, elm: &B::Node) -> VNode<B> {
        let id = self.backend.get_attribute(elm, "id");
        let class = self.backend.get_attribute(elm, "class");
        let sel = selector::compose_selector(&self.backend.tag_name(elm), id.as_deref(), class.as_deref());
        vnode(
            Some(sel),
            Some(Rc::new(VNodeData::default())),
            Some(Rc::new(Vec::new())),
            None,
            Some(elm.clone()),
        )
    }
}
