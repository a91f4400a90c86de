//! Unmounting: destroy propagation and the remove handshake.

use super::Engine;
use crate::error::Result;
use crate::pipeline::{Phases, RemoveDone};
use crate::renderer::Backend;
use crate::vnode::VNode;

impl<B: Backend> Engine<B> {
    /// Remove `vnodes` from `parent`.
    ///
    /// Text leaves detach immediately. Everything else gets its destroy
    /// hooks, then a [`RemoveDone`] shared between every remove-phase module
    /// and the node's own remove hook; detachment waits for all of them.
    pub(crate) fn remove_vnodes<'a>(&self, parent: &B::Node, vnodes: impl IntoIterator<Item = &'a VNode<B>>) -> Result<()>
    where
        B: 'a,
    {
        for vnode in vnodes {
            let elm = vnode.handle()?;
            if vnode.sel.is_none() {
                self.backend.remove_child(parent, elm)?;
                continue;
            }

            self.invoke_destroy_hook(vnode)?;

            let listeners = self.modules.count(Phases::REMOVE) + 1;
            let done = RemoveDone::new(self.backend.clone(), elm.clone(), listeners);
            for module in self.modules.for_phase(Phases::REMOVE) {
                module.remove(&self.backend, vnode, done.clone())?;
            }
            match vnode.hooks().and_then(|h| h.remove.clone()) {
                Some(remove) => remove(vnode, done),
                None => done.done(),
            }
        }
        Ok(())
    }

    /// Depth-first destroy: the node's own hook, then modules, then children.
    ///
    /// Nodes without data (plain text) are skipped along with their subtree.
    fn invoke_destroy_hook(&self, vnode: &VNode<B>) -> Result<()> {
        if vnode.data.is_none() {
            return Ok(());
        }
        if let Some(destroy) = vnode.hooks().and_then(|h| h.destroy.clone()) {
            destroy(vnode);
        }
        for module in self.modules.for_phase(Phases::DESTROY) {
            module.destroy(&self.backend, vnode)?;
        }
        for child in vnode.child_nodes() {
            self.invoke_destroy_hook(child)?;
        }
        Ok(())
    }
}
