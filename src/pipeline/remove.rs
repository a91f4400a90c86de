//! Shared removal completion.
//!
//! Removing an element can be delayed by any number of `remove` hooks (e.g.
//! to let a leave transition finish). The engine seeds one [`RemoveDone`]
//! with a count of `remove modules + 1` and hands a clone to every hook. The
//! native object is detached when the count reaches zero, exactly once.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::renderer::Backend;

struct Removal<B: Backend> {
    backend: Rc<B>,
    node: B::Node,
    pending: Cell<usize>,
}

/// Completion callback for a pending removal.
///
/// Each holder must call [`RemoveDone::done`] exactly once. Dropping a share
/// without calling it leaves the native object attached.
pub struct RemoveDone<B: Backend> {
    removal: Rc<Removal<B>>,
}

impl<B: Backend> RemoveDone<B> {
    /// Create a completion that detaches `node` after `listeners` calls.
    pub(crate) fn new(backend: Rc<B>, node: B::Node, listeners: usize) -> Self {
        Self {
            removal: Rc::new(Removal {
                backend,
                node,
                pending: Cell::new(listeners),
            }),
        }
    }

    /// Signal that one holder has finished.
    ///
    /// The parent is looked up at completion time, so a node moved while its
    /// removal was pending is detached from wherever it now lives.
    pub fn done(self) {
        let removal = &self.removal;
        let pending = removal.pending.get();
        if pending == 0 {
            tracing::warn!(node = ?removal.node, "removal completed more often than it has listeners");
            return;
        }
        removal.pending.set(pending - 1);
        if pending > 1 {
            return;
        }

        let Some(parent) = removal.backend.parent_node(&removal.node) else {
            tracing::trace!(node = ?removal.node, "removed node already detached");
            return;
        };
        if let Err(err) = removal.backend.remove_child(&parent, &removal.node) {
            tracing::error!(node = ?removal.node, %err, "failed to detach removed node");
        }
    }

    /// Number of holders that have not called [`done`](Self::done) yet.
    pub fn pending(&self) -> usize {
        self.removal.pending.get()
    }

    /// Handle of the node being removed.
    pub fn node(&self) -> &B::Node {
        &self.removal.node
    }
}

impl<B: Backend> Clone for RemoveDone<B> {
    fn clone(&self) -> Self {
        Self {
            removal: Rc::clone(&self.removal),
        }
    }
}

impl<B: Backend> fmt::Debug for RemoveDone<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoveDone")
            .field("node", &self.removal.node)
            .field("pending", &self.removal.pending.get())
            .finish()
    }
}
