//! Event listeners module.
//!
//! Each element gets one backend listener, registered under every event name
//! in its `on` map and reused across patches. The listener looks the handler
//! up in the data of the node that last patched the element, so replacing a
//! handler never touches the backend.
//!
//! An element can leave the tree without being destroyed (text replacing its
//! parent's children, a detached root being replaced). Bindings of elements
//! that were not patched during a pass and no longer have a parent are
//! unregistered and dropped at the end of that pass.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use super::{data_of, same_data};
use crate::error::Result;
use crate::pipeline::{Module, Phases};
use crate::renderer::{EventApi, Listener};
use crate::types::On;
use crate::vnode::{VNode, VNodeData};

/// Shared listener of one element and the data it dispatches through.
struct Binding<B: EventApi> {
    listener: Listener<B>,
    current: Rc<RefCell<Option<Rc<VNodeData<B>>>>>,
}

impl<B: EventApi + 'static> Binding<B> {
    fn new() -> Self {
        let current: Rc<RefCell<Option<Rc<VNodeData<B>>>>> = Rc::new(RefCell::new(None));
        let data = current.clone();
        let listener: Listener<B> = Rc::new(move |name: &str, event: &B::Event| {
            // Release the borrow before the handler runs; it may patch again
            let handler = data.borrow().as_ref().and_then(|d| d.on.get(name).cloned());
            if let Some(handler) = handler {
                handler(event);
            }
        });
        Self { listener, current }
    }

    /// Unregister the listener under every event name it currently serves.
    fn unregister(&self, api: &B, elm: &B::Node) {
        let current = self.current.borrow();
        for name in current.iter().flat_map(|data| data.on.keys()) {
            api.remove_event_listener(elm, name, &self.listener);
        }
    }
}

pub struct EventListenersModule<B: EventApi> {
    bindings: RefCell<HashMap<B::Node, Binding<B>>>,
    /// Elements patched during the current pass.
    touched: RefCell<HashSet<B::Node>>,
}

impl<B: EventApi + 'static> EventListenersModule<B> {
    pub fn new() -> Self {
        Self {
            bindings: RefCell::new(HashMap::new()),
            touched: RefCell::new(HashSet::new()),
        }
    }

    /// Number of elements with a live listener.
    pub fn bound(&self) -> usize {
        self.bindings.borrow().len()
    }

    fn update_listeners(&self, api: &B, old: &VNode<B>, vnode: Option<&VNode<B>>) -> Result<()> {
        if let Some(elm) = vnode.and_then(VNode::elm) {
            self.touched.borrow_mut().insert(elm.clone());
        }
        if vnode.is_some_and(|vnode| same_data(old, vnode)) {
            return Ok(());
        }
        let none = On::<B>::new();
        let old_on = data_of(old).map_or(&none, |d| &d.on);
        let on = vnode.and_then(data_of).map(|d| &d.on).filter(|on| !on.is_empty());

        let mut bindings = self.bindings.borrow_mut();

        if let Some(old_elm) = old.elm() {
            if let Some(binding) = bindings.get(old_elm) {
                for name in old_on.keys() {
                    if on.is_none_or(|on| !on.contains_key(name)) {
                        api.remove_event_listener(old_elm, name, &binding.listener);
                    }
                }
            }
            if on.is_none() {
                bindings.remove(old_elm);
            }
        }

        let (Some(vnode), Some(on)) = (vnode, on) else {
            return Ok(());
        };
        let elm = vnode.handle()?;
        // A fresh binding has nothing registered yet, whatever `old` declared
        let fresh = !bindings.contains_key(elm);
        let binding = bindings.entry(elm.clone()).or_insert_with(Binding::new);
        *binding.current.borrow_mut() = vnode.data.clone();
        for name in on.keys() {
            if fresh || !old_on.contains_key(name) {
                api.add_event_listener(elm, name, binding.listener.clone());
            }
        }
        Ok(())
    }

    /// Drop bindings of elements that left the tree without a destroy.
    fn prune_detached(&self, api: &B) {
        let touched = self.touched.take();
        let mut bindings = self.bindings.borrow_mut();
        let stale: Vec<B::Node> = bindings
            .keys()
            .filter(|elm| !touched.contains(*elm) && api.parent_node(elm).is_none())
            .cloned()
            .collect();
        for elm in stale {
            if let Some(binding) = bindings.remove(&elm) {
                tracing::trace!(node = ?elm, "dropping listener of detached element");
                binding.unregister(api, &elm);
            }
        }
    }
}

impl<B: EventApi + 'static> Default for EventListenersModule<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: EventApi> fmt::Debug for EventListenersModule<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenersModule")
            .field("bound", &self.bindings.borrow().len())
            .finish()
    }
}

impl<B: EventApi + 'static> Module<B> for EventListenersModule<B> {
    fn phases(&self) -> Phases {
        Phases::PRE | Phases::CREATE | Phases::UPDATE | Phases::DESTROY | Phases::POST
    }

    fn pre(&self, _api: &Rc<B>) -> Result<()> {
        self.touched.borrow_mut().clear();
        Ok(())
    }

    fn create(&self, api: &Rc<B>, empty: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        self.update_listeners(api, empty, Some(vnode))
    }

    fn update(&self, api: &Rc<B>, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        self.update_listeners(api, old, Some(vnode))
    }

    fn destroy(&self, api: &Rc<B>, vnode: &VNode<B>) -> Result<()> {
        self.update_listeners(api, vnode, None)
    }

    fn post(&self, api: &Rc<B>) -> Result<()> {
        self.prune_detached(api);
        Ok(())
    }
}
