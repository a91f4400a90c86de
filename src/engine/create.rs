//! Mounting: VNode → native objects.

use std::rc::Rc;

use super::selector::parse_selector;
use super::{Engine, InsertQueue};
use crate::error::Result;
use crate::pipeline::Phases;
use crate::renderer::Backend;
use crate::vnode::VNode;

enum Kind {
    Comment,
    Text,
    Element,
}

impl<B: Backend> Engine<B> {
    /// Create the native subtree for `vnode`, recording handles on it.
    ///
    /// Text and comment leaves bypass the module pipeline.
    pub(crate) fn create_elm(&self, vnode: &mut VNode<B>, queue: &mut InsertQueue<B>) -> Result<B::Node> {
        if let Some(init) = vnode.hooks().and_then(|h| h.init.clone()) {
            init(vnode);
        }

        let api = &self.backend;
        let kind = match vnode.sel.as_deref() {
            Some("!") => Kind::Comment,
            None => Kind::Text,
            Some(_) => Kind::Element,
        };

        let elm = match kind {
            Kind::Comment => {
                let text = vnode.text.get_or_insert_with(String::new);
                let elm = api.create_comment(text)?;
                vnode.elm = Some(elm.clone());
                elm
            }
            Kind::Text => {
                let elm = api.create_text_node(vnode.text.as_deref().unwrap_or_default())?;
                vnode.elm = Some(elm.clone());
                elm
            }
            Kind::Element => {
                let elm = self.create_element(vnode)?;
                vnode.elm = Some(elm.clone());

                for module in self.modules.for_phase(Phases::CREATE) {
                    module.create(api, &self.empty, vnode)?;
                }

                if let Some(children) = vnode.children.as_mut() {
                    for child in Rc::make_mut(children).iter_mut() {
                        let child_elm = self.create_elm(child, queue)?;
                        api.append_child(&elm, &child_elm)?;
                    }
                } else if let Some(text) = &vnode.text {
                    let text_elm = api.create_text_node(text)?;
                    api.append_child(&elm, &text_elm)?;
                }

                let (create, insert) = vnode
                    .hooks()
                    .map(|h| (h.create.clone(), h.insert.clone()))
                    .unwrap_or_default();
                if let Some(create) = create {
                    create(&self.empty, vnode);
                }
                if let Some(insert) = insert {
                    queue.push((insert, vnode.clone()));
                }
                elm
            }
        };

        Ok(elm)
    }

    /// Create the bare element for a selector and apply its id and classes.
    fn create_element(&self, vnode: &VNode<B>) -> Result<B::Node> {
        let api = &self.backend;
        let selector = parse_selector(vnode.sel.as_deref().unwrap_or_default());
        let ns = vnode.data.as_deref().and_then(|d| d.ns.as_deref());

        let elm = match ns {
            Some(ns) => api.create_element_ns(ns, selector.tag)?,
            None => api.create_element(selector.tag)?,
        };
        if let Some(id) = selector.id {
            api.set_attribute(&elm, "id", id)?;
        }
        if let Some(class) = &selector.class {
            api.set_attribute(&elm, "class", class)?;
        }
        Ok(elm)
    }

    /// Mount `vnodes` and insert each before `before` (or at the end).
    pub(crate) fn add_vnodes(
        &self,
        parent: &B::Node,
        before: Option<&B::Node>,
        vnodes: &mut [VNode<B>],
        queue: &mut InsertQueue<B>,
    ) -> Result<()> {
        for vnode in vnodes {
            let elm = self.create_elm(vnode, queue)?;
            self.backend.insert_before(parent, &elm, before)?;
        }
        Ok(())
    }
}
