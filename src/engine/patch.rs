//! Patching one reused node.

use std::rc::Rc;

use super::{Engine, InsertQueue};
use crate::error::Result;
use crate::pipeline::Phases;
use crate::renderer::Backend;
use crate::vnode::VNode;

impl<B: Backend> Engine<B> {
    /// Patch `new` against `old`, which must satisfy `same_node(old, new)`.
    ///
    /// The native object is always reused: its handle moves from `old` to
    /// `new` before anything else can look at it.
    pub(crate) fn patch_vnode(&self, old: &VNode<B>, new: &mut VNode<B>, queue: &mut InsertQueue<B>) -> Result<()> {
        if let Some(prepatch) = new.hooks().and_then(|h| h.prepatch.clone()) {
            prepatch(old, new);
        }

        let elm = old.handle()?.clone();
        new.elm = Some(elm.clone());
        if old.ptr_eq(new) {
            return Ok(());
        }

        if new.data.is_some() {
            for module in self.modules.for_phase(Phases::UPDATE) {
                module.update(&self.backend, old, new)?;
            }
            if let Some(update) = new.hooks().and_then(|h| h.update.clone()) {
                update(old, new);
            }
        }

        let api = &self.backend;
        match &new.text {
            None => match (&old.children, &mut new.children) {
                (Some(old_ch), Some(new_ch)) => {
                    if !Rc::ptr_eq(old_ch, new_ch) {
                        self.update_children(&elm, old_ch, Rc::make_mut(new_ch).as_mut_slice(), queue)?;
                    }
                }
                (None, Some(new_ch)) => {
                    if old.text.is_some() {
                        api.set_text_content(&elm, Some(""))?;
                    }
                    self.add_vnodes(&elm, None, Rc::make_mut(new_ch).as_mut_slice(), queue)?;
                }
                (Some(old_ch), None) => {
                    self.remove_vnodes(&elm, old_ch.iter())?;
                }
                (None, None) => {
                    if old.text.is_some() {
                        api.set_text_content(&elm, Some(""))?;
                    }
                }
            },
            // Text wins, even over children declared alongside it
            Some(text) => {
                if old.text.as_ref() != Some(text) {
                    api.set_text_content(&elm, Some(text))?;
                }
            }
        }

        if let Some(postpatch) = new.hooks().and_then(|h| h.postpatch.clone()) {
            postpatch(old, new);
        }
        Ok(())
    }
}
