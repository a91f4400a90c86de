//! Style module - inline styles and their transition phases.
//!
//! - `props`: applied immediately; dropped names are cleared
//! - `delayed`: applied two animation frames after create/update, so the
//!   element renders once with its initial style and then transitions
//! - `destroy`: applied when the node or an ancestor is destroyed
//! - `remove`: applied when the node itself is removed; detachment waits for
//!   every transition running on one of those properties to end
//!
//! The first removal of a pass forces one reflow so that the remove styles
//! start transitions instead of being coalesced with earlier changes.

use std::cell::Cell;
use std::rc::Rc;

use super::{data_of, same_data};
use crate::error::Result;
use crate::pipeline::{Module, Phases, RemoveDone};
use crate::renderer::StyleApi;
use crate::types::VNodeStyle;
use crate::vnode::VNode;

#[derive(Debug, Default)]
pub struct StyleModule {
    /// A reflow was already forced during the current pass.
    reflow_forced: Cell<bool>,
}

impl StyleModule {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_style<B: StyleApi + 'static>(&self, api: &Rc<B>, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        let none = VNodeStyle::default();
        let old_style = data_of(old).map_or(&none, |d| &d.style);
        let style = data_of(vnode).map_or(&none, |d| &d.style);
        if (old_style.is_empty() && style.is_empty()) || same_data(old, vnode) {
            return Ok(());
        }
        let elm = vnode.handle()?;

        for name in old_style.props.keys() {
            if style.props.get(name).is_none_or(String::is_empty) {
                api.remove_style(elm, name)?;
            }
        }

        let old_has_delayed = !old_style.delayed.is_empty();
        for (name, value) in &style.delayed {
            if !old_has_delayed || old_style.delayed.get(name) != Some(value) {
                set_next_frame(api, elm.clone(), name.clone(), value.clone());
            }
        }

        for (name, value) in &style.props {
            if old_style.props.get(name) != Some(value) {
                api.set_style(elm, name, value)?;
            }
        }
        Ok(())
    }
}

impl<B: StyleApi + 'static> Module<B> for StyleModule {
    fn phases(&self) -> Phases {
        Phases::PRE | Phases::CREATE | Phases::UPDATE | Phases::DESTROY | Phases::REMOVE
    }

    fn pre(&self, _api: &Rc<B>) -> Result<()> {
        self.reflow_forced.set(false);
        Ok(())
    }

    fn create(&self, api: &Rc<B>, empty: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        self.update_style(api, empty, vnode)
    }

    fn update(&self, api: &Rc<B>, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        self.update_style(api, old, vnode)
    }

    fn destroy(&self, api: &Rc<B>, vnode: &VNode<B>) -> Result<()> {
        let Some(data) = data_of(vnode).filter(|d| !d.style.destroy.is_empty()) else {
            return Ok(());
        };
        let elm = vnode.handle()?;
        for (name, value) in &data.style.destroy {
            api.set_style(elm, name, value)?;
        }
        Ok(())
    }

    fn remove(&self, api: &Rc<B>, vnode: &VNode<B>, done: RemoveDone<B>) -> Result<()> {
        let Some(data) = data_of(vnode).filter(|d| !d.style.remove.is_empty()) else {
            done.done();
            return Ok(());
        };
        if !self.reflow_forced.replace(true) {
            api.force_reflow();
        }

        let elm = vnode.handle()?.clone();
        let applied = &data.style.remove;
        for (name, value) in applied {
            api.set_style(&elm, name, value)?;
        }

        let mut pending = api
            .transition_properties(&elm)
            .iter()
            .filter(|property| applied.contains_key(property.as_str()))
            .count();
        if pending == 0 {
            done.done();
            return Ok(());
        }

        tracing::trace!(node = ?elm, pending, "waiting for leave transitions");
        let mut done = Some(done);
        let target_elm = elm.clone();
        api.on_transition_end(
            &elm,
            Box::new(move |target: &B::Node| {
                // Transitions of descendants bubble through here too
                if *target == target_elm {
                    pending = pending.saturating_sub(1);
                }
                if pending == 0 {
                    if let Some(done) = done.take() {
                        done.done();
                    }
                }
            }),
        );
        Ok(())
    }
}

/// Set a style on the frame after next.
fn set_next_frame<B: StyleApi + 'static>(api: &Rc<B>, elm: B::Node, name: String, value: String) {
    let outer = Rc::clone(api);
    api.request_animation_frame(Box::new(move || {
        let inner = Rc::clone(&outer);
        outer.request_animation_frame(Box::new(move || {
            if let Err(err) = inner.set_style(&elm, &name, &value) {
                tracing::error!(node = ?elm, %name, %err, "failed to apply delayed style");
            }
        }));
    }));
}
