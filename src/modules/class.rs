//! Class module - toggles classes from a name → enabled map.

use std::rc::Rc;

use super::{data_of, same_data};
use crate::error::Result;
use crate::pipeline::{Module, Phases};
use crate::renderer::ClassApi;
use crate::types::Classes;
use crate::vnode::VNode;

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassModule;

impl<B: ClassApi> Module<B> for ClassModule {
    fn phases(&self) -> Phases {
        Phases::CREATE | Phases::UPDATE
    }

    fn create(&self, api: &Rc<B>, empty: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_class(api.as_ref(), empty, vnode)
    }

    fn update(&self, api: &Rc<B>, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_class(api.as_ref(), old, vnode)
    }
}

fn update_class<B: ClassApi>(api: &B, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
    let none = Classes::new();
    let old_class = data_of(old).map_or(&none, |d| &d.class);
    let class = data_of(vnode).map_or(&none, |d| &d.class);
    if (old_class.is_empty() && class.is_empty()) || same_data(old, vnode) {
        return Ok(());
    }
    let elm = vnode.handle()?;

    for name in old_class.keys() {
        if !class.get(name).copied().unwrap_or(false) {
            api.remove_class(elm, name)?;
        }
    }
    for (name, &enabled) in class {
        if old_class.get(name) != Some(&enabled) {
            if enabled {
                api.add_class(elm, name)?;
            } else {
                api.remove_class(elm, name)?;
            }
        }
    }
    Ok(())
}
