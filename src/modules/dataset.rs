//! Dataset module - `data-*` attributes from camelCase keys.

use std::rc::Rc;

use super::{data_of, same_data};
use crate::error::Result;
use crate::pipeline::{Module, Phases};
use crate::renderer::AttributeApi;
use crate::types::Dataset;
use crate::vnode::VNode;

#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetModule;

impl<B: AttributeApi> Module<B> for DatasetModule {
    fn phases(&self) -> Phases {
        Phases::CREATE | Phases::UPDATE
    }

    fn create(&self, api: &Rc<B>, empty: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_dataset(api.as_ref(), empty, vnode)
    }

    fn update(&self, api: &Rc<B>, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_dataset(api.as_ref(), old, vnode)
    }
}

fn update_dataset<B: AttributeApi>(api: &B, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
    let none = Dataset::new();
    let old_dataset = data_of(old).map_or(&none, |d| &d.dataset);
    let dataset = data_of(vnode).map_or(&none, |d| &d.dataset);
    if (old_dataset.is_empty() && dataset.is_empty()) || same_data(old, vnode) {
        return Ok(());
    }
    let elm = vnode.handle()?;

    // Empty values count as removed
    for key in old_dataset.keys() {
        if dataset.get(key).is_none_or(String::is_empty) {
            api.remove_attribute(elm, &attribute_name(key))?;
        }
    }
    for (key, value) in dataset {
        if old_dataset.get(key) != Some(value) && !value.is_empty() {
            api.set_attribute(elm, &attribute_name(key), value)?;
        }
    }
    Ok(())
}

/// `userId` → `data-user-id`.
fn attribute_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    name.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
        }
        name.push(c.to_ascii_lowercase());
    }
    name
}
