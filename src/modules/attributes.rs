//! Attributes module.
//!
//! `true` sets an empty attribute and `false` removes it. Keys starting with
//! `x` that carry a `:` at index 3 (`xml:lang`) or 5 (`xlink:href`) are set
//! in the matching namespace.

use std::rc::Rc;

use super::{data_of, same_data};
use crate::error::Result;
use crate::pipeline::{Module, Phases};
use crate::renderer::AttributeApi;
use crate::types::{AttrValue, Attrs};
use crate::vnode::VNode;

pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Syncs `data.attrs` onto element attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributesModule;

impl<B: AttributeApi> Module<B> for AttributesModule {
    fn phases(&self) -> Phases {
        Phases::CREATE | Phases::UPDATE
    }

    fn create(&self, api: &Rc<B>, empty: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_attrs(api.as_ref(), empty, vnode)
    }

    fn update(&self, api: &Rc<B>, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_attrs(api.as_ref(), old, vnode)
    }
}

fn update_attrs<B: AttributeApi>(api: &B, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
    let none = Attrs::new();
    let old_attrs = data_of(old).map_or(&none, |d| &d.attrs);
    let attrs = data_of(vnode).map_or(&none, |d| &d.attrs);
    if (old_attrs.is_empty() && attrs.is_empty()) || same_data(old, vnode) {
        return Ok(());
    }
    let elm = vnode.handle()?;

    for (key, cur) in attrs {
        if old_attrs.get(key) == Some(cur) {
            continue;
        }
        match cur {
            AttrValue::Bool(true) => api.set_attribute(elm, key, "")?,
            AttrValue::Bool(false) => api.remove_attribute(elm, key)?,
            value => {
                let value = value.to_string();
                match namespace_of(key) {
                    Some(ns) => api.set_attribute_ns(elm, ns, key, &value)?,
                    None => api.set_attribute(elm, key, &value)?,
                }
            }
        }
    }

    for key in old_attrs.keys() {
        if !attrs.contains_key(key) {
            api.remove_attribute(elm, key)?;
        }
    }
    Ok(())
}

fn namespace_of(key: &str) -> Option<&'static str> {
    let bytes = key.as_bytes();
    if bytes.first() != Some(&b'x') {
        None
    } else if bytes.get(3) == Some(&b':') {
        Some(XML_NAMESPACE)
    } else if bytes.get(5) == Some(&b':') {
        Some(XLINK_NAMESPACE)
    } else {
        None
    }
}
