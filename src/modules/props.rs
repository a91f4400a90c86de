//! Props module - native object properties.
//!
//! `value` is only written when it differs from the live property, so a
//! user edit that already matches the description is left alone.

use std::rc::Rc;

use super::{data_of, same_data};
use crate::error::Result;
use crate::pipeline::{Module, Phases};
use crate::renderer::PropertyApi;
use crate::types::Props;
use crate::vnode::VNode;

#[derive(Debug, Default, Clone, Copy)]
pub struct PropsModule;

impl<B: PropertyApi> Module<B> for PropsModule {
    fn phases(&self) -> Phases {
        Phases::CREATE | Phases::UPDATE
    }

    fn create(&self, api: &Rc<B>, empty: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_props(api.as_ref(), empty, vnode)
    }

    fn update(&self, api: &Rc<B>, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
        update_props(api.as_ref(), old, vnode)
    }
}

fn update_props<B: PropertyApi>(api: &B, old: &VNode<B>, vnode: &VNode<B>) -> Result<()> {
    let none = Props::new();
    let old_props = data_of(old).map_or(&none, |d| &d.props);
    let props = data_of(vnode).map_or(&none, |d| &d.props);
    if (old_props.is_empty() && props.is_empty()) || same_data(old, vnode) {
        return Ok(());
    }
    let elm = vnode.handle()?;

    for key in old_props.keys() {
        if !props.contains_key(key) {
            api.remove_property(elm, key)?;
        }
    }
    for (key, cur) in props {
        if old_props.get(key) == Some(cur) {
            continue;
        }
        if key == "value" && api.property(elm, key).as_ref() == Some(cur) {
            continue;
        }
        api.set_property(elm, key, cur)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::primitives::h;
    use crate::renderer::Backend;
    use crate::renderer::memory::{MemoryBackend, Op};
    use crate::types::AttrValue;

    #[test]
    fn test_set_and_remove_props() {
        let backend = Rc::new(MemoryBackend::new());
        let engine = Engine::new(backend.clone(), vec![Box::new(PropsModule)]);
        let root = backend.create_element("input").unwrap();

        let tree = engine
            .patch_element(&root, h("input").prop("checked", true).prop("tabIndex", 3).build())
            .unwrap();
        assert_eq!(backend.property(&root, "checked"), Some(AttrValue::Bool(true)));
        assert_eq!(backend.property(&root, "tabIndex"), Some(AttrValue::Num(3.0)));

        engine.patch(tree, h("input").prop("checked", false).build()).unwrap();
        assert_eq!(backend.property(&root, "checked"), Some(AttrValue::Bool(false)));
        assert_eq!(backend.property(&root, "tabIndex"), None);
    }

    #[test]
    fn test_value_not_rewritten_when_live_matches() {
        let backend = Rc::new(MemoryBackend::new());
        let engine = Engine::new(backend.clone(), vec![Box::new(PropsModule)]);
        let root = backend.create_element("input").unwrap();

        let tree = engine.patch_element(&root, h("input").prop("value", "a").build()).unwrap();

        // The user typed the new value already
        backend.set_property(&root, "value", &AttrValue::from("ab")).unwrap();
        backend.clear_ops();
        engine.patch(tree, h("input").prop("value", "ab").build()).unwrap();

        let prop_writes = backend
            .ops()
            .into_iter()
            .filter(|op| matches!(op, Op::Mutate { what: "prop", .. }))
            .count();
        assert_eq!(prop_writes, 0);
        assert_eq!(backend.property(&root, "value"), Some(AttrValue::from("ab")));
    }
}
