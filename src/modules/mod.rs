//! Concrete side-effect modules.
//!
//! Each module owns one field of [`VNodeData`](crate::VNodeData) and is
//! written only against the [`Module`](crate::Module) contract and a backend
//! capability trait:
//!
//! | module                   | data field | backend capability |
//! |--------------------------|------------|--------------------|
//! | [`AttributesModule`]     | `attrs`    | [`AttributeApi`](crate::AttributeApi) |
//! | [`ClassModule`]          | `class`    | [`ClassApi`](crate::ClassApi) |
//! | [`PropsModule`]          | `props`    | [`PropertyApi`](crate::PropertyApi) |
//! | [`DatasetModule`]        | `dataset`  | [`AttributeApi`](crate::AttributeApi) |
//! | [`StyleModule`]          | `style`    | [`StyleApi`](crate::StyleApi) |
//! | [`EventListenersModule`] | `on`       | [`EventApi`](crate::EventApi) |
//!
//! ```ignore
//! let engine = Engine::new(backend, vec![
//!     Box::new(ClassModule),
//!     Box::new(PropsModule),
//!     Box::new(StyleModule::new()),
//!     Box::new(EventListenersModule::new()),
//! ]);
//! ```

mod attributes;
mod class;
mod dataset;
mod eventlisteners;
mod props;
mod style;

pub use attributes::{AttributesModule, XLINK_NAMESPACE, XML_NAMESPACE};
pub use class::ClassModule;
pub use dataset::DatasetModule;
pub use eventlisteners::EventListenersModule;
pub use props::PropsModule;
pub use style::StyleModule;

use std::rc::Rc;

use crate::renderer::Backend;
use crate::vnode::{VNode, VNodeData};

/// Both nodes share one data allocation, so no data-driven effect can differ.
fn same_data<B: Backend>(old: &VNode<B>, vnode: &VNode<B>) -> bool {
    matches!((&old.data, &vnode.data), (Some(a), Some(b)) if Rc::ptr_eq(a, b))
}

fn data_of<B: Backend>(node: &VNode<B>) -> Option<&VNodeData<B>> {
    node.data.as_deref()
}
